use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;
use super::account::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ExpenseId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed category set; anything else is rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Entertainment,
    Bills,
    Shopping,
    Healthcare,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Food" => Ok(Self::Food),
            "Transportation" => Ok(Self::Transportation),
            "Entertainment" => Ok(Self::Entertainment),
            "Bills" => Ok(Self::Bills),
            "Shopping" => Ok(Self::Shopping),
            "Healthcare" => Ok(Self::Healthcare),
            "Other" => Ok(Self::Other),
            other => Err(format!("unknown expense category: {other}")),
        }
    }
}

/// A strictly positive monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Validated expense fields, shared between creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    title: String,
    amount: Amount,
    category: Category,
    date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        title: &str,
        amount: Amount,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            title: title.to_owned(),
            amount,
            category,
            date,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// An expense record bound to exactly one owning account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    id: ExpenseId,
    owner: AccountId,
    title: String,
    amount: Amount,
    category: Category,
    date: NaiveDate,
}

impl Expense {
    pub fn new(owner: AccountId, draft: ExpenseDraft) -> Self {
        Self::from_parts(ExpenseId::new(), owner, draft)
    }

    pub fn from_parts(id: ExpenseId, owner: AccountId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            owner,
            title: draft.title,
            amount: draft.amount,
            category: draft.category,
            date: draft.date,
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}
