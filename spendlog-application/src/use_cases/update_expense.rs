use spendlog_core::{AccountId, Expense, ExpenseDraft, ExpenseId, ExpenseStore, ExpenseStoreError};

/// Error types specific to the update expense use case
#[derive(Debug, thiserror::Error)]
pub enum UpdateExpenseError {
    /// Covers both a nonexistent id and another owner's record; the two are
    /// indistinguishable by design.
    #[error("Expense not found")]
    NotFound,
    #[error("Expense store error: {0}")]
    ExpenseStoreError(ExpenseStoreError),
}

impl From<ExpenseStoreError> for UpdateExpenseError {
    fn from(error: ExpenseStoreError) -> Self {
        match error {
            ExpenseStoreError::NotFound => UpdateExpenseError::NotFound,
            other => UpdateExpenseError::ExpenseStoreError(other),
        }
    }
}

/// Update expense use case - replaces an owned record's fields.
pub struct UpdateExpenseUseCase<S>
where
    S: ExpenseStore,
{
    expense_store: S,
}

impl<S> UpdateExpenseUseCase<S>
where
    S: ExpenseStore,
{
    pub fn new(expense_store: S) -> Self {
        Self { expense_store }
    }

    /// Execute the update expense use case
    #[tracing::instrument(name = "UpdateExpenseUseCase::execute", skip(self, draft))]
    pub async fn execute(
        &self,
        owner: AccountId,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Expense, UpdateExpenseError> {
        Ok(self.expense_store.update(owner, id, draft).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryExpenseStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use spendlog_core::{Amount, Category};

    fn draft(title: &str) -> ExpenseDraft {
        ExpenseDraft::new(
            title,
            Amount::new(Decimal::ONE).unwrap(),
            Category::Other,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn owner_can_update_their_record() {
        let store = MemoryExpenseStore::new();
        let owner = AccountId::new();
        let expense = Expense::new(owner, draft("Coffee"));
        store.add(expense.clone()).await.unwrap();

        let use_case = UpdateExpenseUseCase::new(store);
        let updated = use_case
            .execute(owner, expense.id(), draft("Espresso"))
            .await
            .unwrap();

        assert_eq!(updated.id(), expense.id());
        assert_eq!(updated.title(), "Espresso");
    }

    #[tokio::test]
    async fn another_owner_gets_not_found() {
        let store = MemoryExpenseStore::new();
        let owner = AccountId::new();
        let expense = Expense::new(owner, draft("Coffee"));
        store.add(expense.clone()).await.unwrap();

        let use_case = UpdateExpenseUseCase::new(store);
        let result = use_case
            .execute(AccountId::new(), expense.id(), draft("Hijack"))
            .await;

        assert!(matches!(result, Err(UpdateExpenseError::NotFound)));
    }
}
