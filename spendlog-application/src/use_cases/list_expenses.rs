use spendlog_core::{AccountId, Expense, ExpenseStore, ExpenseStoreError};

/// Error types specific to the list expenses use case
#[derive(Debug, thiserror::Error)]
pub enum ListExpensesError {
    #[error("Expense store error: {0}")]
    ExpenseStoreError(#[from] ExpenseStoreError),
}

/// List expenses use case - returns the acting account's records, newest
/// date first.
pub struct ListExpensesUseCase<S>
where
    S: ExpenseStore,
{
    expense_store: S,
}

impl<S> ListExpensesUseCase<S>
where
    S: ExpenseStore,
{
    pub fn new(expense_store: S) -> Self {
        Self { expense_store }
    }

    /// Execute the list expenses use case
    #[tracing::instrument(name = "ListExpensesUseCase::execute", skip(self))]
    pub async fn execute(&self, owner: AccountId) -> Result<Vec<Expense>, ListExpensesError> {
        Ok(self.expense_store.list_for_owner(owner).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryExpenseStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use spendlog_core::{Amount, Category, ExpenseDraft};

    fn draft(title: &str, day: u32) -> ExpenseDraft {
        ExpenseDraft::new(
            title,
            Amount::new(Decimal::ONE).unwrap(),
            Category::Other,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_only_the_owners_records_newest_first() {
        let store = MemoryExpenseStore::new();
        let owner = AccountId::new();
        let other = AccountId::new();

        store
            .add(Expense::new(owner, draft("older", 1)))
            .await
            .unwrap();
        store
            .add(Expense::new(owner, draft("newer", 15)))
            .await
            .unwrap();
        store
            .add(Expense::new(other, draft("not yours", 10)))
            .await
            .unwrap();

        let use_case = ListExpensesUseCase::new(store);
        let listed = use_case.execute(owner).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title(), "newer");
        assert_eq!(listed[1].title(), "older");
    }

    #[tokio::test]
    async fn empty_for_an_account_without_records() {
        let store = MemoryExpenseStore::new();
        let use_case = ListExpensesUseCase::new(store);
        assert!(use_case.execute(AccountId::new()).await.unwrap().is_empty());
    }
}
