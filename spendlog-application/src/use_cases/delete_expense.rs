use spendlog_core::{AccountId, ExpenseId, ExpenseStore, ExpenseStoreError};

/// Error types specific to the delete expense use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteExpenseError {
    /// Covers both a nonexistent id and another owner's record; the two are
    /// indistinguishable by design.
    #[error("Expense not found")]
    NotFound,
    #[error("Expense store error: {0}")]
    ExpenseStoreError(ExpenseStoreError),
}

impl From<ExpenseStoreError> for DeleteExpenseError {
    fn from(error: ExpenseStoreError) -> Self {
        match error {
            ExpenseStoreError::NotFound => DeleteExpenseError::NotFound,
            other => DeleteExpenseError::ExpenseStoreError(other),
        }
    }
}

/// Delete expense use case - removes an owned record.
pub struct DeleteExpenseUseCase<S>
where
    S: ExpenseStore,
{
    expense_store: S,
}

impl<S> DeleteExpenseUseCase<S>
where
    S: ExpenseStore,
{
    pub fn new(expense_store: S) -> Self {
        Self { expense_store }
    }

    /// Execute the delete expense use case
    #[tracing::instrument(name = "DeleteExpenseUseCase::execute", skip(self))]
    pub async fn execute(&self, owner: AccountId, id: ExpenseId) -> Result<(), DeleteExpenseError> {
        Ok(self.expense_store.delete(owner, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryExpenseStore;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use spendlog_core::{Amount, Category, Expense, ExpenseDraft};

    fn expense(owner: AccountId) -> Expense {
        Expense::new(
            owner,
            ExpenseDraft::new(
                "Coffee",
                Amount::new(Decimal::ONE).unwrap(),
                Category::Food,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn owner_can_delete_their_record() {
        let store = MemoryExpenseStore::new();
        let owner = AccountId::new();
        let expense = expense(owner);
        store.add(expense.clone()).await.unwrap();

        let use_case = DeleteExpenseUseCase::new(store.clone());
        use_case.execute(owner, expense.id()).await.unwrap();

        assert!(store.list_for_owner(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn another_owner_cannot_delete_and_the_record_survives() {
        let store = MemoryExpenseStore::new();
        let owner = AccountId::new();
        let expense = expense(owner);
        store.add(expense.clone()).await.unwrap();

        let use_case = DeleteExpenseUseCase::new(store.clone());
        let result = use_case.execute(AccountId::new(), expense.id()).await;

        assert!(matches!(result, Err(DeleteExpenseError::NotFound)));
        assert_eq!(store.list_for_owner(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_a_missing_record_is_not_found() {
        let store = MemoryExpenseStore::new();
        let use_case = DeleteExpenseUseCase::new(store);
        let result = use_case.execute(AccountId::new(), ExpenseId::new()).await;
        assert!(matches!(result, Err(DeleteExpenseError::NotFound)));
    }
}
