use spendlog_core::{AccountId, Expense, ExpenseDraft, ExpenseStore, ExpenseStoreError};

/// Error types specific to the add expense use case
#[derive(Debug, thiserror::Error)]
pub enum AddExpenseError {
    #[error("Expense store error: {0}")]
    ExpenseStoreError(#[from] ExpenseStoreError),
}

/// Add expense use case - records an expense for the acting account.
pub struct AddExpenseUseCase<S>
where
    S: ExpenseStore,
{
    expense_store: S,
}

impl<S> AddExpenseUseCase<S>
where
    S: ExpenseStore,
{
    pub fn new(expense_store: S) -> Self {
        Self { expense_store }
    }

    /// Execute the add expense use case
    ///
    /// The owner comes from the authorization guard, never from the request
    /// body.
    #[tracing::instrument(name = "AddExpenseUseCase::execute", skip(self, draft))]
    pub async fn execute(
        &self,
        owner: AccountId,
        draft: ExpenseDraft,
    ) -> Result<Expense, AddExpenseError> {
        let expense = Expense::new(owner, draft);
        self.expense_store.add(expense.clone()).await?;
        Ok(expense)
    }
}
