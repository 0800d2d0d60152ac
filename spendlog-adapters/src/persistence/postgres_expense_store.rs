use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendlog_core::{
    AccountId, Amount, Category, Expense, ExpenseDraft, ExpenseId, ExpenseStore, ExpenseStoreError,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Postgres-backed expense store.
///
/// Every query carries a `owner_id = $n` filter, so a record belonging to a
/// different account answers exactly like a nonexistent one.
#[derive(Clone)]
pub struct PostgresExpenseStore {
    pool: sqlx::PgPool,
}

impl PostgresExpenseStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresExpenseStore { pool }
    }
}

#[async_trait::async_trait]
impl ExpenseStore for PostgresExpenseStore {
    #[tracing::instrument(name = "Adding expense to PostgreSQL", skip_all)]
    async fn add(&self, expense: Expense) -> Result<(), ExpenseStoreError> {
        sqlx::query(
            r#"
                INSERT INTO expenses (id, owner_id, title, amount, category, date)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(expense.id().as_uuid())
        .bind(expense.owner().as_uuid())
        .bind(expense.title())
        .bind(expense.amount().value())
        .bind(expense.category().as_str())
        .bind(expense.date())
        .execute(&self.pool)
        .await
        .map_err(|e| ExpenseStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Listing expenses from PostgreSQL", skip_all)]
    async fn list_for_owner(&self, owner: AccountId) -> Result<Vec<Expense>, ExpenseStoreError> {
        let rows: Vec<ExpenseRow> = sqlx::query_as(
            r#"
                SELECT id, owner_id, title, amount, category, date
                FROM expenses
                WHERE owner_id = $1
                ORDER BY date DESC
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ExpenseStoreError::UnexpectedError(e.to_string()))?;

        rows.into_iter().map(Expense::try_from).collect()
    }

    #[tracing::instrument(name = "Updating expense in PostgreSQL", skip_all)]
    async fn update(
        &self,
        owner: AccountId,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE expenses
                SET title = $3, amount = $4, category = $5, date = $6
                WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .bind(draft.title())
        .bind(draft.amount().value())
        .bind(draft.category().as_str())
        .bind(draft.date())
        .execute(&self.pool)
        .await
        .map_err(|e| ExpenseStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ExpenseStoreError::NotFound);
        }

        Ok(Expense::from_parts(id, owner, draft))
    }

    #[tracing::instrument(name = "Deleting expense from PostgreSQL", skip_all)]
    async fn delete(&self, owner: AccountId, id: ExpenseId) -> Result<(), ExpenseStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM expenses
                WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| ExpenseStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ExpenseStoreError::NotFound);
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ExpenseRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    amount: Decimal,
    category: String,
    date: NaiveDate,
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = ExpenseStoreError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        let amount = Amount::new(row.amount)
            .map_err(|e| ExpenseStoreError::UnexpectedError(e.to_string()))?;
        let category: Category = row
            .category
            .parse()
            .map_err(ExpenseStoreError::UnexpectedError)?;
        let draft = ExpenseDraft::new(&row.title, amount, category, row.date)
            .map_err(|e| ExpenseStoreError::UnexpectedError(e.to_string()))?;

        Ok(Expense::from_parts(
            ExpenseId::from(row.id),
            AccountId::from(row.owner_id),
            draft,
        ))
    }
}
