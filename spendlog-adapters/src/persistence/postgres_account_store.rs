use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use spendlog_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, PasswordHash, PersonName,
    TokenState, VerificationAttempt,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Postgres-backed account store.
///
/// The unique index on `email` is the duplicate-registration guard; a
/// constraint violation on insert is reported as `DuplicateEmail`. Every
/// mutation writes the whole row, so token rotation is a single atomic
/// update.
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: sqlx::PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, account: Account) -> Result<(), AccountStoreError> {
        sqlx::query(
            r#"
                INSERT INTO accounts (id, email, first_name, last_name, password_hash, verified,
                    verification_token, verification_token_expires_at,
                    reset_token, reset_token_expires_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.name().first())
        .bind(account.name().last())
        .bind(account.password_hash().as_ref().expose_secret())
        .bind(account.is_verified())
        .bind(account.verification_token().map(|state| state.token.clone()))
        .bind(account.verification_token().map(|state| state.expires_at))
        .bind(account.reset_token().map(|state| state.token.clone()))
        .bind(account.reset_token().map(|state| state.expires_at))
        .execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return AccountStoreError::DuplicateEmail;
                }
            }
            AccountStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
                SELECT id, email, first_name, last_name, password_hash, verified,
                    verification_token, verification_token_expires_at,
                    reset_token, reset_token_expires_at
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving account by verification token", skip_all)]
    async fn find_by_verification_token(
        &self,
        attempt: &VerificationAttempt,
    ) -> Result<Option<Account>, AccountStoreError> {
        // Expiry is deliberately not filtered here; the caller judges
        // liveness so an expired token can be told apart from an unknown one.
        let query = match attempt {
            VerificationAttempt::Token(token) => sqlx::query_as(
                r#"
                    SELECT id, email, first_name, last_name, password_hash, verified,
                        verification_token, verification_token_expires_at,
                        reset_token, reset_token_expires_at
                    FROM accounts
                    WHERE verification_token = $1
                "#,
            )
            .bind(token.clone()),
            VerificationAttempt::Code(code) => sqlx::query_as(
                r#"
                    SELECT id, email, first_name, last_name, password_hash, verified,
                        verification_token, verification_token_expires_at,
                        reset_token, reset_token_expires_at
                    FROM accounts
                    WHERE UPPER(LEFT(verification_token, 6)) = $1
                "#,
            )
            .bind(code.clone()),
        };

        let row: Option<AccountRow> = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving account by reset token", skip_all)]
    async fn find_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Account>, AccountStoreError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
                SELECT id, email, first_name, last_name, password_hash, verified,
                    verification_token, verification_token_expires_at,
                    reset_token, reset_token_expires_at
                FROM accounts
                WHERE reset_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Updating account in PostgreSQL", skip_all)]
    async fn update(&self, account: &Account) -> Result<(), AccountStoreError> {
        sqlx::query(
            r#"
                UPDATE accounts
                SET email = $2, first_name = $3, last_name = $4, password_hash = $5,
                    verified = $6, verification_token = $7, verification_token_expires_at = $8,
                    reset_token = $9, reset_token_expires_at = $10
                WHERE id = $1
            "#,
        )
        .bind(account.id().as_uuid())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.name().first())
        .bind(account.name().last())
        .bind(account.password_hash().as_ref().expose_secret())
        .bind(account.is_verified())
        .bind(account.verification_token().map(|state| state.token.clone()))
        .bind(account.verification_token().map(|state| state.expires_at))
        .bind(account.reset_token().map(|state| state.token.clone()))
        .bind(account.reset_token().map(|state| state.expires_at))
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    verified: bool,
    verification_token: Option<String>,
    verification_token_expires_at: Option<DateTime<Utc>>,
    reset_token: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
        let name = PersonName::new(&row.first_name, &row.last_name)
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        Ok(Account::from_parts(
            AccountId::from(row.id),
            email,
            name,
            PasswordHash::new(Secret::from(row.password_hash)),
            row.verified,
            token_state(row.verification_token, row.verification_token_expires_at),
            token_state(row.reset_token, row.reset_token_expires_at),
        ))
    }
}

fn token_state(token: Option<String>, expires_at: Option<DateTime<Utc>>) -> Option<TokenState> {
    match (token, expires_at) {
        (Some(token), Some(expires_at)) => Some(TokenState { token, expires_at }),
        _ => None,
    }
}
