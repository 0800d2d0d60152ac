use spendlog_core::{
    AccountId, AccountStore, AccountStoreError, Email, Password, PasswordHasher,
    PasswordHasherError,
};

/// Identity established by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub id: AccountId,
    pub first_name: String,
}

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password collapse into this one variant so
    /// the response can never disclose which field was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Please verify your email before logging in")]
    NotVerified,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Login use case - authenticates credentials for session issuance.
pub struct LoginUseCase<A, H>
where
    A: AccountStore,
    H: PasswordHasher,
{
    account_store: A,
    password_hasher: H,
}

impl<A, H> LoginUseCase<A, H>
where
    A: AccountStore,
    H: PasswordHasher,
{
    pub fn new(account_store: A, password_hasher: H) -> Self {
        Self {
            account_store,
            password_hasher,
        }
    }

    /// Execute the login use case
    ///
    /// Verification is mandatory: an unverified account is refused before
    /// any credential comparison, with no exceptions.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthenticatedAccount, LoginError> {
        let account = self
            .account_store
            .find_by_email(&email)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;

        if !account.is_verified() {
            return Err(LoginError::NotVerified);
        }

        self.password_hasher
            .verify(account.password_hash(), password)
            .await
            .map_err(|e| match e {
                PasswordHasherError::IncorrectPassword => LoginError::InvalidCredentials,
                PasswordHasherError::UnexpectedError(e) => LoginError::UnexpectedError(e),
            })?;

        Ok(AuthenticatedAccount {
            id: account.id(),
            first_name: account.name().first().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryAccountStore, StubPasswordHasher, email, password};
    use chrono::{Duration, Utc};
    use secrecy::Secret;
    use spendlog_core::{Account, IssuedToken, PasswordHash, PersonName};

    async fn seed_account(store: &MemoryAccountStore, verified: bool) -> Account {
        let token = IssuedToken::generate(Duration::seconds(900), Utc::now());
        let mut account = Account::new(
            email("a@x.com"),
            PersonName::new("Ada", "Lovelace").unwrap(),
            PasswordHash::new(Secret::from("hashed:secret1".to_owned())),
            &token,
        );
        if verified {
            account.mark_verified();
        }
        store.add_account(account.clone()).await.unwrap();
        account
    }

    #[tokio::test]
    async fn verified_account_with_correct_password_logs_in() {
        let store = MemoryAccountStore::new();
        let account = seed_account(&store, true).await;

        let use_case = LoginUseCase::new(store, StubPasswordHasher);
        let authenticated = use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        assert_eq!(authenticated.id, account.id());
        assert_eq!(authenticated.first_name, "Ada");
    }

    #[tokio::test]
    async fn unverified_account_is_refused_even_with_correct_password() {
        let store = MemoryAccountStore::new();
        seed_account(&store, false).await;

        let use_case = LoginUseCase::new(store, StubPasswordHasher);
        let result = use_case.execute(email("a@x.com"), password("secret1")).await;
        assert!(matches!(result, Err(LoginError::NotVerified)));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_identically() {
        let store = MemoryAccountStore::new();
        seed_account(&store, true).await;

        let use_case = LoginUseCase::new(store, StubPasswordHasher);

        let unknown = use_case
            .execute(email("b@x.com"), password("secret1"))
            .await
            .unwrap_err();
        let wrong = use_case
            .execute(email("a@x.com"), password("wrongpw"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, LoginError::InvalidCredentials));
        assert!(matches!(wrong, LoginError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }
}
