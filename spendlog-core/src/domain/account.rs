use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email::Email;
use super::password::PasswordHash;
use super::person_name::PersonName;
use super::token::{IssuedToken, TokenState};

/// Opaque account identifier, embedded in session credentials and used as
/// the owner key on every expense record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An account and its credential/token state.
///
/// Token transitions always overwrite: there is at most one live
/// verification token and one live reset token per account, and a verified
/// account carries no verification token.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    email: Email,
    name: PersonName,
    password_hash: PasswordHash,
    verified: bool,
    verification_token: Option<TokenState>,
    reset_token: Option<TokenState>,
}

impl Account {
    /// A new registration: unverified, with a pending verification token.
    pub fn new(
        email: Email,
        name: PersonName,
        password_hash: PasswordHash,
        verification_token: &IssuedToken,
    ) -> Self {
        Self {
            id: AccountId::new(),
            email,
            name,
            password_hash,
            verified: false,
            verification_token: Some(verification_token.into()),
            reset_token: None,
        }
    }

    /// Rehydrate a persisted record.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: AccountId,
        email: Email,
        name: PersonName,
        password_hash: PasswordHash,
        verified: bool,
        verification_token: Option<TokenState>,
        reset_token: Option<TokenState>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            verified,
            verification_token,
            reset_token,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn verification_token(&self) -> Option<&TokenState> {
        self.verification_token.as_ref()
    }

    pub fn reset_token(&self) -> Option<&TokenState> {
        self.reset_token.as_ref()
    }

    /// Terminal verification transition: clears the token.
    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.verification_token = None;
    }

    /// Overwrites any previously issued verification token.
    pub fn set_verification_token(&mut self, token: &IssuedToken) {
        self.verification_token = Some(token.into());
    }

    /// Overwrites any previously issued reset token.
    pub fn set_reset_token(&mut self, token: &IssuedToken) {
        self.reset_token = Some(token.into());
    }

    /// Installs a new password hash and consumes the reset token.
    pub fn reset_password(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
        self.reset_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use secrecy::Secret;

    fn account() -> Account {
        let email = Email::try_from(Secret::from("a@x.com".to_owned())).unwrap();
        let name = PersonName::new("Ada", "Lovelace").unwrap();
        let hash = PasswordHash::new(Secret::from("$argon2id$stub".to_owned()));
        let token = IssuedToken::generate(Duration::seconds(900), Utc::now());
        Account::new(email, name, hash, &token)
    }

    #[test]
    fn new_account_is_unverified_with_token() {
        let account = account();
        assert!(!account.is_verified());
        assert!(account.verification_token().is_some());
        assert!(account.reset_token().is_none());
    }

    #[test]
    fn mark_verified_clears_verification_token() {
        let mut account = account();
        account.mark_verified();
        assert!(account.is_verified());
        assert!(account.verification_token().is_none());
    }

    #[test]
    fn reissuing_replaces_the_previous_token() {
        let mut account = account();
        let first = account.verification_token().unwrap().token.clone();
        let fresh = IssuedToken::generate(Duration::seconds(900), Utc::now());
        account.set_verification_token(&fresh);
        let current = account.verification_token().unwrap();
        assert_ne!(current.token, first);
        assert_eq!(current.token, fresh.token());
    }

    #[test]
    fn reset_password_consumes_reset_token() {
        let mut account = account();
        let token = IssuedToken::generate(Duration::seconds(900), Utc::now());
        account.set_reset_token(&token);
        assert!(account.reset_token().is_some());

        account.reset_password(PasswordHash::new(Secret::from("$argon2id$new".to_owned())));
        assert!(account.reset_token().is_none());
    }
}
