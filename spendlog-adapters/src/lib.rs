pub mod auth;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;
pub mod security;

// Re-export commonly used types for convenience
pub use auth::{Claims, SessionConfig, SessionTokenError, authorize, create_removal_cookie};
pub use email::{MockEmailClient, PostmarkEmailClient, TemplateMailer};
pub use persistence::{
    HashMapAccountStore, HashMapExpenseStore, PostgresAccountStore, PostgresExpenseStore,
};
pub use security::Argon2PasswordHasher;
