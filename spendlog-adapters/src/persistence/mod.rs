pub mod hashmap_account_store;
pub mod hashmap_expense_store;
pub mod postgres_account_store;
pub mod postgres_expense_store;

pub use hashmap_account_store::HashMapAccountStore;
pub use hashmap_expense_store::HashMapExpenseStore;
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_expense_store::PostgresExpenseStore;
