use std::collections::HashMap;
use std::sync::Arc;

use spendlog_core::{AccountId, Expense, ExpenseDraft, ExpenseId, ExpenseStore, ExpenseStoreError};
use tokio::sync::RwLock;

/// In-memory expense store for tests and local development.
///
/// Owner scoping mirrors the Postgres store: a lookup for another owner's
/// record id answers `NotFound`, the same as a nonexistent id.
#[derive(Default, Clone)]
pub struct HashMapExpenseStore {
    expenses: Arc<RwLock<HashMap<ExpenseId, Expense>>>,
}

impl HashMapExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ExpenseStore for HashMapExpenseStore {
    async fn add(&self, expense: Expense) -> Result<(), ExpenseStoreError> {
        self.expenses.write().await.insert(expense.id(), expense);
        Ok(())
    }

    async fn list_for_owner(&self, owner: AccountId) -> Result<Vec<Expense>, ExpenseStoreError> {
        let expenses = self.expenses.read().await;
        let mut owned: Vec<Expense> = expenses
            .values()
            .filter(|expense| expense.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(owned)
    }

    async fn update(
        &self,
        owner: AccountId,
        id: ExpenseId,
        draft: ExpenseDraft,
    ) -> Result<Expense, ExpenseStoreError> {
        let mut expenses = self.expenses.write().await;
        match expenses.get(&id) {
            Some(existing) if existing.owner() == owner => {
                let updated = Expense::from_parts(id, owner, draft);
                expenses.insert(id, updated.clone());
                Ok(updated)
            }
            _ => Err(ExpenseStoreError::NotFound),
        }
    }

    async fn delete(&self, owner: AccountId, id: ExpenseId) -> Result<(), ExpenseStoreError> {
        let mut expenses = self.expenses.write().await;
        match expenses.get(&id) {
            Some(existing) if existing.owner() == owner => {
                expenses.remove(&id);
                Ok(())
            }
            _ => Err(ExpenseStoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use spendlog_core::{Amount, Category};

    fn draft(title: &str, day: u32) -> ExpenseDraft {
        ExpenseDraft::new(
            title,
            Amount::new(Decimal::new(350, 2)).unwrap(),
            Category::Food,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn listing_is_owner_scoped_and_newest_first() {
        let store = HashMapExpenseStore::new();
        let owner = AccountId::new();
        let other = AccountId::new();

        store.add(Expense::new(owner, draft("older", 1))).await.unwrap();
        store.add(Expense::new(owner, draft("newer", 9))).await.unwrap();
        store.add(Expense::new(other, draft("theirs", 5))).await.unwrap();

        let listed = store.list_for_owner(owner).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title(), "newer");
        assert_eq!(listed[1].title(), "older");
    }

    #[tokio::test]
    async fn cross_owner_update_and_delete_answer_not_found() {
        let store = HashMapExpenseStore::new();
        let owner = AccountId::new();
        let intruder = AccountId::new();

        let expense = Expense::new(owner, draft("Coffee", 1));
        let id = expense.id();
        store.add(expense).await.unwrap();

        let update = store.update(intruder, id, draft("Stolen", 2)).await;
        assert_eq!(update, Err(ExpenseStoreError::NotFound));

        let delete = store.delete(intruder, id).await;
        assert_eq!(delete, Err(ExpenseStoreError::NotFound));

        // Still intact for the real owner
        assert_eq!(store.list_for_owner(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_answers_not_found() {
        let store = HashMapExpenseStore::new();
        let owner = AccountId::new();
        let result = store.delete(owner, ExpenseId::new()).await;
        assert_eq!(result, Err(ExpenseStoreError::NotFound));
    }
}
