use async_trait::async_trait;
use dashmap::DashMap;
use roster_core::{RosterError, RosterResult, User, UserInput};
use std::sync::atomic::{AtomicI32, Ordering};

/// Persistence for user rows.
///
/// Every method is a single independent operation; implementations do not
/// wrap calls in transactions.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in the store's natural order.
    async fn list(&self) -> RosterResult<Vec<User>>;

    async fn get(&self, id: i32) -> RosterResult<Option<User>>;

    /// Insert a user and return the id the store assigned to it.
    async fn create(&self, input: &UserInput) -> RosterResult<i32>;

    /// Overwrite name and email, returning the number of rows affected.
    /// A missing id affects zero rows and is not an error.
    async fn update(&self, id: i32, input: &UserInput) -> RosterResult<u64>;

    /// Remove a user, or fail with `UserNotFound` if there is none.
    async fn delete(&self, id: i32) -> RosterResult<()>;
}

/// In-process store keyed by id, with ids handed out from 1 upwards.
pub struct MemoryStore {
    users: DashMap<i32, User>,
    next_id: AtomicI32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> RosterResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn get(&self, id: i32) -> RosterResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, input: &UserInput) -> RosterResult<i32> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.insert(id, User::from_input(id, input.clone()));
        Ok(id)
    }

    async fn update(&self, id: i32, input: &UserInput) -> RosterResult<u64> {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                user.name = input.name.clone();
                user.email = input.email.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> RosterResult<()> {
        self.users
            .remove(&id)
            .map(|_| ())
            .ok_or(RosterError::UserNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let store = MemoryStore::new();

        let first = store.create(&UserInput::new("Ann", "ann@x.com")).await.unwrap();
        let second = store.create(&UserInput::new("Bo", "bo@x.com")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let store = MemoryStore::new();
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_user_affects_nothing() {
        let store = MemoryStore::new();

        let affected = store.update(9, &UserInput::new("Ghost", "")).await.unwrap();

        assert_eq!(affected, 0);
        assert!(store.get(9).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let store = MemoryStore::new();
        let id = store.create(&UserInput::new("Ann", "ann@x.com")).await.unwrap();

        let affected = store.update(id, &UserInput::new("Ann B", "annb@x.com")).await.unwrap();
        assert_eq!(affected, 1);

        let user = store.get(id).await.unwrap().unwrap();
        assert_eq!(user, User { id, name: "Ann B".into(), email: "annb@x.com".into() });
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let store = MemoryStore::new();
        store.create(&UserInput::default()).await.unwrap();

        let err = store.delete(5).await.unwrap_err();

        assert!(matches!(err, RosterError::UserNotFound(5)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let store = MemoryStore::new();
        let id = store.create(&UserInput::default()).await.unwrap();
        store.delete(id).await.unwrap();

        let next = store.create(&UserInput::default()).await.unwrap();
        assert_ne!(id, next);
    }
}
