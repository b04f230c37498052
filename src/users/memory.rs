use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::users::{
    repo::{StoreError, UserStore},
    repo_types::{NewUser, ProfileUpdate, User},
};

/// In-process store used by tests in place of Postgres.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a record, simulating a user vanishing after a token was issued.
    pub async fn remove(&self, id: Uuid) {
        self.users.write().await.remove(&id);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let now = OffsetDateTime::now_utc();
        let record = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        user.updated_at = OffsetDateTime::now_utc();
        Ok(Some(user.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "hash".into(),
            first_name: "Tony".into(),
            last_name: "Stark".into(),
        }
    }

    #[tokio::test]
    async fn insert_enforces_unique_email() {
        let store = MemoryUserStore::new();
        store.insert(new_user("tony@stark.com")).await.expect("first insert");
        let err = store.insert(new_user("tony@stark.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn email_match_is_case_sensitive() {
        let store = MemoryUserStore::new();
        store.insert(new_user("tony@stark.com")).await.expect("insert");
        assert!(store.find_by_email("Tony@Stark.com").await.unwrap().is_none());
        assert!(store.insert(new_user("Tony@Stark.com")).await.is_ok());
    }

    #[tokio::test]
    async fn update_keeps_unset_fields() {
        let store = MemoryUserStore::new();
        let user = store.insert(new_user("steve@rogers.com")).await.expect("insert");
        let updated = store
            .update_profile(
                user.id,
                ProfileUpdate {
                    first_name: Some("Steve".into()),
                    last_name: None,
                },
            )
            .await
            .expect("update")
            .expect("user exists");
        assert_eq!(updated.first_name, "Steve");
        assert_eq!(updated.last_name, "Stark");
        assert_eq!(updated.email, "steve@rogers.com");
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = MemoryUserStore::new();
        let res = store
            .update_profile(Uuid::new_v4(), ProfileUpdate::default())
            .await
            .expect("update");
        assert!(res.is_none());
    }
}
