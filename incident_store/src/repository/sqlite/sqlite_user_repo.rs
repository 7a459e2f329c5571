use log::info;
use rusqlite::types::ToSql;
use rusqlite::Row;

use crate::error::StoreError;
use crate::password;
use crate::repository::record_repository::RecordRepository;
use crate::repository::sqlite::sqlite_repository::{
    timestamp_column, SqliteRepository, TableSchema,
};
use crate::repository::user_accounts::UserAccounts;
use crate::types::{NewUser, User, DEFAULT_ROLE};

/// `users`, addressed by username; the mutable column is the role
pub struct UserTable;

pub type SqliteUserRepository = SqliteRepository<UserTable>;

impl TableSchema for UserTable {
    type Record = User;
    type NewRecord = NewUser;
    type Key = str;

    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] =
        &["id", "username", "password_hash", "role", "created_at"];
    const INSERT_COLUMNS: &'static [&'static str] = &["username", "password_hash", "role"];
    const KEY_COLUMN: &'static str = "username";
    const MUTABLE_COLUMN: &'static str = "role";
    const ORDER_BY: &'static str = "id ASC";

    fn insert_params(user: &NewUser) -> Vec<&dyn ToSql> {
        vec![&user.username as &dyn ToSql, &user.password_hash, &user.role]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            role: row
                .get::<_, Option<String>>(3)?
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            created_at: timestamp_column(row, 4)?,
        })
    }
}

impl UserAccounts for SqliteUserRepository {
    fn register(
        &self,
        username: &str,
        plaintext_password: &str,
        role: &str,
    ) -> Result<i64, StoreError> {
        let password_hash = password::hash_password(plaintext_password)?;
        let id = self.insert(&NewUser::new(username, password_hash).with_role(role))?;
        info!("Registered user '{username}' with role '{role}'");
        Ok(id)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.find_by_key(username)
    }

    fn update_role(&self, username: &str, new_role: &str) -> Result<usize, StoreError> {
        self.update_status(username, new_role)
    }

    fn verify_password(
        &self,
        username: &str,
        plaintext_password: &str,
    ) -> Result<bool, StoreError> {
        match self.find_by_key(username)? {
            Some(user) => password::verify_password(plaintext_password, &user.password_hash),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::sqlite::tests::test_database_manager;

    #[test]
    fn test_register_stores_hash_only() -> Result<(), StoreError> {
        let user_repo = test_database_manager()?.create_user_repository();
        let id = user_repo.register("alice", "secret123", "admin")?;

        let alice = user_repo
            .find_by_username("alice")?
            .expect("alice should have been stored");
        assert_eq!(id, alice.id);
        assert_eq!("admin", alice.role);
        assert_ne!("secret123", alice.password_hash);
        assert!(alice.password_hash.starts_with("$argon2"));
        assert!(user_repo.verify_password("alice", "secret123")?);
        assert!(!user_repo.verify_password("alice", "secret124")?);
        assert!(!user_repo.verify_password("mallory", "secret123")?);
        Ok(())
    }

    #[test]
    fn test_duplicate_username_is_rejected() -> Result<(), StoreError> {
        let user_repo = test_database_manager()?.create_user_repository();
        user_repo.insert(&NewUser::new("bob", "hash-1"))?;

        let result = user_repo.insert(&NewUser::new("bob", "hash-2").with_role("admin"));
        assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));

        let users = user_repo.get_all()?;
        assert_eq!(1, users.len());
        assert_eq!("hash-1", users[0].password_hash);
        assert_eq!(DEFAULT_ROLE, users[0].role);
        Ok(())
    }

    #[test]
    fn test_update_role_and_delete() -> Result<(), StoreError> {
        let user_repo = test_database_manager()?.create_user_repository();
        user_repo.register("carol", "pw", DEFAULT_ROLE)?;

        assert_eq!(1, user_repo.update_role("carol", "analyst")?);
        assert_eq!(0, user_repo.update_role("dave", "analyst")?);
        let carol = user_repo.find_by_username("carol")?.expect("carol exists");
        assert_eq!("analyst", carol.role);

        assert_eq!(0, user_repo.delete("dave")?);
        assert_eq!(1, user_repo.delete("carol")?);
        assert_eq!(0, user_repo.count()?);
        Ok(())
    }

    #[test]
    fn test_listing_does_not_serialize_the_hash() -> Result<(), StoreError> {
        let user_repo = test_database_manager()?.create_user_repository();
        user_repo.register("erin", "pw", "user")?;
        let users = user_repo.get_all()?;

        let toml = toml::to_string(&users[0]).expect("user should serialize");
        assert!(!toml.contains("password_hash"), "hash leaked into {toml}");
        Ok(())
    }
}
