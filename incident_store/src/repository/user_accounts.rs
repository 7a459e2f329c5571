use crate::error::StoreError;
use crate::types::User;

/// User specific operations on top of the plain record repository
pub trait UserAccounts {
    ///
    /// Registers a new user, storing only a salted Argon2 hash of `plaintext_password`.
    ///
    /// The hash is a PHC string which carries its own salt and parameters, so nothing
    /// else needs to be stored to verify it later.
    ///
    /// # Errors
    /// * `StoreError::ConstraintViolation` if `username` is taken.
    /// * `StoreError::PasswordHash` if hashing fails.
    fn register(
        &self,
        username: &str,
        plaintext_password: &str,
        role: &str,
    ) -> Result<i64, StoreError>;

    /// # Errors
    /// Returns a `StoreError` if the query fails
    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Returns the number of users updated, `0` if `username` is unknown
    ///
    /// # Errors
    /// Returns a `StoreError` if the statement fails
    fn update_role(&self, username: &str, new_role: &str) -> Result<usize, StoreError>;

    /// `false` for unknown users as well as for wrong passwords.
    ///
    /// # Errors
    /// Returns a `StoreError` if the stored hash can not be parsed or the query fails
    fn verify_password(&self, username: &str, plaintext_password: &str)
        -> Result<bool, StoreError>;
}
