use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, User, users};

use super::{Engine, find_user, normalize_required_text, normalize_username, with_tx};

impl Engine {
    /// Registers a new user with the starting budget.
    ///
    /// Username and email uniqueness are checked inside the transaction; a
    /// clash reports [`EngineError::ConstraintViolation`] and leaves no row
    /// behind.
    pub async fn register_user(
        &self,
        username: &str,
        email_address: &str,
        plain_password: &str,
    ) -> ResultEngine<User> {
        let username = normalize_username(username)?;
        let email_address = normalize_required_text(email_address, "email address")?;
        if plain_password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        let mut user = User::new(username, email_address);
        user.set_password(plain_password)?;

        with_tx!(self, |db_tx| {
            let username_taken = users::Entity::find()
                .filter(users::Column::Username.eq(user.username.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if username_taken {
                return Err(EngineError::ConstraintViolation(user.username.clone()));
            }

            let email_taken = users::Entity::find()
                .filter(users::Column::EmailAddress.eq(user.email_address.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if email_taken {
                return Err(EngineError::ConstraintViolation(user.email_address.clone()));
            }

            users::ActiveModel::from(&user).insert(&db_tx).await?;
            Ok(user)
        })
    }

    /// Verifies credentials and returns the matching user.
    ///
    /// Unknown usernames and wrong passwords both report
    /// [`EngineError::AuthFailure`]; callers get no hint which of the two it
    /// was.
    pub async fn authenticate(&self, username: &str, plain_password: &str) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.database)
            .await?
            .ok_or(EngineError::AuthFailure)?;

        let user = User::try_from(model)?;
        if !user.verify_password(plain_password) {
            return Err(EngineError::AuthFailure);
        }

        Ok(user)
    }

    /// Return a user by username.
    pub async fn user(&self, username: &str) -> ResultEngine<User> {
        let model = find_user(&self.database, username).await?;
        User::try_from(model)
    }
}
