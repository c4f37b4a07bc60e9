//! The module contains the `User` struct and its implementation.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, password};

/// Budget granted to every newly registered user.
pub const STARTING_BUDGET: i64 = 1000;

/// A registered user.
///
/// The password is write-only: it comes in as plaintext through
/// [`User::set_password`], is stored as a salted argon2 hash, and can only be
/// checked with [`User::verify_password`], never read back.
#[derive(Clone, Debug)]
pub struct User {
    /// Stable identifier for this user.
    ///
    /// This is a UUID generated once and persisted in the database, so the
    /// user can be renamed without breaking item ownership references.
    pub id: Uuid,
    pub username: String,
    pub email_address: String,
    password_hash: String,
    pub budget: i64,
}

impl User {
    pub fn new(username: String, email_address: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email_address,
            password_hash: String::new(),
            budget: STARTING_BUDGET,
        }
    }

    /// Hashes `plain_text` and stores the hash.
    pub fn set_password(&mut self, plain_text: &str) -> ResultEngine<()> {
        self.password_hash = password::hash(plain_text)?;
        Ok(())
    }

    /// Checks `attempted` against the stored hash.
    pub fn verify_password(&self, attempted: &str) -> bool {
        password::verify(&self.password_hash, attempted)
    }

    /// Returns `true` when the budget covers `price`.
    pub fn can_afford(&self, price: i64) -> bool {
        self.budget >= price
    }

    /// Budget rendered for display: thousands separator plus a trailing `$`.
    ///
    /// `1000` renders as `"1,000$"`, `500` as `"500$"`.
    pub fn pretty_budget(&self) -> String {
        let digits = self.budget.to_string();
        if digits.len() >= 4 {
            let (head, tail) = digits.split_at(digits.len() - 3);
            format!("{head},{tail}$")
        } else {
            format!("{digits}$")
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub email_address: String,
    pub password_hash: String,
    pub budget: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::items::Entity")]
    Items,
}

impl Related<super::items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(value: &User) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            username: ActiveValue::Set(value.username.clone()),
            email_address: ActiveValue::Set(value.email_address.clone()),
            password_hash: ActiveValue::Set(value.password_hash.clone()),
            budget: ActiveValue::Set(value.budget),
        }
    }
}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidInput("invalid user id".to_string()))?;

        Ok(User {
            id,
            username: model.username,
            email_address: model.email_address,
            password_hash: model.password_hash,
            budget: model.budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(String::from("alice"), String::from("alice@example.com"))
    }

    #[test]
    fn new_user_gets_the_starting_budget() {
        let user = user();
        assert_eq!(user.budget, STARTING_BUDGET);
    }

    #[test]
    fn pretty_budget_separates_thousands() {
        let mut user = user();
        assert_eq!(user.pretty_budget(), "1,000$");

        user.budget = 500;
        assert_eq!(user.pretty_budget(), "500$");

        user.budget = 10000;
        assert_eq!(user.pretty_budget(), "10,000$");

        user.budget = 0;
        assert_eq!(user.pretty_budget(), "0$");
    }

    #[test]
    fn can_afford_compares_against_price() {
        let user = user();
        assert!(user.can_afford(1000));
        assert!(!user.can_afford(1001));
    }

    #[test]
    fn password_round_trip() {
        let mut user = user();
        user.set_password("s3cret").unwrap();

        assert!(user.verify_password("s3cret"));
        assert!(!user.verify_password("wrong"));
    }
}
