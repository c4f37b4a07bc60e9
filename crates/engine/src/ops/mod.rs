use sea_orm::{ConnectionTrait, DatabaseConnection, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine};

mod catalog;
mod trades;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Closes the underlying database connection.
    pub async fn close(self) -> ResultEngine<()> {
        self.database.close().await?;
        Ok(())
    }
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_username(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if !(3..=29).contains(&trimmed.chars().count()) {
        return Err(EngineError::InvalidInput(
            "username must be between 3 and 29 characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

pub(super) async fn find_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> ResultEngine<crate::users::Model> {
    crate::users::Entity::find()
        .filter(crate::users::Column::Username.eq(username))
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound(username.to_string()))
}

pub(super) async fn find_item<C: ConnectionTrait>(
    db: &C,
    item_name: &str,
) -> ResultEngine<crate::items::Model> {
    crate::items::Entity::find()
        .filter(crate::items::Column::Name.eq(item_name))
        .one(db)
        .await?
        .ok_or_else(|| EngineError::NotFound(item_name.to_string()))
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
