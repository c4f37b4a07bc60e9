//! The module contains the `Item` struct and its implementation.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// A catalog item.
///
/// An item is either unowned (`owner` is `None`, sitting in the catalog) or
/// owned by exactly one user. Ownership is recorded here and nowhere else.
#[derive(Clone, Debug)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub barcode: String,
    pub description: String,
    pub owner: Option<Uuid>,
}

impl Item {
    pub fn new(name: String, price: i64, barcode: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            price,
            barcode,
            description,
            owner: None,
        }
    }

    /// Returns `true` when the item sits in the catalog, available to buy.
    pub fn is_available(&self) -> bool {
        self.owner.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub price: i64,
    pub barcode: String,
    pub description: String,
    pub owner: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Owner",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Item> for ActiveModel {
    fn from(value: &Item) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            price: ActiveValue::Set(value.price),
            barcode: ActiveValue::Set(value.barcode.clone()),
            description: ActiveValue::Set(value.description.clone()),
            owner: ActiveValue::Set(value.owner.map(|id| id.to_string())),
        }
    }
}

impl TryFrom<Model> for Item {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidInput("invalid item id".to_string()))?;
        let owner = match model.owner {
            Some(owner) => Some(
                Uuid::parse_str(&owner)
                    .map_err(|_| EngineError::InvalidInput("invalid owner id".to_string()))?,
            ),
            None => None,
        };

        Ok(Item {
            id,
            name: model.name,
            price: model.price,
            barcode: model.barcode,
            description: model.description,
            owner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_unowned() {
        let item = Item::new(
            String::from("Phone"),
            500,
            String::from("893212299897"),
            String::from("A shiny phone"),
        );

        assert!(item.is_available());
        assert_eq!(item.price, 500);
    }

    #[test]
    fn owned_item_is_not_available() {
        let mut item = Item::new(
            String::from("Phone"),
            500,
            String::from("893212299897"),
            String::from("A shiny phone"),
        );
        item.owner = Some(Uuid::new_v4());

        assert!(!item.is_available());
    }
}
