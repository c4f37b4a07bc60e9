use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Item, ResultEngine, items};

use super::{Engine, find_item, find_user, normalize_required_text, with_tx};

impl Engine {
    /// Adds a new item to the catalog.
    ///
    /// This is the seeding entry point: items enter the store unowned. Name,
    /// barcode and description must each be unique across the catalog.
    pub async fn new_item(
        &self,
        name: &str,
        price: i64,
        barcode: &str,
        description: &str,
    ) -> ResultEngine<Item> {
        let name = normalize_required_text(name, "item name")?;
        let barcode = normalize_required_text(barcode, "barcode")?;
        let description = normalize_required_text(description, "description")?;
        if price < 0 {
            return Err(EngineError::InvalidInput(
                "price must not be negative".to_string(),
            ));
        }

        let item = Item::new(name, price, barcode, description);

        with_tx!(self, |db_tx| {
            for (column, value) in [
                (items::Column::Name, &item.name),
                (items::Column::Barcode, &item.barcode),
                (items::Column::Description, &item.description),
            ] {
                let taken = items::Entity::find()
                    .filter(column.eq(value.clone()))
                    .one(&db_tx)
                    .await?
                    .is_some();
                if taken {
                    return Err(EngineError::ConstraintViolation(value.clone()));
                }
            }

            items::ActiveModel::from(&item).insert(&db_tx).await?;
            Ok(item)
        })
    }

    /// Lists the catalog: items nobody owns, ordered by name.
    pub async fn catalog(&self) -> ResultEngine<Vec<Item>> {
        let models = items::Entity::find()
            .filter(items::Column::Owner.is_null())
            .order_by_asc(items::Column::Name)
            .all(&self.database)
            .await?;

        models.into_iter().map(Item::try_from).collect()
    }

    /// Return an item by name.
    pub async fn item(&self, name: &str) -> ResultEngine<Item> {
        let model = find_item(&self.database, name).await?;
        Item::try_from(model)
    }

    /// Lists the items owned by `username`, ordered by name.
    pub async fn owned_items(&self, username: &str) -> ResultEngine<Vec<Item>> {
        let user = find_user(&self.database, username).await?;

        let models = items::Entity::find()
            .filter(items::Column::Owner.eq(user.id))
            .order_by_asc(items::Column::Name)
            .all(&self.database)
            .await?;

        models.into_iter().map(Item::try_from).collect()
    }
}
