use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{EngineError, Item, ResultEngine, User, items, users};

use super::{Engine, find_item, find_user, with_tx};

impl Engine {
    /// Buys `item_name` for `username`.
    ///
    /// Preconditions, checked on the rows read inside the transaction: the
    /// item is unowned and the buyer can afford the price. The ownership and
    /// budget updates commit together or not at all; a failed precondition is
    /// a declined trade ([`EngineError::PurchaseDenied`]), not a fault, and
    /// leaves state untouched.
    pub async fn purchase(&self, username: &str, item_name: &str) -> ResultEngine<Item> {
        with_tx!(self, |db_tx| {
            let user = User::try_from(find_user(&db_tx, username).await?)?;
            let mut item = Item::try_from(find_item(&db_tx, item_name).await?)?;

            if !item.is_available() {
                return Err(EngineError::PurchaseDenied(item.name));
            }
            if !user.can_afford(item.price) {
                return Err(EngineError::PurchaseDenied(item.name));
            }

            item.owner = Some(user.id);

            let item_update = items::ActiveModel {
                id: ActiveValue::Set(item.id.to_string()),
                owner: ActiveValue::Set(Some(user.id.to_string())),
                ..Default::default()
            };
            item_update.update(&db_tx).await?;

            let user_update = users::ActiveModel {
                id: ActiveValue::Set(user.id.to_string()),
                budget: ActiveValue::Set(user.budget - item.price),
                ..Default::default()
            };
            user_update.update(&db_tx).await?;

            Ok(item)
        })
    }

    /// Sells `item_name` back to the catalog for `username`.
    ///
    /// The item must appear in the seller's owned collection; a stale or
    /// foreign reference reports [`EngineError::SaleDenied`] without touching
    /// state. The release of ownership and the budget refund commit together.
    pub async fn sell(&self, username: &str, item_name: &str) -> ResultEngine<Item> {
        with_tx!(self, |db_tx| {
            let user = User::try_from(find_user(&db_tx, username).await?)?;
            let mut item = Item::try_from(find_item(&db_tx, item_name).await?)?;

            let owned = items::Entity::find()
                .filter(items::Column::Owner.eq(user.id.to_string()))
                .all(&db_tx)
                .await?;
            let item_id = item.id.to_string();
            if !owned.iter().any(|model| model.id == item_id) {
                return Err(EngineError::SaleDenied(item.name));
            }

            item.owner = None;

            let item_update = items::ActiveModel {
                id: ActiveValue::Set(item.id.to_string()),
                owner: ActiveValue::Set(None),
                ..Default::default()
            };
            item_update.update(&db_tx).await?;

            let user_update = users::ActiveModel {
                id: ActiveValue::Set(user.id.to_string()),
                budget: ActiveValue::Set(user.budget + item.price),
                ..Default::default()
            };
            user_update.update(&db_tx).await?;

            Ok(item)
        })
    }
}
