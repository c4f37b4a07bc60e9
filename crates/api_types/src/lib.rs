use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// Request body for creating an account.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterUser {
        pub username: String,
        pub email_address: String,
        pub password: String,
    }

    /// A user profile as rendered to clients.
    ///
    /// `budget` is pre-formatted ("1,000$"); clients display it verbatim.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub username: String,
        pub email_address: String,
        pub budget: String,
    }
}

pub mod item {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemView {
        pub name: String,
        pub price: i64,
        pub barcode: String,
        pub description: String,
    }

    /// Response body for catalog and owned-item listings.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemsResponse {
        pub items: Vec<ItemView>,
    }
}

pub mod trade {
    use super::*;

    /// Request body for buy/sell: the item is addressed by name.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TradeRequest {
        pub item: String,
    }

    /// Outcome of an accepted trade.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TradeReceipt {
        pub item: String,
        pub price: i64,
        /// The caller's budget after the trade, pre-formatted.
        pub budget: String,
    }
}
