pub use error::EngineError;
pub use items::Item;
pub use ops::{Engine, EngineBuilder};
pub use users::{STARTING_BUDGET, User};

mod error;
mod items;
mod ops;
pub mod password;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
