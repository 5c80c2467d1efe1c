//! Local-first kitchen store: recipes, meal plans, inventory and a shopping
//! list, each persisted as one snapshot in a string key-value backend.

pub mod backend;
pub mod category;
pub mod error;
pub mod factory;
pub mod inventory;
pub mod planner;
pub mod sample;
pub mod search;
pub mod shopping;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::KitchenStore;
