pub mod category;
pub mod history;
pub mod inventory;
pub mod item;
pub mod types;
