pub mod category;
pub mod config;
pub mod history;
pub mod item;
