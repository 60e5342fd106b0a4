pub mod core;
pub mod handlers;
pub mod store;
