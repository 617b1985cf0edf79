pub mod catalog;
pub mod delivery;
pub mod error;
pub mod handlers;
pub mod models;
pub mod orders;
pub mod rpc;
