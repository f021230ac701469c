pub mod feeds;
pub mod store;
