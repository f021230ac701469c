pub mod document_store;
pub mod fixture_feed;
