pub mod confidence;
pub mod identity_key;
pub mod market_model;
pub mod pick_status;
pub mod tier;
