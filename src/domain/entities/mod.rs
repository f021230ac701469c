pub mod day_document;
pub mod fixture;
pub mod pick;
