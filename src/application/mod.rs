pub mod generate_picks;
pub mod results;
pub mod settle_pick;
pub mod write_picks;
