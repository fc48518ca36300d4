pub mod nakshatra;
pub mod rashi;

pub use nakshatra::{nakshatra_for_longitude, Nakshatra, NakshatraPlacement};
pub use rashi::{degree_in_rashi, Rashi};
