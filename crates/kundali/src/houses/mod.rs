pub mod calculator;
pub mod cusps;
pub mod systems;

pub use calculator::{HouseCalculator, DEFAULT_POLAR_LATITUDE_LIMIT};
pub use cusps::{house_for_longitude, HouseCusps};
pub use systems::{
    houses_from_ascendant, HouseFrame, HouseSystem, HouseSystemKind, SignAlignedHouses,
    WholeSignHouses,
};
