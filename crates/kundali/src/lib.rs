pub mod error;
pub mod math;
pub mod time;
pub mod ayanamsa;
pub mod houses;
pub mod ephemeris;
pub mod vedic;
pub mod chart;
pub mod config;

pub use ayanamsa::{AyanamsaCorrector, AyanamsaModel};
pub use chart::{Chart, ChartAssembler, Location, PlanetPosition, SiderealTime};
pub use config::ChartSettings;
pub use ephemeris::{BodyMotion, EphemerisSource, Graha, MeanElementsEphemeris};
pub use error::ChartError;
pub use houses::{HouseCalculator, HouseCusps, HouseSystem, HouseSystemKind};
pub use time::Moment;
pub use vedic::{Nakshatra, NakshatraPlacement, Rashi};

/// Cast a chart with the default settings: Lahiri ayanamsa, whole-sign
/// houses and the built-in mean-elements ephemeris.
pub fn cast_chart(moment: &Moment, location: &Location) -> Result<Chart, ChartError> {
    ChartAssembler::default().assemble(moment, location)
}
