//! Planetary longitudes behind a replaceable source.
//!
//! The chart pipeline only sees [`EphemerisSource`]. The built-in
//! [`MeanElementsEphemeris`] is a low-order series good to a fraction of a
//! degree; a precision ephemeris can implement the same trait.

pub mod mean_elements;

pub use mean_elements::MeanElementsEphemeris;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ChartError;
use crate::math::signed_arc;

/// Half-width of the central difference used for daily motion, in days.
const SPEED_STEP_DAYS: f64 = 0.5;

/// The nine bodies of a Vedic chart, in traditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    /// Mean ascending lunar node
    Rahu,
    /// Descending lunar node, always opposite Rahu
    Ketu,
}

impl Graha {
    pub const ALL: [Graha; 9] = [
        Graha::Sun,
        Graha::Moon,
        Graha::Mars,
        Graha::Mercury,
        Graha::Jupiter,
        Graha::Venus,
        Graha::Saturn,
        Graha::Rahu,
        Graha::Ketu,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Graha::Sun => "sun",
            Graha::Moon => "moon",
            Graha::Mars => "mars",
            Graha::Mercury => "mercury",
            Graha::Jupiter => "jupiter",
            Graha::Venus => "venus",
            Graha::Saturn => "saturn",
            Graha::Rahu => "rahu",
            Graha::Ketu => "ketu",
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Graha::Rahu | Graha::Ketu)
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Longitude and daily motion of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMotion {
    /// Degrees [0, 360)
    pub longitude: f64,
    /// Degrees per day; negative while retrograde
    pub speed: f64,
}

impl BodyMotion {
    pub fn retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// Supplies tropical ecliptic longitudes (equinox of date) for the nine grahas.
pub trait EphemerisSource: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Tropical longitude of every graha, in degrees [0, 360).
    fn positions_at(&self, julian_day: f64) -> Result<BTreeMap<Graha, f64>, ChartError>;

    /// Longitudes plus daily motion from a central difference around `julian_day`.
    fn motions_at(&self, julian_day: f64) -> Result<BTreeMap<Graha, BodyMotion>, ChartError> {
        let now = self.positions_at(julian_day)?;
        let before = self.positions_at(julian_day - SPEED_STEP_DAYS)?;
        let after = self.positions_at(julian_day + SPEED_STEP_DAYS)?;

        now.into_iter()
            .map(|(graha, longitude)| {
                let (Some(b), Some(a)) = (before.get(&graha), after.get(&graha)) else {
                    return Err(ChartError::EphemerisUnavailable {
                        ephemeris: self.name().to_string(),
                        julian_day,
                        message: format!("no {graha} position around this date"),
                    });
                };
                let speed = signed_arc(*b, *a) / (2.0 * SPEED_STEP_DAYS);
                Ok((graha, BodyMotion { longitude, speed }))
            })
            .collect()
    }
}
