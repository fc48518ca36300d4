//! The twelve rashis (sidereal signs) of 30° each.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::normalize_degrees;

pub const RASHI_SIZE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

impl Rashi {
    pub const ALL: [Rashi; 12] = [
        Rashi::Mesha,
        Rashi::Vrishabha,
        Rashi::Mithuna,
        Rashi::Karka,
        Rashi::Simha,
        Rashi::Kanya,
        Rashi::Tula,
        Rashi::Vrischika,
        Rashi::Dhanu,
        Rashi::Makara,
        Rashi::Kumbha,
        Rashi::Meena,
    ];

    /// Rashi containing a sidereal longitude.
    pub fn from_longitude(longitude: f64) -> Rashi {
        Self::ALL[Self::index_of(longitude)]
    }

    /// 0 for Mesha through 11 for Meena.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Longitude where this rashi begins.
    pub fn start(&self) -> f64 {
        self.index() as f64 * RASHI_SIZE
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rashi::Mesha => "Mesha",
            Rashi::Vrishabha => "Vrishabha",
            Rashi::Mithuna => "Mithuna",
            Rashi::Karka => "Karka",
            Rashi::Simha => "Simha",
            Rashi::Kanya => "Kanya",
            Rashi::Tula => "Tula",
            Rashi::Vrischika => "Vrischika",
            Rashi::Dhanu => "Dhanu",
            Rashi::Makara => "Makara",
            Rashi::Kumbha => "Kumbha",
            Rashi::Meena => "Meena",
        }
    }

    fn index_of(longitude: f64) -> usize {
        (normalize_degrees(longitude) / RASHI_SIZE) as usize % 12
    }
}

impl fmt::Display for Rashi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees elapsed within the rashi, [0, 30).
pub fn degree_in_rashi(longitude: f64) -> f64 {
    normalize_degrees(longitude) % RASHI_SIZE
}
