//! Nakshatra placement of sidereal longitudes.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::normalize_degrees;

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

// (variant, display name) in zodiac order from 0° Mesha
const NAKSHATRA_ORDER: [(Nakshatra, &str); 27] = [
    (Nakshatra::Ashwini, "Ashwini"),
    (Nakshatra::Bharani, "Bharani"),
    (Nakshatra::Krittika, "Krittika"),
    (Nakshatra::Rohini, "Rohini"),
    (Nakshatra::Mrigashira, "Mrigashira"),
    (Nakshatra::Ardra, "Ardra"),
    (Nakshatra::Punarvasu, "Punarvasu"),
    (Nakshatra::Pushya, "Pushya"),
    (Nakshatra::Ashlesha, "Ashlesha"),
    (Nakshatra::Magha, "Magha"),
    (Nakshatra::PurvaPhalguni, "Purva Phalguni"),
    (Nakshatra::UttaraPhalguni, "Uttara Phalguni"),
    (Nakshatra::Hasta, "Hasta"),
    (Nakshatra::Chitra, "Chitra"),
    (Nakshatra::Swati, "Swati"),
    (Nakshatra::Vishakha, "Vishakha"),
    (Nakshatra::Anuradha, "Anuradha"),
    (Nakshatra::Jyeshtha, "Jyeshtha"),
    (Nakshatra::Mula, "Mula"),
    (Nakshatra::PurvaAshadha, "Purva Ashadha"),
    (Nakshatra::UttaraAshadha, "Uttara Ashadha"),
    (Nakshatra::Shravana, "Shravana"),
    (Nakshatra::Dhanishta, "Dhanishta"),
    (Nakshatra::Shatabhisha, "Shatabhisha"),
    (Nakshatra::PurvaBhadrapada, "Purva Bhadrapada"),
    (Nakshatra::UttaraBhadrapada, "Uttara Bhadrapada"),
    (Nakshatra::Revati, "Revati"),
];

impl Nakshatra {
    /// 0 for Ashwini through 26 for Revati.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        NAKSHATRA_ORDER[self.index()].1
    }

    pub fn start(&self) -> f64 {
        self.index() as f64 * NAKSHATRA_SEGMENT_SIZE
    }

    pub fn end(&self) -> f64 {
        self.start() + NAKSHATRA_SEGMENT_SIZE
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NakshatraPlacement {
    pub nakshatra: Nakshatra,
    /// 1-4
    pub pada: u8,
    /// Degrees into the nakshatra
    pub offset: f64,
    /// Fraction of the nakshatra traversed, [0, 1)
    pub progress: f64,
}

/// Return the nakshatra and pada containing the given sidereal longitude.
pub fn nakshatra_for_longitude(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let index = (lon / NAKSHATRA_SEGMENT_SIZE) as usize % NAKSHATRA_ORDER.len();
    let nakshatra = NAKSHATRA_ORDER[index].0;

    // clamp keeps float noise at a boundary inside the segment
    let offset = (lon - nakshatra.start()).clamp(0.0, NAKSHATRA_SEGMENT_SIZE - f64::EPSILON);
    let pada = ((offset / PADA_SIZE) as u8).min(3) + 1;

    NakshatraPlacement {
        nakshatra,
        pada,
        offset,
        progress: offset / NAKSHATRA_SEGMENT_SIZE,
    }
}
