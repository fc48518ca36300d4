use serde::{Deserialize, Serialize};

use crate::math::normalize_degrees;

/// The twelve house cusps in zodiac order; `cusps[0]` opens house 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps(pub [f64; 12]);

impl HouseCusps {
    /// Cusp opening a house, 1-12. `None` for any other house number.
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.0[house as usize - 1]),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// House (1-12) containing a longitude. See [`house_for_longitude`].
    pub fn house_for(&self, longitude: f64) -> u8 {
        house_for_longitude(longitude, self)
    }
}

/// House whose arc `[cusp[i], cusp[i+1])` contains `longitude`, 1-12.
///
/// Arcs that cross 0° (`cusp[i] > cusp[i+1]`) match when
/// `longitude >= cusp[i] || longitude < cusp[i+1]`. A longitude that lands in
/// no arc (a NaN longitude) falls back to house 1 and is
/// reported through `log::warn!`.
pub fn house_for_longitude(longitude: f64, cusps: &HouseCusps) -> u8 {
    let lon = normalize_degrees(longitude);

    for i in 0..12 {
        let start = cusps.0[i];
        let end = cusps.0[(i + 1) % 12];
        let inside = if start <= end {
            lon >= start && lon < end
        } else {
            lon >= start || lon < end
        };
        if inside {
            return (i + 1) as u8;
        }
    }

    log::warn!(
        "longitude {} matched no house arc in {:?}; defaulting to house 1",
        longitude,
        cusps.0
    );
    1
}
