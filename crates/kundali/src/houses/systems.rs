//! House systems as interchangeable policies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ChartError;
use crate::houses::cusps::HouseCusps;
use crate::math::normalize_degrees;

/// Angles available to a house system when dividing the chart.
///
/// `ascendant` and `midheaven` are in the chart's zodiac (sidereal for a
/// Vedic chart); `lst`, `latitude` and `obliquity` are given for systems
/// that divide time or space rather than the ecliptic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseFrame {
    pub ascendant: f64,
    pub midheaven: f64,
    pub lst: f64,
    pub latitude: f64,
    pub obliquity: f64,
}

/// A rule for dividing the ecliptic into twelve houses.
pub trait HouseSystem: fmt::Debug + Send + Sync {
    fn kind(&self) -> HouseSystemKind;

    fn cusps(&self, frame: &HouseFrame) -> HouseCusps;
}

/// Twelve 30° houses starting at the ascendant degree.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeSignHouses;

impl HouseSystem for WholeSignHouses {
    fn kind(&self) -> HouseSystemKind {
        HouseSystemKind::WholeSign
    }

    fn cusps(&self, frame: &HouseFrame) -> HouseCusps {
        houses_from_ascendant(frame.ascendant)
    }
}

/// House 1 opens at the ascendant degree; houses 2-12 open on the
/// following sign boundaries. House 12 therefore also holds the part of the
/// ascendant's sign that has already risen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignAlignedHouses;

impl HouseSystem for SignAlignedHouses {
    fn kind(&self) -> HouseSystemKind {
        HouseSystemKind::SignAligned
    }

    fn cusps(&self, frame: &HouseFrame) -> HouseCusps {
        let ascendant = normalize_degrees(frame.ascendant);
        let sign_start = (ascendant / 30.0).floor() * 30.0;
        let mut cusps = [ascendant; 12];
        for (i, cusp) in cusps.iter_mut().enumerate().skip(1) {
            *cusp = normalize_degrees(sign_start + 30.0 * i as f64);
        }
        HouseCusps(cusps)
    }
}

/// Whole-sign cusps: `cusp[i] = normalize(ascendant + 30·i)`.
pub fn houses_from_ascendant(ascendant: f64) -> HouseCusps {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(ascendant + 30.0 * i as f64);
    }
    HouseCusps(cusps)
}

const HOUSE_SYSTEMS: &[(&str, HouseSystemKind)] = &[
    ("whole_sign", HouseSystemKind::WholeSign),
    ("sign_aligned", HouseSystemKind::SignAligned),
    ("rasi", HouseSystemKind::SignAligned),
];

/// Configurable name of a house system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystemKind {
    #[default]
    WholeSign,
    SignAligned,
}

impl HouseSystemKind {
    pub const ALL: [HouseSystemKind; 2] = [HouseSystemKind::WholeSign, HouseSystemKind::SignAligned];

    pub fn name(&self) -> &'static str {
        match self {
            HouseSystemKind::WholeSign => "whole_sign",
            HouseSystemKind::SignAligned => "sign_aligned",
        }
    }

    /// The policy implementing this house system.
    pub fn strategy(&self) -> Arc<dyn HouseSystem> {
        match self {
            HouseSystemKind::WholeSign => Arc::new(WholeSignHouses),
            HouseSystemKind::SignAligned => Arc::new(SignAlignedHouses),
        }
    }
}

impl fmt::Display for HouseSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystemKind {
    type Err = ChartError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = name.trim().to_lowercase().replace(['-', ' '], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(alias, _)| *alias == wanted)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ChartError::InvalidHouseSystem {
                system: name.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(alias, _)| alias.to_string()).collect(),
            })
    }
}
