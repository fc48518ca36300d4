use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ayanamsa::AyanamsaModel;
use crate::ephemeris::Graha;
use crate::error::ChartError;
use crate::houses::{HouseCusps, HouseSystemKind};
use crate::time::Moment;
use crate::vedic::{NakshatraPlacement, Rashi};

/// Geographic location coordinates, decimal degrees (north and east positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ChartError> {
        let location = Self {
            latitude,
            longitude,
        };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        check_range("latitude", self.latitude, 90.0)?;
        check_range("longitude", self.longitude, 180.0)
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<(), ChartError> {
    if !value.is_finite() || value.abs() > limit {
        return Err(ChartError::InvalidLocation {
            field,
            value,
            min: -limit,
            max: limit,
        });
    }
    Ok(())
}

/// Sidereal time at the moment of the chart, degrees [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealTime {
    /// Greenwich mean sidereal time
    pub gmst: f64,
    /// Local sidereal time (RAMC)
    pub lst: f64,
}

/// Placement of one graha in the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub graha: Graha,
    /// Sidereal longitude in degrees [0, 360)
    pub longitude: f64,
    /// Tropical longitude in degrees [0, 360)
    pub tropical_longitude: f64,
    /// Degrees per day
    pub speed: f64,
    pub retrograde: bool,
    /// 1-12
    pub house: u8,
    pub rashi: Rashi,
    pub degree_in_rashi: f64,
    pub nakshatra: NakshatraPlacement,
}

/// A cast chart. Built once by [`crate::chart::ChartAssembler`] and then only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub moment: Moment,
    pub location: Location,
    pub julian_day: f64,
    /// Degrees subtracted from tropical longitudes
    pub ayanamsa: f64,
    pub ayanamsa_model: AyanamsaModel,
    pub house_system: HouseSystemKind,
    pub sidereal_time: SiderealTime,
    pub tropical_ascendant: f64,
    /// Sidereal ascendant (lagna)
    pub ascendant: f64,
    /// Sidereal midheaven
    pub midheaven: f64,
    pub houses: HouseCusps,
    pub planets: BTreeMap<Graha, PlanetPosition>,
}

impl Chart {
    pub fn planet(&self, graha: Graha) -> Option<&PlanetPosition> {
        self.planets.get(&graha)
    }

    pub fn ascendant_rashi(&self) -> Rashi {
        Rashi::from_longitude(self.ascendant)
    }

    /// Grahas occupying a house, in traditional order.
    pub fn occupants(&self, house: u8) -> impl Iterator<Item = &PlanetPosition> {
        self.planets.values().filter(move |p| p.house == house)
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
