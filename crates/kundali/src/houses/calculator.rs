use crate::error::ChartError;
use crate::math::{normalize_degrees, OBLIQUITY_J2000_DEG};

/// Latitude beyond which the ascendant is refused, in degrees.
pub const DEFAULT_POLAR_LATITUDE_LIMIT: f64 = 66.0;

/// Computes the angles of a chart from local sidereal time and latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseCalculator {
    polar_latitude_limit: f64,
    obliquity_deg: f64,
}

impl Default for HouseCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_POLAR_LATITUDE_LIMIT)
    }
}

impl HouseCalculator {
    pub fn new(polar_latitude_limit: f64) -> Self {
        Self {
            polar_latitude_limit,
            obliquity_deg: OBLIQUITY_J2000_DEG,
        }
    }

    /// Override the obliquity of the ecliptic (degrees).
    pub fn with_obliquity(self, obliquity_deg: f64) -> Self {
        Self {
            obliquity_deg,
            ..self
        }
    }

    pub fn polar_latitude_limit(&self) -> f64 {
        self.polar_latitude_limit
    }

    pub fn obliquity(&self) -> f64 {
        self.obliquity_deg
    }

    /// Ecliptic longitude rising on the eastern horizon, in degrees [0, 360).
    ///
    /// `atan2(-cos RAMC, sin RAMC·cos ε + tan φ·sin ε)` resolves to the setting
    /// intersection of ecliptic and horizon; the rising one lies opposite.
    pub fn ascendant(&self, lst_deg: f64, latitude_deg: f64) -> Result<f64, ChartError> {
        self.check_latitude(latitude_deg)?;

        let ramc = lst_deg.to_radians();
        let eps = self.obliquity_deg.to_radians();
        let phi = latitude_deg.to_radians();

        let descendant = f64::atan2(-ramc.cos(), ramc.sin() * eps.cos() + phi.tan() * eps.sin());
        Ok(normalize_degrees(descendant.to_degrees() + 180.0))
    }

    /// Ecliptic longitude culminating on the meridian, in degrees [0, 360).
    pub fn midheaven(&self, lst_deg: f64) -> f64 {
        let ramc = lst_deg.to_radians();
        let eps = self.obliquity_deg.to_radians();
        normalize_degrees(f64::atan2(ramc.sin(), ramc.cos() * eps.cos()).to_degrees())
    }

    fn check_latitude(&self, latitude_deg: f64) -> Result<(), ChartError> {
        if !latitude_deg.is_finite() || latitude_deg.abs() > self.polar_latitude_limit {
            return Err(ChartError::UnsupportedLatitude {
                latitude: latitude_deg,
                limit: self.polar_latitude_limit,
            });
        }
        Ok(())
    }
}
