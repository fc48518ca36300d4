use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ayanamsa::AyanamsaCorrector;
use crate::chart::types::{Chart, Location, PlanetPosition, SiderealTime};
use crate::config::ChartSettings;
use crate::ephemeris::{EphemerisSource, Graha, MeanElementsEphemeris};
use crate::error::ChartError;
use crate::houses::{house_for_longitude, HouseCalculator, HouseFrame, HouseSystem, WholeSignHouses};
use crate::math::normalize_degrees;
use crate::time::{julian_day_to_gmst, local_sidereal_time, to_julian_day, Moment};
use crate::vedic::{degree_in_rashi, nakshatra_for_longitude, Rashi};

/// Runs the chart pipeline: Julian Day, sidereal time, ascendant, houses,
/// planetary positions, sidereal correction and house placement.
///
/// Holds no mutable state; one assembler can serve any number of threads.
#[derive(Debug, Clone)]
pub struct ChartAssembler {
    corrector: AyanamsaCorrector,
    calculator: HouseCalculator,
    house_system: Arc<dyn HouseSystem>,
    ephemeris: Arc<dyn EphemerisSource>,
}

impl Default for ChartAssembler {
    fn default() -> Self {
        Self::new(
            AyanamsaCorrector::default(),
            HouseCalculator::default(),
            Arc::new(WholeSignHouses),
            Arc::new(MeanElementsEphemeris),
        )
    }
}

impl ChartAssembler {
    pub fn new(
        corrector: AyanamsaCorrector,
        calculator: HouseCalculator,
        house_system: Arc<dyn HouseSystem>,
        ephemeris: Arc<dyn EphemerisSource>,
    ) -> Self {
        Self {
            corrector,
            calculator,
            house_system,
            ephemeris,
        }
    }

    /// Build an assembler with the built-in ephemeris from settings.
    pub fn from_settings(settings: &ChartSettings) -> Self {
        Self::new(
            AyanamsaCorrector::new(settings.ayanamsa),
            HouseCalculator::new(settings.polar_latitude_limit),
            settings.house_system.strategy(),
            Arc::new(MeanElementsEphemeris),
        )
    }

    /// Swap the planetary source, leaving every other stage untouched.
    pub fn with_ephemeris(self, ephemeris: Arc<dyn EphemerisSource>) -> Self {
        Self { ephemeris, ..self }
    }

    pub fn with_house_system(self, house_system: Arc<dyn HouseSystem>) -> Self {
        Self {
            house_system,
            ..self
        }
    }

    pub fn corrector(&self) -> &AyanamsaCorrector {
        &self.corrector
    }

    pub fn calculator(&self) -> &HouseCalculator {
        &self.calculator
    }

    /// Cast a chart. Any failing stage aborts the whole chart with its own error.
    pub fn assemble(&self, moment: &Moment, location: &Location) -> Result<Chart, ChartError> {
        location.validate()?;
        let julian_day = to_julian_day(moment)?;

        let ayanamsa = self.corrector.ayanamsa_for(julian_day);
        let gmst = julian_day_to_gmst(julian_day);
        let lst = local_sidereal_time(gmst, location.longitude);

        let tropical_ascendant = self.calculator.ascendant(lst, location.latitude)?;
        let ascendant = normalize_degrees(tropical_ascendant - ayanamsa);
        let midheaven = normalize_degrees(self.calculator.midheaven(lst) - ayanamsa);

        let houses = self.house_system.cusps(&HouseFrame {
            ascendant,
            midheaven,
            lst,
            latitude: location.latitude,
            obliquity: self.calculator.obliquity(),
        });

        log::debug!(
            "JD {:.6}: ayanamsa {:.4}, GMST {:.4}, LST {:.4}, lagna {:.4} ({})",
            julian_day,
            ayanamsa,
            gmst,
            lst,
            ascendant,
            self.house_system.kind()
        );

        let motions = self.ephemeris.motions_at(julian_day)?;
        let mut planets = BTreeMap::new();
        for graha in Graha::ALL {
            let motion = motions.get(&graha).ok_or_else(|| ChartError::EphemerisUnavailable {
                ephemeris: self.ephemeris.name().to_string(),
                julian_day,
                message: format!("no position for {graha}"),
            })?;

            let longitude = match graha {
                // derived from sidereal Rahu so the pair stays exactly opposite
                Graha::Ketu => match planets.get(&Graha::Rahu) {
                    Some(PlanetPosition { longitude: rahu, .. }) => normalize_degrees(rahu + 180.0),
                    None => normalize_degrees(motion.longitude - ayanamsa),
                },
                _ => normalize_degrees(motion.longitude - ayanamsa),
            };

            planets.insert(
                graha,
                PlanetPosition {
                    graha,
                    longitude,
                    tropical_longitude: motion.longitude,
                    speed: motion.speed,
                    retrograde: motion.retrograde(),
                    house: house_for_longitude(longitude, &houses),
                    rashi: Rashi::from_longitude(longitude),
                    degree_in_rashi: degree_in_rashi(longitude),
                    nakshatra: nakshatra_for_longitude(longitude),
                },
            );
        }

        Ok(Chart {
            moment: *moment,
            location: *location,
            julian_day,
            ayanamsa,
            ayanamsa_model: self.corrector.model(),
            house_system: self.house_system.kind(),
            sidereal_time: SiderealTime { gmst, lst },
            tropical_ascendant,
            ascendant,
            midheaven,
            houses,
            planets,
        })
    }
}
