//! Low-order planetary theory.
//!
//! - Mercury to Saturn: Keplerian mean elements and rates (Standish,
//!   "Approximate Positions of the Planets", table 1, valid 1800-2050),
//!   heliocentric positions differenced against the Earth-Moon barycenter,
//!   then precessed from J2000 to the equinox of date.
//! - Moon: mean arguments plus the leading periodic terms of Meeus ch. 47.
//! - Rahu: mean ascending node (Meeus 47.7). Ketu is its exact antipode.
//!
//! Typical error is 0.01° for the Sun, well under 0.5° for the Moon and
//! planets within the validity span. Not an observatory-grade ephemeris.

use std::collections::BTreeMap;

use crate::ephemeris::{EphemerisSource, Graha};
use crate::error::ChartError;
use crate::math::{general_precession_deg, normalize_degrees, sin_deg};
use crate::time::julian_centuries;

/// Mean orbital elements at J2000.0 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    /// Semi-major axis (AU)
    a: [f64; 2],
    /// Eccentricity
    e: [f64; 2],
    /// Inclination (deg)
    i: [f64; 2],
    /// Mean longitude (deg)
    l: [f64; 2],
    /// Longitude of perihelion (deg)
    peri: [f64; 2],
    /// Longitude of the ascending node (deg)
    node: [f64; 2],
}

#[rustfmt::skip]
const MERCURY: OrbitalElements = OrbitalElements {
    a: [0.38709927, 0.00000037], e: [0.20563593, 0.00001906], i: [7.00497902, -0.00594749],
    l: [252.25032350, 149472.67411175], peri: [77.45779628, 0.16047689], node: [48.33076593, -0.12534081],
};
#[rustfmt::skip]
const VENUS: OrbitalElements = OrbitalElements {
    a: [0.72333566, 0.00000390], e: [0.00677672, -0.00004107], i: [3.39467605, -0.00078890],
    l: [181.97909950, 58517.81538729], peri: [131.60246718, 0.00268329], node: [76.67984255, -0.27769418],
};
#[rustfmt::skip]
const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    a: [1.00000261, 0.00000562], e: [0.01671123, -0.00004392], i: [-0.00001531, -0.01294668],
    l: [100.46457166, 35999.37244981], peri: [102.93768193, 0.32327364], node: [0.0, 0.0],
};
#[rustfmt::skip]
const MARS: OrbitalElements = OrbitalElements {
    a: [1.52371034, 0.00001847], e: [0.09339410, 0.00007882], i: [1.84969142, -0.00813131],
    l: [-4.55343205, 19140.30268499], peri: [-23.94362959, 0.44441088], node: [49.55953891, -0.29257343],
};
#[rustfmt::skip]
const JUPITER: OrbitalElements = OrbitalElements {
    a: [5.20288700, -0.00011607], e: [0.04838624, -0.00013253], i: [1.30439695, -0.00183714],
    l: [34.39644051, 3034.74612775], peri: [14.72847983, 0.21252668], node: [100.47390909, 0.20469106],
};
#[rustfmt::skip]
const SATURN: OrbitalElements = OrbitalElements {
    a: [9.53667594, -0.00125060], e: [0.05386179, -0.00050991], i: [2.48599187, 0.00193609],
    l: [49.95424423, 1213.29864829], peri: [92.59887831, -0.41897216], node: [113.66242448, -0.28867794],
};

/// Leading periodic terms in the Moon's longitude: [D, M, M', F, amplitude°].
#[rustfmt::skip]
const MOON_LONGITUDE_TERMS: [[f64; 5]; 13] = [
    [0.0,  0.0,  1.0,  0.0,  6.288774],
    [2.0,  0.0, -1.0,  0.0,  1.274027],
    [2.0,  0.0,  0.0,  0.0,  0.658314],
    [0.0,  0.0,  2.0,  0.0,  0.213618],
    [0.0,  1.0,  0.0,  0.0, -0.185116],
    [0.0,  0.0,  0.0,  2.0, -0.114332],
    [2.0,  0.0, -2.0,  0.0,  0.058793],
    [2.0, -1.0, -1.0,  0.0,  0.057066],
    [2.0,  0.0,  1.0,  0.0,  0.053322],
    [2.0, -1.0,  0.0,  0.0,  0.045758],
    [0.0,  1.0, -1.0,  0.0, -0.040923],
    [1.0,  0.0,  0.0,  0.0, -0.034720],
    [0.0,  1.0,  1.0,  0.0, -0.030383],
];

const KEPLER_TOLERANCE_RAD: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 30;

/// Built-in ephemeris from mean orbital elements and truncated lunar theory.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElementsEphemeris;

impl MeanElementsEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Geocentric longitude of the Sun (equinox of date).
    pub fn sun_longitude(&self, julian_day: f64) -> f64 {
        let t = julian_centuries(julian_day);
        let earth = heliocentric_position(&EARTH_MOON_BARYCENTER, t);
        let lon_j2000 = f64::atan2(-earth[1], -earth[0]).to_degrees();
        normalize_degrees(lon_j2000 + general_precession_deg(t))
    }

    /// Geocentric longitude of the Moon (equinox of date).
    pub fn moon_longitude(&self, julian_day: f64) -> f64 {
        let t = julian_centuries(julian_day);
        let t2 = t * t;
        let mean_longitude = 218.3164477 + 481_267.881_234_21 * t - 0.0015786 * t2;
        let elongation = 297.8501921 + 445_267.111_403_4 * t - 0.0018819 * t2;
        let sun_anomaly = 357.5291092 + 35_999.050_290_9 * t - 0.0001536 * t2;
        let moon_anomaly = 134.9633964 + 477_198.867_505_5 * t + 0.0087414 * t2;
        let latitude_argument = 93.2720950 + 483_202.017_523_3 * t - 0.0036539 * t2;

        let correction: f64 = MOON_LONGITUDE_TERMS
            .iter()
            .map(|[d, m, mp, f, amplitude]| {
                let arg = d * elongation + m * sun_anomaly + mp * moon_anomaly + f * latitude_argument;
                amplitude * sin_deg(arg)
            })
            .sum();

        normalize_degrees(mean_longitude + correction)
    }

    /// Mean longitude of the Moon's ascending node (Rahu), equinox of date.
    pub fn mean_node_longitude(&self, julian_day: f64) -> f64 {
        let t = julian_centuries(julian_day);
        normalize_degrees(
            125.0445479 - 1934.136_289_1 * t + 0.0020754 * t * t + t * t * t / 467_441.0,
        )
    }

    /// Geocentric longitude of a planet from its mean elements (equinox of date).
    fn planet_longitude(&self, elements: &OrbitalElements, julian_day: f64) -> f64 {
        let t = julian_centuries(julian_day);
        let planet = heliocentric_position(elements, t);
        let earth = heliocentric_position(&EARTH_MOON_BARYCENTER, t);
        let lon_j2000 = f64::atan2(planet[1] - earth[1], planet[0] - earth[0]).to_degrees();
        normalize_degrees(lon_j2000 + general_precession_deg(t))
    }
}

impl EphemerisSource for MeanElementsEphemeris {
    fn name(&self) -> &str {
        "mean_elements"
    }

    fn positions_at(&self, julian_day: f64) -> Result<BTreeMap<Graha, f64>, ChartError> {
        let rahu = self.mean_node_longitude(julian_day);
        let mut positions = BTreeMap::new();
        positions.insert(Graha::Sun, self.sun_longitude(julian_day));
        positions.insert(Graha::Moon, self.moon_longitude(julian_day));
        positions.insert(Graha::Mars, self.planet_longitude(&MARS, julian_day));
        positions.insert(Graha::Mercury, self.planet_longitude(&MERCURY, julian_day));
        positions.insert(Graha::Jupiter, self.planet_longitude(&JUPITER, julian_day));
        positions.insert(Graha::Venus, self.planet_longitude(&VENUS, julian_day));
        positions.insert(Graha::Saturn, self.planet_longitude(&SATURN, julian_day));
        positions.insert(Graha::Rahu, rahu);
        positions.insert(Graha::Ketu, normalize_degrees(rahu + 180.0));
        Ok(positions)
    }
}

/// Heliocentric ecliptic coordinates (J2000 frame, AU) at `t` centuries.
fn heliocentric_position(elements: &OrbitalElements, t: f64) -> [f64; 3] {
    let at = |pair: [f64; 2]| pair[0] + pair[1] * t;

    let a = at(elements.a);
    let e = at(elements.e);
    let inclination = at(elements.i).to_radians();
    let mean_longitude = at(elements.l);
    let perihelion = at(elements.peri);
    let node = at(elements.node);

    let arg_perihelion = (perihelion - node).to_radians();
    let mean_anomaly = (normalize_degrees(mean_longitude - perihelion + 180.0) - 180.0).to_radians();
    let ecc_anomaly = solve_kepler(mean_anomaly, e);

    let x_orb = a * (ecc_anomaly.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sin_w, cos_w) = arg_perihelion.sin_cos();
    let (sin_n, cos_n) = node.to_radians().sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    [
        (cos_w * cos_n - sin_w * sin_n * cos_i) * x_orb + (-sin_w * cos_n - cos_w * sin_n * cos_i) * y_orb,
        (cos_w * sin_n + sin_w * cos_n * cos_i) * x_orb + (-sin_w * sin_n + cos_w * cos_n * cos_i) * y_orb,
        (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
    ]
}

/// Solve Kepler's equation `M = E - e·sin E` for E (radians) by Newton iteration.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (mean_anomaly - (ecc - e * ecc.sin())) / (1.0 - e * ecc.cos());
        ecc += delta;
        if delta.abs() < KEPLER_TOLERANCE_RAD {
            break;
        }
    }
    ecc
}
