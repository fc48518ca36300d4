//! Angle helpers shared by every stage of the chart pipeline.

/// Mean obliquity of the ecliptic at J2000.0, in degrees.
pub const OBLIQUITY_J2000_DEG: f64 = 23.4392911;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Signed shortest arc from `from` to `to`, in (-180, 180].
pub fn signed_arc(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Forward arc from `from` to `to` measured in the direction of the zodiac, in [0, 360).
pub fn forward_arc(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

/// Accumulated general precession in longitude since J2000.0, in degrees.
///
/// IAU 2006: 5028.796195″·T + 1.1054348″·T², `t` in Julian centuries.
pub fn general_precession_deg(t: f64) -> f64 {
    (5028.796195 * t + 1.1054348 * t * t) / 3600.0
}

#[inline]
pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

#[inline]
pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}
