//! Low-precision lunar ephemeris
//!
//! Builds the Moon's orbital elements from a day number counted from 2000 January 0.0
//! and chains the orbit stages down to right ascension and declination.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::ephemeris::orbit::{
    eccentric_anomaly, ecliptic_coordinates, orbital_plane_coordinates, polar_from_xy, ra_dec,
};
use crate::models::{EquatorialPosition, OrbitalElements};

// Lunar element model: value at day 0 and daily rate (degrees unless noted)
const LONG_ASC_NODE_BASE: f64 = 125.1228;
const LONG_ASC_NODE_RATE: f64 = -0.052_953_808_3;
const INCLINATION: f64 = 5.1454;
const ARG_PERIGEE_BASE: f64 = 318.0634;
const ARG_PERIGEE_RATE: f64 = 0.164_357_322_3;
const MEAN_DISTANCE: f64 = 60.2666; // Earth radii
const ECCENTRICITY: f64 = 0.054_900;
const MEAN_ANOMALY_BASE: f64 = 115.3654;
const MEAN_ANOMALY_RATE: f64 = 13.064_992_950_9;

/// Day number of a calendar date relative to 2000 January 0.0.
///
/// All divisions are integer divisions; 2000-01-01 maps to 1.
pub fn epoch_offset(date: NaiveDate) -> f64 {
    let y = i64::from(date.year());
    let m = i64::from(date.month());
    let d = i64::from(date.day());

    let days = 367 * y - 7 * (y + (m + 9) / 12) / 4 + 275 * m / 9 + d - 730_530;
    days as f64
}

/// Reduce an angle in degrees to [0, 360).
///
/// Equivalent to `angle - floor(angle / 360) * 360`, computed with an exact remainder so
/// large magnitudes stay in range.
pub fn minimize_degrees(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Orbital elements of the Moon `days` after the reference epoch
pub fn orbital_elements(days: f64) -> OrbitalElements {
    OrbitalElements {
        long_asc_node: minimize_degrees(LONG_ASC_NODE_BASE + LONG_ASC_NODE_RATE * days),
        inclination: minimize_degrees(INCLINATION),
        arg_perigee: minimize_degrees(ARG_PERIGEE_BASE + ARG_PERIGEE_RATE * days),
        mean_distance: MEAN_DISTANCE,
        eccentricity: ECCENTRICITY,
        mean_anomaly: minimize_degrees(MEAN_ANOMALY_BASE + MEAN_ANOMALY_RATE * days),
    }
}

/// Right ascension and declination of the Moon for a day number.
///
/// Degrees stop at the elements; every stage after that works in radians.
pub fn position_at(days: f64) -> EquatorialPosition {
    let elements = orbital_elements(days);

    let e = elements.eccentricity;
    let ecc_anomaly = eccentric_anomaly(elements.mean_anomaly_rad(), e);
    let plane = orbital_plane_coordinates(ecc_anomaly, e, elements.mean_distance);
    let polar = polar_from_xy(plane.x, plane.y);
    let ecliptic = ecliptic_coordinates(
        polar.distance,
        polar.true_anomaly,
        elements.arg_perigee_rad(),
        elements.long_asc_node_rad(),
        elements.inclination_rad(),
    );

    ra_dec(ecliptic.x, ecliptic.y, ecliptic.z)
}

/// Position of the Moon on the UTC calendar date of `now`
pub fn compute_position(now: DateTime<Utc>) -> EquatorialPosition {
    position_at(epoch_offset(now.date_naive()))
}
