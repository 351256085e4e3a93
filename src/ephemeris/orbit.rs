//! Two-body orbit stages, orbital plane to equatorial angles
//!
//! Every angle taken or returned here is in radians.

use crate::models::{EclipticPosition, EquatorialPosition, OrbitalPlane, PolarPosition};

/// Convergence threshold for Kepler's equation, in degrees
pub const KEPLER_TOLERANCE_DEG: f64 = 0.005;

/// Upper bound on Newton steps when solving Kepler's equation
pub const MAX_KEPLER_ITERATIONS: usize = 16;

/// Solve Kepler's equation `E - e*sin(E) = M` for the eccentric anomaly.
///
/// Returns `E` in radians.
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    solve_kepler(mean_anomaly, eccentricity).0
}

/// Newton refinement from the second-order series guess.
/// Returns the eccentric anomaly and the number of Newton steps taken.
fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> (f64, usize) {
    let m = mean_anomaly;
    let e = eccentricity;
    let tolerance = KEPLER_TOLERANCE_DEG.to_radians();

    let mut ea = m + e * m.sin() * (1.0 + e * m.cos());

    for step in 1..=MAX_KEPLER_ITERATIONS {
        let next = ea - (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        let delta = (next - ea).abs();
        ea = next;

        if delta < tolerance {
            return (ea, step);
        }
    }

    tracing::warn!(
        mean_anomaly = m,
        eccentricity = e,
        "Kepler iteration hit the step limit without converging"
    );
    (ea, MAX_KEPLER_ITERATIONS)
}

/// Rectangular position in the orbital plane from the eccentric anomaly
pub fn orbital_plane_coordinates(
    eccentric_anomaly: f64,
    eccentricity: f64,
    mean_distance: f64,
) -> OrbitalPlane {
    let e = eccentricity;
    OrbitalPlane {
        x: mean_distance * (eccentric_anomaly.cos() - e),
        y: mean_distance * (1.0 - e * e).sqrt() * eccentric_anomaly.sin(),
    }
}

/// Distance and true anomaly from orbital-plane coordinates
pub fn polar_from_xy(x: f64, y: f64) -> PolarPosition {
    PolarPosition {
        distance: x.hypot(y),
        true_anomaly: y.atan2(x),
    }
}

/// Rotate an orbital-plane position into the ecliptic frame.
///
/// Rotates by the argument of perigee, then the inclination, then the longitude of the
/// ascending node.
pub fn ecliptic_coordinates(
    distance: f64,
    true_anomaly: f64,
    arg_perigee: f64,
    long_asc_node: f64,
    inclination: f64,
) -> EclipticPosition {
    let (sin_u, cos_u) = (true_anomaly + arg_perigee).sin_cos();
    let (sin_n, cos_n) = long_asc_node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    EclipticPosition {
        x: distance * (cos_n * cos_u - sin_n * sin_u * cos_i),
        y: distance * (sin_n * cos_u + cos_n * sin_u * cos_i),
        z: distance * sin_u * sin_i,
    }
}

/// Angular position of a rectangular vector: `ra = atan2(y, x)`,
/// `dec = atan2(z, sqrt(x² + y²))`
pub fn ra_dec(x: f64, y: f64, z: f64) -> EquatorialPosition {
    EquatorialPosition {
        right_ascension: y.atan2(x),
        declination: z.atan2(x.hypot(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const MOON_ECCENTRICITY: f64 = 0.0549;

    #[test]
    fn test_kepler_converges_over_full_orbit() {
        let tolerance = KEPLER_TOLERANCE_DEG.to_radians();

        for degree in 0..360 {
            let m = (degree as f64).to_radians();
            let (ea, steps) = solve_kepler(m, MOON_ECCENTRICITY);

            assert!(steps <= 4, "{} steps for M = {}°", steps, degree);
            let residual = ea - MOON_ECCENTRICITY * ea.sin() - m;
            assert!(
                residual.abs() < tolerance,
                "residual {} for M = {}°",
                residual,
                degree
            );
        }
    }

    #[test]
    fn test_kepler_apsides_are_fixed_points() {
        // In radians, perigee and apogee solve to themselves. Passing degrees into the
        // trig calls would move these.
        assert_relative_eq!(eccentric_anomaly(0.0, MOON_ECCENTRICITY), 0.0, epsilon = 1e-12);
        assert_relative_eq!(eccentric_anomaly(PI, MOON_ECCENTRICITY), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_kepler_circular_orbit() {
        let m = PI / 4.0;
        assert_relative_eq!(eccentric_anomaly(m, 0.0), m, epsilon = 1e-12);
    }

    #[test]
    fn test_kepler_ahead_of_mean_anomaly_in_first_half() {
        // E leads M between perigee and apogee
        let m = FRAC_PI_2;
        assert!(eccentric_anomaly(m, MOON_ECCENTRICITY) > m);
    }

    #[test]
    fn test_orbital_plane_at_perigee() {
        let plane = orbital_plane_coordinates(0.0, MOON_ECCENTRICITY, 60.2666);
        assert_relative_eq!(plane.x, 60.2666 * (1.0 - MOON_ECCENTRICITY), epsilon = 1e-9);
        assert_relative_eq!(plane.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orbital_plane_quarter_turn() {
        let plane = orbital_plane_coordinates(FRAC_PI_2, MOON_ECCENTRICITY, 1.0);
        assert_relative_eq!(plane.x, -MOON_ECCENTRICITY, epsilon = 1e-12);
        assert_relative_eq!(
            plane.y,
            (1.0 - MOON_ECCENTRICITY * MOON_ECCENTRICITY).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_polar_from_xy() {
        let polar = polar_from_xy(3.0, 4.0);
        assert_relative_eq!(polar.distance, 5.0, epsilon = 1e-12);
        assert_relative_eq!(polar.true_anomaly, 4.0_f64.atan2(3.0), epsilon = 1e-12);

        let behind = polar_from_xy(-1.0, 0.0);
        assert_relative_eq!(behind.true_anomaly, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_without_rotation() {
        let pos = ecliptic_coordinates(2.0, FRAC_PI_2, 0.0, 0.0, 0.0);
        assert_relative_eq!(pos.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pos.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(pos.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_inclination_lifts_out_of_plane() {
        let inclination = 5.1454_f64.to_radians();
        let pos = ecliptic_coordinates(1.0, FRAC_PI_2, 0.0, 0.0, inclination);
        assert_relative_eq!(pos.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(pos.y, inclination.cos(), epsilon = 1e-12);
        assert_relative_eq!(pos.z, inclination.sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_preserves_distance() {
        let pos = ecliptic_coordinates(60.0, 1.1, 2.2, 3.3, 0.09);
        let r = (pos.x * pos.x + pos.y * pos.y + pos.z * pos.z).sqrt();
        assert_relative_eq!(r, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ra_dec_axes() {
        let east = ra_dec(0.0, 1.0, 0.0);
        assert_relative_eq!(east.right_ascension, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(east.declination, 0.0, epsilon = 1e-12);

        let north = ra_dec(1.0, 0.0, 1.0);
        assert_relative_eq!(north.right_ascension, 0.0, epsilon = 1e-12);
        assert_relative_eq!(north.declination, PI / 4.0, epsilon = 1e-12);
    }
}
