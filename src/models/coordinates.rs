use std::fmt;

/// Rectangular position in the orbital plane, x pointing at perigee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalPlane {
    pub x: f64,
    pub y: f64,
}

/// Distance and true anomaly (radians) in the orbital plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPosition {
    pub distance: f64,
    pub true_anomaly: f64,
}

/// Geocentric rectangular position referenced to the ecliptic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Right ascension and declination, both in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    pub right_ascension: f64,
    pub declination: f64,
}

/// Wire format of a broadcast frame: `"<ra>, <dec>"`.
impl fmt::Display for EquatorialPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.right_ascension, self.declination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_comma_space_separated() {
        let position = EquatorialPosition {
            right_ascension: 1.25,
            declination: -0.5,
        };
        assert_eq!(position.to_string(), "1.25, -0.5");
    }

    #[test]
    fn test_display_uses_default_float_text() {
        let position = EquatorialPosition {
            right_ascension: 2.0,
            declination: 0.1,
        };
        assert_eq!(position.to_string(), "2, 0.1");
    }
}
