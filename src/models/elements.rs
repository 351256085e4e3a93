/// Orbital elements of the Moon for one epoch offset.
///
/// Angular fields are in degrees, normalized to [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Longitude of the ascending node (N)
    pub long_asc_node: f64,
    /// Inclination to the ecliptic (i)
    pub inclination: f64,
    /// Argument of perigee (w)
    pub arg_perigee: f64,
    /// Mean distance (a), in Earth radii
    pub mean_distance: f64,
    /// Eccentricity (e), dimensionless
    pub eccentricity: f64,
    /// Mean anomaly (M)
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    pub fn long_asc_node_rad(&self) -> f64 {
        self.long_asc_node.to_radians()
    }

    pub fn inclination_rad(&self) -> f64 {
        self.inclination.to_radians()
    }

    pub fn arg_perigee_rad(&self) -> f64 {
        self.arg_perigee.to_radians()
    }

    pub fn mean_anomaly_rad(&self) -> f64 {
        self.mean_anomaly.to_radians()
    }
}
