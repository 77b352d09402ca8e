use std::error::Error;
use std::fmt;

use anyhow::Result;
use serde::Serialize;

/// Denominator floor below which the conic equation is treated as unbound.
const CONIC_DENOMINATOR_FLOOR: f64 = 1e-12;

/// Physically invalid configuration, detected before any square root is taken.
#[derive(Debug, Clone)]
pub struct DomainError {
    message: String,
}

impl DomainError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for DomainError {}

/// Fixed physical inputs for the two-body problem.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BodyConstants {
    pub gravitational_constant: f64,
    pub central_mass: f64,
    pub central_radius: f64,
    pub satellite_mass: f64,
}

impl Default for BodyConstants {
    /// Earth as the central body and a 1000 kg satellite.
    fn default() -> Self {
        Self {
            gravitational_constant: 6.67430e-11,
            central_mass: 5.972e24,
            central_radius: 6.4e6,
            satellite_mass: 1000.0,
        }
    }
}

impl BodyConstants {
    fn check_positive(&self) -> Result<()> {
        let fields = [
            ("gravitational_constant", self.gravitational_constant),
            ("central_mass", self.central_mass),
            ("central_radius", self.central_radius),
            ("satellite_mass", self.satellite_mass),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::new(format!(
                    "{name} must be a positive finite number, got {value:.6e}"
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Derived orbital constants. Immutable after construction: every field is a
/// pure function of the four inputs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrbitalSystem {
    pub bodies: BodyConstants,
    pub angular_momentum: f64,
    pub circular_energy: f64,
    pub elliptic_energy: f64,
    pub eccentricity: f64,
    pub semi_latus_rectum: f64,
}

impl OrbitalSystem {
    /// Derive the full parameter set from the physical constants alone.
    ///
    /// The elliptical orbit shares its angular momentum with the reference
    /// circular orbit of radius 2R and carries 8/9 of its energy.
    pub fn from_bodies(bodies: &BodyConstants) -> Result<Self> {
        bodies.check_positive()?;

        let g = bodies.gravitational_constant;
        let m_central = bodies.central_mass;
        let r = bodies.central_radius;
        let m_sat = bodies.satellite_mass;

        let angular_momentum = m_sat * (2.0 * g * m_central * r).sqrt();
        let circular_energy = -(g * m_central * m_sat) / (4.0 * r);
        let elliptic_energy = (8.0 / 9.0) * circular_energy;

        Self::from_energy_momentum(bodies, elliptic_energy, angular_momentum)
    }

    /// Build the system from an arbitrary energy / angular momentum pair.
    ///
    /// Fails with [`DomainError`] if the eccentricity radicand is negative or
    /// the resulting trajectory is not a bound ellipse (ε ≥ 1).
    pub fn from_energy_momentum(
        bodies: &BodyConstants,
        energy: f64,
        angular_momentum: f64,
    ) -> Result<Self> {
        bodies.check_positive()?;

        let g = bodies.gravitational_constant;
        let m_central = bodies.central_mass;
        let r = bodies.central_radius;
        let m_sat = bodies.satellite_mass;

        let radicand = 1.0
            + (2.0 * energy * angular_momentum * angular_momentum)
                / (g * g * m_central * m_central * m_sat.powi(3));
        if radicand < 0.0 {
            return Err(DomainError::new(format!(
                "eccentricity radicand is negative ({radicand:.6e}) for \
                 E = {energy:.6e} J, L = {angular_momentum:.6e} kg·m²/s"
            ))
            .into());
        }

        let eccentricity = radicand.sqrt();
        if eccentricity >= 1.0 {
            return Err(DomainError::new(format!(
                "trajectory is unbound (eccentricity {eccentricity:.6} >= 1) for \
                 E = {energy:.6e} J, L = {angular_momentum:.6e} kg·m²/s"
            ))
            .into());
        }

        Ok(Self {
            bodies: *bodies,
            angular_momentum,
            circular_energy: -(g * m_central * m_sat) / (4.0 * r),
            elliptic_energy: energy,
            eccentricity,
            semi_latus_rectum: 2.0 * r,
        })
    }

    /// Radial distance on the elliptical orbit at true anomaly `theta`.
    pub fn radius(&self, theta: f64) -> Result<f64> {
        conic_radius(theta, self.eccentricity, self.semi_latus_rectum)
    }

    /// Closest approach, at θ = 0. Infallible: ε < 1 by construction.
    pub fn perigee(&self) -> f64 {
        self.semi_latus_rectum / (1.0 + self.eccentricity)
    }

    /// Farthest point, at θ = π.
    pub fn apogee(&self) -> f64 {
        self.semi_latus_rectum / (1.0 - self.eccentricity)
    }

    /// Instantaneous speed on the elliptical orbit at radius `r`, from
    /// conservation of mechanical energy.
    pub fn velocity(&self, r: f64) -> Result<f64> {
        speed_at(&self.bodies, self.elliptic_energy, r)
    }

    /// Radius of the reference circular orbit.
    pub fn circular_radius(&self) -> f64 {
        self.semi_latus_rectum
    }

    /// Speed on the reference circular orbit.
    pub fn circular_velocity(&self) -> Result<f64> {
        speed_at(&self.bodies, self.circular_energy, self.circular_radius())
    }
}

/// Polar equation of a conic with one focus at the origin. θ = 0 is the
/// periapsis, θ = π the apoapsis.
pub fn conic_radius(theta: f64, eccentricity: f64, semi_latus_rectum: f64) -> Result<f64> {
    let denominator = 1.0 + eccentricity * theta.cos();
    if denominator <= CONIC_DENOMINATOR_FLOOR {
        return Err(DomainError::new(format!(
            "conic radius diverges at theta = {theta:.6} rad for \
             eccentricity {eccentricity:.6} (unbound trajectory)"
        ))
        .into());
    }
    Ok(semi_latus_rectum / denominator)
}

fn speed_at(bodies: &BodyConstants, energy: f64, r: f64) -> Result<f64> {
    if !r.is_finite() || r <= 0.0 {
        return Err(DomainError::new(format!(
            "radius must be a positive finite number, got {r:.6e}"
        ))
        .into());
    }

    let potential = bodies.gravitational_constant * bodies.central_mass * bodies.satellite_mass / r;
    let radicand = 2.0 * (energy + potential) / bodies.satellite_mass;
    if radicand < 0.0 {
        return Err(DomainError::new(format!(
            "speed radicand is negative ({radicand:.6e}) at r = {r:.6e} m for \
             E = {energy:.6e} J: radius is outside the reachable range"
        ))
        .into());
    }

    Ok(radicand.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn earth_system() -> OrbitalSystem {
        OrbitalSystem::from_bodies(&BodyConstants::default()).expect("valid default system")
    }

    #[test]
    fn default_eccentricity_is_one_third() {
        let system = earth_system();
        // Pinned regression value: the 8/9 energy scaling gives exactly 1/3.
        assert!((system.eccentricity - 1.0 / 3.0).abs() < 1e-12);
        assert!((0.0..1.0).contains(&system.eccentricity));
    }

    #[test]
    fn default_derived_quantities() {
        let system = earth_system();
        let bodies = BodyConstants::default();
        let gm = bodies.gravitational_constant * bodies.central_mass;

        let expected_l =
            bodies.satellite_mass * (2.0 * gm * bodies.central_radius).sqrt();
        assert!((system.angular_momentum - expected_l).abs() / expected_l < 1e-12);
        assert!(system.circular_energy < 0.0);
        assert!((system.elliptic_energy - (8.0 / 9.0) * system.circular_energy).abs() < 1e-3);
    }

    #[test]
    fn perigee_and_apogee_match_conic_extremes() {
        let system = earth_system();
        let r = system.bodies.central_radius;

        assert!((system.perigee() - 1.5 * r).abs() < 1e-3);
        assert!((system.apogee() - 3.0 * r).abs() < 1e-3);
        assert!((system.radius(0.0).unwrap() - system.perigee()).abs() < 1e-6);
        assert!((system.radius(PI).unwrap() - system.apogee()).abs() < 1e-6);
    }

    #[test]
    fn radius_is_monotonic_between_extremes() {
        let system = earth_system();
        let steps = 64;

        let mut previous = system.radius(0.0).unwrap();
        for i in 1..=steps {
            let theta = PI * i as f64 / steps as f64;
            let current = system.radius(theta).unwrap();
            assert!(current >= previous, "radius must increase on [0, pi]");
            previous = current;
        }
        for i in 1..=steps {
            let theta = PI + PI * i as f64 / steps as f64;
            let current = system.radius(theta).unwrap();
            assert!(current <= previous, "radius must decrease on [pi, 2pi]");
            previous = current;
        }

        let perigee = system.perigee();
        let apogee = system.apogee();
        for i in 0..=2 * steps {
            let theta = 2.0 * PI * i as f64 / (2 * steps) as f64;
            let r = system.radius(theta).unwrap();
            assert!(r >= perigee - 1e-6 && r <= apogee + 1e-6);
        }
    }

    #[test]
    fn zero_eccentricity_collapses_to_circle() {
        let p = 1.28e7;
        for i in 0..32 {
            let theta = 2.0 * PI * i as f64 / 32.0;
            assert!((conic_radius(theta, 0.0, p).unwrap() - p).abs() < 1e-9);
        }
    }

    #[test]
    fn unbound_conic_is_rejected_near_the_asymptote() {
        let err = conic_radius(PI, 1.0, 1.28e7).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());
    }

    #[test]
    fn perigee_speed_is_twice_apogee_speed() {
        let system = earth_system();
        let v_perigee = system.velocity(system.perigee()).unwrap();
        let v_apogee = system.velocity(system.apogee()).unwrap();

        assert!(v_perigee > v_apogee);
        // For the 8/9 energy scaling the speed ratio is exactly 2.
        assert!((v_perigee / v_apogee - 2.0).abs() < 1e-9);
        assert!(v_perigee.is_finite() && v_apogee.is_finite());
    }

    #[test]
    fn velocity_rejects_unreachable_radius() {
        let system = earth_system();
        let beyond_apogee = system.apogee() * 10.0;
        let err = system.velocity(beyond_apogee).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());

        let err = system.velocity(-1.0).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());
    }

    #[test]
    fn negative_radicand_is_a_domain_error_not_a_nan() {
        let bodies = BodyConstants::default();
        // Strongly bound energy with a large angular momentum drives the
        // eccentricity radicand below zero.
        let err = OrbitalSystem::from_energy_momentum(&bodies, -1.0e30, 1.0e20).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());
    }

    #[test]
    fn unbound_energy_is_rejected() {
        let bodies = BodyConstants::default();
        let l = 7.14e13;
        let err = OrbitalSystem::from_energy_momentum(&bodies, 1.0e12, l).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());
    }

    #[test]
    fn nonpositive_constants_are_rejected() {
        let mut bodies = BodyConstants::default();
        bodies.satellite_mass = 0.0;
        let err = OrbitalSystem::from_bodies(&bodies).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());
    }

    #[test]
    fn circular_orbit_speed_matches_energy_balance() {
        let system = earth_system();
        let bodies = system.bodies;
        let gm = bodies.gravitational_constant * bodies.central_mass;
        let expected = (gm / (2.0 * bodies.central_radius)).sqrt();
        let v = system.circular_velocity().unwrap();
        assert!((v - expected).abs() / expected < 1e-12);
    }
}
