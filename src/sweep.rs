use std::f64::consts::TAU;

use anyhow::{Result, ensure};
use serde::Serialize;

use crate::orbit::OrbitalSystem;

/// One point on an orbit curve, produced on demand for plotting and export.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrbitSample {
    pub theta: f64,
    pub radius: f64,
    pub velocity: f64,
}

/// Uniform true-anomaly sweep of the elliptical orbit over [0, 2π].
pub fn sample_orbit(system: &OrbitalSystem, samples: usize) -> Result<Vec<OrbitSample>> {
    ensure!(samples >= 2, "orbit sweep needs at least two samples");

    let mut points = Vec::with_capacity(samples);
    for i in 0..samples {
        let theta = TAU * i as f64 / (samples - 1) as f64;
        let radius = system.radius(theta)?;
        let velocity = system.velocity(radius)?;
        points.push(OrbitSample {
            theta,
            radius,
            velocity,
        });
    }
    Ok(points)
}

/// Constant-radius sweep of the reference circular orbit over [0, 2π].
pub fn sample_circular(system: &OrbitalSystem, samples: usize) -> Result<Vec<OrbitSample>> {
    ensure!(samples >= 2, "orbit sweep needs at least two samples");

    let radius = system.circular_radius();
    let velocity = system.circular_velocity()?;

    let mut points = Vec::with_capacity(samples);
    for i in 0..samples {
        let theta = TAU * i as f64 / (samples - 1) as f64;
        points.push(OrbitSample {
            theta,
            radius,
            velocity,
        });
    }
    Ok(points)
}

/// Satellite true anomaly for an animation frame index.
pub fn frame_theta(frame: usize, angular_step: f64) -> f64 {
    frame as f64 * angular_step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::BodyConstants;

    fn earth_system() -> OrbitalSystem {
        OrbitalSystem::from_bodies(&BodyConstants::default()).expect("valid default system")
    }

    #[test]
    fn orbit_sweep_covers_the_full_revolution() {
        let system = earth_system();
        let points = sample_orbit(&system, 300).unwrap();

        assert_eq!(points.len(), 300);
        assert!((points[0].theta - 0.0).abs() < 1e-12);
        assert!((points.last().unwrap().theta - TAU).abs() < 1e-9);
        // Start and end of the closed curve coincide.
        assert!((points[0].radius - points.last().unwrap().radius).abs() < 1e-3);
    }

    #[test]
    fn orbit_sweep_respects_perigee_and_apogee_bounds() {
        let system = earth_system();
        let points = sample_orbit(&system, 257).unwrap();
        let perigee = system.perigee();
        let apogee = system.apogee();

        for point in &points {
            assert!(point.radius >= perigee - 1e-6);
            assert!(point.radius <= apogee + 1e-6);
            assert!(point.velocity.is_finite());
        }
    }

    #[test]
    fn circular_sweep_is_constant() {
        let system = earth_system();
        let points = sample_circular(&system, 64).unwrap();

        let radius = system.circular_radius();
        for point in &points {
            assert!((point.radius - radius).abs() < 1e-9);
            assert!((point.velocity - points[0].velocity).abs() < 1e-9);
        }
    }

    #[test]
    fn sweep_rejects_degenerate_sample_counts() {
        let system = earth_system();
        assert!(sample_orbit(&system, 1).is_err());
        assert!(sample_circular(&system, 0).is_err());
    }

    #[test]
    fn frame_theta_advances_linearly() {
        assert_eq!(frame_theta(0, 0.05), 0.0);
        assert!((frame_theta(10, 0.05) - 0.5).abs() < 1e-12);
        assert!((frame_theta(200, 0.05) - 10.0).abs() < 1e-12);
    }
}
