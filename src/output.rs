use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use crate::config::{OutputPaths, OutputToggles};
use crate::orbit::OrbitalSystem;
use crate::sweep::OrbitSample;

/// Fully resolved artifact locations inside the output workspace.
///
/// Images live under `images/`, data exports under `data/`, the report at the
/// workspace root. Absolute paths in the configuration pass through as-is.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub workspace: PathBuf,
    pub comparison_png: PathBuf,
    pub comparison_svg: PathBuf,
    pub animation_gif: PathBuf,
    pub frames_dir: PathBuf,
    pub data_csv: PathBuf,
    pub data_json: PathBuf,
    pub report: PathBuf,
    pub toggles: OutputToggles,
}

pub fn resolve_artifacts(paths: &OutputPaths) -> Artifacts {
    let workspace = paths.directory.clone();
    let images = workspace.join("images");
    let data = workspace.join("data");

    Artifacts {
        workspace: workspace.clone(),
        comparison_png: resolve_path(&images, &paths.comparison_png),
        comparison_svg: resolve_path(&images, &paths.comparison_svg),
        animation_gif: resolve_path(&images, &paths.animation_gif),
        frames_dir: resolve_path(&images, &paths.frames_dir),
        data_csv: resolve_path(&data, &paths.data_csv),
        data_json: resolve_path(&data, &paths.data_json),
        report: resolve_path(&workspace, &paths.report),
        toggles: paths.toggles,
    }
}

fn resolve_path(base: &Path, relative: &Path) -> PathBuf {
    if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        base.join(relative)
    }
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create output directory {}", path.display()))?;
    }
    Ok(())
}

/// Write both sampled curves as one labelled CSV table.
pub fn write_csv(
    artifacts: &Artifacts,
    circular: &[OrbitSample],
    elliptical: &[OrbitSample],
) -> Result<Option<PathBuf>> {
    if !artifacts.toggles.csv {
        return Ok(None);
    }

    let path = &artifacts.data_csv;
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create CSV file {}", path.display()))?;

    writer.write_record(["orbit", "theta_rad", "radius_m", "velocity_m_per_s"])?;
    for (label, samples) in [("circular", circular), ("elliptical", elliptical)] {
        for sample in samples {
            writer
                .write_record([
                    label.to_string(),
                    format!("{:.12e}", sample.theta),
                    format!("{:.12e}", sample.radius),
                    format!("{:.12e}", sample.velocity),
                ])
                .with_context(|| {
                    format!("Failed to write sample at theta={:.6}", sample.theta)
                })?;
        }
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV writer for {}", path.display()))?;
    Ok(Some(path.clone()))
}

/// Write the full system (constants, derived parameters, display metrics and
/// both sampled curves) as pretty-printed JSON.
pub fn write_json(
    artifacts: &Artifacts,
    system: &OrbitalSystem,
    circular: &[OrbitSample],
    elliptical: &[OrbitSample],
) -> Result<Option<PathBuf>> {
    if !artifacts.toggles.json {
        return Ok(None);
    }

    let path = &artifacts.data_json;
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let perigee = system.perigee();
    let apogee = system.apogee();
    let payload = json!({
        "constants": system.bodies,
        "derived": {
            "angular_momentum": system.angular_momentum,
            "circular_energy": system.circular_energy,
            "elliptic_energy": system.elliptic_energy,
            "eccentricity": system.eccentricity,
            "semi_latus_rectum": system.semi_latus_rectum,
        },
        "display_metrics": {
            "perigee_m": perigee,
            "apogee_m": apogee,
            "perigee_speed_m_per_s": system.velocity(perigee)?,
            "apogee_speed_m_per_s": system.velocity(apogee)?,
            "circular_radius_m": system.circular_radius(),
            "circular_speed_m_per_s": system.circular_velocity()?,
        },
        "samples": {
            "circular": circular,
            "elliptical": elliptical,
        },
    });

    let file = File::create(path)
        .with_context(|| format!("Unable to create JSON file {}", path.display()))?;
    serde_json::to_writer_pretty(file, &payload)
        .with_context(|| format!("Failed to write JSON payload to {}", path.display()))?;
    Ok(Some(path.clone()))
}
