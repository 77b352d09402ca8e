use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::orbit::OrbitalSystem;
use crate::output::{Artifacts, ensure_directory};

/// Render the Markdown summary document. Pure templating: every number is
/// taken from the already-derived system, only unit scaling happens here.
pub fn render_report(system: &OrbitalSystem, artifacts: &Artifacts) -> Result<String> {
    let bodies = &system.bodies;
    let perigee = system.perigee();
    let apogee = system.apogee();
    let v_perigee = system.velocity(perigee)?;
    let v_apogee = system.velocity(apogee)?;

    let comparison_link = relative_link(&artifacts.workspace, &artifacts.comparison_png);
    let animation_link = relative_link(&artifacts.workspace, &artifacts.animation_gif);

    let mut doc = String::new();
    writeln!(doc, "# Satellite Orbital Dynamics").unwrap();
    writeln!(doc).unwrap();
    writeln!(doc, "## System parameters").unwrap();
    writeln!(doc, "| Parameter | Value |").unwrap();
    writeln!(doc, "|-----------|-------|").unwrap();
    writeln!(
        doc,
        "| Central body radius | {:.1} × 10⁶ m |",
        bodies.central_radius / 1e6
    )
    .unwrap();
    writeln!(doc, "| Satellite mass | {} kg |", bodies.satellite_mass).unwrap();
    writeln!(
        doc,
        "| Angular momentum | {:.2e} kg·m²/s |",
        system.angular_momentum
    )
    .unwrap();
    writeln!(doc, "| Circular energy | {:.2e} J |", system.circular_energy).unwrap();
    writeln!(doc, "| Elliptic energy | {:.2e} J |", system.elliptic_energy).unwrap();
    writeln!(doc, "| Eccentricity | {:.3} |", system.eccentricity).unwrap();
    writeln!(doc).unwrap();
    writeln!(doc, "## Key results").unwrap();
    writeln!(doc, "| Metric | Value |").unwrap();
    writeln!(doc, "|--------|-------|").unwrap();
    writeln!(doc, "| Perigee | {:.2} × 10⁶ m |", perigee / 1e6).unwrap();
    writeln!(doc, "| Apogee | {:.2} × 10⁶ m |", apogee / 1e6).unwrap();
    writeln!(doc, "| Speed at perigee | {:.2} km/s |", v_perigee / 1e3).unwrap();
    writeln!(doc, "| Speed at apogee | {:.2} km/s |", v_apogee / 1e3).unwrap();
    writeln!(doc).unwrap();
    writeln!(doc, "## Visualisations").unwrap();
    writeln!(doc, "![Orbit comparison]({comparison_link})").unwrap();
    writeln!(doc, "![Orbit animation]({animation_link})").unwrap();
    writeln!(doc).unwrap();
    writeln!(doc, "## Usage").unwrap();
    writeln!(doc, "```bash").unwrap();
    writeln!(doc, "cargo run --release -- --config config/orbit.toml").unwrap();
    writeln!(doc, "```").unwrap();

    Ok(doc)
}

/// Write the report to the workspace root, honoring the report toggle.
pub fn write_report(system: &OrbitalSystem, artifacts: &Artifacts) -> Result<Option<PathBuf>> {
    if !artifacts.toggles.report {
        return Ok(None);
    }

    let path = &artifacts.report;
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let doc = render_report(system, artifacts)?;
    fs::write(path, doc)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(Some(path.clone()))
}

fn relative_link(workspace: &Path, target: &Path) -> String {
    let relative = target.strip_prefix(workspace).unwrap_or(target);
    relative.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_from_str;
    use crate::orbit::{BodyConstants, OrbitalSystem};
    use crate::output::resolve_artifacts;

    fn earth_report() -> String {
        let system = OrbitalSystem::from_bodies(&BodyConstants::default()).unwrap();
        let params = load_from_str("").unwrap();
        let artifacts = resolve_artifacts(&params.output);
        render_report(&system, &artifacts).unwrap()
    }

    #[test]
    fn report_pins_the_golden_figures() {
        let doc = earth_report();
        assert!(doc.contains("| Eccentricity | 0.333 |"));
        assert!(doc.contains("| Perigee | 9.60 × 10⁶ m |"));
        assert!(doc.contains("| Apogee | 19.20 × 10⁶ m |"));
        assert!(doc.contains("| Speed at perigee | 7.44 km/s |"));
        assert!(doc.contains("| Speed at apogee | 3.72 km/s |"));
    }

    #[test]
    fn report_links_the_image_artifacts_relatively() {
        let doc = earth_report();
        assert!(doc.contains("(images/orbit_comparison.png)"));
        assert!(doc.contains("(images/orbit_animation.gif)"));
        assert!(!doc.contains("satellite-workspace/images"));
    }
}
