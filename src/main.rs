use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use satellite_orbits::cli::CliOptions;
use satellite_orbits::orbit::OrbitalSystem;
use satellite_orbits::output::{resolve_artifacts, write_csv, write_json};
use satellite_orbits::plotting::{render_animation, render_comparison};
use satellite_orbits::report::write_report;
use satellite_orbits::sweep::{sample_circular, sample_orbit};
use satellite_orbits::{config, workspace};

fn main() -> Result<()> {
    let cli = CliOptions::parse();

    let params = config::load_from_file(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    println!("Configuration summary:");
    for line in params.summary_lines() {
        println!("  - {line}");
    }

    let system = OrbitalSystem::from_bodies(&params.bodies)?;
    println!("Derived orbital parameters:");
    println!("  Angular momentum L = {:.4e} kg·m²/s", system.angular_momentum);
    println!("  Circular energy E0 = {:.4e} J", system.circular_energy);
    println!("  Elliptic energy E  = {:.4e} J", system.elliptic_energy);
    println!("  Eccentricity e     = {:.6}", system.eccentricity);
    println!(
        "  Perigee / apogee   = {:.4e} m / {:.4e} m",
        system.perigee(),
        system.apogee()
    );

    if cli.dry_run {
        println!("Dry-run requested; exiting without writing artifacts.");
        return Ok(());
    }

    let start = Instant::now();
    let artifacts = resolve_artifacts(&params.output);

    let mut generated = workspace::scaffold(&artifacts.workspace)?;

    let circular = sample_circular(&system, params.sweep.curve_samples)?;
    let elliptical = sample_orbit(&system, params.sweep.curve_samples)?;

    generated.extend(render_comparison(
        &system,
        &circular,
        &elliptical,
        &artifacts,
    )?);

    if cli.skip_animation {
        println!("Skipping animation as requested.");
    } else {
        generated.extend(render_animation(
            &system,
            &circular,
            &elliptical,
            &artifacts,
            &params.sweep,
            &params.animation,
        )?);
    }

    if let Some(path) = write_csv(&artifacts, &circular, &elliptical)? {
        generated.push(path);
    }
    if let Some(path) = write_json(&artifacts, &system, &circular, &elliptical)? {
        generated.push(path);
    }
    if let Some(path) = write_report(&system, &artifacts)? {
        generated.push(path);
    }

    println!(
        "Pipeline finished in {:.3?}; generated {} artifacts.",
        start.elapsed(),
        generated.len()
    );
    for file in generated {
        println!("  -> {}", file.display());
    }
    Ok(())
}
