use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::orbit::BodyConstants;

#[derive(Debug, Deserialize, Default)]
struct ConfigRoot {
    #[serde(default)]
    bodies: BodiesSection,
    #[serde(default)]
    sweep: SweepSection,
    #[serde(default)]
    animation: AnimationSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Deserialize)]
struct BodiesSection {
    #[serde(default = "default_gravitational_constant")]
    gravitational_constant: f64,
    #[serde(default = "default_central_mass")]
    central_mass: f64,
    #[serde(default = "default_central_radius")]
    central_radius: f64,
    #[serde(default = "default_satellite_mass")]
    satellite_mass: f64,
}

impl Default for BodiesSection {
    fn default() -> Self {
        Self {
            gravitational_constant: default_gravitational_constant(),
            central_mass: default_central_mass(),
            central_radius: default_central_radius(),
            satellite_mass: default_satellite_mass(),
        }
    }
}

fn default_gravitational_constant() -> f64 {
    BodyConstants::default().gravitational_constant
}

fn default_central_mass() -> f64 {
    BodyConstants::default().central_mass
}

fn default_central_radius() -> f64 {
    BodyConstants::default().central_radius
}

fn default_satellite_mass() -> f64 {
    BodyConstants::default().satellite_mass
}

#[derive(Debug, Deserialize)]
struct SweepSection {
    #[serde(default = "default_curve_samples")]
    curve_samples: usize,
    #[serde(default = "default_frame_count")]
    frame_count: usize,
    #[serde(default = "default_angular_step")]
    angular_step: f64,
    #[serde(default = "default_trail_length")]
    trail_length: usize,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            curve_samples: default_curve_samples(),
            frame_count: default_frame_count(),
            angular_step: default_angular_step(),
            trail_length: default_trail_length(),
        }
    }
}

fn default_curve_samples() -> usize {
    300
}

fn default_frame_count() -> usize {
    200
}

fn default_angular_step() -> f64 {
    0.05
}

fn default_trail_length() -> usize {
    50
}

#[derive(Debug, Deserialize)]
struct AnimationSection {
    #[serde(default = "default_frame_delay_ms")]
    frame_delay_ms: u32,
    #[serde(default)]
    export_frames: bool,
}

impl Default for AnimationSection {
    fn default() -> Self {
        Self {
            frame_delay_ms: default_frame_delay_ms(),
            export_frames: false,
        }
    }
}

fn default_frame_delay_ms() -> u32 {
    66
}

#[derive(Debug, Deserialize)]
struct OutputSection {
    #[serde(default = "default_workspace")]
    directory: PathBuf,
    #[serde(default = "default_comparison_png")]
    comparison_png: PathBuf,
    #[serde(default = "default_comparison_svg")]
    comparison_svg: PathBuf,
    #[serde(default = "default_animation_gif")]
    animation_gif: PathBuf,
    #[serde(default = "default_frames_dir")]
    frames_dir: PathBuf,
    #[serde(default = "default_data_csv")]
    data_csv: PathBuf,
    #[serde(default = "default_data_json")]
    data_json: PathBuf,
    #[serde(default = "default_report")]
    report: PathBuf,
    #[serde(default)]
    toggles: OutputTogglesSection,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_workspace(),
            comparison_png: default_comparison_png(),
            comparison_svg: default_comparison_svg(),
            animation_gif: default_animation_gif(),
            frames_dir: default_frames_dir(),
            data_csv: default_data_csv(),
            data_json: default_data_json(),
            report: default_report(),
            toggles: OutputTogglesSection::default(),
        }
    }
}

fn default_workspace() -> PathBuf {
    PathBuf::from("satellite-workspace")
}

fn default_comparison_png() -> PathBuf {
    PathBuf::from("orbit_comparison.png")
}

fn default_comparison_svg() -> PathBuf {
    PathBuf::from("orbit_comparison.svg")
}

fn default_animation_gif() -> PathBuf {
    PathBuf::from("orbit_animation.gif")
}

fn default_frames_dir() -> PathBuf {
    PathBuf::from("orbit_frames")
}

fn default_data_csv() -> PathBuf {
    PathBuf::from("orbit_samples.csv")
}

fn default_data_json() -> PathBuf {
    PathBuf::from("orbit_parameters.json")
}

fn default_report() -> PathBuf {
    PathBuf::from("README.md")
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct OutputTogglesSection {
    #[serde(default = "default_true")]
    png: bool,
    #[serde(default = "default_true")]
    svg: bool,
    #[serde(default = "default_true")]
    gif: bool,
    #[serde(default = "default_true")]
    csv: bool,
    #[serde(default = "default_true")]
    json: bool,
    #[serde(default = "default_true")]
    report: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputTogglesSection {
    fn default() -> Self {
        Self {
            png: true,
            svg: true,
            gif: true,
            csv: true,
            json: true,
            report: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub bodies: BodyConstants,
    pub sweep: SweepSettings,
    pub animation: AnimationSettings,
    pub output: OutputPaths,
}

#[derive(Debug, Clone, Copy)]
pub struct SweepSettings {
    pub curve_samples: usize,
    pub frame_count: usize,
    pub angular_step: f64,
    pub trail_length: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct AnimationSettings {
    pub frame_delay_ms: u32,
    pub export_frames: bool,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub directory: PathBuf,
    pub comparison_png: PathBuf,
    pub comparison_svg: PathBuf,
    pub animation_gif: PathBuf,
    pub frames_dir: PathBuf,
    pub data_csv: PathBuf,
    pub data_json: PathBuf,
    pub report: PathBuf,
    pub toggles: OutputToggles,
}

#[derive(Debug, Clone, Copy)]
pub struct OutputToggles {
    pub png: bool,
    pub svg: bool,
    pub gif: bool,
    pub csv: bool,
    pub json: bool,
    pub report: bool,
}

impl PipelineParams {
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "central body: M = {:.4e} kg, R = {:.4e} m",
                self.bodies.central_mass, self.bodies.central_radius
            ),
            format!("satellite mass: {} kg", self.bodies.satellite_mass),
            format!(
                "sweep: {} curve samples, {} frames, angular step {} rad",
                self.sweep.curve_samples, self.sweep.frame_count, self.sweep.angular_step
            ),
            format!(
                "trail length: {} points, frame delay: {} ms",
                self.sweep.trail_length, self.animation.frame_delay_ms
            ),
            format!("workspace: {}", self.output.directory.display()),
        ]
    }
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<PipelineParams> {
    let raw = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;
    load_from_str(&raw)
}

pub fn load_from_str(raw: &str) -> Result<PipelineParams> {
    let parsed: ConfigRoot =
        toml::from_str(raw).context("Failed to parse pipeline configuration")?;

    let bodies = BodyConstants {
        gravitational_constant: parsed.bodies.gravitational_constant,
        central_mass: parsed.bodies.central_mass,
        central_radius: parsed.bodies.central_radius,
        satellite_mass: parsed.bodies.satellite_mass,
    };

    ensure!(
        bodies.gravitational_constant > 0.0
            && bodies.central_mass > 0.0
            && bodies.central_radius > 0.0
            && bodies.satellite_mass > 0.0,
        "physical constants must all be positive"
    );
    ensure!(
        parsed.sweep.curve_samples >= 2,
        "sweep.curve_samples must be at least 2"
    );
    ensure!(
        parsed.sweep.frame_count >= 1,
        "sweep.frame_count must be at least 1"
    );
    ensure!(
        parsed.sweep.angular_step > 0.0,
        "sweep.angular_step must be positive"
    );
    ensure!(
        parsed.sweep.trail_length >= 1,
        "sweep.trail_length must be at least 1"
    );
    ensure!(
        parsed.animation.frame_delay_ms >= 1,
        "animation.frame_delay_ms must be at least 1"
    );

    Ok(PipelineParams {
        bodies,
        sweep: SweepSettings {
            curve_samples: parsed.sweep.curve_samples,
            frame_count: parsed.sweep.frame_count,
            angular_step: parsed.sweep.angular_step,
            trail_length: parsed.sweep.trail_length,
        },
        animation: AnimationSettings {
            frame_delay_ms: parsed.animation.frame_delay_ms,
            export_frames: parsed.animation.export_frames,
        },
        output: OutputPaths {
            directory: parsed.output.directory.clone(),
            comparison_png: parsed.output.comparison_png.clone(),
            comparison_svg: parsed.output.comparison_svg.clone(),
            animation_gif: parsed.output.animation_gif.clone(),
            frames_dir: parsed.output.frames_dir.clone(),
            data_csv: parsed.output.data_csv.clone(),
            data_json: parsed.output.data_json.clone(),
            report: parsed.output.report.clone(),
            toggles: OutputToggles {
                png: parsed.output.toggles.png,
                svg: parsed.output.toggles.svg,
                gif: parsed.output.toggles.gif,
                csv: parsed.output.toggles.csv,
                json: parsed.output.toggles.json,
                report: parsed.output.toggles.report,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_earth_defaults() {
        let params = load_from_str("").unwrap();

        assert!((params.bodies.gravitational_constant - 6.67430e-11).abs() < 1e-20);
        assert!((params.bodies.central_mass - 5.972e24).abs() < 1e10);
        assert!((params.bodies.central_radius - 6.4e6).abs() < 1e-3);
        assert!((params.bodies.satellite_mass - 1000.0).abs() < 1e-9);
        assert_eq!(params.sweep.curve_samples, 300);
        assert_eq!(params.sweep.frame_count, 200);
        assert_eq!(params.sweep.trail_length, 50);
        assert!(params.output.toggles.png && params.output.toggles.gif);
        assert!(!params.animation.export_frames);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let params = load_from_str(
            r#"
            [bodies]
            central_mass = 6.39e23
            central_radius = 3.39e6
            satellite_mass = 250.0

            [sweep]
            curve_samples = 128
            frame_count = 90
            angular_step = 0.1
            trail_length = 20

            [animation]
            frame_delay_ms = 40
            export_frames = true

            [output]
            directory = "mars-workspace"
            [output.toggles]
            svg = false
            "#,
        )
        .unwrap();

        assert!((params.bodies.central_mass - 6.39e23).abs() < 1e10);
        assert_eq!(params.sweep.curve_samples, 128);
        assert_eq!(params.sweep.frame_count, 90);
        assert!(params.animation.export_frames);
        assert_eq!(params.animation.frame_delay_ms, 40);
        assert_eq!(params.output.directory, PathBuf::from("mars-workspace"));
        assert!(!params.output.toggles.svg);
        assert!(params.output.toggles.png);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(load_from_str("[bodies]\nsatellite_mass = -1.0").is_err());
        assert!(load_from_str("[sweep]\ncurve_samples = 1").is_err());
        assert!(load_from_str("[sweep]\nangular_step = 0.0").is_err());
        assert!(load_from_str("[animation]\nframe_delay_ms = 0").is_err());
        assert!(load_from_str("not toml at all [").is_err());
    }
}
