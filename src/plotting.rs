use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::{AnimationSettings, SweepSettings};
use crate::orbit::OrbitalSystem;
use crate::output::Artifacts;
use crate::sweep::{self, OrbitSample};
use crate::trail::Trail;

const CANVAS_SIZE: (u32, u32) = (720, 720);
const EARTH_COLOR: RGBColor = RGBColor(31, 163, 236);
const CIRCULAR_COLOR: RGBColor = RED;
const ELLIPTICAL_COLOR: RGBColor = BLUE;
const SATELLITE_COLOR: RGBColor = BLACK;
const EARTH_OUTLINE_SAMPLES: usize = 96;

/// Display unit for all charts: 10^6 m.
const MEGAMETER: f64 = 1e6;

/// Project a polar orbit sweep onto display Cartesian coordinates.
pub fn to_display_curve(samples: &[OrbitSample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|s| {
            let r = s.radius / MEGAMETER;
            (r * s.theta.cos(), r * s.theta.sin())
        })
        .collect()
}

/// Render the static circular-vs-elliptical comparison chart.
pub fn render_comparison(
    system: &OrbitalSystem,
    circular: &[OrbitSample],
    elliptical: &[OrbitSample],
    artifacts: &Artifacts,
) -> Result<Vec<PathBuf>> {
    if circular.is_empty() || elliptical.is_empty() {
        return Err(anyhow!("No samples available for the comparison chart"));
    }

    let circular_curve = to_display_curve(circular);
    let elliptical_curve = to_display_curve(elliptical);
    let limit = display_limit(system);

    let mut files = Vec::new();

    if artifacts.toggles.png {
        let path = &artifacts.comparison_png;
        ensure_parent(path)?;
        let area = BitMapBackend::new(path, CANVAS_SIZE).into_drawing_area();
        draw_comparison(area, system, &circular_curve, &elliptical_curve, limit)?;
        files.push(path.clone());
    }

    if artifacts.toggles.svg {
        let path = &artifacts.comparison_svg;
        ensure_parent(path)?;
        let area = SVGBackend::new(path, CANVAS_SIZE).into_drawing_area();
        draw_comparison(area, system, &circular_curve, &elliptical_curve, limit)?;
        files.push(path.clone());
    }

    Ok(files)
}

/// Render the looping orbit animation: a GIF and, if enabled, the individual
/// frame PNGs alongside it.
pub fn render_animation(
    system: &OrbitalSystem,
    circular: &[OrbitSample],
    elliptical: &[OrbitSample],
    artifacts: &Artifacts,
    sweep_settings: &SweepSettings,
    animation: &AnimationSettings,
) -> Result<Vec<PathBuf>> {
    if !artifacts.toggles.gif && !animation.export_frames {
        return Ok(Vec::new());
    }

    let circular_curve = to_display_curve(circular);
    let elliptical_curve = to_display_curve(elliptical);
    let limit = display_limit(system);

    let mut files = Vec::new();

    let gif_area = if artifacts.toggles.gif {
        let path = &artifacts.animation_gif;
        ensure_parent(path)?;
        let backend = BitMapBackend::gif(path, CANVAS_SIZE, animation.frame_delay_ms)
            .map_err(|e| anyhow!("Failed to open GIF backend {}: {e}", path.display()))?;
        files.push(path.clone());
        Some(backend.into_drawing_area())
    } else {
        None
    };

    if animation.export_frames {
        ensure_directory(&artifacts.frames_dir)?;
        files.push(artifacts.frames_dir.clone());
    }

    let mut trail = Trail::new(sweep_settings.trail_length);

    for frame in 0..sweep_settings.frame_count {
        let theta = sweep::frame_theta(frame, sweep_settings.angular_step);
        let radius = system.radius(theta)? / MEGAMETER;
        let satellite = (radius * theta.cos(), radius * theta.sin());
        trail.push(satellite.0, satellite.1);

        if let Some(area) = &gif_area {
            draw_frame(
                area,
                &circular_curve,
                &elliptical_curve,
                &trail,
                satellite,
                limit,
                frame,
            )?;
            area.present()
                .map_err(|e| anyhow!("Failed to emit GIF frame {frame}: {e:?}"))?;
        }

        if animation.export_frames {
            let path = artifacts.frames_dir.join(format!("frame_{frame:03}.png"));
            let area = BitMapBackend::new(&path, CANVAS_SIZE).into_drawing_area();
            draw_frame(
                &area,
                &circular_curve,
                &elliptical_curve,
                &trail,
                satellite,
                limit,
                frame,
            )?;
            area.present()
                .map_err(|e| anyhow!("Failed to write frame {}: {e:?}", path.display()))?;
        }
    }

    Ok(files)
}

fn display_limit(system: &OrbitalSystem) -> f64 {
    (system.apogee() / MEGAMETER) * 1.15
}

fn draw_comparison<DB: DrawingBackend>(
    drawing_area: DrawingArea<DB, Shift>,
    system: &OrbitalSystem,
    circular_curve: &[(f64, f64)],
    elliptical_curve: &[(f64, f64)],
    limit: f64,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let root = drawing_area;
    root.fill(&WHITE)?;

    let (title_area, chart_area) = root.split_vertically(40);
    let title_style_base = ("sans-serif", 28).into_text_style(&title_area);
    let title_style = title_style_base.pos(Pos::new(HPos::Center, VPos::Center));
    let title_dims = title_area.dim_in_pixel();
    title_area.draw_text(
        "Orbit comparison (radius in 10^6 m)",
        &title_style,
        (title_dims.0 as i32 / 2, title_dims.1 as i32 / 2),
    )?;

    let mut chart = ChartBuilder::on(&chart_area)
        .margin_left(52)
        .margin_right(24)
        .margin_bottom(40)
        .margin_top(6)
        .set_label_area_size(LabelAreaPosition::Left, 58)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(-limit..limit, -limit..limit)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("x (10^6 m)")
        .y_desc("y (10^6 m)")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    draw_central_body(&mut chart, system)?;

    chart
        .draw_series(LineSeries::new(
            circular_curve.iter().copied(),
            CIRCULAR_COLOR.stroke_width(2),
        ))?
        .label("Circular orbit (2R)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CIRCULAR_COLOR.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(
            elliptical_curve.iter().copied(),
            ELLIPTICAL_COLOR.stroke_width(2),
        ))?
        .label(format!("Elliptical orbit (e = {:.3})", system.eccentricity))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], ELLIPTICAL_COLOR.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;

    chart_area
        .present()
        .map_err(|e| anyhow!("Failed to render comparison chart: {:?}", e))?;
    Ok(())
}

fn draw_frame<DB: DrawingBackend>(
    drawing_area: &DrawingArea<DB, Shift>,
    circular_curve: &[(f64, f64)],
    elliptical_curve: &[(f64, f64)],
    trail: &Trail,
    satellite: (f64, f64),
    limit: f64,
    frame: usize,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(drawing_area)
        .margin(20)
        .caption(format!("Satellite orbit, frame {frame:03}"), ("sans-serif", 24))
        .build_cartesian_2d(-limit..limit, -limit..limit)?;

    // No mesh or axes on animation frames, only the orbit geometry.
    draw_central_body_on(&mut chart, circular_curve, elliptical_curve)?;

    if trail.len() >= 2 {
        chart.draw_series(LineSeries::new(
            trail.iter(),
            SATELLITE_COLOR.mix(0.4).stroke_width(1),
        ))?;
    }

    chart.draw_series(std::iter::once(Circle::new(
        satellite,
        6,
        SATELLITE_COLOR.filled(),
    )))?;

    Ok(())
}

fn draw_central_body<'a, DB: DrawingBackend>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    system: &OrbitalSystem,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let r = system.bodies.central_radius / MEGAMETER;
    chart.draw_series(std::iter::once(Polygon::new(
        disc_outline(r),
        EARTH_COLOR.mix(0.7).filled(),
    )))?;
    Ok(())
}

fn draw_central_body_on<'a, DB: DrawingBackend>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    circular_curve: &[(f64, f64)],
    elliptical_curve: &[(f64, f64)],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    // The circular curve has constant radius 2R, so the body disc is half of
    // the first sample's distance from the origin.
    let r = circular_curve
        .first()
        .map(|(x, y)| (x * x + y * y).sqrt() / 2.0)
        .unwrap_or(1.0);
    chart.draw_series(std::iter::once(Polygon::new(
        disc_outline(r),
        EARTH_COLOR.mix(0.7).filled(),
    )))?;

    chart.draw_series(LineSeries::new(
        circular_curve.iter().copied(),
        CIRCULAR_COLOR.stroke_width(1),
    ))?;
    chart.draw_series(LineSeries::new(
        elliptical_curve.iter().copied(),
        ELLIPTICAL_COLOR.stroke_width(1),
    ))?;
    Ok(())
}

fn disc_outline(radius: f64) -> Vec<(f64, f64)> {
    (0..=EARTH_OUTLINE_SAMPLES)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / EARTH_OUTLINE_SAMPLES as f64;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    Ok(())
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create plot directory {}", path.display()))?;
    }
    Ok(())
}
