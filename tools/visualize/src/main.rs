//! Debug renderer for circulation reports: relief as grayscale, wind as yellow strokes.
//! Standalone; reads the JSON written by `exoclime-test --output`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use exoclime_core::{CirculationReport, ScalarGrid, WindField};
use image::{Rgb, RgbImage};

const WIND_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Render a circulation report to PNG")]
struct Args {
    /// Report JSON produced by exoclime-test.
    input: PathBuf,

    /// Output PNG path.
    #[arg(short, long, default_value = "data/debug/circulation.png")]
    output: PathBuf,

    /// Pixel spacing between drawn vectors.
    #[arg(long, default_value_t = 32)]
    step: usize,

    /// Pixels of stroke per unit of wind.
    #[arg(long, default_value_t = 5.0)]
    scale: f64,
}

/// Elevation [0, 1] → grayscale.
fn gray(v: f32) -> Rgb<u8> {
    let c = (v.clamp(0.0, 1.0) * 255.0) as u8;
    Rgb([c, c, c])
}

/// Plot a straight segment, clipping to the image.
fn draw_line(img: &mut RgbImage, (x0, y0): (f64, f64), (x1, y1): (f64, f64), color: Rgb<u8>) {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x0 + dx * t).round();
        let y = (y0 + dy * t).round();
        if x >= 0.0 && y >= 0.0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Relief background with one stroke every `step` pixels.
///
/// Grid row 0 is the south pole, so rows are flipped to put north at the top;
/// strokes run from the cell to `(x + u·scale, y − v·scale)` in image space.
fn render(topography: &ScalarGrid, wind: &WindField, step: usize, scale: f64) -> RgbImage {
    let (h, w) = topography.shape();
    let mut img = RgbImage::new(w as u32, h as u32);
    for r in 0..h {
        for c in 0..w {
            img.put_pixel(c as u32, (h - 1 - r) as u32, gray(topography.get(r, c)));
        }
    }
    let step = step.max(1);
    for r in (0..h).step_by(step) {
        for c in (0..w).step_by(step) {
            let dx = wind.u.get(r, c) as f64 * scale;
            let dy = wind.v.get(r, c) as f64 * scale;
            let start = (c as f64, (h - 1 - r) as f64);
            draw_line(&mut img, start, (start.0 + dx, start.1 - dy), WIND_COLOR);
        }
    }
    img
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let report = CirculationReport::from_json(&text)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let img = render(&report.topography, &report.wind, args.step, args.scale);

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    img.save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eastward_wind_draws_to_the_right() {
        let topo = ScalarGrid::flat(8, 16);
        let wind = WindField { u: ScalarGrid::new(8, 16, 1.0), v: ScalarGrid::flat(8, 16) };
        let img = render(&topo, &wind, 32, 5.0);
        assert_eq!(img.dimensions(), (16, 8));
        // Grid row 0 lands on the bottom image row.
        for x in 0..=5 {
            assert_eq!(*img.get_pixel(x, 7), WIND_COLOR, "x={x}");
        }
        assert_eq!(*img.get_pixel(6, 7), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn strokes_leaving_the_image_are_clipped() {
        let topo = ScalarGrid::new(4, 4, 1.0);
        // North-westward wind: strokes leave through the top-left corner.
        let wind = WindField { u: ScalarGrid::new(4, 4, -10.0), v: ScalarGrid::new(4, 4, 10.0) };
        let img = render(&topo, &wind, 2, 5.0);
        assert_eq!(*img.get_pixel(3, 0), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(0, 3), WIND_COLOR);
    }
}
