/// Harness for the circulation engine: feeds it a planet record and a
/// synthetic (or saved) relief, prints per-band wind statistics, and can write
/// the full report for the visualize tool.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use exoclime_core::synthetic::{flat_topography, fractal_topography, trappist_1e, volcano_topography};
use exoclime_core::{
    CirculationBand, CirculationEngine, CirculationReport, EngineConfig, PlanetaryParameters,
    ScalarGrid, TopographyGrid,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Terrain {
    Flat,
    Volcano,
    Fractal,
}

#[derive(Parser, Debug)]
#[command(name = "exoclime-test", about = "Run the circulation engine on mock upstream data")]
struct Args {
    /// Catalog record JSON (`st_lum`, `pl_orbper`, `pl_name`). Defaults to TRAPPIST-1 e.
    #[arg(short, long)]
    planet: Option<PathBuf>,

    /// Override log10 stellar luminosity.
    #[arg(long, allow_hyphen_values = true)]
    st_lum: Option<f64>,

    /// Override orbital period in days.
    #[arg(long)]
    orbper: Option<f64>,

    /// Grid rows. Ignored when `--topography` is given.
    #[arg(long, default_value_t = EngineConfig::default().height)]
    height: usize,

    /// Grid columns. Ignored when `--topography` is given.
    #[arg(long, default_value_t = EngineConfig::default().width)]
    width: usize,

    /// Synthetic relief to use when no topography file is given.
    #[arg(short, long, value_enum, default_value = "volcano")]
    terrain: Terrain,

    /// Seed for the fractal relief.
    #[arg(long, default_value_t = 42)]
    seed: u32,

    /// Topography grid JSON (`data`, `height`, `width`), values in [0, 1].
    #[arg(long)]
    topography: Option<PathBuf>,

    /// Write the circulation report JSON here.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). Falls back to RUST_LOG, then info.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level.and_then(|l| l.parse::<log::LevelFilter>().ok()) {
        builder.filter_level(level);
    }
    builder.init();
}

fn load_planet(args: &Args) -> Result<PlanetaryParameters> {
    let mut params = match &args.planet {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading planet record {}", path.display()))?;
            PlanetaryParameters::from_json(&text)
                .with_context(|| format!("parsing planet record {}", path.display()))?
        }
        None => trappist_1e(),
    };
    if args.st_lum.is_some() {
        params.stellar_log_luminosity = args.st_lum;
    }
    if args.orbper.is_some() {
        params.orbital_period_days = args.orbper;
    }
    Ok(params)
}

fn load_topography(args: &Args) -> Result<TopographyGrid> {
    if let Some(path) = &args.topography {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading topography {}", path.display()))?;
        let grid: ScalarGrid = serde_json::from_str(&text)
            .with_context(|| format!("parsing topography {}", path.display()))?;
        return Ok(grid);
    }
    Ok(match args.terrain {
        Terrain::Flat => flat_topography(args.height, args.width),
        Terrain::Volcano => volcano_topography(args.height, args.width),
        Terrain::Fractal => fractal_topography(args.height, args.width, args.seed),
    })
}

/// Engine sized to the relief actually loaded, not to `--height/--width`.
fn engine_for(params: &PlanetaryParameters, topography: &TopographyGrid) -> Result<CirculationEngine> {
    let (height, width) = topography.shape();
    Ok(CirculationEngine::new(params, height, width)?)
}

fn print_band_table(engine: &CirculationEngine, report: &CirculationReport) {
    println!("{:<8} {:>6} {:>10} {:>10} {:>10}", "band", "rows", "mean_u", "mean_v", "mean_|v|");
    for band in CirculationBand::ALL {
        let rows: Vec<usize> = engine
            .row_forcing()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.band == band)
            .map(|(r, _)| r)
            .collect();
        if rows.is_empty() {
            println!("{:<8} {:>6}", band.name(), 0);
            continue;
        }
        let (mut su, mut sv, mut ss, mut n) = (0.0f64, 0.0f64, 0.0f64, 0usize);
        for &r in &rows {
            for c in 0..report.wind.u.width {
                su += report.wind.u.get(r, c) as f64;
                sv += report.wind.v.get(r, c) as f64;
                ss += report.wind.speed(r, c);
                n += 1;
            }
        }
        let n = n as f64;
        println!(
            "{:<8} {:>6} {:>10.5} {:>10.5} {:>10.5}",
            band.name(),
            rows.len(),
            su / n,
            sv / n,
            ss / n
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let params = load_planet(&args)?;
    let topography = load_topography(&args)?;
    let engine = engine_for(&params, &topography)?;

    let report = CirculationReport::build(&engine, &params, topography)?;

    let c = report.coefficients;
    println!(
        "{}: thermal_intensity={:.4} coriolis_factor={:.4} global_force={:.4}",
        report.planet_name.as_deref().unwrap_or("unnamed planet"),
        c.thermal_intensity,
        c.coriolis_factor,
        report.global_force
    );
    print_band_table(&engine, &report);
    println!(
        "overall: mean speed {:.5}, max speed {:.5}",
        report.summary.mean_speed, report.summary.max_speed
    );

    if let Some(path) = &args.output {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        fs::write(path, report.to_json()?).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
