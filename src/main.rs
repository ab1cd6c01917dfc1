use anyhow::{Context, anyhow};
use clap::Parser;
use env_logger::Env;
use geotally::observations::{INaturalistSource, ObservationQuery, ObservationSource};
use geotally::{Config, RegionIndex, assign, assign_indexed, load_regions, report};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Count observations of a taxon per region of a GeoJSON file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// GeoJSON FeatureCollection with Polygon/MultiPolygon regions
    #[arg(long)]
    geojson: PathBuf,

    /// Write per-region counts as CSV
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// TOML file with fetch settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    taxon: Option<String>,

    /// Start date, YYYY-MM-DD
    #[arg(long)]
    from: Option<String>,

    /// End date, YYYY-MM-DD
    #[arg(long)]
    to: Option<String>,

    /// Use an R-tree over region bounds instead of a linear scan
    #[arg(long)]
    indexed: bool,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(taxon) = &self.taxon {
            config.taxon = taxon.clone();
        }
        if let Some(from) = &self.from {
            config.start_date = from.clone();
        }
        if let Some(to) = &self.to {
            config.end_date = to.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "toml")]
fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::from_file(path).with_context(|| format!("loading config {}", path.display()))
}

#[cfg(not(feature = "toml"))]
fn load_config(path: &Path) -> anyhow::Result<Config> {
    Err(anyhow!(
        "cannot read {}: built without the `toml` feature",
        path.display()
    ))
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.resolve_config()?;

    let regions = load_regions(&args.geojson)
        .with_context(|| format!("loading regions from {}", args.geojson.display()))?;
    let bounds = regions
        .bounds()
        .ok_or_else(|| anyhow!("regions in {} have no coordinates", args.geojson.display()))?;
    info!(
        "Loaded {} regions, bounds ({:.6}, {:.6}) to ({:.6}, {:.6})",
        regions.len(),
        bounds.min_x(),
        bounds.min_y(),
        bounds.max_x(),
        bounds.max_y()
    );

    let query = ObservationQuery::from_config(&config, bounds);
    let source = INaturalistSource::from_config(config.clone())?;
    let points = source.fetch(&query).context("fetching observations")?;

    let tally = if args.indexed {
        assign_indexed(&RegionIndex::new(&regions), points)
    } else {
        assign(&regions, points)
    };
    info!(
        "Assigned {} of {} points ({} outside every region)",
        tally.assigned,
        tally.total_points(),
        tally.unassigned
    );

    println!("{}", report::summary(&tally, &config));

    if let Some(out) = &args.out {
        report::write_csv_file(&tally.counts, out)
            .with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Fatal: {e:#}");
            ExitCode::from(2)
        }
    }
}
