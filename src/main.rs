use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use catalog_dash::data::loader;
use catalog_dash::{ContentType, Dashboard, DashboardConfig, Selectors};

const CONFIG_FILE: &str = "catalog-dash.json";

#[derive(Parser, Debug)]
#[command(name = "catalog-dash")]
#[command(about = "Aggregate a media catalog into dashboard tables (JSON on stdout)")]
struct Args {
    /// Catalog file (.csv, .json or .parquet)
    #[arg(default_value = "netflix_titles.csv")]
    data_file: PathBuf,

    /// Type shown on the country map ("Movie" or "TV Show")
    map_type: Option<ContentType>,

    /// Movie → duration scatter, TV Show → season counts
    duration_type: Option<ContentType>,

    /// Type shown on the country × genre heatmap
    heatmap_type: Option<ContentType>,
}

impl Args {
    fn selectors(&self) -> Selectors {
        let defaults = Selectors::default();
        Selectors {
            map_type: self.map_type.unwrap_or(defaults.map_type),
            duration_type: self.duration_type.unwrap_or(defaults.duration_type),
            heatmap_type: self.heatmap_type.unwrap_or(defaults.heatmap_type),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = Path::new(CONFIG_FILE);
    let config = if config_path.exists() {
        log::info!("Using config {}", config_path.display());
        DashboardConfig::from_file(config_path)?
    } else {
        DashboardConfig::default()
    };

    let catalog = loader::load(&args.data_file)
        .with_context(|| format!("loading catalog {}", args.data_file.display()))?;

    let dashboard = Dashboard::build(&catalog, &args.selectors(), &config);
    println!("{}", dashboard.to_json().context("serialising dashboard")?);
    Ok(())
}
