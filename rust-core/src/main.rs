use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use kpoint_lattice::input::GeneratorInput;
use kpoint_lattice::kpoints::KPointGridReport;
use kpoint_lattice::GammaPolicy;

#[derive(Parser)]
#[command(name = "kpoint-lattice")]
#[command(about = "Generalized Monkhorst-Pack k-point grids with the fewest irreducible points")]
#[command(version)]
struct Cli {
    /// Crystal and search settings (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Minimum periodic distance of the superlattice (overrides the file)
    #[arg(short = 'd', long)]
    min_distance: Option<f64>,

    /// Minimum total number of k-points (overrides the file)
    #[arg(short = 'n', long)]
    min_size: Option<usize>,

    /// Whether the grid must contain Gamma (overrides the file)
    #[arg(short, long, value_enum)]
    gamma: Option<GammaArg>,

    /// Enable the scale-factor escalation (needs space_group in the file)
    #[arg(long)]
    scale_factor: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "kpoints")]
    format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum GammaArg {
    Always,
    Never,
    Auto,
}

impl From<GammaArg> for GammaPolicy {
    fn from(arg: GammaArg) -> Self {
        match arg {
            GammaArg::Always => GammaPolicy::Always,
            GammaArg::Never => GammaPolicy::Never,
            GammaArg::Auto => GammaPolicy::Auto,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// VASP KPOINTS explicit list
    Kpoints,
    /// JSON report
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting kpoint-lattice v{}", kpoint_lattice::VERSION);

    let mut input = GeneratorInput::from_file(&cli.config)
        .with_context(|| format!("failed to read {}", cli.config.display()))?;
    if let Some(min_distance) = cli.min_distance {
        input.search.min_distance = min_distance;
    }
    if let Some(min_size) = cli.min_size {
        input.search.min_total_kpoints = min_size;
    }
    if let Some(gamma) = cli.gamma {
        input.search.include_gamma = gamma.into();
    }
    input.search.use_scale_factor |= cli.scale_factor;
    input.validate().context("invalid search settings")?;

    let generator = input.build_generator().context("failed to set up the generator")?;
    info!(
        "Searching with min distance {} and at least {} k-points (gamma: {})",
        input.search.min_distance, input.search.min_total_kpoints, input.search.include_gamma
    );
    let lattice = generator
        .get_kpoint_lattice(input.search.min_distance, input.search.min_total_kpoints)
        .context("k-point search failed")?;
    info!(
        "Found {} distinct of {} total k-points, periodic distance {:.6}",
        lattice.num_distinct_kpoints(),
        lattice.num_total_kpoints(),
        lattice.min_periodic_distance()
    );

    let rendered = match cli.format {
        OutputFormat::Kpoints => lattice.to_kpoints_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&KPointGridReport::from(&lattice))?,
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
