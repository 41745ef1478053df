use std::process::ExitCode;

use clap::Parser;
use mandelforge_core::{Mode, RenderConfig};
use tracing::{error, info};

/// Renders a Mandelbrot set to a 24-bpp BMP file using Mariani-Silver
/// adaptive subdivision and boundary-seeking anti-aliasing.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image width in pixels
    #[arg(long, default_value_t = RenderConfig::DEFAULT_WIDTH)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = RenderConfig::DEFAULT_HEIGHT)]
    height: u32,

    /// Left bound of the viewport on the real axis
    #[arg(long, default_value_t = -2.5, allow_hyphen_values = true)]
    xmin: f64,

    /// Right bound of the viewport on the real axis
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    xmax: f64,

    /// Bottom bound of the viewport on the imaginary axis
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    ymin: f64,

    /// Top bound of the viewport on the imaginary axis
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    ymax: f64,

    /// Escape budget per pixel
    #[arg(long, default_value_t = mandelforge_core::ClassifierParams::DEFAULT_ITERATIONS)]
    iterations: u32,

    /// Ceiling on the period probed for by the classifier
    #[arg(long, default_value_t = mandelforge_core::ClassifierParams::DEFAULT_MAX_PERIOD)]
    max_period: u32,

    /// Disable boundary-seeking anti-aliasing
    #[arg(long)]
    no_aa: bool,

    /// Samples per jittered AA pixel
    #[arg(long, default_value_t = RenderConfig::DEFAULT_AA_SAMPLES)]
    aa_samples: u32,

    /// AA halo radius in pixels
    #[arg(long, default_value_t = RenderConfig::DEFAULT_BORDER_RADIUS)]
    border_radius: u32,

    /// Worker thread count per phase; defaults to hardware concurrency
    #[arg(long)]
    threads: Option<usize>,

    /// Classification algorithm
    #[arg(long, value_enum, default_value_t = ModeArg::Mariani)]
    mode: ModeArg,

    /// BMP output path
    #[arg(long, default_value = "test.bmp")]
    output_path: String,

    /// Dump the resolved configuration as JSON to stdout instead of rendering
    #[arg(long)]
    dump_config: bool,

    /// Load configuration from a JSON file, overriding all other options
    #[arg(long, value_name = "PATH")]
    config: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ModeArg {
    BruteForce,
    Mariani,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::BruteForce => Mode::BruteForce,
            ModeArg::Mariani => Mode::Mariani,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if cli.dump_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => {
                println!("{json}");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                error!(%err, "failed to serialize config");
                return ExitCode::FAILURE;
            }
        }
    }

    info!("mandelforge starting");
    match mandelforge_render::render(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "render failed");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<RenderConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        let text = std::fs::read_to_string(path)?;
        let config: RenderConfig = serde_json::from_str(&text)?;
        return Ok(config);
    }

    let threads = cli
        .threads
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));

    let config = RenderConfig::new(
        cli.width,
        cli.height,
        cli.xmin,
        cli.xmax,
        cli.ymin,
        cli.ymax,
        cli.iterations,
        cli.max_period,
        !cli.no_aa,
        cli.aa_samples,
        cli.border_radius,
        threads,
        cli.mode.into(),
        cli.output_path.clone(),
    )?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_resolve_to_a_valid_config() {
        let cli = Cli::parse_from(["mandelforge"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.width, RenderConfig::DEFAULT_WIDTH);
        assert_eq!(config.mode, Mode::Mariani);
    }

    #[test]
    fn no_aa_flag_disables_anti_aliasing() {
        let cli = Cli::parse_from(["mandelforge", "--no-aa"]);
        let config = resolve_config(&cli).unwrap();
        assert!(!config.aa);
    }
}
