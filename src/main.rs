use assessor::{GeneratorConfig, ReportError, ReportGenerator};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Render a vehicle damage assessment JSON file into a PDF report.
#[derive(Parser, Debug)]
#[command(name = "assessor", version, about)]
struct Cli {
    /// Report input: a JSON object with a `data` member
    input: PathBuf,

    /// Directory the report is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Generator configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the font, logo and QR code paths are resolved against
    #[arg(short, long)]
    assets: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<PathBuf, ReportError> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(dir) = cli.assets {
        config = config.with_asset_dir(dir);
    }

    log::info!("Loading report data from {}", cli.input.display());
    let json = fs::read_to_string(&cli.input)?;

    let generator = ReportGenerator::new(config)?;
    generator.generate_report_json(&json, &cli.output_dir)
}
