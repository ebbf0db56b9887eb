use clap::Parser;
use std::path::PathBuf;

use cardcut::config::{DEFAULT_FILENAME_PATTERN, DEFAULT_MIN_AREA_FRACTION};
use cardcut::{ExtractConfig, FsCardWriter, WritePolicy, extract_cards};

#[derive(Parser)]
#[command(name = "cardcut")]
#[command(about = "Find rectangular cards in a photo and save each one upright")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Folder receiving the extracted cards (created if missing)
    #[arg(short, long, value_name = "DIR", default_value = "extracted_cards")]
    output: PathBuf,

    /// Minimum contour area as a fraction of the image area
    #[arg(long, default_value_t = DEFAULT_MIN_AREA_FRACTION)]
    min_area_fraction: f64,

    /// Output file name, `{index}` is replaced by the card number
    #[arg(long, default_value = DEFAULT_FILENAME_PATTERN)]
    pattern: String,

    /// Abort on the first card that cannot be written
    #[arg(long)]
    strict: bool,

    /// Save intermediate stages to this directory
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let policy = if args.strict {
        WritePolicy::Strict
    } else {
        WritePolicy::BestEffort
    };

    let mut config = ExtractConfig::new(args.image_path, args.output)
        .with_min_area_fraction(args.min_area_fraction)
        .with_filename_pattern(args.pattern)
        .with_write_policy(policy);
    if let Some(debug_dir) = args.debug_out {
        config = config.with_debug(debug_dir);
    }

    let report = extract_cards(&config, &FsCardWriter)?;

    println!("Extracted {} card(s) into {}", report.written.len(), config.output_folder.display());
    if !report.failed.is_empty() {
        println!("{} card(s) could not be written:", report.failed.len());
        for (path, reason) in &report.failed {
            println!("  {}: {}", path.display(), reason);
        }
    }

    Ok(())
}
