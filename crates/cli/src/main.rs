use std::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use log::LevelFilter;

use bias_report::RenderOptions;

const USAGE: &str = "Usage: generate_report <json_data> <output_path>";

/// Renders a resume bias-audit result into a PDF report.
///
/// Fonts are looked up in `--fonts-dir`, `BIAS_REPORT_FONTS_DIR`, `assets/fonts` next to the
/// binary, and common system font directories, in that order.
#[derive(Parser, Debug)]
#[command(author, version, about = "Render a bias-audit report to PDF")]
struct Cli {
    /// Analysis report as JSON text, or `-` to read it from stdin.
    json_data: String,

    /// Destination of the generated PDF.
    output_path: PathBuf,

    /// Directory searched for fonts before the default locations.
    #[arg(long, value_name = "DIR")]
    fonts_dir: Option<PathBuf>,

    /// Extra positional arguments are accepted and ignored.
    #[arg(hide = true)]
    extra: Vec<String>,
}

fn main() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("BIAS_REPORT_LOG", "warn"))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            log::debug!("Argument parsing failed: {}", err);
            println!("{}", USAGE);
            process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if !cli.extra.is_empty() {
        log::debug!("Ignoring {} extra argument(s)", cli.extra.len());
    }

    let json_text = if cli.json_data == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cli.json_data
    };

    let options = RenderOptions::new().with_fonts_dir(cli.fonts_dir);
    bias_report::render_with_options(&json_text, &cli.output_path, &options)?;
    log::info!("Generated {}", cli.output_path.display());
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
