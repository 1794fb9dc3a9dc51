mod config;
mod error;
mod report;
mod scanner;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Scan a directory tree of markdown documents and report internal links
/// whose targets do not exist on the filesystem.
#[derive(Parser)]
#[command(name = "linklint", about = "Detect broken internal links in markdown trees")]
struct Cli {
    /// Root directory to scan.
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Emit the report as compact JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Print each broken link to stderr as it is found.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Scan, then report. A completed scan always exits 0 no matter how many
/// links are broken; only a scan that cannot run at all is an error.
///
/// # Errors
///
/// Returns errors from config loading, root validation, or report
/// serialization.
fn run(cli: &Cli) -> Result<(), error::Error> {
    let config = config::Config::load(&cli.root)?;
    let stats = scanner::scan(&cli.root, &config, cli.verbose)?;

    // Diagnostics stay on stderr; the report owns stdout.
    for failure in &stats.read_failures {
        eprintln!("error processing {}: {}", failure.path.display(), failure.reason);
    }

    if cli.json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        print!("{}", report::render(&stats));
    }

    return Ok(());
}
