use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use depose_prune::Config;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "depose")]
#[command(about = "Find and remove unused dependencies from package.json", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Remove dependencies that no project file references
    Prune(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Prune(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Running unused dependency check (using {} threads)", num_threads);
            debug!(
                "Config: root={:?}, manifest={:?}, dry_run={}",
                cfg.root, cfg.manifest, cfg.dry_run
            );

            let result = depose_prune::run_prune_check(cfg.clone())?;
            debug!("Found {} unused dependencies", result.removed.len());

            let elapsed_ms = start.elapsed().as_millis();

            if result.removed.is_empty() {
                depose_prune::print_nothing_to_remove(&mut stdout, &result)?;
            } else {
                depose_prune::print_removed(&mut stdout, &result, cfg.dry_run)?;
            }

            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.files_scanned.to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            Ok(())
        }
    }
}
