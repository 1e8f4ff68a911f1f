use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use splitzip_lib::{Config, ExtractOptions, PackOptions, ProgressCallback};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "splitzip")]
#[command(author, version, about = "A size-bounded zip packer and extractor", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack files or a folder into one or more zip archives
    Pack {
        /// A folder to pack recursively, or individual files to pack flat
        inputs: Vec<PathBuf>,

        /// Output archive path (volumes get a _<N> suffix when splitting)
        #[arg(short, long)]
        output: PathBuf,

        /// Maximum uncompressed MB per archive (0 means no splitting)
        #[arg(short = 's', long)]
        size_limit: Option<u64>,
    },

    /// Extract a zip archive
    Unpack {
        /// Archive file to extract
        archive: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extract into a subfolder named after the archive
        #[arg(long)]
        subfolder: bool,
    },

    /// List archive contents
    List {
        /// Archive file to list
        archive: PathBuf,
    },

    /// Show configuration
    Config {
        /// Show the configuration file path instead of its contents
        #[arg(long)]
        path: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Drives an indicatif bar from the library's per-entry events. The bar is
/// created on the first event and re-sized when a new volume starts.
struct CliProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl ProgressCallback for CliProgress {
    fn progress(&self, completed: u64, total: u64) {
        if let Ok(mut guard) = self.bar.lock() {
            let bar = guard.get_or_insert_with(|| {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("[{bar:40.cyan/blue}] {pos}/{len} files")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
                bar
            });
            bar.set_length(total);
            bar.set_position(completed);
        }
    }
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Error: {}", e);
            process::exit(map_error_to_exit_code(&e));
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    let config = Config::load_or_default();

    match cli.command {
        Commands::Pack {
            inputs,
            output,
            size_limit,
        } => {
            let size_limit = match size_limit {
                Some(0) => None,
                Some(mb) => Some(mb * 1024 * 1024),
                None => config.default_size_limit_bytes(),
            };
            let options = PackOptions {
                size_limit,
                ..Default::default()
            };

            let progress = CliProgress::new();
            let result = if inputs.len() == 1 && inputs[0].is_dir() {
                splitzip_lib::pack_dir(&inputs[0], &output, options, &progress)
            } else {
                splitzip_lib::pack_paths(&inputs, &output, options, &progress)
            };
            progress.clear();

            match result {
                Ok(result) => {
                    info!(
                        "Packed {} files ({} bytes) into {} archive(s)",
                        result.entries_written,
                        result.bytes_written,
                        result.archives.len()
                    );
                }
                // Soft outcome: tell the user, do not fail the process
                Err(splitzip_lib::Error::EmptySource) => {
                    warn!("Nothing to pack: the selected source contains no files");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Unpack {
            archive,
            output,
            subfolder,
        } => {
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            let options = ExtractOptions {
                create_subfolder: subfolder || config.create_subfolder,
                ..Default::default()
            };

            let progress = CliProgress::new();
            let result = splitzip_lib::extract(&archive, &output_dir, options, &progress);
            progress.clear();

            let result = result?;
            info!(
                "Extracted {} entries ({} bytes) to {}",
                result.entries_extracted,
                result.bytes_written,
                result.destination.display()
            );
        }

        Commands::List { archive } => {
            let entries = splitzip_lib::list(&archive)?;

            println!("{:<50} {:>12} {:>12}", "Name", "Size", "Compressed");
            println!("{}", "-".repeat(76));
            for entry in entries {
                println!(
                    "{:<50} {:>12} {:>12}",
                    entry.name, entry.size, entry.compressed_size
                );
            }
        }

        Commands::Config { path } => {
            if path {
                println!("{}", Config::config_path()?.display());
            } else {
                let contents = toml::to_string_pretty(&config)?;
                print!("{}", contents);
            }
        }
    }

    Ok(0)
}

/// Map errors to exit codes:
/// - 0: success (including the soft empty-source outcome)
/// - 1: general error
/// - 2: IO error
/// - 3: invalid arguments or missing inputs
/// - 4: archive errors, including unsafe entry names
fn map_error_to_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(lib_err) = err.downcast_ref::<splitzip_lib::Error>() {
        match lib_err {
            splitzip_lib::Error::Io(_) => 2,
            splitzip_lib::Error::NotFound(_) => 3,
            splitzip_lib::Error::InvalidBudget => 3,
            splitzip_lib::Error::InvalidArchive(_) => 4,
            splitzip_lib::Error::UnsafePath(_) => 4,
            splitzip_lib::Error::EmptySource => 0,
            splitzip_lib::Error::Cancelled => 1,
            splitzip_lib::Error::Config(_) => 1,
        }
    } else if err.is::<std::io::Error>() {
        2
    } else {
        1
    }
}
