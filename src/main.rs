//! docsplice: rewrite doc comments in a source tree in place.
//!
//! - `docsplice params`: `* name - description` → `* @param name description`
//!   inside `* Parameters:` sections of every `.js` file below the root.
//! - `docsplice inject`: replace class and member doc blocks in
//!   `<dir>/<file>.{js,ts}` with content from `definitions.json`.

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use docsplice::defs::Definitions;
use docsplice::params::NameCharset;
use docsplice::run::{self, InjectConfig, ParamsConfig, RunReport};
use docsplice::tree::{FsTree, Selection};
use std::path::PathBuf;
use tracing::{info, Level};

/// Definition file looked up in the root when `--defs` is not given.
const DEFAULT_DEFS_FILE: &str = "definitions.json";

#[derive(Parser)]
#[command(
    name = "docsplice",
    about = "Normalize parameter docs and inject external doc blocks in place"
)]
struct Cli {
    /// Log each rewritten file and a summary
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite `name - description` lines in Parameters: sections into @param tags
    Params {
        /// Directory to scan recursively
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// File extension to process
        #[arg(long, default_value = "js")]
        ext: String,

        /// Accept the historical `[0-9A-z_]` name range, which also admits
        /// `[ \ ] ^` and the backtick
        #[arg(long)]
        legacy_name_range: bool,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace class and member doc blocks with content from a definition file
    Inject {
        /// Directory whose subdirectories hold the source files
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Definition file (default: <root>/definitions.json)
        #[arg(long)]
        defs: Option<PathBuf>,

        /// Number of path segments below the root a file must sit at
        #[arg(long, default_value_t = 2)]
        depth: usize,

        /// File extensions to process (repeatable)
        #[arg(long = "ext", default_values = ["js", "ts"])]
        extensions: Vec<String>,

        /// Keep processing after a file fails; report all failures at the end
        #[arg(long)]
        keep_going: bool,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Params {
            root,
            ext,
            legacy_name_range,
            dry_run,
        } => {
            let config = ParamsConfig {
                selection: Selection::recursive(&[ext]),
                charset: if legacy_name_range {
                    NameCharset::Legacy
                } else {
                    NameCharset::Strict
                },
                dry_run,
            };
            let tree = FsTree::new(&root);
            let report = run::run_params(&tree, &config)
                .with_context(|| format!("params pass failed under {}", root.display()))?;
            log_report("params", &report);
        }
        Command::Inject {
            root,
            defs,
            depth,
            extensions,
            keep_going,
            dry_run,
        } => {
            ensure!(depth >= 1, "--depth must be at least 1");
            let defs_path = defs.unwrap_or_else(|| root.join(DEFAULT_DEFS_FILE));
            // A malformed table must abort before any file is touched.
            let defs = Definitions::load(&defs_path)?;
            info!(path = %defs_path.display(), symbols = defs.len(), "loaded definitions");

            let config = InjectConfig {
                selection: Selection::at_depth(depth, &extensions),
                keep_going,
                dry_run,
            };
            let tree = FsTree::new(&root);
            let report = run::run_inject(&tree, &defs, &config)
                .with_context(|| format!("inject pass failed under {}", root.display()))?;
            log_report("inject", &report);
        }
    }

    Ok(())
}

fn log_report(pass: &str, report: &RunReport) {
    info!(
        pass,
        scanned = report.scanned,
        targeted = report.targeted,
        rewritten = report.rewritten,
        replaced = report.replaced,
        missed = report.missed,
        "done"
    );
}
