//! calcr - runner and REPL for calc
//!
//! Usage:
//!   calcr                       # Interactive REPL with the prelude loaded
//!   calcr lib.calc main.calc    # Load files into one session, in order
//!   calcr -e "3 4 add"          # Evaluate and print the top of stack
//!   calcr lib.calc -i           # Load, then continue interactively
//!
//! Logging goes to stderr and follows RUST_LOG (`RUST_LOG=calc=trace`
//! shows every executed word); `--verbose` forces the engine's debug output.

mod repl;

use calc::{EngineConfig, Session};
use clap::Parser as ClapParser;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "calcr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Postfix stack calculator and REPL", long_about = None)]
struct Args {
    /// Source files to load before anything else
    files: Vec<PathBuf>,

    /// Evaluate an expression and print the top of the stack
    #[arg(short = 'e', long = "eval", value_name = "EXPR")]
    expr: Option<String>,

    /// Start the REPL even after loading files or evaluating -e
    #[arg(short, long)]
    interactive: bool,

    /// Start without the standard word library
    #[arg(long)]
    no_prelude: bool,

    /// Engine configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum nesting of words and quotations
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Log engine activity (definitions, prelude loading) to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match engine_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    debug!(?config, "starting session");

    let mut session = match Session::with_config(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error loading prelude: {}", e);
            std::process::exit(1);
        }
    };

    for path in &args.files {
        if let Err(e) = load_file(&mut session, path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if let Some(expr) = &args.expr {
        match session.evaluate_line(expr) {
            Ok(stack) => {
                if let Some(top) = stack.last() {
                    println!("{}", top);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    let batch = !args.files.is_empty() || args.expr.is_some();
    if args.interactive || !batch {
        repl::run(&mut session);
    }
}

/// Install the stderr subscriber
fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// `--verbose` forces engine debug output; otherwise RUST_LOG decides,
/// falling back to warnings only when it is unset, empty or unparsable
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("calc=debug");
    }
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("calc=warn"))
}

/// Config file first, then command-line overrides
fn engine_config(args: &Args) -> Result<EngineConfig, String> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .map_err(|e| format!("{}: {}", path.display(), e))?,
        None => EngineConfig::default(),
    };
    if args.no_prelude {
        config = config.with_prelude(false);
    }
    if let Some(depth) = args.max_depth {
        if depth == 0 {
            return Err("--max-depth must be at least 1".to_string());
        }
        config = config.with_max_depth(depth);
    }
    Ok(config)
}

/// Read a source file and evaluate it in the session
pub(crate) fn load_file(session: &mut Session, path: &std::path::Path) -> Result<(), String> {
    let source = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    session
        .load(&source)
        .map_err(|e| format!("{}: {}", path.display(), e))
}
