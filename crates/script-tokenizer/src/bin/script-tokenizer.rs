/// script-tokenizer CLI

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use script_tokenizer::{RunOptions, Tokenizer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "script-tokenizer")]
#[command(about = "Replaces tokens in scripts with values from a token file, optionally running the results")]
#[command(version)]
struct Args {
    /// Overwrite any existing generated files
    #[arg(long)]
    clobber: bool,

    /// Place generated files in this directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Execute the generated files once all of them are written
    #[arg(long)]
    execute_scripts: bool,

    /// With --execute-scripts, stop at the first script that exits unsuccessfully
    #[arg(long)]
    break_on_error: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Token file with a [script-tokenizer] section of NAME = value entries
    #[arg(value_name = "TOKEN_FILE")]
    token_file: PathBuf,

    /// Scripts to tokenize
    #[arg(value_name = "SCRIPT", required = true)]
    scripts: Vec<PathBuf>,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and count as success
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logging(args.verbose);

    let mut options = RunOptions::new(args.token_file, args.scripts)
        .clobber(args.clobber)
        .execute_scripts(args.execute_scripts)
        .break_on_error(args.break_on_error);

    if let Some(dir) = args.output_dir {
        options = options.output_dir(dir);
    }

    match Tokenizer::new(options).run() {
        Ok(summary) => {
            tracing::debug!(
                "Generated {} files, executed {}",
                summary.generated.len(),
                summary.executions.len()
            );
        }
        Err(e) => {
            eprintln!("error: {}. Aborting.", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
