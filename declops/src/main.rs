use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use declops_encryption::{AesGcmState, Disabled, StateEncryption, SymmetricKey};

fn main() {
    let args = Args::parse();
    handle_result(run_args(args));
}

fn run_args(args: Args) -> Result<()> {
    set_up_logging(&args.options)?;
    match &args.command {
        Commands::State(sub) => match sub {
            State::Show { file } => state_show(&args.options, file),
            State::Upgrade { file, output } => state_upgrade(&args.options, file, output.as_deref()),
        },
    }
}

fn set_up_logging(options: &Options) -> Result<()> {
    let level = if options.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to set up tracing: {}", e))?;
    Ok(())
}

/// The encryption capability selected by the command line: AES-256-GCM when a
/// key file is given, passthrough otherwise.
fn encryption_for(options: &Options) -> Result<Box<dyn StateEncryption>> {
    match &options.key_file {
        Some(path) => {
            let hex = fs::read_to_string(path)
                .with_context(|| format!("reading key file {}", path.display()))?;
            let key = SymmetricKey::from_hex(&hex)
                .with_context(|| format!("parsing key file {}", path.display()))?;
            Ok(Box::new(AesGcmState::new(&key)))
        }
        None => Ok(Box::new(Disabled)),
    }
}

fn read_state_file(options: &Options, file: &Path) -> Result<declops_state::StateFile> {
    let encryption = encryption_for(options)?;
    let source =
        fs::File::open(file).with_context(|| format!("opening state file {}", file.display()))?;
    declops_state::read(source, encryption.as_ref())
        .with_context(|| format!("reading state from {}", file.display()))
}

fn state_show(options: &Options, file: &Path) -> Result<()> {
    let state = read_state_file(options, file)?;
    let rendered = declops_state::encode(&state)?;
    std::io::stdout().write_all(&rendered)?;
    Ok(())
}

fn state_upgrade(options: &Options, file: &Path, output: Option<&Path>) -> Result<()> {
    let state = read_state_file(options, file)?;

    let encryption = encryption_for(options)?;
    let mut buf = Vec::new();
    declops_state::write(&state, &mut buf, encryption.as_ref())?;

    let dest = output.unwrap_or(file);
    fs::write(dest, &buf).with_context(|| format!("writing state to {}", dest.display()))?;
    tracing::info!(
        dest = %dest.display(),
        version = declops_state::CURRENT_VERSION,
        "wrote state"
    );
    Ok(())
}

fn handle_result(r: Result<()>) {
    match r {
        Ok(()) => {}
        Err(e) => {
            eprintln!("declops error: {}, {}", e.root_cause(), e);
            exit(1);
        }
    }
}

/// declops: manage resources declaratively
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: Options,
}

#[derive(Parser, Debug, Clone)]
struct Options {
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// File holding the hex-encoded 256-bit state encryption key
    #[arg(long, global = true, value_name = "PATH")]
    key_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Commands that operate on the state file
    #[command(subcommand)]
    State(State),
}

#[derive(Subcommand, Debug)]
enum State {
    /// Print a state file, upgraded to the current schema version
    Show {
        /// The state file to read
        file: PathBuf,
    },
    /// Rewrite a state file at the current schema version
    Upgrade {
        /// The state file to read
        file: PathBuf,

        /// Where to write the result; defaults to rewriting in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
