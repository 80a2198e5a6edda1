use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

use matchtype::clipboard::SystemClipboard;
use matchtype::config::{self, Config};
use matchtype::error::MatchtypeError;
use matchtype::export;
use matchtype::selection::{Selection, Toggle};
use matchtype::session::Session;
use matchtype::types::{MatchType, OutputFormat};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MATCHTYPE_BUILD_COMMIT"),
    ")"
);

/// matchtype — expand keyword lists into broad, phrase and exact match variants.
/// Reads one keyword per line from FILE or stdin.
#[derive(Parser)]
#[command(name = "matchtype", version, long_version = LONG_VERSION, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Keyword file, one keyword per line. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Broad, phrase and exact.
    #[arg(long)]
    all: bool,

    /// Keyword unchanged.
    #[arg(long)]
    broad: bool,

    /// Keyword in double quotes.
    #[arg(long)]
    phrase: bool,

    /// Keyword in square brackets.
    #[arg(long)]
    exact: bool,

    /// Output format: text, csv or pdf.
    #[arg(long, short = 'f')]
    format: Option<OutputFormat>,

    /// Write to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,

    /// Also copy the result to the system clipboard.
    #[arg(long)]
    copy: bool,

    /// Config file (default: ~/.config/matchtype/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Interactive mode: type keywords and :commands on stdin.
    #[arg(long, short = 'i')]
    interactive: bool,

    /// More logging on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Write a default config file.
    Init {
        /// Where to write it (default: ~/.config/matchtype/config.toml).
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Shell completions
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "matchtype", &mut io::stdout());
        return;
    }

    init_logging(cli.verbose);

    if let Some(Command::Init { ref path, force }) = cli.command {
        let path = match path.clone().map_or_else(config::default_path, Ok) {
            Ok(p) => p,
            Err(reason) => {
                eprintln!("init error: {reason}");
                process::exit(1);
            }
        };
        match config::init(&path, force) {
            Ok(()) => eprintln!("✓ wrote {}", path.display()),
            Err(e) => exit_with(&e),
        }
        return;
    }

    let config = match Config::discover(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => exit_with(&e),
    };
    let selection = selection_from(&cli, &config);
    let opts = config.export_options();

    // Interactive mode: line-oriented session on stdin
    if cli.interactive {
        let mut session = Session::with_selection(selection);
        if let Some(ref file) = cli.file {
            if let Err(e) = session.load_file(file) {
                exit_with(&e);
            }
        }
        let stdout = io::stdout();
        let mut stdout = stdout.lock();
        if let Err(e) = matchtype::shell::run(
            &mut session,
            &SystemClipboard,
            &opts,
            io::stdin().lock(),
            &mut stdout,
        ) {
            eprintln!("shell error: {e}");
            process::exit(1);
        }
        return;
    }

    let text = match cli.file {
        Some(ref path) => matchtype::input::load_file(path),
        None if io::stdin().is_terminal() => {
            eprintln!("usage: matchtype [FILE] [--all|--broad|--phrase|--exact] [--format text|csv|pdf] [-o PATH]");
            process::exit(3);
        }
        None => matchtype::input::read_stdin(),
    };
    let text = match text {
        Ok(t) => t,
        Err(e) => exit_with(&e),
    };

    let now = Instant::now();
    let mut session = Session::with_selection(selection);
    session.set_input(text);
    if let Err(e) = session.submit(now) {
        exit_with(&e);
    }

    if cli.copy && session.copy_result(&SystemClipboard, now) {
        eprintln!("{}", session.copy_message(now).unwrap_or_default());
    }

    let format = cli.format.unwrap_or(config.format);
    let bytes = session.export(format, &opts);
    tracing::info!(%format, mime = format.mime(), bytes = bytes.len(), "rendered result");

    // Binary payloads never go raw onto a terminal
    let target = cli.output.or_else(|| {
        (format.is_binary() && io::stdout().is_terminal())
            .then(|| PathBuf::from(export::default_file_name(format)))
    });

    let written = match target {
        Some(ref path) => write_file(path, &bytes),
        None => io::stdout()
            .lock()
            .write_all(&bytes)
            .map_err(|e| MatchtypeError::from_io(Path::new("<stdout>"), e)),
    };
    if let Err(e) = written {
        exit_with(&e);
    }
}

/// Command-line flags win; with none given the config's defaults apply.
fn selection_from(cli: &Cli, config: &Config) -> Selection {
    if !(cli.all || cli.broad || cli.phrase || cli.exact) {
        return Selection::with_flags(config.default_flags());
    }

    let mut selection = Selection::new();
    if cli.all {
        selection.set(Toggle::All, true);
    }
    for (on, kind) in [
        (cli.broad, MatchType::Broad),
        (cli.phrase, MatchType::Phrase),
        (cli.exact, MatchType::Exact),
    ] {
        if on {
            selection.set(Toggle::Only(kind), true);
        }
    }
    selection
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), MatchtypeError> {
    std::fs::write(path, bytes).map_err(|e| MatchtypeError::from_io(path, e))?;
    eprintln!("✓ wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn exit_with(e: &MatchtypeError) -> ! {
    eprintln!("{e}");
    process::exit(e.exit_code());
}

/// Logs go to stderr so stdout stays a clean payload. `RUST_LOG` wins over -v.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "matchtype=info",
        _ => "matchtype=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
