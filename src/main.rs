//! coresched — manage Linux core scheduling cookies for tasks.
//!
//! Usage:
//!   coresched get    -s PID                  → print a task's cookie
//!   coresched create -s PID [-t TYPE]        → give a task a new cookie
//!   coresched copy   -s PID -d PID [-t TYPE] → copy a cookie between tasks
//!   coresched exec   [-s PID] -- PROGRAM [ARGS...]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coresched::cookie::PrctlCookie;
use coresched::dispatch;
use coresched::parser::{validate, RawArgs};
use coresched::types::CommandKind;

#[derive(Parser)]
#[command(
    name = "coresched",
    about = "Manage core scheduling cookies for tasks",
    version = env!("CARGO_PKG_VERSION"),
    long_about = "Tasks sharing a core scheduling cookie may run concurrently\n\
                  on sibling hardware threads of the same physical core.\n\
                  This tool reads, mints, and transfers those cookies."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the core scheduling cookie of a task
    Get {
        /// Source task of the core scheduling cookie
        #[arg(short, long, allow_hyphen_values = true)]
        source: Option<String>,
    },
    /// Give a task a fresh core scheduling cookie
    Create {
        /// Task to create the cookie for
        #[arg(short, long, allow_hyphen_values = true)]
        source: Option<String>,
        /// Grouping the cookie applies to: pid, tgid or pgid (default pgid)
        #[arg(short = 't', long = "type")]
        scope: Option<String>,
    },
    /// Copy the core scheduling cookie from one task to another
    Copy {
        /// Task to copy the cookie from
        #[arg(short, long, allow_hyphen_values = true)]
        source: Option<String>,
        /// Task to copy the cookie to
        #[arg(short, long, allow_hyphen_values = true)]
        dest: Option<String>,
        /// Grouping the cookie applies to on the destination side
        #[arg(short = 't', long = "type")]
        scope: Option<String>,
    },
    /// Run a program under a core scheduling cookie
    Exec {
        /// Task to adopt the cookie from (a fresh one is created if omitted)
        #[arg(short, long, allow_hyphen_values = true)]
        source: Option<String>,
        /// Program and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        argv: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let (kind, raw) = match cli.command {
        Commands::Get { source } => (
            CommandKind::Get,
            RawArgs {
                source,
                ..Default::default()
            },
        ),
        Commands::Create { source, scope } => (
            CommandKind::Create,
            RawArgs {
                source,
                scope,
                ..Default::default()
            },
        ),
        Commands::Copy {
            source,
            dest,
            scope,
        } => (
            CommandKind::Copy,
            RawArgs {
                source,
                dest,
                scope,
                ..Default::default()
            },
        ),
        Commands::Exec { source, argv } => (
            CommandKind::Exec,
            RawArgs {
                source,
                argv,
                ..Default::default()
            },
        ),
    };

    let invocation = match validate(kind, raw) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("coresched: {err}");
            std::process::exit(err.exit_code());
        }
    };

    if let Err(err) = dispatch::run(&PrctlCookie, invocation) {
        eprintln!("coresched: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coresched=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
