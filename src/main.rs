//! iam-working: keep a project looking busy
//!
//! Opens random project files and moves the caret around in them, the way
//! someone skimming code would.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::types::TypesAction;

#[derive(Parser)]
#[command(name = "iam-working")]
#[command(about = "Simulates code-browsing activity in a project", long_about = None)]
#[command(version)]
struct Cli {
    /// Log scheduler decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start browsing; press Enter to stop
    Start {
        /// Project path (defaults to the current directory)
        project_path: Option<String>,

        /// Stop by itself after this many seconds (0 = wait for Enter)
        #[arg(short, long, default_value_t = 0)]
        duration: u64,

        /// File types to open, comma separated (overrides saved settings)
        #[arg(short, long, value_delimiter = ',')]
        ext: Vec<String>,
    },

    /// List the files that could be opened
    Scan {
        /// Project path (defaults to the current directory)
        project_path: Option<String>,

        /// File types to match, comma separated (overrides saved settings)
        #[arg(short, long, value_delimiter = ',')]
        ext: Vec<String>,
    },

    /// Choose which file types get opened
    Types {
        #[command(subcommand)]
        action: Option<TypesCommand>,
    },
}

#[derive(Subcommand)]
enum TypesCommand {
    /// Show file types by category (default)
    List,

    /// Enable file types
    Enable {
        #[arg(required = true)]
        extensions: Vec<String>,
    },

    /// Disable file types
    Disable {
        #[arg(required = true)]
        extensions: Vec<String>,
    },

    /// Enable every listed file type
    All,

    /// Disable every listed file type
    Clear,

    /// Reset listed file types to the defaults
    Default,

    /// Print where settings are stored
    Path,
}

impl From<TypesCommand> for TypesAction {
    fn from(cmd: TypesCommand) -> Self {
        match cmd {
            TypesCommand::List => Self::List,
            TypesCommand::Enable { extensions } => Self::Enable(extensions),
            TypesCommand::Disable { extensions } => Self::Disable(extensions),
            TypesCommand::All => Self::All,
            TypesCommand::Clear => Self::Clear,
            TypesCommand::Default => Self::Default,
            TypesCommand::Path => Self::Path,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "iam_working=debug"
    } else {
        "iam_working=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Start {
            project_path,
            duration,
            ext,
        } => {
            let options = commands::start::StartOptions {
                project: project_path,
                duration: commands::start::parse_duration(duration),
                extensions: ext,
            };
            commands::start::execute(options)?;
        }

        Commands::Scan { project_path, ext } => {
            commands::scan::execute(project_path.as_deref(), &ext)?;
        }

        Commands::Types { action } => {
            let action = action.map(TypesAction::from).unwrap_or(TypesAction::List);
            commands::types::execute(action)?;
        }
    }

    Ok(())
}
