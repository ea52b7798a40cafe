use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TreeHost {
        config_path: Option<String>,
        output_dir: Option<String>,
        limit: Option<usize>,
        base_url: Option<String>,
    },
    ObjectStore {
        config_path: Option<String>,
        output_dir: Option<String>,
        assume_yes: bool,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "lexfetch",
    version,
    author = "Nick Guletskii",
    about = "Mirror bulk legal-data archives from static file-tree hosts and object-storage buckets"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file (TOML, YAML or JSON)",
        global = true
    )]
    config: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Crawl a static file tree and download every reporter's archives
    TreeHost {
        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Output directory (default: caselaw_downloads)"
        )]
        output_dir: Option<String>,

        #[arg(
            short = 'l',
            long = "limit",
            value_name = "N",
            help = "Limit number of reporters to process"
        )]
        limit: Option<usize>,

        #[arg(
            long = "base-url",
            value_name = "URL",
            help = "Root listing URL (default: https://static.case.law/)"
        )]
        base_url: Option<String>,
    },

    /// Discover archives in an object-storage bucket listing and download them
    ObjectStore {
        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Output directory (default: courtlistener_downloads)"
        )]
        output_dir: Option<String>,

        #[arg(
            short = 'y',
            long = "yes",
            help = "Download without asking for confirmation"
        )]
        assume_yes: bool,
    },
}

fn init_tracing(log_level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();
}

fn into_command(cli: Cli) -> Command {
    let config_path = cli.config;
    match cli.command {
        CliCommand::TreeHost {
            output_dir,
            limit,
            base_url,
        } => Command::TreeHost {
            config_path,
            output_dir,
            limit,
            base_url,
        },
        CliCommand::ObjectStore {
            output_dir,
            assume_yes,
        } => Command::ObjectStore {
            config_path,
            output_dir,
            assume_yes,
        },
    }
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    init_tracing(log_level);

    Args {
        command: into_command(cli),
        log_level,
    }
}
