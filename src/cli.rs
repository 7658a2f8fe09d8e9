use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prelovium")]
#[command(
    version,
    about = "Prelovium client - turn item photos into a second-hand listing",
    long_about = "Prelovium client\n\nModes:\n- example: process one of the backend's example items.\n- upload: upload your own primary/secondary/label photos.\n- render: render a metadata JSON file as the online ad, offline.\n- examples: list the known example identifiers.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) for server/currency/messages; CLI flags override config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Backend base URL (overrides PRELOVIUM_SERVER and the config file)"
    )]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process one of the backend's example items
    Example {
        #[arg(help = "Example identifier (e.g., jacket)")]
        example: String,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Upload your own photos for processing
    Upload {
        #[arg(long, value_name = "PATH", help = "Front photo (png, jpg, jpeg)")]
        primary: Option<PathBuf>,

        #[arg(long, value_name = "PATH", help = "Back or detail photo (png, jpg, jpeg)")]
        secondary: Option<PathBuf>,

        #[arg(long, value_name = "PATH", help = "Brand/size label photo (png, jpg, jpeg)")]
        label: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Render a metadata JSON file as the online ad
    Render {
        #[arg(help = "Path to a metadata JSON object (or a full /process response)")]
        metadata: PathBuf,

        #[arg(long, help = "Also produce the plain-text markdown listing")]
        markdown: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// List the known example identifiers
    Examples {
        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
    Html,
}

pub fn parse() -> Cli {
    Cli::parse()
}
