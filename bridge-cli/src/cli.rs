use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agbridge",
    about = "Antigravity Bridge - offline request translation",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, env = "AGBRIDGE_CONFIG", help = "Path to config JSON")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(clap::Args)]
pub struct SessionArgs {
    #[arg(long, env = "AGBRIDGE_PROJECT", default_value = "", help = "Cloud project id")]
    pub project: String,

    #[arg(long, env = "AGBRIDGE_SESSION", default_value = "", help = "Upstream session id")]
    pub session: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Convert an OpenAI chat request into a v1internal envelope")]
    Convert {
        #[arg(help = "Chat request JSON file ('-' for stdin)")]
        input: PathBuf,

        #[command(flatten)]
        session: SessionArgs,

        #[arg(
            long = "response",
            value_name = "FILE",
            help = "Backend response to harvest signatures from first (repeatable)"
        )]
        responses: Vec<PathBuf>,
    },

    #[command(about = "Wrap a native Gemini request body into a v1internal envelope")]
    Wrap {
        #[arg(help = "Gemini request body JSON file ('-' for stdin)")]
        input: PathBuf,

        #[arg(short, long, help = "Requested model name")]
        model: String,

        #[command(flatten)]
        session: SessionArgs,
    },

    #[command(about = "Sanitize a JSON schema for function declarations")]
    Sanitize {
        #[arg(help = "Schema JSON file ('-' for stdin)")]
        input: PathBuf,
    },

    #[command(about = "Report the thought signatures found in backend responses")]
    Harvest {
        #[arg(required = true, help = "Backend response JSON files")]
        inputs: Vec<PathBuf>,
    },

    #[command(about = "Write the default configuration file")]
    InitConfig {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}
