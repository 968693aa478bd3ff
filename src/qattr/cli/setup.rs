use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "qattr", bin_name = "qattr", version)]
#[command(about = "Resolve survey question attributes from layered definitions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to qattr.toml in the user config directory)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every attribute of a question, with values
    Resolve {
        /// JSON bundle with definitions, values, surveys and questions
        bundle: PathBuf,

        /// Question id inside the bundle
        #[arg(short, long)]
        question: u64,

        /// Resolve a single locale instead of every survey language
        #[arg(short, long)]
        locale: Option<String>,

        /// Use this theme instead of the stored one
        #[arg(short, long)]
        theme: Option<String>,

        /// Leave out general attributes
        #[arg(short, long)]
        advanced: bool,

        /// Print a listing grouped by category instead of JSON
        #[arg(short, long)]
        grouped: bool,
    },

    /// List the plugin attributes that apply to a question type
    Plugins {
        /// JSON bundle with plugin definitions
        bundle: PathBuf,

        /// Question type code
        #[arg(short = 't', long = "type")]
        question_type: String,
    },

    /// Canonicalize a raw definitions file
    Sanitize {
        /// JSON file holding raw definitions (object or array)
        file: PathBuf,
    },
}

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}
