use clap::{Parser, Subcommand, ValueEnum};
use infoscope_mediainfo::StreamKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "infoscope")]
#[command(author, version, about = "Media file inspection through MediaInfo")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the MediaInfo library (overrides the config file)
    #[arg(long, global = true, env = "INFOSCOPE_MEDIAINFO_LIB")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the MediaInfo report for a file
    Info {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Only the default summary instead of every parameter
        #[arg(long)]
        brief: bool,
    },

    /// Read one parameter
    Get {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Parameter name, e.g. Duration or Width
        #[arg(required = true)]
        parameter: String,

        /// Stream kind to read from (general, video, audio, text, other, image, menu)
        #[arg(short, long, default_value = "general")]
        stream: StreamKind,

        /// Zero-based stream number within that kind
        #[arg(short, long, default_value = "0")]
        index: usize,
    },

    /// Read a common field
    Query {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Field to read
        #[arg(value_enum)]
        field: Field,
    },

    /// Count the streams of each kind
    Streams {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,
    },

    /// List the parameters that have a value
    Params {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Show format, duration, codecs and resolution
    Summary {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the MediaInfo library can be loaded
    CheckLibrary,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Fields answered by a single convenience query
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Duration,
    Format,
    VideoFormat,
    AudioFormat,
    Resolution,
}
