mod cli;

use infoscope::{
    config::{self, Config},
    probe::{self, MediaInfo, StreamKind},
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, Field};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "infoscope=trace,infoscope_mediainfo=trace".to_string()
        } else {
            "infoscope=info,infoscope_mediainfo=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.as_deref().or(cli.config.as_deref());
            return validate_config(path);
        }
        Commands::Version => {
            println!("infoscope {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    if let Some(library) = cli.library {
        config.library.path = Some(library);
    }

    match cli.command {
        Commands::Info { file, brief } => info(&config, &file, brief),
        Commands::Get {
            file,
            parameter,
            stream,
            index,
        } => get(&config, &file, &parameter, stream, index),
        Commands::Query { file, field } => query(&config, &file, field),
        Commands::Streams { file } => streams(&config, &file),
        Commands::Params { file } => params(&config, &file),
        Commands::Summary { file, json } => summary(&config, &file, json || config.output.json),
        Commands::CheckLibrary => check_library(&config),
        Commands::Validate { .. } | Commands::Version => Ok(()),
    }
}

/// Check the file before loading the library so a typo does not surface as
/// a generic engine failure
fn open_for(config: &Config, file: &Path) -> Result<MediaInfo> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }
    probe::open_media_info(&config.library)
}

fn info(config: &Config, file: &Path, brief: bool) -> Result<()> {
    let mut media_info = open_for(config, file)?;

    let report = if brief {
        let mut session = media_info.session(file)?;
        session.inform()
    } else {
        media_info.general_info(file)
    };

    if report == probe::OPEN_FAILED {
        anyhow::bail!("MediaInfo could not open {:?}", file);
    }
    print!("{}", report);
    Ok(())
}

fn get(
    config: &Config,
    file: &Path,
    parameter: &str,
    stream: StreamKind,
    index: usize,
) -> Result<()> {
    let mut media_info = open_for(config, file)?;
    let mut session = media_info.session(file)?;

    let value = session.parameter_with_stream(stream, index, parameter);
    tracing::debug!("{} #{} {} = {:?}", stream, index, parameter, value);
    println!("{}", value);
    Ok(())
}

fn query(config: &Config, file: &Path, field: Field) -> Result<()> {
    let mut media_info = open_for(config, file)?;

    let value = match field {
        Field::Duration => media_info.duration(file),
        Field::Format => media_info.format(file),
        Field::VideoFormat => media_info.video_format(file),
        Field::AudioFormat => media_info.audio_format(file),
        Field::Resolution => media_info.resolution(file),
    };
    println!("{}", value);
    Ok(())
}

fn streams(config: &Config, file: &Path) -> Result<()> {
    let mut media_info = open_for(config, file)?;
    let mut session = media_info.session(file)?;

    for kind in StreamKind::ALL {
        println!("{:<8} {}", kind, session.stream_count(kind));
    }
    Ok(())
}

fn params(config: &Config, file: &Path) -> Result<()> {
    let mut media_info = open_for(config, file)?;
    let mut session = media_info.session(file)?;

    println!("{}", session.available_parameters());
    Ok(())
}

fn summary(config: &Config, file: &Path, json: bool) -> Result<()> {
    let mut media_info = open_for(config, file)?;
    let Some(summary) = media_info.summary(file) else {
        anyhow::bail!("MediaInfo could not open {:?}", file);
    };

    if json {
        let json_str = serde_json::to_string_pretty(&summary)?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("File: {}", summary.path.display());
    println!("Format: {}", summary.format);
    if let Ok(ms) = summary.duration.parse::<f64>() {
        let secs = (ms / 1000.0) as u64;
        let mins = secs / 60;
        let hours = mins / 60;
        println!("Duration: {:02}:{:02}:{:02}", hours, mins % 60, secs % 60);
    }
    if summary.has_video() {
        print!("Video: {}", summary.video_format);
        if let Some(ref resolution) = summary.resolution {
            print!(" {}", resolution);
        }
        println!();
    }
    if summary.has_audio() {
        println!("Audio: {}", summary.audio_format);
    }

    println!("\nStreams:");
    for (kind, count) in &summary.streams {
        println!("  {}: {}", kind, count);
    }

    Ok(())
}

fn check_library(config: &Config) -> Result<()> {
    println!("Checking MediaInfo library...\n");

    let status = probe::check_library(&config.library);

    if let Some(ref path) = status.path {
        println!("✓ Loaded {}", path.display());
    }
    if let Some(ref version) = status.version {
        println!("  {}", version);
    }
    if let Some(ref error) = status.error {
        println!("✗ {}", error);
        println!();
        println!(
            "Install libmediainfo or point --library / [library].path at it (tried names: {}).",
            probe::LIBRARY_NAMES.join(", ")
        );
        anyhow::bail!("MediaInfo library is not available");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            match config.library.path {
                Some(ref lib) => println!("  Library: {}", lib.display()),
                None => println!("  Library: system search"),
            }
            println!("  Search paths: {}", config.library.search_paths.len());
            println!("  JSON output: {}", config.output.json);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = Config::default();
            println!("Default config:");
            println!("  Search paths: {}", config.library.search_paths.len());
        }
    }

    Ok(())
}
