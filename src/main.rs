//! qcodec - inspect and re-encode serialized condition trees

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser as ClapParser, Subcommand};
use log::info;
use qcodec::serializer::DEFAULT_MAX_DEPTH;
use qcodec::{QuerySerializer, SerializerConfig, TimeZonePolicy};
use std::io::Read;
use std::path::{Path, PathBuf};

/// qcodec - inspect and re-encode serialized condition trees
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Input text is base64-wrapped
    #[arg(long, global = true)]
    base64: bool,

    /// Read timestamps as UTC instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Maximum node nesting accepted (at most 62 for JSON)
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a serialized tree in readable form
    Inspect {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Decode a serialized tree and encode it again
    Normalize {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Wrap the output in base64
        #[arg(long)]
        output_base64: bool,
    },
}

impl Args {
    fn input_config(&self) -> SerializerConfig {
        let time_zone = if self.utc {
            TimeZonePolicy::Utc
        } else {
            TimeZonePolicy::Local
        };
        SerializerConfig::new()
            .with_base64(self.base64)
            .with_time_zone(time_zone)
            .with_max_depth(self.max_depth)
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let input = QuerySerializer::new(args.input_config());

    match &args.command {
        Command::Inspect { file } => {
            let text = read_input(file.as_deref())?;
            let tree = input.loads(&text).context("Failed to decode condition tree")?;
            Ok(tree.map_or_else(|| "null".to_string(), |tree| tree.to_string()))
        }
        Command::Normalize {
            file,
            pretty,
            output_base64,
        } => {
            let text = read_input(file.as_deref())?;
            let tree = input.loads(&text).context("Failed to decode condition tree")?;
            let output = QuerySerializer::new(
                input
                    .config()
                    .clone()
                    .with_base64(*output_base64)
                    .with_pretty(*pretty),
            );
            match tree {
                Some(tree) => output
                    .dumps(&tree)
                    .context("Failed to encode condition tree"),
                None if *output_base64 => Ok(STANDARD.encode("null")),
                None => Ok("null".to_string()),
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Running {:?}", args.command);
    println!("{}", run(&args)?);
    Ok(())
}
