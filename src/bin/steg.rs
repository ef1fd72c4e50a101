//! # Steg Binary Entry Point
//!
//! Hide a message in an image, or recover one.
//!
//! ## Usage
//!
//! ```bash
//! # hide (overwrites the input when -o is omitted)
//! steg -i cover.png -m "Hello, World!" -o stego.png
//! steg -i cover.png -f secret.txt -o stego.png --password hunter2
//!
//! # reveal
//! steg -i stego.png -d
//! STEG_PASSWORD=hunter2 steg -i stego.png -d
//!
//! # how much fits
//! steg -i cover.png --capacity --json
//! ```
//!
//! The decoded message goes to stdout; logs go to stderr.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context};
use clap::Parser;
use log::{debug, error, info, LevelFilter};

use lsb_steg::common::config::{load_config, StegConfig};
use lsb_steg::processing::load_cover;
use lsb_steg::utils::init_logger;
use lsb_steg::{hide_in_file, reveal_from_file, Capacity};

/// Hide or retrieve messages in images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input image file
    #[arg(short, long)]
    input_image: PathBuf,

    /// The message to hide; required for encoding unless --message-file is given
    #[arg(short, long, conflicts_with = "message_file")]
    message: Option<String>,

    /// Read the message to hide from this file
    #[arg(short = 'f', long)]
    message_file: Option<PathBuf>,

    /// Path to the output image file (defaults to overwriting the input)
    #[arg(short, long)]
    output_image: Option<PathBuf>,

    /// Decode a message from an image (default: encode)
    #[arg(short, long)]
    decode: bool,

    /// Password for encryption/decryption (falls back to the configured environment variable)
    #[arg(short, long)]
    password: Option<String>,

    /// Configuration file path (TOML)
    #[arg(long)]
    config: Option<String>,

    /// Report how many message bytes the input image can hold
    #[arg(long, conflicts_with = "decode")]
    capacity: bool,

    /// Print the capacity report as JSON
    #[arg(long, requires = "capacity")]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let config = args
        .config
        .as_deref()
        .map(load_config::<StegConfig>)
        .transpose();

    let level = match (&config, args.verbose) {
        (_, true) => LevelFilter::Debug,
        (Ok(Some(config)), false) => config.logging.level_filter(),
        _ => LevelFilter::Info,
    };
    init_logger(level);

    let config = match config {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args, config) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: Args, config: StegConfig) -> anyhow::Result<()> {
    if args.capacity {
        return report_capacity(&args);
    }

    let password = config.password.resolve(args.password.clone());
    if password.is_some() {
        debug!("Password supplied, message will be encrypted/decrypted");
    }

    if args.decode {
        if args.message.is_some() || args.message_file.is_some() || args.output_image.is_some() {
            bail!("No message or output image should be specified when decoding.");
        }

        let revealed = match reveal_from_file(&args.input_image, password.as_deref()) {
            Ok(revealed) => revealed,
            Err(e) if e.is_recovery_failure() => {
                debug!("Recovery failed: {:?}", e);
                bail!(
                    "Could not recover message from {}: {}",
                    args.input_image.display(),
                    e
                );
            }
            Err(e) => return Err(e).context("Error decoding the message"),
        };

        match revealed {
            Some(message) => {
                info!("Decoded message from {}", args.input_image.display());
                println!("{}", message);
            }
            None => bail!("No hidden message found in {}", args.input_image.display()),
        }
    } else {
        let message = match (args.message, args.message_file) {
            (Some(message), _) => message,
            (None, Some(path)) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read message file {}", path.display()))?,
            (None, None) => bail!("A message is required for encoding."),
        };

        let written = hide_in_file(
            &args.input_image,
            &message,
            args.output_image.as_deref(),
            password.as_deref(),
        )
        .context("Error encoding the image")?;
        info!("Message encoded successfully into {}", written.display());
    }

    Ok(())
}

fn report_capacity(args: &Args) -> anyhow::Result<()> {
    let cover = load_cover(&args.input_image)?;
    let capacity = Capacity::of(&cover);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&capacity)?);
    } else {
        let (width, height) = cover.dimensions();
        println!("Image: {}x{} ({} pixels)", width, height, capacity.pixels);
        println!("Max message: {} bytes", capacity.max_message_bytes);
        println!(
            "Max message with password: {} bytes",
            capacity.max_encrypted_message_bytes
        );
    }
    Ok(())
}
