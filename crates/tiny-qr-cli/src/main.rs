//! tiny-qr CLI
//!
//! Encodes text or a file into a QR code and prints it to the terminal,
//! as JSON, or writes it as a BMP image.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use bmp::{Image, Pixel};
use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use tiny_qr_core::ErrorCorrectionLevel;
use tiny_qr_matrix::{MAX_QUIET_ZONE, QrCode, render_text};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            // --help and --version are reported through the error path too
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logger(matches.get_flag("verbose"));

    let stdout = io::stdout();
    if let Err(e) = run(&matches, &mut stdout.lock()) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("tiny-qr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate QR codes")
        .arg(
            Arg::new("text")
                .value_name("TEXT")
                .help("Text to encode; several words are joined by spaces")
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Encode the raw bytes of FILE, or of stdin for '-'")
                .conflicts_with("text"),
        )
        .arg(
            Arg::new("ec-level")
                .short('e')
                .long("ec-level")
                .value_name("LEVEL")
                .help("Minimum error correction level: L, M, Q or H [default: M]"),
        )
        .arg(
            Arg::new("fixed-ec")
                .long("fixed-ec")
                .help("Use exactly the requested error correction level")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-version")
                .long("max-version")
                .value_name("N")
                .help("Largest symbol version to consider")
                .value_parser(clap::value_parser!(u8)),
        )
        .arg(
            Arg::new("symbol-version")
                .long("symbol-version")
                .value_name("N")
                .help("Use exactly this symbol version")
                .value_parser(clap::value_parser!(u8))
                .conflicts_with("max-version"),
        )
        .arg(
            Arg::new("mask")
                .short('m')
                .long("mask")
                .value_name("N")
                .help("Force mask pattern 0-7 instead of the lowest penalty")
                .value_parser(clap::value_parser!(u8)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Terminal output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write a BMP image instead of printing the symbol"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .value_name("N")
                .help("Pixels per module in the BMP image")
                .value_parser(clap::value_parser!(u32).range(1..=64))
                .default_value("8"),
        )
        .arg(
            Arg::new("invert")
                .long("invert")
                .help("Swap dark and light, for light-on-dark terminals")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet-zone")
                .long("quiet-zone")
                .value_name("N")
                .help("Light border around the text rendering, in modules (at most 64)")
                .value_parser(quiet_zone_parser())
                .default_value("2"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log encoding decisions to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn quiet_zone_parser() -> RangedU64ValueParser<usize> {
    let max = MAX_QUIET_ZONE as u64;
    RangedU64ValueParser::new().range(0..=max)
}

fn init_logger(verbose: bool) {
    let default = if verbose { "tiny_qr=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init in the same process is not an error worth reporting
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Data handed to the encoder
#[derive(Debug, PartialEq, Eq)]
enum Payload {
    Text(String),
    Bytes(Vec<u8>),
    Missing,
}

fn read_payload(matches: &ArgMatches) -> Result<Payload> {
    if let Some(path) = matches.get_one::<String>("input") {
        let mut bytes = Vec::new();
        if path == "-" {
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
        } else {
            bytes = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
        }
        return Ok(Payload::Bytes(bytes));
    }

    Ok(matches
        .get_many::<String>("text")
        .map_or(Payload::Missing, |words| {
            Payload::Text(words.map(String::as_str).collect::<Vec<_>>().join(" "))
        }))
}

fn generate(matches: &ArgMatches, payload: &Payload) -> Result<QrCode> {
    let mut generator = QrCode::generator();

    let level = matches
        .get_one::<String>("ec-level")
        .map(|level| level.parse::<ErrorCorrectionLevel>())
        .transpose()?
        .unwrap_or(ErrorCorrectionLevel::Medium);
    generator = if matches.get_flag("fixed-ec") {
        generator.with_specific_error_correction_level(level)
    } else {
        generator.with_min_error_correction_level(level)
    };

    if let Some(&version) = matches.get_one::<u8>("symbol-version") {
        generator = generator.with_specific_version(version);
    } else if let Some(&version) = matches.get_one::<u8>("max-version") {
        generator = generator.with_max_version(version);
    }
    if let Some(&mask) = matches.get_one::<u8>("mask") {
        generator = generator.with_mask_reference(mask);
    }

    generator = match payload {
        Payload::Text(text) => generator.with_text(text),
        Payload::Bytes(bytes) => generator.with_bytes(bytes),
        Payload::Missing => generator,
    };

    Ok(generator.build()?)
}

fn run(matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    let payload = read_payload(matches)?;
    let code = generate(matches, &payload)?;
    let invert = matches.get_flag("invert");
    info!(
        version = code.version().number(),
        level = %code.error_correction_level(),
        mask = code.mask_pattern().reference(),
        "generated symbol"
    );

    if let Some(path) = matches.get_one::<String>("output") {
        let scale = matches.get_one::<u32>("scale").copied().unwrap_or(8);
        write_bmp(&code, Path::new(path), scale, invert)?;
        writeln!(
            out,
            "Generated {}-{} QR code to {path}",
            code.version(),
            code.error_correction_level()
        )?;
        return Ok(());
    }

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => {
            let document = serde_json::to_string_pretty(&to_json(&code))?;
            writeln!(out, "{document}")?;
        }
        _ => {
            let quiet_zone = matches.get_one::<usize>("quiet-zone").copied().unwrap_or(2);
            write!(out, "{}", render_text(&code, quiet_zone, invert))?;
        }
    }
    Ok(())
}

fn to_json(code: &QrCode) -> serde_json::Value {
    let modules: Vec<String> = code
        .rows()
        .map(|row| {
            row.iter()
                .map(|color| if color.is_dark() { '1' } else { '0' })
                .collect()
        })
        .collect();

    json!({
        "version": code.version().number(),
        "error_correction": code.error_correction_level().to_string(),
        "mask": code.mask_pattern().reference(),
        "size": code.size(),
        "modules": modules,
    })
}

fn write_bmp(code: &QrCode, path: &Path, scale: u32, invert: bool) -> Result<()> {
    let pixels = code.draw_iter();
    let width = u32::try_from(pixels.width())?;
    let height = u32::try_from(pixels.height())?;
    let mut image = Image::new(width * scale, height * scale);

    for pixel in pixels {
        let dark = pixel.color.is_dark() != invert;
        let value = if dark { 0 } else { 255 };
        let (x, y) = (u32::try_from(pixel.x)?, u32::try_from(pixel.y)?);
        for dy in 0..scale {
            for dx in 0..scale {
                image.set_pixel(x * scale + dx, y * scale + dy, Pixel::new(value, value, value));
            }
        }
    }

    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), width = width * scale, "wrote bitmap");
    Ok(())
}
