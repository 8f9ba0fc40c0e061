//! CLI for formatcheck: detect and validate files or whole directories.

#![cfg(feature = "cli")]

use clap::Parser;
use formatcheck::{
    detect, validate, Format, FormatSet, Upload, ValidateOptions, ValidationResult, ValidatorConfig,
};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Parser)]
#[command(name = "formatcheck")]
#[command(about = "Detect file formats from content and validate uploads", long_about = None)]
struct Args {
    /// Path to a file or directory to check (use -d/--directory to check a whole directory)
    path: Option<String>,

    /// Check a whole directory (optionally with -r to recurse into subdirectories)
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    directory: Option<String>,

    /// When checking a directory, recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Allowed formats (comma-separated), e.g. png,jpeg,svg. Default: all formats, or the config file's list.
    #[arg(long, value_name = "FORMATS")]
    allow: Option<String>,

    /// Size ceiling in bytes; the per-format limit still applies and the lower one wins
    #[arg(long, value_name = "BYTES")]
    max_size: Option<u64>,

    /// TOML file with allowed_formats / max_file_size / enable_security_checks
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Reject files that cannot be converted to this format
    #[arg(short, long, value_name = "FORMAT")]
    target: Option<String>,

    /// Output JSON per result (one line per file unless --pretty)
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON (use with --json)
    #[arg(long)]
    pretty: bool,

    /// Quiet: only print invalid paths
    #[arg(short, long)]
    quiet: bool,

    /// Log detection decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn build_options(args: &Args) -> Result<ValidateOptions, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ValidatorConfig::load(path)?,
        None => ValidatorConfig::default(),
    };
    if let Some(list) = &args.allow {
        config.allowed_formats = FormatSet::parse_list(list)?;
    }
    if let Some(max) = args.max_size {
        config.max_file_size = max;
    }
    config.check()?;

    let mut options = config.to_options();
    if let Some(target) = &args.target {
        options.target_format = Some(target.parse::<Format>()?);
    }
    Ok(options)
}

#[derive(Default)]
struct Tally {
    total: u64,
    invalid: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let options = build_options(&args)?;
    debug!(allowed = %options.allowed_formats.joined(), max_size = options.max_size, "options");

    let path_str = args
        .directory
        .as_ref()
        .or(args.path.as_ref())
        .ok_or("Missing path: give a file/directory as argument or use -d/--directory <DIR>")?;
    let path = Path::new(path_str.as_str());

    if !path.exists() {
        eprintln!("Not found: {}", path.display());
        std::process::exit(1);
    }

    let mut tally = Tally::default();

    if path.is_file() {
        if args.directory.is_some() {
            eprintln!("--directory expects a directory, not a file: {}", path.display());
            std::process::exit(1);
        }
        check_file(path, &args, &options, &mut tally)?;
    } else if path.is_dir() {
        if !args.quiet {
            eprintln!("Checking directory: {} {}", path.display(), if args.recursive { "(recursive)" } else { "" });
        }
        check_dir(path, &args, &options, &mut tally)?;
        if !args.quiet {
            eprintln!("Checked {} files, {} invalid", tally.total, tally.invalid);
        }
    } else {
        eprintln!("Not a file or directory: {}", path.display());
        std::process::exit(1);
    }

    if tally.invalid > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check_file(
    path: &Path,
    args: &Args,
    options: &ValidateOptions,
    tally: &mut Tally,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = fs::metadata(path)?.len();
    // Over the generic ceiling: judge on metadata, don't load it.
    let bytes = if size > options.max_size {
        None
    } else {
        Some(fs::read(path)?)
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let upload = Upload {
        name: &name,
        mime_type: "",
        size,
        bytes: bytes.as_deref(),
    };
    let result = validate(upload, options);
    tally.total += 1;
    if !result.is_valid {
        tally.invalid += 1;
    }
    print_result(path.display().to_string(), &result, args, bytes.as_deref())
}

fn check_dir(
    dir: &Path,
    args: &Args,
    options: &ValidateOptions,
    tally: &mut Tally,
) -> Result<(), Box<dyn std::error::Error>> {
    let walker = if args.recursive {
        WalkDir::new(dir).into_iter()
    } else {
        WalkDir::new(dir).max_depth(1).into_iter()
    };

    for entry in walker.filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.') || e.depth() == 0) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Err(e) = check_file(path, args, options, tally) {
            warn!(path = %path.display(), error = %e, "skipping unreadable file");
        }
    }
    Ok(())
}

fn print_result(
    path: String,
    result: &ValidationResult,
    args: &Args,
    bytes: Option<&[u8]>,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.quiet && result.is_valid {
        return Ok(());
    }
    let detection = bytes.and_then(detect);
    let sha256 = bytes.map(sha256_hex);
    if args.json {
        let mut out = IndexMap::<String, serde_json::Value>::new();
        out.insert("sha256".to_string(), serde_json::to_value(&sha256)?);
        out.insert("path".to_string(), serde_json::Value::String(path));
        out.insert("is_valid".to_string(), serde_json::Value::Bool(result.is_valid));
        out.insert("format".to_string(), serde_json::to_value(result.format)?);
        out.insert("size_bytes".to_string(), serde_json::to_value(result.size)?);
        out.insert("detection".to_string(), serde_json::to_value(detection)?);
        out.insert("error".to_string(), serde_json::to_value(&result.error)?);
        out.insert("code".to_string(), serde_json::to_value(result.error.as_ref().map(|e| e.code()))?);
        out.insert("warnings".to_string(), serde_json::to_value(&result.warnings)?);
        let json_str = if args.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        println!("{}", json_str);
        return Ok(());
    }

    let format = result.format.map(Format::label).unwrap_or("unknown");
    match &result.error {
        None => println!("OK {} ({}, {} bytes)", path, format, result.size),
        Some(e) => {
            println!("INVALID {} ({}, {} bytes)", path, format, result.size);
            println!("  error [{}]: {}", e.code(), e);
        }
    }
    println!("  sha256: {}", sha256.as_deref().unwrap_or("- (not read)"));
    if !args.quiet {
        if let Some(d) = detection {
            println!("  detected: {} via {:?}", d.format, d.method);
            if let Some(marker) = d.illustrator_marker {
                println!("  illustrator marker: {}", marker);
            }
        }
    }
    for w in &result.warnings {
        println!("  warning: {}", w);
    }
    Ok(())
}
