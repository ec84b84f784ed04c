//! embedc - Convert binary files into C/C++ array source literals
//!
//! This tool reads a binary file and emits a declaration of a fixed-width
//! unsigned integer array reproducing its contents, either to stdout, to a
//! file, or streamed to disk for large inputs.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossbeam_channel::Receiver;
use embedc_core::{file_size, submit, ArrayStyle, ElementType, Event, Format, Job, Mode, SOFT_LIMIT};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Convert binary files into C/C++ array source literals
#[derive(Parser, Debug)]
#[command(name = "embedc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the binary file to convert
    input: PathBuf,

    /// Output file; defaults to stdout in memory mode, and to
    /// `<input>_bytes.h` next to the input in streaming mode
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Element type of the emitted array
    #[arg(short = 't', long, value_enum, default_value = "unsigned-char")]
    element_type: ElementTypeArg,

    /// Declaration style of the emitted array
    #[arg(short = 's', long, value_enum, default_value = "const")]
    style: ArrayStyleArg,

    /// Input size in bytes above which streaming mode is chosen
    #[arg(long, default_value_t = SOFT_LIMIT)]
    threshold: u64,

    /// Force streaming mode regardless of input size
    #[arg(long, conflicts_with = "in_memory")]
    streaming: bool,

    /// Force in-memory mode regardless of input size
    #[arg(long, conflicts_with = "streaming")]
    in_memory: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Element type of the emitted array
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ElementTypeArg {
    /// `unsigned char`, 1 byte
    UnsignedChar,
    /// `uint8_t`, 1 byte
    Uint8,
    /// `std::byte`, 1 byte
    StdByte,
    /// `unsigned short`, 2 bytes
    UnsignedShort,
    /// `uint16_t`, 2 bytes
    Uint16,
    /// `uint32_t`, 4 bytes
    Uint32,
    /// `uint64_t`, 8 bytes
    Uint64,
}

impl From<ElementTypeArg> for ElementType {
    fn from(arg: ElementTypeArg) -> Self {
        match arg {
            ElementTypeArg::UnsignedChar => ElementType::UnsignedChar,
            ElementTypeArg::Uint8 => ElementType::Uint8,
            ElementTypeArg::StdByte => ElementType::StdByte,
            ElementTypeArg::UnsignedShort => ElementType::UnsignedShort,
            ElementTypeArg::Uint16 => ElementType::Uint16,
            ElementTypeArg::Uint32 => ElementType::Uint32,
            ElementTypeArg::Uint64 => ElementType::Uint64,
        }
    }
}

/// Declaration style of the emitted array
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArrayStyleArg {
    /// `const T name[] = {..};`
    Const,
    /// `static const T name[] = {..};`
    StaticConst,
    /// `constexpr T name[] = {..};`
    Constexpr,
    /// `constexpr std::array<T, N> name = {..};`
    ConstexprStdArray,
    /// `static constexpr std::array<T, N> name = {..};`
    StaticConstexprStdArray,
}

impl From<ArrayStyleArg> for ArrayStyle {
    fn from(arg: ArrayStyleArg) -> Self {
        match arg {
            ArrayStyleArg::Const => ArrayStyle::ConstArray,
            ArrayStyleArg::StaticConst => ArrayStyle::StaticConstArray,
            ArrayStyleArg::Constexpr => ArrayStyle::ConstexprArray,
            ArrayStyleArg::ConstexprStdArray => ArrayStyle::ConstexprStdArray,
            ArrayStyleArg::StaticConstexprStdArray => ArrayStyle::StaticConstexprStdArray,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if !cli.input.exists() {
        bail!("Input file does not exist: {}", cli.input.display());
    }
    if !cli.input.is_file() {
        bail!("Input path is not a file: {}", cli.input.display());
    }

    let format = Format::new(cli.element_type.into(), cli.style.into());

    let size = file_size(&cli.input)
        .with_context(|| format!("Failed to query size of {}", cli.input.display()))?;
    let mode = choose_mode(&cli, size);
    debug!("input is {size} bytes, using {mode:?} mode");

    let output = match mode {
        Mode::Streaming => Some(
            cli.output
                .clone()
                .unwrap_or_else(|| default_output_path(&cli.input)),
        ),
        Mode::InMemory => None,
    };

    if let Some(ref out) = output {
        info!("streaming output to {}", out.display());
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let job = Job {
        input: cli.input.clone(),
        output,
        mode,
        format,
        events: tx,
    };

    if !submit(job) {
        bail!("Failed to start worker thread");
    }

    let done = wait_for_completion(&rx);
    if !done.ok {
        bail!("{}", done.message);
    }

    match done.output {
        // In-memory mode: the text comes back with the completion.
        Some(text) => match cli.output {
            Some(ref out) => {
                fs::write(out, text.as_bytes())
                    .with_context(|| format!("Failed to write file: {}", out.display()))?;
                println!("Wrote {}", out.display());
            }
            None => print!("{text}"),
        },
        None => println!("{}", done.message),
    }

    Ok(())
}

/// Picks the execution mode: explicit flags win, otherwise inputs larger
/// than the threshold stream to disk
fn choose_mode(cli: &Cli, size: u64) -> Mode {
    if cli.streaming {
        Mode::Streaming
    } else if cli.in_memory {
        Mode::InMemory
    } else if size > cli.threshold {
        Mode::Streaming
    } else {
        Mode::InMemory
    }
}

/// Default streaming destination: the input's stem plus `_bytes.h`, next
/// to the input
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}_bytes.h"))
}

/// Drains the event channel, rendering progress, until completion arrives
fn wait_for_completion(rx: &Receiver<Event>) -> embedc_core::Completion {
    let mut last_reported = 0u8;
    loop {
        match rx.recv() {
            Ok(Event::Progress(pct)) => {
                let pct = pct.min(100);
                if pct != last_reported {
                    last_reported = pct;
                    info!("progress: {pct}%");
                }
            }
            Ok(Event::Done(done)) => return done,
            Err(_) => {
                // Worker vanished without reporting; treat as failure.
                return embedc_core::Completion {
                    ok: false,
                    message: "error: conversion failed".into(),
                    output: None,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/firmware.bin")),
            PathBuf::from("/data/firmware_bytes.h")
        );
        assert_eq!(
            default_output_path(Path::new("blob")),
            PathBuf::from("blob_bytes.h")
        );
    }

    #[test]
    fn test_choose_mode_threshold() {
        let cli = Cli::parse_from(["embedc", "input.bin"]);
        assert_eq!(choose_mode(&cli, SOFT_LIMIT), Mode::InMemory);
        assert_eq!(choose_mode(&cli, SOFT_LIMIT + 1), Mode::Streaming);
    }

    #[test]
    fn test_choose_mode_overrides() {
        let streaming = Cli::parse_from(["embedc", "input.bin", "--streaming"]);
        assert_eq!(choose_mode(&streaming, 0), Mode::Streaming);

        let in_memory = Cli::parse_from(["embedc", "input.bin", "--in-memory"]);
        assert_eq!(choose_mode(&in_memory, u64::MAX), Mode::InMemory);
    }

    #[test]
    fn test_wait_for_completion_drains_job() {
        use std::io::Write as _;

        let mut input = tempfile::NamedTempFile::new().unwrap();
        input.write_all(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        input.flush().unwrap();

        let (tx, rx) = crossbeam_channel::unbounded();
        assert!(submit(Job {
            input: input.path().to_path_buf(),
            output: None,
            mode: Mode::InMemory,
            format: Format::default(),
            events: tx,
        }));

        let done = wait_for_completion(&rx);
        assert!(done.ok, "{}", done.message);
        assert!(done.output.unwrap().contains("0xDE, 0xAD, 0xBE, 0xEF"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
