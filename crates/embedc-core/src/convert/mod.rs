//! Conversion execution paths.
//!
//! Two ways to run the same encoding:
//!
//! - [`convert_to_string`] maps the whole input and produces one in-memory
//!   text buffer; meant for inputs small enough that the generated text is
//!   comfortable to hold (and, in the original UI, to display).
//! - [`convert_to_file`] maps the input and writes the text incrementally
//!   to a destination file through a bounded accumulation buffer, reporting
//!   progress along the way; meant for large inputs.
//!
//! Both paths produce byte-identical text for the same input and format.

mod mapped;

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::emit::ArrayWriter;
use crate::error::{Error, Result};
use crate::format::Format;
use mapped::MappedInput;

/// Input size above which callers are advised to use the streaming path
///
/// Matches the accumulation buffer bound: beyond this, the generated text
/// alone outgrows what the in-memory path was designed for.
pub const SOFT_LIMIT: u64 = 8 * 1024 * 1024;

/// Accumulation buffer bound for the streaming path
const FLUSH_THRESHOLD: usize = 8 * 1024 * 1024;

/// Minimum wall-clock interval between progress reports
const PROGRESS_INTERVAL: Duration = Duration::from_millis(120);

/// Queries the size of `path` in bytes without reading it
///
/// Pre-flight helper for the caller's in-memory vs. streaming decision.
pub fn file_size(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file_open(path, e))?;
    let meta = file.metadata().map_err(|e| Error::size_query(path, e))?;
    Ok(meta.len())
}

/// Converts the file at `path` into one in-memory declaration string
pub fn convert_to_string(path: impl AsRef<Path>, format: Format) -> Result<String> {
    let path = path.as_ref();
    let mapped = MappedInput::open(path)?;
    let data = mapped.as_bytes();

    debug!("encoding {} bytes from {}", data.len(), path.display());
    Ok(crate::emit::encode(data, format))
}

/// Converts the file at `input` into a declaration written to `output`.
///
/// The destination is created (truncating any existing file) and receives
/// the header immediately; tokens accumulate in an 8 MiB buffer that is
/// flushed whenever full. `progress` receives percentages throttled to one
/// report per ~120 ms, plus one unconditional `100` at completion.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    format: Format,
    mut progress: impl FnMut(u8),
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mapped = MappedInput::open(input)?;
    let data = mapped.as_bytes();
    let byte_count = data.len();

    let mut out = File::create(output).map_err(|e| Error::output_create(output, e))?;

    let writer = ArrayWriter::new(format, byte_count);
    let layout = *writer.layout();

    debug!(
        "streaming {} bytes ({} elements) from {} to {}",
        byte_count,
        layout.element_count,
        input.display(),
        output.display()
    );

    let mut buf = String::with_capacity(FLUSH_THRESHOLD + 256);
    writer.write_preamble(&mut buf);
    write_all(&mut out, output, buf.as_bytes())?;
    buf.clear();

    let mut last_tick = Instant::now();
    for i in 0..layout.element_count {
        writer.write_element(&mut buf, data, i);

        if buf.len() >= FLUSH_THRESHOLD {
            trace!("flushing {} bytes at element {}", buf.len(), i);
            write_all(&mut out, output, buf.as_bytes())?;
            buf.clear();
        }

        if last_tick.elapsed() >= PROGRESS_INTERVAL {
            last_tick = Instant::now();
            progress(percent_done(i + 1, layout.elem_size, byte_count));
        }
    }

    if !buf.is_empty() {
        write_all(&mut out, output, buf.as_bytes())?;
        buf.clear();
    }

    writer.write_footer(&mut buf, byte_count);
    write_all(&mut out, output, buf.as_bytes())?;

    progress(100);
    Ok(())
}

/// Percentage of input bytes covered after `elements_done` elements
fn percent_done(elements_done: usize, elem_size: usize, byte_count: usize) -> u8 {
    if byte_count == 0 {
        return 100;
    }
    let processed = elements_done.saturating_mul(elem_size).min(byte_count);
    (processed as u64 * 100 / byte_count as u64) as u8
}

/// Writes the whole of `buf`, continuing from the unwritten offset after a
/// partial write; a write that transfers zero bytes is fatal
fn write_all(out: &mut File, path: &Path, mut buf: &[u8]) -> Result<()> {
    while !buf.is_empty() {
        let written = out.write(buf).map_err(|e| Error::output_write(path, e))?;
        if written == 0 {
            return Err(Error::write_stalled(path));
        }
        buf = &buf[written..];
    }
    Ok(())
}
