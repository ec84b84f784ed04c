//! Background job execution and notification.
//!
//! A [`Job`] describes exactly one conversion and carries the sending half
//! of a typed event channel. [`submit`] spawns a dedicated worker thread
//! for the job and returns immediately; the worker delivers zero or more
//! [`Event::Progress`] notifications followed by exactly one
//! [`Event::Done`], all through the same channel so ordering is preserved.
//!
//! There is no queue, no cancellation, and no duplicate-destination
//! detection: a second in-flight job, or two jobs writing the same output
//! path, is the caller's responsibility to prevent.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::Sender;
use tracing::{debug, error};

use crate::convert::{convert_to_file, convert_to_string};
use crate::error::Error;
use crate::format::Format;

/// Execution strategy for one job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Produce the whole text in memory and hand it back at completion
    InMemory,
    /// Stream the text to the job's output path with bounded memory
    Streaming,
}

/// One conversion request, consumed by [`submit`]
#[derive(Debug)]
pub struct Job {
    /// File to convert
    pub input: PathBuf,
    /// Destination file; required in streaming mode, ignored otherwise
    pub output: Option<PathBuf>,
    /// Execution strategy
    pub mode: Mode,
    /// Output format
    pub format: Format,
    /// Receiver of this job's progress and completion events
    pub events: Sender<Event>,
}

/// Notification emitted by a running job
#[derive(Debug, Clone)]
pub enum Event {
    /// Percentage of input processed, in `[0, 100]` and non-decreasing
    Progress(u8),
    /// Terminal notification, delivered exactly once per job
    Done(Completion),
}

/// Outcome of one job
#[derive(Debug, Clone)]
pub struct Completion {
    /// Whether the conversion succeeded
    pub ok: bool,
    /// Human-readable outcome; failure messages are prefixed `error:`
    pub message: String,
    /// The generated text, present only on in-memory success
    pub output: Option<String>,
}

impl Completion {
    fn failure(err: &Error) -> Self {
        Self {
            ok: false,
            message: format!("error: {err}"),
            output: None,
        }
    }
}

/// Submits `job` to a dedicated background thread.
///
/// Returns `false` only if the thread could not be spawned; the conversion
/// itself never runs on the calling thread, and its outcome arrives through
/// the job's event channel.
pub fn submit(job: Job) -> bool {
    let spawned = thread::Builder::new()
        .name("embedc-worker".into())
        .spawn(move || run(job));

    match spawned {
        Ok(_) => true,
        Err(e) => {
            error!("failed to spawn worker thread: {e}");
            false
        }
    }
}

fn run(job: Job) {
    debug!("worker started for {}", job.input.display());

    let completion = match job.mode {
        Mode::InMemory => match convert_to_string(&job.input, job.format) {
            Ok(text) => Completion {
                ok: true,
                message: "output generated".into(),
                output: Some(text),
            },
            Err(e) => Completion::failure(&e),
        },
        Mode::Streaming => match job.output.as_deref() {
            None => Completion::failure(&Error::MissingOutputPath),
            Some(out_path) => {
                let events = job.events.clone();
                let report = |pct: u8| {
                    let _ = events.send(Event::Progress(pct.min(100)));
                };
                match convert_to_file(&job.input, out_path, job.format, report) {
                    Ok(()) => Completion {
                        ok: true,
                        message: format!("saved to {}", out_path.display()),
                        output: None,
                    },
                    Err(e) => Completion::failure(&e),
                }
            }
        },
    };

    // The receiver may be gone; the worker has nothing left to report then.
    let _ = job.events.send(Event::Done(completion));
}
