mod convert;
mod discover;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use log::{error, info};
use thiserror::Error;

pub use convert::JobError;

use crate::progress::eta_seconds;

/// Which of the three supported conversions a batch performs. Each kind
/// carries its source-extension filter, destination extension and per-file
/// converter, so one walker serves all three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionKind {
    XyzToPng,
    PngToXyz,
    To256Colors,
}

impl ConversionKind {
    pub fn source_extension(self) -> &'static str {
        match self {
            ConversionKind::XyzToPng => "xyz",
            ConversionKind::PngToXyz | ConversionKind::To256Colors => "png",
        }
    }

    pub fn target_extension(self) -> &'static str {
        match self {
            ConversionKind::XyzToPng | ConversionKind::To256Colors => "png",
            ConversionKind::PngToXyz => "xyz",
        }
    }

    fn convert(self, input: &Path, output: &Path) -> Result<(), JobError> {
        match self {
            ConversionKind::XyzToPng => convert::xyz_to_png(input, output),
            ConversionKind::PngToXyz => convert::png_to_xyz(input, output),
            ConversionKind::To256Colors => convert::to_256_colors(input, output),
        }
    }
}

/// What the caller hands the pipeline: either an explicit ordered list of
/// files, or a directory root to walk recursively.
#[derive(Clone, Debug)]
pub enum BatchInput {
    Files(Vec<PathBuf>),
    Directory(PathBuf),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub fraction: f64,
    pub eta_seconds: f64,
}

/// Receives one progress update after each finished job, in emission
/// order. Any `FnMut(Progress)` closure qualifies.
pub trait ProgressSink {
    fn progress(&mut self, update: Progress);
}

impl<F: FnMut(Progress)> ProgressSink for F {
    fn progress(&mut self, update: Progress) {
        self(update)
    }
}

/// Outcome of a whole batch: every output path that was written, and one
/// human-readable string per failed input.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<PathBuf>,
    pub errors: Vec<String>,
}

/// Conditions that prevent any job from running. Per-file failures never
/// surface here; they land in `BatchReport::errors` instead.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to read source directory {path}: {source}")]
    Discovery { path: PathBuf, source: io::Error },

    #[error("Failed to create output root {path}: {source}")]
    OutputRoot { path: PathBuf, source: io::Error },
}

struct Job {
    input: PathBuf,
    output: PathBuf,
    /// Name used in error strings: the relative path for directory input,
    /// the bare file name for an explicit list.
    label: String,
}

/// Runs one batch to completion on the calling thread.
///
/// Jobs run strictly in discovery order. A failing job is recorded and the
/// batch moves on; only an unreadable source root or an unwritable output
/// root abort the run. The cancellation flag is checked between jobs, and
/// a canceled run returns the partial report accumulated so far.
pub fn run(
    kind: ConversionKind,
    input: &BatchInput,
    output_root: &Path,
    sink: &mut dyn ProgressSink,
    cancel: &AtomicBool,
) -> Result<BatchReport, BatchError> {
    fs::create_dir_all(output_root).map_err(|source| {
        error!("Cannot create output root {}", output_root.display());
        BatchError::OutputRoot {
            path: output_root.to_path_buf(),
            source,
        }
    })?;

    let jobs = discover_jobs(kind, input, output_root, cancel)?;
    let total = jobs.len();
    if total == 0 {
        info!("No matching input files, nothing to convert");
        return Ok(BatchReport::default());
    }
    info!("Discovered {} files to convert", total);

    let mut report = BatchReport::default();
    let start = Instant::now();

    for (done, job) in jobs.into_iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            info!("Batch canceled after {} of {} jobs", done, total);
            break;
        }

        match run_job(kind, &job) {
            Ok(()) => report.converted.push(job.output),
            Err(e) => report.errors.push(format!("Error in {}: {}", job.label, e)),
        }

        let processed = done + 1;
        sink.progress(Progress {
            processed,
            total,
            fraction: processed as f64 / total as f64,
            eta_seconds: eta_seconds(start.elapsed(), processed, total),
        });
    }

    info!(
        "Batch finished: {} converted, {} errors",
        report.converted.len(),
        report.errors.len()
    );
    Ok(report)
}

fn run_job(kind: ConversionKind, job: &Job) -> Result<(), JobError> {
    if let Some(parent) = job.output.parent() {
        fs::create_dir_all(parent)?;
    }
    kind.convert(&job.input, &job.output)
}

fn discover_jobs(
    kind: ConversionKind,
    input: &BatchInput,
    output_root: &Path,
    cancel: &AtomicBool,
) -> Result<Vec<Job>, BatchError> {
    match input {
        // Explicit list: caller order, outputs flat under the root
        BatchInput::Files(paths) => Ok(paths
            .iter()
            .map(|path| {
                let file_name: PathBuf = path.file_name().map(PathBuf::from).unwrap_or_default();
                Job {
                    input: path.clone(),
                    output: output_root.join(file_name.with_extension(kind.target_extension())),
                    label: file_name.display().to_string(),
                }
            })
            .collect()),

        // Directory: recursive walk, tree mirrored under the root's basename
        BatchInput::Directory(root) => {
            let files =
                discover::walk(root, kind.source_extension(), cancel).map_err(|source| {
                    error!("Cannot enumerate source directory {}", root.display());
                    BatchError::Discovery {
                        path: root.clone(),
                        source,
                    }
                })?;
            let tree_name: PathBuf = root.file_name().map(PathBuf::from).unwrap_or_default();
            Ok(files
                .into_iter()
                .map(|path| {
                    let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
                    let output = output_root
                        .join(&tree_name)
                        .join(relative.with_extension(kind.target_extension()));
                    Job {
                        input: path,
                        output,
                        label: relative.display().to_string(),
                    }
                })
                .collect())
        }
    }
}

/// Events a background batch emits over its channel, in order: zero or
/// more `Progress`, then exactly one `Completed` or `Fatal`.
#[derive(Debug)]
pub enum BatchEvent {
    Progress(Progress),
    Completed(BatchReport),
    Fatal(String),
}

/// Runs a batch on its own worker thread, forwarding events to the
/// returned receiver. Dropping the receiver does not stop the run; set
/// the cancellation flag for that.
pub fn spawn(
    kind: ConversionKind,
    input: BatchInput,
    output_root: PathBuf,
    cancel: Arc<AtomicBool>,
) -> (thread::JoinHandle<()>, mpsc::Receiver<BatchEvent>) {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let mut sink = |update: Progress| {
            let _ = tx.send(BatchEvent::Progress(update));
        };
        match run(kind, &input, &output_root, &mut sink, &cancel) {
            Ok(report) => {
                let _ = tx.send(BatchEvent::Completed(report));
            }
            Err(e) => {
                let _ = tx.send(BatchEvent::Fatal(e.to_string()));
            }
        }
    });
    (handle, rx)
}
