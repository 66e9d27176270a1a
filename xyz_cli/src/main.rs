use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use lib_xyz::batch::{self, BatchEvent, BatchInput, ConversionKind};
use log::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Converts images between PNG and the XYZ container used by RPG Maker 2000/2003"
)]
struct Args {
    /// Conversion to perform
    #[arg(value_enum)]
    kind: Kind,

    /// Source files, or a single source directory to walk recursively
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output root directory
    #[arg(short, long, default_value = "converted")]
    output: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    /// XYZ containers to PNG
    Xyz2png,
    /// PNG images to XYZ containers
    Png2xyz,
    /// Reduce PNG images to an adaptive 256-color palette
    To256colors,
}

impl From<Kind> for ConversionKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Xyz2png => ConversionKind::XyzToPng,
            Kind::Png2xyz => ConversionKind::PngToXyz,
            Kind::To256colors => ConversionKind::To256Colors,
        }
    }
}

fn format_eta(seconds: f64) -> String {
    if seconds > 0.0 {
        let total = seconds as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    } else {
        String::from("--:--")
    }
}

fn main() -> ExitCode {
    lib_xyz::init_logging();
    let args = Args::parse();

    // A single directory argument switches to tree-mirroring mode
    let input = if args.inputs.len() == 1 && args.inputs[0].is_dir() {
        BatchInput::Directory(args.inputs[0].clone())
    } else {
        BatchInput::Files(args.inputs.clone())
    };

    let cancel = Arc::new(AtomicBool::new(false));
    info!("Starting {:?} conversion into {}", args.kind, args.output.display());
    let (worker, events) = batch::spawn(args.kind.into(), input, args.output.clone(), cancel);

    let mut exit = ExitCode::SUCCESS;
    for event in events {
        match event {
            BatchEvent::Progress(p) => {
                println!(
                    "Processed {}/{} files - ETA: {}",
                    p.processed,
                    p.total,
                    format_eta(p.eta_seconds)
                );
            }
            BatchEvent::Completed(report) => {
                println!(
                    "Conversion complete! Converted {} files.",
                    report.converted.len()
                );
                if !report.errors.is_empty() {
                    println!("Encountered {} errors:", report.errors.len());
                    for error in &report.errors {
                        println!("  {}", error);
                    }
                }
                println!("Files saved to: {}", args.output.display());
            }
            BatchEvent::Fatal(message) => {
                eprintln!("Error: {}", message);
                exit = ExitCode::FAILURE;
            }
        }
    }
    let _ = worker.join();

    exit
}
