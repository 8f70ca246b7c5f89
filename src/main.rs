use anyhow::Context;
use clap::Parser;
use cloudmask::compositor::side_by_side;
use cloudmask::image_loader::load_image;
use cloudmask::pipeline::analyze;
use cloudmask::profiler::with_profiler;
use cloudmask::report::ImageReport;
use cloudmask::settings::DetectionSettings;
use cloudmask::stats::ImageStats;
use cloudmask::{logging, viewer};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Highlight probable cloud regions next to the original image")]
struct Args {
    /// Images to analyse, shown one window at a time
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// Detection settings JSON file (bands, highlight colour, display size, blur)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print statistics only, without opening windows
    #[arg(long)]
    no_window: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.debug);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let settings = DetectionSettings::load(args.config.as_deref())
        .context("failed to load detection settings")?;

    let mut failures = 0usize;
    for path in &args.images {
        if let Err(e) = process_image(path, &settings, !args.no_window) {
            e.log_and_report();
            failures += 1;
        }
    }

    with_profiler(|p| p.log_summary());

    if failures == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        log::warn!("{} of {} images failed", failures, args.images.len());
        Ok(ExitCode::FAILURE)
    }
}

fn process_image(path: &Path, settings: &DetectionSettings, show_window: bool) -> cloudmask::Result<()> {
    let image = load_image(path)?;
    let (width, height) = image.dimensions();
    let stats = ImageStats::compute(&image);

    let analysis = analyze(image, settings)?;

    let report = ImageReport {
        name: path.display().to_string(),
        width,
        height,
        stats,
        resized_to: analysis.resized_to,
        coverage: analysis.coverage(),
    };
    print!("{}", report);

    if show_window {
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let stacked = side_by_side(&analysis.display, &analysis.annotated);
        viewer::show(&title, &stacked)?;
    }

    println!();
    Ok(())
}
