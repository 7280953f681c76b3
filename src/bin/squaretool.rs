use clap::{Parser, Subcommand};
use log::{error, info};
use square_detect::tools::{
    ToolError, bench_limit_from_env, dataset_iter, dataset_root_from_env, load_gray, load_rgb,
};
use square_detect::{SquareConfig, SquareDetector, SquareRenderer, SquareSet};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "squaretool", version, about = "Square detection CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run square detection on a single image and print candidates as JSON
    Detect {
        #[arg(long)]
        image: PathBuf,
        /// JSON configuration file; defaults are used for missing fields
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the frame with squares drawn on it
        #[arg(long)]
        output: Option<PathBuf>,
        /// Use the R, G and B planes as separate channel samples
        #[arg(long)]
        rgb: bool,
    },
    /// Iterate a dataset and run detection once per image
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration as JSON
    DefaultConfig,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Detect {
            image,
            config,
            output,
            rgb,
        } => detect_cmd(&image, config.as_deref(), output.as_deref(), rgb),
        Command::Batch {
            root,
            limit,
            config,
        } => batch_cmd(root, limit, config.as_deref()),
        Command::DefaultConfig => default_config_cmd(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("squaretool: {err}");
            ExitCode::FAILURE
        }
    }
}

fn build_detector(config: Option<&Path>) -> Result<SquareDetector, ToolError> {
    let config = match config {
        Some(path) => SquareConfig::load(path)?,
        None => SquareConfig::default(),
    };
    Ok(SquareDetector::new(config)?)
}

fn detect_cmd(
    image: &Path,
    config: Option<&Path>,
    output: Option<&Path>,
    rgb: bool,
) -> Result<(), ToolError> {
    let detector = build_detector(config)?;

    let start = Instant::now();
    let (squares, mut canvas) = if rgb {
        let frame = load_rgb(image)?;
        (detector.detect_rgb(&frame), frame)
    } else {
        let frame = load_gray(image)?;
        let squares = detector.detect(&frame);
        let canvas = image::DynamicImage::ImageLuma8(frame).to_rgb8();
        (squares, canvas)
    };
    let elapsed = start.elapsed();

    info!(
        "{}: {}x{} -> {} squares ({:.2?})",
        image.display(),
        canvas.width(),
        canvas.height(),
        squares.len(),
        elapsed
    );
    println!("{}", serde_json::to_string_pretty(&squares).map_err(std::io::Error::other)?);

    if let Some(output) = output {
        let drawn = SquareRenderer::default().render(&mut canvas, &squares);
        canvas.save(output)?;
        info!("drew {} of {} squares to {}", drawn, squares.len(), output.display());
    }
    Ok(())
}

fn batch_cmd(
    root: Option<PathBuf>,
    limit: Option<usize>,
    config: Option<&Path>,
) -> Result<(), ToolError> {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let limit = limit.or_else(bench_limit_from_env);
    let detector = build_detector(config)?;

    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if images.is_empty() {
        return Err(ToolError::EmptyDataset(root));
    }

    let mut total_elapsed = Duration::default();
    let mut total_squares = 0usize;
    let mut processed = 0usize;

    for path in &images {
        let frame = match load_gray(path) {
            Ok(frame) => frame,
            Err(err) => {
                eprintln!("Failed to load {}: {}", path.display(), err);
                continue;
            }
        };

        let start = Instant::now();
        let squares: SquareSet = detector.detect(&frame);
        let elapsed = start.elapsed();
        total_elapsed += elapsed;
        total_squares += squares.len();
        processed += 1;

        println!(
            "{}: {}x{} -> {} squares ({:.2?})",
            path.display(),
            frame.width(),
            frame.height(),
            squares.len(),
            elapsed
        );
    }

    if processed > 0 {
        println!(
            "Processed {} images, {} squares, avg {:.2?} per image",
            processed,
            total_squares,
            total_elapsed / processed as u32
        );
    }
    Ok(())
}

fn default_config_cmd() -> Result<(), ToolError> {
    println!("{}", SquareConfig::default().to_json()?);
    Ok(())
}
