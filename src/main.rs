use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use shadowpunker::{
    Job, OutputKind,
    binarize::BinarizeOptions,
    config::{ConfigOverrides, ModelConfig, OverallShape},
    run,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    Square,
    Circle,
}

impl From<Shape> for OverallShape {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Square => OverallShape::Square,
            Shape::Circle => OverallShape::Circle,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Emit {
    /// OpenSCAD script
    Scad,
    /// Normalized relief heights as CSV
    Surface,
}

impl From<Emit> for OutputKind {
    fn from(emit: Emit) -> Self {
        match emit {
            Emit::Scad => OutputKind::Scad,
            Emit::Surface => OutputKind::Surface,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "shadowpunker",
    version,
    about = "Turn two black and white pictures into a dual-shadow relief for OpenSCAD"
)]
struct Cli {
    /// Left and right pictures (csv or png/gif/...)
    #[arg(num_args = 2, value_names = ["LEFT", "RIGHT"], required = true)]
    imgs: Vec<PathBuf>,

    /// Unit width, must be even (default 20)
    #[arg(short, long)]
    unit: Option<usize>,

    /// Binary cutoff for the left picture
    #[arg(long, allow_negative_numbers = true)]
    lthresh: Option<i32>,

    /// Binary cutoff for the right picture
    #[arg(long, allow_negative_numbers = true)]
    rthresh: Option<i32>,

    /// Flip the bits of the left picture
    #[arg(long)]
    lflip: bool,

    /// Flip the bits of the right picture
    #[arg(long)]
    rflip: bool,

    /// JSON model config, flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Blank pixels added on every side, at most 1024 (default 2)
    #[arg(long)]
    border: Option<usize>,

    /// Border pixel value, 0 or 1 (default 0)
    #[arg(long)]
    border_fill: Option<u8>,

    /// Plastic under the lowest ledge (default 40)
    #[arg(long)]
    base_height: Option<f64>,

    /// Printer nozzle width in mm (default 0.4)
    #[arg(long)]
    nozzle: Option<f64>,

    /// Crop of the finished relief (default square)
    #[arg(long, value_enum)]
    shape: Option<Shape>,

    /// Document written to stdout
    #[arg(long, value_enum, default_value = "scad")]
    emit: Emit,

    /// Save the effective model config as JSON
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            unit_width: self.unit,
            border: self.border,
            border_fill: self.border_fill,
            base_height: self.base_height,
            printer_nozzle_size: self.nozzle,
            overall_shape: self.shape.map(OverallShape::from),
        }
    }

    fn model_config(&self) -> Result<ModelConfig> {
        ModelConfig::resolve(self.config.as_ref(), &self.overrides())
            .context("Invalid model configuration")
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.model_config()?;

    if let Some(path) = &cli.write_config {
        config
            .write_config(path)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        info!("wrote config to {}", path.display());
    }

    let job = Job {
        left: cli.imgs[0].clone(),
        right: cli.imgs[1].clone(),
        left_options: BinarizeOptions {
            threshold: cli.lthresh,
            flip: cli.lflip,
        },
        right_options: BinarizeOptions {
            threshold: cli.rthresh,
            flip: cli.rflip,
        },
        config,
        output: cli.emit.into(),
    };

    let document = run(&job)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(document.as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to write to stdout")?;
    Ok(())
}
