use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_DATASET: &str = "mnist_test.csv";

/// Show one image from an MNIST-style CSV dataset.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about)]
pub struct Config {
   /// Zero-based row of the dataset to display
   pub index: usize,

   /// Dataset file, one `label,p0,...,p783` row per image (`.gz` accepted)
   #[arg(long, default_value = DEFAULT_DATASET)]
   pub data: PathBuf,

   /// Write the figure to this PNG file instead of opening a window
   #[arg(long, value_name = "PATH")]
   pub save: Option<PathBuf>,

   /// With --save, write the bare 28x28 grayscale image
   #[arg(long, requires = "save")]
   pub raw: bool,
}
