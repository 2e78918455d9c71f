pub mod error;
pub mod mnist_csv;
pub mod utils;

pub use error::DatasetError;
pub use mnist_csv::{load_sample, read_sample, ImageSample};
