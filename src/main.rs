use anyhow::Result;
use clap::Parser;
use mnist_row_viewer::config::Config;
use mnist_row_viewer::datasets::load_sample;
use mnist_row_viewer::render::{save_plot, save_raw, DEFAULT_SIZE};
use mnist_row_viewer::viewer;

fn main() -> Result<()> {
   let config = Config::parse();
   env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

   log::info!(
      "Loading row {} from \"{}\"",
      config.index,
      config.data.display()
   );
   let sample = load_sample(&config.data, config.index)?;
   log::info!("Row {} has label {}", config.index, sample.label);

   match &config.save {
      Some(path) if config.raw => {
         save_raw(&sample, path)?;
         log::info!("Saved raw image to \"{}\"", path.display());
      }
      Some(path) => {
         save_plot(&sample, path, DEFAULT_SIZE)?;
         log::info!("Saved plot to \"{}\"", path.display());
      }
      None => viewer::show(&sample)?,
   }
   Ok(())
}
