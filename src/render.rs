use crate::datasets::mnist_csv::{ImageSample, IMAGE_COLS, IMAGE_ROWS};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

pub const DEFAULT_SIZE: (u32, u32) = (480, 520);

// Anchor points of matplotlib's viridis, evenly spaced over [0, 1].
const VIRIDIS: [(u8, u8, u8); 5] = [
   (68, 1, 84),
   (59, 82, 139),
   (33, 145, 140),
   (94, 201, 98),
   (253, 231, 37),
];

pub fn viridis(t: f64) -> RGBColor {
   let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
   let scaled = t * (VIRIDIS.len() - 1) as f64;
   let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
   let frac = scaled - lower as f64;
   let (a, b) = (VIRIDIS[lower], VIRIDIS[lower + 1]);
   let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
   RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Position of `value` within `(lo, hi)`; a flat grid maps to 0.
pub fn normalize(value: f64, (lo, hi): (f64, f64)) -> f64 {
   if hi > lo {
      (value - lo) / (hi - lo)
   } else {
      0.0
   }
}

pub fn draw_sample<DB: DrawingBackend>(
   root: &DrawingArea<DB, Shift>,
   sample: &ImageSample,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
   root.fill(&WHITE)?;

   let mut chart = ChartBuilder::on(root)
      .caption(sample.label.to_string(), ("sans-serif", 28))
      .margin(12)
      .x_label_area_size(30)
      .y_label_area_size(30)
      .build_cartesian_2d(0f64..IMAGE_COLS as f64, 0f64..IMAGE_ROWS as f64)?;

   chart
      .configure_mesh()
      .disable_mesh()
      .x_labels(6)
      .y_labels(6)
      .x_label_formatter(&|x| format!("{:.0}", x))
      // Row 0 is drawn at the top, so the y labels count downwards.
      .y_label_formatter(&|y| format!("{:.0}", IMAGE_ROWS as f64 - y))
      .draw()?;

   let range = sample.intensity_range();
   chart.draw_series(sample.pixels.indexed_iter().map(|((row, col), &value)| {
      let (x, top) = (col as f64, (IMAGE_ROWS - row) as f64);
      Rectangle::new(
         [(x, top), (x + 1.0, top - 1.0)],
         viridis(normalize(value, range)).filled(),
      )
   }))?;

   root.present()?;
   Ok(())
}

pub fn render_rgb(sample: &ImageSample, size: (u32, u32)) -> Result<Vec<u8>> {
   let mut buffer = vec![0u8; size.0 as usize * size.1 as usize * 3];
   {
      let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
      draw_sample(&root, sample)
         .map_err(|e| anyhow::anyhow!("{}", e))
         .context("Failed to render image sample.")?;
   }
   Ok(buffer)
}

pub fn save_plot<P: AsRef<Path>>(sample: &ImageSample, path: &P, size: (u32, u32)) -> Result<()> {
   let path = path.as_ref();
   let root = BitMapBackend::new(path, size).into_drawing_area();
   draw_sample(&root, sample)
      .map_err(|e| anyhow::anyhow!("{}", e))
      .with_context(|| format!("Failed to write plot to \"{}\".", path.display()))?;
   Ok(())
}

pub fn save_raw<P: AsRef<Path>>(sample: &ImageSample, path: &P) -> Result<()> {
   let path = path.as_ref();
   sample
      .to_image()
      .save(path)
      .with_context(|| format!("Failed to write image to \"{}\".", path.display()))
}
