use crate::datasets::ImageSample;
use crate::render::{render_rgb, DEFAULT_SIZE};
use anyhow::{anyhow, Context, Result};
use eframe::egui;

struct SampleViewer {
   image: Option<egui::ColorImage>,
   texture: Option<egui::TextureHandle>,
}

impl SampleViewer {
   fn new(image: egui::ColorImage) -> Self {
      Self {
         image: Some(image),
         texture: None,
      }
   }
}

impl eframe::App for SampleViewer {
   fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
      if let Some(image) = self.image.take() {
         self.texture = Some(ctx.load_texture("image-sample", image, egui::TextureOptions::NEAREST));
      }

      egui::CentralPanel::default()
         .frame(egui::Frame::NONE.fill(egui::Color32::WHITE))
         .show(ctx, |ui| {
            if let Some(texture) = &self.texture {
               ui.centered_and_justified(|ui| {
                  ui.image(texture);
               });
            }
         });
   }
}

/// Opens a window showing the sample and blocks until it is closed.
pub fn show(sample: &ImageSample) -> Result<()> {
   let (width, height) = DEFAULT_SIZE;
   let rgb = render_rgb(sample, DEFAULT_SIZE)?;
   let image = egui::ColorImage::from_rgb([width as usize, height as usize], &rgb);

   let title = format!("Label {}", sample.label);
   let native_options = eframe::NativeOptions {
      viewport: egui::ViewportBuilder::default()
         .with_title(title.clone())
         .with_inner_size([width as f32, height as f32]),
      ..Default::default()
   };

   log::info!("Opening viewer window \"{}\"", title);
   eframe::run_native(
      &title,
      native_options,
      Box::new(move |_cc: &eframe::CreationContext<'_>| Ok(Box::new(SampleViewer::new(image)))),
   )
   .map_err(|e| anyhow!("{}", e))
   .context("Failed to open the viewer window.")
}
