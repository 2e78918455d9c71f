use super::error::DatasetError;
use super::utils::open_dataset;
use csv::{ReaderBuilder, StringRecord};
use image::{GrayImage, Luma};
use ndarray::Array2;
use std::io::BufRead;
use std::path::Path;

pub const IMAGE_ROWS: usize = 28;
pub const IMAGE_COLS: usize = 28;
pub const PIXELS_PER_IMAGE: usize = IMAGE_ROWS * IMAGE_COLS;
pub const FIELDS_PER_ROW: usize = PIXELS_PER_IMAGE + 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSample {
   pub label: u32,
   pub pixels: Array2<f64>,
}

impl ImageSample {
   pub fn from_record(row: usize, record: &StringRecord) -> Result<ImageSample, DatasetError> {
      if record.len() != FIELDS_PER_ROW {
         return Err(DatasetError::malformed(
            row,
            format!(
               "expected {} fields, found {}",
               FIELDS_PER_ROW,
               record.len()
            ),
         ));
      }

      let label_field = record[0].trim();
      let label = label_field.parse::<u32>().map_err(|e| {
         DatasetError::malformed(row, format!("invalid label {:?}: {}", label_field, e))
      })?;

      let mut pixels = Array2::zeros((IMAGE_ROWS, IMAGE_COLS));
      for (pixel_index, field) in record.iter().skip(1).enumerate() {
         let field = field.trim();
         let value = field.parse::<f64>().map_err(|e| {
            DatasetError::malformed(
               row,
               format!("invalid pixel {} value {:?}: {}", pixel_index, field, e),
            )
         })?;
         pixels[[pixel_index / IMAGE_COLS, pixel_index % IMAGE_COLS]] = value;
      }

      Ok(ImageSample { label, pixels })
   }

   pub fn flatten(&self) -> Vec<f64> {
      self.pixels.iter().copied().collect()
   }

   pub fn intensity_range(&self) -> (f64, f64) {
      self.pixels
         .iter()
         .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
         })
   }

   pub fn to_image(&self) -> GrayImage {
      let mut img = GrayImage::new(IMAGE_COLS as u32, IMAGE_ROWS as u32);
      for ((row, col), value) in self.pixels.indexed_iter() {
         img.put_pixel(
            col as u32,
            row as u32,
            Luma([value.round().clamp(0.0, 255.0) as u8]),
         );
      }
      img
   }
}

/// Scans `reader` line by line and decodes the line at zero-based `index`.
/// Scanning stops at the matching line; earlier lines are only counted and
/// later lines are never read.
pub fn read_sample<R: BufRead>(mut reader: R, index: usize) -> Result<ImageSample, DatasetError> {
   let mut line = Vec::new();
   let mut lines_seen = 0;
   loop {
      line.clear();
      let read = reader
         .read_until(b'\n', &mut line)
         .map_err(|e| DatasetError::malformed(lines_seen, e.to_string()))?;
      if read == 0 {
         log::debug!("reached end of dataset after {} line(s)", lines_seen);
         return Err(DatasetError::IndexOutOfRange {
            index,
            rows: lines_seen,
         });
      }
      if lines_seen == index {
         log::debug!("found row {} after scanning {} line(s)", index, lines_seen + 1);
         return decode_line(lines_seen, &line);
      }
      lines_seen += 1;
   }
}

fn decode_line(row: usize, line: &[u8]) -> Result<ImageSample, DatasetError> {
   let mut csv_reader = ReaderBuilder::new()
      .has_headers(false)
      .quoting(false)
      .from_reader(line);

   let mut record = StringRecord::new();
   let found = csv_reader
      .read_record(&mut record)
      .map_err(|e| DatasetError::malformed(row, e.to_string()))?;
   if !found {
      return Err(DatasetError::malformed(row, "empty line"));
   }
   ImageSample::from_record(row, &record)
}

pub fn load_sample<P: AsRef<Path>>(path: &P, index: usize) -> Result<ImageSample, DatasetError> {
   let source = open_dataset(path)?;
   read_sample(source, index)
}

#[cfg(test)]
mod tests {
   use super::*;
   use std::io::Cursor;

   fn row(label: &str, pixels: &[f64]) -> String {
      let mut fields = vec![label.to_string()];
      fields.extend(pixels.iter().map(|p| p.to_string()));
      fields.join(",")
   }

   fn blank_with(index: usize, value: f64) -> Vec<f64> {
      let mut pixels = vec![0.0; PIXELS_PER_IMAGE];
      pixels[index] = value;
      pixels
   }

   #[test]
   fn decodes_single_bright_pixel() {
      let data = row("5", &blank_with(300, 255.0));
      let sample = read_sample(Cursor::new(data), 0).unwrap();

      assert_eq!(sample.label, 5);
      assert_eq!(sample.pixels.dim(), (IMAGE_ROWS, IMAGE_COLS));
      assert_eq!(sample.pixels[[10, 20]], 255.0);
      let lit = sample.pixels.iter().filter(|&&v| v != 0.0).count();
      assert_eq!(lit, 1);
   }

   #[test]
   fn selects_requested_row() {
      let data = [
         row("1", &blank_with(0, 10.0)),
         row("2", &blank_with(1, 20.0)),
         row("3", &blank_with(783, 30.0)),
      ]
      .join("\n");

      let sample = read_sample(Cursor::new(data.clone()), 2).unwrap();
      assert_eq!(sample.label, 3);
      assert_eq!(sample.pixels[[27, 27]], 30.0);

      let sample = read_sample(Cursor::new(data), 1).unwrap();
      assert_eq!(sample.label, 2);
      assert_eq!(sample.pixels[[0, 1]], 20.0);
   }

   #[test]
   fn flatten_round_trips_parsed_values() {
      let pixels: Vec<f64> = (0..PIXELS_PER_IMAGE).map(|i| i as f64 * 0.25 + 0.1).collect();
      let data = row("9", &pixels);
      let sample = read_sample(Cursor::new(data), 0).unwrap();
      assert_eq!(sample.flatten(), pixels);
   }

   #[test]
   fn index_past_end_is_out_of_range() {
      let data = format!("{}\n{}\n", row("0", &blank_with(0, 1.0)), row("1", &blank_with(0, 1.0)));
      match read_sample(Cursor::new(data), 2) {
         Err(DatasetError::IndexOutOfRange { index, rows }) => {
            assert_eq!(index, 2);
            assert_eq!(rows, 2);
         }
         other => panic!("expected IndexOutOfRange, got {:?}", other),
      }
   }

   #[test]
   fn empty_source_is_out_of_range() {
      match read_sample(Cursor::new(""), 0) {
         Err(DatasetError::IndexOutOfRange { rows: 0, .. }) => {}
         other => panic!("expected IndexOutOfRange, got {:?}", other),
      }
   }

   #[test]
   fn short_row_is_malformed() {
      match read_sample(Cursor::new("7,0,0,0"), 0) {
         Err(DatasetError::MalformedRecord { row, reason }) => {
            assert_eq!(row, 0);
            assert!(reason.contains("785"), "{reason}");
         }
         other => panic!("expected MalformedRecord, got {:?}", other),
      }
   }

   #[test]
   fn non_numeric_fields_are_malformed() {
      let mut pixels: Vec<String> = vec!["0".to_string(); PIXELS_PER_IMAGE];
      pixels[42] = "bright".to_string();
      let data = format!("4,{}", pixels.join(","));
      assert!(matches!(
         read_sample(Cursor::new(data), 0),
         Err(DatasetError::MalformedRecord { .. })
      ));

      let data = row("seven", &blank_with(0, 0.0));
      assert!(matches!(
         read_sample(Cursor::new(data), 0),
         Err(DatasetError::MalformedRecord { .. })
      ));
   }

   #[test]
   fn only_the_selected_row_is_validated() {
      let data = format!("garbage\n{}\n", row("8", &blank_with(5, 1.0)));
      let sample = read_sample(Cursor::new(data), 1).unwrap();
      assert_eq!(sample.label, 8);
   }

   #[test]
   fn blank_lines_count_as_rows() {
      let data = format!("{}\n\n{}\n", row("1", &blank_with(0, 1.0)), row("2", &blank_with(0, 1.0)));

      match read_sample(Cursor::new(data.clone()), 1) {
         Err(DatasetError::MalformedRecord { row, .. }) => assert_eq!(row, 1),
         other => panic!("expected MalformedRecord, got {:?}", other),
      }
      assert_eq!(read_sample(Cursor::new(data.clone()), 2).unwrap().label, 2);
      assert!(matches!(
         read_sample(Cursor::new(data), 3),
         Err(DatasetError::IndexOutOfRange { index: 3, rows: 3 })
      ));
   }

   #[test]
   fn stray_quote_in_earlier_line_does_not_shift_rows() {
      let data = format!("\"junk\n{}\n", row("4", &blank_with(7, 9.0)));
      let sample = read_sample(Cursor::new(data), 1).unwrap();
      assert_eq!(sample.label, 4);
      assert_eq!(sample.pixels[[0, 7]], 9.0);
   }

   #[test]
   fn tolerates_crlf_and_padding() {
      let pixels: Vec<String> = (0..PIXELS_PER_IMAGE).map(|i| format!(" {}", i % 256)).collect();
      let data = format!(" 6 ,{}\r\n", pixels.join(","));
      let sample = read_sample(Cursor::new(data), 0).unwrap();
      assert_eq!(sample.label, 6);
      assert_eq!(sample.pixels[[1, 0]], 28.0);
   }

   #[test]
   fn to_image_clamps_intensities() {
      let mut pixels = blank_with(29, 300.0);
      pixels[0] = -4.0;
      pixels[1] = 127.6;
      let sample = read_sample(Cursor::new(row("1", &pixels)), 0).unwrap();
      let img = sample.to_image();

      assert_eq!(img.dimensions(), (28, 28));
      assert_eq!(img.get_pixel(0, 0).0, [0]);
      assert_eq!(img.get_pixel(1, 0).0, [128]);
      assert_eq!(img.get_pixel(1, 1).0, [255]);
   }

   #[test]
   fn intensity_range_spans_grid() {
      let sample = read_sample(Cursor::new(row("3", &blank_with(100, 200.0))), 0).unwrap();
      assert_eq!(sample.intensity_range(), (0.0, 200.0));
   }
}
