use super::error::DatasetError;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn is_gz<P: AsRef<Path>>(path: &P) -> bool {
   path
      .as_ref()
      .extension()
      .map_or(false, |ext| ext.eq_ignore_ascii_case("gz"))
}

// The file is closed when the returned reader drops.
pub fn open_dataset<P: AsRef<Path>>(path: &P) -> Result<Box<dyn BufRead>, DatasetError> {
   let path = path.as_ref();
   let file = File::open(path).map_err(|source| DatasetError::SourceUnavailable {
      path: path.to_path_buf(),
      source,
   })?;

   if is_gz(&path) {
      Ok(Box::new(BufReader::new(GzDecoder::new(file))))
   } else {
      Ok(Box::new(BufReader::new(file)))
   }
}
