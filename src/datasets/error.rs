use std::fmt::Display;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum DatasetError {
   SourceUnavailable { path: PathBuf, source: io::Error },
   IndexOutOfRange { index: usize, rows: usize },
   MalformedRecord { row: usize, reason: String },
}

impl DatasetError {
   pub fn kind(&self) -> &'static str {
      match self {
         DatasetError::SourceUnavailable { .. } => "source unavailable",
         DatasetError::IndexOutOfRange { .. } => "index out of range",
         DatasetError::MalformedRecord { .. } => "malformed record",
      }
   }

   pub(crate) fn malformed<S: Into<String>>(row: usize, reason: S) -> DatasetError {
      DatasetError::MalformedRecord {
         row,
         reason: reason.into(),
      }
   }
}

impl Display for DatasetError {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      match self {
         DatasetError::SourceUnavailable { path, source } => write!(
            f,
            "{}: cannot read \"{}\": {}",
            self.kind(),
            path.display(),
            source
         ),
         DatasetError::IndexOutOfRange { index, rows } => write!(
            f,
            "{}: row {} requested but the dataset has {} row(s)",
            self.kind(),
            index,
            rows
         ),
         DatasetError::MalformedRecord { row, reason } => {
            write!(f, "{}: row {}: {}", self.kind(), row, reason)
         }
      }
   }
}

impl std::error::Error for DatasetError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      match self {
         DatasetError::SourceUnavailable { source, .. } => Some(source),
         _ => None,
      }
   }
}
