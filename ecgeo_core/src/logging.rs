//! JSON-line logging of computed indices.
//!
//! Each record summarizes one index vector (name, method, defined count and
//! range) and is appended as a single JSON object per line.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexLogEntry {
    pub index: String,
    pub method: String,
    pub len: usize,
    /// Entries that are finite.
    pub defined: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub timestamp_ms: u128,
}

impl IndexLogEntry {
    pub fn summarize(index: &str, method: &str, values: ArrayView1<'_, f64>) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let min = finite.iter().copied().reduce(f64::min);
        let max = finite.iter().copied().reduce(f64::max);
        Self {
            index: index.to_string(),
            method: method.to_string(),
            len: values.len(),
            defined: finite.len(),
            min,
            max,
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        }
    }
}

/// Append a summary of `values` to the JSON-line file at `path`.
pub fn log_index<P: AsRef<Path>>(
    path: P,
    index: &str,
    method: &str,
    values: ArrayView1<'_, f64>,
) -> io::Result<()> {
    let entry = IndexLogEntry::summarize(index, method, values);
    append_json_line(path, &entry)
}
