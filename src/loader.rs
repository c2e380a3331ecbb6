use polars::prelude::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;
use tracing::{debug, info, trace};

use crate::domain::{TEAM_COLUMN, TVError};

#[derive(Debug)]
pub struct FileInfo {
    path: PathBuf,
    file_size: u64,
}

/// One parsed CSV row. All records of a load share the same header.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    header: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .position(|h| h == key)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    /// Column names in header order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.header.iter().map(String::as_str)
    }

    pub fn team(&self) -> &str {
        self.get(TEAM_COLUMN).unwrap_or("")
    }
}

/// The full record set of one successful load. Never mutated afterwards.
#[derive(Debug, Default)]
pub struct Dataset {
    header: Arc<[String]>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let header: Arc<[String]> = header.into();
        let records = rows
            .into_iter()
            .map(|values| Record {
                header: Arc::clone(&header),
                values,
            })
            .collect();
        Self { header, records }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Team identifiers without duplicates, in order of first appearance.
    pub fn unique_teams(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(Record::team)
            .filter(|team| seen.insert(*team))
            .map(str::to_string)
            .collect()
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset, TVError> {
    let file_info = get_file_info(path)?;
    let start_time = Instant::now();

    let df = load_csv(&file_info.path)?.collect()?;

    // Every column is converted to strings in its own rayon task.
    let c_: Result<Vec<(String, Vec<String>)>, _> = df
        .get_column_names()
        .par_iter()
        .map(|name| load_column(&df, name))
        .collect();
    let columns = c_?;

    let mut rows = vec![Vec::with_capacity(columns.len()); df.height()];
    let mut header = Vec::with_capacity(columns.len());
    for (name, data) in columns {
        header.push(name);
        for (row, value) in rows.iter_mut().zip(data) {
            row.push(value);
        }
    }

    let dataset = Dataset::new(header, rows);
    info!(
        "Loaded {} records with {} columns ({} bytes) in {}ms",
        dataset.len(),
        dataset.header().len(),
        file_info.file_size,
        start_time.elapsed().as_millis()
    );
    debug!("Header: {:?}", dataset.header());
    Ok(dataset)
}

fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    // No schema inference: cells are kept exactly as written.
    LazyCsvReader::new(PlPath::Local(Arc::from(path)))
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()
}

fn load_column(df: &DataFrame, col_name: &str) -> Result<(String, Vec<String>), PolarsError> {
    let col = df.column(col_name)?.cast(&DataType::String)?;
    let series = col.str()?;
    let data = series
        .into_iter()
        .map(|value| value.map(str::to_string).unwrap_or_default())
        .collect();
    Ok((col_name.to_string(), data))
}

fn get_file_info(path: &Path) -> Result<FileInfo, TVError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TVError::FileNotFound,
        ErrorKind::PermissionDenied => TVError::PermissionDenied,
        _ => TVError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(TVError::LoadingFailed("Not a file!".into()));
    }

    let is_csv = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(TVError::UnknownFileType);
    }

    Ok(FileInfo {
        path: path.to_path_buf(),
        file_size: metadata.len(),
    })
}

/// Receiving end of a background load started with [`spawn_load`].
pub struct LoadHandle {
    path: PathBuf,
    receiver: Receiver<Result<Dataset, TVError>>,
}

pub fn spawn_load(path: PathBuf) -> LoadHandle {
    let (sender, receiver) = mpsc::channel();
    let worker_path = path.clone();
    rayon::spawn(move || {
        let result = load_dataset(&worker_path);
        if sender.send(result).is_err() {
            trace!("Load result dropped, nobody is waiting for it");
        }
    });
    LoadHandle { path, receiver }
}

impl LoadHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non blocking. Yields the load result once it is available.
    pub fn poll(&self) -> Option<Result<Dataset, TVError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TVError::LoadingFailed(
                "loader stopped without a result".into(),
            ))),
        }
    }

    #[cfg(test)]
    pub fn wait(self) -> Result<Dataset, TVError> {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(TVError::LoadingFailed("loader stopped".into())))
    }
}
