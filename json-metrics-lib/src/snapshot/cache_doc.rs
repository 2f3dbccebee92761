//! Reading and writing JSON documents on disk.

use crate::Result;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const LOG_TARGET: &str = " cache_doc";

/// Result of loading a document from a file.
#[derive(Debug)]
pub enum LoadResult<T> {
    /// The document was read and parsed.
    Data(T),

    /// No file exists at the path.
    Missing,

    /// The file exists but could not be opened or read.
    Unreadable(ohno::AppError),

    /// The file was read but its contents are not a valid document.
    Corrupt(ohno::AppError),
}

/// Load a document from a file
pub fn load<T>(path: impl AsRef<Path>, context: impl AsRef<str>) -> LoadResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let ctx = context.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!(target: LOG_TARGET, "No {ctx} at '{}'", path.display());
            return LoadResult::Missing;
        }
        Err(e) => {
            return LoadResult::Unreadable(app_err!("unable to open file '{}': {e}", path.display()));
        }
    };

    let reader = BufReader::new(file);
    match serde_json::from_reader(reader) {
        Ok(data) => {
            log::debug!(target: LOG_TARGET, "Loaded {ctx} from '{}'", path.display());
            LoadResult::Data(data)
        }
        Err(e) if e.is_io() => LoadResult::Unreadable(app_err!("unable to read file '{}': {e}", path.display())),
        Err(e) => LoadResult::Corrupt(app_err!("unable to parse file '{}': {e}", path.display())),
    }
}

/// Save a document to a file, replacing any previous contents
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file cannot be written
pub fn save<T>(data: &T, path: impl AsRef<Path>) -> Result<()>
where
    T: Serialize,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    let file = File::create(path).into_app_err_with(|| format!("unable to create file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    // pretty in debug builds, compact in release
    #[cfg(debug_assertions)]
    let result = serde_json::to_writer_pretty(&mut writer, data);
    #[cfg(not(debug_assertions))]
    let result = serde_json::to_writer(&mut writer, data);

    result.into_app_err_with(|| format!("unable to write file '{}'", path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush file '{}'", path.display()))?;
    Ok(())
}
