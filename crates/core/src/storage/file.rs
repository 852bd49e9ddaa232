use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Read a whole file. `Ok(None)` means the file does not exist;
/// any other I/O failure is a `StorageRead` error.
pub fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, CoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CoreError::StorageRead(format!("{}: {e}", path.display()))),
    }
}

/// Replace `path` with `contents` without ever exposing a half-written file.
///
/// The bytes go to a sibling `<name>.tmp` file first, are flushed to disk,
/// and the temporary file is then renamed over the target. Rename within one
/// directory is atomic, so readers see either the old or the new document.
/// On failure the temporary file is removed and the target is untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), CoreError> {
    let tmp = temp_path(path);
    let result = write_and_sync(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(CoreError::StorageWrite(format!("{}: {e}", path.display())));
    }
    Ok(())
}

fn write_and_sync(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
