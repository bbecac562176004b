use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Destination for snapshot files, addressed by file name
pub trait Sink {
    /// Replace the whole content of `name`
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;
    fn read(&self, name: &str) -> Result<Vec<u8>>;
}

/// Writes snapshots into a directory on disk
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Sink for FileSink {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(name);
        // Write beside the target, then rename over it.
        let tmp = self.dir.join(format!(".{}.tmp", name));

        fs::write(&tmp, bytes)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|source| {
                fs::remove_file(&tmp).ok();
                Error::Write { path, source }
            })
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path(name);
        fs::read(&path).map_err(|source| Error::Read { path, source })
    }
}

/// Keeps snapshots in memory
#[derive(Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(name).cloned()
    }

    /// Stored file names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Sink for MemorySink {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let mut files = self.files.lock().map_err(|_| Error::Write {
            path: PathBuf::from(name),
            source: io::Error::new(io::ErrorKind::Other, "memory sink poisoned"),
        })?;
        files.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.get(name).ok_or_else(|| Error::Read {
            path: PathBuf::from(name),
            source: io::Error::new(io::ErrorKind::NotFound, "no such snapshot"),
        })
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        (**self).write(name, bytes)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        (**self).read(name)
    }
}
