use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::TokenStore;

/// Session store for the command-line client. The durable scope is a token
/// file; the scoped storage lives only as long as the process.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    scoped: Option<String>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scoped: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(data) => {
                let token = data.trim().to_string();
                (!token.is_empty()).then_some(token)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read token file, ignoring it");
                None
            }
        }
    }

    fn write_file(&self, token: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(token.as_bytes())?;
        file.write_all(b"\n")
    }

    fn remove_file(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&mut self, token: &str, persistent: bool) -> io::Result<()> {
        if persistent {
            self.scoped = None;
            self.write_file(token)
        } else {
            self.remove_file()?;
            self.scoped = Some(token.to_string());
            Ok(())
        }
    }

    fn read(&self) -> Option<String> {
        self.scoped.clone().or_else(|| self.read_file())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.scoped = None;
        self.remove_file()
    }
}
