use crate::core::Storage;
use crate::utils::error::{Result, SpliceError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(self.resolve(path)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SpliceError::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => SpliceError::InputUnreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let target = self.resolve(path);
        let unwritable = |source: std::io::Error| SpliceError::OutputUnwritable {
            path: path.to_path_buf(),
            source,
        };

        // 先寫到同目錄的暫存檔，全部寫完才換上，失敗時原檔不動
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = NamedTempFile::new_in(&dir).map_err(unwritable)?;

        match fs::metadata(&target) {
            Ok(metadata) => temp
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(unwritable)?,
            #[cfg(unix)]
            Err(_) => {
                use std::os::unix::fs::PermissionsExt;
                temp.as_file()
                    .set_permissions(fs::Permissions::from_mode(0o644))
                    .map_err(unwritable)?
            }
            #[cfg(not(unix))]
            Err(_) => {}
        }

        temp.write_all(data).map_err(unwritable)?;
        temp.as_file().sync_all().map_err(unwritable)?;
        temp.persist(&target).map_err(|e| unwritable(e.error))?;

        tracing::debug!("Replaced {} ({} bytes)", target.display(), data.len());
        Ok(())
    }
}
