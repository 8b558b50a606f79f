//! Disk storage for uploaded contract PDFs and SOS media.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::middleware::error_handling::{AppError, Result};

pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to create storage directory: {}", e))
            })?;
        }

        Ok(Self { base_path })
    }

    /// Save under a uuid-prefixed, sanitized name; returns the relative
    /// path recorded in the database.
    pub fn save_file(&self, filename: &str, data: &[u8]) -> Result<String> {
        let safe_filename = format!("{}-{}", Uuid::new_v4(), sanitize_filename(filename));
        let file_path = self.base_path.join(&safe_filename);

        let mut file = fs::File::create(&file_path)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create file: {}", e)))?;
        file.write_all(data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write file: {}", e)))?;

        Ok(safe_filename)
    }

    pub fn read_file(&self, relative_path: &str) -> Result<Vec<u8>> {
        // Refuse anything that could escape the storage root.
        if relative_path.contains("..") || relative_path.starts_with('/') {
            return Err(AppError::BadRequest("Invalid file path".to_string()));
        }
        let full_path = self.base_path.join(relative_path);
        fs::read(&full_path)
            .map_err(|_| AppError::NotFound("File not found on disk".to_string()))
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        self.base_path.join(relative_path).exists()
    }
}

/// Strip path separators and control characters from a client filename.
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_path_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("deed.pdf"), "deed.pdf");
    }

    #[test]
    fn empty_name_falls_back() {
        assert_eq!(sanitize_filename(""), "upload");
    }
}
