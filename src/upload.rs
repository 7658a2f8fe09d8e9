use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::preview::sniff_mime;
use crate::types::Role;

/// Extensions the backend accepts for uploaded photos.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported file extension '{extension}'. Supported image extensions: {supported}.")]
    UnsupportedExtension {
        extension: String,
        supported: String,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One file field of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Multipart form body for `POST /process`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    files: Vec<UploadFile>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: UploadFile) -> &mut Self {
        self.files.push(file);
        self
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Reads `path` into a field named after `role`.
    pub async fn attach(&mut self, role: Role, path: &Path) -> Result<&mut Self, UploadError> {
        let file = read_upload_file(role.as_str(), path).await?;
        Ok(self.push(file))
    }

    /// Builds the three-photo form the backend expects.
    pub async fn from_role_paths(paths: &[(Role, PathBuf)]) -> Result<Self, UploadError> {
        let mut form = Self::new();
        for (role, path) in paths {
            form.attach(*role, path).await?;
        }
        Ok(form)
    }
}

/// Checks that `path` is an existing file with an accepted extension.
pub fn allowed_file(path: &Path) -> Result<(), UploadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedExtension {
            extension: if extension.is_empty() {
                "no extension".to_string()
            } else {
                extension
            },
            supported: ALLOWED_EXTENSIONS.join(", "),
        });
    }

    if !path.is_file() {
        return Err(UploadError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }
    Ok(())
}

async fn read_upload_file(field: &str, path: &Path) -> Result<UploadFile, UploadError> {
    allowed_file(path)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| UploadError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| field.to_string());
    let mime = sniff_mime(&bytes, path).to_string();
    Ok(UploadFile {
        field: field.to_string(),
        file_name,
        mime,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    fn temp_file_with_extension(ext: &str) -> tempfile::NamedTempFile {
        Builder::new()
            .suffix(&format!(".{}", ext))
            .tempfile()
            .expect("create temp file")
    }

    #[test]
    fn allows_png_jpg_jpeg_case_insensitively() {
        for ext in ["png", "jpg", "jpeg", "JPG"] {
            let file = temp_file_with_extension(ext);
            assert!(allowed_file(file.path()).is_ok(), "{ext} should be allowed");
        }
    }

    #[test]
    fn rejects_other_extensions() {
        let file = temp_file_with_extension("gif");
        assert!(matches!(
            allowed_file(file.path()),
            Err(UploadError::UnsupportedExtension { extension, .. }) if extension == "gif"
        ));
        assert!(matches!(
            allowed_file(Path::new("label")),
            Err(UploadError::UnsupportedExtension { extension, .. }) if extension == "no extension"
        ));
    }

    #[test]
    fn rejects_missing_files() {
        assert!(matches!(
            allowed_file(Path::new("/tmp/does-not-exist.png")),
            Err(UploadError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn form_uses_role_names_as_fields() {
        let primary = temp_file_with_extension("jpg");
        std::fs::write(primary.path(), b"front").unwrap();
        let label = temp_file_with_extension("png");
        std::fs::write(label.path(), b"label").unwrap();

        let form = UploadForm::from_role_paths(&[
            (Role::Primary, primary.path().to_path_buf()),
            (Role::Label, label.path().to_path_buf()),
        ])
        .await
        .expect("build form");

        let fields: Vec<&str> = form.files().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["primary", "label"]);
        assert_eq!(form.files()[0].bytes, b"front");
        assert_eq!(form.files()[0].mime, "image/jpeg");
        assert!(form.files()[1].file_name.ends_with(".png"));
    }
}
