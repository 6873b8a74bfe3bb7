//! Client-side image upload checks
//!
//! Uploads are validated before any request is built. A rejected file never
//! reaches the network.

use std::path::Path;

use thiserror::Error;

/// MIME types accepted for avatars, card designs and logos
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// Largest accepted upload, in bytes
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Reasons an upload is rejected locally
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PNG or JPG image (got {mime_type})")]
    UnsupportedType { mime_type: String },

    #[error("Image must be 5MB or smaller (got {size} bytes)")]
    TooLarge { size: u64 },

    #[error("The selected file is empty")]
    Empty,

    #[error("Could not read {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// Check type and size of a file about to be uploaded
pub fn validate_upload(mime_type: &str, size: u64) -> Result<(), UploadError> {
    let normalized = mime_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&normalized.as_str()) {
        return Err(UploadError::UnsupportedType {
            mime_type: mime_type.to_string(),
        });
    }
    if size == 0 {
        return Err(UploadError::Empty);
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}

/// An image selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    ///
    /// Type and size are checked before the content is read.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let unreadable = |e: std::io::Error| UploadError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let mime_type = mime_from_extension(path);
        let size = std::fs::metadata(path).map_err(unreadable)?.len();
        validate_upload(mime_type, size)?;
        let bytes = std::fs::read(path).map_err(unreadable)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        validate_upload(&self.mime_type, self.size())
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Image shown in a form while an upload is in flight
///
/// The preview switches to the local file immediately; a failed upload
/// restores whatever was shown before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    committed: Option<String>,
    pending: Option<String>,
}

impl PreviewState {
    pub fn new(current: Option<String>) -> Self {
        Self {
            committed: current,
            pending: None,
        }
    }

    /// Image to display right now
    pub fn displayed(&self) -> Option<&str> {
        self.pending.as_deref().or(self.committed.as_deref())
    }

    /// Stored URL that will be saved with the form
    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    pub fn is_uploading(&self) -> bool {
        self.pending.is_some()
    }

    /// Show a local preview while the upload runs
    pub fn begin(&mut self, local_preview: impl Into<String>) {
        self.pending = Some(local_preview.into());
    }

    /// Upload succeeded; the stored URL replaces the previous image
    pub fn commit(&mut self, url: impl Into<String>) {
        self.committed = Some(url.into());
        self.pending = None;
    }

    /// Upload failed; go back to the previous image
    pub fn rollback(&mut self) {
        self.pending = None;
    }

    /// Remove the image entirely
    pub fn clear(&mut self) {
        self.committed = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_IMAGE_TYPES {
            assert_eq!(validate_upload(mime, 1024), Ok(()));
        }
        assert_eq!(validate_upload("IMAGE/PNG", 1024), Ok(()));
    }

    #[test]
    fn test_rejects_other_types() {
        let err = validate_upload("image/gif", 10).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
        assert!(err.to_string().starts_with("Please upload a PNG or JPG image"));
    }

    #[test]
    fn test_size_boundary() {
        assert_eq!(validate_upload("image/png", MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(
            validate_upload("image/png", MAX_UPLOAD_BYTES + 1),
            Err(UploadError::TooLarge {
                size: MAX_UPLOAD_BYTES + 1
            })
        );
        assert_eq!(validate_upload("image/jpeg", 0), Err(UploadError::Empty));
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a/logo.PNG")), "image/png");
        assert_eq!(mime_from_extension(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = UploadFile::from_path(Path::new("/nonexistent/card.png")).unwrap_err();
        assert!(matches!(err, UploadError::Unreadable { .. }));
    }

    #[test]
    fn test_preview_rollback() {
        let mut preview = PreviewState::new(Some("https://cdn/old.png".to_string()));
        preview.begin("blob:local-1");
        assert_eq!(preview.displayed(), Some("blob:local-1"));
        assert!(preview.is_uploading());
        preview.rollback();
        assert_eq!(preview.displayed(), Some("https://cdn/old.png"));
        assert!(!preview.is_uploading());
    }

    #[test]
    fn test_preview_commit() {
        let mut preview = PreviewState::default();
        preview.begin("blob:local-2");
        preview.commit("https://cdn/new.png");
        assert_eq!(preview.displayed(), Some("https://cdn/new.png"));
        assert_eq!(preview.committed(), Some("https://cdn/new.png"));
    }
}
