//! Local validation of the image selected for upload.
//!
//! Everything here runs before any request is sent, so a bad selection never
//! costs a round-trip to the analysis service.

use std::path::Path;

use crate::error::FinderError;

/// Extensions accepted by the analysis service, with the MIME type sent for each.
const ALLOWED_IMAGE_TYPES: [(&str, &str); 5] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// An image that passed local checks and is ready to be posted.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validates an in-memory image.
    ///
    /// # Errors
    ///
    /// - [`FinderError::NoImage`] if `file_name` is blank.
    /// - [`FinderError::InvalidImage`] if the extension is not an accepted
    ///   image type or the file is empty.
    /// - [`FinderError::ImageTooLarge`] if `bytes` exceeds `max_bytes`.
    pub fn from_bytes(
        file_name: &str,
        bytes: Vec<u8>,
        max_bytes: u64,
    ) -> Result<Self, FinderError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(FinderError::NoImage);
        }

        let mime_type = mime_type_for(file_name).ok_or_else(|| FinderError::InvalidImage {
            file_name: file_name.to_string(),
            reason: "not a PNG, JPEG, GIF or WEBP file".to_string(),
        })?;

        if bytes.is_empty() {
            return Err(FinderError::InvalidImage {
                file_name: file_name.to_string(),
                reason: "file is empty".to_string(),
            });
        }

        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if size > max_bytes {
            return Err(FinderError::ImageTooLarge {
                file_name: file_name.to_string(),
                size,
                max: max_bytes,
            });
        }

        Ok(Self {
            file_name: file_name.to_string(),
            mime_type,
            bytes,
        })
    }

    /// Reads and validates an image from disk.
    ///
    /// The extension and the on-disk size are checked before the file is read.
    ///
    /// # Errors
    ///
    /// Same as [`ImageUpload::from_bytes`], plus [`FinderError::ReadImage`]
    /// when the file cannot be read.
    pub async fn read(path: &Path, max_bytes: u64) -> Result<Self, FinderError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or(FinderError::NoImage)?;

        if mime_type_for(file_name).is_none() {
            return Err(FinderError::InvalidImage {
                file_name: file_name.to_string(),
                reason: "not a PNG, JPEG, GIF or WEBP file".to_string(),
            });
        }

        let read_error = |source: std::io::Error| FinderError::ReadImage {
            path: path.display().to_string(),
            source,
        };
        let size = tokio::fs::metadata(path).await.map_err(read_error)?.len();
        if size > max_bytes {
            return Err(FinderError::ImageTooLarge {
                file_name: file_name.to_string(),
                size,
                max: max_bytes,
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(read_error)?;
        Self::from_bytes(file_name, bytes, max_bytes)
    }
}

fn mime_type_for(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(allowed, _)| *allowed == extension)
        .map(|(_, mime)| *mime)
}
