use std::fmt;
use std::num::NonZeroU64;
use std::path::Path;

use uuid::Uuid;

use crate::image::errors::OwnerIdError;
use crate::image::errors::UploadError;

/// Image record as persisted: stored filename and owning user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub filename: String,
    pub owner: OwnerId,
}

/// Identifier of the user owning an image, taken from a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(NonZeroU64);

impl OwnerId {
    /// Wrap an identifier read back from the database.
    ///
    /// # Errors
    /// * `NotPositive` - Identifier is zero or negative
    pub fn new(id: i64) -> Result<Self, OwnerIdError> {
        u64::try_from(id)
            .ok()
            .and_then(NonZeroU64::new)
            .map(OwnerId)
            .ok_or(OwnerIdError::NotPositive(id))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl From<NonZeroU64> for OwnerId {
    fn from(id: NonZeroU64) -> Self {
        OwnerId(id)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Image file received from a client, validated but not yet stored
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

impl ImageUpload {
    /// Fallback name for uploads whose client filename is empty or a bare path
    pub const DEFAULT_FILENAME: &'static str = "image";

    /// Validate an uploaded file.
    ///
    /// Only the final path component of the client filename is kept.
    ///
    /// # Errors
    /// * `NotAnImage` - Content type does not start with `image/`
    /// * `Empty` - No bytes were uploaded
    pub fn new(
        filename: Option<&str>,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let content_type = content_type.unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(content_type.to_string()));
        }
        if data.is_empty() {
            return Err(UploadError::Empty);
        }

        let filename = filename
            .and_then(|name| Path::new(name).file_name())
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::DEFAULT_FILENAME)
            .to_string();

        Ok(Self {
            filename,
            content_type: content_type.to_string(),
            data,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Name the file is stored under: a UUID v7 (time ordered) in simple
    /// form followed by the client filename.
    pub fn stored_filename(&self) -> String {
        format!("{}{}", Uuid::now_v7().simple(), self.filename)
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Window over one owner's images, ordered by filename
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// `None` means no upper bound
    pub limit: Option<NonZeroU64>,
    pub offset: u64,
}

impl Page {
    /// A limit of zero means unlimited.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: NonZeroU64::new(limit),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_id_must_be_positive() {
        assert_eq!(OwnerId::new(7).unwrap().get(), 7);
        assert_eq!(OwnerId::new(0).unwrap_err(), OwnerIdError::NotPositive(0));
        assert_eq!(OwnerId::new(-1).unwrap_err(), OwnerIdError::NotPositive(-1));
    }

    #[test]
    fn test_upload_requires_image_content_type() {
        let err = ImageUpload::new(Some("notes.txt"), Some("text/plain"), vec![1]).unwrap_err();
        assert_eq!(err, UploadError::NotAnImage("text/plain".to_string()));

        let err = ImageUpload::new(Some("cat.png"), None, vec![1]).unwrap_err();
        assert_eq!(err, UploadError::NotAnImage(String::new()));
    }

    #[test]
    fn test_upload_rejects_empty_body() {
        let err = ImageUpload::new(Some("cat.png"), Some("image/png"), Vec::new()).unwrap_err();
        assert_eq!(err, UploadError::Empty);
    }

    #[test]
    fn test_upload_keeps_only_final_path_component() {
        let upload =
            ImageUpload::new(Some("../../etc/cat.png"), Some("image/png"), vec![1]).unwrap();
        assert_eq!(upload.filename(), "cat.png");

        let upload = ImageUpload::new(Some(".."), Some("image/png"), vec![1]).unwrap();
        assert_eq!(upload.filename(), ImageUpload::DEFAULT_FILENAME);

        let upload = ImageUpload::new(None, Some("image/jpeg"), vec![1]).unwrap();
        assert_eq!(upload.filename(), ImageUpload::DEFAULT_FILENAME);
    }

    #[test]
    fn test_stored_filenames_are_unique() {
        let upload = ImageUpload::new(Some("cat.png"), Some("image/png"), vec![1]).unwrap();

        let first = upload.stored_filename();
        let second = upload.stored_filename();

        assert!(first.ends_with("cat.png"));
        assert_eq!(first.len(), 32 + "cat.png".len());
        assert_ne!(first, second);
    }

    #[test]
    fn test_page_zero_limit_is_unbounded() {
        assert_eq!(Page::new(0, 3).limit, None);
        assert_eq!(Page::new(2, 0).limit, NonZeroU64::new(2));
    }

    #[test]
    fn test_upload_debug_omits_bytes() {
        let upload = ImageUpload::new(Some("cat.png"), Some("image/png"), vec![42; 4]).unwrap();
        let debug = format!("{:?}", upload);
        assert!(debug.contains("size: 4"));
        assert!(!debug.contains("42"));
    }
}
