//! Client-side upload limits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ImageFile, MediaError};

/// Image formats the storefront accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Jpeg,
    Png,
    Webp,
}

impl ImageType {
    /// All accepted formats.
    pub const ALL: [ImageType; 3] = [ImageType::Jpeg, ImageType::Png, ImageType::Webp];

    /// MIME type string.
    pub fn mime(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Webp => "image/webp",
        }
    }

    /// Parse a MIME type, ignoring case and parameters.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageType::Jpeg),
            "image/png" => Some(ImageType::Png),
            "image/webp" => Some(ImageType::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl FromStr for ImageType {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ImageType::Jpeg),
            "png" => Ok(ImageType::Png),
            "webp" => Ok(ImageType::Webp),
            other => ImageType::from_mime(other)
                .ok_or_else(|| MediaError::UnsupportedType(other.to_string())),
        }
    }
}

/// Upload limits checked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Maximum file size in bytes.
    pub max_bytes: u64,
    /// Accepted formats.
    pub allowed_types: Vec<ImageType>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024, // 5 MB
            allowed_types: ImageType::ALL.to_vec(),
        }
    }
}

impl UploadPolicy {
    /// Create a policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum file size in bytes.
    pub fn with_max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Set accepted formats.
    pub fn with_allowed_types(mut self, types: impl IntoIterator<Item = ImageType>) -> Self {
        self.allowed_types = types.into_iter().collect();
        self
    }

    /// Validate the policy itself.
    pub fn validate(&self) -> Result<(), MediaError> {
        if self.max_bytes == 0 {
            return Err(MediaError::InvalidPolicy("max_bytes cannot be 0".into()));
        }
        if self.allowed_types.is_empty() {
            return Err(MediaError::InvalidPolicy("allowed_types cannot be empty".into()));
        }
        Ok(())
    }

    /// Check a file against the policy.
    ///
    /// The type is checked before the size.
    pub fn check(&self, file: &ImageFile) -> Result<ImageType, MediaError> {
        let image_type = ImageType::from_mime(&file.mime_type)
            .filter(|t| self.allowed_types.contains(t))
            .ok_or_else(|| MediaError::UnsupportedType(file.mime_type.clone()))?;

        let size = file.size();
        if size > self.max_bytes {
            return Err(MediaError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(image_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.max_bytes, 5 * 1024 * 1024);
        assert_eq!(policy.allowed_types.len(), 3);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_mime_parsing() {
        assert_eq!(ImageType::from_mime("IMAGE/PNG"), Some(ImageType::Png));
        assert_eq!(ImageType::from_mime("image/jpeg; q=1"), Some(ImageType::Jpeg));
        assert_eq!(ImageType::from_mime("image/gif"), None);
        assert_eq!("webp".parse::<ImageType>().unwrap(), ImageType::Webp);
        assert!("gif".parse::<ImageType>().is_err());
    }

    #[test]
    fn test_rejects_oversized() {
        let policy = UploadPolicy::default();
        let file = ImageFile::new("big.png", "image/png", vec![0; 6 * 1024 * 1024]);
        assert_eq!(
            policy.check(&file),
            Err(MediaError::TooLarge {
                size: 6 * 1024 * 1024,
                limit: 5 * 1024 * 1024
            })
        );
    }

    #[test]
    fn test_exact_ceiling_is_accepted() {
        let policy = UploadPolicy::new().with_max_bytes(4);
        let file = ImageFile::new("a.webp", "image/webp", vec![0; 4]);
        assert_eq!(policy.check(&file), Ok(ImageType::Webp));
    }

    #[test]
    fn test_rejects_type_outside_allowlist() {
        let policy = UploadPolicy::new().with_allowed_types([ImageType::Png]);
        let file = ImageFile::new("a.jpg", "image/jpeg", vec![0; 10]);
        assert!(matches!(policy.check(&file), Err(MediaError::UnsupportedType(_))));

        let gif = ImageFile::new("a.gif", "image/gif", vec![0; 10]);
        assert!(UploadPolicy::default().check(&gif).unwrap_err().is_validation());
    }

    #[test]
    fn test_invalid_policy() {
        assert!(UploadPolicy::new().with_max_bytes(0).validate().is_err());
        assert!(UploadPolicy::new().with_allowed_types(Vec::new()).validate().is_err());
    }

    #[test]
    fn test_policy_serde() {
        let policy: UploadPolicy =
            serde_json::from_str(r#"{"max_bytes": 1024, "allowed_types": ["png"]}"#).unwrap();
        assert_eq!(policy.max_bytes, 1024);
        assert_eq!(policy.allowed_types, vec![ImageType::Png]);
    }
}
