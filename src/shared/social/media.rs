//! Media attachments.
//!
//! A post carries an ordered sequence of media items, each pointing at a
//! file under the media store. The `type` key in the serialized form keeps
//! the storage format of existing post documents.

use serde::{Deserialize, Serialize};

/// Kind of media attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an uploaded file by its MIME type
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.starts_with("image/") {
            Some(MediaKind::Image)
        } else if content_type.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// One media attachment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Attachment kind
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// URL the file is served from
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_content_type() {
        assert_eq!(
            MediaKind::from_content_type("image/png"),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_content_type("video/mp4"),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_content_type("application/pdf"), None);
    }

    #[test]
    fn test_wire_shape_uses_type_key() {
        let item = MediaItem {
            kind: MediaKind::Image,
            url: "/uploads/u/f.png".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["url"], "/uploads/u/f.png");
    }
}
