//! Post domain models
//!
//! A post is a single uploaded video with a title, optional description, and
//! a public/private visibility flag. Each post is owned by exactly one user,
//! its author.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ValidationError, ValidationResult};
use crate::user::User;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Maximum accepted video size in bytes (500 MiB).
pub const MAX_VIDEO_SIZE: u64 = 500 * 1024 * 1024;

/// A video post.
///
/// # Examples
///
/// ```
/// use board_model::Post;
///
/// let post: Post = serde_json::from_value(serde_json::json!({
///     "id": 9,
///     "title": "Launch demo",
///     "description": null,
///     "video_filename": "4f1c.mp4",
///     "video_original_name": "demo.mp4",
///     "video_size": 1048576,
///     "author_id": 7,
///     "is_public": false,
///     "created_at": "2025-01-15T10:30:00Z",
///     "updated_at": null
/// })).unwrap();
///
/// assert_eq!(post.author_id, 7);
/// assert_eq!(post.video_size_display(), "1.0 MB");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID
    pub id: i64,

    /// Title
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Stored file name on the server
    pub video_filename: String,

    /// File name as uploaded
    pub video_original_name: String,

    /// File size in bytes
    pub video_size: u64,

    /// Owning user
    pub author_id: i64,

    /// Visible to every authenticated user when set
    #[serde(default)]
    pub is_public: bool,

    /// Creation time
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Last modification time
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Embedded author record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
}

impl Post {
    /// Human-readable video size.
    pub fn video_size_display(&self) -> String {
        format_file_size(self.video_size)
    }

    /// Visibility label used in listings.
    pub fn visibility_label(&self) -> &'static str {
        if self.is_public {
            "Public"
        } else {
            "Private"
        }
    }

    /// Author email if the author record was embedded.
    pub fn author_email(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.email.as_str())
    }
}

/// Format a byte count as `B`, `KB`, or `MB` with one decimal.
///
/// # Examples
///
/// ```
/// use board_model::post::format_file_size;
///
/// assert_eq!(format_file_size(512), "512 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// Partial post update. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl PostUpdate {
    /// Update that only changes visibility.
    pub fn visibility(is_public: bool) -> Self {
        Self {
            is_public: Some(is_public),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_public.is_none()
    }

    /// Apply the same length rules as uploads to the fields that are set.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

/// Video container formats accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    Webm,
    Mov,
}

impl VideoFormat {
    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp4" => Some(VideoFormat::Mp4),
            "webm" => Some(VideoFormat::Webm),
            "mov" => Some(VideoFormat::Mov),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => ".mp4",
            VideoFormat::Webm => ".webm",
            VideoFormat::Mov => ".mov",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "video/mp4",
            VideoFormat::Webm => "video/webm",
            VideoFormat::Mov => "video/quicktime",
        }
    }
}

/// Content type for a file name, `application/octet-stream` if unknown.
pub fn content_type_for(name: &str) -> &'static str {
    VideoFormat::from_file_name(name)
        .map(|f| f.content_type())
        .unwrap_or("application/octet-stream")
}

/// A video upload about to be sent as a new post.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    /// Post title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Visibility (public by default)
    pub is_public: bool,

    /// File name including extension
    pub file_name: String,

    /// File contents
    pub content: Vec<u8>,
}

impl VideoUpload {
    /// Creates a public upload with no description.
    pub fn new(title: impl Into<String>, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            title: title.into(),
            description: None,
            is_public: true,
            file_name: file_name.into(),
            content,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Title with surrounding whitespace removed.
    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    /// Trimmed description, or `None` when blank.
    pub fn trimmed_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn format(&self) -> Option<VideoFormat> {
        VideoFormat::from_file_name(&self.file_name)
    }

    /// Check title, description, file presence, extension, and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use board_model::{ValidationError, VideoUpload};
    ///
    /// let upload = VideoUpload::new("  ", "clip.mp4", vec![0; 16]);
    /// assert_eq!(upload.validate(), Err(ValidationError::EmptyTitle));
    ///
    /// let upload = VideoUpload::new("Clip", "clip.avi", vec![0; 16]);
    /// assert!(matches!(upload.validate(), Err(ValidationError::UnsupportedExtension(_))));
    /// ```
    pub fn validate(&self) -> ValidationResult<()> {
        validate_title(&self.title)?;
        if let Some(description) = self.trimmed_description() {
            validate_description(description)?;
        }

        if self.file_name.trim().is_empty() || self.content.is_empty() {
            return Err(ValidationError::MissingFile);
        }
        if self.format().is_none() {
            let ext = Path::new(&self.file_name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| format!(".{}", e.to_ascii_lowercase()))
                .unwrap_or_default();
            return Err(ValidationError::UnsupportedExtension(ext));
        }
        if self.size() > MAX_VIDEO_SIZE {
            return Err(ValidationError::FileTooLarge {
                size: self.size(),
                max: MAX_VIDEO_SIZE,
            });
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong { max: MAX_TITLE_LEN });
    }
    Ok(())
}

fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}
