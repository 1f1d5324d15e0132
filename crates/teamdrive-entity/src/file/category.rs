//! Content classification by extension.
//!
//! Two rules live here and they are deliberately different: the advisory
//! [`ContentCategory`] used for the stored type tag, and the strict
//! [`ImageFormat`] allow-list for standalone image uploads.

use std::fmt;

use serde::{Deserialize, Serialize};
use teamdrive_core::AppError;

/// Strip a leading dot. Case is kept as uploaded.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

/// Coarse content category recorded on a file's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Image,
    Other,
}

impl ContentCategory {
    /// Classify an extension, with or without its leading dot. Case-insensitive.
    pub fn classify(extension: &str) -> Self {
        match normalize_extension(extension).to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" => Self::Image,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Other => "other",
        }
    }

    /// Build the stored `"<category>/<extension>"` tag.
    ///
    /// The extension keeps its case. A file without an extension gets the
    /// bare category.
    pub fn type_tag(extension: &str) -> String {
        let ext = normalize_extension(extension);
        let category = Self::classify(&ext);
        if ext.is_empty() {
            category.as_str().to_string()
        } else {
            format!("{}/{ext}", category.as_str())
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formats accepted for standalone image uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpg,
    Jpeg,
    Png,
    Svg,
}

impl ImageFormat {
    /// Accept exactly jpg, jpeg, png and svg, lowercase, with or without the
    /// leading dot.
    pub fn from_extension(extension: &str) -> Result<Self, AppError> {
        match extension.strip_prefix('.').unwrap_or(extension) {
            "jpg" => Ok(Self::Jpg),
            "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(AppError::invalid_file_type(format!(
                "Invalid file type: '{extension}'. Expected one of: jpg, jpeg, png, svg"
            ))),
        }
    }

    /// Extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}
