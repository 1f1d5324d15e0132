//! File domain entities.

pub mod category;
pub mod model;

pub use category::{ContentCategory, ImageFormat, normalize_extension};
pub use model::{CreateFile, File};
