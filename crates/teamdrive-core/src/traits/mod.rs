//! Trait seams implemented by other crates.

pub mod storage;

pub use self::storage::{ByteStream, StorageGateway, bytes_stream};
