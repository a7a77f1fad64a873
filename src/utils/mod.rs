pub mod files;

pub use files::{MAX_LIBRARY_SIZE_BYTES, validate_file_size};
