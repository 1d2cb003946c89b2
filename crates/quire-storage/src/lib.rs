//! Content storage abstraction for Quire.
//!
//! This crate provides a [`Storage`] trait for reading book content
//! independently of where it lives. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between structure resolution and I/O
//!
//! # Architecture
//!
//! - [`Storage`] trait with `read()`, `exists()` and `scan()`
//! - [`FsStorage`] for a book directory on the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use quire_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for file in storage.scan()? {
//!     println!("{}", file.display());
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorage;
pub use storage::{EXCLUDED_DIRS, Storage, StorageError, StorageErrorKind, is_markdown};
