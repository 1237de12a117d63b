//! Filesystem utilities for landing-crew.
//!
//! The cache document and the generated page files are written through
//! [`atomic_write_file`], so a reader never observes a half-written file.

pub mod atomic;

pub use atomic::atomic_write_file;
