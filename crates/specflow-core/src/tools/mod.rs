//! Storage adapters for the spec store.
//!
//! The store talks to the file system through the [`fs::FsAdapter`] trait so
//! tests can run against temporary directories and alternative backends stay
//! possible. [`fs_impl::StdFsAdapter`] is the production implementation.

pub mod fs;
pub mod fs_impl;

pub use fs::FsAdapter;
pub use fs_impl::StdFsAdapter;
