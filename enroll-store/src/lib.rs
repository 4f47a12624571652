//! Progress-store backends for the enrollment wizard.
//!
//! The wizard persists its autosave blob through the
//! [`enroll_core::ProgressStore`] trait; this crate supplies the two
//! backends: a JSON file on disk (the browser-local-storage analog) and
//! an in-memory store for tests and throwaway sessions.

mod file;
mod memory;

pub use file::FileProgressStore;
pub use memory::MemoryProgressStore;
