//! Preference store implementations.

mod file_store;
mod memory_store;

pub use file_store::FilePreferenceStore;
pub use memory_store::MemoryPreferenceStore;
