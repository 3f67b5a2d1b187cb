//! Filesystem adapters: the local disk, and an in-memory tree for tests and dry runs.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
