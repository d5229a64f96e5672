//! ClassStore adapters.

pub mod json_store;
pub mod memory_store;

pub use json_store::JsonClassStore;
pub use memory_store::MemoryClassStore;
