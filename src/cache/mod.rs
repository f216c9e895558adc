pub mod file_cache;
pub mod memory_cache;
pub mod store;
pub mod token;
