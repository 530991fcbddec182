pub mod directory;
pub mod in_memory_repo;
pub mod matching;
pub mod postgres_repo;
