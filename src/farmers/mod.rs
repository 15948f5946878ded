pub mod repo;
pub mod repo_types;

pub use repo::{FarmerStore, MemoryStore, PgFarmerStore};
pub use repo_types::{Farmer, ProfileChanges};
