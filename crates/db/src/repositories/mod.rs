//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Plant-scoped queries
//! always filter on the owning user so one user can never read or change
//! another user's rows.

pub mod care_task_repo;
pub mod growth_entry_repo;
pub mod plant_repo;
pub mod session_repo;
pub mod user_repo;

pub use care_task_repo::CareTaskRepo;
pub use growth_entry_repo::GrowthEntryRepo;
pub use plant_repo::PlantRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
