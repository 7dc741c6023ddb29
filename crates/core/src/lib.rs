//! Domain rules shared by the repository and HTTP layers.
//!
//! Nothing in here touches the database or the network: form parsing,
//! validation, sample data, storage path rules and the tagged listing type
//! all live here so they can be unit tested in isolation.

pub mod care;
pub mod error;
pub mod growth;
pub mod listing;
pub mod plants;
pub mod profile;
pub mod samples;
pub mod storage;
pub mod types;
