//! Request extractors.
//!
//! - [`auth::CurrentUser`] -- the signed-in user and their session.

pub mod auth;
