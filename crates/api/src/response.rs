//! Shared response envelope types for handlers.
//!
//! Data endpoints answer `{ "data": ... }`; pages answer
//! `{ "nav": ..., "data": ... }` so every dashboard view carries the
//! navigation shell built from the request's session context.

use serde::Serialize;

use crate::views::NavShell;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Page view model: navigation shell plus the page's own data.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub nav: NavShell,
    pub data: T,
}
