//! Pieces shared by every dashboard page: the navigation shell, sample
//! flags and list classification.

use plantpal_core::listing::Listing;
use plantpal_core::profile::display_name;
use serde::Serialize;

use crate::middleware::auth::CurrentUser;

/// A link in the dashboard navigation bar.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const NAV_LINKS: [NavLink; 5] = [
    NavLink {
        label: "Dashboard",
        href: "/dashboard",
    },
    NavLink {
        label: "My Plants",
        href: "/dashboard/plants",
    },
    NavLink {
        label: "Care Calendar",
        href: "/dashboard/tasks",
    },
    NavLink {
        label: "Profile",
        href: "/dashboard/profile",
    },
    NavLink {
        label: "Add Plant",
        href: "/dashboard/plants/add",
    },
];

/// Navigation bar view model, built from the request's session context
/// without further queries.
#[derive(Debug, Clone, Serialize)]
pub struct NavShell {
    pub app_name: &'static str,
    pub display_name: String,
    pub email: String,
    /// Empty when the user has no profile picture.
    pub avatar_url: String,
    pub links: Vec<NavLink>,
    pub sign_out_action: &'static str,
}

impl NavShell {
    pub fn for_user(user: &CurrentUser) -> Self {
        let profile = &user.profile;
        Self {
            app_name: "PlantPal",
            display_name: display_name(profile.full_name.as_deref(), &profile.email),
            email: profile.email.clone(),
            avatar_url: profile.avatar_url.clone().unwrap_or_default(),
            links: NAV_LINKS.to_vec(),
            sign_out_action: "/sign-out",
        }
    }
}

/// A showcase record, flagged so it cannot be mistaken for a stored row.
#[derive(Debug, Clone, Serialize)]
pub struct Sample<T: Serialize> {
    #[serde(flatten)]
    pub item: T,
    pub is_sample: bool,
}

impl<T: Serialize> Sample<T> {
    pub fn wrap(items: impl IntoIterator<Item = T>) -> Vec<Self> {
        items
            .into_iter()
            .map(|item| Sample {
                item,
                is_sample: true,
            })
            .collect()
    }
}

/// Classify a list query for display, logging the cause of a failure.
pub fn listing<T>(result: Result<Vec<T>, sqlx::Error>, what: &str) -> Listing<T> {
    if let Err(e) = &result {
        tracing::error!(error = %e, what, "List query failed");
    }
    Listing::from_result(result, what)
}
