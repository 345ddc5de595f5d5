//! Entry gate — decides whether a signed-in user must onboard first.

use serde::Serialize;

use crate::error::DatabaseError;
use crate::store::ProfileStore;

use super::model::SessionUser;

/// Where a session lands after sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRoute {
    Onboarding,
    Home,
}

/// Route the user into the wizard unless their profile is already complete.
///
/// A missing profile row also needs onboarding.
pub async fn resolve_entry(
    store: &dyn ProfileStore,
    user: SessionUser,
) -> Result<EntryRoute, DatabaseError> {
    let route = match store.get_profile(user.id).await? {
        Some(p) if p.onboarding_completed => EntryRoute::Home,
        _ => EntryRoute::Onboarding,
    };
    tracing::debug!(profile_id = %user.id, ?route, "Resolved entry route");
    Ok(route)
}
