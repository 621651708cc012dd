use crate::models::identity::AuthenticatedUser;

/// Decides which organizer a write acts on.
///
/// Only elevated subjects may name another organizer, and their id is used
/// verbatim; for everyone else the requested id is ignored. An empty result falls back to the subject's own
/// uuid. The result can still be empty when the identity itself is empty,
/// which callers must treat as an authorization failure.
pub fn resolve_organizer(requested: &str, user: &AuthenticatedUser) -> String {
    let organizer_id = if user.is_elevated() {
        requested
    } else {
        ""
    };

    if organizer_id.is_empty() {
        user.uuid.clone()
    } else {
        organizer_id.to_string()
    }
}

/// Decides whose calendar an occupancy read looks at. Any authenticated
/// subject may view another organizer's occupancy.
pub fn resolve_calendar_owner(requested: Option<&str>, user: &AuthenticatedUser) -> String {
    match requested.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => user.uuid.clone(),
    }
}
