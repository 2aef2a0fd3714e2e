use crate::state::NestedRouter;

pub mod index;
pub mod post;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .merge(index::route())
        .merge(post::route())
}

/// Reads a numeric route parameter, saturating at `u64::MAX`.
///
/// `None` unless the parameter is made of digits only.
fn route_number(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(raw.parse::<u64>().unwrap_or(u64::MAX))
}
