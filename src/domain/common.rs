use uuid::Uuid;

/// Records that belong to exactly one household.
pub trait HouseholdScoped {
    fn family_id(&self) -> Uuid;
}

/// Returns `true` when `id` passes an optional account filter. An absent or empty
/// filter admits every account.
pub fn admits_account(filter: Option<&[Uuid]>, id: Uuid) -> bool {
    match filter {
        Some(ids) if !ids.is_empty() => ids.contains(&id),
        _ => true,
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use uuid;
