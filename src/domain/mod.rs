//! Read-only records served by the household data source.

pub mod account;
pub mod common;
pub mod entry;
pub mod recurring;
pub mod snapshot;

pub use account::{Account, AccountClassification, AccountStatus};
pub use common::{admits_account, HouseholdScoped};
pub use entry::{Entry, EntryClassification};
pub use recurring::{RecurringStatus, RecurringTransaction};
pub use snapshot::HouseholdSnapshot;
