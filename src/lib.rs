//! Utlaan - in-memory lending and reservation tracking.
//!
//! Two parallel domains share one lifecycle core: a library lending books
//! against a copy count, and a vehicle fleet taking reservations against
//! an availability flag and a monotonic odometer. Both instantiate the
//! generic [`Registry`], which owns the items and the transaction history
//! and enforces the availability invariants.

pub mod config;
pub mod error;
pub mod fleet;
pub mod library;
pub mod registry;
pub mod resource;
pub mod transaction;

// Re-exports for convenience
pub use config::{Config, ConfigError, DATE_FORMAT};
pub use error::RegistryError;
pub use fleet::{Driver, Fleet, MileageUpdate, Reservation, Vehicle, VehicleKind};
pub use library::{Book, Borrower, Library, Loan};
pub use registry::Registry;
pub use resource::Resource;
pub use transaction::{CloseOutcome, Period, Transaction, TransactionId, TransactionState};
