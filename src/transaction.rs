use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The date range a transaction covers. Dates are opaque "DD/MM/YYYY"
/// strings; the core never parses or compares them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: String,
    pub end: Option<String>,
}

impl Period {
    /// Period with a start date and no agreed end (a library loan).
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Period with both dates fixed up front (a vehicle reservation).
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }
}

/// Lifecycle state of a transaction. Open -> Closed is the only
/// transition and Closed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    Open,
    Closed,
}

/// Result of a close attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The transaction was open and is now closed.
    Closed,
    /// The transaction was already closed; nothing changed.
    AlreadyClosed,
}

/// A binding between a holder and an item over a period, closeable
/// exactly once.
///
/// `P` is the holder type (borrower, driver) and `C` the closing value
/// recorded when the transaction ends (return date, end mileage). The
/// item is referenced by its natural key; the registry owning this
/// transaction guarantees the item outlives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction<P, C> {
    pub id: TransactionId,
    pub item_key: String,
    pub holder: P,
    pub period: Period,
    /// The item's reading when the transaction was opened (start
    /// mileage), if the item has one.
    pub opening: Option<C>,
    /// Set exactly once, when the transaction closes.
    pub closure: Option<C>,
    state: TransactionState,
}

impl<P, C> Transaction<P, C> {
    pub(crate) fn open(item_key: String, holder: P, period: Period, opening: Option<C>) -> Self {
        Self {
            id: TransactionId::new(),
            item_key,
            holder,
            period,
            opening,
            closure: None,
            state: TransactionState::Open,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == TransactionState::Open
    }

    /// Record the closing value and flip the state. A second close is a
    /// no-op that leaves the original closure value in place.
    pub(crate) fn close(&mut self, closure: C) -> CloseOutcome {
        if self.state == TransactionState::Closed {
            return CloseOutcome::AlreadyClosed;
        }
        self.closure = Some(closure);
        self.state = TransactionState::Closed;
        CloseOutcome::Closed
    }
}
