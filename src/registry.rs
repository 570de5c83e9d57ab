use crate::error::RegistryError;
use crate::resource::Resource;
use crate::transaction::{CloseOutcome, Period, Transaction, TransactionId};

/// In-memory owner of the items and transaction history for one domain.
///
/// Items keep their insertion order. Transactions are append-only and are
/// never pruned; closed ones remain as history. An item can only leave
/// the registry once no open transaction references it.
pub struct Registry<R: Resource, P> {
    items: Vec<R>,
    transactions: Vec<Transaction<P, R::Closure>>,
}

impl<R: Resource, P> Registry<R, P> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Register a new item. Keys are unique, compared case-insensitively.
    pub fn add_item(&mut self, item: R) -> Result<(), RegistryError> {
        if self.find_by_key(item.key()).is_some() {
            return Err(RegistryError::DuplicateKey(item.key().to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by key and return it. Refused while any open
    /// transaction still references the item.
    pub fn remove_item(&mut self, key: &str) -> Result<R, RegistryError> {
        let idx = self
            .items
            .iter()
            .position(|item| item.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| RegistryError::ItemNotFound(key.to_string()))?;

        let canonical = self.items[idx].key().to_string();
        if self.has_open_transaction(&canonical) {
            return Err(RegistryError::ActiveTransaction(canonical));
        }
        Ok(self.items.remove(idx))
    }

    /// Open a transaction against an available item. On success the item
    /// is handed out and the id of the stored transaction is returned;
    /// on failure nothing is mutated and no transaction is recorded.
    pub fn open_transaction(
        &mut self,
        key: &str,
        holder: P,
        period: Period,
    ) -> Result<TransactionId, RegistryError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| RegistryError::ItemNotFound(key.to_string()))?;

        if !item.is_available() {
            return Err(RegistryError::ItemUnavailable(item.key().to_string()));
        }

        let opening = item.reading();
        item.hand_out();
        let txn = Transaction::open(item.key().to_string(), holder, period, opening);
        let id = txn.id;
        self.transactions.push(txn);
        Ok(id)
    }

    /// Close a transaction, recording the closing value and restoring the
    /// item's availability. Closing an already closed transaction is a
    /// warning-level no-op, not an error.
    pub fn close_transaction(
        &mut self,
        id: TransactionId,
        closure: R::Closure,
    ) -> Result<CloseOutcome, RegistryError> {
        let idx = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(RegistryError::TransactionNotFound(id))?;

        if !self.transactions[idx].is_open() {
            tracing::warn!(transaction = %id, "transaction already closed, close ignored");
            return Ok(CloseOutcome::AlreadyClosed);
        }

        // The item must still be registered: remove_item refuses to drop
        // an item with an open transaction.
        let key = self.transactions[idx].item_key.clone();
        let item = self
            .items
            .iter_mut()
            .find(|item| item.key().eq_ignore_ascii_case(&key))
            .ok_or_else(|| RegistryError::ItemNotFound(key.clone()))?;

        item.take_back(&closure);
        Ok(self.transactions[idx].close(closure))
    }

    /// Available items, preserving insertion order.
    pub fn list_available(&self) -> Vec<&R> {
        self.items.iter().filter(|item| item.is_available()).collect()
    }

    /// Case-insensitive exact match on the natural key; first hit wins.
    pub fn find_by_key(&self, query: &str) -> Option<&R> {
        self.items
            .iter()
            .find(|item| item.key().eq_ignore_ascii_case(query))
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn transactions(&self) -> &[Transaction<P, R::Closure>] {
        &self.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction<P, R::Closure>> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Transactions whose holder matches the predicate, in creation
    /// order (a borrower's loan history, a driver's reservations).
    pub fn transactions_for(
        &self,
        holder: impl Fn(&P) -> bool,
    ) -> Vec<&Transaction<P, R::Closure>> {
        self.transactions
            .iter()
            .filter(|txn| holder(&txn.holder))
            .collect()
    }

    fn has_open_transaction(&self, key: &str) -> bool {
        self.transactions
            .iter()
            .any(|txn| txn.is_open() && txn.item_key.eq_ignore_ascii_case(key))
    }
}

impl<R: Resource, P> Default for Registry<R, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Book, Borrower, Library};

    fn borrower() -> Borrower {
        Borrower::new(1, "Ada Lovelace", "ada@example.com")
    }

    fn sample_library() -> Library {
        let mut library = Library::new();
        library
            .add_item(Book::new("Programming Basics", "J. Dupont", "ISBN123", 3))
            .unwrap();
        library
            .add_item(Book::new("Advanced Topics", "M. Curie", "ISBN456", 1))
            .unwrap();
        library
    }

    #[test]
    fn test_add_duplicate_key_rejected() {
        let mut library = sample_library();
        let err = library
            .add_item(Book::new("Other Title", "Anon", "isbn123", 1))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("isbn123".to_string()));
        assert_eq!(library.items().len(), 2);
    }

    #[test]
    fn test_open_marks_item_unavailable() {
        let mut library = sample_library();
        let id = library
            .open_transaction("ISBN456", borrower(), Period::starting("04/10/2025"))
            .unwrap();

        let book = library.find_by_key("ISBN456").unwrap();
        assert!(!book.is_available());

        let txn = library.transaction(id).unwrap();
        assert!(txn.is_open());
        assert_eq!(txn.item_key, "ISBN456");
        // Books carry no reading, so the loan opens without one.
        assert!(txn.opening.is_none());
    }

    #[test]
    fn test_transactions_for_filters_by_holder() {
        let mut library = sample_library();
        library
            .open_transaction("ISBN123", borrower(), Period::starting("04/10/2025"))
            .unwrap();
        library
            .open_transaction(
                "ISBN456",
                Borrower::new(2, "Grace Hopper", "grace@example.com"),
                Period::starting("04/10/2025"),
            )
            .unwrap();
        library
            .open_transaction("ISBN123", borrower(), Period::starting("05/10/2025"))
            .unwrap();

        let loans = library.transactions_for(|holder| holder.id == 1);
        assert_eq!(loans.len(), 2);
        assert!(loans.iter().all(|loan| loan.holder.id == 1));

        assert!(library.transactions_for(|holder| holder.id == 9).is_empty());
    }

    #[test]
    fn test_open_on_unavailable_item_records_nothing() {
        let mut library = sample_library();
        library
            .open_transaction("ISBN456", borrower(), Period::starting("04/10/2025"))
            .unwrap();

        let err = library
            .open_transaction("ISBN456", borrower(), Period::starting("05/10/2025"))
            .unwrap_err();
        assert_eq!(err, RegistryError::ItemUnavailable("ISBN456".to_string()));
        assert_eq!(library.transactions().len(), 1);
    }

    #[test]
    fn test_open_on_unknown_key() {
        let mut library = sample_library();
        let err = library
            .open_transaction("ISBN999", borrower(), Period::starting("04/10/2025"))
            .unwrap_err();
        assert_eq!(err, RegistryError::ItemNotFound("ISBN999".to_string()));
        assert!(library.transactions().is_empty());
    }

    #[test]
    fn test_close_restores_availability() {
        let mut library = sample_library();
        let id = library
            .open_transaction("ISBN456", borrower(), Period::starting("04/10/2025"))
            .unwrap();

        let outcome = library
            .close_transaction(id, "10/10/2025".to_string())
            .unwrap();
        assert_eq!(outcome, CloseOutcome::Closed);
        assert!(library.find_by_key("ISBN456").unwrap().is_available());
        assert!(!library.transaction(id).unwrap().is_open());
    }

    #[test]
    fn test_close_unknown_transaction() {
        let mut library = sample_library();
        let id = TransactionId::new();
        let err = library
            .close_transaction(id, "10/10/2025".to_string())
            .unwrap_err();
        assert_eq!(err, RegistryError::TransactionNotFound(id));
    }

    #[test]
    fn test_double_close_is_idempotent() {
        let mut library = sample_library();
        let id = library
            .open_transaction("ISBN123", borrower(), Period::starting("04/10/2025"))
            .unwrap();
        library
            .close_transaction(id, "10/10/2025".to_string())
            .unwrap();
        let copies_after_first = library.find_by_key("ISBN123").unwrap().copies();

        let outcome = library
            .close_transaction(id, "12/10/2025".to_string())
            .unwrap();
        assert_eq!(outcome, CloseOutcome::AlreadyClosed);

        // Neither the stock nor the recorded return date moved.
        let book = library.find_by_key("ISBN123").unwrap();
        assert_eq!(book.copies(), copies_after_first);
        let txn = library.transaction(id).unwrap();
        assert_eq!(txn.closure.as_deref(), Some("10/10/2025"));
    }

    #[test]
    fn test_remove_item_with_open_transaction_refused() {
        let mut library = sample_library();
        let id = library
            .open_transaction("ISBN456", borrower(), Period::starting("04/10/2025"))
            .unwrap();

        let err = library.remove_item("ISBN456").unwrap_err();
        assert_eq!(err, RegistryError::ActiveTransaction("ISBN456".to_string()));
        assert!(library.find_by_key("ISBN456").is_some());

        library
            .close_transaction(id, "10/10/2025".to_string())
            .unwrap();
        let removed = library.remove_item("ISBN456").unwrap();
        assert_eq!(removed.isbn, "ISBN456");
        assert!(library.find_by_key("ISBN456").is_none());
    }

    #[test]
    fn test_remove_unknown_key() {
        let mut library = sample_library();
        let err = library.remove_item("ISBN999").unwrap_err();
        assert_eq!(err, RegistryError::ItemNotFound("ISBN999".to_string()));
    }

    #[test]
    fn test_list_available_preserves_insertion_order() {
        let mut library = sample_library();
        library
            .add_item(Book::new("Third", "Anon", "ISBN789", 2))
            .unwrap();
        library
            .open_transaction("ISBN456", borrower(), Period::starting("04/10/2025"))
            .unwrap();

        let available: Vec<&str> = library
            .list_available()
            .iter()
            .map(|book| book.isbn.as_str())
            .collect();
        assert_eq!(available, vec!["ISBN123", "ISBN789"]);
    }

    #[test]
    fn test_find_by_key_is_case_insensitive() {
        let library = sample_library();
        let book = library.find_by_key("isbn123").unwrap();
        assert_eq!(book.isbn, "ISBN123");
        assert!(library.find_by_key("ISBN12").is_none());
    }
}
