/// A unit resource managed by a registry.
///
/// This is the seam between the generic lifecycle in
/// [`Registry`](crate::registry::Registry) and the two item types: a book
/// tracks a remaining copy count, a vehicle a single availability flag.
pub trait Resource {
    /// Value recorded against the transaction when it is closed: the
    /// return date for a loan, the end mileage for a reservation.
    type Closure;

    /// Natural key identifying this resource (ISBN, plate number).
    /// Unique within a registry, compared case-insensitively.
    fn key(&self) -> &str;

    /// Whether a new transaction may be opened against this resource.
    fn is_available(&self) -> bool;

    /// Current measured value of this resource, recorded by the registry
    /// as the opening reading of a new transaction (the odometer for a
    /// vehicle). Resources without one return `None`.
    fn reading(&self) -> Option<Self::Closure> {
        None
    }

    /// Mark one unit as handed out. Only called by the registry after a
    /// successful availability check.
    fn hand_out(&mut self);

    /// Return one unit, applying the closing value. Only called by the
    /// registry when a transaction closes; this is the sole path that
    /// restores availability.
    fn take_back(&mut self, closure: &Self::Closure);
}
