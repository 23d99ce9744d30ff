/// A domain event emitted by an aggregate.
///
/// Events are facts: they are never mutated after being produced, and each
/// carries a stable type name used in logs.
pub trait Event: Clone + core::fmt::Debug {
    /// Stable event name/type identifier (e.g. "sales.cart.item_added").
    fn event_type(&self) -> &'static str;
}
