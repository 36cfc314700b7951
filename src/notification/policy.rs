//! Defer-vs-immediate delivery decision.

/// Persistence-state snapshot of the entity at the moment a notification is
/// requested. Supplied by the persistence integration; the core never inspects
/// the entity itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityState {
    /// Entity was created in the current unit of work and is not yet committed
    pub new_record: bool,
    /// Entity has field changes pending an uncommitted write
    pub unsaved_changes: bool,
}

/// How a notification request should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryDecision {
    /// Buffer until the unit of work commits
    Defer,
    /// Render and deliver synchronously, bypassing the buffer
    Immediate,
}

/// Decide whether a notification must wait for commit.
///
/// Deferral applies while the triggering write is still uncommitted: a freshly
/// created record or pending field changes. A metadata-only touch outside the
/// transactional write path delivers immediately, as does everything when
/// buffering is disabled.
pub fn decide(enabled: bool, state: EntityState) -> DeliveryDecision {
    if enabled && (state.new_record || state.unsaved_changes) {
        DeliveryDecision::Defer
    } else {
        DeliveryDecision::Immediate
    }
}
