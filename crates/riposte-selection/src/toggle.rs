//! The bounded membership toggle shared by every set-valued selection.

use riposte_protocol::{CardId, IdSet, TargetId};

/// Ids that can be picked into a response set.
///
/// Clicks always arrive as [`TargetId`]; blockers are assigned attacker
/// *cards*, so the click is narrowed to the set's own id type.
pub trait Pickable: Copy + Ord {
    fn from_click(id: TargetId) -> Self;
    fn as_target(self) -> TargetId;
}

impl Pickable for TargetId {
    fn from_click(id: TargetId) -> Self {
        id
    }

    fn as_target(self) -> TargetId {
        self
    }
}

impl Pickable for CardId {
    fn from_click(id: TargetId) -> Self {
        id.as_card()
    }

    fn as_target(self) -> TargetId {
        TargetId::from(self)
    }
}

/// Whether toggling `id` would change `chosen`: removing is always
/// allowed, adding only below `capacity`.
pub(crate) fn can_toggle<T: Ord>(chosen: &IdSet<T>, id: &T, capacity: usize) -> bool {
    chosen.contains(id) || chosen.len() < capacity
}

/// Flips membership of a legal `id` in `chosen` without ever growing the
/// set past `capacity`. Returns `true` if the set changed.
pub(crate) fn toggle_bounded<T: Ord>(
    chosen: &mut IdSet<T>,
    id: T,
    legal: bool,
    capacity: usize,
) -> bool {
    if !legal || !can_toggle(chosen, &id, capacity) {
        return false;
    }
    if !chosen.remove(&id) {
        chosen.insert(id);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut chosen = IdSet::new();
        assert!(toggle_bounded(&mut chosen, 1u64, true, 2));
        assert!(chosen.contains(&1));
        assert!(toggle_bounded(&mut chosen, 1u64, true, 2));
        assert!(chosen.is_empty());
    }

    #[test]
    fn test_toggle_respects_capacity() {
        let mut chosen: IdSet<u64> = [1].into_iter().collect();
        assert!(!toggle_bounded(&mut chosen, 2, true, 1));
        assert_eq!(chosen.len(), 1);
        // Removal is still allowed at capacity.
        assert!(toggle_bounded(&mut chosen, 1, true, 1));
    }

    #[test]
    fn test_toggle_ignores_illegal_id() {
        let mut chosen = IdSet::new();
        assert!(!toggle_bounded(&mut chosen, 5u64, false, 3));
        assert!(chosen.is_empty());
    }

    #[test]
    fn test_zero_capacity_never_adds() {
        let mut chosen = IdSet::new();
        assert!(!toggle_bounded(&mut chosen, 5u64, true, 0));
    }

    #[test]
    fn test_pickable_narrows_click() {
        assert_eq!(CardId::from_click(TargetId(300)), CardId(300));
        assert_eq!(CardId(300).as_target(), TargetId(300));
        assert_eq!(TargetId::from_click(TargetId(2)), TargetId(2));
    }
}
