//! Quantity editing
//!
//! Free-text quantity input is modelled as a two-phase state machine: a
//! *provisional* value that echoes keystrokes immediately, and a *committed*
//! value that settles on commit (debounce timeout or blur, owned by the
//! caller). Clamping only happens at commit, so a half-typed "0" never
//! destroys the line.

/// Clamp a requested quantity to the valid range for a product.
///
/// Values at or below 1 settle at 1: a line can never be driven to zero via
/// the quantity stepper; removal is a separate explicit action. Values above
/// the current stock settle at the stock level. A sold-out product still
/// clamps to 1, since removing the line is not this module's job.
pub fn clamp_quantity(requested: u32, stock: u32) -> u32 {
    requested.clamp(1, stock.max(1))
}

/// Two-phase quantity editor for one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityEditor {
    committed: u32,
    provisional: Option<u32>,
}

impl QuantityEditor {
    /// Create an editor over an already-committed quantity.
    pub fn new(committed: u32) -> Self {
        Self {
            committed: committed.max(1),
            provisional: None,
        }
    }

    /// The value to display: the provisional edit when one is pending,
    /// otherwise the committed value.
    pub fn display(&self) -> u32 {
        self.provisional.unwrap_or(self.committed)
    }

    /// The last committed (clamped) value.
    pub fn committed(&self) -> u32 {
        self.committed
    }

    /// Whether there is no pending edit.
    pub fn is_settled(&self) -> bool {
        self.provisional.is_none()
    }

    /// Record a typed value without committing it.
    pub fn edit(&mut self, typed: u32) {
        self.provisional = Some(typed);
    }

    /// Discard any pending edit, reverting the display to the committed
    /// value.
    pub fn revert(&mut self) {
        self.provisional = None;
    }

    /// Settle the pending edit (or re-commit the current value), clamping to
    /// `1..=stock`. Returns the committed value.
    pub fn commit(&mut self, stock: u32) -> u32 {
        let settled = clamp_quantity(self.display(), stock);

        self.committed = settled;
        self.provisional = None;

        settled
    }

    /// Step the committed value up by one, clamped to stock.
    pub fn increment(&mut self, stock: u32) -> u32 {
        self.edit(self.display().saturating_add(1));
        self.commit(stock)
    }

    /// Step the committed value down by one, clamped at 1.
    pub fn decrement(&mut self, stock: u32) -> u32 {
        self.edit(self.display().saturating_sub(1));
        self.commit(stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_floors_at_one() {
        assert_eq!(clamp_quantity(0, 5), 1);
        assert_eq!(clamp_quantity(1, 5), 1);
    }

    #[test]
    fn clamp_caps_at_stock() {
        assert_eq!(clamp_quantity(9, 5), 5);
        assert_eq!(clamp_quantity(5, 5), 5);
        assert_eq!(clamp_quantity(3, 5), 3);
    }

    #[test]
    fn clamp_with_zero_stock_still_yields_one() {
        assert_eq!(clamp_quantity(3, 0), 1);
    }

    #[test]
    fn edit_is_visible_but_not_committed() {
        let mut editor = QuantityEditor::new(2);

        editor.edit(7);

        assert_eq!(editor.display(), 7);
        assert_eq!(editor.committed(), 2);
        assert!(!editor.is_settled());
    }

    #[test]
    fn commit_clamps_zero_to_one() {
        let mut editor = QuantityEditor::new(2);

        editor.edit(0);

        assert_eq!(editor.commit(5), 1);
        assert_eq!(editor.committed(), 1);
        assert!(editor.is_settled());
    }

    #[test]
    fn commit_clamps_to_stock() {
        let mut editor = QuantityEditor::new(2);

        editor.edit(9);

        assert_eq!(editor.commit(5), 5);
    }

    #[test]
    fn revert_discards_pending_edit() {
        let mut editor = QuantityEditor::new(2);

        editor.edit(9);
        editor.revert();

        assert_eq!(editor.display(), 2);
        assert!(editor.is_settled());
    }

    #[test]
    fn stepper_never_reaches_zero() {
        let mut editor = QuantityEditor::new(1);

        assert_eq!(editor.decrement(5), 1);
        assert_eq!(editor.committed(), 1);
    }

    #[test]
    fn stepper_caps_at_stock() {
        let mut editor = QuantityEditor::new(5);

        assert_eq!(editor.increment(5), 5);
    }

    #[test]
    fn stepper_moves_within_range() {
        let mut editor = QuantityEditor::new(2);

        assert_eq!(editor.increment(5), 3);
        assert_eq!(editor.decrement(5), 2);
    }
}
