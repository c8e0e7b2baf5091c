//! Drop overlay state for nested drop zones.

/// Change in overlay visibility caused by a drag event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTransition {
    /// The overlay just appeared.
    Shown,
    /// The overlay just disappeared.
    Hidden,
    /// Visibility did not change.
    Unchanged,
}

/// Nesting counter for drag-enter/drag-leave events.
///
/// Nested drop zones fire redundant enter/leave pairs, so the overlay is
/// tied to a depth counter rather than a flag. The counter never goes
/// below zero and a drop always resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    depth: u32,
}

impl DragState {
    /// Create an idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drag-enter event.
    pub fn enter(&mut self) -> DragTransition {
        self.depth = self.depth.saturating_add(1);
        if self.depth == 1 {
            DragTransition::Shown
        } else {
            DragTransition::Unchanged
        }
    }

    /// Record a drag-leave event.
    pub fn leave(&mut self) -> DragTransition {
        if self.depth == 0 {
            return DragTransition::Unchanged;
        }
        self.depth -= 1;
        if self.depth == 0 {
            DragTransition::Hidden
        } else {
            DragTransition::Unchanged
        }
    }

    /// Record a drop, resynchronizing to idle whatever the prior depth.
    pub fn drop_files(&mut self) -> DragTransition {
        let was_visible = self.is_dragging();
        self.depth = 0;
        if was_visible {
            DragTransition::Hidden
        } else {
            DragTransition::Unchanged
        }
    }

    /// Whether the drop overlay is visible.
    pub fn is_dragging(&self) -> bool {
        self.depth > 0
    }

    /// Current nesting depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }
}
