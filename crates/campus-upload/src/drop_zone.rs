//! Drag-and-drop surface state

/// Highlight state of the drop target. The orchestrator owns one and only
/// forwards events to it while no batch is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    drag_over: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) {
        self.drag_over = true;
    }

    pub fn over(&mut self) {
        self.drag_over = true;
    }

    pub fn leave(&mut self) {
        self.drag_over = false;
    }

    /// Called on drop, before the files are submitted.
    pub fn reset(&mut self) {
        self.drag_over = false;
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_follows_drag_events() {
        let mut zone = DropZone::new();
        assert!(!zone.is_drag_over());

        zone.enter();
        assert!(zone.is_drag_over());
        zone.over();
        assert!(zone.is_drag_over());
        zone.leave();
        assert!(!zone.is_drag_over());

        zone.over();
        zone.reset();
        assert!(!zone.is_drag_over());
    }
}
