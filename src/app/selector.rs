use crate::dispatch::Operation;
use eframe::egui::{Pos2, Rect};

/// Dropdown holding the chosen operation. `None` is the unset state.
#[derive(Debug, Default)]
pub struct OptionSelector {
    open: bool,
    selected: Option<Operation>,
}

impl OptionSelector {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<Operation> {
        self.selected
    }

    pub fn button_label(&self) -> &'static str {
        self.selected
            .map(|op| op.label())
            .unwrap_or(Operation::UNSET_LABEL)
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn select_option(&mut self, operation: Operation) {
        self.selected = Some(operation);
        self.open = false;
    }

    /// Closes the menu when a press lands outside the control.
    pub fn handle_pointer_press(&mut self, position: Pos2, bounds: Rect) {
        if self.open && !bounds.contains(position) {
            self.open = false;
        }
    }
}
