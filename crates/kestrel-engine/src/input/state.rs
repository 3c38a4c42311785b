use super::types::{InputEvent, Modifiers};

/// Keyboard state the runtime tracks between events.
///
/// winit reports modifiers separately from key presses, so the latest
/// modifier set is kept here and stamped onto each translated key event.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub modifiers: Modifiers,
}

impl InputState {
    /// Applies an input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,
        }
    }
}
