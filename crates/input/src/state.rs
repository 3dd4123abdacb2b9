use crate::{Bindings, Control};
use std::collections::HashSet;
use winit::keyboard::{Key, KeyCode, PhysicalKey};

/// Resolve a raw key event to a logical control.
///
/// Space, shift, and the arrow keys resolve by physical key code so they
/// work on any layout; everything else resolves by the logical character
/// through the active [`Bindings`], case-insensitively. Keys that resolve
/// to nothing are ignored by the caller.
pub fn map_key(bindings: &Bindings, physical: PhysicalKey, logical: &Key) -> Option<Control> {
    if let PhysicalKey::Code(code) = physical {
        match code {
            KeyCode::Space => return Some(Control::Ascend),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => return Some(Control::Sprint),
            KeyCode::ArrowUp => return Some(Control::PitchUp),
            KeyCode::ArrowDown => return Some(Control::PitchDown),
            KeyCode::ArrowLeft => return Some(Control::TurnLeft),
            KeyCode::ArrowRight => return Some(Control::TurnRight),
            _ => {}
        }
    }
    if let Key::Character(ch) = logical {
        return bindings.control_for(ch.as_str());
    }
    None
}

/// Which logical controls are currently held, plus press edges.
///
/// Single writer (the event loop), single reader (the integrator), same
/// thread. Held flags drive continuous controls; the press-edge set drives
/// edge-triggered controls such as [`Control::ToggleView`] and is cleared
/// once per frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Control>,
    pressed: HashSet<Control>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition for a control.
    ///
    /// OS auto-repeat events are dropped so edge-triggered controls fire
    /// exactly once per physical press.
    pub fn key_event(&mut self, control: Control, pressed: bool, repeat: bool) {
        if repeat {
            return;
        }
        if pressed {
            self.held.insert(control);
            self.pressed.insert(control);
        } else {
            self.held.remove(&control);
        }
    }

    /// Directly set a control's held flag. Used by scripted/headless runs.
    pub fn set(&mut self, control: Control, held: bool) {
        if held {
            self.held.insert(control);
        } else {
            self.held.remove(&control);
        }
    }

    /// True while the control's key is held down.
    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// True only during the frame the control's key went down.
    pub fn just_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    /// Clear press edges. Call once at the end of each frame.
    pub fn clear_transients(&mut self) {
        self.pressed.clear();
    }

    /// Release everything (used when the window loses focus).
    pub fn release_all(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    fn character(s: &str) -> Key {
        Key::Character(SmolStr::new(s))
    }

    #[test]
    fn special_keys_resolve_by_physical_code() {
        let b = Bindings::default();
        let cases = [
            (KeyCode::Space, Control::Ascend),
            (KeyCode::ShiftLeft, Control::Sprint),
            (KeyCode::ShiftRight, Control::Sprint),
            (KeyCode::ArrowUp, Control::PitchUp),
            (KeyCode::ArrowDown, Control::PitchDown),
            (KeyCode::ArrowLeft, Control::TurnLeft),
            (KeyCode::ArrowRight, Control::TurnRight),
        ];
        for (code, control) in cases {
            // Logical key deliberately useless: the code must win.
            let got = map_key(&b, PhysicalKey::Code(code), &Key::Unidentified(
                winit::keyboard::NativeKey::Unidentified,
            ));
            assert_eq!(got, Some(control));
        }
    }

    #[test]
    fn letters_resolve_by_character_case_insensitively() {
        let b = Bindings::default();
        let w = map_key(&b, PhysicalKey::Code(KeyCode::KeyW), &character("w"));
        assert_eq!(w, Some(Control::Forward));
        let w_upper = map_key(&b, PhysicalKey::Code(KeyCode::KeyW), &character("W"));
        assert_eq!(w_upper, Some(Control::Forward));
    }

    #[test]
    fn unknown_keys_resolve_to_nothing() {
        let b = Bindings::default();
        let q = map_key(&b, PhysicalKey::Code(KeyCode::KeyQ), &character("q"));
        assert_eq!(q, None);
        let f5 = map_key(&b, PhysicalKey::Code(KeyCode::F5), &Key::Unidentified(
            winit::keyboard::NativeKey::Unidentified,
        ));
        assert_eq!(f5, None);
    }

    #[test]
    fn press_and_release_track_held() {
        let mut input = InputState::new();
        input.key_event(Control::Forward, true, false);
        assert!(input.is_held(Control::Forward));

        input.key_event(Control::Forward, false, false);
        assert!(!input.is_held(Control::Forward));
    }

    #[test]
    fn press_edge_lasts_one_frame() {
        let mut input = InputState::new();
        input.key_event(Control::ToggleView, true, false);
        assert!(input.just_pressed(Control::ToggleView));

        input.clear_transients();
        assert!(!input.just_pressed(Control::ToggleView));
        // Still held until released.
        assert!(input.is_held(Control::ToggleView));
    }

    #[test]
    fn repeats_do_not_refire_edges() {
        let mut input = InputState::new();
        input.key_event(Control::ToggleView, true, false);
        input.clear_transients();

        input.key_event(Control::ToggleView, true, true);
        assert!(!input.just_pressed(Control::ToggleView));
    }

    #[test]
    fn controls_track_independently() {
        let mut input = InputState::new();
        input.key_event(Control::Forward, true, false);
        input.key_event(Control::StrafeRight, true, false);
        input.key_event(Control::Forward, false, false);

        assert!(!input.is_held(Control::Forward));
        assert!(input.is_held(Control::StrafeRight));
    }

    #[test]
    fn release_all_clears_everything() {
        let mut input = InputState::new();
        input.key_event(Control::Forward, true, false);
        input.key_event(Control::Sprint, true, false);
        input.release_all();
        assert!(!input.is_held(Control::Forward));
        assert!(!input.is_held(Control::Sprint));
    }
}
