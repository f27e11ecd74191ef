//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into router `RawEvent`s.
//
// Architecture:
//   Winit WindowEvent → InputProcessor → RawEvent(s) → InputSystem::dispatch
//
// Stateful tracking:
// - Modifiers: cached from ModifiersChanged, applied to key/touch events
// - Cursor: Winit reports button presses without a position, so the last
//   CursorMoved position is used
// - Touches: active contacts, so every touch event carries the full list
//
// Synthesized events:
// - A press that produces text also yields `KeyPress` (after `KeyDown`)
// - A secondary-button press also yields `ContextMenu` (after `PointerDown`)
//
// Keys Winit cannot name (or that have no legacy code) are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, Modifiers, MouseButton, RawEvent, TouchEvent, TouchPoint};

//=== InputProcessor ======================================================

/// Converts Winit events to `RawEvent`s with modifier, cursor and touch tracking.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
    cursor: (f32, f32),
    touches: Vec<TouchPoint>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
            cursor: (0.0, 0.0),
            touches: Vec::new(),
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Keyboard ---------------------------------------------------------

    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Vec<RawEvent> {
        self.process_key(key_event.physical_key, key_event.state, key_event.text.as_deref())
    }

    /// Converts one physical key transition. Unmapped keys yield nothing.
    pub(crate) fn process_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        text: Option<&str>,
    ) -> Vec<RawEvent> {
        let Some(key) = (match physical_key {
            PhysicalKey::Code(code) => legacy_key_code(code),
            PhysicalKey::Unidentified(_) => None,
        }) else {
            return Vec::new();
        };

        let modifiers = self.current_modifiers;

        match state {
            ElementState::Pressed => {
                let mut events = vec![RawEvent::KeyDown { key, modifiers }];
                if text.is_some_and(|t| !t.is_empty()) {
                    events.push(RawEvent::KeyPress { key, modifiers });
                }
                events
            }
            ElementState::Released => vec![RawEvent::KeyUp { key, modifiers }],
        }
    }

    //--- Pointer ----------------------------------------------------------

    /// Records the cursor position and converts it to a move event.
    pub(crate) fn process_cursor_moved(&mut self, x: f32, y: f32) -> RawEvent {
        self.cursor = (x, y);
        RawEvent::PointerMove { x, y }
    }

    /// Converts a button transition at the last known cursor position.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Vec<RawEvent> {
        let (x, y) = self.cursor;
        let button = MouseButton::from(button);

        match state {
            ElementState::Pressed if button == MouseButton::SECONDARY => vec![
                RawEvent::PointerDown { x, y, button },
                RawEvent::ContextMenu { x, y },
            ],
            ElementState::Pressed => vec![RawEvent::PointerDown { x, y, button }],
            ElementState::Released => vec![RawEvent::PointerUp { x, y, button }],
        }
    }

    //--- Touch ------------------------------------------------------------

    /// Converts one contact's phase change, updating the active list.
    pub(crate) fn process_touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) -> RawEvent {
        let point = TouchPoint { id, page_x: x, page_y: y };

        match phase {
            TouchPhase::Started => {
                self.touches.retain(|t| t.id != id);
                self.touches.push(point);
                RawEvent::TouchStart(self.touch_event(point))
            }
            TouchPhase::Moved => {
                match self.touches.iter_mut().find(|t| t.id == id) {
                    Some(existing) => *existing = point,
                    None => self.touches.push(point),
                }
                RawEvent::TouchMove(self.touch_event(point))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.retain(|t| t.id != id);
                RawEvent::TouchEnd(self.touch_event(point))
            }
        }
    }

    /// Number of contacts currently on the surface.
    pub(crate) fn active_touches(&self) -> usize {
        self.touches.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn touch_event(&self, changed: TouchPoint) -> TouchEvent {
        TouchEvent {
            touches: self.touches.clone(),
            changed_touches: vec![changed],
            modifiers: self.current_modifiers,
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to router Modifiers (Super → meta).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

/// Converts Winit mouse buttons to platform button indices.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::PRIMARY,
            WinitMouseButton::Middle => MouseButton::MIDDLE,
            WinitMouseButton::Right => MouseButton::SECONDARY,
            WinitMouseButton::Back => MouseButton(3),
            WinitMouseButton::Forward => MouseButton(4),
            WinitMouseButton::Other(index) => MouseButton(index),
        }
    }
}

/// Maps a physical key to its legacy integer key code.
///
/// Covers the keys games commonly bind: letters, digits, arrows, the
/// navigation block, numpad digits, F1-F12 and the usual special keys.
#[rustfmt::skip]
fn legacy_key_code(code: WinitKeyCode) -> Option<KeyCode> {
    use WinitKeyCode::*;
    let value = match code {
        //--- Editing / Whitespace -----------------------------------------
        Backspace => 8, Tab => 9, Enter | NumpadEnter => 13,
        ShiftLeft | ShiftRight => 16, ControlLeft | ControlRight => 17,
        AltLeft | AltRight => 18, Pause => 19, CapsLock => 20, Escape => 27,

        //--- Navigation (32-35 double as the action keys) -----------------
        Space => 32, PageUp => 33, PageDown => 34, End => 35, Home => 36,
        ArrowLeft => 37, ArrowUp => 38, ArrowRight => 39, ArrowDown => 40,
        Insert => 45, Delete => 46,

        //--- Digits -------------------------------------------------------
        Digit0 => 48, Digit1 => 49, Digit2 => 50, Digit3 => 51, Digit4 => 52,
        Digit5 => 53, Digit6 => 54, Digit7 => 55, Digit8 => 56, Digit9 => 57,

        //--- Letters ------------------------------------------------------
        KeyA => 65, KeyB => 66, KeyC => 67, KeyD => 68, KeyE => 69, KeyF => 70,
        KeyG => 71, KeyH => 72, KeyI => 73, KeyJ => 74, KeyK => 75, KeyL => 76,
        KeyM => 77, KeyN => 78, KeyO => 79, KeyP => 80, KeyQ => 81, KeyR => 82,
        KeyS => 83, KeyT => 84, KeyU => 85, KeyV => 86, KeyW => 87, KeyX => 88,
        KeyY => 89, KeyZ => 90,

        //--- Meta ---------------------------------------------------------
        SuperLeft => 91, SuperRight => 92, ContextMenu => 93,

        //--- Numpad -------------------------------------------------------
        Numpad0 => 96, Numpad1 => 97, Numpad2 => 98, Numpad3 => 99, Numpad4 => 100,
        Numpad5 => 101, Numpad6 => 102, Numpad7 => 103, Numpad8 => 104, Numpad9 => 105,
        NumpadMultiply => 106, NumpadAdd => 107, NumpadSubtract => 109,
        NumpadDecimal => 110, NumpadDivide => 111,

        //--- Function Keys ------------------------------------------------
        F1 => 112, F2 => 113, F3 => 114, F4 => 115, F5 => 116, F6 => 117,
        F7 => 118, F8 => 119, F9 => 120, F10 => 121, F11 => 122, F12 => 123,

        //--- Punctuation --------------------------------------------------
        Semicolon => 186, Equal => 187, Comma => 188, Minus => 189, Period => 190,
        Slash => 191, Backquote => 192, BracketLeft => 219, Backslash => 220,
        BracketRight => 221, Quote => 222,

        _ => return None,
    };
    Some(KeyCode(value))
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        if meta { state.insert(ModifiersState::SUPER); }
        state
    }

    fn code(key: WinitKeyCode) -> PhysicalKey {
        PhysicalKey::Code(key)
    }

    //--- Modifiers --------------------------------------------------------

    #[test]
    fn starts_with_no_modifiers() {
        let processor = InputProcessor::new();
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn super_maps_to_meta() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, false, false, true));

        let mods = processor.current_modifiers();
        assert!(mods.meta && !mods.ctrl && !mods.alt && !mods.shift);
    }

    //--- Keyboard ---------------------------------------------------------

    #[test]
    fn arrow_press_maps_to_legacy_code() {
        let processor = InputProcessor::new();
        let events =
            processor.process_key(code(WinitKeyCode::ArrowUp), ElementState::Pressed, None);

        assert_eq!(
            events,
            vec![RawEvent::KeyDown { key: KeyCode::UP, modifiers: Modifiers::NONE }]
        );
    }

    #[test]
    fn text_producing_press_adds_key_press() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, false, false));

        let events =
            processor.process_key(code(WinitKeyCode::KeyA), ElementState::Pressed, Some("A"));

        assert_eq!(
            events,
            vec![
                RawEvent::KeyDown { key: KeyCode(65), modifiers: Modifiers::SHIFT },
                RawEvent::KeyPress { key: KeyCode(65), modifiers: Modifiers::SHIFT },
            ]
        );
    }

    #[test]
    fn release_yields_key_up_only() {
        let processor = InputProcessor::new();
        let events =
            processor.process_key(code(WinitKeyCode::Space), ElementState::Released, Some(" "));

        assert_eq!(
            events,
            vec![RawEvent::KeyUp { key: KeyCode::ACTION_1, modifiers: Modifiers::NONE }]
        );
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let processor = InputProcessor::new();
        let events = processor.process_key(code(WinitKeyCode::F24), ElementState::Pressed, None);
        assert!(events.is_empty());
    }

    #[test]
    fn action_keys_line_up_with_navigation_block() {
        assert_eq!(legacy_key_code(WinitKeyCode::Space), Some(KeyCode::ACTION_1));
        assert_eq!(legacy_key_code(WinitKeyCode::PageUp), Some(KeyCode::ACTION_2));
        assert_eq!(legacy_key_code(WinitKeyCode::PageDown), Some(KeyCode::ACTION_3));
        assert_eq!(legacy_key_code(WinitKeyCode::End), Some(KeyCode::ACTION_4));
        assert_eq!(legacy_key_code(WinitKeyCode::ArrowLeft), Some(KeyCode::LEFT));
        assert_eq!(legacy_key_code(WinitKeyCode::ArrowDown), Some(KeyCode::DOWN));
    }

    //--- Pointer ----------------------------------------------------------

    #[test]
    fn button_uses_last_cursor_position() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(12.0, 34.0);

        let events = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);

        assert_eq!(
            events,
            vec![RawEvent::PointerDown { x: 12.0, y: 34.0, button: MouseButton::PRIMARY }]
        );
    }

    #[test]
    fn secondary_press_also_requests_context_menu() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(5.0, 6.0);

        let events = processor.process_mouse_button(WinitMouseButton::Right, ElementState::Pressed);

        assert_eq!(
            events,
            vec![
                RawEvent::PointerDown { x: 5.0, y: 6.0, button: MouseButton::SECONDARY },
                RawEvent::ContextMenu { x: 5.0, y: 6.0 },
            ]
        );
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left), MouseButton::PRIMARY);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::MIDDLE);
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::SECONDARY);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(7)), MouseButton(7));
    }

    //--- Touch ------------------------------------------------------------

    #[test]
    fn touch_lifecycle_tracks_active_contacts() {
        let mut processor = InputProcessor::new();

        let start = processor.process_touch(1, TouchPhase::Started, 10.0, 20.0);
        processor.process_touch(2, TouchPhase::Started, 30.0, 40.0);
        assert_eq!(processor.active_touches(), 2);

        match start {
            RawEvent::TouchStart(touch) => {
                assert_eq!(touch.touches.len(), 1);
                assert_eq!(touch.changed_touches[0].page_x, 10.0);
            }
            other => panic!("Expected TouchStart, got {:?}", other),
        }

        match processor.process_touch(1, TouchPhase::Moved, 11.0, 21.0) {
            RawEvent::TouchMove(touch) => {
                assert_eq!(touch.touches[0], TouchPoint { id: 1, page_x: 11.0, page_y: 21.0 });
                assert_eq!(touch.touches.len(), 2);
            }
            other => panic!("Expected TouchMove, got {:?}", other),
        }

        match processor.process_touch(1, TouchPhase::Cancelled, 11.0, 21.0) {
            RawEvent::TouchEnd(touch) => {
                assert_eq!(touch.touches.len(), 1);
                assert_eq!(touch.changed_touches[0].id, 1);
            }
            other => panic!("Expected TouchEnd, got {:?}", other),
        }
        assert_eq!(processor.active_touches(), 1);
    }
}
