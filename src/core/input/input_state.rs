//=========================================================================
// Input State
//
// Per-instance input snapshot plus the instance's subscriber registry.
//
// Responsibilities:
// - Track which key codes are held (presence in set = pressed)
// - Track the last committed local pointer/touch position
// - Emit normalized `GameEvent`s to subscribers
//
// Notes:
// Game logic only reads state and manages subscriptions. All mutation
// goes through the router's normalizer, which is the only code that
// knows whether an event qualified.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;
use std::fmt;

//=== Internal Modules ====================================================

use super::emitter::{Emitter, HandlerId};
use super::event::{EventKind, GameEvent, KeyCode};

//=== InputState ==========================================================

/// Input state owned by one game instance.
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    pointer: (f32, f32),
    emitter: Emitter<EventKind, GameEvent>,
}

impl InputState {
    //--- Constructor ------------------------------------------------------
    pub fn new() -> Self {
        const KEYS_BASE: usize = 16;
        Self {
            keys_down: HashSet::with_capacity(KEYS_BASE),
            pointer: (0.0, 0.0),
            emitter: Emitter::new(),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while `key` is held down.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Iterates the keys currently held, in no particular order.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Last committed pointer X, local to the instance's screen.
    pub fn pointer_x(&self) -> f32 {
        self.pointer.0
    }

    /// Last committed pointer Y, local to the instance's screen.
    pub fn pointer_y(&self) -> f32 {
        self.pointer.1
    }

    /// Last committed pointer position as `(x, y)`.
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    //--- Subscriptions ----------------------------------------------------

    /// Subscribes `handler` to `kind`. Keep the returned id to unsubscribe.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.emitter.on(kind, handler)
    }

    /// Unsubscribes a handler. Returns `false` if it was not registered.
    pub fn off(&mut self, kind: EventKind, id: HandlerId) -> bool {
        self.emitter.off(kind, id)
    }

    /// Number of handlers subscribed to `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.emitter.handler_count(kind)
    }

    //--- Mutation (router only) -------------------------------------------

    /// Marks `key` as held. Returns `true` if it was previously up.
    pub(crate) fn press_key(&mut self, key: KeyCode) -> bool {
        self.keys_down.insert(key)
    }

    /// Marks `key` as released. Returns `true` if it was previously down.
    pub(crate) fn release_key(&mut self, key: KeyCode) -> bool {
        self.keys_down.remove(&key)
    }

    pub(crate) fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// Delivers `event` to the subscribers of its kind.
    pub(crate) fn emit(&mut self, event: &GameEvent) -> usize {
        self.emitter.emit(event.kind(), event)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

//=== Debug / Display =====================================================
//
// ```text
// InputState {
//     pointer: (42.0, 17.0),
//     pressed: [37, 32],
//     handlers: 3
// }
// ```
//
impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pressed: Vec<u32> = self.keys_down.iter().map(|k| k.code()).collect();
        pressed.sort_unstable();

        f.debug_struct("InputState")
            .field("pointer", &self.pointer)
            .field("pressed", &pressed)
            .field("handlers", &self.emitter.total_handlers())
            .finish()
    }
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Input pointer=({}, {}) keys_down={}]",
            self.pointer.0,
            self.pointer.1,
            self.keys_down.len()
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::KeyEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key_event(code: u32) -> GameEvent {
        GameEvent::KeyDown(KeyEvent {
            key_code: KeyCode(code),
            shift_key: false,
        })
    }

    #[test]
    fn starts_empty_at_origin() {
        let state = InputState::new();
        assert_eq!(state.pointer(), (0.0, 0.0));
        assert!(!state.is_key_down(KeyCode::UP));
        assert_eq!(state.keys_down().count(), 0);
    }

    #[test]
    fn press_and_release_report_transitions() {
        let mut state = InputState::new();

        assert!(state.press_key(KeyCode::LEFT));
        assert!(!state.press_key(KeyCode::LEFT), "Second press is not a transition");
        assert!(state.is_key_down(KeyCode::LEFT));

        assert!(state.release_key(KeyCode::LEFT));
        assert!(!state.release_key(KeyCode::LEFT), "Second release is not a transition");
        assert!(!state.is_key_down(KeyCode::LEFT));
    }

    #[test]
    fn release_of_never_pressed_key_is_not_a_transition() {
        let mut state = InputState::new();
        assert!(!state.release_key(KeyCode(999)));
    }

    #[test]
    fn emit_routes_by_event_kind() {
        let mut state = InputState::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        state.on(EventKind::KeyDown, move |e: &GameEvent| sink.borrow_mut().push(e.clone()));

        assert_eq!(state.emit(&key_event(65)), 1);
        assert_eq!(state.handler_count(EventKind::KeyUp), 0);
        assert_eq!(*seen.borrow(), vec![key_event(65)]);
    }

    #[test]
    fn off_stops_delivery() {
        let mut state = InputState::new();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let id = state.on(EventKind::KeyDown, move |_: &GameEvent| *sink.borrow_mut() += 1);

        state.emit(&key_event(1));
        assert!(state.off(EventKind::KeyDown, id));
        state.emit(&key_event(1));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn handler_id_of_one_instance_does_not_unsubscribe_another() {
        let mut first = InputState::new();
        let mut second = InputState::new();
        let count = Rc::new(RefCell::new(0));

        let id_from_first = first.on(EventKind::KeyDown, |_: &GameEvent| {});
        let sink = Rc::clone(&count);
        second.on(EventKind::KeyDown, move |_: &GameEvent| *sink.borrow_mut() += 1);

        assert!(!second.off(EventKind::KeyDown, id_from_first));
        second.emit(&key_event(1));

        assert_eq!(*count.borrow(), 1);
        assert_eq!(second.handler_count(EventKind::KeyDown), 1);
    }

    #[test]
    fn debug_lists_sorted_pressed_codes() {
        let mut state = InputState::new();
        state.press_key(KeyCode::DOWN);
        state.press_key(KeyCode::ACTION_1);
        state.set_pointer(4.0, 2.0);

        let text = format!("{:?}", state);
        assert!(text.contains("pressed: [32, 40]"), "got {}", text);
        assert!(text.contains("pointer: (4.0, 2.0)"), "got {}", text);
    }

    #[test]
    fn display_summarizes_state() {
        let mut state = InputState::new();
        state.press_key(KeyCode::UP);
        assert_eq!(state.to_string(), "[Input pointer=(0, 0) keys_down=1]");
    }
}
