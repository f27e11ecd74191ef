//=========================================================================
// Event Normalizer
//=========================================================================
//
// Routes one `RawEvent` to at most one game instance and turns it into a
// `GameEvent` for that instance's subscribers.
//
// Architecture:
//   RawEvent → dispatch() → per-kind handler
//                              ├─ FocusRouter (who owns input?)
//                              ├─ coords (localize + bounds check)
//                              ├─ filters (modifiers, dedup, bounds)
//                              └─ InputState (mutate + emit)
//                           → Dispatch (what happened, what the platform
//                                       should do with its default action)
//
// Per-kind rules:
// ```text
// key-down / key-up   Ctrl/Alt/Meta → ignored; repeated transition → suppressed
// key-press           Ctrl/Alt/Meta → ignored; otherwise suppressed, never emitted
// pointer-move        in bounds and moved → mousemove
// pointer-down        may change focus (see below) → mousedown
// pointer-up          in bounds → mouseup
// touch-start         may focus by absolute hit test → touchstart
// touch-move          first contact becomes pointer → touchmove
// touch-end           suppressed only
// context-menu        suppressed when in bounds
// ```
//
// Pointer-down focus change runs as two attempts, never recursion:
// the focused instance first; if the point is outside it, focus is
// cleared and the registry is hit-tested once.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::coords::{in_bounds, localize};
use super::focus::{FocusRouter, FocusState};
use super::registry::{GameInstance, InstanceId, InstanceRegistry};
use crate::core::input::{
    ButtonEvent, GameEvent, InputState, KeyCode, KeyEvent, Modifiers, MouseButton, PointerEvent,
    RawEvent, TouchEvent,
};

//=== Dispatch ============================================================

/// Result of routing one raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Instance that claimed the event, if any.
    pub target: Option<InstanceId>,

    /// The platform's default action (scrolling, text selection, native
    /// context menu) must be suppressed.
    pub prevent_default: bool,

    /// A `GameEvent` reached the target's subscribers.
    pub emitted: bool,

    /// The visual surface should be brought to the foreground.
    pub grab_focus: bool,
}

impl Dispatch {
    /// Not ours: leave the platform default alone.
    pub const IGNORED: Self = Self {
        target: None,
        prevent_default: false,
        emitted: false,
        grab_focus: false,
    };

    /// Ours, but filtered: no emission, default suppressed.
    fn suppressed(id: InstanceId) -> Self {
        Self {
            target: Some(id),
            prevent_default: true,
            ..Self::IGNORED
        }
    }

    /// Ours and emitted.
    fn delivered(id: InstanceId) -> Self {
        Self {
            emitted: true,
            ..Self::suppressed(id)
        }
    }

    fn with_focus_grab(mut self) -> Self {
        self.grab_focus = true;
        self
    }

    pub fn is_ignored(&self) -> bool {
        self.target.is_none()
    }
}

//=== InputRouter =========================================================

/// Running-instance registry, focus slot and per-kind normalization.
#[derive(Debug)]
pub struct InputRouter {
    registry: InstanceRegistry,
    focus: FocusRouter,
    clear_focus_on_unregister: bool,
}

impl InputRouter {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            registry: InstanceRegistry::new(),
            focus: FocusRouter::new(),
            clear_focus_on_unregister: true,
        }
    }

    /// Whether removing the focused instance also clears focus.
    /// When disabled, focus keeps the stale id and events addressed to
    /// it are dropped until a pointer-down re-resolves focus.
    pub fn set_clear_focus_on_unregister(&mut self, enabled: bool) {
        self.clear_focus_on_unregister = enabled;
    }

    //--- Registry ---------------------------------------------------------

    pub fn register(&mut self, instance: GameInstance) -> InstanceId {
        let id = self.registry.register(instance);
        trace!(target: "input::dispatch", "Registered instance {}", id);
        id
    }

    pub fn unregister(&mut self, id: InstanceId) -> Option<GameInstance> {
        let removed = self.registry.unregister(id)?;

        if self.clear_focus_on_unregister {
            self.focus.forget(id);
        }

        trace!(target: "input::dispatch", "Unregistered instance {}", id);
        Some(removed)
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    pub fn instance(&self, id: InstanceId) -> Option<&GameInstance> {
        self.registry.get(id)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut GameInstance> {
        self.registry.get_mut(id)
    }

    pub fn input(&self, id: InstanceId) -> Option<&InputState> {
        self.registry.get(id).map(GameInstance::input)
    }

    pub fn input_mut(&mut self, id: InstanceId) -> Option<&mut InputState> {
        self.registry.get_mut(id).map(GameInstance::input_mut)
    }

    //--- Focus ------------------------------------------------------------

    pub fn focused(&self) -> Option<InstanceId> {
        self.focus.focused()
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    /// Clears focus without waiting for an outside click.
    pub fn blur(&mut self) {
        self.focus.blur();
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes `event` and returns what happened.
    pub fn dispatch(&mut self, event: &RawEvent) -> Dispatch {
        match event {
            RawEvent::KeyDown { key, modifiers } => self.key_down(*key, *modifiers),
            RawEvent::KeyPress { modifiers, .. } => self.key_press(*modifiers),
            RawEvent::KeyUp { key, modifiers } => self.key_up(*key, *modifiers),
            RawEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            RawEvent::PointerDown { x, y, button } => self.pointer_down(*x, *y, *button),
            RawEvent::PointerUp { x, y, button } => self.pointer_up(*x, *y, *button),
            RawEvent::TouchStart(touch) => self.touch_start(touch),
            RawEvent::TouchMove(touch) => self.touch_move(touch),
            RawEvent::TouchEnd(touch) => self.touch_end(touch),
            RawEvent::ContextMenu { x, y } => self.context_menu(*x, *y),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Focused instance, if focus points at a registered one.
    fn focused_instance_mut(&mut self) -> Option<&mut GameInstance> {
        let id = self.focus.focused()?;
        self.registry.get_mut(id)
    }

    //--- Keyboard ---------------------------------------------------------

    fn key_down(&mut self, key: KeyCode, modifiers: Modifiers) -> Dispatch {
        if modifiers.is_command() {
            trace!(
                target: "input::dispatch",
                "Key {} down with command modifier ignored",
                key.code()
            );
            return Dispatch::IGNORED;
        }

        let Some(instance) = self.focused_instance_mut() else {
            return Dispatch::IGNORED;
        };
        let id = instance.id();
        let input = instance.input_mut();

        if !input.press_key(key) {
            return Dispatch::suppressed(id);
        }

        input.emit(&GameEvent::KeyDown(KeyEvent {
            key_code: key,
            shift_key: modifiers.shift,
        }));
        Dispatch::delivered(id)
    }

    fn key_up(&mut self, key: KeyCode, modifiers: Modifiers) -> Dispatch {
        if modifiers.is_command() {
            trace!(
                target: "input::dispatch",
                "Key {} up with command modifier ignored",
                key.code()
            );
            return Dispatch::IGNORED;
        }

        let Some(instance) = self.focused_instance_mut() else {
            return Dispatch::IGNORED;
        };
        let id = instance.id();
        let input = instance.input_mut();

        if !input.release_key(key) {
            return Dispatch::suppressed(id);
        }

        input.emit(&GameEvent::KeyUp(KeyEvent {
            key_code: key,
            shift_key: modifiers.shift,
        }));
        Dispatch::delivered(id)
    }

    fn key_press(&mut self, modifiers: Modifiers) -> Dispatch {
        if modifiers.is_command() {
            return Dispatch::IGNORED;
        }

        match self.focused_instance_mut() {
            Some(instance) => Dispatch::suppressed(instance.id()),
            None => Dispatch::IGNORED,
        }
    }

    //--- Pointer ----------------------------------------------------------

    fn pointer_move(&mut self, x: f32, y: f32) -> Dispatch {
        let Some(instance) = self.focused_instance_mut() else {
            return Dispatch::IGNORED;
        };

        let bounds = instance.bounds();
        let (lx, ly) = localize(&bounds, x, y);

        if !in_bounds(&bounds, lx, ly) || instance.input().pointer() == (lx, ly) {
            return Dispatch::IGNORED;
        }

        let id = instance.id();
        let input = instance.input_mut();
        input.set_pointer(lx, ly);
        input.emit(&GameEvent::MouseMove(PointerEvent { x: lx, y: ly }));
        Dispatch::delivered(id)
    }

    fn pointer_down(&mut self, x: f32, y: f32, button: MouseButton) -> Dispatch {
        //--- Attempt 1: the focused instance ------------------------------
        if let Some(id) = self.focus.focused() {
            if let Some(dispatch) = self.press_within(id, x, y, button) {
                return dispatch;
            }

            trace!(target: "input::dispatch", "Pointer down at ({}, {}) left {}", x, y, id);
            self.focus.blur();
        }

        //--- Attempt 2: hit-test the registry -----------------------------
        match self.registry.hit_test_local(x, y) {
            Some(id) => {
                self.focus.focus(id);
                self.press_within(id, x, y, button)
                    .unwrap_or(Dispatch::IGNORED)
            }
            None => Dispatch::IGNORED,
        }
    }

    /// Delivers a pointer-down to `id` if the point lies on its screen.
    /// Returns `None` when the point is outside (or `id` is gone).
    fn press_within(
        &mut self,
        id: InstanceId,
        x: f32,
        y: f32,
        button: MouseButton,
    ) -> Option<Dispatch> {
        let instance = self.registry.get_mut(id)?;
        let bounds = instance.bounds();
        let (lx, ly) = localize(&bounds, x, y);

        if !in_bounds(&bounds, lx, ly) {
            return None;
        }

        let input = instance.input_mut();
        input.set_pointer(lx, ly);
        input.emit(&GameEvent::MouseDown(ButtonEvent { x: lx, y: ly, button }));
        Some(Dispatch::delivered(id).with_focus_grab())
    }

    fn pointer_up(&mut self, x: f32, y: f32, button: MouseButton) -> Dispatch {
        let Some(instance) = self.focused_instance_mut() else {
            return Dispatch::IGNORED;
        };

        let bounds = instance.bounds();
        let (lx, ly) = localize(&bounds, x, y);

        if !in_bounds(&bounds, lx, ly) {
            return Dispatch::IGNORED;
        }

        let id = instance.id();
        let input = instance.input_mut();
        input.set_pointer(lx, ly);
        input.emit(&GameEvent::MouseUp(ButtonEvent { x: lx, y: ly, button }));
        Dispatch::delivered(id)
    }

    fn context_menu(&mut self, x: f32, y: f32) -> Dispatch {
        let Some(instance) = self.focused_instance_mut() else {
            return Dispatch::IGNORED;
        };

        let bounds = instance.bounds();
        let (lx, ly) = localize(&bounds, x, y);

        if in_bounds(&bounds, lx, ly) {
            Dispatch::suppressed(instance.id())
        } else {
            Dispatch::IGNORED
        }
    }

    //--- Touch ------------------------------------------------------------

    fn touch_start(&mut self, touch: &TouchEvent) -> Dispatch {
        if touch.changed_touches.is_empty() {
            trace!(target: "input::dispatch", "Touch start without contacts ignored");
            return Dispatch::IGNORED;
        }

        // Once focused, touches go to the focused instance wherever they land.
        let focused = self.focused_instance_mut().map(|instance| instance.id());
        let id = match focused {
            Some(id) => id,
            None => match self.registry.hit_test_absolute(&touch.changed_touches) {
                Some(id) => {
                    self.focus.focus(id);
                    id
                }
                None => return Dispatch::IGNORED,
            },
        };

        match self.registry.get_mut(id) {
            Some(instance) => {
                instance.input_mut().emit(&GameEvent::TouchStart(touch.clone()));
                Dispatch::delivered(id).with_focus_grab()
            }
            None => Dispatch::IGNORED,
        }
    }

    fn touch_move(&mut self, touch: &TouchEvent) -> Dispatch {
        let Some(first) = touch.touches.first() else {
            trace!(target: "input::dispatch", "Touch move without contacts ignored");
            return Dispatch::IGNORED;
        };

        let Some(instance) = self.focused_instance_mut() else {
            return Dispatch::IGNORED;
        };

        let (lx, ly) = localize(&instance.bounds(), first.page_x, first.page_y);
        let id = instance.id();
        let input = instance.input_mut();
        input.set_pointer(lx, ly);
        input.emit(&GameEvent::TouchMove(touch.clone()));
        Dispatch::delivered(id)
    }

    fn touch_end(&mut self, touch: &TouchEvent) -> Dispatch {
        if touch.touches.is_empty() && touch.changed_touches.is_empty() {
            return Dispatch::IGNORED;
        }

        match self.focused_instance_mut() {
            Some(instance) => Dispatch::suppressed(instance.id()),
            None => Dispatch::IGNORED,
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
