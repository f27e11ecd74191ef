//=========================================================================
// Input Event Types
//
// Defines both sides of the input pipeline:
//
// - `RawEvent`: what the platform delivers (device-absolute coordinates,
//   modifier flags, touch contact lists). Consumed once per dispatch.
// - `GameEvent`: what a game instance's subscribers receive (localized
//   coordinates, one explicit payload shape per event kind).
//
// Event Flow:
// ```text
// Platform Layer (Winit, test harness, device threads)
//         ↓
//    RawEvent (this module)
//         ↓
//    InputRouter (focus resolution + normalization)
//         ↓
//    GameEvent → InputState subscribers
// ```
//
// Key codes and mouse buttons are plain integers wrapped in newtypes so
// that any code the platform reports can flow through unchanged, while the
// named constants give game logic something stable to compare against.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::str::FromStr;

//=== Internal Dependencies ===============================================

use crate::core::error::InputError;

//=== KeyCode =============================================================

/// Integer key code as reported by the platform.
///
/// The values follow the legacy browser `keyCode` numbering, which is what
/// the winit adapter produces. Unknown codes are valid and are tracked like
/// any other key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    //--- Directional Keys -------------------------------------------------

    /// `left` arrow or keypad button.
    pub const LEFT: Self = Self(37);

    /// `up` arrow or keypad button.
    pub const UP: Self = Self(38);

    /// `right` arrow or keypad button.
    pub const RIGHT: Self = Self(39);

    /// `down` arrow or keypad button.
    pub const DOWN: Self = Self(40);

    //--- Action Keys ------------------------------------------------------

    /// First action button. On a keyboard this is the space bar.
    pub const ACTION_1: Self = Self(32);

    /// Second action button.
    pub const ACTION_2: Self = Self(33);

    /// Third action button.
    pub const ACTION_3: Self = Self(34);

    /// Fourth action button.
    pub const ACTION_4: Self = Self(35);

    /// Returns the raw integer code.
    pub fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for KeyCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

//=== MouseButton =========================================================

/// Mouse button index as reported by the platform.
///
/// Primary is usually the left button for right-handed users and the right
/// button for left-handed users. Not every mouse has a middle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButton(pub u16);

impl MouseButton {
    /// Primary button (typically left).
    pub const PRIMARY: Self = Self(0);

    /// Middle button (wheel click).
    pub const MIDDLE: Self = Self(1);

    /// Secondary button (typically right).
    pub const SECONDARY: Self = Self(2);

    /// Returns the raw button index.
    pub fn index(self) -> u16 {
        self.0
    }
}

//=== Modifiers ===========================================================

/// Modifier key state carried by keyboard and touch events.
///
/// `meta` is the Command key on macOS and the Super/Windows key elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Meta only.
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Returns `true` when the event is part of a shortcut combination
    /// (Ctrl, Alt or Meta held). Shift alone is ordinary text entry.
    pub fn is_command(self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

//=== Touch ===============================================================

/// One contact point of a touch event, in device-absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub page_x: f32,
    pub page_y: f32,
}

/// Touch event as delivered by the platform and forwarded to subscribers.
///
/// - `touches`: every contact currently on the surface
/// - `changed_touches`: the contacts that triggered this event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchEvent {
    pub touches: Vec<TouchPoint>,
    pub changed_touches: Vec<TouchPoint>,
    pub modifiers: Modifiers,
}

//=== RawEventKind ========================================================

/// The raw event kinds the bridge listens for on the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawEventKind {
    KeyDown,
    KeyPress,
    KeyUp,
    PointerMove,
    PointerDown,
    PointerUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    ContextMenu,
}

impl RawEventKind {
    /// Every listener kind, in attach order.
    pub const ALL: [RawEventKind; 10] = [
        RawEventKind::KeyDown,
        RawEventKind::KeyPress,
        RawEventKind::KeyUp,
        RawEventKind::PointerMove,
        RawEventKind::PointerDown,
        RawEventKind::PointerUp,
        RawEventKind::TouchStart,
        RawEventKind::TouchMove,
        RawEventKind::TouchEnd,
        RawEventKind::ContextMenu,
    ];
}

//=== RawEvent ============================================================

/// Platform input event before routing.
///
/// Pointer coordinates are device-absolute (window or page space). The
/// router localizes them against the target instance.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Text-entry keystroke. Never emitted to games; only its platform
    /// default is suppressed while an instance is focused.
    KeyPress { key: KeyCode, modifiers: Modifiers },

    KeyUp { key: KeyCode, modifiers: Modifiers },

    PointerMove { x: f32, y: f32 },

    PointerDown { x: f32, y: f32, button: MouseButton },

    PointerUp { x: f32, y: f32, button: MouseButton },

    TouchStart(TouchEvent),

    TouchMove(TouchEvent),

    TouchEnd(TouchEvent),

    /// Secondary-click menu request at the given position.
    ContextMenu { x: f32, y: f32 },
}

impl RawEvent {
    /// Returns the listener kind this event is delivered through.
    pub fn kind(&self) -> RawEventKind {
        match self {
            Self::KeyDown { .. } => RawEventKind::KeyDown,
            Self::KeyPress { .. } => RawEventKind::KeyPress,
            Self::KeyUp { .. } => RawEventKind::KeyUp,
            Self::PointerMove { .. } => RawEventKind::PointerMove,
            Self::PointerDown { .. } => RawEventKind::PointerDown,
            Self::PointerUp { .. } => RawEventKind::PointerUp,
            Self::TouchStart(_) => RawEventKind::TouchStart,
            Self::TouchMove(_) => RawEventKind::TouchMove,
            Self::TouchEnd(_) => RawEventKind::TouchEnd,
            Self::ContextMenu { .. } => RawEventKind::ContextMenu,
        }
    }
}

//=== Game Event Payloads =================================================

/// Payload of `keydown` / `keyup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: KeyCode,
    pub shift_key: bool,
}

/// Payload of `mousemove`, in instance-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

/// Payload of `mousedown` / `mouseup`, in instance-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub x: f32,
    pub y: f32,
    pub button: MouseButton,
}

//=== GameEvent ===========================================================

/// Normalized event delivered to a game instance's subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    MouseMove(PointerEvent),
    MouseDown(ButtonEvent),
    MouseUp(ButtonEvent),
    TouchStart(TouchEvent),
    TouchMove(TouchEvent),
}

impl GameEvent {
    /// Returns the subscription kind handlers register for.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::MouseMove(_) => EventKind::MouseMove,
            Self::MouseDown(_) => EventKind::MouseDown,
            Self::MouseUp(_) => EventKind::MouseUp,
            Self::TouchStart(_) => EventKind::TouchStart,
            Self::TouchMove(_) => EventKind::TouchMove,
        }
    }
}

//=== EventKind ===========================================================

/// Names of the events a game instance can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    MouseMove,
    MouseDown,
    MouseUp,
    TouchStart,
    TouchMove,
}

impl EventKind {
    /// Returns the event name (`"keydown"`, `"mousemove"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::MouseMove => "mousemove",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = InputError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "keydown" => Ok(Self::KeyDown),
            "keyup" => Ok(Self::KeyUp),
            "mousemove" => Ok(Self::MouseMove),
            "mousedown" => Ok(Self::MouseDown),
            "mouseup" => Ok(Self::MouseUp),
            "touchstart" => Ok(Self::TouchStart),
            "touchmove" => Ok(Self::TouchMove),
            other => Err(InputError::UnknownEventName(other.to_string())),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Constants
    //=====================================================================

    #[test]
    fn key_constants_match_legacy_codes() {
        assert_eq!(KeyCode::LEFT.code(), 37);
        assert_eq!(KeyCode::UP.code(), 38);
        assert_eq!(KeyCode::RIGHT.code(), 39);
        assert_eq!(KeyCode::DOWN.code(), 40);
        assert_eq!(KeyCode::ACTION_1.code(), 32);
        assert_eq!(KeyCode::ACTION_4.code(), 35);
    }

    #[test]
    fn mouse_button_constants() {
        assert_eq!(MouseButton::PRIMARY.index(), 0);
        assert_eq!(MouseButton::MIDDLE.index(), 1);
        assert_eq!(MouseButton::SECONDARY.index(), 2);
    }

    //=====================================================================
    // Modifiers
    //=====================================================================

    #[test]
    fn shift_alone_is_not_a_command() {
        assert!(!Modifiers::NONE.is_command());
        assert!(!Modifiers::SHIFT.is_command());
    }

    #[test]
    fn ctrl_alt_meta_are_commands() {
        assert!(Modifiers::CTRL.is_command());
        assert!(Modifiers::ALT.is_command());
        assert!(Modifiers::META.is_command());
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    //=====================================================================
    // Kinds
    //=====================================================================

    #[test]
    fn raw_event_reports_its_kind() {
        let event = RawEvent::PointerDown { x: 1.0, y: 2.0, button: MouseButton::PRIMARY };
        assert_eq!(event.kind(), RawEventKind::PointerDown);

        let event = RawEvent::TouchEnd(TouchEvent::default());
        assert_eq!(event.kind(), RawEventKind::TouchEnd);
    }

    #[test]
    fn all_raw_kinds_are_distinct() {
        let unique: std::collections::HashSet<_> = RawEventKind::ALL.iter().collect();
        assert_eq!(unique.len(), RawEventKind::ALL.len());
    }

    #[test]
    fn game_event_reports_its_kind() {
        let event = GameEvent::MouseMove(PointerEvent { x: 0.0, y: 0.0 });
        assert_eq!(event.kind(), EventKind::MouseMove);
    }

    #[test]
    fn event_kind_names_parse_back() {
        for kind in [
            EventKind::KeyDown,
            EventKind::KeyUp,
            EventKind::MouseMove,
            EventKind::MouseDown,
            EventKind::MouseUp,
            EventKind::TouchStart,
            EventKind::TouchMove,
        ] {
            assert_eq!(kind.as_str().parse::<EventKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn unknown_event_name_is_rejected() {
        match "touchend".parse::<EventKind>() {
            Err(InputError::UnknownEventName(name)) => assert_eq!(name, "touchend"),
            other => panic!("Expected UnknownEventName, got {:?}", other),
        }
    }
}
