//=========================================================================
// Input
//
// Per-instance input types: raw platform events, normalized game events,
// key/button constants, the subscriber registry and `InputState`.
//
// Responsibilities:
// - Describe what the platform delivers (`RawEvent`)
// - Describe what games receive (`GameEvent`, one payload per kind)
// - Hold per-instance key/pointer state and subscribers
//
// Notes:
// Routing (which instance receives an event) lives in `core::routing`.
// Nothing here knows about other instances.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod emitter;
pub mod event;
mod input_state;

//=== Public API ==========================================================

pub use emitter::{Emitter, HandlerId};
pub use event::{
    ButtonEvent, EventKind, GameEvent, KeyCode, KeyEvent, Modifiers, MouseButton, PointerEvent,
    RawEvent, RawEventKind, TouchEvent, TouchPoint,
};
pub use input_state::InputState;
