//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_input_router::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// System facade
pub use crate::platform::{PlatformError, WinitSurface};
pub use crate::system::{InputSystem, InputSystemBuilder};

// Input types
pub use crate::core::input::{
    EventKind, GameEvent, HandlerId, InputState, KeyCode, Modifiers, MouseButton, RawEvent,
};

// Routing
pub use crate::core::routing::{Dispatch, GameInstance, InstanceId, ScreenBounds, ScreenGeometry};

// Bridge
pub use crate::core::platform_bridge::{InputSurface, PumpStatus, RawEventSender};

// Errors
pub use crate::core::InputError;
