//=========================================================================
// Core
//
// Platform-independent input routing.
//
// Responsibilities:
// - Per-instance input state and subscriptions (`input`)
// - Focus resolution, hit testing and normalization (`routing`)
// - Listener lifecycle and cross-thread submission (`platform_bridge`)
//
// Notes:
// Everything here runs on one dispatch thread. Other threads reach it
// only through `platform_bridge::RawEventSender`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod error;
pub mod input;
pub mod platform_bridge;
pub mod routing;

//=== Public API ==========================================================

pub use error::InputError;
