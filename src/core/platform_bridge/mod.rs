//=========================================================================
// Platform Bridge
//=========================================================================
//
// Connects raw event sources to the router.
//
// Components:
// - `interface`: the `InputSurface` contract listeners attach to
// - `bridge`: attach/detach lifecycle and dispatch into the router
// - `input_queue`: cross-thread producer/consumer queue
//
// Platform backends (winit, tests, device threads) plug in here without
// the routing code knowing which one is in use.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod bridge;
pub mod input_queue;
pub mod interface;

//=== Public API ==========================================================

pub use bridge::RawEventBridge;
pub use input_queue::{InputQueue, PumpStatus, RawEventSender};
pub use interface::{DetachedSurface, InputSurface};
