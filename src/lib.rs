//=========================================================================
// Aetheric Input Router
//
// Several game instances share one input surface (a window); this crate
// decides which instance each key, pointer and touch event belongs to
// and delivers it in that instance's local coordinates.
//
// Responsibilities:
// - Expose the system facade (`InputSystem`, `InputSystemBuilder`)
// - Keep Winit integration (`platform`) hidden from end users
// - Expose `core` for headless use: custom surfaces, direct dispatch
//
// Typical usage:
// ```no_run
// use aetheric_input_router::{InputSystemBuilder, WinitSurface};
// use aetheric_input_router::core::input::{EventKind, GameEvent};
// use aetheric_input_router::core::routing::{GameInstance, ScreenBounds};
//
// let mut system = InputSystemBuilder::new().build(WinitSurface::new());
// let left = system.register(GameInstance::new(ScreenBounds::new(0.0, 0.0, 400.0, 600.0)));
//
// if let Some(input) = system.input_mut(left) {
//     input.on(EventKind::KeyDown, |event: &GameEvent| println!("{:?}", event));
// }
//
// system.run("Split screen").expect("event loop");
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything platform-independent: input state, routing,
// and the bridge contract. It runs without a window.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit window and event loop. `system` ties the
// router, surface and queue together.
//
mod platform;
mod system;

//--- Public Exports ------------------------------------------------------

pub use platform::{PlatformError, WinitSurface};
pub use system::{InputSystem, InputSystemBuilder};
