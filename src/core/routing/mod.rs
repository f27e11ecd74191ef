//=========================================================================
// Routing
//
// Decides which game instance receives each raw event.
//
// Components:
// - `coords`: localize device positions, inclusive bounds checks
// - `registry`: running instances in registration order, hit testing
// - `focus`: the single focus slot and its transitions
// - `normalizer`: per-kind filtering, state updates and emission
//
//=========================================================================

//=== Module Declarations =================================================

pub mod coords;
pub mod focus;
pub mod normalizer;
pub mod registry;

//=== Public API ==========================================================

pub use coords::{contains_absolute, in_bounds, localize, ScreenBounds, ScreenGeometry};
pub use focus::{FocusRouter, FocusState};
pub use normalizer::{Dispatch, InputRouter};
pub use registry::{GameInstance, InstanceId, InstanceRegistry};
