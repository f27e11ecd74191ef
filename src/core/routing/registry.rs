//=========================================================================
// Instance Registry
//=========================================================================
//
// Insertion-ordered set of running game instances.
//
// Architecture:
//   register(GameInstance) → Vec<GameInstance> (registry order)
//                                 ↓
//   hit_test_*(point) → first instance whose screen contains the point
//
// Overlapping screens resolve by registry order, not z-order.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use super::coords::{contains_absolute, in_bounds, localize, ScreenBounds, ScreenGeometry};
use crate::core::input::{InputState, TouchPoint};

//=== InstanceId ==========================================================

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a game instance.
///
/// This is how the focus router refers to an instance without owning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== GameInstance ========================================================

/// One game session: a screen region plus the input state it owns.
///
/// The `InputState` is created with the instance and dropped with it.
pub struct GameInstance {
    id: InstanceId,
    screen: Box<dyn ScreenGeometry>,
    input: InputState,
}

impl GameInstance {
    pub fn new<G>(screen: G) -> Self
    where
        G: ScreenGeometry + 'static,
    {
        Self {
            id: InstanceId::next(),
            screen: Box::new(screen),
            input: InputState::new(),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Current screen bounds, queried from the screen collaborator.
    pub fn bounds(&self) -> ScreenBounds {
        self.screen.bounds()
    }

    /// Replaces the screen collaborator (e.g. after the surface is rebuilt).
    pub fn set_screen<G>(&mut self, screen: G)
    where
        G: ScreenGeometry + 'static,
    {
        self.screen = Box::new(screen);
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }
}

impl fmt::Debug for GameInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameInstance")
            .field("id", &self.id)
            .field("bounds", &self.bounds())
            .field("input", &self.input)
            .finish()
    }
}

//=== InstanceRegistry ====================================================

/// Running instances, in the order they were registered.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: Vec<GameInstance>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    //--- Membership -------------------------------------------------------

    /// Appends `instance` to the registry and returns its id.
    pub fn register(&mut self, instance: GameInstance) -> InstanceId {
        let id = instance.id();
        self.instances.push(instance);
        id
    }

    /// Removes an instance, handing ownership back to the caller.
    /// Registry order of the remaining instances is preserved.
    pub fn unregister(&mut self, id: InstanceId) -> Option<GameInstance> {
        let index = self.instances.iter().position(|i| i.id() == id)?;
        Some(self.instances.remove(index))
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.iter().any(|i| i.id() == id)
    }

    pub fn get(&self, id: InstanceId) -> Option<&GameInstance> {
        self.instances.iter().find(|i| i.id() == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut GameInstance> {
        self.instances.iter_mut().find(|i| i.id() == id)
    }

    /// Iterates instances in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &GameInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    //--- Hit Testing ------------------------------------------------------

    /// First instance whose screen contains the device-absolute point,
    /// tested in each instance's local space.
    pub fn hit_test_local(&self, x: f32, y: f32) -> Option<InstanceId> {
        self.instances
            .iter()
            .find(|instance| {
                let bounds = instance.bounds();
                let (lx, ly) = localize(&bounds, x, y);
                in_bounds(&bounds, lx, ly)
            })
            .map(GameInstance::id)
    }

    /// First instance whose absolute screen rectangle contains any of the
    /// given contact points. Instances are the outer loop, so registry
    /// order wins over contact order.
    pub fn hit_test_absolute(&self, points: &[TouchPoint]) -> Option<InstanceId> {
        self.instances
            .iter()
            .find(|instance| {
                let bounds = instance.bounds();
                points
                    .iter()
                    .any(|p| contains_absolute(&bounds, p.page_x, p.page_y))
            })
            .map(GameInstance::id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
