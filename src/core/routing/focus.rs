//=========================================================================
// Focus Router
//=========================================================================
//
// Single-slot state naming which instance currently owns input.
//
// State machine:
// ```text
//               pointer-down / touch-start inside I
//   Unfocused ─────────────────────────────────────────► Focused(I)
//       ▲                                                   │
//       │  pointer-down outside I  (re-resolved against     │
//       └───────────────── the registry in the same ────────┘
//                          dispatch)
// ```
//
// The slot holds an `InstanceId`, never the instance itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::registry::InstanceId;

//=== FocusState ==========================================================

/// Which instance (if any) receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// No instance owns events; the next qualifying down event hit-tests.
    #[default]
    Unfocused,

    /// `InstanceId` owns keyboard and pointer events.
    Focused(InstanceId),
}

//=== FocusRouter =========================================================

/// Owner of the focus slot.
#[derive(Debug, Default)]
pub struct FocusRouter {
    state: FocusState,
}

impl FocusRouter {
    pub fn new() -> Self {
        Self {
            state: FocusState::Unfocused,
        }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Currently focused instance.
    pub fn focused(&self) -> Option<InstanceId> {
        match self.state {
            FocusState::Focused(id) => Some(id),
            FocusState::Unfocused => None,
        }
    }

    pub fn is_focused(&self, id: InstanceId) -> bool {
        self.state == FocusState::Focused(id)
    }

    /// Focuses `id`. Focusing the already-focused instance is a no-op.
    pub fn focus(&mut self, id: InstanceId) {
        if self.is_focused(id) {
            return;
        }

        debug!(target: "input::focus", "Focus {:?} -> {}", self.state, id);
        self.state = FocusState::Focused(id);
    }

    /// Clears focus.
    pub fn blur(&mut self) {
        if let FocusState::Focused(id) = self.state {
            debug!(target: "input::focus", "Focus {} -> Unfocused", id);
            self.state = FocusState::Unfocused;
        }
    }

    /// Clears focus if it points at `id`. Returns `true` if it did.
    pub fn forget(&mut self, id: InstanceId) -> bool {
        if self.is_focused(id) {
            self.blur();
            true
        } else {
            false
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
