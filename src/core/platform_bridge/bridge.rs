//=========================================================================
// Raw Event Bridge
//=========================================================================
//
// Attaches the router to an input surface and forwards raw events.
//
// Architecture:
//   attach_global_listeners() → surface.observe(kind) × 10 → grabbed
//   dispatch(RawEvent) → InputRouter::dispatch → surface.focus() if asked
//   detach_global_listeners() → surface.stop_observing(kind) × 10
//
// Attach and detach are idempotent: the `grabbed` flag guards both, so
// two attaches followed by one detach leave nothing attached.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::interface::InputSurface;
use crate::core::input::{RawEvent, RawEventKind};
use crate::core::routing::{Dispatch, InputRouter};

//=== RawEventBridge ======================================================

/// Listener lifecycle plus dispatch into the router.
#[derive(Debug)]
pub struct RawEventBridge<S: InputSurface> {
    surface: S,
    router: InputRouter,
    grabbed: bool,
}

impl<S: InputSurface> RawEventBridge<S> {
    pub fn new(surface: S, router: InputRouter) -> Self {
        Self {
            surface,
            router,
            grabbed: false,
        }
    }

    //--- Listener Lifecycle -----------------------------------------------

    /// Subscribes to every raw event kind on the surface.
    pub fn attach_global_listeners(&mut self) {
        if self.grabbed {
            debug!(target: "input::bridge", "Listeners already attached");
            return;
        }

        for kind in RawEventKind::ALL {
            self.surface.observe(kind);
        }
        self.grabbed = true;

        info!(target: "input::bridge", "Attached {} input listeners", RawEventKind::ALL.len());
    }

    /// Unsubscribes every raw event kind from the surface.
    pub fn detach_global_listeners(&mut self) {
        if !self.grabbed {
            debug!(target: "input::bridge", "Listeners already detached");
            return;
        }

        for kind in RawEventKind::ALL {
            self.surface.stop_observing(kind);
        }
        self.grabbed = false;

        info!(target: "input::bridge", "Detached input listeners");
    }

    /// `true` while listeners are attached.
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes one raw event. Events arriving while detached are dropped.
    pub fn dispatch(&mut self, event: &RawEvent) -> Dispatch {
        if !self.grabbed {
            trace!(target: "input::bridge", "Dropping {:?} while detached", event.kind());
            return Dispatch::IGNORED;
        }

        let dispatch = self.router.dispatch(event);
        if dispatch.grab_focus {
            self.surface.focus();
        }
        dispatch
    }

    //--- Accessors --------------------------------------------------------

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut InputRouter {
        &mut self.router
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
