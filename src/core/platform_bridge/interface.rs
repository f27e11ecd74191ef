//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the router and whatever delivers raw input.
//
// A surface is the shared thing listeners attach to: a window, a page,
// a test harness. It never decides routing; it only starts or stops
// delivering event kinds and can bring itself to the foreground.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::RawEventKind;

//=== InputSurface ========================================================

/// Shared input surface the bridge attaches its listeners to.
pub trait InputSurface {
    /// Starts delivering events of `kind`.
    fn observe(&mut self, kind: RawEventKind);

    /// Stops delivering events of `kind`.
    fn stop_observing(&mut self, kind: RawEventKind);

    /// Brings the visual surface to the foreground.
    fn focus(&mut self);
}

/// Surface that delivers nothing and ignores focus requests.
///
/// Useful when events only arrive through the input queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSurface;

impl InputSurface for DetachedSurface {
    fn observe(&mut self, _kind: RawEventKind) {}

    fn stop_observing(&mut self, _kind: RawEventKind) {}

    fn focus(&mut self) {}
}
