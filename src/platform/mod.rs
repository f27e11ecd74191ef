//=========================================================================
// Platform Subsystem
//
// Runs the input system against a real OS window through Winit.
//
// Architecture:
// ```text
//  Main Thread (Winit requirement on macOS/iOS):
//  ┌────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                      │
//  │   ↓ WindowEvent                                        │
//  │  InputProcessor ── converts, tracks modifiers/touches  │
//  │   ↓ RawEvent                                           │
//  │  WinitSurface::is_observing(kind)? ── else dropped     │
//  │   ↓                                                    │
//  │  InputSystem::dispatch ── routes to one GameInstance   │
//  │                                                        │
//  │  about_to_wait ── InputSystem::pump()                  │
//  │                     ↑                                  │
//  └─────────────────────┼──────────────────────────────────┘
//                        │ RawEventSender (any thread)
// ```
//
// Key Design Decisions:
// - **The window is the shared surface**: "observing" a raw kind means
//   the platform forwards that kind; a grab of surface focus calls
//   `Window::focus_window`
// - **Periodic wake**: the loop wakes at least every `QUEUE_POLL_INTERVAL`
//   so events queued from other threads are pumped even when the window
//   is idle
// - **Lazy window**: created in `resumed()` (mobile compatibility)
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::collections::HashSet;
use std::time::Duration;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::{RawEvent, RawEventKind};
use crate::core::platform_bridge::InputSurface;
use crate::system::InputSystem;
use input_processor::InputProcessor;

//=== Constants ===========================================================

/// Longest the event loop sleeps before pumping the input queue again.
const QUEUE_POLL_INTERVAL: Duration = Duration::from_millis(8);

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal: without an event loop there is no window
/// to take input from.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) | Self::EventLoopExecution(e) => Some(e),
        }
    }
}

//=== WinitSurface ========================================================

/// A Winit window acting as the shared input surface.
///
/// Listener state is kept per raw kind; the platform consults it before
/// forwarding anything. Before the window exists, focus requests are
/// logged and dropped.
#[derive(Debug, Default)]
pub struct WinitSurface {
    window: Option<Window>,
    observed: HashSet<RawEventKind>,
}

impl WinitSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if events of `kind` are currently forwarded.
    pub fn is_observing(&self, kind: RawEventKind) -> bool {
        self.observed.contains(&kind)
    }

    /// The OS window, once `resumed()` has created it.
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub(crate) fn set_window(&mut self, window: Window) {
        self.window = Some(window);
    }
}

impl InputSurface for WinitSurface {
    fn observe(&mut self, kind: RawEventKind) {
        self.observed.insert(kind);
    }

    fn stop_observing(&mut self, kind: RawEventKind) {
        self.observed.remove(&kind);
    }

    fn focus(&mut self) {
        match &self.window {
            Some(window) => window.focus_window(),
            None => trace!(target: "platform", "Focus requested before window exists"),
        }
    }
}

//=== Platform ============================================================

/// Winit application driving an [`InputSystem`].
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(system, title)`
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: window close → loop exits → `run()` returns
///
/// This type is NOT Send/Sync and must stay on the main thread. Other
/// threads reach the router through `InputSystem::sender()`.
pub(crate) struct Platform {
    system: InputSystem<WinitSurface>,
    input_processor: InputProcessor,
    title: String,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub(crate) fn new(system: InputSystem<WinitSurface>, title: impl Into<String>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            system,
            input_processor: InputProcessor::new(),
            title: title.into(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Dispatches `event` if its kind is being observed.
    fn forward(&mut self, event: RawEvent) {
        let kind = event.kind();
        if !self.system.surface().is_observing(kind) {
            trace!(target: "platform::input", "{:?} not observed, dropped", kind);
            return;
        }

        let dispatch = self.system.dispatch(&event);
        trace!(target: "platform::input", "{:?} → {:?}", kind, dispatch);
    }

    fn forward_all(&mut self, events: Vec<RawEvent>) {
        for event in events {
            self.forward(event);
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn system(&self) -> &InputSystem<WinitSurface> {
        &self.system
    }

    #[cfg(test)]
    pub(crate) fn system_mut(&mut self) -> &mut InputSystem<WinitSurface> {
        &mut self.system
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.system.surface().window().is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.system.surface_mut().set_window(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input_processor.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let events = self.input_processor.process_key_event(&key_event);
                if events.is_empty() {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
                self.forward_all(events);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_cursor_moved(position.x as f32, position.y as f32);
                self.forward(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let events = self.input_processor.process_mouse_button(button, state);
                self.forward_all(events);
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                );
                self.forward(event);
            }

            _ => {}
        }
    }

    /// Pumps events queued from other threads, then sleeps briefly.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.system.pump();
        event_loop.set_control_flow(ControlFlow::wait_duration(QUEUE_POLL_INTERVAL));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
