//=========================================================================
// Input System
//
// Main entry point: one router, one surface, one queue.
//
// Architecture:
// ```text
//     InputSystemBuilder  ──build(surface)──>  InputSystem  ──run()──>  [Winit loop]
//         │                                        │
//         ├─ with_clear_focus_on_unregister()      ├─ register / unregister
//         ├─ with_queue_capacity()                 ├─ attach / detach listeners
//         └─ with_max_events_per_pump()            ├─ dispatch (same thread)
//                                                  ├─ sender()  (other threads)
//                                                  └─ pump()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputState, RawEvent};
use crate::core::platform_bridge::{
    InputQueue, InputSurface, PumpStatus, RawEventBridge, RawEventSender,
};
use crate::core::routing::{Dispatch, GameInstance, InputRouter, InstanceId, InstanceRegistry};
use crate::platform::{Platform, PlatformError, WinitSurface};

//=== InputSystemBuilder ==================================================

/// Builder for configuring and constructing an [`InputSystem`].
///
/// # Default Values
///
/// - **Clear focus on unregister**: true
/// - **Queue capacity**: 128 events
/// - **Max events per pump**: 100
///
/// # Examples
///
/// ```no_run
/// use aetheric_input_router::{InputSystemBuilder, WinitSurface};
/// use aetheric_input_router::core::routing::{GameInstance, ScreenBounds};
///
/// let mut system = InputSystemBuilder::new()
///     .with_queue_capacity(256)
///     .build(WinitSurface::new());
///
/// system.register(GameInstance::new(ScreenBounds::new(0.0, 0.0, 400.0, 600.0)));
/// system.register(GameInstance::new(ScreenBounds::new(400.0, 0.0, 400.0, 600.0)));
///
/// system.run("Two players").expect("event loop");
/// ```
#[derive(Debug, Clone)]
pub struct InputSystemBuilder {
    clear_focus_on_unregister: bool,
    queue_capacity: usize,
    max_events_per_pump: usize,
}

impl InputSystemBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            clear_focus_on_unregister: true,
            queue_capacity: 128,
            max_events_per_pump: 100,
        }
    }

    /// Whether unregistering the focused instance also clears focus.
    ///
    /// Default: true
    pub fn with_clear_focus_on_unregister(mut self, enabled: bool) -> Self {
        self.clear_focus_on_unregister = enabled;
        self
    }

    /// Sets how many raw events may wait for the next `pump()`. Once
    /// full, `RawEventSender::send` rejects events with
    /// `InputError::QueueFull`.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Queue capacity must be positive");
        self.queue_capacity = capacity;
        self
    }

    /// Sets the most queued events one `pump()` dispatches.
    ///
    /// Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_events_per_pump(mut self, max: usize) -> Self {
        assert!(max > 0, "Max events per pump must be positive");
        self.max_events_per_pump = max;
        self
    }

    /// Builds the system around `surface`. Listeners start detached.
    pub fn build<S: InputSurface>(self, surface: S) -> InputSystem<S> {
        info!(
            "Building input system (queue: {}, pump limit: {}, clear focus on unregister: {})",
            self.queue_capacity, self.max_events_per_pump, self.clear_focus_on_unregister
        );

        let mut router = InputRouter::new();
        router.set_clear_focus_on_unregister(self.clear_focus_on_unregister);

        let (sender, queue) = InputQueue::bounded(self.queue_capacity, self.max_events_per_pump);

        InputSystem {
            bridge: RawEventBridge::new(surface, router),
            queue,
            sender,
        }
    }
}

impl Default for InputSystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== InputSystem =========================================================

/// Routes input from one shared surface to several game instances.
///
/// All routing happens on the thread that owns the system. Other threads
/// submit raw events through [`InputSystem::sender`]; they are routed on
/// the next [`InputSystem::pump`].
#[derive(Debug)]
pub struct InputSystem<S: InputSurface> {
    bridge: RawEventBridge<S>,
    queue: InputQueue,
    sender: RawEventSender,
}

impl<S: InputSurface> InputSystem<S> {
    //--- Instances --------------------------------------------------------

    pub fn register(&mut self, instance: GameInstance) -> InstanceId {
        self.bridge.router_mut().register(instance)
    }

    /// Removes an instance and hands it back.
    pub fn unregister(&mut self, id: InstanceId) -> Option<GameInstance> {
        self.bridge.router_mut().unregister(id)
    }

    pub fn registry(&self) -> &InstanceRegistry {
        self.bridge.router().registry()
    }

    pub fn instance(&self, id: InstanceId) -> Option<&GameInstance> {
        self.bridge.router().instance(id)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut GameInstance> {
        self.bridge.router_mut().instance_mut(id)
    }

    pub fn input(&self, id: InstanceId) -> Option<&InputState> {
        self.bridge.router().input(id)
    }

    /// Subscriber access for `id`'s input.
    pub fn input_mut(&mut self, id: InstanceId) -> Option<&mut InputState> {
        self.bridge.router_mut().input_mut(id)
    }

    //--- Focus ------------------------------------------------------------

    pub fn focused(&self) -> Option<InstanceId> {
        self.bridge.router().focused()
    }

    pub fn blur(&mut self) {
        self.bridge.router_mut().blur();
    }

    //--- Listeners --------------------------------------------------------

    pub fn attach_global_listeners(&mut self) {
        self.bridge.attach_global_listeners();
    }

    pub fn detach_global_listeners(&mut self) {
        self.bridge.detach_global_listeners();
    }

    pub fn is_grabbed(&self) -> bool {
        self.bridge.is_grabbed()
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes one raw event on the calling thread.
    pub fn dispatch(&mut self, event: &RawEvent) -> Dispatch {
        self.bridge.dispatch(event)
    }

    /// Producer handle for raw events from other threads.
    pub fn sender(&self) -> RawEventSender {
        self.sender.clone()
    }

    /// Routes events queued through [`InputSystem::sender`].
    pub fn pump(&mut self) -> PumpStatus {
        self.queue.pump(&mut self.bridge)
    }

    //--- Accessors --------------------------------------------------------

    pub fn router(&self) -> &InputRouter {
        self.bridge.router()
    }

    pub fn surface(&self) -> &S {
        self.bridge.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.bridge.surface_mut()
    }
}

impl InputSystem<WinitSurface> {
    //--- Execution --------------------------------------------------------

    /// Opens a window titled `title` and routes its input until it closes.
    ///
    /// Attaches the global listeners first if they are not attached yet.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the Winit event loop fails.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self, title: &str) -> Result<(), PlatformError> {
        info!("Starting input system ({} instances)", self.registry().len());

        self.attach_global_listeners();
        let result = Platform::new(self, title).run();

        info!("Input system event loop exited");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{EventKind, GameEvent, KeyCode, Modifiers, MouseButton};
    use crate::core::platform_bridge::DetachedSurface;
    use crate::core::routing::ScreenBounds;
    use crate::core::InputError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::thread;

    fn left_half() -> GameInstance {
        GameInstance::new(ScreenBounds::new(0.0, 0.0, 100.0, 100.0))
    }

    fn right_half() -> GameInstance {
        GameInstance::new(ScreenBounds::new(100.0, 0.0, 100.0, 100.0))
    }

    fn click(x: f32, y: f32) -> RawEvent {
        RawEvent::PointerDown { x, y, button: MouseButton::PRIMARY }
    }

    //=====================================================================
    // InputSystemBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = InputSystemBuilder::new();
        assert!(builder.clear_focus_on_unregister);
        assert_eq!(builder.queue_capacity, 128);
        assert_eq!(builder.max_events_per_pump, 100);
    }

    #[test]
    fn builder_with_queue_capacity() {
        let builder = InputSystemBuilder::new().with_queue_capacity(256);
        assert_eq!(builder.queue_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Queue capacity must be positive")]
    fn builder_with_queue_capacity_panics_on_zero() {
        InputSystemBuilder::new().with_queue_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Max events per pump must be positive")]
    fn builder_with_max_events_per_pump_panics_on_zero() {
        InputSystemBuilder::new().with_max_events_per_pump(0);
    }

    #[test]
    fn built_system_starts_detached_and_unfocused() {
        let system = InputSystemBuilder::new().build(DetachedSurface);
        assert!(!system.is_grabbed());
        assert_eq!(system.focused(), None);
        assert!(system.registry().is_empty());
    }

    //=====================================================================
    // InputSystem Tests
    //=====================================================================

    #[test]
    fn keys_follow_focus_between_instances() {
        let mut system = InputSystemBuilder::new().build(DetachedSurface);
        let left = system.register(left_half());
        let right = system.register(right_half());
        system.attach_global_listeners();

        let left_keys = Rc::new(Cell::new(0));
        let right_keys = Rc::new(Cell::new(0));
        let (l, r) = (Rc::clone(&left_keys), Rc::clone(&right_keys));
        system
            .input_mut(left)
            .unwrap()
            .on(EventKind::KeyDown, move |_: &GameEvent| l.set(l.get() + 1));
        system
            .input_mut(right)
            .unwrap()
            .on(EventKind::KeyDown, move |_: &GameEvent| r.set(r.get() + 1));

        let up = RawEvent::KeyDown { key: KeyCode::UP, modifiers: Modifiers::NONE };
        let up_release = RawEvent::KeyUp { key: KeyCode::UP, modifiers: Modifiers::NONE };

        system.dispatch(&click(10.0, 10.0));
        system.dispatch(&up);
        system.dispatch(&up_release);
        system.dispatch(&click(150.0, 10.0));
        system.dispatch(&up);

        assert_eq!(left_keys.get(), 1);
        assert_eq!(right_keys.get(), 1);
        assert_eq!(system.focused(), Some(right));
    }

    #[test]
    fn unregister_focused_clears_focus_by_default() {
        let mut system = InputSystemBuilder::new().build(DetachedSurface);
        let id = system.register(left_half());
        system.attach_global_listeners();
        system.dispatch(&click(10.0, 10.0));

        let removed = system.unregister(id);

        assert!(removed.is_some());
        assert_eq!(system.focused(), None);
    }

    #[test]
    fn unregister_can_leave_stale_focus() {
        let mut system = InputSystemBuilder::new()
            .with_clear_focus_on_unregister(false)
            .build(DetachedSurface);
        let id = system.register(left_half());
        system.attach_global_listeners();
        system.dispatch(&click(10.0, 10.0));

        system.unregister(id);
        let up = RawEvent::KeyDown { key: KeyCode::UP, modifiers: Modifiers::NONE };
        let d = system.dispatch(&up);

        assert_eq!(system.focused(), Some(id));
        assert!(d.is_ignored());
    }

    #[test]
    fn queued_events_are_routed_on_pump() {
        let mut system = InputSystemBuilder::new().build(DetachedSurface);
        let id = system.register(left_half());
        system.attach_global_listeners();

        let sender = system.sender();
        thread::spawn(move || {
            sender.send(click(10.0, 10.0)).unwrap();
            sender
                .send(RawEvent::KeyDown { key: KeyCode::ACTION_1, modifiers: Modifiers::NONE })
                .unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(system.pump(), PumpStatus::Drained(2));
        assert_eq!(system.focused(), Some(id));
        assert!(system.input(id).unwrap().is_key_down(KeyCode::ACTION_1));
    }

    #[test]
    fn handler_sending_into_full_queue_does_not_block_dispatch() {
        let mut system = InputSystemBuilder::new()
            .with_queue_capacity(1)
            .build(DetachedSurface);
        let id = system.register(left_half());
        system.attach_global_listeners();

        let sender = system.sender();
        sender.send(click(50.0, 50.0)).unwrap();

        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let handler_sender = system.sender();
        system.input_mut(id).unwrap().on(EventKind::MouseDown, move |_: &GameEvent| {
            *sink.borrow_mut() = Some(handler_sender.send(click(60.0, 60.0)));
        });

        let d = system.dispatch(&click(5.0, 5.0));

        assert!(d.emitted);
        assert_eq!(*result.borrow(), Some(Err(InputError::QueueFull)));
        assert_eq!(sender.len(), 1);
    }

    #[test]
    fn pump_never_reports_disconnect_while_system_lives() {
        let mut system = InputSystemBuilder::new().build(DetachedSurface);
        drop(system.sender());
        assert_eq!(system.pump(), PumpStatus::Drained(0));
    }
}
