//=========================================================================
// Input Queue
//=========================================================================
//
// Single-writer queue for raw events produced on other threads.
//
// Architecture:
//   device threads → RawEventSender::send() → bounded channel
//                                                  ↓
//   dispatch thread → InputQueue::pump(&mut bridge) → RawEventBridge
//
// Only the thread that owns the bridge ever touches the router and the
// instances' `InputState`s, so the hit-test-then-focus transition runs
// without interleaving. Events are dispatched strictly in arrival order.
//
// Pumping is bounded per call to keep one flood from starving the
// caller's loop. Nothing blocks: an empty queue returns immediately and
// `send` on a full queue fails with `InputError::QueueFull`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::bridge::RawEventBridge;
use super::interface::InputSurface;
use crate::core::error::InputError;
use crate::core::input::RawEvent;

//=== PumpStatus ==========================================================

/// Outcome of one `pump()` call. Each variant carries the number of
/// events dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// The queue is empty.
    Drained(usize),

    /// The per-pump limit was reached with events still queued.
    Backlogged(usize),

    /// Every sender is gone and the queue is empty.
    Disconnected(usize),
}

//=== RawEventSender ======================================================

/// Producer handle. Cheap to clone; safe to move to any thread.
#[derive(Debug, Clone)]
pub struct RawEventSender {
    sender: Sender<RawEvent>,
}

impl RawEventSender {
    /// Queues `event` without waiting. A full queue rejects the event.
    ///
    /// Safe to call from subscriber handlers, which run on the thread
    /// that pumps this queue.
    pub fn send(&self, event: RawEvent) -> Result<(), InputError> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(event) => {
                warn!(
                    target: "input::queue",
                    "Input queue full, dropping {:?}",
                    event.kind()
                );
                InputError::QueueFull
            }
            TrySendError::Disconnected(_) => InputError::QueueDisconnected,
        })
    }

    /// Queues `event`, waiting for room if the queue is full.
    ///
    /// For device threads only. Called on the pumping thread while the
    /// queue is full, this never returns.
    pub fn send_blocking(&self, event: RawEvent) -> Result<(), InputError> {
        self.sender
            .send(event)
            .map_err(|_| InputError::QueueDisconnected)
    }

    /// Number of events waiting to be pumped.
    pub fn len(&self) -> usize {
        self.sender.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_empty()
    }
}

//=== InputQueue ==========================================================

/// Consumer side, owned by the dispatch thread.
#[derive(Debug)]
pub struct InputQueue {
    receiver: Receiver<RawEvent>,
    max_events_per_pump: usize,
}

impl InputQueue {
    /// Creates a queue holding at most `capacity` pending events.
    pub fn bounded(capacity: usize, max_events_per_pump: usize) -> (RawEventSender, InputQueue) {
        let (sender, receiver) = bounded(capacity);
        (
            RawEventSender { sender },
            InputQueue {
                receiver,
                max_events_per_pump,
            },
        )
    }

    /// Dispatches pending events through `bridge`, oldest first.
    pub fn pump<S: InputSurface>(&mut self, bridge: &mut RawEventBridge<S>) -> PumpStatus {
        let mut dispatched = 0;

        while dispatched < self.max_events_per_pump {
            match self.receiver.try_recv() {
                Ok(event) => {
                    bridge.dispatch(&event);
                    dispatched += 1;
                }
                Err(TryRecvError::Empty) => return PumpStatus::Drained(dispatched),
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "input::queue", "All input senders dropped");
                    return PumpStatus::Disconnected(dispatched);
                }
            }
        }

        if self.receiver.is_empty() {
            return PumpStatus::Drained(dispatched);
        }

        warn!(
            target: "input::queue",
            "Input queue backlog: dispatched {} events, {} still pending",
            dispatched,
            self.receiver.len()
        );
        PumpStatus::Backlogged(dispatched)
    }

    /// Number of events waiting to be pumped.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
