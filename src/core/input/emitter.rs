//=========================================================================
// Emitter
//=========================================================================
//
// Observer registry keyed by event kind.
//
// Architecture:
//   on(kind, handler) → HashMap<K, Vec<(HandlerId, handler)>>
//                              ↓
//   emit(kind, &event) → every handler for `kind`, in registration order
//                              ↓
//   off(kind, HandlerId) → removes exactly that handler
//
// Closures have no comparable identity, so `on()` hands back a
// `HandlerId` token and removal is by token.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

//=== HandlerId ===========================================================

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a registered handler. Process-unique, so a token only
/// ever matches the registration that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

//=== Emitter =============================================================

type Handler<E> = Box<dyn FnMut(&E)>;

/// Multi-handler observer registry.
pub struct Emitter<K, E> {
    handlers: HashMap<K, Vec<(HandlerId, Handler<E>)>>,
}

impl<K: Copy + Eq + Hash, E> Emitter<K, E> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for `kind`. The same closure logic may be
    /// registered several times; each registration gets its own id.
    pub fn on<F>(&mut self, kind: K, handler: F) -> HandlerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = HandlerId::next();

        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));

        id
    }

    /// Removes the handler registered under `id` for `kind`.
    /// Returns `false` if no such handler exists.
    pub fn off(&mut self, kind: K, id: HandlerId) -> bool {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return false;
        };

        let before = list.len();
        list.retain(|(handler_id, _)| *handler_id != id);
        let removed = list.len() != before;

        if list.is_empty() {
            self.handlers.remove(&kind);
        }

        removed
    }

    /// Calls every handler registered for `kind`. Returns how many ran.
    pub fn emit(&mut self, kind: K, event: &E) -> usize {
        match self.handlers.get_mut(&kind) {
            Some(list) => {
                for (_, handler) in list.iter_mut() {
                    handler(event);
                }
                list.len()
            }
            None => 0,
        }
    }

    /// Number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: K) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of handlers across all kinds.
    pub fn total_handlers(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }
}

impl<K: Copy + Eq + Hash, E> Default for Emitter<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> fmt::Debug for Emitter<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.handlers.values().map(Vec::len).sum();
        f.debug_struct("Emitter")
            .field("kinds", &self.handlers.len())
            .field("handlers", &total)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
