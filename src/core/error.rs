//=========================================================================
// Input Errors
//=========================================================================
//
// Errors for the fallible edges of the input API.
//
// Event dispatch itself never fails: malformed device input is dropped.
// Only name parsing and cross-thread submission can report an error.
// Submission never waits, so a full queue is an error too.
//
//=========================================================================

//=== InputError ==========================================================

/// Errors returned by the input API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Subscription requested for an event name that is never emitted.
    UnknownEventName(String),

    /// The input queue was full; the event was dropped.
    QueueFull,

    /// The dispatch side of the input queue was dropped.
    QueueDisconnected,
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEventName(name) => write!(f, "Unknown input event name: {}", name),
            Self::QueueFull => write!(f, "Input queue full"),
            Self::QueueDisconnected => write!(f, "Input queue disconnected"),
        }
    }
}

impl std::error::Error for InputError {}
