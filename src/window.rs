use crate::error::InferError;
use itertools::Itertools;
use serde::Deserialize;

/// Number of inter-key intervals the scorer consumes. Hard precondition:
/// requests with fewer usable intervals are rejected.
pub const WINDOW_SIZE: usize = 10;

/// A single keypress with its monotonic timestamp in milliseconds.
///
/// Ephemeral: created per request, never persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeystrokeEvent {
    #[serde(rename = "char")]
    pub character: String,
    pub timestamp: f64,
}

/// The most recent `WINDOW_SIZE` inter-key deltas, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalWindow {
    intervals: Vec<f64>,
}

impl IntervalWindow {
    /// Compute consecutive timestamp differences and keep only the last
    /// `WINDOW_SIZE` of them.
    pub fn from_events(events: &[KeystrokeEvent]) -> Result<Self, InferError> {
        let deltas: Vec<f64> = events
            .iter()
            .map(|event| event.timestamp)
            .tuple_windows()
            .map(|(earlier, later)| later - earlier)
            .collect();

        if deltas.len() < WINDOW_SIZE {
            return Err(InferError::InsufficientData {
                needed: WINDOW_SIZE,
                got: deltas.len(),
            });
        }

        let start = deltas.len() - WINDOW_SIZE;
        Ok(Self {
            intervals: deltas[start..].to_vec(),
        })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
