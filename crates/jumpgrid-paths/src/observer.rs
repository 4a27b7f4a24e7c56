//! Search progress callbacks.
//!
//! Visualisers hook into a search through [`SearchObserver`]. Events are
//! reported after the engine has updated its own state, and observers have
//! no way to influence the outcome.

use jumpgrid_core::Point;

/// What happened to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Inserted into the open set.
    Opened,
    /// Already open; its cost was lowered and it was re-prioritised.
    Updated,
    /// Removed from the open set and finalised.
    Closed,
}

/// A single search event with the cell's costs at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchEvent {
    pub pos: Point,
    pub kind: EventKind,
    pub g: i32,
    pub h: i32,
}

impl SearchEvent {
    /// `g + h`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }
}

/// Receives [`SearchEvent`]s while a search runs.
///
/// Any `FnMut(SearchEvent)` closure is an observer.
pub trait SearchObserver {
    fn on_event(&mut self, event: SearchEvent);
}

impl<F: FnMut(SearchEvent)> SearchObserver for F {
    #[inline]
    fn on_event(&mut self, event: SearchEvent) {
        self(event)
    }
}
