//! Structural change notification.
//!
//! Lists report every mutation through a [`ChangeSink`] as it happens. The
//! four callbacks mirror what an incremental renderer needs to patch its own
//! copy of the rows without re-reading the whole list:
//!
//! | Callback | Meaning |
//! |----------|---------|
//! | `on_inserted(position, count)` | `count` rows now exist starting at `position` |
//! | `on_removed(position, count)` | `count` rows starting at `position` are gone |
//! | `on_moved(from, to)` | the row at `from` now lives at `to` |
//! | `on_changed(position, count)` | `count` rows starting at `position` need a redraw |
//!
//! Positions always refer to the state the receiver has after applying every
//! previously delivered event.

use std::sync::Arc;

use grouped_list_core::Signal;

/// Receiver of structural change events.
pub trait ChangeSink {
    /// `count` rows were inserted at `position`.
    fn on_inserted(&mut self, position: usize, count: usize);

    /// `count` rows were removed at `position`.
    fn on_removed(&mut self, position: usize, count: usize);

    /// One row moved from `from` to `to`.
    fn on_moved(&mut self, from: usize, to: usize);

    /// `count` rows starting at `position` changed content.
    fn on_changed(&mut self, position: usize, count: usize);
}

impl<S: ChangeSink + ?Sized> ChangeSink for &mut S {
    fn on_inserted(&mut self, position: usize, count: usize) {
        (**self).on_inserted(position, count);
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        (**self).on_removed(position, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        (**self).on_moved(from, to);
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        (**self).on_changed(position, count);
    }
}

/// A single recorded structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    /// Rows inserted.
    Inserted { position: usize, count: usize },
    /// Rows removed.
    Removed { position: usize, count: usize },
    /// One row moved.
    Moved { from: usize, to: usize },
    /// Rows changed content.
    Changed { position: usize, count: usize },
}

impl ChangeEvent {
    /// Net change in row count caused by this event.
    pub fn size_delta(&self) -> isize {
        match *self {
            Self::Inserted { count, .. } => count as isize,
            Self::Removed { count, .. } => -(count as isize),
            Self::Moved { .. } | Self::Changed { .. } => 0,
        }
    }

    /// Replays this event into another sink.
    pub fn replay<S: ChangeSink + ?Sized>(&self, sink: &mut S) {
        match *self {
            Self::Inserted { position, count } => sink.on_inserted(position, count),
            Self::Removed { position, count } => sink.on_removed(position, count),
            Self::Moved { from, to } => sink.on_moved(from, to),
            Self::Changed { position, count } => sink.on_changed(position, count),
        }
    }
}

/// A sink that records every event in order.
///
/// Useful for tests, for consumers that batch events before applying them,
/// and for debugging desynchronized renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    events: Vec<ChangeEvent>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, oldest first.
    pub fn events(&self) -> &[ChangeEvent] {
        &self.events
    }

    /// Removes and returns every recorded event.
    pub fn take(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forgets every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// `(position, count)` of every insertion, in order.
    pub fn inserted(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                ChangeEvent::Inserted { position, count } => Some((position, count)),
                _ => None,
            })
            .collect()
    }

    /// `(position, count)` of every removal, in order.
    pub fn removed(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                ChangeEvent::Removed { position, count } => Some((position, count)),
                _ => None,
            })
            .collect()
    }

    /// `(from, to)` of every move, in order.
    pub fn moved(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                ChangeEvent::Moved { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    /// `(position, count)` of every content change, in order.
    pub fn changed(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                ChangeEvent::Changed { position, count } => Some((position, count)),
                _ => None,
            })
            .collect()
    }
}

impl ChangeSink for RecordingSink {
    fn on_inserted(&mut self, position: usize, count: usize) {
        self.events.push(ChangeEvent::Inserted { position, count });
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        self.events.push(ChangeEvent::Removed { position, count });
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        self.events.push(ChangeEvent::Moved { from, to });
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        self.events.push(ChangeEvent::Changed { position, count });
    }
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSink;

impl ChangeSink for NoopSink {
    fn on_inserted(&mut self, _position: usize, _count: usize) {}
    fn on_removed(&mut self, _position: usize, _count: usize) {}
    fn on_moved(&mut self, _from: usize, _to: usize) {}
    fn on_changed(&mut self, _position: usize, _count: usize) {}
}

/// Signals emitted by a list for structural changes.
///
/// Connect to these to observe a list from several places at once. Slots run
/// synchronously on the mutating thread, before the mutation returns. Wrap in
/// an [`Arc`] to keep a handle for connecting after the list takes the sink.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use grouped_list::model::{ChangeSink, ListSignals};
///
/// let signals = Arc::new(ListSignals::new());
/// signals.rows_inserted.connect(|&(position, count)| {
///     println!("{count} rows at {position}");
/// });
///
/// let mut sink = signals.clone();
/// sink.on_inserted(0, 2);
/// ```
#[derive(Debug, Default)]
pub struct ListSignals {
    /// Emitted after rows were inserted.
    /// Args: (position, count)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted after rows were removed.
    /// Args: (position, count)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted after a row moved.
    /// Args: (from, to)
    pub row_moved: Signal<(usize, usize)>,

    /// Emitted after rows changed content.
    /// Args: (position, count)
    pub rows_changed: Signal<(usize, usize)>,
}

static_assertions::assert_impl_all!(ListSignals: Send, Sync);

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self::default()
    }

    fn emit_inserted(&self, position: usize, count: usize) {
        self.rows_inserted.emit((position, count));
    }

    fn emit_removed(&self, position: usize, count: usize) {
        self.rows_removed.emit((position, count));
    }

    fn emit_moved(&self, from: usize, to: usize) {
        self.row_moved.emit((from, to));
    }

    fn emit_changed(&self, position: usize, count: usize) {
        self.rows_changed.emit((position, count));
    }
}

impl ChangeSink for ListSignals {
    fn on_inserted(&mut self, position: usize, count: usize) {
        self.emit_inserted(position, count);
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        self.emit_removed(position, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        self.emit_moved(from, to);
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        self.emit_changed(position, count);
    }
}

impl ChangeSink for Arc<ListSignals> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        self.emit_inserted(position, count);
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        self.emit_removed(position, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        self.emit_moved(from, to);
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        self.emit_changed(position, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    type Collected = Arc<Mutex<Vec<(&'static str, usize, usize)>>>;

    #[test]
    fn test_recording_sink_records_in_order() {
        let mut sink = RecordingSink::new();
        sink.on_inserted(0, 2);
        sink.on_changed(1, 1);
        sink.on_moved(1, 0);
        sink.on_removed(0, 1);

        assert_eq!(
            sink.events(),
            &[
                ChangeEvent::Inserted { position: 0, count: 2 },
                ChangeEvent::Changed { position: 1, count: 1 },
                ChangeEvent::Moved { from: 1, to: 0 },
                ChangeEvent::Removed { position: 0, count: 1 },
            ]
        );
        assert_eq!(sink.inserted(), vec![(0, 2)]);
        assert_eq!(sink.changed(), vec![(1, 1)]);
        assert_eq!(sink.moved(), vec![(1, 0)]);
        assert_eq!(sink.removed(), vec![(0, 1)]);
    }

    #[test]
    fn test_recording_sink_take_and_clear() {
        let mut sink = RecordingSink::new();
        sink.on_inserted(0, 1);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());

        sink.on_removed(0, 1);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_size_delta() {
        let events = [
            ChangeEvent::Inserted { position: 0, count: 5 },
            ChangeEvent::Removed { position: 1, count: 2 },
            ChangeEvent::Moved { from: 0, to: 2 },
            ChangeEvent::Changed { position: 0, count: 3 },
        ];
        let total: isize = events.iter().map(ChangeEvent::size_delta).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_replay_into_other_sink() {
        let mut first = RecordingSink::new();
        first.on_inserted(0, 1);
        first.on_moved(0, 3);

        let mut second = RecordingSink::new();
        for event in first.events() {
            event.replay(&mut second);
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut recorder = RecordingSink::new();
        {
            let mut borrowed = &mut recorder;
            borrowed.on_changed(4, 1);
        }
        assert_eq!(recorder.changed(), vec![(4, 1)]);
    }

    #[test]
    fn test_list_signals_forward_to_slots() {
        let signals = Arc::new(ListSignals::new());
        let collected: Collected = Arc::new(Mutex::new(Vec::new()));

        let c = collected.clone();
        signals
            .rows_inserted
            .connect(move |&(p, n)| c.lock().push(("inserted", p, n)));
        let c = collected.clone();
        signals
            .rows_removed
            .connect(move |&(p, n)| c.lock().push(("removed", p, n)));
        let c = collected.clone();
        signals
            .row_moved
            .connect(move |&(f, t)| c.lock().push(("moved", f, t)));
        let c = collected.clone();
        signals
            .rows_changed
            .connect(move |&(p, n)| c.lock().push(("changed", p, n)));

        let mut sink = signals.clone();
        sink.on_inserted(0, 3);
        sink.on_changed(2, 1);
        sink.on_moved(2, 0);
        sink.on_removed(1, 2);

        assert_eq!(
            *collected.lock(),
            vec![
                ("inserted", 0, 3),
                ("changed", 2, 1),
                ("moved", 2, 0),
                ("removed", 1, 2),
            ]
        );
    }

    #[test]
    fn test_noop_sink() {
        let mut sink = NoopSink;
        sink.on_inserted(0, 1);
        sink.on_removed(0, 1);
    }
}
