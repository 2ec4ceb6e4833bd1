//! Event types and sinks for observing generation runs.
//!
//! This module defines [`ScarfEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while a [`crate::runner::ScarfRunner`] samples seeds
//! and rasterizes the cell pattern.
use glam::Vec2;

use crate::raster::RasterStats;

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScarfEvent {
    /// Emitted once the first seed has been placed.
    SamplingStarted {
        /// Position of the initial seed.
        seed: Vec2,
        /// Grid dimensions `(columns, rows)`.
        grid_size: (usize, usize),
    },

    /// Emitted for every accepted seed after the first.
    PointPlaced {
        /// Index of the new point in the point sequence.
        index: usize,
        /// Index of the active point it was spawned from.
        parent: usize,
        /// Position of the new point.
        position: Vec2,
    },

    /// Emitted when an active point exhausts its retry budget.
    PointExhausted {
        /// Index of the retired point.
        index: usize,
    },

    /// Emitted when the active list is empty.
    SamplingFinished {
        /// Total number of placed seeds.
        point_count: usize,
        /// Number of active-list iterations performed.
        iterations: usize,
    },

    /// Emitted before the first pixel is classified.
    RasterStarted {
        /// Raster size `(width, height)` in pixels.
        size: (u32, u32),
    },

    /// Emitted once every pixel has been written.
    RasterFinished {
        /// Pixel counts for the finished raster.
        stats: RasterStats,
    },

    /// Non-fatal warning generated during generation.
    Warning {
        /// Context string (e.g. phase name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ScarfEvent`], used by sinks to opt out of event families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScarfEventKind {
    SamplingStarted,
    PointPlaced,
    PointExhausted,
    SamplingFinished,
    RasterStarted,
    RasterFinished,
    Warning,
}

impl ScarfEvent {
    /// Returns the kind of this event.
    pub fn kind(&self) -> ScarfEventKind {
        match self {
            ScarfEvent::SamplingStarted { .. } => ScarfEventKind::SamplingStarted,
            ScarfEvent::PointPlaced { .. } => ScarfEventKind::PointPlaced,
            ScarfEvent::PointExhausted { .. } => ScarfEventKind::PointExhausted,
            ScarfEvent::SamplingFinished { .. } => ScarfEventKind::SamplingFinished,
            ScarfEvent::RasterStarted { .. } => ScarfEventKind::RasterStarted,
            ScarfEvent::RasterFinished { .. } => ScarfEventKind::RasterFinished,
            ScarfEvent::Warning { .. } => ScarfEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ScarfEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScarfEvent);

    /// Whether the sink cares about events of `kind`. Emitters skip building events that
    /// no one wants.
    #[inline]
    fn wants(&self, _kind: ScarfEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ScarfEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScarfEvent) {}

    #[inline]
    fn wants(&self, _kind: ScarfEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScarfEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScarfEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScarfEvent),
{
    #[inline]
    fn send(&mut self, event: ScarfEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScarfEvent>,
    only: Option<Vec<ScarfEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that only records the given kinds.
    pub fn only(kinds: impl IntoIterator<Item = ScarfEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<ScarfEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScarfEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScarfEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ScarfEventKind) -> bool {
        match &self.only {
            Some(kinds) => kinds.contains(&kind),
            None => true,
        }
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ScarfEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: ScarfEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
