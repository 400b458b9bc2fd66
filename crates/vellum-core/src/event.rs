//! Chart interaction events and a small synchronous event bus.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of events a chart raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// A data point was clicked
    PointClick,
    /// The pointer moved over a data point
    PointHover,
    /// A legend item toggled a series
    SeriesToggle,
    /// Chart data was replaced
    DataChange,
    /// The chart was resized and re-rendered
    Resize,
}

impl EventKind {
    /// Wire name, e.g. `point-click`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointClick => "point-click",
            Self::PointHover => "point-hover",
            Self::SeriesToggle => "series-toggle",
            Self::DataChange => "data-change",
            Self::Resize => "resize",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "point-click" => Some(Self::PointClick),
            "point-hover" => Some(Self::PointHover),
            "series-toggle" => Some(Self::SeriesToggle),
            "data-change" => Some(Self::DataChange),
            "resize" => Some(Self::Resize),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload describing a data point under interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPayload {
    /// Series name
    pub series: String,
    /// Category label (or point label for scatter)
    pub category: Option<String>,
    /// Data value
    pub value: f64,
    /// Id of the rendered element, if any
    pub element: Option<String>,
}

/// Event payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChartEvent {
    /// A data point was clicked
    PointClick(PointPayload),
    /// The pointer moved over a data point
    PointHover(PointPayload),
    /// A series visibility changed
    SeriesToggle {
        /// Series name
        series: String,
        /// Visibility after the toggle
        visible: bool,
    },
    /// Chart data was replaced
    DataChange {
        /// Number of series after the change
        series_count: usize,
    },
    /// The chart was resized
    Resize {
        /// New width
        width: f64,
        /// New height
        height: f64,
    },
}

impl ChartEvent {
    /// The kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PointClick(_) => EventKind::PointClick,
            Self::PointHover(_) => EventKind::PointHover,
            Self::SeriesToggle { .. } => EventKind::SeriesToggle,
            Self::DataChange { .. } => EventKind::DataChange,
            Self::Resize { .. } => EventKind::Resize,
        }
    }
}

/// Handle returned by [`EventBus::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

type Handler = Box<dyn FnMut(&ChartEvent)>;

/// Synchronous pub/sub for chart events.
///
/// Handlers run in registration order on the caller's stack.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    handlers: Vec<(ListenerId, EventKind, Handler)>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event kind.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns true if it was registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _, _)| *hid != id);
        self.handlers.len() != before
    }

    /// Deliver an event. Returns the number of handlers invoked.
    pub fn raise(&mut self, event: &ChartEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for (_, k, handler) in &mut self.handlers {
            if *k == kind {
                handler(event);
                delivered += 1;
            }
        }
        tracing::trace!(event = %kind, delivered, "raised chart event");
        delivered
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drop every handler.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}
