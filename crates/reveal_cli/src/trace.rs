//! Recorded pointer traces
//!
//! A trace is a JSON document describing a viewport, the magnetic elements
//! on the page and a timestamped list of pointer events:
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 720 },
//!   "elements": [{ "id": 1, "rect": { "x": 100, "y": 100, "width": 200, "height": 80 } }],
//!   "events": [
//!     { "t": 0, "type": "move", "x": 10, "y": 10 },
//!     { "t": 40, "type": "hover_enter", "element": 1 },
//!     { "t": 900, "type": "leave" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use reveal_core::{ElementId, Event, VIEWPORT};
use reveal_paint::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Latest accepted event timestamp (one day)
pub const MAX_TIMESTAMP_MS: f32 = 86_400_000.0;

/// A magnetic element and its layout box
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TraceElement {
    pub id: ElementId,
    pub rect: Rect,
}

/// One recorded pointer event
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    Move { x: f32, y: f32 },
    Leave,
    HoverEnter { element: ElementId },
    HoverMove { element: ElementId, x: f32, y: f32 },
    HoverLeave { element: ElementId },
    Resize { width: f32, height: f32 },
}

impl TraceEvent {
    /// The engine event this record stands for
    pub fn to_event(&self) -> Event {
        match *self {
            TraceEvent::Move { x, y } => Event::pointer_move(VIEWPORT, x, y),
            TraceEvent::Leave => Event::pointer_leave(VIEWPORT),
            TraceEvent::HoverEnter { element } => Event::pointer_enter(element),
            TraceEvent::HoverMove { element, x, y } => Event::pointer_move(element, x, y),
            TraceEvent::HoverLeave { element } => Event::pointer_leave(element),
            TraceEvent::Resize { width, height } => Event::resize(width, height),
        }
    }
}

/// An event with its timestamp in milliseconds from the start of the trace
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimedEvent {
    #[serde(rename = "t")]
    pub time_ms: f32,
    #[serde(flatten)]
    pub event: TraceEvent,
}

/// A complete recorded session
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PointerTrace {
    pub viewport: Size,
    #[serde(default)]
    pub elements: Vec<TraceElement>,
    pub events: Vec<TimedEvent>,
}

impl PointerTrace {
    /// Parse a trace and order its events by time (stable for equal stamps).
    ///
    /// Timestamps must lie within `0..=MAX_TIMESTAMP_MS`.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut trace: PointerTrace = serde_json::from_str(content)?;
        if let Some((index, bad)) = trace
            .events
            .iter()
            .enumerate()
            .find(|(_, e)| !(0.0..=MAX_TIMESTAMP_MS).contains(&e.time_ms))
        {
            anyhow::bail!(
                "event {} has timestamp {}ms, expected 0 to {}ms",
                index,
                bad.time_ms,
                MAX_TIMESTAMP_MS
            );
        }
        trace
            .events
            .sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
        Ok(trace)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Timestamp of the last event
    pub fn duration_ms(&self) -> f32 {
        self.events.last().map_or(0.0, |e| e.time_ms.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_core::EventData;

    const SAMPLE: &str = r#"{
        "viewport": { "width": 800, "height": 600 },
        "elements": [{ "id": 3, "rect": { "x": 10, "y": 20, "width": 30, "height": 40 } }],
        "events": [
            { "t": 50, "type": "hover_move", "element": 3, "x": 25, "y": 40 },
            { "t": 0, "type": "move", "x": 1, "y": 2 },
            { "t": 50, "type": "hover_leave", "element": 3 },
            { "t": 20, "type": "hover_enter", "element": 3 }
        ]
    }"#;

    #[test]
    fn test_parse_and_sort() {
        let trace = PointerTrace::from_json(SAMPLE).unwrap();
        assert_eq!(trace.viewport, Size::new(800.0, 600.0));
        assert_eq!(trace.elements[0].rect, Rect::new(10.0, 20.0, 30.0, 40.0));

        let times: Vec<f32> = trace.events.iter().map(|e| e.time_ms).collect();
        assert_eq!(times, vec![0.0, 20.0, 50.0, 50.0]);
        // equal stamps keep their recorded order
        assert!(matches!(trace.events[2].event, TraceEvent::HoverMove { .. }));
        assert_eq!(trace.duration_ms(), 50.0);
    }

    #[test]
    fn test_event_mapping() {
        let event = TraceEvent::HoverMove { element: 3, x: 1.0, y: 2.0 }.to_event();
        assert_eq!(event.target, 3);
        assert_eq!(event.data, EventData::Pointer { x: 1.0, y: 2.0 });

        assert!(TraceEvent::Leave.to_event().targets_viewport());
        assert_eq!(
            TraceEvent::Resize { width: 10.0, height: 20.0 }.to_event(),
            Event::resize(10.0, 20.0)
        );
    }

    #[test]
    fn test_rejects_out_of_range_timestamps() {
        for t in ["-5", "1e30", "90000000"] {
            let json = format!(
                r#"{{ "viewport": {{ "width": 1, "height": 1 }}, "events": [{{ "t": {t}, "type": "leave" }}] }}"#
            );
            let err = PointerTrace::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("timestamp"), "{t}: {err}");
        }
    }

    #[test]
    fn test_rejects_unknown_event_type() {
        let bad = r#"{ "viewport": { "width": 1, "height": 1 }, "events": [{ "t": 0, "type": "click" }] }"#;
        assert!(PointerTrace::from_json(bad).is_err());
    }
}
