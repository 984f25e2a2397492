//! Integration tests for carapace-telemetry.

use std::sync::{Arc, Mutex};

use carapace_telemetry::{EventBus, EventKind, EventSink, RunEvent, VecSink};

/// Sink sharing its buffer with the test through an `Arc`.
struct SharedSink {
    events: Arc<Mutex<Vec<RunEvent>>>,
}

impl EventSink for SharedSink {
    fn handle(&mut self, event: &RunEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &str {
        "shared_sink"
    }
}

fn shared_bus() -> (EventBus, Arc<Mutex<Vec<RunEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(SharedSink {
        events: Arc::clone(&events),
    }));
    (bus, events)
}

#[test]
fn emit_and_flush_delivers_to_sink() {
    let (mut bus, events) = shared_bus();

    bus.emit(RunEvent::new(0, EventKind::RigGenerated { camera_count: 16 }));
    bus.emit(RunEvent::new(
        1,
        EventKind::CameraPassEnd {
            camera: 0,
            newly_visible: 4,
            rays_cast: 24,
            samples_rejected: 3,
        },
    ));
    assert_eq!(events.lock().unwrap().len(), 0, "delivery waits for flush");

    bus.flush();
    let delivered = events.lock().unwrap();
    assert_eq!(delivered.len(), 2);
    assert_eq!(delivered[0].stage, 0);
    assert_eq!(delivered[1].stage, 1);
}

#[test]
fn disabled_bus_drops_events() {
    let (mut bus, events) = shared_bus();

    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(RunEvent::new(0, EventKind::RigGenerated { camera_count: 8 }));
    bus.flush();
    assert_eq!(events.lock().unwrap().len(), 0);

    bus.set_enabled(true);
    bus.emit(RunEvent::new(1, EventKind::RigGenerated { camera_count: 8 }));
    bus.flush();
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn flush_drains_the_channel() {
    let (mut bus, events) = shared_bus();
    bus.emit(RunEvent::new(0, EventKind::Custom {
        label: "checkpoint".into(),
        payload: "{}".into(),
    }));
    bus.flush();
    bus.flush(); // second flush has nothing left to deliver
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn vec_sink_buffers_events() {
    let mut sink = VecSink::new();
    sink.handle(&RunEvent::new(0, EventKind::RigGenerated { camera_count: 4 }));
    sink.handle(&RunEvent::new(1, EventKind::RigGenerated { camera_count: 4 }));
    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.name(), "vec_sink");
}

#[test]
fn event_roundtrips_through_serde() {
    let event = RunEvent::new(
        3,
        EventKind::EditApplied {
            faces_before: 12,
            faces_after: 6,
            welded_vertices: 2,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let back: RunEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back.stage, 3);
    match back.kind {
        EventKind::EditApplied { faces_before, faces_after, .. } => {
            assert_eq!(faces_before, 12);
            assert_eq!(faces_after, 6);
        }
        other => panic!("wrong kind: {:?}", other),
    }
}
