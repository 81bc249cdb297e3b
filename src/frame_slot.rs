use std::sync::Arc;

use parking_lot::Mutex;

use crate::landmarks::Frame;

#[derive(Default)]
struct SlotInner {
    latest: Option<(u64, Arc<Frame>)>,
    next_sequence: u64,
    closed: bool,
}

/// Single-slot hand-off between the sensor thread and the engine.
///
/// The producer overwrites; the consumer only ever sees the newest frame.
/// Frames the consumer never got to are dropped, never queued. Each published
/// frame carries a sequence number so the consumer can tell a new frame from
/// one it has already handled.
#[derive(Clone, Default)]
pub struct FrameSlot {
    inner: Arc<Mutex<SlotInner>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is in the slot. Returns the sequence number given to
    /// this frame.
    pub fn publish(&self, frame: Frame) -> u64 {
        let mut inner = self.inner.lock();
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;
        inner.latest = Some((sequence, Arc::new(frame)));
        sequence
    }

    /// The newest frame, if it is newer than `seen` (the sequence number of the
    /// last frame the caller handled)
    pub fn latest_after(&self, seen: Option<u64>) -> Option<(u64, Arc<Frame>)> {
        let inner = self.inner.lock();
        match (&inner.latest, seen) {
            (Some((sequence, _)), Some(seen)) if *sequence <= seen => None,
            (Some((sequence, frame)), _) => Some((*sequence, frame.clone())),
            (None, _) => None,
        }
    }

    /// The producer has stopped; no more frames will be published
    pub fn close(&self) {
        self.inner.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}
