use crate::telemetry::PanelSnapshot;
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lock-free single-writer buffer. The writer rotates through three slots and
/// publishes the index with Release ordering; readers always see a complete
/// value, never a torn one.
struct TripleBuffer<T: Copy + Default> {
    slots: [UnsafeCell<T>; 3],
    index: AtomicUsize,
}

unsafe impl<T: Copy + Default + Send> Send for TripleBuffer<T> {}
unsafe impl<T: Copy + Default + Sync> Sync for TripleBuffer<T> {}

impl<T: Copy + Default> TripleBuffer<T> {
    fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| UnsafeCell::new(T::default())),
            index: AtomicUsize::new(0),
        }
    }

    fn write(&self, value: T) {
        let current = self.index.load(Ordering::Relaxed);
        let next = (current + 1) % 3;
        unsafe {
            *self.slots[next].get() = value;
        }
        self.index.store(next, Ordering::Release);
    }

    fn read(&self) -> T {
        let idx = self.index.load(Ordering::Acquire);
        unsafe { *self.slots[idx].get() }
    }
}

/// Hand-off point between the panel loop and its observers.
///
/// The UI (or headless) loop publishes a snapshot every tick; the metrics
/// updater thread reads the latest one at its own cadence. Neither side
/// blocks the other.
pub struct SnapshotExchange {
    latest: TripleBuffer<PanelSnapshot>,
}

impl SnapshotExchange {
    pub fn new() -> Self {
        Self {
            latest: TripleBuffer::new(),
        }
    }

    /// Called by the panel loop every tick (non-blocking).
    pub fn publish(&self, snapshot: PanelSnapshot) {
        self.latest.write(snapshot);
    }

    /// Called by observers; returns the most recent published frame.
    pub fn read(&self) -> PanelSnapshot {
        self.latest.read()
    }
}

impl Default for SnapshotExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::TurbineState;

    #[test]
    fn read_returns_latest_published_frame() {
        let exchange = SnapshotExchange::new();
        assert_eq!(exchange.read().timestamp_us, 0);

        for i in 1..=5u64 {
            exchange.publish(PanelSnapshot {
                timestamp_us: i,
                state: TurbineState::Running,
                yaw_deg: 111,
                ..Default::default()
            });
        }

        let snap = exchange.read();
        assert_eq!(snap.timestamp_us, 5);
        assert_eq!(snap.state, TurbineState::Running);
        assert_eq!(snap.yaw_deg, 111);
    }
}
