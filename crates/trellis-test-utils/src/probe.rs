use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

/// Ordered record of calls, shareable with callbacks.
///
/// Clones append to the same log.
#[derive(Debug, Clone)]
pub struct CallLog<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> CallLog<T> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, call: T) {
        self.calls.lock().push(call);
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

impl<T: Clone> CallLog<T> {
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }
}

impl<T> Default for CallLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A value that counts its own drops across clones.
///
/// Embed one in a widget to check that a container releases each child
/// exactly once.
#[derive(Debug)]
pub struct DropProbe {
    drops: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
}

impl DropProbe {
    pub fn new() -> Self {
        Self {
            drops: Arc::new(AtomicUsize::new(0)),
            live: Arc::new(AtomicUsize::new(1)),
        }
    }

    /// Drops seen so far by this probe and all its clones.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    /// Probes of this family still alive, this one included.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// A handle that observes the counters without counting as a probe.
    pub fn observer(&self) -> DropObserver {
        DropObserver {
            drops: self.drops.clone(),
            live: self.live.clone(),
        }
    }
}

impl Default for DropProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DropProbe {
    fn clone(&self) -> Self {
        self.live.fetch_add(1, Ordering::SeqCst);
        Self {
            drops: self.drops.clone(),
            live: self.live.clone(),
        }
    }
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Read-only view of a [`DropProbe`] family's counters.
#[derive(Debug, Clone)]
pub struct DropObserver {
    drops: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
}

impl DropObserver {
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}
