use std::sync::atomic::{AtomicU64, Ordering};

/// Per the ambiguous-id design note: a process-local monotonic counter plus
/// a short random suffix, never parsed back. Prefer this over a bare
/// timestamp, which can collide under concurrent analyses.
pub struct IdGenerator {
    counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self, prefix: &str) -> String {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{prefix}-{sequence}-{}", &suffix[..8])
    }
}
