use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Operational counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub tags_created: Arc<AtomicUsize>,
    pub tag_conflicts: Arc<AtomicUsize>,
    pub images_attached: Arc<AtomicUsize>,
    pub uploads_rejected: Arc<AtomicUsize>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            tags_created: Arc::new(AtomicUsize::new(0)),
            tag_conflicts: Arc::new(AtomicUsize::new(0)),
            images_attached: Arc::new(AtomicUsize::new(0)),
            uploads_rejected: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_tags_created(&self) {
        self.tags_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tag_conflicts(&self) {
        self.tag_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_images_attached(&self) {
        self.images_attached.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_uploads_rejected(&self) {
        self.uploads_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tags_created: self.tags_created.load(Ordering::Relaxed),
            tag_conflicts: self.tag_conflicts.load(Ordering::Relaxed),
            images_attached: self.images_attached.load(Ordering::Relaxed),
            uploads_rejected: self.uploads_rejected.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub tags_created: usize,
    pub tag_conflicts: usize,
    pub images_attached: usize,
    pub uploads_rejected: usize,
    pub uptime_seconds: u64,
}
