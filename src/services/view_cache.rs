//! In-process cache of rendered list views.

use crate::actions::invoice::ViewCache;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

/// Rendered-view cache keyed by route path. Best-effort: a read racing an
/// invalidation may still observe the previous rendering.
#[derive(Default)]
pub struct InMemoryViewCache {
    views: DashMap<String, String>,
}

impl InMemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewCache for InMemoryViewCache {
    async fn read(&self, path: &str) -> Option<String> {
        self.views.get(path).map(|body| body.clone())
    }

    async fn store(&self, path: &str, body: String) {
        self.views.insert(path.to_string(), body);
    }

    async fn invalidate(&self, path: &str) {
        if self.views.remove(path).is_some() {
            debug!(path = path, "View cache invalidated");
        }
    }
}
