//! Background expiry sweep on a dedicated thread.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pattern_observability::cache_sweep_span;
use tracing::{debug, warn};

use crate::cache::RetrievalCache;

/// Periodically calls [`RetrievalCache::sweep_expired`].
///
/// The thread exits when [`CacheSweeper::stop`] is called or the sweeper is
/// dropped.
pub struct CacheSweeper {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CacheSweeper {
    pub fn spawn<V>(cache: Arc<RetrievalCache<V>>, interval: Duration) -> std::io::Result<Self>
    where
        V: Clone + Send + Sync + 'static,
    {
        let (shutdown, signal) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("pattern-cache-sweeper".to_string())
            .spawn(move || loop {
                match signal.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let _span = cache_sweep_span!(cache.len()).entered();
                        let removed = cache.sweep_expired();
                        if removed > 0 {
                            debug!(removed, "expired cache entries swept");
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        Ok(Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        drop(self.shutdown.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("cache sweeper thread panicked");
            }
        }
    }
}

impl Drop for CacheSweeper {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}
