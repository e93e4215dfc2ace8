//! Reusable render surface pool
//!
//! Keeps up to `max_idle` reset surfaces around so repeated renders reuse
//! their allocations. Surfaces are handed out behind an RAII guard that resets
//! them and puts them back on drop; surfaces returned to a full pool are
//! discarded.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use crate::chunked::{AppendError, RenderTarget};
use crate::config::RenderConfig;

/// A surface that can be wiped and handed out again
pub trait Reusable {
    /// Return to the freshly-created state
    fn reset(&mut self);
}

/// Bounded pool of idle surfaces
#[derive(Debug)]
pub struct SurfacePool<T> {
    max_idle: usize,
    available: Mutex<VecDeque<T>>,
    in_use_count: AtomicUsize,
}

impl<T: Reusable> SurfacePool<T> {
    pub fn new(max_idle: usize) -> Arc<Self> {
        Arc::new(Self {
            max_idle,
            available: Mutex::new(VecDeque::with_capacity(max_idle)),
            in_use_count: AtomicUsize::new(0),
        })
    }

    pub fn from_config(config: &RenderConfig) -> Arc<Self> {
        Self::new(config.surface_pool_size())
    }

    /// Take an idle surface, or build one with `factory` if none is idle.
    ///
    /// Never blocks on capacity: the bound only limits how many idle surfaces
    /// are kept.
    pub fn acquire(self: &Arc<Self>, factory: impl FnOnce() -> T) -> PooledSurface<T> {
        let reused = self.available.lock().pop_front();
        let surface = match reused {
            Some(surface) => surface,
            None => {
                debug!("Surface pool empty, creating a new surface");
                factory()
            }
        };
        self.in_use_count.fetch_add(1, Ordering::Relaxed);

        PooledSurface {
            surface: Some(surface),
            pool: Arc::clone(self),
        }
    }

    /// Idle surfaces ready for reuse
    pub fn available(&self) -> usize {
        self.available.lock().len()
    }

    /// Surfaces currently checked out
    pub fn in_use(&self) -> usize {
        self.in_use_count.load(Ordering::Relaxed)
    }

    fn release(&self, mut surface: T) {
        self.in_use_count.fetch_sub(1, Ordering::Relaxed);
        surface.reset();

        let mut available = self.available.lock();
        if available.len() < self.max_idle {
            available.push_back(surface);
        } else {
            debug!("Surface pool full ({}), discarding surface", self.max_idle);
        }
    }
}

/// RAII guard that resets the surface and returns it to the pool on drop
pub struct PooledSurface<T: Reusable> {
    /// `None` only once `drop` has run
    surface: Option<T>,
    pool: Arc<SurfacePool<T>>,
}

impl<T: Reusable> Deref for PooledSurface<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.surface.as_ref().expect("surface should be present")
    }
}

impl<T: Reusable> DerefMut for PooledSurface<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.surface.as_mut().expect("surface should be present")
    }
}

impl<T: Reusable> Drop for PooledSurface<T> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.pool.release(surface);
        }
    }
}

/// A pooled surface can be rendered into directly; dropping the last owner of
/// the target hands the surface back.
impl<T> RenderTarget for PooledSurface<T>
where
    T: RenderTarget + Reusable + Send,
{
    fn append(&mut self, html: &str) -> Result<(), AppendError> {
        (**self).append(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunked::HtmlBuffer;

    #[test]
    fn test_surface_is_reset_and_reused() {
        let pool = SurfacePool::new(2);

        {
            let mut surface = pool.acquire(HtmlBuffer::new);
            surface.append("<p>x</p>").unwrap();
            assert_eq!(pool.in_use(), 1);
        }
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.available(), 1);

        let surface = pool.acquire(|| panic!("idle surface should be reused"));
        assert_eq!(surface.as_str(), "");
        assert_eq!(surface.appends(), 0);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_surplus_surfaces_are_discarded() {
        let pool = SurfacePool::new(1);

        let a = pool.acquire(HtmlBuffer::new);
        let b = pool.acquire(HtmlBuffer::new);
        assert_eq!(pool.in_use(), 2);

        drop(a);
        drop(b);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_released_surface_is_dropped_when_pool_is_full() {
        struct Counted(Arc<AtomicUsize>);

        impl Reusable for Counted {
            fn reset(&mut self) {}
        }

        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let dropped = Arc::new(AtomicUsize::new(0));
        let pool = SurfacePool::new(1);

        let a = pool.acquire(|| Counted(Arc::clone(&dropped)));
        let b = pool.acquire(|| Counted(Arc::clone(&dropped)));
        drop(a);
        assert_eq!(dropped.load(Ordering::SeqCst), 0);
        drop(b);
        assert_eq!(dropped.load(Ordering::SeqCst), 1);

        drop(pool);
        assert_eq!(dropped.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_config_uses_pool_size() {
        let config = RenderConfig::builder().surface_pool_size(1).build().unwrap();
        let pool = SurfacePool::<HtmlBuffer>::from_config(&config);

        drop(pool.acquire(HtmlBuffer::new));
        drop(pool.acquire(HtmlBuffer::new));
        assert_eq!(pool.available(), 1);
    }
}
