//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Stopping the frame loop
//! - Finding and keeping a drawing surface
//! - The canvas drawing surface (web only)

use std::cell::Cell;
use std::rc::Rc;

use crate::error::SurfaceError;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

/// Shared stop flag for the frame loop
///
/// Clones observe the same flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Drawing surface that is looked up until found, then kept
#[derive(Debug)]
pub struct SurfaceSlot<S> {
    surface: Option<S>,
}

impl<S> Default for SurfaceSlot<S> {
    fn default() -> Self {
        Self { surface: None }
    }
}

impl<S> SurfaceSlot<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached surface, or a fresh lookup while there is none yet
    pub fn get_or_lookup<F>(&mut self, lookup: F) -> Option<&mut S>
    where
        F: FnOnce() -> Result<S, SurfaceError>,
    {
        if self.surface.is_none() {
            match lookup() {
                Ok(surface) => {
                    log::info!("Drawing surface found");
                    self.surface = Some(surface);
                }
                Err(e) => log::trace!("{}", e),
            }
        }
        self.surface.as_mut()
    }
}
