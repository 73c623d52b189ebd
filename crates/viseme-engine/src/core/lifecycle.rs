//! Render-surface lifecycle: at most one surface, torn down at most once.

use thiserror::Error;

/// Why a surface could not be attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no document available")]
    NoDocument,
    #[error("container '{0}' not found")]
    ContainerNotFound(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Platform side of the lifecycle: creates and removes drawing surfaces.
pub trait SurfaceHost {
    type Handle;

    /// Create a surface of the given logical size and attach it.
    fn attach(&mut self, width: u32, height: u32) -> Result<Self::Handle, SurfaceError>;

    /// Remove a surface. Must tolerate a surface that is already gone.
    fn detach(&mut self, handle: &Self::Handle);

    /// Whether the surface is still attached to its container.
    fn contains(&self, handle: &Self::Handle) -> bool;
}

/// Owns the single surface attached through a host.
pub struct RenderSurface<H: SurfaceHost> {
    host: H,
    width: u32,
    height: u32,
    handle: Option<H::Handle>,
}

impl<H: SurfaceHost> RenderSurface<H> {
    pub fn new(host: H, width: u32, height: u32) -> Self {
        Self {
            host,
            width,
            height,
            handle: None,
        }
    }

    /// Attach the surface. A second mount returns the existing surface
    /// instead of creating a duplicate.
    pub fn mount(&mut self) -> Result<&H::Handle, SurfaceError> {
        let handle = match self.handle.take() {
            Some(existing) => {
                log::debug!("render surface already mounted");
                existing
            }
            None => {
                let handle = self.host.attach(self.width, self.height)?;
                log::info!("render surface mounted ({}x{})", self.width, self.height);
                handle
            }
        };
        Ok(&*self.handle.insert(handle))
    }

    /// Detach the surface if present. Safe to call any number of times.
    pub fn teardown(&mut self) {
        match self.handle.take() {
            Some(handle) => {
                if self.host.contains(&handle) {
                    self.host.detach(&handle);
                } else {
                    log::warn!("render surface already removed from its container");
                }
                log::info!("render surface torn down");
            }
            None => log::debug!("teardown with no surface mounted"),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&H::Handle> {
        self.handle.as_ref()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
