//! The observed surface whose size drag ratios are measured against.

use crate::geometry::Size;
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current surface dimensions.
///
/// Queried right before every emission, so a resize between two gestures is
/// picked up without any resize notification.
pub trait Surface {
    /// Current size, or `None` when the surface is unavailable.
    fn dimensions(&self) -> Option<Size>;
}

impl Surface for Size {
    fn dimensions(&self) -> Option<Size> {
        Some(*self)
    }
}

impl<S: Surface + ?Sized> Surface for &S {
    fn dimensions(&self) -> Option<Size> {
        (**self).dimensions()
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn dimensions(&self) -> Option<Size> {
        (**self).dimensions()
    }
}

/// Shared, resizable surface.
///
/// Clones share one cell: the host keeps a clone and calls
/// [`resize`](Self::resize) from its layout code while the recognizer owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct SurfaceHandle {
    size: Rc<Cell<Option<Size>>>,
}

impl SurfaceHandle {
    /// Create a handle for a surface of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size: Rc::new(Cell::new(Some(size))),
        }
    }

    /// Create a handle for a surface that is not available yet.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Update the size.
    pub fn resize(&self, size: Size) {
        self.size.set(Some(size));
    }

    /// Mark the surface as gone.
    pub fn detach(&self) {
        self.size.set(None);
    }

    /// Current size, `None` if detached.
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        self.size.get()
    }
}

impl Surface for SurfaceHandle {
    fn dimensions(&self) -> Option<Size> {
        self.size.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_size_surface() {
        let size = Size::new(640.0, 360.0);
        assert_eq!(size.dimensions(), Some(size));
    }

    #[test]
    fn test_handle_clones_share_size() {
        let host = SurfaceHandle::new(Size::new(100.0, 50.0));
        let owned = host.clone();
        host.resize(Size::new(200.0, 100.0));
        assert_eq!(owned.dimensions(), Some(Size::new(200.0, 100.0)));
    }

    #[test]
    fn test_handle_detach() {
        let handle = SurfaceHandle::new(Size::new(100.0, 50.0));
        handle.detach();
        assert_eq!(handle.dimensions(), None);
        assert_eq!(SurfaceHandle::detached().size(), None);
    }

    #[test]
    fn test_boxed_surface() {
        let boxed: Box<dyn Surface> = Box::new(Size::new(1.0, 2.0));
        assert_eq!(boxed.dimensions(), Some(Size::new(1.0, 2.0)));
    }
}
