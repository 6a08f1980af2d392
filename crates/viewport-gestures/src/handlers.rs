//! Callback table mapping gesture kinds to handlers.

use crate::gesture::{GestureEvent, GestureKind};
use std::collections::HashMap;
use std::fmt;

/// Callback invoked with each emitted gesture of its kind.
pub type GestureHandler = Box<dyn FnMut(&GestureEvent)>;

/// Handlers by gesture kind, fixed once handed to the recognizer.
#[derive(Default)]
pub struct GestureHandlers {
    handlers: HashMap<GestureKind, GestureHandler>,
}

impl GestureHandlers {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a kind, replacing any previous one.
    #[must_use]
    pub fn on(mut self, kind: GestureKind, handler: impl FnMut(&GestureEvent) + 'static) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Register one handler for several kinds.
    #[must_use]
    pub fn on_each<F>(mut self, kinds: &[GestureKind], handler: F) -> Self
    where
        F: FnMut(&GestureEvent) + Clone + 'static,
    {
        for kind in kinds {
            self.handlers.insert(*kind, Box::new(handler.clone()));
        }
        self
    }

    /// Check if a kind has a handler.
    #[must_use]
    pub fn contains(&self, kind: GestureKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke the handler for the event's kind. Returns false if there is none.
    pub(crate) fn dispatch(&mut self, event: &GestureEvent) -> bool {
        match self.handlers.get_mut(&event.kind) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for GestureHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort();
        f.debug_struct("GestureHandlers")
            .field("kinds", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event(kind: GestureKind) -> GestureEvent {
        GestureEvent::new(kind, Point::ORIGIN, Point::ORIGIN, Size::ZERO)
    }

    #[test]
    fn test_dispatch_calls_matching_handler() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&hits);
        let mut handlers =
            GestureHandlers::new().on(GestureKind::Click, move |e| sink.borrow_mut().push(e.kind));

        assert!(handlers.dispatch(&event(GestureKind::Click)));
        assert!(!handlers.dispatch(&event(GestureKind::DoubleClick)));
        assert_eq!(*hits.borrow(), vec![GestureKind::Click]);
    }

    #[test]
    fn test_on_each_shares_handler() {
        let hits = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&hits);
        let mut handlers = GestureHandlers::new().on_each(
            &[GestureKind::ZoomIn, GestureKind::ZoomOut],
            move |_| *sink.borrow_mut() += 1,
        );

        assert_eq!(handlers.len(), 2);
        handlers.dispatch(&event(GestureKind::ZoomIn));
        handlers.dispatch(&event(GestureKind::ZoomOut));
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_debug_lists_kinds() {
        let handlers = GestureHandlers::new()
            .on(GestureKind::Wheel, |_| {})
            .on(GestureKind::Click, |_| {});
        assert_eq!(
            format!("{handlers:?}"),
            "GestureHandlers { kinds: [Click, Wheel] }"
        );
        assert!(handlers.contains(GestureKind::Click));
        assert!(!GestureHandlers::new().contains(GestureKind::Click));
        assert!(GestureHandlers::new().is_empty());
    }
}
