use glam::Vec2;

/// Input event types the stage understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began on the render surface at surface pixel `(x, y)`.
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to surface pixel `(x, y)`.
    PointerMove { x: f32, y: f32 },
    /// A press ended anywhere on the page, not just over the surface.
    PointerUp { x: f32, y: f32 },
}

impl InputEvent {
    /// Pointer position carried by the event.
    pub fn pointer(&self) -> Vec2 {
        match *self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y } => Vec2::new(x, y),
        }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 12.0, y: 20.0 });
        q.push(InputEvent::PointerUp { x: 12.0, y: 20.0 });
        assert_eq!(q.len(), 3);

        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[2].pointer(), Vec2::new(12.0, 20.0));
        assert!(q.is_empty());
    }

    #[test]
    fn drain_empty_queue() {
        let mut q = InputQueue::default();
        assert!(q.drain().is_empty());
        q.push(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        assert_eq!(q.iter().count(), 1);
    }
}
