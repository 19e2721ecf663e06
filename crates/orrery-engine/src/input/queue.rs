/// Input events the scene understands.
/// Deltas arrive already measured by the host (pixels, wheel units).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer dragged by (dx, dy) pixels while held.
    Drag { dx: f32, dy: f32 },
    /// Wheel moved. Positive values zoom in.
    Scroll { delta: f32 },
    /// Canvas resized to width x height pixels.
    Resize { width: f32, height: f32 },
    /// Put the camera back at its starting pose.
    ResetCamera,
}

/// A queue of input events.
/// The host pushes events between ticks; the scene drains them once per tick.
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

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
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
