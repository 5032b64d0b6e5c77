//! Layer - A single compositable layer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::LayerId;

/// A single layer in the compositor
pub struct Layer {
    /// Unique identifier
    pub id: LayerId,
    /// Z-order (higher = in front)
    pub z_index: i32,
    /// Screen position and size
    pub bounds: Rect,
    /// Whether the layer is composited
    pub visible: bool,
    /// The layer's render buffer, origin at (0, 0)
    pub buffer: Buffer,
}

impl Layer {
    /// Create a new, visible layer
    pub fn new(id: LayerId, bounds: Rect, z_index: i32) -> Self {
        Self {
            id,
            z_index,
            bounds,
            visible: true,
            buffer: Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height)),
        }
    }

    /// Move and resize; the buffer is reallocated only when the size changes
    pub fn place(&mut self, bounds: Rect) {
        if (bounds.width, bounds.height) != (self.bounds.width, self.bounds.height) {
            self.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
        }
        self.bounds = bounds;
    }
}
