//! Layered Compositor
//!
//! Manages z-ordered layers for rendering. Each stage draws into its own
//! layers; switching stage is a matter of toggling visibility.
//!
//! Untouched cells are transparent: a blank cell with no background lets
//! the layer below show through. Anything drawn (including a styled space)
//! occludes.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::Color;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layer IDs sorted back to front
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.insert(id, Layer::new(id, bounds, z_index));
        self.update_render_order();

        id
    }

    /// Cleared buffer of a layer, ready to draw into
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| {
            l.buffer.reset();
            &mut l.buffer
        })
    }

    /// Move and resize a layer
    pub fn place_layer(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.place(bounds);
        }
    }

    /// Screen bounds of a layer
    pub fn layer_bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(&id).map(|l| l.bounds)
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Whether a layer is composited
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layers.get(&id).is_some_and(|l| l.visible)
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, layer);
                }
            }
        }

        &self.output
    }

    /// Copy a layer's opaque cells onto the output buffer
    fn blit_layer(output: &mut Buffer, layer: &Layer) {
        let area = output.area;
        let bounds = layer.bounds;

        for ly in 0..bounds.height {
            for lx in 0..bounds.width {
                let (dst_x, dst_y) = (bounds.x + lx, bounds.y + ly);
                if dst_x >= area.right() || dst_y >= area.bottom() {
                    continue;
                }
                let Some(src) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };
                if is_transparent(src) {
                    continue;
                }
                if let Some(dst) = output.cell_mut((dst_x, dst_y)) {
                    *dst = src.clone();
                }
            }
        }
    }

    /// Update render order based on z-indices
    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order.sort_by_key(|id| {
            let z = self.layers.get(id).map_or(0, |l| l.z_index);
            (z, id.0)
        });
    }
}

fn is_transparent(cell: &Cell) -> bool {
    cell.symbol() == " " && cell.bg == Color::Reset
}
