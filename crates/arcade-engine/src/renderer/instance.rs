use bytemuck::{Pod, Zeroable};

/// Per-instance render data read by the host through a raw pointer.
/// 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Center X in world space.
    pub x: f32,
    /// Center Y in world space.
    pub y: f32,
    /// Rendered width in world units.
    pub width: f32,
    /// Rendered height in world units.
    pub height: f32,
    pub atlas: f32,
    /// Frame column in the atlas.
    pub col: f32,
    /// Frame row in the atlas.
    pub row: f32,
    pub alpha: f32,
    pub tint_r: f32,
    pub tint_g: f32,
    pub tint_b: f32,
    pub _pad: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Instances for one frame, in draw order.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Buffer that silently drops instances beyond `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        if self.instances.len() < self.capacity {
            self.instances.push(instance);
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
