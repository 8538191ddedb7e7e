use eframe::glow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Viewport covering the whole framebuffer.
    pub fn from_framebuffer(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width.min(i32::MAX as u32) as i32,
            height: height.min(i32::MAX as u32) as i32,
        }
    }

    pub fn apply(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.viewport(self.x, self.y, self.width, self.height);
        }
    }
}

/// Keeps the GL viewport equal to the framebuffer size.
#[derive(Debug, Clone, Default)]
pub struct ResizeTracker {
    current: Option<Viewport>,
}

impl ResizeTracker {
    /// Returns the viewport for a framebuffer of `width` x `height`, plus whether it differs
    /// from the one seen last frame.
    pub fn on_framebuffer_size(&mut self, width: u32, height: u32) -> (Viewport, bool) {
        let viewport = Viewport::from_framebuffer(width, height);
        let changed = self.current != Some(viewport);
        if changed {
            log::debug!("Framebuffer resized to {width}x{height}");
            self.current = Some(viewport);
        }
        (viewport, changed)
    }

    #[allow(dead_code)]
    pub fn current(&self) -> Option<Viewport> {
        self.current
    }
}
