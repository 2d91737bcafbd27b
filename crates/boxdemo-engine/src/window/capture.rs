use winit::window::{CursorGrabMode, Window};

use crate::core::PointerCapture;

/// [`PointerCapture`] over winit cursor grabbing.
///
/// Not every platform supports confining the cursor; a refused grab is
/// logged and the drag carries on with whatever motion the platform delivers.
pub struct WindowCapture<'a> {
    window: &'a Window,
}

impl<'a> WindowCapture<'a> {
    pub fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl PointerCapture for WindowCapture<'_> {
    fn acquire(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::Confined) {
            log::debug!("pointer capture unavailable: {e}");
        }
    }

    fn release(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::debug!("pointer release failed: {e}");
        }
    }
}
