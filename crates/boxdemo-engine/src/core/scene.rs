use crate::gfx::GraphicsDevice;
use crate::input::ButtonMask;
use crate::shader::ShaderCompiler;

use super::{FrameError, InitError, PointerCapture};

/// A scene driven by the runtime.
///
/// The runtime calls, in order: [`init`](Self::init) once, then per frame
/// [`update`](Self::update) followed by [`draw`](Self::draw), with
/// [`resize`](Self::resize) and the mouse callbacks interleaved as events
/// arrive. All calls come from the event-loop thread.
///
/// Pointer coordinates are physical client-area pixels and may lie outside
/// the client area while the pointer is captured.
pub trait Scene<D: GraphicsDevice>: Sized {
    /// Creates every GPU resource the scene needs.
    ///
    /// A failure leaves nothing behind: resources created before the failing
    /// one are dropped with the partially built scene.
    fn init(
        device: &mut D,
        compiler: &dyn ShaderCompiler,
        aspect_ratio: f32,
    ) -> Result<Self, InitError>;

    /// Client area changed; `aspect_ratio` is width over height.
    fn resize(&mut self, aspect_ratio: f32);

    fn update(&mut self, dt: f32);

    /// Records and presents one frame.
    fn draw(&mut self, device: &mut D) -> Result<(), FrameError>;

    fn on_mouse_down(&mut self, buttons: ButtonMask, x: i32, y: i32, capture: &mut dyn PointerCapture) {
        let _ = (buttons, x, y, capture);
    }

    fn on_mouse_up(&mut self, buttons: ButtonMask, x: i32, y: i32, capture: &mut dyn PointerCapture) {
        let _ = (buttons, x, y, capture);
    }

    fn on_mouse_move(&mut self, buttons: ButtonMask, x: i32, y: i32) {
        let _ = (buttons, x, y);
    }
}
