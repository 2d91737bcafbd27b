/// Exclusive pointer ownership for the duration of a drag.
///
/// While captured, pointer motion keeps reaching the window even after the
/// cursor leaves its client area.
pub trait PointerCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}
