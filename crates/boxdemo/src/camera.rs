//! Spherical orbit camera and the mouse-drag state machine that steers it.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use boxdemo_engine::core::PointerCapture;
use boxdemo_engine::input::ButtonMask;

pub const INITIAL_THETA: f32 = 1.5 * PI;
pub const INITIAL_PHI: f32 = 0.25 * PI;
pub const INITIAL_RADIUS: f32 = 5.0;

/// Primary-button drag: a quarter degree of rotation per pixel.
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.25 * PI / 180.0;
/// Secondary-button drag: scene units of zoom per pixel.
pub const ZOOM_UNITS_PER_PIXEL: f32 = 0.005;

/// Keeps the eye off the poles, where the up vector degenerates.
pub const PHI_MIN: f32 = 0.1;
pub const PHI_MAX: f32 = PI - 0.1;

pub const RADIUS_MIN: f32 = 3.0;
pub const RADIUS_MAX: f32 = 15.0;

/// Eye position in spherical coordinates around the origin.
///
/// `theta` is the azimuth in the xz-plane and is left unbounded; it only ever
/// feeds `sin`/`cos`. `phi` is measured from +y.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    pub theta: f32,
    pub phi: f32,
    pub radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            theta: INITIAL_THETA,
            phi: INITIAL_PHI,
            radius: INITIAL_RADIUS,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();

        Vec3::new(
            self.radius * sin_phi * cos_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * sin_theta,
        )
    }

    /// Left-handed look-at from [`eye`](Self::eye) toward the origin, +y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    /// Rotates by a pixel delta.
    pub fn orbit(&mut self, dx: i32, dy: i32) {
        self.theta += ORBIT_RADIANS_PER_PIXEL * dx as f32;
        self.phi = (self.phi + ORBIT_RADIANS_PER_PIXEL * dy as f32).clamp(PHI_MIN, PHI_MAX);
    }

    /// Moves the eye along its radius. Dragging right or up zooms out.
    pub fn zoom(&mut self, dx: i32, dy: i32) {
        let dx = ZOOM_UNITS_PER_PIXEL * dx as f32;
        let dy = ZOOM_UNITS_PER_PIXEL * dy as f32;
        self.radius = (self.radius + dx - dy).clamp(RADIUS_MIN, RADIUS_MAX);
    }
}

/// Pointer tracking between mouse events.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub last_x: i32,
    pub last_y: i32,
    pub captured: bool,
}

/// Turns mouse callbacks into camera motion.
#[derive(Debug, Clone, Default)]
pub struct OrbitController {
    pub camera: OrbitCamera,
    pub drag: DragState,
}

impl OrbitController {
    pub fn on_drag_start(&mut self, x: i32, y: i32, capture: &mut dyn PointerCapture) {
        self.drag.last_x = x;
        self.drag.last_y = y;
        self.drag.captured = true;
        capture.acquire();
    }

    pub fn on_drag_end(&mut self, capture: &mut dyn PointerCapture) {
        self.drag.captured = false;
        capture.release();
    }

    /// Primary button orbits, secondary zooms. The last position is updated
    /// whether or not a button is held.
    pub fn on_drag_move(&mut self, buttons: ButtonMask, x: i32, y: i32) {
        let dx = x - self.drag.last_x;
        let dy = y - self.drag.last_y;

        if buttons.primary() {
            self.camera.orbit(dx, dy);
        } else if buttons.secondary() {
            self.camera.zoom(dx, dy);
        }

        self.drag.last_x = x;
        self.drag.last_y = y;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CaptureProbe;

    const EPS: f32 = 1e-5;

    fn controller_at_origin() -> OrbitController {
        let mut c = OrbitController::default();
        c.on_drag_start(0, 0, &mut CaptureProbe::default());
        c
    }

    #[test]
    fn primary_drag_orbits_a_quarter_degree_per_pixel() {
        let mut c = controller_at_origin();
        c.on_drag_move(ButtonMask::LEFT, 40, 0);

        assert!((c.camera.theta - (INITIAL_THETA + 10f32.to_radians())).abs() < EPS);
        assert!((c.camera.theta - INITIAL_THETA - 0.174_533).abs() < EPS);
        assert_eq!(c.camera.phi, INITIAL_PHI);
        assert_eq!(c.camera.radius, INITIAL_RADIUS);
    }

    #[test]
    fn secondary_drag_down_zooms_in() {
        let mut c = controller_at_origin();
        c.on_drag_move(ButtonMask::RIGHT, 0, 100);

        assert!((c.camera.radius - 4.5).abs() < EPS);
        assert_eq!(c.camera.theta, INITIAL_THETA);
    }

    #[test]
    fn primary_wins_when_both_buttons_are_held() {
        let mut c = controller_at_origin();
        let both = ButtonMask { left: true, right: true, middle: false };
        c.on_drag_move(both, 0, 100);

        assert_eq!(c.camera.radius, INITIAL_RADIUS);
        assert_ne!(c.camera.phi, INITIAL_PHI);
    }

    #[test]
    fn move_without_buttons_only_tracks_position() {
        let mut c = controller_at_origin();
        c.on_drag_move(ButtonMask::NONE, 7, 9);

        assert_eq!((c.drag.last_x, c.drag.last_y), (7, 9));
        assert_eq!(c.camera, OrbitCamera::default());

        // The next delta is relative to (7, 9), not to the drag origin.
        c.on_drag_move(ButtonMask::LEFT, 11, 9);
        assert!((c.camera.theta - INITIAL_THETA - 4.0 * ORBIT_RADIANS_PER_PIXEL).abs() < EPS);
    }

    #[test]
    fn phi_and_radius_stay_clamped() {
        let mut c = controller_at_origin();
        // Deterministic walk with large swings in both directions.
        let mut seed: u32 = 0x2545_f491;
        let (mut x, mut y) = (0i32, 0i32);

        for step in 0..2_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            x += (seed >> 16) as i32 % 1_200 - 600;
            y += (seed >> 8) as i32 % 1_200 - 600;

            let buttons = if step % 2 == 0 { ButtonMask::LEFT } else { ButtonMask::RIGHT };
            c.on_drag_move(buttons, x, y);

            assert!((PHI_MIN..=PHI_MAX).contains(&c.camera.phi), "phi {}", c.camera.phi);
            assert!(
                (RADIUS_MIN..=RADIUS_MAX).contains(&c.camera.radius),
                "radius {}",
                c.camera.radius
            );
        }
    }

    #[test]
    fn view_matrix_is_a_pure_function_of_the_camera() {
        let c = OrbitController::default();
        assert_eq!(c.view_matrix(), c.view_matrix());
        assert_eq!(c.view_matrix(), OrbitCamera::default().view_matrix());
    }

    #[test]
    fn view_looks_from_eye_at_origin() {
        let cam = OrbitCamera::default();
        let eye = cam.eye();

        // theta = 1.5 pi puts the eye on the -z side.
        assert!(eye.x.abs() < EPS);
        assert!(eye.z < 0.0);
        assert!((eye.length() - INITIAL_RADIUS).abs() < EPS);

        let view = cam.view_matrix();
        assert!(view.transform_point3(eye).length() < 1e-4);

        let target = view.transform_point3(Vec3::ZERO);
        assert!(target.abs_diff_eq(Vec3::new(0.0, 0.0, INITIAL_RADIUS), 1e-4));
    }

    #[test]
    fn drag_start_and_end_own_the_pointer() {
        let mut c = OrbitController::default();
        let mut probe = CaptureProbe::default();

        c.on_drag_start(3, 4, &mut probe);
        assert!(probe.held);
        assert!(c.drag.captured);
        assert_eq!((c.drag.last_x, c.drag.last_y), (3, 4));

        c.on_drag_end(&mut probe);
        assert!(!probe.held);
        assert!(!c.drag.captured);
        assert_eq!((probe.acquired, probe.released), (1, 1));
    }
}
