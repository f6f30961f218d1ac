use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3, Zero};

use crate::math::{cos_deg, sin_deg, wrap_degrees};

const PITCH_LIMIT: f32 = 89.9999;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSettings {
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            mouse_sensitivity: 0.1,
        }
    }
}

/// First person camera. Angles are in degrees, yaw 0 looks down +X.
#[derive(Debug, Clone)]
pub struct Camera {
    pub pos: Vector3<f32>,

    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
    pub forward: Vector3<f32>,

    pub world_up: Vector3<f32>,

    pub yaw: f32,
    pub pitch: f32,

    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
}

impl Camera {
    pub fn new(
        pos: Vector3<f32>,
        world_up: Vector3<f32>,
        yaw: f32,
        pitch: f32,
        speed: f32,
        sensitivity: f32,
    ) -> Self {
        let mut camera = Self {
            pos,
            up: Vector3::zero(),
            right: Vector3::zero(),
            forward: Vector3::zero(),
            world_up,
            yaw,
            pitch,
            movement_speed: speed,
            mouse_sensitivity: sensitivity,
            zoom: 0.0,
        };

        camera.update_vectors();
        camera
    }

    pub fn with_settings(
        pos: Vector3<f32>,
        world_up: Vector3<f32>,
        yaw: f32,
        pitch: f32,
        settings: CameraSettings,
    ) -> Self {
        Self::new(
            pos,
            world_up,
            yaw,
            pitch,
            settings.movement_speed,
            settings.mouse_sensitivity,
        )
    }

    fn update_vectors(&mut self) {
        let forward = Vector3::new(
            cos_deg(self.yaw) * cos_deg(self.pitch),
            sin_deg(self.pitch),
            sin_deg(self.yaw) * cos_deg(self.pitch),
        );

        self.forward = forward.normalize();
        self.right = self.forward.cross(self.world_up).normalize();
        self.up = self.right.cross(self.forward).normalize();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.pos);

        Matrix4::look_at_rh(eye, eye + self.forward, self.up)
    }

    pub fn update(&mut self, dirs: MovementDirs, delta_time: f32, mouse_dx: f32, mouse_dy: f32) {
        let magnitude = self.movement_speed * delta_time;

        // walk on the horizontal plane regardless of pitch
        let mut forward_movement = Vector3::new(self.forward.x, 0.0, self.forward.z);
        if forward_movement.magnitude() > 0.0 {
            forward_movement = forward_movement.normalize();
        }

        self.pos += forward_movement * magnitude * dirs.forward as f32;
        self.pos += self.right * magnitude * dirs.right as f32;
        self.pos += self.world_up * magnitude * dirs.up as f32;

        self.yaw = wrap_degrees(self.yaw + mouse_dx * self.mouse_sensitivity);

        self.pitch += mouse_dy * self.mouse_sensitivity;
        if self.pitch >= 90.0 {
            self.pitch = PITCH_LIMIT;
        } else if self.pitch <= -90.0 {
            self.pitch = -PITCH_LIMIT;
        }

        self.update_vectors();
    }
}

/// Per-axis movement intent, each component in `-1..=1`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MovementDirs {
    pub forward: i32,
    pub right: i32,
    pub up: i32,
}

impl MovementDirs {
    pub fn new(
        forward: bool,
        back: bool,
        right: bool,
        left: bool,
        up: bool,
        down: bool,
    ) -> Self {
        Self {
            forward: forward as i32 - back as i32,
            right: right as i32 - left as i32,
            up: up as i32 - down as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    fn assert_vec_eq(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-4, "{a:?} != {b:?}");
    }

    fn camera() -> Camera {
        Camera::new(
            Vector3::zero(),
            Vector3::unit_y(),
            -90.0,
            0.0,
            2.0,
            0.5,
        )
    }

    #[test]
    fn initial_basis() {
        let cam = camera();

        assert_vec_eq(cam.forward, Vector3::new(0.0, 0.0, -1.0));
        assert_vec_eq(cam.right, Vector3::new(1.0, 0.0, 0.0));
        assert_vec_eq(cam.up, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn view_matrix_at_origin_is_identity() {
        let cam = camera();
        let view: [[f32; 4]; 4] = cam.view_matrix().into();
        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();

        for (c, e) in view.iter().flatten().zip(identity.iter().flatten()) {
            assert!((c - e).abs() < 1e-5);
        }
    }

    #[test]
    fn moves_along_axes() {
        let mut cam = camera();
        cam.update(MovementDirs::new(true, false, false, false, false, false), 0.5, 0.0, 0.0);
        assert_vec_eq(cam.pos, Vector3::new(0.0, 0.0, -1.0));

        cam.update(MovementDirs::new(false, false, false, true, false, false), 1.0, 0.0, 0.0);
        assert_vec_eq(cam.pos, Vector3::new(-2.0, 0.0, -1.0));

        cam.update(MovementDirs::new(false, false, false, false, true, false), 1.0, 0.0, 0.0);
        assert_vec_eq(cam.pos, Vector3::new(-2.0, 2.0, -1.0));
    }

    #[test]
    fn forward_ignores_pitch() {
        let mut cam = camera();
        cam.update(MovementDirs::default(), 0.0, 0.0, 120.0);
        assert_eq!(cam.pitch, 60.0);

        cam.update(MovementDirs::new(true, false, false, false, false, false), 1.0, 0.0, 0.0);

        assert_vec_eq(cam.pos, Vector3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn yaw_wraps() {
        let mut cam = camera();
        cam.yaw = 0.0;
        cam.update(MovementDirs::default(), 0.0, -20.0, 0.0);
        assert_eq!(cam.yaw, 350.0);

        cam.update(MovementDirs::default(), 0.0, 40.0, 0.0);
        assert!((cam.yaw - 10.0).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = camera();
        cam.update(MovementDirs::default(), 0.0, 0.0, 1000.0);
        assert_eq!(cam.pitch, 89.9999);

        cam.update(MovementDirs::default(), 0.0, 0.0, -1000.0);
        assert_eq!(cam.pitch, -89.9999);
        assert!(cam.up.magnitude() > 0.99);
    }

    #[test]
    fn mouse_sensitivity_scales_look() {
        let mut cam = camera();
        cam.update(MovementDirs::default(), 0.0, 10.0, 4.0);

        assert_eq!(cam.yaw, 275.0);
        assert_eq!(cam.pitch, 2.0);
    }

    #[test]
    fn movement_dirs_cancel() {
        assert_eq!(
            MovementDirs::new(true, true, true, false, false, true),
            MovementDirs {
                forward: 0,
                right: 1,
                up: -1
            }
        );
    }
}
