use cgmath::{Deg, Matrix4, Point3, Vector3};
use std::f64::consts::TAU;

/// Perspective projection in OpenGL clip-space conventions.
#[derive(Debug, Copy, Clone)]
pub struct Projection {
    pub fovy: Deg<f32>,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: Deg(45.05),
            aspect_ratio: 2.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect_ratio, self.near, self.far)
    }

    /// Zero-sized viewports (minimized windows) keep the previous aspect ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width != 0 && height != 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }
}

/// Camera circling `target` at a fixed height, always looking at it.
#[derive(Debug, Copy, Clone)]
pub struct OrbitCamera {
    /// Radians, kept in `[0, 2π)`.
    pub angle: f64,
    /// Radians added per `advance`.
    pub step: f64,
    pub radius: f32,
    pub height: f32,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            step: 0.02,
            radius: 1.0,
            height: 1.0,
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Point3<f32> {
        Point3::new(
            self.target.x + self.radius * self.angle.cos() as f32,
            self.target.y + self.height,
            self.target.z + self.radius * self.angle.sin() as f32,
        )
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), self.target, self.up)
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + self.step).rem_euclid(TAU);
    }
}

pub fn model_view_projection(
    projection: &Projection,
    view: &Matrix4<f32>,
    model: &Matrix4<f32>,
) -> Matrix4<f32> {
    projection.matrix() * view * model
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use cgmath::{Rad, SquareMatrix, Transform, Vector4};

    #[test]
    fn projection_scales_by_field_of_view() {
        let projection = Projection::default();
        let m = projection.matrix();

        let f = 1.0 / (Rad::from(Deg(45.05_f32)).0 / 2.0).tan();

        assert_approx_eq!(m.y.y, f, 1e-5);
        assert_approx_eq!(m.x.x, f / 2.0, 1e-5);
        assert_approx_eq!(m.z.w, -1.0);
    }

    #[test]
    fn viewport_updates_aspect_ratio() {
        let mut projection = Projection::default();

        projection.set_viewport(1280, 720);
        assert_approx_eq!(projection.aspect_ratio, 1280.0 / 720.0);

        projection.set_viewport(0, 720);
        assert_approx_eq!(projection.aspect_ratio, 1280.0 / 720.0);
    }

    #[test]
    fn eye_starts_on_positive_x() {
        let camera = OrbitCamera::default();
        let eye = camera.eye();

        assert_approx_eq!(eye.x, 1.0);
        assert_approx_eq!(eye.y, 1.0);
        assert_approx_eq!(eye.z, 0.0);
    }

    #[test]
    fn view_moves_eye_to_origin_and_looks_down_negative_z() {
        let mut camera = OrbitCamera::default();
        for _ in 0..37 {
            camera.advance();
        }

        let view = camera.view();
        let eye = view.transform_point(camera.eye());
        let target = view.transform_point(camera.target);

        assert_approx_eq!(eye.x, 0.0, 1e-5);
        assert_approx_eq!(eye.y, 0.0, 1e-5);
        assert_approx_eq!(eye.z, 0.0, 1e-5);

        assert_approx_eq!(target.x, 0.0, 1e-5);
        assert_approx_eq!(target.y, 0.0, 1e-5);
        assert_approx_eq!(target.z, -(2.0_f32.sqrt()), 1e-5);
    }

    #[test]
    fn advance_wraps_angle() {
        let mut camera = OrbitCamera {
            step: 1.0,
            ..Default::default()
        };

        for _ in 0..10 {
            camera.advance();
            assert!((0.0..TAU).contains(&camera.angle));
        }

        assert_approx_eq!(camera.angle, 10.0 - TAU);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = OrbitCamera {
            angle: 1.3,
            ..Default::default()
        };
        let mvp = model_view_projection(&Projection::default(), &camera.view(), &Matrix4::identity());

        let clip = mvp * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert!(clip.w > 0.0);
        assert_approx_eq!(clip.x / clip.w, 0.0, 1e-5);
        assert_approx_eq!(clip.y / clip.w, 0.0, 1e-5);
        assert!((-1.0..=1.0).contains(&(clip.z / clip.w)));
    }

    #[test]
    fn model_is_applied_first() {
        let projection = Projection::default();
        let view = OrbitCamera::default().view();
        let model = Matrix4::from_translation(Vector3::new(0.5, 0.0, 0.0));

        let a = model_view_projection(&projection, &view, &model) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let b = model_view_projection(&projection, &view, &Matrix4::identity())
            * Vector4::new(0.5, 0.0, 0.0, 1.0);

        assert_approx_eq!(a.x, b.x, 1e-5);
        assert_approx_eq!(a.y, b.y, 1e-5);
        assert_approx_eq!(a.w, b.w, 1e-5);
    }
}
