use std::f32::consts::PI;
use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Vertical field of view in radians.
pub const FOV_Y: f32 = PI * 0.45;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 20.0;

/// Camera position; it looks at the origin with +Y up.
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, -2.0);

/// Rotation applied per rendered frame, in radians.
///
/// Animation speed therefore depends on the display refresh rate.
pub const ROTATION_STEP: f32 = PI * 0.005;

/// CPU-side transform state.
///
/// Matrices use glam's column-vector convention with column-major storage,
/// which is the transpose of the row-vector form. That is the layout WGSL
/// reads for `M * v`.
///
/// View and projection are computed once in [`TransformState::new`]; only the
/// world matrix changes.
#[derive(Debug, Clone)]
pub struct TransformState {
    world: Mat4,
    view: Mat4,
    projection: Mat4,
    /// `frames × ROTATION_STEP`, wrapped to `[0, 2π)`.
    angle: f64,
    frames: u64,
}

impl TransformState {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            world: Mat4::IDENTITY,
            view: Mat4::look_at_lh(EYE, Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_lh(FOV_Y, aspect_ratio, NEAR_PLANE, FAR_PLANE),
            angle: 0.0,
            frames: 0,
        }
    }

    /// Advances the rotation by one frame step and rebuilds the world matrix.
    ///
    /// The angle is recomputed from the frame count so it does not drift.
    pub fn advance(&mut self) {
        self.frames += 1;
        self.angle = (self.frames as f64 * f64::from(ROTATION_STEP)).rem_euclid(TAU);
        self.world = Mat4::from_rotation_y(self.angle as f32);
    }

    /// Accumulated rotation in radians, in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle as f32
    }

    /// Number of advances applied so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Snapshot in the uniform buffer layout.
    pub fn uniform(&self) -> TransformUniform {
        TransformUniform {
            world: self.world.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
        }
    }
}

/// GPU layout of the transform uniform: world, view, projection.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformUniform {
    pub const SIZE: wgpu::BufferAddress =
        std::mem::size_of::<TransformUniform>() as wgpu::BufferAddress;

    const BINDING_SIZE: wgpu::BufferSize = match wgpu::BufferSize::new(Self::SIZE) {
        Some(size) => size,
        None => panic!("TransformUniform must not be empty"),
    };

    pub fn min_binding_size() -> wgpu::BufferSize {
        Self::BINDING_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    fn angle_distance(a: f32, b: f32) -> f32 {
        let d = (a - b).abs();
        d.min(TAU as f32 - d)
    }

    /// Row-vector perspective matrix, rows top to bottom. Read back as
    /// columns this is the column-vector matrix glam builds.
    fn row_vector_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
        let h = 1.0 / (fov_y * 0.5).tan();
        let w = h / aspect;
        let r = far / (far - near);
        [
            [w, 0.0, 0.0, 0.0],
            [0.0, h, 0.0, 0.0],
            [0.0, 0.0, r, 1.0],
            [0.0, 0.0, -r * near, 0.0],
        ]
    }

    // ── initial state ─────────────────────────────────────────────────────

    #[test]
    fn world_starts_as_identity() {
        let state = TransformState::new(640.0 / 480.0);
        assert_eq!(state.world(), Mat4::IDENTITY);
        assert_eq!(state.world(), state.world().transpose());
        assert_eq!(state.angle(), 0.0);
    }

    #[test]
    fn projection_matches_perspective_formula() {
        let aspect = 640.0 / 480.0;
        let state = TransformState::new(aspect);
        let expected = Mat4::from_cols_array_2d(&row_vector_perspective(PI * 0.45, aspect, 0.1, 20.0));
        assert!(state.projection().abs_diff_eq(expected, EPS));
        // Aspect ratio 4:3 shows up as w = h * 0.75.
        let p = state.projection();
        assert!(approx(p.x_axis.x, p.y_axis.y * 0.75, EPS));
    }

    #[test]
    fn view_places_origin_two_units_ahead() {
        let state = TransformState::new(1.0);
        let origin = state.view().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), EPS));
    }

    #[test]
    fn origin_lands_inside_depth_range() {
        let state = TransformState::new(640.0 / 480.0);
        let clip = state.projection() * state.view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    // ── advance ───────────────────────────────────────────────────────────

    #[test]
    fn one_frame_rotates_by_step() {
        let mut state = TransformState::new(1.0);
        state.advance();
        assert!(approx(state.angle(), 0.015_707_964, 1e-6));
        assert_eq!(state.frames(), 1);
    }

    #[test]
    fn angle_after_n_frames_wraps_modulo_tau() {
        let mut state = TransformState::new(1.0);
        for n in 1..=1000u32 {
            state.advance();
            let expected = (f64::from(n) * f64::from(ROTATION_STEP)).rem_euclid(TAU) as f32;
            assert!(angle_distance(state.angle(), expected) < 1e-4, "frame {n}");
            assert!((0.0..TAU).contains(&state.angle));
        }
        // 1000 frames = 5π, which wraps to π.
        assert!(angle_distance(state.angle(), PI) < 1e-3);
    }

    #[test]
    fn two_hundred_frames_is_half_a_turn() {
        let mut state = TransformState::new(640.0 / 480.0);
        for _ in 0..200 {
            state.advance();
        }
        assert!(approx(state.angle(), PI, 1e-4));

        let half_turn = Mat4::from_cols_array_2d(&[
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(state.world().abs_diff_eq(half_turn, 1e-3));
    }

    #[test]
    fn world_is_transposed_row_vector_rotation() {
        let mut state = TransformState::new(1.0);
        for _ in 0..20 {
            state.advance();
        }
        let (s, c) = state.angle().sin_cos();
        let row_vector_rows = [
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        assert!(state
            .world()
            .abs_diff_eq(Mat4::from_cols_array_2d(&row_vector_rows), EPS));
    }

    #[test]
    fn view_and_projection_never_change() {
        let mut state = TransformState::new(640.0 / 480.0);
        let view = state.view().to_cols_array();
        let projection = state.projection().to_cols_array();
        for _ in 0..500 {
            state.advance();
            assert_eq!(state.view().to_cols_array(), view);
            assert_eq!(state.projection().to_cols_array(), projection);
        }
    }

    // ── uniform layout ────────────────────────────────────────────────────

    #[test]
    fn uniform_holds_three_matrices_in_order() {
        let mut state = TransformState::new(640.0 / 480.0);
        state.advance();
        let uniform = state.uniform();
        assert_eq!(TransformUniform::SIZE, 192);
        assert_eq!(TransformUniform::min_binding_size().get(), 192);

        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniform));
        assert_eq!(&floats[0..16], &state.world().to_cols_array());
        assert_eq!(&floats[16..32], &state.view().to_cols_array());
        assert_eq!(&floats[32..48], &state.projection().to_cols_array());
    }
}
