//! Transform stack.
//!
//! Accumulates model/view/projection matrices and a separate
//! rotation-only matrix for lighting normals. The combined
//! `projection * view * model` product is cached behind a dirty flag
//! and only recomputed when one of the three inputs changed.

use crate::math::{Matrix4, Vector3};
use crate::render::RenderBackend;

pub struct TransformStack {
    model: Matrix4,
    view: Matrix4,
    projection: Matrix4,
    product: Matrix4,
    /// Accumulated rotation without translation/scale; transforms
    /// normals for lighting.
    rotation: Matrix4,

    stack: Vec<(Matrix4, Matrix4)>,

    product_computed: bool,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            model: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            product: Matrix4::identity(),
            rotation: Matrix4::identity(),
            stack: Vec::new(),
            product_computed: false,
        }
    }

    /// Resets the model and rotation matrices.
    pub fn load_identity(&mut self) {
        self.model = Matrix4::identity();
        self.rotation = Matrix4::identity();

        self.product_computed = false;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.model = self.model.multiply(Matrix4::translate(x, y, z));

        self.product_computed = false;
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.model = self.model.multiply(Matrix4::scale(x, y, z));

        self.product_computed = false;
    }

    /// Right-multiplies the model matrix by a rotation; the same
    /// rotation also folds into the rotation-only matrix.
    pub fn rotate(&mut self, angle: f32, axis: Vector3) {
        let op = Matrix4::rotate(angle, axis);

        self.model = self.model.multiply(op);
        self.rotation = self.rotation.multiply(op);

        self.product_computed = false;
    }

    /// Builds the view matrix looking from `eye` toward `target`, with
    /// world up (0, 1, 0).
    pub fn set_view(&mut self, eye: Vector3, target: Vector3) {
        self.view = Matrix4::look_at(eye, target, Vector3::new(0.0, 1.0, 0.0));

        self.product_computed = false;
    }

    /// Top-left-origin, Y-down coordinate system for overlay drawing.
    pub fn set_view_2d(&mut self, width: f32, height: f32) {
        self.view = Matrix4::identity();
        self.projection = Matrix4::ortho_2d(0.0, width, height, 0.0);

        self.product_computed = false;
    }

    pub fn set_perspective(&mut self, fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) {
        self.projection =
            Matrix4::perspective(fov_y_degrees.to_radians(), aspect_ratio, near, far);

        self.product_computed = false;
    }

    /// Saves the current (model, rotation) pair.
    pub fn push(&mut self) {
        self.stack.push((self.model, self.rotation));
    }

    /// Restores the most recently pushed (model, rotation) pair.
    ///
    /// Popping an empty stack is a push/pop pairing bug in the caller
    /// and panics.
    pub fn pop(&mut self) {
        let (model, rotation) = self.stack.pop().expect("transform stack underflow");
        self.model = model;
        self.rotation = rotation;

        self.product_computed = false;
    }

    /// The combined `projection * view * model`, recomputed only when
    /// one of the inputs changed since the last read.
    pub fn product(&mut self) -> Matrix4 {
        if !self.product_computed {
            self.product = self.projection.multiply(self.view.multiply(self.model));
            self.product_computed = true;
        }
        self.product
    }

    pub fn rotation(&self) -> Matrix4 {
        self.rotation
    }

    pub fn model(&self) -> Matrix4 {
        self.model
    }

    /// Hands the combined transform and the rotation-only matrix to the
    /// backend as the active matrices.
    pub fn apply(&mut self, backend: &mut dyn RenderBackend) {
        let product = self.product();
        backend.set_transform(product);
        backend.set_rotation(self.rotation);
    }
}
