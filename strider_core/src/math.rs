//! Math types.
//!
//! Hand-rolled vectors and row-major 4x4 matrices with stable,
//! deterministic semantics. No SIMD, no unsafe; NaN/Inf propagate
//! instead of being trapped.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Length threshold below which a vector counts as degenerate.
pub const EPS: f32 = 1e-4;

/// Linear interpolation between two scalars.
pub fn lerp(a: f32, b: f32, w: f32) -> f32 {
    (1.0 - w) * a + w * b
}

/// Moves `current` toward `target` by at most `delta`, never overshooting.
pub fn approach(current: f32, target: f32, delta: f32) -> f32 {
    if current < target {
        (current + delta).min(target)
    } else if current > target {
        (current - delta).max(target)
    } else {
        current
    }
}

/// Barycentric-sign point-in-triangle test in 2D.
///
/// Degenerate triangles (co-linear corners, disagreeing edge signs)
/// report `false`.
#[allow(clippy::too_many_arguments)]
pub fn inside_triangle(
    px: f32,
    py: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
) -> bool {
    let as_x = px - x1;
    let as_y = py - y1;
    let s_ab = (x2 - x1) * as_y - (y2 - y1) * as_x > 0.0;

    if ((x3 - x1) * as_y - (y3 - y1) * as_x > 0.0) == s_ab {
        return false;
    }
    ((x3 - x2) * (py - y2) - (y3 - y2) * (px - x2) > 0.0) == s_ab
}

/// 2D vector. Used by the gradient noise basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Normalizes in place. A near-zero vector becomes the zero vector,
    /// or the unit +X axis when `force_unit` is set.
    pub fn normalize(&mut self, force_unit: bool) {
        let l = self.length();
        if l < EPS {
            self.x = if force_unit { 1.0 } else { 0.0 };
            self.y = 0.0;
            return;
        }
        self.x /= l;
        self.y /= l;
    }

    pub fn normalized(self, force_unit: bool) -> Self {
        let mut out = self;
        out.normalize(force_unit);
        out
    }
}

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed cross product.
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - rhs.y * self.z,
            -(self.x * rhs.z - rhs.x * self.z),
            self.x * rhs.y - rhs.x * self.y,
        )
    }

    /// Normalizes in place. A near-zero vector becomes the zero vector,
    /// or the unit +X axis when `force_unit` is set.
    pub fn normalize(&mut self, force_unit: bool) {
        let l = self.length();
        if l < EPS {
            self.x = if force_unit { 1.0 } else { 0.0 };
            self.y = 0.0;
            self.z = 0.0;
            return;
        }
        self.x /= l;
        self.y /= l;
        self.z /= l;
    }

    pub fn normalized(self, force_unit: bool) -> Self {
        let mut out = self;
        out.normalize(force_unit);
        out
    }

    pub fn scaled(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        self.scaled(scalar)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Row-major 4x4 matrix.
///
/// All constructors are written for column vectors (`M * v`), so
/// `a.multiply(b)` means "apply `b` first, then `a`".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    pub m: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    pub const fn identity() -> Self {
        let mut m = [0.0; 16];
        m[0] = 1.0;
        m[5] = 1.0;
        m[10] = 1.0;
        m[15] = 1.0;
        Self { m }
    }

    pub const fn translate(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::identity();
        out.m[3] = x;
        out.m[7] = y;
        out.m[11] = z;
        out
    }

    pub const fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::identity();
        out.m[0] = x;
        out.m[5] = y;
        out.m[10] = z;
        out
    }

    /// Composed Euler-style rotation: each axis angle is `angle * v.axis`
    /// and the three rotations are folded into one matrix.
    ///
    /// Not a true axis-angle rotation; the construction is kept exactly
    /// because the lighting normal path depends on its behavior. For
    /// single-axis unit vectors it matches the conventional rotation
    /// about that axis.
    pub fn rotate(angle: f32, v: Vector3) -> Self {
        let ca = (angle * v.x).cos();
        let sa = (angle * v.x).sin();

        let cb = (angle * v.y).cos();
        let sb = (angle * v.y).sin();

        let cc = (angle * v.z).cos();
        let sc = (angle * v.z).sin();

        let mut a = Self::identity();

        a.m[0] = cb * cc;
        a.m[1] = -cb * sc;
        a.m[2] = sb;

        a.m[4] = sa * sb * cc + ca * sc;
        a.m[5] = -sa * sb * sc + ca * cc;
        a.m[6] = -sa * cb;

        a.m[8] = -ca * sb * cc;
        a.m[9] = ca * sb * sc + sa * cc;
        a.m[10] = ca * cb;

        a
    }

    /// Right-handed view matrix; `forward` points from `target` to `eye`.
    pub fn look_at(eye: Vector3, target: Vector3, up_dir: Vector3) -> Self {
        let mut a = Self::identity();

        let forward = (eye - target).normalized(false);
        let left = forward.cross(up_dir).normalized(false);
        let up = forward.cross(left);

        a.m[0] = left.x;
        a.m[1] = left.y;
        a.m[2] = left.z;
        a.m[4] = up.x;
        a.m[5] = up.y;
        a.m[6] = up.z;
        a.m[8] = forward.x;
        a.m[9] = forward.y;
        a.m[10] = forward.z;

        a.m[3] = -left.dot(eye);
        a.m[7] = -up.dot(eye);
        a.m[11] = -forward.dot(eye);

        a
    }

    /// OpenGL-style perspective projection, clip z mapped to [-1, 1].
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut a = Self { m: [0.0; 16] };

        let f = 1.0 / (fov_y / 2.0).tan();

        a.m[0] = f / aspect_ratio;
        a.m[5] = f;
        a.m[10] = -(far + near) / (far - near);
        a.m[11] = -2.0 * far * near / (far - near);
        a.m[14] = -1.0;

        a
    }

    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut a = Self::identity();

        a.m[0] = 2.0 / (right - left);
        a.m[3] = -(right + left) / (right - left);

        a.m[5] = 2.0 / (top - bottom);
        a.m[7] = -(top + bottom) / (top - bottom);

        a.m[10] = -2.0 / (far - near);
        a.m[11] = -(far + near) / (far - near);

        a.m[15] = 1.0;

        a
    }

    pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self::ortho(left, right, bottom, top, -1.0, 1.0)
    }

    /// Full 4x4 product, `self * b`.
    pub fn multiply(self, b: Self) -> Self {
        let mut out = Self { m: [0.0; 16] };

        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    out.m[i * 4 + j] += self.m[i * 4 + k] * b.m[k * 4 + j];
                }
            }
        }

        out
    }

    /// Transforms a point (implicit w = 1, no perspective divide).
    pub fn multiply_vec3(self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0] * v.x + self.m[1] * v.y + self.m[2] * v.z + self.m[3],
            self.m[4] * v.x + self.m[5] * v.y + self.m[6] * v.z + self.m[7],
            self.m[8] * v.x + self.m[9] * v.y + self.m[10] * v.z + self.m[11],
        )
    }

    pub fn transpose(self) -> Self {
        let mut out = Self { m: [0.0; 16] };

        for j in 0..4 {
            for i in 0..4 {
                out.m[i * 4 + j] = self.m[j * 4 + i];
            }
        }

        out
    }
}
