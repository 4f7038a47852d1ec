//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! `RenderBackend` is the full surface the simulation needs from one:
//! mesh allocation, logical shader binding, uniform-like parameters,
//! and texture binding. `NullRenderer` and `RecordingRenderer` keep
//! everything headless and testable.
//!
//! Bound-state (active shader/mesh/texture) lives in the backend's
//! `BindCache`, whose only job is "bind if different"; the simulation
//! core carries no hidden global binding state.

use serde::{Deserialize, Serialize};

use crate::math::{Matrix4, Vector3};
use crate::mesh::MeshData;
use crate::transform::TransformStack;

/// Opaque handle to a backend-allocated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Opaque handle to a backend-owned texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u64);

/// Logical GPU program names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderKind {
    /// Textured geometry with fog and directional light.
    TexturedFogLight,
    /// Textured geometry, no lighting.
    Textured,
    /// Flat-colored geometry.
    Untextured,
}

/// A minimal rendering API.
pub trait RenderBackend {
    fn clear(&mut self, r: f32, g: f32, b: f32);

    fn create_mesh(&mut self, data: &MeshData) -> MeshHandle;
    fn draw_mesh(&mut self, mesh: MeshHandle);

    fn bind_shader(&mut self, shader: ShaderKind);
    fn bind_texture(&mut self, texture: Option<TextureHandle>);

    fn set_transform(&mut self, transform: Matrix4);
    fn set_rotation(&mut self, rotation: Matrix4);
    fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32);
    fn set_fog(&mut self, r: f32, g: f32, b: f32, a: f32, density: f32);
    fn set_light(&mut self, direction: Vector3, magnitude: f32);
    /// Sub-image transform for texture atlasing (uv offset + size).
    fn set_texture_area(&mut self, x: f32, y: f32, w: f32, h: f32);
}

/// Bind-if-different cache for the mutable bound state of a backend.
#[derive(Debug, Default, Clone)]
pub struct BindCache {
    shader: Option<ShaderKind>,
    mesh: Option<MeshHandle>,
    texture: Option<Option<TextureHandle>>,
}

impl BindCache {
    /// True if `shader` was not already bound; records it as bound.
    pub fn rebind_shader(&mut self, shader: ShaderKind) -> bool {
        if self.shader == Some(shader) {
            return false;
        }
        self.shader = Some(shader);
        true
    }

    /// True if `mesh` was not already bound; records it as bound.
    pub fn rebind_mesh(&mut self, mesh: MeshHandle) -> bool {
        if self.mesh == Some(mesh) {
            return false;
        }
        self.mesh = Some(mesh);
        true
    }

    /// True if `texture` was not already bound; records it as bound.
    pub fn rebind_texture(&mut self, texture: Option<TextureHandle>) -> bool {
        if self.texture == Some(texture) {
            return false;
        }
        self.texture = Some(texture);
        true
    }

    pub fn shader(&self) -> Option<ShaderKind> {
        self.shader
    }
}

/// A no-op renderer useful for headless runs.
#[derive(Default)]
pub struct NullRenderer {
    next_mesh: u64,
}

impl RenderBackend for NullRenderer {
    fn clear(&mut self, _r: f32, _g: f32, _b: f32) {}

    fn create_mesh(&mut self, _data: &MeshData) -> MeshHandle {
        let h = MeshHandle(self.next_mesh);
        self.next_mesh += 1;
        h
    }

    fn draw_mesh(&mut self, _mesh: MeshHandle) {}
    fn bind_shader(&mut self, _shader: ShaderKind) {}
    fn bind_texture(&mut self, _texture: Option<TextureHandle>) {}
    fn set_transform(&mut self, _transform: Matrix4) {}
    fn set_rotation(&mut self, _rotation: Matrix4) {}
    fn set_color(&mut self, _r: f32, _g: f32, _b: f32, _a: f32) {}
    fn set_fog(&mut self, _r: f32, _g: f32, _b: f32, _a: f32, _density: f32) {}
    fn set_light(&mut self, _direction: Vector3, _magnitude: f32) {}
    fn set_texture_area(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {}
}

/// One logged backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    Clear(f32, f32, f32),
    CreateMesh(MeshHandle),
    DrawMesh(MeshHandle),
    BindShader(ShaderKind),
    BindTexture(Option<TextureHandle>),
    SetTransform(Matrix4),
    SetRotation(Matrix4),
    SetColor([f32; 4]),
    SetFog { color: [f32; 4], density: f32 },
    SetLight { direction: Vector3, magnitude: f32 },
    SetTextureArea { x: f32, y: f32, w: f32, h: f32 },
}

/// Renderer that records every call; redundant shader/texture binds
/// are swallowed by the bind cache, the way a real backend would skip
/// them.
#[derive(Default)]
pub struct RecordingRenderer {
    pub ops: Vec<RenderOp>,
    pub meshes: Vec<MeshData>,
    cache: BindCache,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded mesh data for a handle, if the handle came from here.
    pub fn mesh_data(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn count_ops(&self, pred: impl Fn(&RenderOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl RenderBackend for RecordingRenderer {
    fn clear(&mut self, r: f32, g: f32, b: f32) {
        self.ops.push(RenderOp::Clear(r, g, b));
    }

    fn create_mesh(&mut self, data: &MeshData) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u64);
        self.meshes.push(data.clone());
        self.ops.push(RenderOp::CreateMesh(handle));
        handle
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        if self.cache.rebind_mesh(mesh) {
            // A real backend would re-point vertex attributes here.
        }
        self.ops.push(RenderOp::DrawMesh(mesh));
    }

    fn bind_shader(&mut self, shader: ShaderKind) {
        if self.cache.rebind_shader(shader) {
            self.ops.push(RenderOp::BindShader(shader));
        }
    }

    fn bind_texture(&mut self, texture: Option<TextureHandle>) {
        if self.cache.rebind_texture(texture) {
            self.ops.push(RenderOp::BindTexture(texture));
        }
    }

    fn set_transform(&mut self, transform: Matrix4) {
        // Uniform uploads are meaningless without an active program.
        if self.cache.shader().is_none() {
            return;
        }
        self.ops.push(RenderOp::SetTransform(transform));
    }

    fn set_rotation(&mut self, rotation: Matrix4) {
        if self.cache.shader().is_none() {
            return;
        }
        self.ops.push(RenderOp::SetRotation(rotation));
    }

    fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.ops.push(RenderOp::SetColor([r, g, b, a]));
    }

    fn set_fog(&mut self, r: f32, g: f32, b: f32, a: f32, density: f32) {
        self.ops.push(RenderOp::SetFog {
            color: [r, g, b, a],
            density,
        });
    }

    fn set_light(&mut self, direction: Vector3, magnitude: f32) {
        self.ops.push(RenderOp::SetLight {
            direction,
            magnitude,
        });
    }

    fn set_texture_area(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(RenderOp::SetTextureArea { x, y, w, h });
    }
}

/// A backend plus the transform stack that feeds it; what scene
/// drawing code passes around.
pub struct RenderContext<'a> {
    pub backend: &'a mut dyn RenderBackend,
    pub transf: &'a mut TransformStack,
}

impl<'a> RenderContext<'a> {
    pub fn new(backend: &'a mut dyn RenderBackend, transf: &'a mut TransformStack) -> Self {
        Self { backend, transf }
    }

    /// Pushes the current combined transform and rotation matrix to the
    /// backend.
    pub fn apply_transform(&mut self) {
        self.transf.apply(&mut *self.backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_cache_skips_redundant_binds() {
        let mut cache = BindCache::default();
        assert!(cache.rebind_shader(ShaderKind::Textured));
        assert!(!cache.rebind_shader(ShaderKind::Textured));
        assert!(cache.rebind_shader(ShaderKind::Untextured));

        assert!(cache.rebind_texture(None));
        assert!(!cache.rebind_texture(None));
        assert!(cache.rebind_texture(Some(TextureHandle(0))));
    }

    #[test]
    fn recording_renderer_drops_redundant_shader_binds() {
        let mut r = RecordingRenderer::new();
        r.bind_shader(ShaderKind::TexturedFogLight);
        r.bind_shader(ShaderKind::TexturedFogLight);
        r.bind_shader(ShaderKind::Untextured);

        let binds = r.count_ops(|op| matches!(op, RenderOp::BindShader(_)));
        assert_eq!(binds, 2);
    }

    #[test]
    fn recording_renderer_ignores_uniforms_without_shader() {
        let mut r = RecordingRenderer::new();
        r.set_transform(Matrix4::identity());
        assert!(r.ops.is_empty());

        r.bind_shader(ShaderKind::Untextured);
        r.set_transform(Matrix4::identity());
        assert_eq!(
            r.count_ops(|op| matches!(op, RenderOp::SetTransform(_))),
            1
        );
    }

    #[test]
    fn mesh_handles_are_sequential() {
        let mut r = RecordingRenderer::new();
        let a = r.create_mesh(&MeshData::default());
        let b = r.create_mesh(&MeshData::default());
        assert_eq!(a, MeshHandle(0));
        assert_eq!(b, MeshHandle(1));
        assert!(r.mesh_data(b).is_some());
    }
}
