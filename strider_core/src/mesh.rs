//! Mesh data.
//!
//! Plain vertex/index arrays in the flat layout a renderer backend
//! uploads directly: xyz position triples, uv pairs, xyz normal
//! triples, rgb color triples, and u16 triangle indices.

use serde::{Deserialize, Serialize};

/// CPU-side mesh buffers, ready for backend upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn element_count(&self) -> usize {
        self.indices.len()
    }

    /// Position of vertex `i` as an (x, y, z) triple.
    pub fn position(&self, i: usize) -> (f32, f32, f32) {
        (
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }

    /// Normal of vertex `i` as an (x, y, z) triple.
    pub fn normal(&self, i: usize) -> (f32, f32, f32) {
        (
            self.normals[i * 3],
            self.normals[i * 3 + 1],
            self.normals[i * 3 + 2],
        )
    }
}
