//! Heightfield terrain.
//!
//! Turns a heightmap into a renderable triangle grid and resolves
//! walkers against the two triangles of the cell under them. The mesh
//! lives on the backend; it is built lazily on first draw and never
//! rebuilt (terrain is static scenery).

use anyhow::{bail, Result};
use tracing::debug;

use crate::heightmap::Heightmap;
use crate::math::{inside_triangle, Vector3, EPS};
use crate::mesh::MeshData;
use crate::render::{MeshHandle, RenderContext};

/// Entities this close above the surface still count as resting on it.
const TOP_MARGIN: f32 = 0.1;

pub struct Terrain {
    width: usize,
    depth: usize,
    hmap: Heightmap,
    color: Vector3,
    scale: f32,
    mesh: Option<MeshHandle>,
}

impl Terrain {
    /// Takes a deep copy of the heightmap. The grid must be at least
    /// 2x2 so every vertex has a neighbor to form triangles with.
    pub fn new(heightmap: &Heightmap, color: Vector3, scale: f32) -> Result<Self> {
        if heightmap.width() < 2 || heightmap.height() < 2 {
            bail!(
                "terrain needs at least a 2x2 heightmap, got {}x{}",
                heightmap.width(),
                heightmap.height()
            );
        }
        Ok(Self {
            width: heightmap.width(),
            depth: heightmap.height(),
            hmap: heightmap.clone(),
            color,
            scale,
            mesh: None,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Builds the triangle grid: positions on the unit square with
    /// heightmap elevations, normalized-grid UVs, one flat color per
    /// vertex, two triangles per cell.
    pub fn mesh_data(&self) -> MeshData {
        let w = self.width;
        let d = self.depth;
        debug_assert!(w * d <= u16::MAX as usize + 1);

        let step_x = 1.0 / w as f32;
        let step_z = 1.0 / d as f32;

        let mut data = MeshData::default();

        for y in 0..d {
            for x in 0..w {
                data.positions.extend_from_slice(&[
                    step_x * x as f32,
                    self.hmap.get_height_value(x as i32, y as i32),
                    step_z * y as f32,
                ]);
                data.uvs
                    .extend_from_slice(&[step_x * x as f32, step_z * y as f32]);
                data.colors
                    .extend_from_slice(&[self.color.x, self.color.y, self.color.z]);
            }
        }

        for y in 0..d - 1 {
            for x in 0..w - 1 {
                data.indices.extend_from_slice(&[
                    (y * w + x) as u16,
                    (y * w + x + 1) as u16,
                    ((y + 1) * w + x + 1) as u16,
                    ((y + 1) * w + x + 1) as u16,
                    ((y + 1) * w + x) as u16,
                    (y * w + x) as u16,
                ]);
            }
        }

        // Interior vertices get a computed normal; the last row and
        // column copy their interior neighbor's, artifacts accepted.
        for y in 0..d {
            for x in 0..w {
                let (src_x, src_y) = if x == w - 1 && y == d - 1 {
                    (x - 1, y - 1)
                } else if x == w - 1 {
                    (x - 1, y)
                } else if y == d - 1 {
                    (x, y - 1)
                } else {
                    let n = surface_normal(&data.positions, w, x, y);
                    data.normals.extend_from_slice(&[n.x, n.y, n.z]);
                    continue;
                };
                let i = (src_y * w + src_x) * 3;
                let (nx, ny, nz) = (data.normals[i], data.normals[i + 1], data.normals[i + 2]);
                data.normals.extend_from_slice(&[nx, ny, nz]);
            }
        }

        data
    }

    /// Creates the backend mesh on first call, then draws it centered
    /// on the origin at the terrain's uniform scale.
    pub fn draw(&mut self, ctx: &mut RenderContext) {
        let mesh = match self.mesh {
            Some(handle) => handle,
            None => {
                let data = self.mesh_data();
                debug!(
                    width = self.width,
                    depth = self.depth,
                    vertices = data.vertex_count(),
                    "terrain mesh built"
                );
                let handle = ctx.backend.create_mesh(&data);
                self.mesh = Some(handle);
                handle
            }
        };

        ctx.transf.push();
        ctx.transf.scale(self.scale, self.scale, self.scale);
        ctx.transf.translate(-0.5, 0.0, -0.5);
        ctx.apply_transform();

        ctx.backend.bind_texture(None);
        ctx.backend.draw_mesh(mesh);

        ctx.transf.pop();
        ctx.apply_transform();
    }

    /// Resolves an entity against the surface of the cell under
    /// `(pos.x, pos.z)`.
    ///
    /// Tests the cell's two triangles in a fixed order and stops at the
    /// first hit; only the entity's center point is considered. On a
    /// landing, vertical speed zeroes, the position snaps to the
    /// surface and the call reports `true`; otherwise nothing is
    /// touched.
    pub fn player_collision(&self, pos: &mut Vector3, speed: &mut Vector3) -> bool {
        let cell_x = self.scale / self.width as f32;
        let cell_z = self.scale / self.depth as f32;

        let tx = ((pos.x + self.scale / 2.0) / cell_x).floor() as i32;
        let tz = ((pos.z + self.scale / 2.0) / cell_z).floor() as i32;

        let top_left = self.corner_point(tx, tz);
        let top_right = self.corner_point(tx + 1, tz);
        let bottom_right = self.corner_point(tx + 1, tz + 1);
        let bottom_left = self.corner_point(tx, tz + 1);

        self.triangle_collision(pos, speed, top_left, top_right, bottom_right)
            || self.triangle_collision(pos, speed, bottom_right, bottom_left, top_left)
    }

    /// World-space position of a grid point, wraparound included.
    fn corner_point(&self, gx: i32, gy: i32) -> Vector3 {
        Vector3::new(
            (gx as f32 / self.width as f32 - 0.5) * self.scale,
            self.hmap.get_height_value(gx, gy) * self.scale,
            (gy as f32 / self.depth as f32 - 0.5) * self.scale,
        )
    }

    fn triangle_collision(
        &self,
        pos: &mut Vector3,
        speed: &mut Vector3,
        a: Vector3,
        b: Vector3,
        c: Vector3,
    ) -> bool {
        if !inside_triangle(pos.x, pos.z, a.x, a.z, b.x, b.z, c.x, c.z) {
            return false;
        }

        // Degenerate triangles normalize to zero and fail the
        // steepness gate below.
        let n = (b - a).cross(c - a).normalized(false);
        if n.y.abs() < EPS {
            return false;
        }

        let cy = a.y - (n.x * (pos.x - a.x) + n.z * (pos.z - a.z)) / n.y;

        if pos.y < cy + TOP_MARGIN && speed.y <= 0.0 {
            speed.y = 0.0;
            pos.y = cy;
            return true;
        }
        false
    }
}

fn surface_normal(positions: &[f32], width: usize, x: usize, y: usize) -> Vector3 {
    let at = |gx: usize, gy: usize| {
        let i = (gy * width + gx) * 3;
        Vector3::new(positions[i], positions[i + 1], positions[i + 2])
    };

    let own = at(x, y);
    let below = (at(x, y + 1) - own).normalized(false);
    let right = (at(x + 1, y) - own).normalized(false);

    below.cross(right).normalized(false)
}
