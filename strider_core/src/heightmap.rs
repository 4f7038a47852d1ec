//! Wraparound heightfield grid.
//!
//! A `width x height` grid of elevation scalars addressed with
//! wraparound in both axes, so off-grid probes never go out of bounds.
//! Meshing and collision both probe one cell past the last row/column
//! and rely on this.

use anyhow::{bail, Result};
use rand::Rng;

/// 2D elevation grid. Immutable once built; terrains deep-copy it on
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Heightmap {
    /// Flat map, every elevation zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Builds a map from row-major elevation values.
    pub fn from_values(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            bail!(
                "heightmap data length {} does not match {}x{}",
                data.len(),
                width,
                height
            );
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Parametric test surface, crossed cosine/sine waves.
    pub fn wave(width: usize, height: usize, amplitude: f32) -> Self {
        let mut out = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let u = 4.0 * std::f32::consts::PI * x as f32 / width as f32;
                let v = 4.0 * std::f32::consts::PI * y as f32 / height as f32;
                out.data[y * width + x] = 0.5 * (u.cos() + v.sin()) * amplitude;
            }
        }
        out
    }

    /// Hemispherical bump of the given peak height within `radius`
    /// grid cells of the map center, zero elsewhere.
    pub fn bump(width: usize, height: usize, peak: f32, radius: f32) -> Self {
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;

        let mut out = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - cx;
                let dz = y as f32 - cy;
                if dx.hypot(dz) >= radius {
                    continue;
                }
                out.data[y * width + x] = peak
                    * (1.0 - (dx / radius) * (dx / radius)).sqrt()
                    * (1.0 - (dz / radius) * (dz / radius)).sqrt();
            }
        }
        out
    }

    /// Converts a noise field into elevations. Higher noise means lower
    /// elevation; the sign flip is intentional and relied upon by the
    /// terrain generators.
    pub fn from_noise(width: usize, height: usize, noise: &[f32], amplitude: f32) -> Result<Self> {
        if noise.len() != width * height {
            bail!(
                "noise field length {} does not match {}x{}",
                noise.len(),
                width,
                height
            );
        }
        Ok(Self {
            width,
            height,
            data: noise.iter().map(|v| -amplitude * v).collect(),
        })
    }

    /// Uniform random elevations in `[0, max)`. Test support.
    pub fn randomized<R: Rng>(width: usize, height: usize, max: f32, rng: &mut R) -> Self {
        let mut out = Self::new(width, height);
        for v in &mut out.data {
            *v = rng.gen_range(0.0..max);
        }
        out
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Wraparound sample, defined for any integer coordinates.
    pub fn get_height_value(&self, x: i32, y: i32) -> f32 {
        let xi = x.rem_euclid(self.width as i32) as usize;
        let yi = y.rem_euclid(self.height as i32) as usize;
        self.data[yi * self.width + xi]
    }

    /// Pointwise sum of two maps of identical dimensions.
    pub fn combined(&self, other: &Heightmap) -> Result<Heightmap> {
        if self.width != other.width || self.height != other.height {
            bail!(
                "cannot combine {}x{} heightmap with {}x{}",
                self.width,
                self.height,
                other.width,
                other.height
            );
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Heightmap {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_map_is_flat() {
        let map = Heightmap::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(map.get_height_value(x, y), 0.0);
            }
        }
    }

    #[test]
    fn sampling_wraps_in_both_axes() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = Heightmap::randomized(5, 4, 2.0, &mut rng);

        for y in -4..8 {
            for x in -5..10 {
                assert_eq!(
                    map.get_height_value(x, y),
                    map.get_height_value(x + 5, y + 4)
                );
            }
        }
        assert_eq!(map.get_height_value(-1, -1), map.get_height_value(4, 3));
    }

    #[test]
    fn from_values_checks_length() {
        assert!(Heightmap::from_values(3, 3, vec![0.0; 9]).is_ok());
        assert!(Heightmap::from_values(3, 3, vec![0.0; 8]).is_err());
    }

    #[test]
    fn combined_sums_pointwise() {
        let a = Heightmap::from_values(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Heightmap::from_values(2, 2, vec![0.5, 0.5, 0.5, 0.5]).unwrap();
        let sum = a.combined(&b).unwrap();
        assert_eq!(sum.get_height_value(0, 0), 1.5);
        assert_eq!(sum.get_height_value(1, 1), 4.5);
    }

    #[test]
    fn combined_rejects_mismatched_dimensions() {
        let a = Heightmap::new(4, 4);
        let b = Heightmap::new(4, 5);
        assert!(a.combined(&b).is_err());
    }

    #[test]
    fn wave_matches_formula_at_origin() {
        let map = Heightmap::wave(8, 8, 2.0);
        // cos(0) + sin(0) = 1, halved and scaled.
        assert!((map.get_height_value(0, 0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bump_peaks_at_center_and_fades_out() {
        let map = Heightmap::bump(8, 8, 3.0, 3.0);
        let center = map.get_height_value(4, 4);
        assert_eq!(center, 3.0);
        assert_eq!(map.get_height_value(0, 0), 0.0);
        assert!(map.get_height_value(3, 4) < center);
    }

    #[test]
    fn noise_conversion_flips_sign() {
        let noise = vec![0.0, 0.25, 0.5, 1.0];
        let map = Heightmap::from_noise(2, 2, &noise, 2.0).unwrap();
        assert_eq!(map.get_height_value(0, 0), 0.0);
        assert_eq!(map.get_height_value(1, 1), -2.0);

        assert!(Heightmap::from_noise(2, 2, &noise[..3], 2.0).is_err());
    }

    #[test]
    fn randomized_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let map = Heightmap::randomized(8, 8, 1.5, &mut rng);
        for y in 0..8 {
            for x in 0..8 {
                let v = map.get_height_value(x, y);
                assert!((0.0..1.5).contains(&v));
            }
        }
    }
}
