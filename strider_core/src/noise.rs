//! Procedural noise fields.
//!
//! Deterministic generators around a fixed linear-congruential core,
//! so a given seed always produces the same terrain. Two strategies
//! share one output contract, a row-major `width * height` scalar
//! field: a blurred value-noise field clamped to [0, 1], and a
//! gradient-noise variant.

use anyhow::{bail, Result};

use crate::math::{lerp, Vector2};

const LCG_MODULUS: i64 = (1 << 31) - 1;
const LCG_MULTIPLIER: i64 = 1103515245;
const LCG_INCREMENT: i64 = 12345;

/// Linear-congruential generator with the classic glibc-style
/// constants. Not statistically strong, but cheap and reproducible,
/// which is all terrain seeding needs.
#[derive(Debug, Clone)]
pub struct Lcg {
    seed: i64,
}

impl Lcg {
    pub fn new(seed: i64) -> Self {
        Self {
            seed: seed.rem_euclid(LCG_MODULUS),
        }
    }

    pub fn next(&mut self) -> i64 {
        self.seed = (LCG_MULTIPLIER * self.seed + LCG_INCREMENT) % LCG_MODULUS;
        self.seed
    }

    /// Uniform sample in `[0, 1)`.
    pub fn next_unit(&mut self) -> f32 {
        self.next() as f32 / LCG_MODULUS as f32
    }
}

/// Band-limited value noise.
///
/// Seeds a coarse grid of uniforms, box-blurs it `blur_passes` times
/// with wraparound, trims the outermost ring, bilinearly upsamples by
/// `upsample` to `width x height` and clamps to [0, 1].
///
/// `upsample` must divide both target dimensions.
pub fn value_noise(
    width: usize,
    height: usize,
    upsample: usize,
    blur_passes: u32,
    seed: i64,
) -> Result<Vec<f32>> {
    if width == 0 || height == 0 {
        bail!("noise field dimensions {width}x{height} must be nonzero");
    }
    if upsample == 0 || width % upsample != 0 || height % upsample != 0 {
        bail!("upsample factor {upsample} does not divide {width}x{height}");
    }

    // One extra ring on each side feeds the blur, then gets trimmed.
    let base_w = width / upsample + 2;
    let base_h = height / upsample + 2;

    let mut rng = Lcg::new(seed);
    let mut base: Vec<f32> = (0..base_w * base_h).map(|_| rng.next_unit()).collect();

    for _ in 0..blur_passes {
        base = blur_pass(&base, base_w, base_h);
    }

    let grid_w = base_w - 2;
    let grid_h = base_h - 2;
    let mut grid = Vec::with_capacity(grid_w * grid_h);
    for y in 0..grid_h {
        for x in 0..grid_w {
            grid.push(base[(y + 1) * base_w + (x + 1)]);
        }
    }

    let sample = |x: usize, y: usize| grid[(y % grid_h) * grid_w + (x % grid_w)];

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let gx = x / upsample;
            let gy = y / upsample;
            let fx = (x % upsample) as f32 / upsample as f32;
            let fy = (y % upsample) as f32 / upsample as f32;

            let top = lerp(sample(gx, gy), sample(gx + 1, gy), fx);
            let bottom = lerp(sample(gx, gy + 1), sample(gx + 1, gy + 1), fx);
            out.push(lerp(top, bottom, fy).clamp(0.0, 1.0));
        }
    }
    Ok(out)
}

/// One 3x3 weighted blur pass with wraparound. Each of the eight
/// neighbors is mixed against the center value before averaging:
/// diagonal neighbors at weight 1/sqrt(2), axis neighbors at 0.5.
fn blur_pass(values: &[f32], width: usize, height: usize) -> Vec<f32> {
    const AXIS_WEIGHT: f32 = 0.5;
    let diag_weight = std::f32::consts::FRAC_1_SQRT_2;

    let sample = |x: i32, y: i32| -> f32 {
        let xi = x.rem_euclid(width as i32) as usize;
        let yi = y.rem_euclid(height as i32) as usize;
        values[yi * width + xi]
    };

    let mut out = vec![0.0; values.len()];
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let own = sample(x, y);
            let mut acc = 0.0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let weight = if dx != 0 && dy != 0 {
                        diag_weight
                    } else {
                        AXIS_WEIGHT
                    };
                    acc += sample(x + dx, y + dy) * weight + own * (1.0 - weight);
                }
            }
            out[y as usize * width + x as usize] = acc / 8.0;
        }
    }
    out
}

/// Gradient noise over a lattice of `jump`-spaced cells.
///
/// A small basis of unit gradients is built from the LCG, spread over
/// the lattice with a quadratic hash, and bilinearly interpolated
/// per output cell. `jump` must divide both dimensions.
pub fn gradient_noise(
    width: usize,
    height: usize,
    jump: usize,
    seed: i64,
    gradient_count: usize,
) -> Result<Vec<f32>> {
    if width == 0 || height == 0 {
        bail!("noise field dimensions {width}x{height} must be nonzero");
    }
    if jump == 0 || width % jump != 0 || height % jump != 0 {
        bail!("lattice spacing {jump} does not divide {width}x{height}");
    }
    if gradient_count == 0 {
        bail!("gradient basis must be nonempty");
    }

    let div = std::f32::consts::SQRT_2 / 2.0;

    let mut rng = Lcg::new(seed);
    let basis: Vec<Vector2> = (0..gradient_count)
        .map(|_| {
            Vector2::new(
                (rng.next() % 2000) as f32 / 1000.0 - 1.0,
                (rng.next() % 2000) as f32 / 1000.0 - 1.0,
            )
            .normalized(true)
        })
        .collect();
    let hash = |k: usize| k * (k + 3) % gradient_count;

    let grid_w = width / jump;
    let grid_h = height / jump;
    let gradient: Vec<Vector2> = (0..grid_w * grid_h).map(|i| basis[hash(i)]).collect();

    let value = |ix: usize, iy: usize, x: f32, y: f32| -> f32 {
        let g = gradient[(iy % grid_h) * grid_w + (ix % grid_w)];
        (x - ix as f32) * g.x + (y - iy as f32) * g.y
    };

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 / jump as f32;
            let dy = y as f32 / jump as f32;
            let px = x / jump;
            let py = y / jump;

            let n0 = value(px, py, dx, dy);
            let n1 = value(px + 1, py, dx, dy);
            let ix0 = lerp(n0, n1, dx - px as f32);

            let n0 = value(px, py + 1, dx, dy);
            let n1 = value(px + 1, py + 1, dx, dy);
            let ix1 = lerp(n0, n1, dx - px as f32);

            out.push(lerp(ix0, ix1, dy - py as f32) / div);
        }
    }
    Ok(out)
}
