//! Gradient noise for procedural textures.
//!
//! [`Perlin`] is Ken Perlin's improved noise (quintic fade, 12 cube-edge
//! gradients) evaluated on the `z = 0` plane. The permutation table is
//! shuffled from a caller-supplied RNG, so the same seed always gives the
//! same field and there is no global state.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use texel_ops::noise::Perlin;
//!
//! let perlin = Perlin::new(&mut StdRng::seed_from_u64(7));
//! let v = perlin.noise2(1.5, 2.25);
//! assert!((-1.0..=1.0).contains(&v));
//! assert_eq!(perlin.noise2(3.0, 4.0), 0.0);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

/// Seeded improved-Perlin noise field.
#[derive(Clone)]
pub struct Perlin {
    perm: [u8; 512],
}

impl std::fmt::Debug for Perlin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perlin").field("perm", &&self.perm[..8]).finish_non_exhaustive()
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product with one of the 12 cube-edge gradients, `z = 0`.
#[inline]
fn grad(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

impl Perlin {
    /// Builds a field from a permutation shuffled by `rng`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut p: Vec<u8> = (0..=255).collect();
        p.shuffle(rng);
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }
        Self { perm }
    }

    /// Noise at `(x, y)`, roughly in `[-1, 1]`; zero on integer lattice points.
    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        let (fx, fy) = (x.floor(), y.floor());
        let xi = (fx as i64 & 255) as usize;
        let yi = (fy as i64 & 255) as usize;
        let (xf, yf) = (x - fx, y - fy);
        let (u, v) = (fade(xf), fade(yf));

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;

        let x0 = lerp(grad(p[a], xf, yf), grad(p[b], xf - 1.0, yf), u);
        let x1 = lerp(grad(p[a + 1], xf, yf - 1.0), grad(p[b + 1], xf - 1.0, yf - 1.0), u);
        lerp(x0, x1, v)
    }

    /// Fractal sum of `octaves` layers, normalized back to `[-1, 1]`.
    ///
    /// Each octave multiplies frequency by `lacunarity` and amplitude by
    /// `gain`. Zero octaves yields 0.
    pub fn fbm(&self, x: f32, y: f32, octaves: u32, lacunarity: f32, gain: f32) -> f32 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            value += amplitude * self.noise2(x * frequency, y * frequency);
            max_value += amplitude;
            amplitude *= gain;
            frequency *= lacunarity;
        }

        if max_value > 0.0 {
            (value / max_value).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}
