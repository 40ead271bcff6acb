//! # Gradient Noise Engine
//!
//! Deterministic 2D simplex-lattice noise plus a fractal (Brownian) wrapper.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`WorldSeed`], this implementation produces **exactly** the
//! same values on any platform, any time. Decoration reproducibility depends
//! on this holding independent of evaluation order.

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u32);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Derives an independent sub-seed for a specific purpose (e.g. the dirt
    /// layer field vs. the height field).
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u32) -> Self {
        // FNV-1a style mixing
        let mut hash = self.0 ^ purpose;
        hash = hash.wrapping_mul(0x0100_0193);
        hash ^= hash >> 16;
        Self(hash)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0xCAFE_BABE)
    }
}

/// Pre-computed permutation table, built once per seed.
struct PermutationTable {
    perm: [u8; 256],
}

impl PermutationTable {
    /// Fisher-Yates shuffle of 0..=255 driven by a deterministic xorshift64
    /// stream derived from the seed.
    fn new(seed: WorldSeed) -> Self {
        let mut perm = [0u8; 256];
        for (i, entry) in perm.iter_mut().enumerate() {
            *entry = i as u8;
        }

        // xorshift64 must not start at zero
        let mut state = u64::from(seed.value()) | (u64::from(seed.value()) << 32) | 1;
        for i in (1..256).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;

            let j = (state as usize) % (i + 1);
            perm.swap(i, j);
        }

        Self { perm }
    }

    /// Hashes a lattice point to a gradient index through the table twice.
    #[inline]
    fn hash(&self, xb: i64, yb: i64) -> u8 {
        let first = self.perm[(xb & 0xFF) as usize] as usize;
        self.perm[first ^ (yb & 0xFF) as usize]
    }
}

/// 2D simplex-lattice gradient noise.
///
/// Skews input coordinates onto a triangular lattice, visits the 3
/// surrounding lattice points, and sums each point's contribution as
/// `max(0, 2 - dx^2 - dy^2)^4 * (dx*gx + dy*gy)`.
///
/// # Returns
///
/// Values in the range [-1, 1].
pub struct GradientNoise {
    table: PermutationTable,
}

/// Lattice skew factor: `(1/sqrt(3) - 1) / 2`.
const STRETCH: f64 = -0.211_324_865_405_187_12;
/// Lattice unskew factor: `(sqrt(3) - 1) / 2`.
const SQUISH: f64 = 0.366_025_403_784_438_65;
/// Output normalization constant.
const NORM: f64 = 1.0 / 14.0;
/// `1/sqrt(2)`, the diagonal gradient component.
const DIAG: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// The 8 fixed unit/diagonal gradient vectors.
const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (DIAG, DIAG),
    (-DIAG, DIAG),
    (DIAG, -DIAG),
    (-DIAG, -DIAG),
];

impl GradientNoise {
    /// Creates a noise generator from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            table: PermutationTable::new(seed),
        }
    }

    /// Samples the noise field at the given coordinates.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Skew input onto the triangular lattice
        let stretch_offset = (x + y) * STRETCH;
        let xs = x + stretch_offset;
        let ys = y + stretch_offset;
        let mut xs_floor = xs.floor();
        let mut ys_floor = ys.floor();

        // Unskew the base lattice point back to input space
        let squish_offset = (xs_floor + ys_floor) * SQUISH;
        let mut dx0 = x - (xs_floor + squish_offset);
        let mut dy0 = y - (ys_floor + squish_offset);
        let frac_sum = (xs - xs_floor) + (ys - ys_floor);

        let mut value = 0.0;

        // Lattice point (+1, 0)
        let dx1 = dx0 - 1.0 - SQUISH;
        let dy1 = dy0 - SQUISH;
        value += self.contribution(xs_floor as i64 + 1, ys_floor as i64, dx1, dy1);

        // Lattice point (0, +1)
        let dx2 = dx0 - SQUISH;
        let dy2 = dy0 - 1.0 - SQUISH;
        value += self.contribution(xs_floor as i64, ys_floor as i64 + 1, dx2, dy2);

        // Third point: the base corner, or the far corner in the upper triangle
        if frac_sum > 1.0 {
            xs_floor += 1.0;
            ys_floor += 1.0;
            dx0 = dx0 - 1.0 - 2.0 * SQUISH;
            dy0 = dy0 - 1.0 - 2.0 * SQUISH;
        }
        value += self.contribution(xs_floor as i64, ys_floor as i64, dx0, dy0);

        value * NORM
    }

    /// Contribution of one lattice point: radially attenuated gradient dot.
    #[inline]
    fn contribution(&self, xb: i64, yb: i64, dx: f64, dy: f64) -> f64 {
        let attn = 2.0 - dx * dx - dy * dy;
        if attn <= 0.0 {
            return 0.0;
        }
        let (gx, gy) = GRADIENTS[(self.table.hash(xb, yb) % 8) as usize];
        let attn2 = attn * attn;
        attn2 * attn2 * (dx * gx + dy * gy)
    }
}

/// Per-octave sample offset, accumulated to decorrelate octaves.
const OCTAVE_OFFSET: f64 = 1.732_050_807_568_877_2; // sqrt(3)

/// Fractal (multi-octave) Brownian noise over [`GradientNoise`].
///
/// Sums `octaves` samples at increasing frequency and decreasing weight,
/// normalized by total weight so the output stays in [-1, 1].
pub struct Brownian {
    noise: GradientNoise,
    octaves: u32,
    frequency: f64,
    lacunarity: f64,
    persistence: f64,
}

impl Brownian {
    /// Creates a single-octave wrapper at unit frequency.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            noise: GradientNoise::new(seed),
            octaves: 1,
            frequency: 1.0,
            lacunarity: 2.2,
            persistence: 0.5,
        }
    }

    /// Sets the octave count.
    #[must_use]
    pub fn octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the base frequency.
    #[must_use]
    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the per-octave frequency multiplier.
    #[must_use]
    pub fn lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sets the per-octave weight multiplier.
    #[must_use]
    pub fn persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Samples the fractal field at the given coordinates.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut output = 0.0;
        let mut offset = OCTAVE_OFFSET;
        let mut frequency = self.frequency;
        let mut magnitude = 1.0;
        let mut total_magnitude = 0.0;

        for _ in 0..self.octaves {
            output += self.noise.sample(x * frequency + offset, y * frequency + offset) * magnitude;
            total_magnitude += magnitude;

            frequency *= self.lacunarity;
            magnitude *= self.persistence;
            offset += OCTAVE_OFFSET;
        }

        output / total_magnitude
    }
}
