//! Seedable pseudo-random number generation.
//!
//! [`SeededRandom`] wraps an sfc32 ("Simple Fast Counter") generator so that a
//! tree drawn from the same seed always consumes the exact same stream of
//! numbers. It is **not** suitable for cryptography or anything else where
//! predictability is a problem.

use std::f64::consts::PI;

use crate::error::RandomError;

/// Fixed constants mixed into the seed; changing them changes every tree.
const MAGIC: [u32; 4] = [0x9e37_79b9, 0x243f_6a88, 0xb7e1_5162, 0xdead_beef];

/// Outputs discarded right after seeding.
const WARM_UP: usize = 100;

/// Maximum number of Box–Muller attempts before [`SeededRandom::try_normal`] gives up.
pub const NORMAL_RETRY_LIMIT: u32 = 32;

/// 2^32 as a float, the divisor mapping a `u32` into `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// A deterministic sfc32 generator.
///
/// ### Fields
/// - `a`, `b`, `c` - Mixing registers.
/// - `d` - Counter register, incremented once per step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl SeededRandom {
    /// Creates a generator from `seed` and runs the warm-up draws.
    ///
    /// Two generators created from the same seed produce identical output
    /// forever.
    pub fn new(seed: u32) -> Self {
        let mut rng = Self {
            a: seed ^ MAGIC[0],
            b: seed ^ MAGIC[1],
            c: seed ^ MAGIC[2],
            d: seed ^ MAGIC[3],
        };
        for _ in 0..WARM_UP {
            rng.step();
        }
        rng
    }

    /// Advances the registers by one sfc32 step and returns the raw output.
    #[inline]
    fn step(&mut self) -> u32 {
        let mut t = self.a.wrapping_add(self.b);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21);
        self.d = self.d.wrapping_add(1);
        t = t.wrapping_add(self.d);
        self.c = self.c.wrapping_add(t);
        t
    }

    /// Returns a number in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / TWO_POW_32
    }

    /// Returns a number in `[min, max)`.
    #[inline]
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a number in `(0, 1)`, redrawing exact zeros.
    fn open_unit(&mut self) -> f64 {
        loop {
            let x = self.next_f64();
            if x > 0.0 {
                return x;
            }
        }
    }

    /// One Box–Muller draw rescaled to mean 0.5, or `None` if it landed
    /// outside `[0, 1]`.
    fn unit_normal_once(&mut self) -> Option<f64> {
        let u = self.open_unit();
        let v = self.open_unit();
        let z = (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos();
        let x = z / 10.0 + 0.5;
        (0.0..=1.0).contains(&x).then_some(x)
    }

    /// Returns an approximately normal number in `[min, max]` centred on
    /// their midpoint.
    ///
    /// Draws outside the range are rejected and retried up to
    /// [`NORMAL_RETRY_LIMIT`] times.
    ///
    /// ### Errors
    /// [`RandomError::RetriesExhausted`] if every attempt was rejected.
    pub fn try_normal(&mut self, min: f64, max: f64) -> Result<f64, RandomError> {
        self.try_normal_within(min, max, NORMAL_RETRY_LIMIT)
    }

    fn try_normal_within(&mut self, min: f64, max: f64, limit: u32) -> Result<f64, RandomError> {
        for _ in 0..limit {
            if let Some(x) = self.unit_normal_once() {
                return Ok(min + x * (max - min));
            }
        }
        Err(RandomError::RetriesExhausted { attempts: limit })
    }

    /// Like [`SeededRandom::try_normal`] but falls back to the midpoint of
    /// `[min, max]` when the retry budget runs out.
    pub fn normal(&mut self, min: f64, max: f64) -> f64 {
        self.normal_within(min, max, NORMAL_RETRY_LIMIT)
    }

    fn normal_within(&mut self, min: f64, max: f64, limit: u32) -> f64 {
        self.try_normal_within(min, max, limit).unwrap_or_else(|err| {
            tracing::warn!(%err, min, max, "normal sampler fell back to midpoint");
            min + 0.5 * (max - min)
        })
    }
}
