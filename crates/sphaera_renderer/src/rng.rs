//! Per-pixel random numbers and rejection samplers.
//!
//! Every (pixel, pass) pair gets its own small, stack-allocated generator,
//! so work items never share RNG state and results do not depend on the
//! order in which tiles are scheduled.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sphaera_math::{Vec2, Vec3};

/// Upper bound on rejection-sampling attempts.
///
/// When every attempt is rejected the last candidate is returned as-is,
/// which keeps the per-call cost constant.
pub const MAX_REJECTION_ATTEMPTS: u32 = 16;

/// A source of uniform floats in [0, 1).
pub trait UniformSource {
    fn next_float(&mut self) -> f32;

    #[inline]
    fn next_float2(&mut self) -> Vec2 {
        let x = self.next_float();
        let y = self.next_float();
        Vec2::new(x, y)
    }

    #[inline]
    fn next_float3(&mut self) -> Vec3 {
        let x = self.next_float();
        let y = self.next_float();
        let z = self.next_float();
        Vec3::new(x, y, z)
    }
}

/// Fast, non-cryptographic generator seeded from a pass seed, pixel
/// coordinates and pass index.
#[derive(Debug, Clone)]
pub struct PixelRng {
    inner: SmallRng,
}

impl PixelRng {
    /// Generator for pixel (x, y) in the given pass.
    ///
    /// The pass seed is folded with each coordinate and with the pass index
    /// into three integer seeds, which are then mixed into one state.
    pub fn for_pixel(seed: u64, x: u32, y: u32, pass_index: u32) -> Self {
        let seed_x = seed ^ u64::from(x);
        // Rotated so that (x, y) and (y, x) get different streams
        let seed_y = seed.rotate_left(32) ^ u64::from(y);
        let seed_pass = u64::from(pass_index);

        let mixed = splitmix64(splitmix64(splitmix64(seed_x) ^ seed_y) ^ seed_pass);
        Self::from_seed(mixed)
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for PixelRng {
    #[inline]
    fn next_float(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }
}

/// SplitMix64 finalizer.
#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Sample a point in the unit disk by rejection from [-1, 1]².
pub fn random_in_unit_disk<S: UniformSource + ?Sized>(rng: &mut S) -> Vec2 {
    let mut p = Vec2::ZERO;
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        p = rng.next_float2() * 2.0 - Vec2::ONE;
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    p
}

/// Sample a point in the unit ball by rejection from [-1, 1]³.
pub fn random_in_unit_sphere<S: UniformSource + ?Sized>(rng: &mut S) -> Vec3 {
    let mut p = Vec3::ZERO;
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        p = rng.next_float3() * 2.0 - Vec3::ONE;
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the same value and counts draws.
    struct Constant {
        value: f32,
        draws: u32,
    }

    impl UniformSource for Constant {
        fn next_float(&mut self) -> f32 {
            self.draws += 1;
            self.value
        }
    }

    #[test]
    fn test_floats_in_unit_range() {
        let mut rng = PixelRng::for_pixel(12345, 3, 7, 0);
        for _ in 0..10_000 {
            let f = rng.next_float();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_same_inputs_same_stream() {
        let mut a = PixelRng::for_pixel(99, 10, 20, 5);
        let mut b = PixelRng::for_pixel(99, 10, 20, 5);
        for _ in 0..32 {
            assert_eq!(a.next_float(), b.next_float());
        }
    }

    #[test]
    fn test_streams_differ_per_pixel_and_pass() {
        let first = |x, y, pass| PixelRng::for_pixel(99, x, y, pass).next_float3();

        let base = first(10, 20, 5);
        assert_ne!(base, first(11, 20, 5));
        assert_ne!(base, first(10, 21, 5));
        assert_ne!(base, first(10, 20, 6));
        // Swapped coordinates must not collide
        assert_ne!(first(1, 2, 0), first(2, 1, 0));
    }

    #[test]
    fn test_unit_disk_samples() {
        let mut rng = PixelRng::from_seed(7);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_unit_sphere_samples() {
        let mut rng = PixelRng::from_seed(8);
        let mut mean = Vec3::ZERO;
        for _ in 0..4000 {
            let p = random_in_unit_sphere(&mut rng);
            assert!(p.length_squared() < 1.0);
            mean += p;
        }
        mean /= 4000.0;
        assert!(mean.length() < 0.05, "mean {:?} should be near zero", mean);
    }

    #[test]
    fn test_rejection_cap_returns_last_candidate() {
        // 0.99 maps to 0.98 on every axis, which is always outside the disk/ball
        let mut source = Constant { value: 0.99, draws: 0 };
        let p = random_in_unit_disk(&mut source);
        assert_eq!(source.draws, 2 * MAX_REJECTION_ATTEMPTS);
        assert!(p.length_squared() >= 1.0);

        let mut source = Constant { value: 0.99, draws: 0 };
        let p = random_in_unit_sphere(&mut source);
        assert_eq!(source.draws, 3 * MAX_REJECTION_ATTEMPTS);
        assert!(p.length_squared() >= 1.0);
    }

    #[test]
    fn test_accepted_sample_stops_early() {
        let mut source = Constant { value: 0.5, draws: 0 };
        assert_eq!(random_in_unit_sphere(&mut source), Vec3::ZERO);
        assert_eq!(source.draws, 3);
    }
}
