//! Procedural spiral particle field.
//!
//! The field is a thin disk of particles laid out along `arm_count`
//! interleaved spiral arms. Each particle draws a random spiral parameter
//! `t ∈ [0, 1)` which fixes both how far out it sits and how far around the
//! spiral it has wound:
//!
//! ```text
//! angle  = t * TAU * arm_count + arm_offset(i)
//! radius = t * max_radius
//! ```
//!
//! `arm_offset(i) = (i % arm_count) * TAU / arm_count` deals particles out to
//! the arms round-robin, so every arm gets the same share. Positions are fixed
//! once generated; colors start as a core-to-rim hue gradient and are
//! rewritten in place by the rainbow sweep.
//!
//! # Example
//!
//! ```
//! use pinchfield::{spiral, Config};
//!
//! let field = spiral::generate(&Config { particle_count: 1000, ..Config::default() });
//! assert_eq!(field.len(), 1000);
//! assert_eq!(field.positions().len(), field.colors().len());
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::color::{hsl_to_rgb, spiral_hue};
use crate::config::Config;

/// Shape parameters the field was generated with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralParams {
    pub arm_count: u32,
    pub tightness: f32,
    pub max_radius: f32,
}

impl SpiralParams {
    /// Angular offset of the arm that particle `index` belongs to.
    #[inline]
    pub fn arm_offset(&self, index: usize) -> f32 {
        self.arm_of(index) as f32 * (TAU / self.arm_count as f32)
    }

    /// Arm that particle `index` is dealt to.
    #[inline]
    pub fn arm_of(&self, index: usize) -> u32 {
        (index % self.arm_count as usize) as u32
    }
}

impl From<&Config> for SpiralParams {
    fn from(config: &Config) -> Self {
        Self {
            arm_count: config.spiral_arms.max(1),
            tightness: config.spiral_tightness,
            max_radius: config.max_radius,
        }
    }
}

/// Particle positions and colors, ready to hand to the renderer.
///
/// `positions`, `colors` and the per-particle spiral parameters always have
/// the same length.
#[derive(Clone, Debug)]
pub struct ParticleField {
    params: SpiralParams,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    spiral_t: Vec<f32>,
}

impl ParticleField {
    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the field has no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn params(&self) -> &SpiralParams {
        &self.params
    }

    /// Particle positions in model space.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Particle colors, RGB in `0.0..=1.0`.
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Mutable access to the color buffer. Positions stay fixed.
    pub fn colors_mut(&mut self) -> &mut [Vec3] {
        &mut self.colors
    }

    /// Spiral parameter `t` each particle was placed with.
    pub fn spiral_t(&self) -> &[f32] {
        &self.spiral_t
    }

    /// Distance of particle `index` from the spin axis (the disk's y axis).
    pub fn planar_radius(&self, index: usize) -> f32 {
        let p = self.positions[index];
        (p.x * p.x + p.z * p.z).sqrt()
    }
}

/// Generate a field from `config` using a fresh entropy-seeded RNG.
///
/// The overall shape is the same on every call; the per-particle jitter is not.
pub fn generate(config: &Config) -> ParticleField {
    let mut rng = SmallRng::from_entropy();
    generate_with_rng(config, &mut rng)
}

/// Generate a field drawing all randomness from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> ParticleField {
    let params = SpiralParams::from(config);
    let count = config.particle_count;

    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    let mut spiral_t = Vec::with_capacity(count);

    for i in 0..count {
        let t: f32 = rng.gen();
        let angle = t * TAU * params.arm_count as f32 + params.arm_offset(i);
        let radius = t * params.max_radius;
        let y = (rng.gen::<f32>() - 0.5) * 2.0 * config.vertical_jitter;

        positions.push(Vec3::new(angle.cos() * radius, y, angle.sin() * radius));
        colors.push(hsl_to_rgb(
            spiral_hue(t, config.hue_base, config.hue_span),
            config.saturation,
            config.lightness,
        ));
        spiral_t.push(t);
    }

    ParticleField {
        params,
        positions,
        colors,
        spiral_t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        Config {
            particle_count: 2_000,
            ..Config::default()
        }
    }

    fn seeded(config: &Config, seed: u64) -> ParticleField {
        generate_with_rng(config, &mut SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn test_buffers_fully_populated() {
        let field = seeded(&small_config(), 7);
        assert_eq!(field.len(), 2_000);
        assert_eq!(field.positions().len(), 2_000);
        assert_eq!(field.colors().len(), 2_000);
        assert_eq!(field.spiral_t().len(), 2_000);
        assert!(field.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_radius_follows_spiral_parameter() {
        let config = small_config();
        let field = seeded(&config, 1);
        for i in 0..field.len() {
            let expected = field.spiral_t()[i] * config.max_radius;
            assert!((field.planar_radius(i) - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_disk_is_thin() {
        let config = small_config();
        let field = seeded(&config, 2);
        assert!(field
            .positions()
            .iter()
            .all(|p| p.y.abs() <= config.vertical_jitter));
    }

    #[test]
    fn test_particles_sit_on_their_arm() {
        let config = small_config();
        let field = seeded(&config, 3);
        let params = field.params();
        let arm_width = TAU / params.arm_count as f32;

        for i in 0..field.len() {
            // Angle is ill-defined right at the core
            if field.planar_radius(i) < 0.05 {
                continue;
            }
            let p = field.positions()[i];
            let wound = field.spiral_t()[i] * TAU * params.arm_count as f32;
            let offset = (p.z.atan2(p.x) - wound).rem_euclid(TAU);
            let arm = (offset / arm_width).round() as u32 % params.arm_count;
            assert_eq!(arm, params.arm_of(i), "particle {} on wrong arm", i);
        }
    }

    #[test]
    fn test_arms_share_particles_evenly() {
        let config = Config {
            particle_count: 1_003,
            ..Config::default()
        };
        let field = seeded(&config, 4);
        let mut per_arm = vec![0usize; config.spiral_arms as usize];
        for i in 0..field.len() {
            per_arm[field.params().arm_of(i) as usize] += 1;
        }
        let min = *per_arm.iter().min().unwrap();
        let max = *per_arm.iter().max().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_colors_follow_radial_hue() {
        let config = small_config();
        let field = seeded(&config, 5);
        for i in (0..field.len()).step_by(97) {
            let t = field.spiral_t()[i];
            let expected = hsl_to_rgb(
                spiral_hue(t, config.hue_base, config.hue_span),
                config.saturation,
                config.lightness,
            );
            assert!((field.colors()[i] - expected).abs().max_element() < 1e-6);
            assert!(field.colors()[i].min_element() >= 0.0);
            assert!(field.colors()[i].max_element() <= 1.0);
        }
    }

    #[test]
    fn test_generations_differ() {
        let config = small_config();
        let a = generate(&config);
        let b = generate(&config);
        assert_ne!(a.positions(), b.positions());
    }
}
