//! Particle color rules.
//!
//! Colors are produced in HSL with a fixed saturation and lightness; only the
//! hue varies. Two hue rules exist: the static radial gradient baked in at
//! generation time, and the rotating rainbow sweep shown while pinching.

use glam::Vec3;

/// Convert HSL to RGB. All components are in `0.0..=1.0`; hue wraps.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;

    Vec3::new(
        hue_channel(q, p, h + 1.0 / 3.0),
        hue_channel(q, p, h),
        hue_channel(q, p, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Hue of a particle at spiral parameter `t`: shifts from `base` at the core
/// by `span` toward the rim, wrapping around the hue circle.
#[inline]
pub fn spiral_hue(t: f32, base: f32, span: f32) -> f32 {
    (t * span + base).rem_euclid(1.0)
}

/// Hue of particle `index` in the rainbow sweep at `time_secs`.
///
/// Evaluated in `f64` so long-running clocks keep full hue resolution.
#[inline]
pub fn sweep_hue(index: usize, count: usize, time_secs: f64, turns_per_sec: f32) -> f32 {
    let offset = index as f64 / count.max(1) as f64;
    (offset + time_secs * turns_per_sec as f64).rem_euclid(1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsl_gray_when_unsaturated() {
        assert!(close(hsl_to_rgb(0.42, 0.0, 0.3), Vec3::splat(0.3)));
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert!(close(hsl_to_rgb(1.25, 0.8, 0.6), hsl_to_rgb(0.25, 0.8, 0.6)));
        assert!(close(hsl_to_rgb(-0.75, 0.8, 0.6), hsl_to_rgb(0.25, 0.8, 0.6)));
    }

    #[test]
    fn test_field_palette_cyan() {
        // Core color of the default spiral: hue 0.5, s 0.8, l 0.6
        let c = hsl_to_rgb(0.5, 0.8, 0.6);
        assert!(close(c, Vec3::new(0.28, 0.92, 0.92)));
    }

    #[test]
    fn test_spiral_hue_wraps_past_one() {
        assert!((spiral_hue(0.0, 0.5, 0.3) - 0.5).abs() < 1e-6);
        assert!((spiral_hue(1.0, 0.5, 0.3) - 0.8).abs() < 1e-6);
        assert!((spiral_hue(1.0, 0.9, 0.3) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_sweep_hue_rotates_with_time() {
        assert!((sweep_hue(0, 100, 0.0, 0.1)).abs() < 1e-6);
        assert!((sweep_hue(50, 100, 0.0, 0.1) - 0.5).abs() < 1e-6);
        // Five seconds at 0.1 turns/s shifts every hue by half a turn
        assert!((sweep_hue(0, 100, 5.0, 0.1) - 0.5).abs() < 1e-6);
        assert!((sweep_hue(50, 100, 5.0, 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_sweep_hue_large_clock() {
        let h = sweep_hue(25, 100, 1.7e9, 0.5);
        assert!((0.0..1.0).contains(&h));
        assert!((h - 0.25).abs() < 1e-4);
    }
}
