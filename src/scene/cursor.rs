use glam::DVec2;

use crate::config::CursorConfig;

/// Positions of the two custom cursor elements.
///
/// The dot sits exactly on the pointer; the ring trails it through a
/// first-order low-pass filter.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    smoothing: f64,
    target: DVec2,
    ring: DVec2,
    dot: DVec2,
}

impl CursorFollower {
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing,
            target: DVec2::ZERO,
            ring: DVec2::ZERO,
            dot: DVec2::ZERO,
        }
    }

    pub fn from_config(config: &CursorConfig) -> Self {
        Self::new(config.smoothing)
    }

    pub fn pointer_moved(&mut self, position: DVec2) {
        self.target = position;
        self.dot = position;
    }

    pub fn step(&mut self) {
        self.ring += (self.target - self.ring) * self.smoothing;
    }

    pub fn target(&self) -> DVec2 {
        self.target
    }

    pub fn ring(&self) -> DVec2 {
        self.ring
    }

    pub fn dot(&self) -> DVec2 {
        self.dot
    }
}

/// Hero background parallax shift for the layer at `index`.
pub fn parallax_offset(
    pointer: DVec2,
    viewport: DVec2,
    index: usize,
    config: &CursorConfig,
) -> DVec2 {
    let shift = (pointer - viewport / 2.0) * config.parallax_factor;
    shift * ((index + 1) as f64 * config.parallax_layer_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_snaps_ring_lags() {
        let mut cursor = CursorFollower::from_config(&CursorConfig::default());
        cursor.pointer_moved(DVec2::new(100.0, 40.0));

        assert_eq!(cursor.dot(), DVec2::new(100.0, 40.0));
        assert_eq!(cursor.ring(), DVec2::ZERO);

        cursor.step();
        assert!((cursor.ring().x - 15.0).abs() < 1e-12);
        assert!((cursor.ring().y - 6.0).abs() < 1e-12);
    }

    #[test]
    fn ring_converges_geometrically_without_overshoot() {
        let mut cursor = CursorFollower::new(0.15);
        let target = DVec2::new(-300.0, 500.0);
        cursor.pointer_moved(target);

        let mut error = target.length();
        for _ in 0..100 {
            cursor.step();
            let next = (target - cursor.ring()).length();
            assert!((next - error * 0.85).abs() < 1e-9 * error.max(1.0));
            // Same side of the target on both axes.
            assert!(cursor.ring().x >= target.x && cursor.ring().y <= target.y);
            error = next;
        }
        assert!(error < 1e-4);
    }

    #[test]
    fn parallax_scales_per_layer() {
        let config = CursorConfig::default();
        let viewport = DVec2::new(1000.0, 800.0);
        let pointer = DVec2::new(700.0, 200.0);

        let first = parallax_offset(pointer, viewport, 0, &config);
        let second = parallax_offset(pointer, viewport, 1, &config);

        assert!((first.x - 1.0).abs() < 1e-12);
        assert!((first.y + 1.0).abs() < 1e-12);
        assert!((second - first * 2.0).length() < 1e-12);
        assert_eq!(parallax_offset(viewport / 2.0, viewport, 3, &config), DVec2::ZERO);
    }
}
