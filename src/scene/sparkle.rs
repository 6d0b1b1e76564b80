use glam::DVec2;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::color::Paint;
use crate::config::SparkleConfig;
use crate::scene::particle::Particle;
use crate::surface::Surface;

/// Short-lived particles spawned around the pointer and by explicit bursts.
#[derive(Debug)]
pub struct SparkleEmitter {
    config: SparkleConfig,
    size: DVec2,
    pointer: DVec2,
    particles: Vec<Particle>,
}

impl SparkleEmitter {
    pub fn new(config: SparkleConfig, width: f64, height: f64) -> Self {
        Self {
            config,
            size: DVec2::new(width, height),
            pointer: DVec2::ZERO,
            particles: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = DVec2::new(width, height);
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &SparkleConfig {
        &self.config
    }

    /// Records the pointer and occasionally drops a sparkle on it.
    ///
    /// Spawning is throttled by chance and stops altogether while the
    /// population is at `max_ambient`, whatever the event rate.
    pub fn pointer_moved<R: Rng + ?Sized>(&mut self, position: DVec2, rng: &mut R) -> bool {
        self.pointer = position;

        if self.particles.len() < self.config.max_ambient
            && rng.r#gen::<f64>() > self.config.spawn_threshold
        {
            self.spawn(position, None, rng);
            return true;
        }
        false
    }

    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        position: DVec2,
        paint: Option<Paint>,
        rng: &mut R,
    ) {
        let particle = self.make_particle(position, paint, rng);
        self.particles.push(particle);
    }

    /// Adds `count` faster, larger sparkles at `position` right away.
    ///
    /// Not bound by `max_ambient`.
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        position: DVec2,
        paint: Option<Paint>,
        count: usize,
        rng: &mut R,
    ) {
        self.particles.reserve(count);
        for _ in 0..count {
            let mut particle = self.make_particle(position, paint.clone(), rng);
            particle.velocity *= self.config.burst_speed_scale;
            particle.size *= self.config.burst_size_scale;
            self.particles.push(particle);
        }
        log::debug!(
            "Sparkle burst of {} at ({}, {}), {} alive.",
            count,
            position.x,
            position.y,
            self.particles.len()
        );
    }

    /// Burst of `burst_count` sparkles.
    pub fn burst_default<R: Rng + ?Sized>(
        &mut self,
        position: DVec2,
        paint: Option<Paint>,
        rng: &mut R,
    ) {
        self.burst(position, paint, self.config.burst_count, rng);
    }

    /// Body of the per-frame callback: clear, update and draw every sparkle,
    /// dropping the ones whose life ran out.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.size.x, self.size.y);

        // Backwards, so removing by index never skips a particle.
        for i in (0..self.particles.len()).rev() {
            let particle = &mut self.particles[i];
            particle.update(self.size, self.config.shrink);
            particle.draw(surface);

            if !particle.is_alive() {
                self.particles.remove(i);
            }
        }
    }

    fn make_particle<R: Rng + ?Sized>(
        &self,
        position: DVec2,
        paint: Option<Paint>,
        rng: &mut R,
    ) -> Particle {
        let config = &self.config;
        let size = rng.gen_range(config.size[0]..=config.size[1]);
        let velocity = DVec2::new(
            rng.gen_range(-config.max_speed..=config.max_speed),
            rng.gen_range(-config.max_speed..=config.max_speed),
        );
        let decay = rng.gen_range(config.decay[0]..=config.decay[1]);
        let paint = paint.unwrap_or_else(|| {
            let hue = config.hues.choose(rng).copied().unwrap_or(0.0);
            Paint::hsla(hue, config.saturation, config.lightness, 1.0)
        });
        Particle::sparkle(position, velocity, size, paint, decay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::particle::Behavior;
    use crate::surface::{DrawCommand, Recorder};
    use rand::{SeedableRng, rngs::StdRng};

    fn emitter() -> SparkleEmitter {
        SparkleEmitter::new(SparkleConfig::default(), 1280.0, 720.0)
    }

    /// Draws are in `[0, 1)`, so -1 always spawns and 1 never does.
    fn emitter_with_threshold(spawn_threshold: f64) -> SparkleEmitter {
        let config = SparkleConfig { spawn_threshold, ..SparkleConfig::default() };
        SparkleEmitter::new(config, 1280.0, 720.0)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn spawn_uses_palette_and_ranges() {
        let mut e = emitter();
        let mut rng = rng();
        for _ in 0..200 {
            e.spawn(DVec2::new(5.0, 6.0), None, &mut rng);
        }
        let palette = &e.config().hues;
        for p in e.particles() {
            assert_eq!(p.position, DVec2::new(5.0, 6.0));
            assert!((1.0..=4.0).contains(&p.size));
            assert!(p.velocity.x.abs() <= 1.0 && p.velocity.y.abs() <= 1.0);
            assert_eq!(p.life(), 1.0);
            match p.behavior {
                Behavior::Fade { decay, .. } => assert!((0.01..=0.03).contains(&decay)),
                Behavior::Bounce => panic!("sparkles fade"),
            }
            let hue = p.paint.hue().unwrap();
            assert!(palette.iter().any(|h| (h - hue).abs() < 1e-3), "hue {hue}");
            assert_eq!(p.paint.alpha(), Some(1.0));
        }
    }

    #[test]
    fn explicit_paint_wins() {
        let mut e = emitter();
        e.spawn(DVec2::ZERO, Some(Paint::parse("gold")), &mut rng());
        assert_eq!(e.particles()[0].paint, Paint::Css("gold".into()));
    }

    #[test]
    fn pointer_moves_spawn_only_past_threshold() {
        let mut rng = rng();
        let mut never = emitter_with_threshold(1.0);
        for _ in 0..100 {
            assert!(!never.pointer_moved(DVec2::new(3.0, 4.0), &mut rng));
        }
        assert!(never.is_empty());
        assert_eq!(never.pointer(), DVec2::new(3.0, 4.0));

        let mut e = emitter_with_threshold(-1.0);
        assert!(e.pointer_moved(DVec2::new(7.0, 8.0), &mut rng));
        assert_eq!(e.len(), 1);
        assert_eq!(e.particles()[0].position, DVec2::new(7.0, 8.0));
    }

    #[test]
    fn pointer_moves_never_exceed_ambient_cap() {
        let mut e = emitter_with_threshold(-1.0);
        let mut rng = rng();
        for i in 0..500 {
            e.pointer_moved(DVec2::new(i as f64, 0.0), &mut rng);
            assert!(e.len() <= 50);
        }
        assert_eq!(e.len(), 50);
    }

    #[test]
    fn spawn_rate_is_roughly_one_in_ten() {
        let mut e = SparkleEmitter::new(
            SparkleConfig { max_ambient: usize::MAX, ..SparkleConfig::default() },
            100.0,
            100.0,
        );
        let mut rng = rng();
        let spawned = (0..10_000)
            .filter(|_| e.pointer_moved(DVec2::ZERO, &mut rng))
            .count();
        assert!((800..1200).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn burst_adds_fast_particles_immediately() {
        let mut e = emitter();
        let mut reference = emitter();
        let mut a = rng();
        let mut b = rng();

        e.burst(DVec2::new(200.0, 200.0), Some(Paint::parse("red")), 12, &mut a);
        for _ in 0..12 {
            reference.spawn(DVec2::new(200.0, 200.0), Some(Paint::parse("red")), &mut b);
        }

        assert_eq!(e.len(), 12);
        for (burst, plain) in e.particles().iter().zip(reference.particles()) {
            assert_eq!(burst.position, DVec2::new(200.0, 200.0));
            assert_eq!(burst.paint, Paint::Css("red".into()));
            assert!((burst.velocity.length() - 4.0 * plain.velocity.length()).abs() < 1e-9);
            assert!((burst.size - 1.5 * plain.size).abs() < 1e-9);
        }
    }

    #[test]
    fn burst_ignores_ambient_cap() {
        let mut e = emitter_with_threshold(-1.0);
        let mut rng = rng();
        for _ in 0..50 {
            e.pointer_moved(DVec2::ZERO, &mut rng);
        }
        e.burst_default(DVec2::ZERO, None, &mut rng);
        assert_eq!(e.len(), 62);
    }

    #[test]
    fn frame_fades_then_removes() {
        let mut e = emitter();
        e.spawn(DVec2::ZERO, None, &mut rng());
        let decay = match e.particles()[0].behavior {
            Behavior::Fade { decay, .. } => decay,
            Behavior::Bounce => unreachable!(),
        };

        let mut recorder = Recorder::default();
        let mut previous = 1.0;
        let mut frames = 0;
        while !e.is_empty() {
            e.frame(&mut recorder);
            frames += 1;
            if let Some(p) = e.particles().first() {
                assert!(p.life() > 0.0);
                assert!((previous - p.life() - decay).abs() < 1e-12);
                previous = p.life();
            }
        }
        let expected = 1.0 / decay;
        assert!(frames as f64 >= expected - 1e-6 && (frames as f64) < expected + 1.0);

        // The last frame still drew the particle, at zero alpha at worst.
        let last_circle = recorder.circles().last().unwrap();
        match last_circle {
            DrawCommand::Circle { alpha, .. } => assert!(*alpha >= 0.0),
            _ => unreachable!(),
        }

        recorder.commands.clear();
        e.frame(&mut recorder);
        assert_eq!(recorder.circles().count(), 0);
    }

    #[test]
    fn removal_keeps_every_survivor() {
        let mut e = emitter();
        let mut rng = rng();
        for i in 0..10 {
            e.spawn(DVec2::new(i as f64, 0.0), None, &mut rng);
        }
        // Kill every other particle on the next frame.
        for (i, p) in e.particles.iter_mut().enumerate() {
            if i % 2 == 0 {
                p.behavior = Behavior::Fade { life: 0.001, decay: 0.01 };
            }
        }

        let mut recorder = Recorder::default();
        e.frame(&mut recorder);

        assert_eq!(recorder.circles().count(), 10);
        assert_eq!(e.len(), 5);
        assert!(e.particles().iter().all(|p| p.life() > 0.0));
    }

    #[test]
    fn resize_keeps_positions() {
        let mut e = emitter();
        e.spawn(DVec2::new(1000.0, 700.0), None, &mut rng());
        e.resize(320.0, 240.0);
        assert_eq!(e.size(), DVec2::new(320.0, 240.0));
        assert_eq!(e.particles()[0].position, DVec2::new(1000.0, 700.0));
    }
}
