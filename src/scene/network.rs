use glam::DVec2;
use rand::Rng;

use crate::color::Paint;
use crate::config::NetworkConfig;
use crate::scene::particle::Particle;
use crate::surface::Surface;

/// A line between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: DVec2,
    pub to: DVec2,
    pub alpha: f64,
}

/// Fixed population of ambient particles living on one canvas.
///
/// Particles drift, bounce at the edges, are pushed away from the pointer and
/// are linked by lines that fade out with distance.
#[derive(Debug)]
pub struct ParticleField {
    config: NetworkConfig,
    size: DVec2,
    pointer: Option<DVec2>,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        config: NetworkConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> Self {
        let [r, g, b] = config.rgb;
        let particles = (0..config.particle_count)
            .map(|_| {
                let position = DVec2::new(rng.r#gen::<f64>() * width, rng.r#gen::<f64>() * height);
                let velocity = DVec2::new(
                    rng.gen_range(-config.max_speed..=config.max_speed),
                    rng.gen_range(-config.max_speed..=config.max_speed),
                );
                let size = rng.gen_range(config.size[0]..=config.size[1]);
                let alpha = rng.gen_range(config.alpha[0]..=config.alpha[1]);
                Particle::node(position, velocity, size, Paint::rgba_u8(r, g, b, alpha))
            })
            .collect();

        log::debug!(
            "Particle field created: {} particles on {}x{}.",
            config.particle_count,
            width,
            height
        );

        Self {
            config,
            size: DVec2::new(width, height),
            pointer: None,
            particles,
        }
    }

    /// Positions are left alone; particles outside the new bounds bounce back in.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = DVec2::new(width, height);
    }

    pub fn set_pointer(&mut self, pointer: Option<DVec2>) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.update(self.size, 1.0);

            if let Some(pointer) = self.pointer {
                particle.velocity -= repulsion(
                    pointer - particle.position,
                    self.config.mouse_distance,
                    self.config.repulsion,
                );
            }
        }
    }

    /// Every unordered pair closer than the connection distance.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let max = self.config.connection_distance;
        self.particles.iter().enumerate().flat_map(move |(i, a)| {
            self.particles[i + 1..].iter().filter_map(move |b| {
                let distance = a.position.distance(b.position);
                (distance < max).then(|| Connection {
                    from: a.position,
                    to: b.position,
                    alpha: 1.0 - distance / max,
                })
            })
        })
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.size.x, self.size.y);

        for particle in &self.particles {
            particle.draw(surface);
        }

        let [r, g, b] = self.config.rgb;
        for connection in self.connections() {
            let paint = Paint::rgba_u8(r, g, b, connection.alpha as f32);
            surface.stroke_line(connection.from, connection.to, &paint, self.config.line_width);
        }
    }

    /// Body of the per-frame callback.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }
}

/// Velocity change pushing a particle away from the pointer.
///
/// `offset` points from the particle to the pointer. The result is what gets
/// subtracted from the velocity: zero at or beyond `radius`, growing linearly
/// to `strength` as the particle closes in. A particle sitting exactly on the
/// pointer has no direction to be pushed in and gets nothing.
pub fn repulsion(offset: DVec2, radius: f64, strength: f64) -> DVec2 {
    let distance = offset.length();
    if distance >= radius {
        return DVec2::ZERO;
    }
    let force = (radius - distance) / radius;
    offset.normalize_or_zero() * force * strength
}
