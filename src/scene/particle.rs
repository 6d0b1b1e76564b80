use glam::DVec2;

use crate::color::Paint;
use crate::surface::Surface;

/// How a particle evolves between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Lives forever and reflects its velocity at the field bounds.
    Bounce,
    /// Loses `decay` life per frame and shrinks; dead once `life <= 0`.
    Fade { life: f64, decay: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: f64,
    pub paint: Paint,
    pub behavior: Behavior,
}

impl Particle {
    pub fn node(position: DVec2, velocity: DVec2, size: f64, paint: Paint) -> Self {
        Self {
            position,
            velocity,
            size,
            paint,
            behavior: Behavior::Bounce,
        }
    }

    pub fn sparkle(position: DVec2, velocity: DVec2, size: f64, paint: Paint, decay: f64) -> Self {
        Self {
            position,
            velocity,
            size,
            paint,
            behavior: Behavior::Fade { life: 1.0, decay },
        }
    }

    /// Remaining life; bouncing particles are always fully alive.
    pub fn life(&self) -> f64 {
        match self.behavior {
            Behavior::Bounce => 1.0,
            Behavior::Fade { life, .. } => life,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life() > 0.0
    }

    /// One Euler step. `bounds` is only consulted by bouncing particles,
    /// `shrink` only by fading ones.
    pub fn update(&mut self, bounds: DVec2, shrink: f64) {
        self.position += self.velocity;

        match &mut self.behavior {
            Behavior::Bounce => {
                // No clamping: a particle may sit outside for a frame.
                if self.position.x < 0.0 || self.position.x > bounds.x {
                    self.velocity.x = -self.velocity.x;
                }
                if self.position.y < 0.0 || self.position.y > bounds.y {
                    self.velocity.y = -self.velocity.y;
                }
            }
            Behavior::Fade { life, decay } => {
                *life -= *decay;
                self.size *= shrink;
            }
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(
            self.position,
            self.size.max(0.0),
            &self.paint,
            self.life().max(0.0),
        );
    }
}
