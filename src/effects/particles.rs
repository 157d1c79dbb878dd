//! Particle field backdrop
//!
//! A drifting constellation of translucent dots with proximity links and
//! gentle pointer attraction. The simulation is sized to the drawing
//! surface and regenerated wholesale on resize; individual particles do
//! not survive a dimension change.

use rand::Rng;

use crate::render::{Canvas, Circle, Color, Line, Point};

/// Particle count below the narrow-surface threshold
const NARROW_COUNT: usize = 50;
/// Particle count at or above the threshold
const WIDE_COUNT: usize = 100;
/// Surface width below which the sparse population is used
const NARROW_WIDTH: f64 = 768.0;

/// Pairs closer than this get a link line
const LINK_DISTANCE: f64 = 150.0;
/// Pointer influence radius
const POINTER_RADIUS: f64 = 100.0;
/// Velocity gain applied per frame toward the pointer, undamped
const ATTRACTION_GAIN: f64 = 0.0001;

/// Accent blue shared by dots and links
const PARTICLE_COLOR: Color = Color {
    r: 59.0 / 255.0,
    g: 130.0 / 255.0,
    b: 246.0 / 255.0,
    a: 1.0,
};

/// One simulated particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f32,
}

/// The full particle simulation
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    pointer: Option<Point>,
    paused: bool,
}

impl ParticleField {
    /// Create a field sized to the drawing surface
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_rng(width, height, &mut rand::rng())
    }

    /// Create a field with an explicit RNG (deterministic in tests)
    pub fn with_rng<R: Rng>(width: f64, height: f64, rng: &mut R) -> Self {
        Self {
            particles: spawn_particles(width, height, rng),
            width,
            height,
            pointer: None,
            paused: false,
        }
    }

    /// Particles in simulation order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Update the pointer position feeding the attraction force
    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Freeze or resume the simulation
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Resize the surface, regenerating the whole population
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.particles = spawn_particles(width, height, &mut rand::rng());
    }

    /// Advance the simulation one frame.
    ///
    /// Order per particle: pointer attraction, position update, then
    /// boundary reflection. The reflection only flips velocity; the
    /// position is left where it landed and recovers next frame.
    pub fn step(&mut self) {
        if self.paused {
            return;
        }

        for p in &mut self.particles {
            if let Some(pointer) = self.pointer {
                let dx = pointer.x - p.x;
                let dy = pointer.y - p.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < POINTER_RADIUS {
                    p.vx += dx * ATTRACTION_GAIN;
                    p.vy += dy * ATTRACTION_GAIN;
                }
            }

            p.x += p.vx;
            p.y += p.vy;

            if p.x < 0.0 || p.x > self.width {
                p.vx = -p.vx;
            }
            if p.y < 0.0 || p.y > self.height {
                p.vy = -p.vy;
            }
        }
    }

    /// Unique close pairs with their link opacity.
    ///
    /// Each unordered pair appears at most once; opacity falls linearly
    /// from 0.1 at zero distance to 0.0 at the link cutoff.
    pub fn link_pairs(&self) -> Vec<(usize, usize, f32)> {
        let mut pairs = Vec::new();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = &self.particles[i];
                let b = &self.particles[j];
                let dx = a.x - b.x;
                let dy = a.y - b.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < LINK_DISTANCE {
                    let opacity = 0.1 * (1.0 - dist / LINK_DISTANCE) as f32;
                    pairs.push((i, j, opacity));
                }
            }
        }
        pairs
    }

    /// Draw links then dots into the canvas
    pub fn draw(&self, canvas: &mut Canvas) {
        for (i, j, opacity) in self.link_pairs() {
            let a = &self.particles[i];
            let b = &self.particles[j];
            canvas.draw(&Line::new(
                Point::new(a.x, a.y),
                Point::new(b.x, b.y),
                PARTICLE_COLOR.with_alpha(opacity),
            ));
        }

        for p in &self.particles {
            canvas.draw(
                &Circle::new(
                    Point::new(p.x, p.y),
                    p.size,
                    PARTICLE_COLOR.with_alpha(p.opacity),
                )
                .filled(),
            );
        }
    }
}

fn spawn_particles<R: Rng>(width: f64, height: f64, rng: &mut R) -> Vec<Particle> {
    let count = if width < NARROW_WIDTH {
        NARROW_COUNT
    } else {
        WIDE_COUNT
    };

    (0..count)
        .map(|_| Particle {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            vx: (rng.random::<f64>() - 0.5) * 0.5,
            vy: (rng.random::<f64>() - 0.5) * 0.5,
            size: rng.random::<f64>() * 2.0 + 1.0,
            opacity: (rng.random::<f64>() * 0.5 + 0.2) as f32,
        })
        .collect()
}
