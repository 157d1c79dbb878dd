//! Pointer trail overlay
//!
//! Short-lived glow markers spawned along the pointer path. Each marker
//! fades in almost instantly, holds, then fades out; the live set is
//! capped and the oldest markers are force-removed when the pointer
//! moves faster than markers expire.

use std::time::{Duration, Instant};

use crate::render::{Canvas, Circle, Color, Point};

/// Live markers allowed at once
const MAX_MARKERS: usize = 20;

const FADE_IN: Duration = Duration::from_millis(10);
const HOLD: Duration = Duration::from_millis(200);
const FADE_OUT: Duration = Duration::from_millis(300);

/// Marker tint, a soft cyan distinct from the particle accent
const MARKER_COLOR: Color = Color {
    r: 96.0 / 255.0,
    g: 211.0 / 255.0,
    b: 248.0 / 255.0,
    a: 1.0,
};

const MARKER_RADIUS: f64 = 1.5;

#[derive(Debug, Clone, Copy)]
struct TrailMarker {
    pos: Point,
    spawned_at: Instant,
}

/// The pointer trail effect
#[derive(Debug, Default)]
pub struct CursorTrail {
    markers: Vec<TrailMarker>,
}

impl CursorTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a marker at the pointer position.
    ///
    /// When the cap is hit the oldest marker is removed regardless of its
    /// remaining lifetime.
    pub fn spawn(&mut self, pos: Point, now: Instant) {
        if self.markers.len() >= MAX_MARKERS {
            self.markers.remove(0);
        }
        self.markers.push(TrailMarker {
            pos,
            spawned_at: now,
        });
    }

    /// Drop markers whose fade-out has completed
    pub fn prune(&mut self, now: Instant) {
        let lifetime = FADE_IN + HOLD + FADE_OUT;
        self.markers
            .retain(|m| now.duration_since(m.spawned_at) < lifetime);
    }

    /// Live marker count
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Draw all live markers, oldest first
    pub fn draw(&self, canvas: &mut Canvas, now: Instant) {
        for marker in &self.markers {
            let age = now.duration_since(marker.spawned_at);
            let alpha = marker_alpha(age);
            if alpha > 0.0 {
                canvas.draw(
                    &Circle::new(marker.pos, MARKER_RADIUS, MARKER_COLOR.with_alpha(alpha))
                        .filled(),
                );
            }
        }
    }
}

/// Opacity over the marker lifetime: ramp up, hold, ramp down
fn marker_alpha(age: Duration) -> f32 {
    if age < FADE_IN {
        age.as_secs_f32() / FADE_IN.as_secs_f32()
    } else if age < FADE_IN + HOLD {
        1.0
    } else {
        let fade = age - FADE_IN - HOLD;
        if fade >= FADE_OUT {
            0.0
        } else {
            1.0 - fade.as_secs_f32() / FADE_OUT.as_secs_f32()
        }
    }
}
