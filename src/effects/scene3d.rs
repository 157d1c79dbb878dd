//! Rotating wireframe room
//!
//! A slowly spinning box rendered with perspective projection, standing
//! in for the interactive room scene. Twelve edges, one rotation axis,
//! no depth sorting; the anti-aliased line primitive carries the look.

use crate::render::{Canvas, Color, Line, Point};

/// Y-axis rotation advance per frame, in radians
const SPIN_RATE: f64 = 0.02;
/// Fixed downward tilt so the floor reads as a floor
const TILT: f64 = 0.35;
/// Camera distance from the box center, in box units
const CAMERA_DISTANCE: f64 = 4.0;

const EDGE_COLOR: Color = Color {
    r: 120.0 / 255.0,
    g: 160.0 / 255.0,
    b: 255.0 / 255.0,
    a: 0.9,
};

/// Unit-box corner list
const VERTICES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Corner index pairs forming the wireframe
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// The animated room scene
#[derive(Debug, Default)]
pub struct WireframeRoom {
    angle: f64,
}

impl WireframeRoom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rotation angle in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Advance the rotation one frame
    pub fn step(&mut self) {
        self.angle = (self.angle + SPIN_RATE) % std::f64::consts::TAU;
    }

    /// Draw the room into the canvas, centered and scaled to fit
    pub fn draw(&self, canvas: &mut Canvas) {
        let width = f64::from(canvas.width);
        let height = f64::from(canvas.height);
        if width < 4.0 || height < 4.0 {
            return;
        }

        let center_x = width / 2.0;
        let center_y = height / 2.0;
        let scale = width.min(height) * 0.9;

        let projected: Vec<Point> = VERTICES
            .iter()
            .map(|v| self.project(v, center_x, center_y, scale))
            .collect();

        for (a, b) in EDGES {
            canvas.draw(&Line::new(projected[a], projected[b], EDGE_COLOR));
        }
    }

    /// Rotate around Y, tilt around X, then perspective-divide
    fn project(&self, v: &[f64; 3], center_x: f64, center_y: f64, scale: f64) -> Point {
        let (sin_a, cos_a) = self.angle.sin_cos();
        let x = v[0] * cos_a - v[2] * sin_a;
        let z = v[0] * sin_a + v[2] * cos_a;

        let (sin_t, cos_t) = TILT.sin_cos();
        let y = v[1] * cos_t - z * sin_t;
        let z = v[1] * sin_t + z * cos_t;

        let depth = z + CAMERA_DISTANCE;
        Point::new(
            center_x + x / depth * scale,
            center_y + y / depth * scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_wraps() {
        let mut room = WireframeRoom::new();
        for _ in 0..1000 {
            room.step();
        }
        assert!(room.angle() >= 0.0 && room.angle() < std::f64::consts::TAU);
    }

    #[test]
    fn test_projection_stays_near_center() {
        let room = WireframeRoom::new();
        let p = room.project(&[1.0, 1.0, 1.0], 50.0, 50.0, 90.0);

        // With the camera 4 units out, no corner projects past ~1/3 of
        // the scale from center.
        assert!((p.x - 50.0).abs() < 45.0);
        assert!((p.y - 50.0).abs() < 45.0);
    }

    #[test]
    fn test_draw_paints_edges() {
        let mut canvas = Canvas::new(100, 100, Color::BLACK);
        WireframeRoom::new().draw(&mut canvas);

        let lit = canvas.pixels().iter().filter(|c| c.luminance() > 0.05).count();
        assert!(lit > 50);
    }

    #[test]
    fn test_tiny_canvas_is_a_noop() {
        let mut canvas = Canvas::new(2, 2, Color::BLACK);
        WireframeRoom::new().draw(&mut canvas);
    }
}
