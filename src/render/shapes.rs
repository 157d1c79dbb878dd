//! Drawable primitives

use super::Color;

/// 2D point with f64 coordinates (subpixel precision)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Shape trait for drawable primitives
pub trait Shape {
    /// Draw the shape onto a pixel buffer
    fn rasterize(&self, width: u32, height: u32, pixels: &mut [Color]);
}

/// Line segment
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub color: Color,
}

impl Line {
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self { start, end, color }
    }
}

impl Shape for Line {
    fn rasterize(&self, width: u32, height: u32, pixels: &mut [Color]) {
        // Xiaolin Wu's algorithm for anti-aliased lines
        let mut x0 = self.start.x;
        let mut y0 = self.start.y;
        let mut x1 = self.end.x;
        let mut y1 = self.end.y;

        let steep = (y1 - y0).abs() > (x1 - x0).abs();

        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let gradient = if dx.abs() < 0.0001 { 1.0 } else { dy / dx };

        let plot = |pixels: &mut [Color], x: i32, y: i32, intensity: f32| {
            if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                let idx = (y as u32 * width + x as u32) as usize;
                if idx < pixels.len() {
                    let mut c = self.color;
                    c.a *= intensity;
                    pixels[idx] = c.blend_over(&pixels[idx]);
                }
            }
        };

        let mut y = y0;
        for x in (x0.floor() as i32)..=(x1.ceil() as i32) {
            let intensity = 1.0 - (y - y.floor()) as f32;
            if steep {
                plot(pixels, y.floor() as i32, x, intensity);
                plot(pixels, y.floor() as i32 + 1, x, 1.0 - intensity);
            } else {
                plot(pixels, x, y.floor() as i32, intensity);
                plot(pixels, x, y.floor() as i32 + 1, 1.0 - intensity);
            }
            y += gradient;
        }
    }
}

/// Circle, outlined or filled
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
    pub filled: bool,
}

impl Circle {
    pub fn new(center: Point, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            filled: false,
        }
    }

    pub fn filled(mut self) -> Self {
        self.filled = true;
        self
    }
}

impl Shape for Circle {
    fn rasterize(&self, width: u32, height: u32, pixels: &mut [Color]) {
        let cx = self.center.x;
        let cy = self.center.y;
        let r = self.radius;

        let min_x = ((cx - r - 1.0).max(0.0)) as u32;
        let max_x = ((cx + r + 1.0).min(width as f64 - 1.0)) as u32;
        let min_y = ((cy - r - 1.0).max(0.0)) as u32;
        let max_y = ((cy + r + 1.0).min(height as f64 - 1.0)) as u32;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dist = ((px as f64 - cx).powi(2) + (py as f64 - cy).powi(2)).sqrt();

                let intensity = if self.filled {
                    if dist <= r - 0.5 {
                        1.0
                    } else if dist <= r + 0.5 {
                        (r + 0.5 - dist) as f32
                    } else {
                        0.0
                    }
                } else {
                    let edge_dist = (dist - r).abs();
                    if edge_dist <= 1.0 {
                        (1.0 - edge_dist) as f32
                    } else {
                        0.0
                    }
                };

                if intensity > 0.0 {
                    let idx = (py * width + px) as usize;
                    if idx < pixels.len() {
                        let mut c = self.color;
                        c.a *= intensity;
                        pixels[idx] = c.blend_over(&pixels[idx]);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Canvas;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_filled_circle_paints_center() {
        let mut canvas = Canvas::new(20, 20, Color::BLACK);
        canvas.draw(&Circle::new(Point::new(10.0, 10.0), 3.0, Color::WHITE).filled());

        let center = canvas.get_pixel(10, 10).unwrap();
        assert!(center.luminance() > 0.9);
    }

    #[test]
    fn test_line_stays_in_bounds() {
        let mut canvas = Canvas::new(10, 10, Color::BLACK);
        // Endpoints outside the buffer must not panic
        canvas.draw(&Line::new(
            Point::new(-5.0, -5.0),
            Point::new(15.0, 15.0),
            Color::WHITE,
        ));
        assert!(canvas.get_pixel(5, 5).unwrap().luminance() > 0.0);
    }
}
