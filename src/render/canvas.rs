//! Virtual framebuffer with float coordinates and RGBA pixels

use super::color::Color;
use super::shapes::Shape;

/// Virtual framebuffer the effects draw into each frame.
///
/// Coordinates are continuous (f64), not discrete. Pixels are RGBA with
/// alpha compositing, so overlapping link lines and markers layer the
/// way translucent strokes do.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel data (row-major, RGBA)
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a canvas with a background color
    pub fn new(width: u32, height: u32, bg: Color) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            pixels: vec![bg; size],
        }
    }

    /// Get pixel at coordinates
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Set pixel at coordinates
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    /// Set pixel with alpha blending
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) as usize;
            self.pixels[idx] = color.blend_over(&self.pixels[idx]);
        }
    }

    /// Draw a shape onto the canvas
    pub fn draw<S: Shape>(&mut self, shape: &S) {
        shape.rasterize(self.width, self.height, &mut self.pixels);
    }

    /// Raw pixel data
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas() {
        let canvas = Canvas::new(100, 50, Color::BLACK);
        assert_eq!(canvas.width, 100);
        assert_eq!(canvas.height, 50);
        assert_eq!(canvas.pixels.len(), 5000);
    }

    #[test]
    fn test_set_get_pixel() {
        let mut canvas = Canvas::new(10, 10, Color::BLACK);
        canvas.set_pixel(5, 5, Color::WHITE);
        assert_eq!(canvas.get_pixel(5, 5), Some(Color::WHITE));
        assert_eq!(canvas.get_pixel(20, 5), None);
    }

    #[test]
    fn test_blend_pixel() {
        let mut canvas = Canvas::new(10, 10, Color::rgb(0.0, 0.0, 1.0));
        canvas.blend_pixel(5, 5, Color::rgba(1.0, 0.0, 0.0, 0.5));
        let blended = canvas.get_pixel(5, 5).unwrap();
        assert!(blended.r > 0.4);
        assert!(blended.b > 0.4);
    }
}
