//! Half-block rasterization into ratatui lines
//!
//! Each terminal cell carries 2 vertical "pixels": the top maps to the
//! foreground color and the bottom to the background. Works on any
//! Unicode terminal, no graphics protocol needed.

use ratatui::style::Style;
use ratatui::text::{Line as TextLine, Span};

use super::canvas::Canvas;
use super::color::Color;

/// Fold a canvas into styled lines, one per terminal row.
///
/// The canvas is expected to be `cols` x `rows * 2` pixels; other sizes
/// are sampled with nearest-neighbor scaling.
pub fn canvas_to_lines(canvas: &Canvas, cols: u16, rows: u16) -> Vec<TextLine<'static>> {
    let mut lines = Vec::with_capacity(rows as usize);

    if canvas.width == 0 || canvas.height == 0 || cols == 0 || rows == 0 {
        return lines;
    }

    let scale_x = f64::from(canvas.width) / f64::from(cols);
    let scale_y = f64::from(canvas.height) / (f64::from(rows) * 2.0);

    for row in 0..rows {
        let mut spans = Vec::with_capacity(cols as usize);

        for col in 0..cols {
            let x = (f64::from(col) * scale_x) as u32;
            let top_y = (f64::from(row) * 2.0 * scale_y) as u32;
            let bot_y = ((f64::from(row) * 2.0 + 1.0) * scale_y) as u32;

            let top = canvas
                .get_pixel(x.min(canvas.width - 1), top_y.min(canvas.height - 1))
                .unwrap_or(Color::BLACK);
            let bot = canvas
                .get_pixel(x.min(canvas.width - 1), bot_y.min(canvas.height - 1))
                .unwrap_or(Color::BLACK);

            let (ch, fg, bg) = select_halfblock(&top, &bot);
            spans.push(Span::styled(
                ch.to_string(),
                Style::default().fg(fg).bg(bg),
            ));
        }

        lines.push(TextLine::from(spans));
    }

    lines
}

/// Pick the half-block character and color pair for one cell
fn select_halfblock(
    top: &Color,
    bot: &Color,
) -> (char, ratatui::style::Color, ratatui::style::Color) {
    // Near-identical pixels collapse to a solid cell
    if top.distance(bot) < 0.1 {
        let avg = Color::rgb(
            (top.r + bot.r) / 2.0,
            (top.g + bot.g) / 2.0,
            (top.b + bot.b) / 2.0,
        );

        if avg.luminance() < 0.1 {
            return (' ', ratatui::style::Color::Black, avg.to_ratatui());
        }
        return ('█', avg.to_ratatui(), ratatui::style::Color::Black);
    }

    // Put the lighter pixel in the foreground for better accuracy
    if top.luminance() >= bot.luminance() {
        ('▀', top.to_ratatui(), bot.to_ratatui())
    } else {
        ('▄', bot.to_ratatui(), top.to_ratatui())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similar_colors_collapse() {
        let top = Color::rgb(0.5, 0.5, 0.5);
        let bot = Color::rgb(0.51, 0.51, 0.51);
        let (ch, _, _) = select_halfblock(&top, &bot);
        assert!(ch == '█' || ch == ' ');
    }

    #[test]
    fn test_different_colors_split_the_cell() {
        let (ch, _, _) = select_halfblock(&Color::WHITE, &Color::BLACK);
        assert!(ch == '▀' || ch == '▄');
    }

    #[test]
    fn test_line_dimensions() {
        let canvas = Canvas::new(40, 20, Color::BLACK);
        let lines = canvas_to_lines(&canvas, 40, 10);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].spans.len(), 40);
    }

    #[test]
    fn test_empty_canvas_yields_nothing() {
        let canvas = Canvas::new(0, 0, Color::BLACK);
        assert!(canvas_to_lines(&canvas, 10, 10).is_empty());
    }
}
