//! Primitive rendering functions.
//!
//! Implements rasterization for the shapes the plot layers are built
//! from: Bresenham and Wu lines, dash-patterned polylines, filled and
//! outlined ellipses (data-unit circles land here after scaling), and
//! rectangles.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

// ============================================================================
// Dash Patterns
// ============================================================================

/// Stroke pattern for line drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashPattern {
    /// Continuous stroke ("-").
    #[default]
    Solid,
    /// Dashed stroke ("--").
    Dashed,
    /// Dotted stroke (":").
    Dotted,
}

impl DashPattern {
    /// Parse the dash suffix of a line style string.
    ///
    /// Accepts `"-"`, `"--"`, `":"`, and the empty string (solid).
    ///
    /// # Errors
    ///
    /// Returns an error for any other suffix.
    pub fn from_suffix(suffix: &str) -> Result<Self> {
        match suffix {
            "" | "-" => Ok(Self::Solid),
            "--" => Ok(Self::Dashed),
            ":" => Ok(Self::Dotted),
            other => Err(Error::InvalidColor(format!(
                "unknown line pattern '{other}'"
            ))),
        }
    }

    /// On/off run lengths in pixels; `None` for a continuous stroke.
    #[must_use]
    pub fn run_lengths(self) -> Option<(f32, f32)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((6.0, 4.0)),
            Self::Dotted => Some((1.5, 3.0)),
        }
    }
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are plotted at each step along the major axis, weighted by
/// the fractional distance from the ideal line position.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };

    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl1, xpxl1, color, rfpart(yend) * xgap);
        plot(fb, ypxl1 + 1, xpxl1, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl1, ypxl1, color, rfpart(yend) * xgap);
        plot(fb, xpxl1, ypxl1 + 1, color, fpart(yend) * xgap);
    }

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl2, xpxl2, color, rfpart(yend) * xgap);
        plot(fb, ypxl2 + 1, xpxl2, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl2, ypxl2, color, rfpart(yend) * xgap);
        plot(fb, xpxl2, ypxl2 + 1, color, fpart(yend) * xgap);
    }

    // Main loop
    if steep {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, ipart, x, color, rfpart(intery));
            plot(fb, ipart + 1, x, color, fpart(intery));
            intery += gradient;
        }
    } else {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, x, ipart, color, rfpart(intery));
            plot(fb, x, ipart + 1, color, fpart(intery));
            intery += gradient;
        }
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

/// Draw a polyline with the given dash pattern.
///
/// The dash phase carries across vertices so the pattern flows smoothly
/// around corners. Consecutive duplicate points are skipped.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], color: Rgba, pattern: DashPattern) {
    let Some((on, off)) = pattern.run_lengths() else {
        for w in points.windows(2) {
            draw_line_aa(fb, w[0].x, w[0].y, w[1].x, w[1].y, color);
        }
        return;
    };

    let period = on + off;
    let mut phase = 0.0_f32;

    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let len = a.distance(b);
        if len <= f32::EPSILON {
            continue;
        }

        let mut t = 0.0_f32;
        while t < len {
            let pos = phase % period;
            let (pen_down, run) = if pos < on {
                (true, on - pos)
            } else {
                (false, period - pos)
            };
            let step = run.min(len - t).max(1e-3);

            if pen_down {
                let p0 = a.lerp(b, t / len);
                let p1 = a.lerp(b, (t + step) / len);
                draw_line_aa(fb, p0.x, p0.y, p1.x, p1.y, color);
            }

            t += step;
            phase += step;
        }
    }
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;
    fb.fill_rect(x, y, width, height, color);
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;

    // Top edge
    fb.fill_rect(x, y, width, thickness, color);
    // Bottom edge
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    // Left edge
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
    }
    // Right edge
    if width > thickness && height > 2 * thickness {
        fb.fill_rect(
            x + width - thickness,
            y + thickness,
            thickness,
            height - 2 * thickness,
            color,
        );
    }
}

// ============================================================================
// Ellipse / Marker Drawing
// ============================================================================

/// Fill an axis-aligned ellipse centered at `(cx, cy)` with pixel radii
/// `rx`, `ry`.
///
/// A data-unit circle becomes an ellipse once the two axis scales are
/// applied, so this is the workhorse behind the circle collections.
/// Translucent colors blend over the existing content. Sub-pixel radii
/// collapse to a single pixel.
pub fn fill_ellipse(fb: &mut Framebuffer, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba) {
    if rx < 0.5 || ry < 0.5 {
        let (px, py) = (cx.round() as i32, cy.round() as i32);
        if px >= 0 && py >= 0 {
            fb.blend_pixel(px as u32, py as u32, color);
        }
        return;
    }

    let y_top = (cy - ry).floor() as i32;
    let y_bot = (cy + ry).ceil() as i32;

    for y in y_top..=y_bot {
        let dy = (y as f32 - cy) / ry;
        let t = 1.0 - dy * dy;
        if t < 0.0 {
            continue;
        }
        let half = rx * t.sqrt();
        let x0 = (cx - half).round() as i32;
        let x1 = (cx + half).round() as i32;
        fb.blend_span(x0, x1, y, color);
    }
}

/// Draw the outline of an axis-aligned ellipse.
///
/// Rendered parametrically with anti-aliased segments; the step count
/// follows the circumference so large ellipses stay smooth.
pub fn draw_ellipse_outline(fb: &mut Framebuffer, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba) {
    if rx < 0.5 || ry < 0.5 {
        let (px, py) = (cx.round() as i32, cy.round() as i32);
        if px >= 0 && py >= 0 {
            fb.blend_pixel(px as u32, py as u32, color);
        }
        return;
    }

    let circumference = std::f32::consts::TAU * rx.max(ry);
    let steps = (circumference.ceil() as usize).clamp(16, 512);

    let point_at = |i: usize| -> Point {
        let theta = std::f32::consts::TAU * (i as f32) / (steps as f32);
        Point::new(cx + rx * theta.cos(), cy + ry * theta.sin())
    };

    for i in 0..steps {
        let p0 = point_at(i);
        let p1 = point_at(i + 1);
        draw_line_aa(fb, p0.x, p0.y, p1.x, p1.y, color);
    }
}

/// Draw a filled square-free marker (small disc) of `size` pixels.
pub fn draw_marker(fb: &mut Framebuffer, x: f32, y: f32, size: f32, color: Rgba) {
    let radius = (size / 2.0).max(0.5);
    fill_ellipse(fb, x, y, radius, radius, color);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn white_canvas(w: u32, h: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(w, h).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    fn count_non_white(fb: &Framebuffer) -> usize {
        let mut n = 0;
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get_pixel(x, y) != Some(Rgba::WHITE) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_dash_pattern_parse() {
        assert_eq!(DashPattern::from_suffix("-").unwrap(), DashPattern::Solid);
        assert_eq!(DashPattern::from_suffix("").unwrap(), DashPattern::Solid);
        assert_eq!(DashPattern::from_suffix("--").unwrap(), DashPattern::Dashed);
        assert_eq!(DashPattern::from_suffix(":").unwrap(), DashPattern::Dotted);
        assert!(DashPattern::from_suffix("-.").is_err());
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = white_canvas(100, 100);
        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = white_canvas(100, 100);
        draw_line(&mut fb, 10, 10, 90, 90, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 90), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_out_of_bounds() {
        let mut fb = white_canvas(100, 100);
        // Must not panic
        draw_line(&mut fb, -10, -10, 110, 110, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_aa_touches_path() {
        let mut fb = white_canvas(100, 100);
        draw_line_aa(&mut fb, 10.0, 10.0, 90.0, 50.0, Rgba::BLACK);
        assert!(count_non_white(&fb) > 50);
    }

    #[test]
    fn test_solid_polyline_continuous() {
        let mut fb = white_canvas(100, 20);
        let pts = [Point::new(5.0, 10.0), Point::new(95.0, 10.0)];
        draw_polyline(&mut fb, &pts, Rgba::BLACK, DashPattern::Solid);

        // Every column along the path is touched
        for x in 6..95 {
            assert_ne!(fb.get_pixel(x, 10), Some(Rgba::WHITE), "gap at x={x}");
        }
    }

    #[test]
    fn test_dashed_polyline_has_gaps() {
        let mut fb = white_canvas(200, 20);
        let pts = [Point::new(5.0, 10.0), Point::new(195.0, 10.0)];
        draw_polyline(&mut fb, &pts, Rgba::BLACK, DashPattern::Dashed);

        let mut on = 0;
        let mut off = 0;
        for x in 5..195 {
            if fb.get_pixel(x, 10) == Some(Rgba::WHITE) {
                off += 1;
            } else {
                on += 1;
            }
        }
        assert!(on > 50, "dashes missing: {on} on-pixels");
        assert!(off > 30, "no gaps: {off} off-pixels");
    }

    #[test]
    fn test_dotted_sparser_than_dashed() {
        let mut dashed = white_canvas(200, 20);
        let mut dotted = white_canvas(200, 20);
        let pts = [Point::new(5.0, 10.0), Point::new(195.0, 10.0)];

        draw_polyline(&mut dashed, &pts, Rgba::BLACK, DashPattern::Dashed);
        draw_polyline(&mut dotted, &pts, Rgba::BLACK, DashPattern::Dotted);

        assert!(count_non_white(&dotted) < count_non_white(&dashed));
    }

    #[test]
    fn test_draw_rect() {
        let mut fb = white_canvas(100, 100);
        draw_rect(&mut fb, 20, 20, 30, 30, Rgba::RED);

        assert_eq!(fb.get_pixel(25, 25), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut fb = white_canvas(100, 100);
        draw_rect_outline(&mut fb, 20, 20, 30, 30, Rgba::RED, 2);

        assert_eq!(fb.get_pixel(20, 20), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(35, 35), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_ellipse_circle() {
        let mut fb = white_canvas(100, 100);
        fill_ellipse(&mut fb, 50.0, 50.0, 20.0, 20.0, Rgba::BLUE);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(65, 50), Some(Rgba::BLUE));
        // Outside the radius
        assert_eq!(fb.get_pixel(50, 20), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_ellipse_anisotropic() {
        let mut fb = white_canvas(100, 100);
        fill_ellipse(&mut fb, 50.0, 50.0, 30.0, 10.0, Rgba::GREEN);

        // Wide but short
        assert_eq!(fb.get_pixel(75, 50), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(50, 55), Some(Rgba::GREEN));
        assert_eq!(fb.get_pixel(50, 65), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_ellipse_subpixel() {
        let mut fb = white_canvas(20, 20);
        fill_ellipse(&mut fb, 10.0, 10.0, 0.2, 0.2, Rgba::BLACK);
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::BLACK));
        assert_eq!(count_non_white(&fb), 1);
    }

    #[test]
    fn test_ellipse_outline_hollow() {
        let mut fb = white_canvas(100, 100);
        draw_ellipse_outline(&mut fb, 50.0, 50.0, 20.0, 20.0, Rgba::BLACK);

        // Center untouched
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::WHITE));
        // Rim touched somewhere near (70, 50)
        let mut rim = false;
        for x in 67..=73 {
            if fb.get_pixel(x, 50) != Some(Rgba::WHITE) {
                rim = true;
            }
        }
        assert!(rim);
    }

    #[test]
    fn test_draw_marker() {
        let mut fb = white_canvas(50, 50);
        draw_marker(&mut fb, 25.0, 25.0, 4.0, Rgba::RED);
        assert_ne!(fb.get_pixel(25, 25), Some(Rgba::WHITE));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut fb = white_canvas(50, 50);
        fill_ellipse(&mut fb, 25.0, 25.0, 10.0, 10.0, Rgba::BLUE.with_opacity(0.3));

        let px = fb.get_pixel(25, 25).unwrap();
        // Washed-out blue over white, not saturated blue
        assert!(px.r > 150);
        assert!(px.b == 255 || px.b > 230);
        assert_ne!(px, Rgba::BLUE);
    }
}
