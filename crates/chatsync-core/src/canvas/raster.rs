//! Pixel surface.
//!
//! Polylines are clipped to the surface, then rasterized by stamping a round
//! brush along each segment, which gives round caps and joins.

use crate::protocol::Point;

use super::replay::Surface;

/// Upper bound on brush stamps per segment.
const MAX_SEGMENT_STEPS: f64 = 65_536.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            3 => {
                let r = channel(hex.get(0..1)?)?;
                let g = channel(hex.get(1..2)?)?;
                let b = channel(hex.get(2..3)?)?;
                Some(Rgba([r * 17, g * 17, b * 17, 255]))
            }
            6 => {
                let r = channel(hex.get(0..2)?)?;
                let g = channel(hex.get(2..4)?)?;
                let b = channel(hex.get(4..6)?)?;
                Some(Rgba([r, g, b, 255]))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    line_width: f64,
    pixels: Vec<Rgba>,
}

impl Raster {
    pub fn new(width: u32, height: u32, line_width: f64) -> Self {
        Self {
            width,
            height,
            line_width,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Number of non-transparent pixels.
    pub fn painted(&self) -> usize {
        self.pixels.iter().filter(|p| **p != Rgba::TRANSPARENT).count()
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(p) = self.pixels.get_mut(idx) {
            *p = color;
        }
    }

    fn stamp(&mut self, cx: f64, cy: f64, color: Rgba) {
        let r = self.line_width / 2.0;
        self.put(cx.floor() as i64, cy.floor() as i64, color);

        let (x0, x1) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
        let (y0, y1) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.put(px, py, color);
                }
            }
        }
    }

    fn segment(&mut self, a: Point, b: Point, color: Rgba) {
        if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
            return;
        }
        let margin = self.line_width / 2.0 + 1.0;
        let min = (-margin, -margin);
        let max = (self.width as f64 + margin, self.height as f64 + margin);
        let Some((a, b)) = clip_segment(a, b, min, max) else {
            return;
        };
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let steps = dx.abs().max(dy.abs()).ceil().clamp(1.0, MAX_SEGMENT_STEPS) as u32;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.stamp(a.x + dx * t, a.y + dy * t, color);
        }
    }
}

/// Liang-Barsky clip of `a..b` to the box `min..max`.
fn clip_segment(a: Point, b: Point, min: (f64, f64), max: (f64, f64)) -> Option<(Point, Point)> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, a.x - min.0),
        (dx, max.0 - a.x),
        (-dy, a.y - min.1),
        (dy, max.1 - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        Point::new(a.x + t0 * dx, a.y + t0 * dy),
        Point::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}

impl Surface for Raster {
    fn reset(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn stroke_path(&mut self, color: &str, points: &[Point]) {
        let rgba = Rgba::parse_hex(color).unwrap_or_else(|| {
            tracing::debug!(color, "unparseable stroke color, using black");
            Rgba::BLACK
        });
        for pair in points.windows(2) {
            if let [a, b] = pair {
                self.segment(*a, *b, rgba);
            }
        }
    }
}
