//! Lazy pixel sequences for lines and regular polygons.
//!
//! Points are yielded as `(x, y)` floats, ready to feed back into
//! [`Canvas::set`](crate::Canvas::set), which rounds them to pixels.

use crate::error::{Error, Result};
use crate::geometry::{Coordinate, normalize};
use std::f64::consts::TAU;
use std::iter::FusedIterator;

/// Points of a straight segment, interpolated uniformly over
/// `max(|dx|, |dy|) + 1` steps.
#[derive(Clone, Debug)]
pub struct Line {
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    steps: u64,
    next: u64,
}

impl Line {
    fn between((x1, y1): (i64, i64), (x2, y2): (i64, i64)) -> Result<Self> {
        let span = |from: i64, to: i64| {
            to.checked_sub(from)
                .ok_or_else(|| Error::unsupported(i128::from(to) - i128::from(from)))
        };
        let dx = span(x1, x2)?;
        let dy = span(y1, y2)?;
        Ok(Self {
            x1,
            y1,
            dx,
            dy,
            steps: dx.unsigned_abs().max(dy.unsigned_abs()),
            next: 0,
        })
    }

    fn point(&self, i: u64) -> (f64, f64) {
        if self.steps == 0 {
            return (self.x1 as f64, self.y1 as f64);
        }
        let t = i as f64 / self.steps as f64;
        (
            self.x1 as f64 + t * self.dx as f64,
            self.y1 as f64 + t * self.dy as f64,
        )
    }
}

impl Iterator for Line {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.steps {
            return None;
        }
        let point = self.point(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // `steps` is at most 2^63, so neither side can overflow.
        let remaining = (self.steps + 1).saturating_sub(self.next);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for Line {}
impl FusedIterator for Line {}

/// Line from `(x1, y1)` to `(x2, y2)`, both ends included.
///
/// Endpoints are rounded to pixels first. Fails when the distance between
/// them does not fit in an `i64`.
///
/// ```
/// let points: Vec<_> = termux2d::line(0, 0, 2, 0).unwrap().collect();
/// assert_eq!(points, [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// ```
pub fn line<C: Coordinate>(x1: C, y1: C, x2: C, y2: C) -> Result<Line> {
    Line::between(
        (normalize(x1)?, normalize(y1)?),
        (normalize(x2)?, normalize(y2)?),
    )
}

/// Outline of a regular polygon, one [`Line`] per side.
///
/// Vertices are computed as the sides are reached.
#[derive(Clone, Debug)]
pub struct Polygon {
    center: (f64, f64),
    radius: f64,
    sides: u32,
    side: u32,
    first: (i64, i64),
    from: (i64, i64),
    current: Option<Line>,
}

fn vertex((cx, cy): (f64, f64), radius: f64, n: u32, sides: u32) -> Result<(i64, i64)> {
    let angle = TAU * f64::from(n) / f64::from(sides);
    Ok((
        normalize(cx + radius * angle.cos())?,
        normalize(cy + radius * angle.sin())?,
    ))
}

impl Polygon {
    /// Line from the previous vertex to vertex `side`, wrapping to the first.
    fn side_line(&mut self) -> Result<Line> {
        let to = if self.side == self.sides {
            self.first
        } else {
            vertex(self.center, self.radius, self.side, self.sides)?
        };
        let line = Line::between(self.from, to)?;
        self.from = to;
        Ok(line)
    }
}

impl Iterator for Polygon {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(point) = self.current.as_mut().and_then(Iterator::next) {
                return Some(point);
            }
            if self.side >= self.sides {
                self.current = None;
                return None;
            }
            self.side += 1;
            // Vertices stay inside the box checked by `polygon`.
            let Ok(line) = self.side_line() else {
                self.side = self.sides;
                self.current = None;
                return None;
            };
            self.current = Some(line);
        }
    }
}

impl FusedIterator for Polygon {}

/// Regular polygon with `sides` vertices on the circle of `radius` around
/// `(center_x, center_y)`, the first at angle 0.
///
/// The outline closes: its last point is its first. Zero sides yields
/// nothing. Fails when the polygon's bounding box does not fit the pixel
/// grid.
pub fn polygon(center_x: f64, center_y: f64, sides: u32, radius: f64) -> Result<Polygon> {
    let reach = radius.abs();
    let (min_x, max_x) = (normalize(center_x - reach)?, normalize(center_x + reach)?);
    let (min_y, max_y) = (normalize(center_y - reach)?, normalize(center_y + reach)?);
    Line::between((min_x, min_y), (max_x, max_y))?;

    let center = (center_x, center_y);
    let first = if sides == 0 {
        (0, 0)
    } else {
        vertex(center, radius, 0, sides)?
    };
    Ok(Polygon {
        center,
        radius,
        sides,
        side: 0,
        first,
        from: first,
        current: None,
    })
}
