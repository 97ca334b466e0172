//! Planar geometry for silhouette outlines.
//!
//! Supplies the primitives the tracker and kinematics layers share: 2D
//! points, integer raster bounding boxes, and polygonal outlines that can be
//! rasterized into binary masks for area-difference computation.

use nalgebra::Point2;
use ndarray::Array2;

/// A 2D point in frame coordinates.
pub type Point = Point2<f32>;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f32 {
    nalgebra::distance(a, b)
}

/// An axis-aligned integer raster box. `min_*` is inclusive, `max_*`
/// exclusive, so `width`/`height` give the mask dimensions directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    #[inline]
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x).max(0) as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        (self.max_y - self.min_y).max(0) as usize
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// A closed silhouette outline: an ordered vertex sequence in frame
/// coordinates. The last vertex connects implicitly back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<Point>,
}

impl Outline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex centroid.
    pub fn centroid(&self) -> Point {
        if self.points.is_empty() {
            return Point::origin();
        }
        let n = self.points.len() as f32;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }

    /// Integer raster box covering every vertex.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if self.points.is_empty() {
            return BoundingBox {
                min_x: 0,
                min_y: 0,
                max_x: 0,
                max_y: 0,
            };
        }
        BoundingBox {
            min_x: min_x.floor() as i32,
            min_y: min_y.floor() as i32,
            max_x: max_x.floor() as i32 + 1,
            max_y: max_y.floor() as i32 + 1,
        }
    }

    /// Polygon area via the shoelace formula.
    pub fn area(&self) -> f32 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let mut acc = 0.0f32;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[(i + 1) % self.points.len()];
            acc += a.x * b.y - b.x * a.y;
        }
        acc.abs() / 2.0
    }

    /// Longest distance between any two vertices, used as the long-axis
    /// length when the segmenter does not supply one. O(n^2) over vertices.
    pub fn long_axis(&self) -> f32 {
        let mut best = 0.0f32;
        for i in 0..self.points.len() {
            for j in (i + 1)..self.points.len() {
                best = best.max(distance(&self.points[i], &self.points[j]));
            }
        }
        best
    }

    /// Scanline-rasterize the outline into a binary mask covering `bbox`.
    /// Even-odd fill rule; a cell is set when its center lies inside.
    pub fn rasterize(&self, bbox: &BoundingBox) -> Array2<bool> {
        let (h, w) = (bbox.height(), bbox.width());
        let mut mask = Array2::from_elem((h, w), false);
        if self.points.len() < 3 {
            return mask;
        }
        let mut crossings: Vec<f32> = Vec::new();
        for row in 0..h {
            let scan_y = bbox.min_y as f32 + row as f32 + 0.5;
            crossings.clear();
            for i in 0..self.points.len() {
                let a = self.points[i];
                let b = self.points[(i + 1) % self.points.len()];
                if (a.y <= scan_y && b.y > scan_y) || (b.y <= scan_y && a.y > scan_y) {
                    let t = (scan_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));
            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - bbox.min_x as f32 - 0.5).ceil().max(0.0) as usize;
                let end = (pair[1] - bbox.min_x as f32 - 0.5).ceil().max(0.0) as usize;
                for col in start..end.min(w) {
                    mask[[row, col]] = true;
                }
            }
        }
        mask
    }
}

/// Number of set cells in a mask.
pub fn mask_area(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&v| v).count()
}

/// Number of cells where exactly one of two same-shape masks is set.
pub fn mask_symmetric_difference(a: &Array2<bool>, b: &Array2<bool>) -> usize {
    debug_assert_eq!(a.dim(), b.dim());
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}
