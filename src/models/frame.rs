use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A window frame in logical screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// True for non-finite frames and frames without a positive area.
    pub fn is_empty(&self) -> bool {
        !self.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }

    /// Overlap with a positive area; frames that only share an edge don't intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// A frame of `size` whose center matches this frame's center.
    pub fn centered(&self, size: Size) -> Rect {
        Rect::new(
            self.mid_x() - size.width / 2.0,
            self.mid_y() - size.height / 2.0,
            size.width,
            size.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_requires_positive_overlap() {
        let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
        assert!(screen.intersects(&Rect::new(1400.0, 850.0, 800.0, 600.0)));
        assert!(screen.intersects(&Rect::new(-700.0, -500.0, 800.0, 600.0)));
        // touching the right edge only
        assert!(!screen.intersects(&Rect::new(1440.0, 0.0, 800.0, 600.0)));
        assert!(!screen.intersects(&Rect::new(3000.0, 3000.0, 800.0, 600.0)));
    }

    #[test]
    fn empty_frames_never_intersect() {
        let screen = Rect::new(0.0, 0.0, 1440.0, 900.0);
        assert!(!screen.intersects(&Rect::new(10.0, 10.0, 0.0, 600.0)));
        assert!(!screen.intersects(&Rect::new(10.0, 10.0, f64::NAN, 600.0)));
        assert!(Rect::new(0.0, 0.0, -5.0, 10.0).is_empty());
    }

    #[test]
    fn centered_keeps_midpoint() {
        let area = Rect::new(0.0, 25.0, 1440.0, 875.0);
        let r = area.centered(Size::new(600.0, 400.0));
        assert_eq!(r, Rect::new(420.0, 262.5, 600.0, 400.0));
        assert_eq!(r.mid_x(), area.mid_x());
        assert_eq!(r.mid_y(), area.mid_y());
    }
}
