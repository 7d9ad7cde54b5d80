//! Rectangles for cropping and compositing.
//!
//! Coordinates follow the usual image convention: origin at the top-left,
//! X to the right, Y downward. The origin is signed so a rectangle may hang
//! off the left or top edge of an image; [`Rect::clamp_to`] clips it.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Image   │
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use texel_core::Rect;
//!
//! let rect = Rect::new(-10, 20, 100, 50);
//! let clipped = rect.clamp_to(64, 64).unwrap();
//! assert_eq!(clipped, Rect::new(0, 20, 64, 44));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A rectangle defined by a signed origin and unsigned dimensions.
///
/// A rectangle with zero width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin covering `width x height`.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point is inside (left/top inclusive, right/bottom exclusive).
    #[inline]
    pub const fn contains(&self, px: i64, py: i64) -> bool {
        px >= self.x as i64 && px < self.right() && py >= self.y as i64 && py < self.bottom()
    }

    /// Intersection with another rectangle, `None` if they do not overlap.
    ///
    /// ```rust
    /// use texel_core::Rect;
    ///
    /// let a = Rect::new(0, 0, 100, 100);
    /// let b = Rect::new(50, 50, 100, 100);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
    /// ```
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = (self.x as i64).max(other.x as i64);
        let y = (self.y as i64).max(other.y as i64);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x as i32, y as i32, (right - x) as u32, (bottom - y) as u32))
        } else {
            None
        }
    }

    /// The part of this rectangle inside `[0, width) x [0, height)`.
    ///
    /// The result, when present, has a non-negative origin and is non-empty.
    #[inline]
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        let bounds = Rect::new(0, 0, width.min(i32::MAX as u32), height.min(i32::MAX as u32));
        self.intersect(&bounds)
    }

    /// Returns this rectangle moved by (dx, dy).
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.width, self.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Parses `x,y,w,h`.
impl FromStr for Rect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::invalid_parameter("rect", format!("expected `x,y,w,h`, got `{s}`"));
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, w, h] = parts.as_slice() else {
            return Err(bad());
        };
        Ok(Rect::new(
            x.parse().map_err(|_| bad())?,
            y.parse().map_err(|_| bad())?,
            w.parse().map_err(|_| bad())?,
            h.parse().map_err(|_| bad())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
        assert_eq!(rect.area(), 5000);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(-5, -5, 10, 10);
        assert!(rect.contains(-5, -5));
        assert!(rect.contains(4, 4));
        assert!(!rect.contains(5, 5));
    }

    #[test]
    fn test_rect_no_intersection() {
        let a = Rect::new(0, 0, 50, 50);
        let b = Rect::new(100, 100, 50, 50);
        assert!(a.intersect(&b).is_none());
        // touching edges share no pixel
        let c = Rect::new(50, 0, 10, 10);
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn test_clamp_to() {
        assert_eq!(
            Rect::new(900, 500, 200, 200).clamp_to(1000, 600),
            Some(Rect::new(900, 500, 100, 100))
        );
        assert_eq!(Rect::new(-20, -20, 10, 10).clamp_to(8, 8), None);
        assert_eq!(Rect::new(2, 2, 0, 5).clamp_to(8, 8), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("-1, 2, 3, 4".parse::<Rect>().unwrap(), Rect::new(-1, 2, 3, 4));
        assert!("1,2,3".parse::<Rect>().is_err());
        assert!("1,2,-3,4".parse::<Rect>().is_err());
    }
}
