/// Bounding box with top-left origin coordinate system.
///
/// Coordinates follow the extraction convention used throughout the crate:
/// - `x0`: left edge
/// - `top`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `bottom`: bottom edge (distance from top of page)
///
/// Conversion to the document's native bottom-left-origin space happens only
/// at synthesis time, via [`crate::coords::to_native`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Horizontal center.
    pub fn x_center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    /// Vertical center.
    pub fn y_center(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Compute the union of two bounding boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Clamp all four edges into `[0, page_width]` × `[0, page_height]`.
    pub fn clamp_to(&self, page_width: f64, page_height: f64) -> BBox {
        BBox {
            x0: self.x0.clamp(0.0, page_width),
            top: self.top.clamp(0.0, page_height),
            x1: self.x1.clamp(0.0, page_width),
            bottom: self.bottom.clamp(0.0, page_height),
        }
    }

    /// Grow (positive) or shrink (negative) the box by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> BBox {
        BBox {
            x0: self.x0 - margin,
            top: self.top - margin,
            x1: self.x1 + margin,
            bottom: self.bottom + margin,
        }
    }
}
