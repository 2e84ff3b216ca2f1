/// Axis-aligned boxes, vectors and viewport bounds checks.
///
/// Coordinates are logical pixels with the origin at the top-left corner of
/// the viewport; `y` grows downward.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    pub fn normalized(&self) -> Vec2 {
        let len = self.length();
        if len <= f32::EPSILON {
            return Vec2::ZERO;
        }
        Vec2 {
            x: self.x / len,
            y: self.y / len,
        }
    }

    pub fn scaled(&self, factor: f32) -> Vec2 {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Box stored as its top-left corner plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Rect {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    /// Shift `rect` the minimum amount needed to lie fully inside the viewport.
    pub fn clamp(&self, rect: &mut Rect) {
        if rect.left() < 0.0 {
            rect.x = 0.0;
        }
        if rect.right() > self.width {
            rect.x = self.width - rect.w;
        }
        if rect.top() < 0.0 {
            rect.y = 0.0;
        }
        if rect.bottom() > self.height {
            rect.y = self.height - rect.h;
        }
    }
}

/// Returns `(horizontally, vertically)`: whether the full extent of `rect`
/// lies within `[0, width]` and `[0, height]` respectively.
pub fn in_bounds(rect: &Rect, viewport: &Viewport) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= viewport.width;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= viewport.height;
    (horizontal, vertical)
}

/// Both axes of [`in_bounds`] at once.
pub fn fully_inside(rect: &Rect, viewport: &Viewport) -> bool {
    in_bounds(rect, viewport) == (true, true)
}

/// Unit vector from the center of `from` toward the center of `to`.
///
/// Coincident centers yield `Vec2::ZERO`, so whatever travels along the
/// result simply stays put.
pub fn direction_to(from: &Rect, to: &Rect) -> Vec2 {
    let a = from.center();
    let b = to.center();
    Vec2::new(b.x - a.x, b.y - a.y).normalized()
}
