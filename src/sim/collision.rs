//! Collision detection between axis-aligned boxes
//!
//! Boxes are shrunk toward their centers before the overlap test so grazing
//! contacts don't count. Touching edges never collide.

use crate::{Bounds, Rect};

/// Shrunken AABB overlap test
///
/// `shrink` is the fraction of each dimension kept (0.7 keeps the middle 70%).
pub fn detect_collision(a: &Rect, b: &Rect, shrink: f32) -> bool {
    let sx1 = a.size.x * (1.0 - shrink) / 2.0;
    let sy1 = a.size.y * (1.0 - shrink) / 2.0;
    let sx2 = b.size.x * (1.0 - shrink) / 2.0;
    let sy2 = b.size.y * (1.0 - shrink) / 2.0;

    !(a.right() - sx1 <= b.left() + sx2
        || a.left() + sx1 >= b.right() - sx2
        || a.bottom() - sy1 <= b.top() + sy2
        || a.top() + sy1 >= b.bottom() - sy2)
}

/// Entity-level overlap check
#[inline]
pub fn overlaps<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, b: &B, shrink: f32) -> bool {
    detect_collision(&a.bounds(), &b.bounds(), shrink)
}
