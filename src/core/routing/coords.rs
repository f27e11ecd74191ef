//=========================================================================
// Coordinate Resolver
//=========================================================================
//
// Converts device-absolute positions into instance-local positions and
// tests them against an instance's visible area.
//
// All functions are pure: they depend only on the bounds passed in.
//
// Bounds are inclusive on both edges. A click on the last pixel column
// (`x == width`) is game input.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::Cell;
use std::rc::Rc;

//=== ScreenBounds ========================================================

/// Screen origin and size of one game instance, in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenBounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

//=== ScreenGeometry ======================================================

/// Source of an instance's current screen bounds.
///
/// Implemented by the rendering side. Bounds are queried on every event,
/// so a screen that moves or resizes is picked up without re-registering.
pub trait ScreenGeometry {
    fn bounds(&self) -> ScreenBounds;
}

/// Fixed bounds.
impl ScreenGeometry for ScreenBounds {
    fn bounds(&self) -> ScreenBounds {
        *self
    }
}

/// Live bounds shared with the renderer.
impl ScreenGeometry for Rc<Cell<ScreenBounds>> {
    fn bounds(&self) -> ScreenBounds {
        self.get()
    }
}

//=== Resolver Functions ==================================================

/// Returns `(x, y)` relative to the screen origin of `bounds`.
pub fn localize(bounds: &ScreenBounds, x: f32, y: f32) -> (f32, f32) {
    (x - bounds.x, y - bounds.y)
}

/// Returns `true` if a local position lies within the visible area.
pub fn in_bounds(bounds: &ScreenBounds, local_x: f32, local_y: f32) -> bool {
    local_x >= 0.0 && local_y >= 0.0 && local_x <= bounds.width && local_y <= bounds.height
}

/// Tests a device-absolute position against the absolute screen rectangle.
///
/// Used by the touch path, which hit-tests contact points without
/// localizing them first.
pub fn contains_absolute(bounds: &ScreenBounds, x: f32, y: f32) -> bool {
    x >= bounds.x
        && x <= bounds.x + bounds.width
        && y >= bounds.y
        && y <= bounds.y + bounds.height
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: ScreenBounds = ScreenBounds::new(0.0, 0.0, 100.0, 100.0);
    const OFFSET: ScreenBounds = ScreenBounds::new(200.0, 50.0, 100.0, 100.0);

    #[test]
    fn localize_subtracts_origin() {
        assert_eq!(localize(&OFFSET, 250.0, 60.0), (50.0, 10.0));
        assert_eq!(localize(&SQUARE, 3.0, 4.0), (3.0, 4.0));
    }

    #[test]
    fn localize_can_go_negative() {
        assert_eq!(localize(&OFFSET, 150.0, 0.0), (-50.0, -50.0));
    }

    #[test]
    fn bounds_are_inclusive_on_both_edges() {
        assert!(in_bounds(&SQUARE, 0.0, 0.0));
        assert!(in_bounds(&SQUARE, 100.0, 100.0));
        assert!(in_bounds(&SQUARE, 100.0, 0.0));
    }

    #[test]
    fn one_past_the_edge_is_outside() {
        assert!(!in_bounds(&SQUARE, 101.0, 100.0));
        assert!(!in_bounds(&SQUARE, 100.0, 101.0));
        assert!(!in_bounds(&SQUARE, -1.0, 50.0));
        assert!(!in_bounds(&SQUARE, 50.0, -0.5));
    }

    #[test]
    fn absolute_containment_uses_origin_and_size() {
        assert!(contains_absolute(&OFFSET, 200.0, 50.0));
        assert!(contains_absolute(&OFFSET, 300.0, 150.0));
        assert!(!contains_absolute(&OFFSET, 199.0, 60.0));
        assert!(!contains_absolute(&OFFSET, 250.0, 151.0));
    }

    /// The touch path tests absolute rectangles while the pointer path
    /// tests localized coordinates. For axis-aligned screens both agree.
    #[test]
    fn absolute_and_localized_tests_agree() {
        let points = [(199.0, 49.0), (200.0, 50.0), (250.0, 100.0), (300.0, 150.0), (301.0, 150.0)];
        for &(x, y) in &points {
            let (lx, ly) = localize(&OFFSET, x, y);
            let absolute = contains_absolute(&OFFSET, x, y);
            assert_eq!(absolute, in_bounds(&OFFSET, lx, ly), "at ({}, {})", x, y);
        }
    }

    #[test]
    fn shared_bounds_follow_updates() {
        let live = Rc::new(Cell::new(SQUARE));
        let geometry: Box<dyn ScreenGeometry> = Box::new(Rc::clone(&live));

        live.set(OFFSET);

        assert_eq!(geometry.bounds(), OFFSET);
    }
}
