//! Per-candidate geometry: connection points and viewport fit.

use crate::overlay::Direction;
use crate::primitives::{Point, Rect, Size};

use super::connected::{ConnectedPosition, HorizontalConnectionPos, VerticalConnectionPos};

/// How well an overlay at a given point fits into the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFit {
    pub is_completely_within_viewport: bool,
    pub fits_in_viewport_vertically: bool,
    pub fits_in_viewport_horizontally: bool,
    /// On-screen area of the overlay in px².
    pub visible_area: f32,
}

/// The (x, y) point on the origin element that `position` connects to.
pub fn origin_point(origin: &Rect, position: &ConnectedPosition, direction: Direction) -> Point {
    let x = match position.origin_x {
        // Centering always measures from the left edge so RTL doesn't flip it.
        HorizontalConnectionPos::Center => origin.left() + origin.width / 2.0,
        HorizontalConnectionPos::Start if direction.is_rtl() => origin.right(),
        HorizontalConnectionPos::Start => origin.left(),
        HorizontalConnectionPos::End if direction.is_rtl() => origin.left(),
        HorizontalConnectionPos::End => origin.right(),
    };

    let y = match position.origin_y {
        VerticalConnectionPos::Top => origin.top(),
        VerticalConnectionPos::Center => origin.top() + origin.height / 2.0,
        VerticalConnectionPos::Bottom => origin.bottom(),
    };

    Point::new(x, y)
}

/// The top-left corner of the overlay when it is connected to `origin_point`.
pub fn overlay_point(
    origin_point: Point,
    overlay: Size,
    position: &ConnectedPosition,
    direction: Direction,
) -> Point {
    let start_x = match position.overlay_x {
        HorizontalConnectionPos::Center => -overlay.width / 2.0,
        HorizontalConnectionPos::Start if direction.is_rtl() => -overlay.width,
        HorizontalConnectionPos::Start => 0.0,
        HorizontalConnectionPos::End if direction.is_rtl() => 0.0,
        HorizontalConnectionPos::End => -overlay.width,
    };

    let start_y = match position.overlay_y {
        VerticalConnectionPos::Top => 0.0,
        VerticalConnectionPos::Center => -overlay.height / 2.0,
        VerticalConnectionPos::Bottom => -overlay.height,
    };

    Point::new(origin_point.x + start_x, origin_point.y + start_y)
}

/// Measure how much of an overlay placed at `point` stays inside `viewport`.
///
/// The position's offsets are applied first since they can push the overlay
/// off-screen.
pub fn overlay_fit(
    point: Point,
    overlay: Size,
    viewport: &Rect,
    position: &ConnectedPosition,
) -> OverlayFit {
    let x = point.x + position.offset_x();
    let y = point.y + position.offset_y();

    let left_overflow = viewport.left() - x;
    let right_overflow = (x + overlay.width) - viewport.right();
    let top_overflow = viewport.top() - y;
    let bottom_overflow = (y + overlay.height) - viewport.bottom();

    let visible_width = subtract_overflows(overlay.width, &[left_overflow, right_overflow]);
    let visible_height = subtract_overflows(overlay.height, &[top_overflow, bottom_overflow]);
    let visible_area = visible_width * visible_height;

    OverlayFit {
        visible_area,
        is_completely_within_viewport: overlay.area() == visible_area,
        fits_in_viewport_vertically: visible_height == overlay.height,
        fits_in_viewport_horizontally: visible_width == overlay.width,
    }
}

/// Subtract the positive overflows from `length`, never going below zero.
fn subtract_overflows(length: f32, overflows: &[f32]) -> f32 {
    overflows
        .iter()
        .fold(length, |current, overflow| current - overflow.max(0.0))
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use HorizontalConnectionPos::{Center as HCenter, End, Start};
    use VerticalConnectionPos::{Bottom, Center as VCenter, Top};

    const ORIGIN: Rect = Rect::new(200.0, 100.0, 60.0, 30.0);
    const OVERLAY: Size = Size::new(60.0, 30.0);

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1024.0, 768.0)
    }

    #[test]
    fn origin_point_ltr() {
        let pos = ConnectedPosition::new(Start, Bottom, Start, Top);
        assert_eq!(origin_point(&ORIGIN, &pos, Direction::Ltr), Point::new(200.0, 130.0));

        let pos = ConnectedPosition::new(End, Top, Start, Top);
        assert_eq!(origin_point(&ORIGIN, &pos, Direction::Ltr), Point::new(260.0, 100.0));
    }

    #[test]
    fn origin_point_rtl_mirrors_x_only() {
        let pos = ConnectedPosition::new(Start, Bottom, Start, Top);
        let ltr = origin_point(&ORIGIN, &pos, Direction::Ltr);
        let rtl = origin_point(&ORIGIN, &pos, Direction::Rtl);
        assert_eq!(ltr.x, ORIGIN.left());
        assert_eq!(rtl.x, ORIGIN.right());
        assert_eq!(ltr.y, rtl.y);
    }

    #[test]
    fn origin_point_center_ignores_direction() {
        let pos = ConnectedPosition::new(HCenter, VCenter, HCenter, VCenter);
        let expected = Point::new(230.0, 115.0);
        assert_eq!(origin_point(&ORIGIN, &pos, Direction::Ltr), expected);
        assert_eq!(origin_point(&ORIGIN, &pos, Direction::Rtl), expected);
    }

    #[test]
    fn overlay_point_offsets_by_overlay_alignment() {
        let at = Point::new(100.0, 100.0);
        let cases = [
            (Start, Top, Direction::Ltr, Point::new(100.0, 100.0)),
            (End, Bottom, Direction::Ltr, Point::new(40.0, 70.0)),
            (HCenter, VCenter, Direction::Ltr, Point::new(70.0, 85.0)),
            (Start, Top, Direction::Rtl, Point::new(40.0, 100.0)),
            (End, Top, Direction::Rtl, Point::new(100.0, 100.0)),
        ];
        for (overlay_x, overlay_y, dir, expected) in cases {
            let pos = ConnectedPosition::new(Start, Top, overlay_x, overlay_y);
            assert_eq!(
                overlay_point(at, OVERLAY, &pos, dir),
                expected,
                "{:?}/{:?} in {:?}",
                overlay_x,
                overlay_y,
                dir
            );
        }
    }

    #[test]
    fn fit_inside_viewport() {
        let pos = ConnectedPosition::new(Start, Bottom, Start, Top);
        let fit = overlay_fit(Point::new(10.0, 10.0), OVERLAY, &viewport(), &pos);
        assert!(fit.is_completely_within_viewport);
        assert!(fit.fits_in_viewport_vertically);
        assert!(fit.fits_in_viewport_horizontally);
        assert_eq!(fit.visible_area, 1800.0);
    }

    #[test]
    fn fit_overflowing_top() {
        let pos = ConnectedPosition::new(Start, Top, Start, Bottom);
        let fit = overlay_fit(Point::new(200.0, -25.0), OVERLAY, &viewport(), &pos);
        assert!(!fit.is_completely_within_viewport);
        assert!(!fit.fits_in_viewport_vertically);
        assert!(fit.fits_in_viewport_horizontally);
        assert_eq!(fit.visible_area, 60.0 * 5.0);
    }

    #[test]
    fn fit_counts_offsets() {
        let pos = ConnectedPosition::new(Start, Bottom, Start, Top).with_offset(0.0, 750.0);
        let fit = overlay_fit(Point::new(10.0, 10.0), OVERLAY, &viewport(), &pos);
        assert!(!fit.fits_in_viewport_vertically);
    }

    #[test]
    fn fully_offscreen_has_no_visible_area() {
        let pos = ConnectedPosition::new(Start, Bottom, Start, Top);
        let fit = overlay_fit(Point::new(-500.0, -500.0), OVERLAY, &viewport(), &pos);
        assert_eq!(fit.visible_area, 0.0);
    }
}
