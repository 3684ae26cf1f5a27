/// Gap kept between the menu and a display edge it was shifted away from.
pub const EDGE_GAP: i32 = 10;
/// Minimum inset from the display's top-left corner after all adjustments.
pub const CORNER_INSET: i32 = 5;

/// Bounding rectangle of the display that contains the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Anchor the menu at the pointer, shifting it back inside `bounds` when it
/// would overflow the right or bottom edge, then clamping away from the
/// top-left corner. The menu never touches a display edge.
pub fn compute_position(
    pointer_x: i32,
    pointer_y: i32,
    menu_width: i32,
    menu_height: i32,
    bounds: Rect,
) -> (i32, i32) {
    let right = bounds.x + bounds.width;
    let bottom = bounds.y + bounds.height;

    let mut x = pointer_x;
    let mut y = pointer_y;

    if x + menu_width > right {
        x = right - menu_width - EDGE_GAP;
    }
    if y + menu_height > bottom {
        y = bottom - menu_height - EDGE_GAP;
    }

    (x.max(bounds.x + CORNER_INSET), y.max(bounds.y + CORNER_INSET))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    };

    #[test]
    fn pointer_in_the_open_places_menu_at_pointer() {
        assert_eq!(compute_position(400, 300, 280, 400, SCREEN), (400, 300));
    }

    #[test]
    fn right_edge_overflow_leaves_ten_unit_gap() {
        let (x, _) = compute_position(SCREEN.width - 10, 300, 280, 400, SCREEN);
        assert_eq!(x + 280, SCREEN.width - EDGE_GAP);
    }

    #[test]
    fn bottom_edge_overflow_leaves_ten_unit_gap() {
        let (_, y) = compute_position(400, SCREEN.height - 1, 280, 400, SCREEN);
        assert_eq!(y + 400, SCREEN.height - EDGE_GAP);
    }

    #[test]
    fn top_left_corner_is_inset_by_five() {
        assert_eq!(compute_position(0, 0, 280, 400, SCREEN), (5, 5));
    }

    #[test]
    fn corner_inset_applies_after_edge_shift() {
        // Menu taller than the display: the bottom shift would push y
        // negative, the clamp pulls it back inside.
        let small = Rect {
            x: 0,
            y: 0,
            width: 800,
            height: 300,
        };
        let (_, y) = compute_position(100, 290, 280, 400, small);
        assert_eq!(y, small.y + CORNER_INSET);
    }

    #[test]
    fn secondary_monitor_offset_is_respected() {
        // A display to the right of the primary one.
        let second = Rect {
            x: 1920,
            y: 0,
            width: 1920,
            height: 1080,
        };
        let (x, y) = compute_position(1920, 0, 280, 400, second);
        assert_eq!((x, y), (1925, 5));

        let (x, _) = compute_position(3830, 100, 280, 400, second);
        assert_eq!(x + 280, 3840 - EDGE_GAP);
    }
}
