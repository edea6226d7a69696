//! Input plumbing between the DOM and the game: event types, click targets,
//! and pixel to cell conversion.
//!
//! Keyboard and pointer input are both reduced to [`InputEvent`] before the
//! game sees them; the game never deals with coordinates.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse, and touch input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A click/tap on a registered target (see `cat::actions`).
    Click(u16),
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// The rectangular region (in terminal cell coordinates) for hit testing.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Convenience: register a full-row click target at the given row within an area.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Register targets for a row of buttons from their rendered widths.
    ///
    /// `tab_widths` holds `(display_width, action_id)` of each **padded**
    /// label (`" 💾 Save "` is 9 columns). Each target covers its label plus
    /// half of the neighbouring separators; the first and last reach the
    /// edges of the row so there are no dead columns.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        // Compute the starting column of each tab label
        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for i in 0..n {
            let (_, action_id) = tab_widths[i];

            // Left boundary: first tab from 0, others from midpoint of left separator
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };

            // Right boundary: last tab to total_width, others to midpoint of right sep
            let right = if i == n - 1 {
                total_width
            } else {
                let cur_end = starts[i] + tab_widths[i].0;
                let next_start = starts[i + 1];
                cur_end + (next_start - cur_end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Action under a terminal cell. When targets overlap the one registered
    /// last wins, as it is drawn on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Phone-sized terminals get the compact layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y coordinate to a terminal row index.
///
/// `click_y` is relative to the grid container's top edge.
/// `grid_height` is the total pixel height of the grid container.
/// `terminal_rows` is the number of rows in the terminal.
///
/// Returns `None` if the click is outside the grid or inputs are invalid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }

    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;

    if row >= terminal_rows {
        return None;
    }

    Some(row)
}

/// Convert a pixel X coordinate to a terminal column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols { None } else { Some(col) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows_and_columns() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 10, 1), 1);
        cs.add_click_target(Rect::new(10, 5, 10, 1), 2);
        cs.add_click_target(Rect::new(0, 8, 40, 3), 3);

        assert_eq!(cs.hit_test(9, 5), Some(1));
        assert_eq!(cs.hit_test(10, 5), Some(2));
        assert_eq!(cs.hit_test(20, 5), None);
        assert_eq!(cs.hit_test(3, 7), None);
        assert_eq!(cs.hit_test(3, 10), Some(3));
        assert_eq!(cs.hit_test(3, 11), None);
    }

    #[test]
    fn overlapping_targets_last_wins() {
        let mut cs = ClickState::new();
        // Cat art covers the block, the upgrade row sits on top of it
        cs.add_click_target(Rect::new(0, 0, 40, 8), 1);
        cs.add_click_target(Rect::new(0, 7, 40, 1), 2);

        assert_eq!(cs.hit_test(5, 3), Some(1));
        assert_eq!(cs.hit_test(5, 7), Some(2));
    }

    #[test]
    fn row_target_must_be_inside_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 98);
        cs.add_row_target(area, 15, 99);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 12, 100);
        assert_eq!(cs.hit_test(5, 12), Some(100));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn clear_drops_all_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn button_row_has_no_gaps() {
        // " 💾 Save "(9) " │ "(3) " 🗑 Reset "(10)
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(9, 10), (10, 11)], 3, 2, 20, 40, 1);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(1, 20), None);
        assert_eq!(cs.hit_test(2, 20), Some(10));
        // Separator columns 9..12 split at 10
        assert_eq!(cs.hit_test(2 + 9, 20), Some(10));
        assert_eq!(cs.hit_test(2 + 10, 20), Some(11));
        assert_eq!(cs.hit_test(41, 20), Some(11));
        assert_eq!(cs.hit_test(42, 20), None);
    }

    #[test]
    fn single_button_spans_row() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[(8, 42)], 3, 5, 10, 40, 2);
        assert_eq!(cs.hit_test(5, 10), Some(42));
        assert_eq!(cs.hit_test(44, 11), Some(42));
        assert_eq!(cs.hit_test(4, 10), None);
    }

    #[test]
    fn no_buttons_no_targets() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 3, 0, 0, 80, 1);
        cs.register_tab_targets(&[(6, 1)], 3, 0, 0, 0, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(37));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_cell() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
    }

    #[test]
    fn pixel_outside_grid_is_none() {
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(-1.0, 800.0, 80), None);
    }

    #[test]
    fn tap_on_phone_reaches_buy_row() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 37;
        cs.terminal_rows = 50;
        for (i, row) in (20..24).enumerate() {
            cs.add_click_target(Rect::new(0, row, 37, 1), 100 + i as u16);
        }

        let grid_height = 50.0 * 15.0;
        let grid_width = 37.0 * 9.0;
        let cell_height = grid_height / cs.terminal_rows as f64;
        for target_row in 20..24u16 {
            let y = target_row as f64 * cell_height + cell_height / 2.0;
            let row = pixel_y_to_row(y, grid_height, cs.terminal_rows).unwrap();
            let col = pixel_x_to_col(100.0, grid_width, cs.terminal_cols).unwrap();
            assert_eq!(cs.hit_test(col, row), Some(100 + target_row - 20));
        }
    }
}
