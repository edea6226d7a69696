//! Clickable UI components.
//!
//! Each component renders its lines and registers the matching click targets
//! in one place, so a label and its hit region can never drift apart.
//!
//! - [`TabBar`]: a single row of buttons (Save / Reset, or the y/n prompt).
//! - [`ClickableList`]: vertical lines, some bound to actions (the shop).

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A horizontal row of buttons.
///
/// Click targets are computed from the rendered label widths (emoji and CJK
/// included), so every column of the row belongs to exactly one button.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("💾 Save", save_style, actions::SAVE)
///     .tab("🗑 Reset", reset_style, actions::RESET)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Wrap the bar in a [`Block`]. Targets follow `Block::inner()`.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let mut tab_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            tab_widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for column accuracy, outer y/height for tap tolerance
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with click actions.
///
/// Mark a line clickable when you add it, then call one of the
/// `register_targets*` methods once; rows are worked out from line order, so
/// inserting a header above the shop moves every buy target with it.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Shop"));
/// cl.push_clickable(Line::from("😺 Auto-Purr  10"), actions::BUY_PRODUCER_BASE);
/// cl.register_targets_with_block(area, &block, &mut cs, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Rows these lines occupy when wrapped at `width` columns.
    pub fn visual_height(&self, width: u16) -> usize {
        if width == 0 {
            return self.lines.len();
        }
        Paragraph::new(self.lines.clone())
            .wrap(Wrap { trim: false })
            .line_count(width)
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for every clickable line.
    ///
    /// * `top_offset` / `bottom_offset`: rows taken by borders above/below.
    /// * `scroll`: vertical scroll in visual rows.
    /// * `inner_width`: wrap width, or `0` when the widget does not wrap
    ///   (one logical line = one row).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        if inner_width == 0 {
            for &(line_idx, action_id) in &self.actions {
                if line_idx < scroll {
                    continue;
                }
                let row = content_y + (line_idx - scroll);
                if row >= content_end {
                    continue;
                }
                cs.add_row_target(area, row, action_id);
            }
            return;
        }

        // Same word wrapping the Paragraph renders with
        let mut visual_starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut visual_heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            visual_starts.push(cumulative);
            let h = Paragraph::new(line.clone())
                .wrap(Wrap { trim: false })
                .line_count(inner_width)
                .max(1) as u16;
            visual_heights.push(h);
            cumulative = cumulative.saturating_add(h);
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            if li >= self.lines.len() {
                continue;
            }
            for r in 0..visual_heights[li] {
                let vr = visual_starts[li] + r;
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }

    /// [`register_targets`](Self::register_targets) with the border offsets
    /// taken from `block`.
    pub fn register_targets_with_block(
        &self,
        area: Rect,
        block: &Block,
        cs: &mut ClickState,
        scroll: u16,
        inner_width: u16,
    ) {
        let inner = block.inner(area);
        let top = inner.y.saturating_sub(area.y);
        let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
        self.register_targets(area, cs, top, bottom, scroll, inner_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratzilla::ratatui::widgets::Borders;

    #[test]
    fn clickable_list_basic() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Shop"));
        cl.push_clickable(Line::from("Auto-Purr"), 100);
        cl.push_clickable(Line::from("Catnip Farm"), 101);
        cl.push(Line::from("(hint)"));

        assert_eq!(cl.len(), 4);

        // Borders::ALL → top_offset=1, bottom_offset=1
        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 7), Some(100));
        assert_eq!(cs.hit_test(10, 8), Some(101));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn clickable_list_with_scroll() {
        let mut cl = ClickableList::new();
        for i in 0..4 {
            cl.push_clickable(Line::from(format!("item {}", i)), 100 + i);
        }

        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 10), Some(102));
        assert_eq!(cs.hit_test(10, 11), Some(103));
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn clickable_list_clipped_by_area() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("item {}", i)), 50 + i as u16);
        }

        // height 5 with borders → 3 content rows
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 1), Some(50));
        assert_eq!(cs.hit_test(10, 3), Some(52));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn clickable_list_empty() {
        let cl: ClickableList = ClickableList::new();
        let area = Rect::new(0, 0, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);
        assert_eq!(cs.targets.len(), 0);
        assert_eq!(cl.visual_height(20), 0);
    }

    #[test]
    fn wrapped_line_is_clickable_on_every_row() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890"));
        cl.push_clickable(Line::from("123456789012345678901234567890"), 42);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 1), None);
        assert_eq!(cs.hit_test(5, 2), Some(42));
        assert_eq!(cs.hit_test(5, 4), Some(42));
        assert_eq!(cs.hit_test(5, 5), None);
    }

    #[test]
    fn word_wrap_shifts_following_targets() {
        // 20 columns, but word wrapping at 10 needs 3 rows
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("aaaaaa bbbbbb cccccc"), 100);
        cl.push_clickable(Line::from("Catnip Farm"), 101);
        assert_eq!(cl.visual_height(10), 5);

        let area = Rect::new(0, 0, 10, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 2), Some(100));
        assert_eq!(cs.hit_test(5, 3), Some(101));
        assert_eq!(cs.hit_test(5, 4), Some(101));
        assert_eq!(cs.hit_test(5, 5), None);
    }

    #[test]
    fn block_offsets_follow_borders() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("Auto-Purr"), 100);

        let area = Rect::new(0, 3, 40, 6);
        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &Block::default().borders(Borders::ALL), &mut cs, 0, 0);
        assert_eq!(cs.hit_test(5, 4), Some(100));
        assert_eq!(cs.hit_test(5, 3), None);

        let mut cs = ClickState::new();
        cl.register_targets_with_block(area, &Block::default().borders(Borders::BOTTOM), &mut cs, 0, 0);
        assert_eq!(cs.hit_test(5, 3), Some(100));
    }

    #[test]
    fn visual_height_counts_wrapped_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("short"));
        cl.push(Line::from("123456789012345678901234567890"));
        assert_eq!(cl.visual_height(80), 2);
        assert_eq!(cl.visual_height(10), 4);
        // Zero width falls back to one row per line
        assert_eq!(cl.visual_height(0), 2);
    }
}
