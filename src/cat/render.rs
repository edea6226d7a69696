//! Cat Clicker screen: header, the cat, the shop, and the save/reset bar.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions;
use super::effects::{Particle, ParticleKind};
use super::logic::{
    can_afford, click_upgrade_cost, format_number, format_rate, next_cost, producer_rate,
};
use super::state::Millis;
use super::CatGame;

const CAT_ART: &[&str] = &[
    r"   /\_/\   ",
    r"  ( o.o )  ",
    r"   > ^ <   ",
    r"  /|   |\  ",
    r" (_|   |_) ",
];

const CAT_BLINK_ART: &[&str] = &[
    r"   /\_/\   ",
    r"  ( -.- )  ",
    r"   > ^ <   ",
    r"  /|   |\  ",
    r" (_|   |_) ",
];

const CAT_PRESSED_ART: &[&str] = &[
    r"           ",
    r"   /\_/\   ",
    r"  ( ^ω^ )  ",
    r"  /> ♥ <\  ",
    r" (_/___\_) ",
];

/// Art rows + hint row + borders.
const CAT_HEIGHT: u16 = CAT_ART.len() as u16 + 3;

const FALLING_CAT: &str = "🐈";

pub fn render(game: &CatGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let now = game.now();
    let header_height = if game.offline_gain > 0.0 { 5 } else { 4 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(CAT_HEIGHT),
            Constraint::Length(1), // click upgrade
            Constraint::Min(4),    // shop
            Constraint::Length(1), // save / reset
        ])
        .split(area);

    render_header(game, f, chunks[0], now);
    render_cat(game, f, chunks[1], click_state, now);
    render_upgrade(game, f, chunks[2], click_state);
    render_shop(game, f, chunks[3], click_state);
    render_footer(game, f, chunks[4], click_state, now);

    // Drawn last so the cats fall over everything
    render_falling_cats(&game.effects.particles, f, area, now);
}

fn borders_for(width: u16) -> Borders {
    if is_narrow_layout(width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn render_header(game: &CatGame, f: &mut Frame, area: Rect, now: Millis) {
    // Points turn red briefly when a purchase is refused
    let points_style = if game.effects.reject_flash(now) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" 🐾 ", Style::default()),
            Span::styled(format_number(game.state.points), points_style),
            Span::styled(" points", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" ⏱ {}/s", format_rate(game.rate())),
                Style::default().fg(Color::White),
            ),
            Span::styled("  ", Style::default()),
            Span::styled(
                format!("👆 +{} per click", game.state.click_power),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    if game.offline_gain > 0.0 {
        lines.push(Line::from(Span::styled(
            format!(" 💤 +{} while you were away", format_number(game.offline_gain)),
            Style::default().fg(Color::Green),
        )));
    }

    let border_color = if game.effects.purchase_flash(now) {
        Color::White
    } else {
        Color::Yellow
    };
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            " 🐱 Cat Clicker ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn cat_frame(game: &CatGame, now: Millis) -> &'static [&'static str] {
    if game.effects.click_flash(now) {
        CAT_PRESSED_ART
    } else if (now / 400) % 10 == 0 {
        CAT_BLINK_ART
    } else {
        CAT_ART
    }
}

fn render_cat(
    game: &CatGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    now: Millis,
) {
    let pressed = game.effects.click_flash(now);
    let cat_style = if pressed {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut lines: Vec<Line> = cat_frame(game, now)
        .iter()
        .map(|row| Line::from(Span::styled(*row, cat_style)).centered())
        .collect();
    lines.push(
        Line::from(Span::styled(
            "tap the cat (Space)",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    );

    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(if pressed { Color::White } else { Color::DarkGray }));
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block), area);

    click_state
        .borrow_mut()
        .add_click_target(area, actions::CLICK_CAT);

    for p in &game.effects.particles {
        if let ParticleKind::FloatingText(text) = &p.kind {
            if let Some(rect) = floating_text_rect(p, text, inner, now) {
                let style = Style::default()
                    .fg(if p.progress(now) < 0.5 { Color::Yellow } else { Color::DarkGray })
                    .add_modifier(Modifier::BOLD);
                f.render_widget(Paragraph::new(Span::styled(text.as_str(), style)), rect);
            }
        }
    }
}

/// Where a "+N" sits at `now`: rises from the bottom of the cat box to the
/// top over its lifetime, offset sideways by the particle's column.
fn floating_text_rect(p: &Particle, text: &str, area: Rect, now: Millis) -> Option<Rect> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let width = (Line::from(text).width() as u16).min(area.width);
    let travel = area.height.saturating_sub(1) as f64;
    let row = area.y + area.height - 1 - (p.progress(now) * travel).round() as u16;

    let center = (area.x + area.width / 2) as i32 + p.col as i32 - (width / 2) as i32;
    let max_x = (area.x + area.width - width) as i32;
    let x = center.clamp(area.x as i32, max_x) as u16;
    Some(Rect::new(x, row, width, 1))
}

fn render_upgrade(
    game: &CatGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let price = click_upgrade_cost(game.state.click_power);
    let affordable = can_afford(&game.state, price);
    let style = if affordable {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(" [U] ", style),
        Span::styled(
            format!(
                "Click power {} → {}",
                game.state.click_power,
                game.state.click_power.saturating_add(1)
            ),
            style,
        ),
        Span::styled(
            format!("  {}", format_number(price)),
            Style::default().fg(if affordable { Color::Yellow } else { Color::DarkGray }),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
    click_state
        .borrow_mut()
        .add_click_target(area, actions::UPGRADE_CLICK);
}

fn render_shop(
    game: &CatGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let block = Block::default()
        .borders(borders_for(area.width))
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Shop ", Style::default().fg(Color::Cyan)));
    let inner = block.inner(area);

    let with_descriptions = shop_lines(game, true);
    // Descriptions go first when the shop does not fit
    let cl = if is_narrow_layout(area.width)
        || with_descriptions.visual_height(inner.width) > inner.height as usize
    {
        shop_lines(game, false)
    } else {
        with_descriptions
    };

    let mut cs = click_state.borrow_mut();
    cl.register_targets_with_block(area, &block, &mut cs, 0, inner.width);
    drop(cs);
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn shop_lines(game: &CatGame, descriptions: bool) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    for (i, def) in game.catalog.iter().enumerate() {
        let owned = game.state.owned(&def.id);
        let price = next_cost(&game.state, def);
        let affordable = can_afford(&game.state, price);
        let action = actions::BUY_PRODUCER_BASE + i as u16;

        let key_style = if affordable {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let name_style = if affordable {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let key = if i < 9 {
            format!(" [{}] ", i + 1)
        } else {
            "     ".to_string()
        };

        let line = Line::from(vec![
            Span::styled(key, key_style),
            Span::styled(format!("{} {}", def.icon, def.name), name_style),
            Span::styled(format!(" x{}", owned), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("  {}", format_number(price)),
                Style::default().fg(if affordable { Color::Yellow } else { Color::DarkGray }),
            ),
        ]);
        cl.push_clickable(line, action);

        if descriptions {
            let rate = if owned > 0 {
                format!(" · {}/s total", format_rate(producer_rate(&game.state, def)))
            } else {
                String::new()
            };
            let detail = Line::from(Span::styled(
                format!("     {} · {}/s each{}", def.description, format_rate(def.base_rate), rate),
                Style::default().fg(Color::DarkGray),
            ));
            cl.push_clickable(detail, action);
        }
    }
    cl
}

fn render_footer(
    game: &CatGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    now: Millis,
) {
    let mut cs = click_state.borrow_mut();

    if game.confirm_reset {
        TabBar::new(" │ ")
            .tab(
                "Reset your game? [Y] yes",
                Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD),
                actions::CONFIRM_RESET,
            )
            .tab("[N] no", Style::default().fg(Color::White), actions::CANCEL_RESET)
            .render(f, area, &mut cs);
        return;
    }

    let (save_label, save_style) = if game.effects.saved_flash(now) {
        ("Saved ✓", Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("[S] Save", Style::default().fg(Color::Green))
    };
    TabBar::new(" │ ")
        .tab(save_label, save_style, actions::SAVE)
        .tab("[R] Reset", Style::default().fg(Color::Red), actions::RESET)
        .render(f, area, &mut cs);
}

fn render_falling_cats(particles: &[Particle], f: &mut Frame, area: Rect, now: Millis) {
    for p in particles {
        if p.kind != ParticleKind::FallingCat {
            continue;
        }
        if let Some(rect) = falling_cat_rect(p, area, now) {
            f.render_widget(Paragraph::new(FALLING_CAT), rect);
        }
    }
}

/// Column is a 1/100th fraction of the width, row follows the fall progress.
fn falling_cat_rect(p: &Particle, area: Rect, now: Millis) -> Option<Rect> {
    let width = Line::from(FALLING_CAT).width() as u16;
    if area.width < width || area.height == 0 {
        return None;
    }
    let span = (area.width - width) as u32;
    let x = area.x + (p.col.clamp(0, 99) as u32 * span / 99) as u16;
    let row = (p.progress(now) * area.height.saturating_sub(1) as f64).round() as u16;
    Some(Rect::new(x, area.y + row, width, 1))
}
