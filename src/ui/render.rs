//! Rendering logic using Ratatui.

use super::app::App;
use crate::catalog::Category;
use crate::session::format_clock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Title panel
            Constraint::Length(3), // Round clock
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_title_panel(frame, app, chunks[1]);
    render_clock_panel(frame, app, chunks[2]);

    if app.show_settings {
        render_settings_popup(frame, app);
    }
}

/// Render the header panel.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = app.session.catalog();
    let settings = app.session.settings();
    let title = format!(
        "Charades - {} title{} | {}/{} categories enabled",
        catalog.len(),
        if catalog.len() == 1 { "" } else { "s" },
        settings.enabled_count(),
        Category::ALL.len()
    );

    let help_text = "space: draw a title | +/-: round length | s: categories | q: quit";

    let header_text = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(help_text, Style::default().fg(Color::DarkGray))),
    ];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );

    frame.render_widget(header, area);
}

/// Render the big center panel with the current title.
fn render_title_panel(frame: &mut Frame, app: &App, area: Rect) {
    let time_up = app.session.is_time_up();

    let border_color = if time_up && app.flash_on {
        Color::Red
    } else {
        Color::Yellow
    };

    let mut content: Vec<Line> = Vec::new();

    match app.session.current() {
        Some(item) => {
            if time_up {
                let banner_style = if app.flash_on {
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                };
                content.push(Line::from(Span::styled(" TIME'S UP! ", banner_style)));
                content.push(Line::default());
            }
            content.push(Line::from(Span::styled(
                item.title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            content.push(Line::from(Span::styled(
                format!("({})", item.category),
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => {
            content.push(Line::from(Span::styled(
                "Press Space to draw the first title",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    // Center vertically inside the panel.
    let inner_height = area.height.saturating_sub(2) as usize;
    let pad = inner_height.saturating_sub(content.len()) / 2;
    let mut lines = vec![Line::default(); pad];
    lines.extend(content);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title("Current title")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );

    frame.render_widget(paragraph, area);
}

/// Render the round clock panel.
fn render_clock_panel(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let round = format_clock(session.timer_minutes() * 60);

    let line = if session.is_time_up() {
        let style = if app.flash_on {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        Line::from(vec![
            Span::styled("0:00", style),
            Span::raw(format!("  round length {}", round)),
        ])
    } else if session.is_counting() {
        let remaining = session.seconds_remaining();
        let color = clock_color(remaining);
        Line::from(vec![
            Span::styled(
                format_clock(remaining),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  remaining of a {} round", round)),
        ])
    } else {
        Line::from(vec![
            Span::raw("No round running"),
            Span::styled(
                format!("  (next round {})", round),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    let clock = Paragraph::new(line).block(
        Block::default()
            .title("Round clock")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );

    frame.render_widget(clock, area);
}

/// Render the category settings popup over the main screen.
fn render_settings_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(46, Category::ALL.len() as u16 + 2, frame.area());

    let block = Block::default()
        .title("Categories (space: toggle, esc: close)")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let catalog = app.session.catalog();
    let settings = app.session.settings();

    let lines: Vec<Line> = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, &category)| {
            let marker = if settings.is_enabled(category) {
                "[x]"
            } else {
                "[ ]"
            };
            let text = format!(
                " {} {} ({} title{})",
                marker,
                category.label(),
                catalog.count_in(category),
                if catalog.count_in(category) == 1 { "" } else { "s" }
            );

            let style = if i == app.settings_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Line::from(Span::styled(text, style))
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Center a fixed-size rect inside `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clock color by urgency.
fn clock_color(seconds_remaining: u32) -> Color {
    match seconds_remaining {
        0..=10 => Color::Red,
        11..=30 => Color::Yellow,
        _ => Color::Green,
    }
}
