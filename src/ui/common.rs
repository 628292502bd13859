//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::HealthStatus;

/// Render the header bar with the overall health overview.
///
/// Displays: status indicator, flagged metric counts, alert and advice totals.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(
                " HEALTHIQ ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Waiting for complete readings..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let result = &data.result;

    let mut warning = 0;
    let mut critical = 0;
    for metric in crate::data::Metric::ALL {
        match result.status_of(metric) {
            HealthStatus::Healthy => {}
            HealthStatus::Warning => warning += 1,
            HealthStatus::Critical => critical += 1,
        }
    }

    let overall = result.overall();

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.status_style(overall)),
        Span::styled("HEALTHIQ ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(overall.label(), app.theme.status_style(overall)),
        Span::raw(" │ "),
        count_span(warning, Style::default().fg(app.theme.warning)),
        Span::raw(" warn "),
        count_span(
            critical,
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" crit │ "),
        Span::styled(
            format!("{}", result.alerts.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" alerts │ "),
        Span::styled(
            format!("{}", result.advice.len()),
            Style::default().fg(app.theme.advice),
        ),
        Span::raw(" advice │ "),
        Span::raw(app.sample_description()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn count_span(count: usize, style: Style) -> Span<'static> {
    if count > 0 {
        Span::styled(format!("{}", count), style)
    } else {
        Span::styled("0", Style::default().add_modifier(Modifier::DIM))
    }
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Dashboard "),
        Line::from(" 2:Nutrition "),
        Line::from(" 3:Report "),
    ];

    let selected = match app.current_view {
        View::Dashboard => 0,
        View::Nutrition => 1,
        View::Report => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: intake source, time since last evaluation, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();

        let controls = match app.current_view {
            View::Dashboard => "+/-:adjust a:record Enter:detail Tab:switch ?:help q:quit",
            View::Nutrition => "↑↓:scroll Tab:switch ?:help q:quit",
            View::Report => "g:new week m:monthly e:csv x:json Tab:switch ?:help q:quit",
        };

        let source = match app.load_error {
            Some(ref err) => format!("{} ({})", app.source_description(), err),
            None => app.source_description().to_string(),
        };

        format!(
            " {} > {} | Evaluated {:.1}s ago | {}",
            source,
            app.current_view.label(),
            elapsed.as_secs_f64(),
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry d:defaults", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Metric detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Readings"),
        Line::from("  +/-       Step selected metric"),
        Line::from("  d         Reset to defaults"),
        Line::from("  a         Record as next day"),
        Line::from(""),
        section(" Series"),
        Line::from("  g         New random week"),
        Line::from("  m         Toggle monthly pattern"),
        Line::from("  e         Export rows to CSV"),
        Line::from("  x         Export report to JSON"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload readings"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 29u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
