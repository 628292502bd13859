//! Detail overlay rendering.
//!
//! Displays a modal overlay with detailed information about the selected
//! metric: its intake range, flags, the rules that read it and its trend
//! over the current series.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Sparkline, Wrap},
    Frame,
};

use super::dashboard::format_change;
use crate::app::App;
use crate::data::{trend, Metric};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the metric detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref data) = app.data else {
        return;
    };

    let metric = app.selected_metric();

    let overlay_width = (area.width * 90 / 100).clamp(MIN_OVERLAY_WIDTH, 100);
    let overlay_height = (area.height * 85 / 100).clamp(MIN_OVERLAY_HEIGHT, 40);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Header with reading info
        Constraint::Min(4),    // Rules that read the metric
        Constraint::Length(6), // Trend
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    // ===== HEADER SECTION =====
    let status = data.status_of(metric);
    let status_style = app.theme.status_style(status);
    let value = data.vitals.get(metric);
    let range = app.settings.ranges.range(metric);

    let mean = app
        .summary()
        .and_then(|s| s.mean(metric))
        .map(|m| metric.format_value(m))
        .unwrap_or_else(|| "-".to_string());
    let change = trend::latest_change(&app.series, metric)
        .map(|c| format_change(metric, c))
        .unwrap_or_else(|| "-".to_string());

    let mut header_lines = vec![
        Line::from(vec![Span::styled(
            format!(" {} ({}) ", metric.label(), metric.name()),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::raw(" Value: "),
            Span::styled(
                format!("{} {}", metric.format_value(value), metric.unit()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Status: "),
            Span::styled(
                format!("{} {}", status.symbol(), status.label()),
                status_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            " Range: {}-{}    Default: {}    Step: {}",
            metric.format_value(range.min),
            metric.format_value(range.max),
            metric.format_value(range.default),
            metric.format_value(range.step),
        )),
        Line::from(format!(" Series mean: {}    Last change: {}", mean, change)),
    ];

    if let Some(warning) = data.warning_for(metric) {
        header_lines.push(Line::from(Span::styled(
            format!(" {}", warning),
            Style::default().fg(app.theme.warning),
        )));
    }

    let header = Paragraph::new(header_lines).block(
        Block::default()
            .title(" Metric Detail ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.highlight)),
    );
    frame.render_widget(header, chunks[0]);

    // ===== RULES SECTION =====
    let mut rule_lines: Vec<Line> = Vec::new();
    for rule in data.result.rules_for(metric) {
        rule_lines.push(Line::from(Span::styled(
            format!(" {}", rule.id),
            app.theme.status_style(rule.severity).add_modifier(Modifier::BOLD),
        )));
        rule_lines.extend(rule.messages.iter().map(|m| Line::from(format!("   {}", m))));
    }
    if rule_lines.is_empty() {
        rule_lines.push(Line::from(""));
        rule_lines.push(Line::from(Span::styled(
            "  No rules fired for this reading",
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let rules = Paragraph::new(rule_lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Fired Rules ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(rules, chunks[1]);

    // ===== TREND SECTION =====
    let values = sparkline_data(&app.series.values(metric), metric);
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .title(format!(" Trend ({} days) ", values.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .data(values.as_slice())
        .style(Style::default().fg(app.theme.trend));
    frame.render_widget(sparkline, chunks[2]);

    // ===== FOOTER =====
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " +/-:adjust  Esc:close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[3]);
}

/// Scale metric values to integers for the sparkline widget.
///
/// Values are offset by the series minimum so small swings stay visible.
fn sparkline_data(values: &[f64], metric: Metric) -> Vec<u64> {
    let scale = match metric {
        Metric::Weight | Metric::SleepHours => 10.0,
        _ => 1.0,
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    values
        .iter()
        .map(|v| ((v - min) * scale).round() as u64 + 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_data_is_offset_and_scaled() {
        assert_eq!(sparkline_data(&[70.0, 69.8, 70.5], Metric::Weight), vec![3, 1, 8]);
        assert_eq!(sparkline_data(&[8000.0, 8500.0], Metric::Steps), vec![1, 501]);
        assert!(sparkline_data(&[], Metric::Steps).is_empty());
    }
}
