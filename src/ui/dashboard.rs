//! Dashboard view rendering.
//!
//! Displays a table of the current readings with intake ranges, sparkline
//! trends and flags, above the alerts panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::render_sparkline;
use crate::app::App;
use crate::data::{rules, trend, Category, Evaluation, HealthStatus, Metric};

/// Width of the trend column in cells.
const TREND_WIDTH: usize = 8;

/// Render the Dashboard view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        render_incomplete(frame, app, area);
        return;
    };

    let alert_height = (data.result.alerts.len().max(1) as u16 + 2).min(area.height / 2);
    let chunks = Layout::vertical([Constraint::Min(5), Constraint::Length(alert_height)]).split(area);

    render_metrics(frame, app, data, chunks[0]);
    render_alerts(frame, app, data, chunks[1]);
}

fn render_metrics(frame: &mut Frame, app: &App, data: &Evaluation, area: Rect) {
    let header = Row::new(vec!["Metric", "Value", "Unit", "Range", "Trend", "Change", "Status"])
        .height(1)
        .style(app.theme.header);

    let ranges = &app.settings.ranges;

    let rows: Vec<Row> = Metric::ALL
        .iter()
        .map(|&metric| {
            let status = data.status_of(metric);
            let value = data.vitals.get(metric);
            let range = ranges.range(metric);

            // Out-of-range values are still evaluated, just marked
            let value_cell = if data.warning_for(metric).is_some() {
                Cell::from(format!("{}!", metric.format_value(value)))
                    .style(Style::default().fg(app.theme.warning))
            } else {
                Cell::from(metric.format_value(value))
            };

            let sparkline =
                render_sparkline(&trend::sparkline(&app.series, metric, TREND_WIDTH), TREND_WIDTH);

            let change = trend::latest_change(&app.series, metric)
                .map(|c| format_change(metric, c))
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(metric.label()),
                value_cell,
                Cell::from(metric.unit()),
                Cell::from(format!(
                    "{}-{}",
                    metric.format_value(range.min),
                    metric.format_value(range.max)
                )),
                Cell::from(sparkline).style(Style::default().fg(app.theme.trend)),
                Cell::from(change),
                Cell::from(status.symbol()).style(app.theme.status_style(status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Min(6),
        Constraint::Fill(1),
        Constraint::Min(TREND_WIDTH as u16),
        Constraint::Fill(1),
        Constraint::Min(6),
    ];

    let title = format!(
        " Readings [{}/{}] [+/-:adjust] ",
        app.selected_metric_index + 1,
        Metric::ALL.len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_metric_index.min(Metric::ALL.len() - 1)));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_alerts(frame: &mut Frame, app: &App, data: &Evaluation, area: Rect) {
    let result = &data.result;

    let lines: Vec<Line> = if result.alerts.is_empty() {
        vec![Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(app.theme.healthy)),
            Span::raw(rules::ALL_NORMAL_MESSAGE),
        ])]
    } else {
        result
            .fired
            .iter()
            .filter_map(|id| rules::rule(id))
            .filter(|r| r.category == Category::Alert)
            .flat_map(|r| {
                let style = app.theme.status_style(r.severity);
                r.messages
                    .iter()
                    .map(move |m| Line::from(vec![Span::styled(" ▲ ", style), Span::raw(*m)]))
            })
            .collect()
    };

    let border = if result.overall() == HealthStatus::Healthy {
        app.theme.border
    } else {
        app.theme.warning
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" Alerts ({}) ", result.alerts.len()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(border)),
    );

    frame.render_widget(paragraph, area);
}

/// Shown while the reading set cannot be evaluated.
fn render_incomplete(frame: &mut Frame, app: &App, area: Rect) {
    let missing = app.readings.missing();
    let mut lines = vec![
        Line::from(Span::styled(
            "Readings are incomplete",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(missing.iter().map(|m| {
        Line::from(vec![
            Span::styled(" ✗ ", Style::default().fg(app.theme.critical)),
            Span::raw(format!("{} ({})", m.label(), m.name())),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press d to fill in defaults",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Readings ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.critical)),
    );
    frame.render_widget(paragraph, area);
}

/// Format a day-over-day change with an explicit sign.
pub(crate) fn format_change(metric: Metric, change: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{}{}", sign, metric.format_value(change))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_is_signed() {
        assert_eq!(format_change(Metric::Steps, 2500.0), "+2500");
        assert_eq!(format_change(Metric::Weight, -0.2), "-0.2");
        assert_eq!(format_change(Metric::HeartRate, 0.0), "0");
    }
}
