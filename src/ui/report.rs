//! Report view rendering.
//!
//! Summary statistics and a steps bar chart over the current series,
//! above a per-day table of every entry.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{Metric, Summary};

/// Number of most recent days shown in the steps chart.
const CHART_DAYS: usize = 14;

/// Render the Report view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(9), Constraint::Min(5)]).split(area);
    let top = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[0]);

    render_summary(frame, app, app.summary().as_ref(), top[0]);
    render_steps_chart(frame, app, top[1]);
    render_entries(frame, app, chunks[1]);
}

fn render_summary(frame: &mut Frame, app: &App, summary: Option<&Summary>, area: Rect) {
    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let Some(summary) = summary else {
        let empty = Paragraph::new(Span::styled(
            "  No data: the series is empty",
            Style::default().add_modifier(Modifier::DIM),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::raw(format!(" {:<18}", label)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ])
    };
    let mean_of = |metric: Metric| {
        summary
            .mean(metric)
            .map(|m| format!("{} {}", metric.format_value(m), metric.unit()))
            .unwrap_or_else(|| "-".to_string())
    };

    let weight_delta = summary
        .weight_delta()
        .map(|d| super::dashboard::format_change(Metric::Weight, d) + " kg")
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        stat("Average steps", mean_of(Metric::Steps)),
        stat("Avg heart rate", mean_of(Metric::HeartRate)),
        stat("Weight change", weight_delta),
        stat("Avg blood pressure", summary.mean_bp().unwrap_or_else(|| "-".to_string())),
        stat("Avg sleep", mean_of(Metric::SleepHours)),
        Line::from(Span::styled(
            format!(" {} days, {}", summary.entries, app.sample_description()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_steps_chart(frame: &mut Frame, app: &App, area: Rect) {
    // Labels are day-of-month so each bar stays two cells wide
    let recent: Vec<(String, u64)> = {
        let entries: Vec<_> = app.series.entries().collect();
        let start = entries.len().saturating_sub(CHART_DAYS);
        entries[start..]
            .iter()
            .map(|e| {
                let steps = e.readings.get(Metric::Steps).unwrap_or(0.0).max(0.0);
                (e.date.format("%d").to_string(), steps.round() as u64)
            })
            .collect()
    };
    let data: Vec<(&str, u64)> = recent.iter().map(|(l, v)| (l.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Steps ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .data(data.as_slice())
        .bar_width(2)
        .bar_gap(1)
        .bar_style(Style::default().fg(app.theme.trend))
        .value_style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(chart, area);
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        "Date",
        "Steps",
        "Heart Rate",
        "Weight",
        "Blood Pressure",
        "Sleep",
    ])
    .height(1)
    .style(app.theme.header);

    let cell = |readings: &crate::data::ReadingSet, metric: Metric| {
        readings
            .get(metric)
            .map(|v| metric.format_value(v))
            .unwrap_or_else(|| "-".to_string())
    };

    let rows: Vec<Row> = app
        .series
        .entries()
        .map(|e| {
            let r = &e.readings;
            Row::new(vec![
                Cell::from(e.date.to_string()),
                Cell::from(cell(r, Metric::Steps)),
                Cell::from(cell(r, Metric::HeartRate)),
                Cell::from(cell(r, Metric::Weight)),
                Cell::from(format!(
                    "{}/{}",
                    cell(r, Metric::SystolicBp),
                    cell(r, Metric::DiastolicBp)
                )),
                Cell::from(cell(r, Metric::SleepHours)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let selected = app.selected_entry_index.min(app.series.len().saturating_sub(1));
    let position_info = if app.series.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", selected + 1, app.series.len())
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Series{} [e:csv x:json] ", position_info))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
