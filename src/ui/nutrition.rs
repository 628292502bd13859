//! Nutrition view rendering.
//!
//! Lists the advice produced for the current readings, tagged with the
//! topic of the rule that produced it. The selected item is shown in full
//! below the list.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::{rules, AdviceRule, Category, Metric, NutritionStatus};

/// Render the Nutrition view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let paragraph = Paragraph::new("No advice until all readings are present").block(
            Block::default()
                .title(" Nutrition ")
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
        frame.render_widget(paragraph, area);
        return;
    };

    let result = &data.result;

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(5),
    ])
    .split(area);

    // Optimal banner when only the general advice fired
    let banner = match result.nutrition_status() {
        NutritionStatus::Optimal => Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(app.theme.healthy)),
            Span::raw(rules::OPTIMAL_MESSAGE),
        ]),
        NutritionStatus::Tailored => Line::from(vec![
            Span::styled(" ● ", Style::default().fg(app.theme.advice)),
            Span::raw("Advice tailored to flagged readings"),
        ]),
    };
    frame.render_widget(Paragraph::new(banner), chunks[0]);

    let entries = advice_entries(&result.fired);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|(topic, message)| {
            let title = message.split_once(':').map_or(*message, |(title, _)| title);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<15}", topic),
                    Style::default().fg(app.theme.advice),
                ),
                Span::raw(title),
            ]))
        })
        .collect();

    let selected = app.selected_advice_index.min(entries.len().saturating_sub(1));

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Advice [{}/{}] ", selected + 1, entries.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let body = entries
        .get(selected)
        .map(|(_, message)| *message)
        .unwrap_or_default();
    let detail = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .style(Style::default().add_modifier(Modifier::ITALIC))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
    frame.render_widget(detail, chunks[2]);
}

/// Advice messages of the fired nutrition rules with their topic, in order.
fn advice_entries(fired: &[&'static str]) -> Vec<(&'static str, &'static str)> {
    fired
        .iter()
        .filter_map(|id| rules::rule(id))
        .filter(|r| r.category == Category::Nutrition)
        .flat_map(|r| {
            let topic = topic(r);
            r.messages.iter().map(move |m| (topic, *m))
        })
        .collect()
}

fn topic(rule: &AdviceRule) -> &'static str {
    match rule.metrics {
        [] => "General",
        [Metric::SystolicBp, ..] | [Metric::DiastolicBp, ..] => "Blood Pressure",
        [Metric::Steps, ..] => "Activity",
        [metric, ..] => metric.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::rules::evaluate_vitals;
    use crate::data::Vitals;

    #[test]
    fn entries_follow_advice_order() {
        let vitals = Vitals {
            heart_rate: 110.0,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            weight: 70.0,
            sleep_hours: 5.0,
            steps: 10000.0,
        };
        let result = evaluate_vitals(&vitals);
        let entries = advice_entries(&result.fired);

        let messages: Vec<&str> = entries.iter().map(|(_, m)| *m).collect();
        assert_eq!(messages, result.advice);
        assert_eq!(entries[0].0, "Heart Rate");
        assert_eq!(entries[3].0, "Sleep");
        assert_eq!(entries.last().unwrap().0, "General");
    }
}
