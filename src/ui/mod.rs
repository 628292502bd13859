//! Terminal rendering using ratatui.
//!
//! - [`common`]: Header, tabs, status bar and help overlay
//! - [`dashboard`]: Current readings with trends and alerts
//! - [`nutrition`]: Nutrition advice list
//! - [`report`]: Series summary and per-day table
//! - [`detail`]: Metric detail overlay
//! - [`theme`]: Colors and styles

pub mod common;
pub mod dashboard;
pub mod detail;
pub mod nutrition;
pub mod report;
pub mod theme;

pub use theme::Theme;

/// Sparkline characters (8 levels of height).
pub(crate) const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render normalized sparkline levels, padded to `width` cells.
pub(crate) fn render_sparkline(levels: &[u8], width: usize) -> String {
    if levels.is_empty() {
        return " ".repeat(width);
    }

    let start = levels.len().saturating_sub(width);
    levels[start..]
        .iter()
        .map(|&v| SPARKLINE_CHARS[v.min(7) as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkline_placeholder_and_truncation() {
        assert_eq!(render_sparkline(&[], 4), "    ");
        assert_eq!(render_sparkline(&[0, 7, 3, 9], 3), "█▄█");
    }
}
