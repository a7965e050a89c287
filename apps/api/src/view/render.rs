//! Plain-text rendering of the display state and the history list.

use crate::analysis::{NormalizedCategory, RadarPoint};
use crate::history::HistoryEntry;
use crate::view::DisplayState;

const BAR_WIDTH: usize = 20;
const RADAR_LABEL_WIDTH: usize = 22;

pub fn render_display(state: &DisplayState) -> String {
    let mut out = String::new();
    if state.loading {
        out.push_str("Analyzing...\n");
    }
    if !state.results_visible {
        return out;
    }

    if let Some(error) = &state.error {
        out.push_str(&format!("Analysis Failed\n{error}\n"));
        return out;
    }

    if let Some(line) = &state.shaming_line {
        out.push_str(&format!("\"{line}\"\n\n"));
    }
    if let Some(p) = state.probabilities {
        out.push_str(&format!("Chance of being beaten up: {}%\n", p.beaten_up));
        out.push_str(&format!("Chance of being cancelled: {}%\n\n", p.cancelled));
    }
    if !state.radar.is_empty() {
        render_radar(&mut out, &state.radar);
    }

    for category in &state.categories {
        render_category(&mut out, category);
    }
    out
}

/// One row per fixed axis, AI score first.
fn render_radar(out: &mut String, radar: &[RadarPoint]) {
    out.push_str("Radar (AI / Potential)\n");
    for point in radar {
        out.push_str(&format!(
            "  {:<width$}{:>3} / {:>3}\n",
            point.label,
            point.ai_score,
            point.potential_score,
            width = RADAR_LABEL_WIDTH
        ));
    }
    out.push('\n');
}

fn render_category(out: &mut String, category: &NormalizedCategory) {
    let score = &category.score;
    out.push_str(&format!("{}\n", category.title));
    out.push_str(&format!(
        "  AI Score   {} {:>3}%\n",
        bar(score.ai_score),
        score.ai_score
    ));
    out.push_str(&format!(
        "  Potential  {} {:>3}%\n",
        bar(score.potential_score),
        score.potential_score
    ));
    if !score.reason.is_empty() {
        out.push_str(&format!("  {}\n", score.reason));
    }
}

fn bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = (percent as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Numbered newest-first listing; positions start at 1.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No past analyses found.\n".to_string();
    }

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let score = entry
            .data
            .conversational_reception_score()
            .map(|s| format!("{s}/100"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>2}. {}  ({})\n",
            i + 1,
            entry.text,
            entry.date.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&format!(
            "    AI Summary: {}\n",
            entry.data.history_summary().unwrap_or("-")
        ));
        out.push_str(&format!("    Reception Score: {score}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{normalize, radar_series, AnalysisPayload};
    use crate::view::Probabilities;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn payload() -> AnalysisPayload {
        AnalysisPayload::from_value(json!({
            "racism": {"ai_score": 50, "potential_score": 100, "reason": "pointed"},
            "history_summary": "Spicy but survivable",
            "conversational_reception_score": 41
        }))
        .unwrap()
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(0), format!("[{}]", ".".repeat(20)));
        assert_eq!(bar(100), format!("[{}]", "#".repeat(20)));
        assert_eq!(bar(50).matches('#').count(), 10);
        assert_eq!(bar(250), bar(100));
    }

    #[test]
    fn test_render_results() {
        let state = DisplayState {
            categories: normalize(&payload()),
            shaming_line: Some("Bold.".into()),
            probabilities: Some(Probabilities {
                beaten_up: 12,
                cancelled: 34,
            }),
            results_visible: true,
            ..Default::default()
        };
        let text = render_display(&state);
        assert!(text.contains("\"Bold.\""));
        assert!(text.contains("Chance of being cancelled: 34%"));
        assert!(text.contains("Racism\n"));
        assert!(text.contains(" 50%"));
        assert!(text.contains("pointed"));
    }

    #[test]
    fn test_render_radar_rows() {
        let state = DisplayState {
            radar: radar_series(&payload()).to_vec(),
            results_visible: true,
            ..Default::default()
        };
        let text = render_display(&state);
        assert!(text.starts_with("Radar (AI / Potential)\n"));
        assert!(text.contains(&format!("  {:<22} 50 / 100\n", "Racism")));
        assert!(text.contains(&format!("  {:<22}  0 /   0\n", "Parental Disapproval")));
        assert_eq!(text.lines().filter(|l| l.starts_with("  ")).count(), 5);
    }

    #[test]
    fn test_render_error_only() {
        let state = DisplayState {
            error: Some("rate limited".into()),
            results_visible: true,
            ..Default::default()
        };
        assert_eq!(render_display(&state), "Analysis Failed\nrate limited\n");
    }

    #[test]
    fn test_render_hidden_results() {
        assert_eq!(render_display(&DisplayState::default()), "");
    }

    #[test]
    fn test_render_history() {
        assert_eq!(render_history(&[]), "No past analyses found.\n");

        let entry = HistoryEntry {
            text: "hello".into(),
            data: payload(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };
        let text = render_history(&[entry]);
        assert!(text.starts_with(" 1. hello  (2024-05-01 12:30)"));
        assert!(text.contains("AI Summary: Spicy but survivable"));
        assert!(text.contains("Reception Score: 41/100"));
    }
}
