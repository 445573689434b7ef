// src/quiz/history.rs

use crate::models::quiz_record::{HistoryItem, QuizHistoryEntry, ScoreBand};

/// Share of correct answers, 0.0 to 100.0. An empty quiz counts as 0.
pub fn ratio_percent(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    score as f64 / total as f64 * 100.0
}

pub fn score_band(percent: f64) -> ScoreBand {
    if percent >= 90.0 {
        ScoreBand::Excellent
    } else if percent >= 80.0 {
        ScoreBand::Great
    } else if percent >= 70.0 {
        ScoreBand::Good
    } else if percent >= 60.0 {
        ScoreBand::Fair
    } else {
        ScoreBand::Low
    }
}

impl From<QuizHistoryEntry> for HistoryItem {
    fn from(entry: QuizHistoryEntry) -> Self {
        let percent = ratio_percent(entry.score, entry.total_questions);

        Self {
            percent: percent.round() as u32,
            band: score_band(percent),
            entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32, total: u32) -> QuizHistoryEntry {
        QuizHistoryEntry {
            id: "q".into(),
            score,
            total_questions: total,
            date: None,
        }
    }

    #[test]
    fn test_bands() {
        assert_eq!(score_band(100.0), ScoreBand::Excellent);
        assert_eq!(score_band(90.0), ScoreBand::Excellent);
        assert_eq!(score_band(89.9), ScoreBand::Great);
        assert_eq!(score_band(75.0), ScoreBand::Good);
        assert_eq!(score_band(60.0), ScoreBand::Fair);
        assert_eq!(score_band(59.0), ScoreBand::Low);
    }

    #[test]
    fn test_history_item_rounds_percent() {
        let item = HistoryItem::from(entry(2, 3));
        assert_eq!(item.percent, 67);
        assert_eq!(item.band, ScoreBand::Fair);

        let item = HistoryItem::from(entry(0, 0));
        assert_eq!(item.percent, 0);
        assert_eq!(item.band, ScoreBand::Low);
    }
}
