// src/quiz/ranking.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::quiz::recap::RecapItem;

/// A family member the player keeps getting wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusMember {
    pub name: String,
    pub misrecognitions: u32,
}

/// Counts, per person, how often their face was answered with another name.
fn misrecognitions(items: &[RecapItem]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for item in items.iter().filter(|item| !item.is_correct) {
        *counts.entry(item.correct_answer.clone()).or_insert(0) += 1;
    }
    counts
}

/// Most misrecognized people first, ties by name. Only people with at least
/// one miss are listed.
pub fn members_to_focus(items: &[RecapItem], limit: usize) -> Vec<FocusMember> {
    let mut members: Vec<FocusMember> = misrecognitions(items)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, misrecognitions)| FocusMember {
            name,
            misrecognitions,
        })
        .collect();

    members.sort_by(|a, b| {
        b.misrecognitions
            .cmp(&a.misrecognitions)
            .then_with(|| a.name.cmp(&b.name))
    });
    members.truncate(limit);
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(name: &str, picked: &str) -> RecapItem {
        RecapItem {
            question_id: name.to_string(),
            prompt: "Who is this person?".to_string(),
            image: None,
            options: Vec::new(),
            correct_answer: name.to_string(),
            user_answer: picked.to_string(),
            is_correct: name == picked,
        }
    }

    #[test]
    fn test_all_correct_means_nobody_to_focus_on() {
        let items = vec![answered("Alice", "Alice"), answered("Bob", "Bob")];
        assert!(members_to_focus(&items, 5).is_empty());
    }

    #[test]
    fn test_ranking_order_and_limit() {
        let items = vec![
            answered("Bob", "Alice"),
            answered("Chloe", "Alice"),
            answered("Bob", "David"),
            answered("Alice", "Alice"),
            answered("Emma", "Bob"),
            answered("Farid", "Bob"),
            answered("Gina", "Bob"),
            answered("Hugo", "Bob"),
        ];

        let ranking = members_to_focus(&items, 5);

        assert_eq!(ranking.len(), 5);
        assert_eq!(
            ranking[0],
            FocusMember {
                name: "Bob".to_string(),
                misrecognitions: 2
            }
        );
        let names: Vec<&str> = ranking.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Chloe", "Emma", "Farid", "Gina"]);
    }
}
