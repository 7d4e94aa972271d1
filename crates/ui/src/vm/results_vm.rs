use quiz_core::model::{QuestionResult, ResultSet};

use super::labels::{format_percentage, option_letter};
use super::time_fmt::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreTone {
    Good,
    Fair,
    Poor,
}

impl ScoreTone {
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Good
        } else if percentage >= 60.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "tone-good",
            Self::Fair => "tone-fair",
            Self::Poor => "tone-poor",
        }
    }
}

#[must_use]
pub fn score_message(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "🏆 Outstanding! You really know your stuff!"
    } else if percentage >= 80.0 {
        "🎉 Excellent! Only a few slipped past you!"
    } else if percentage >= 70.0 {
        "👍 Good job! A solid result!"
    } else if percentage >= 60.0 {
        "👌 Not bad! A little more practice will help!"
    } else if percentage >= 50.0 {
        "📚 Halfway there. Time to brush up!"
    } else {
        "😅 Tough round. Give it another go!"
    }
}

#[must_use]
pub fn achievement_badge(percentage: f64) -> &'static str {
    if percentage >= 70.0 {
        "🏅"
    } else if percentage >= 50.0 {
        "🥉"
    } else {
        "📚"
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub number: usize,
    pub prompt: String,
    pub is_correct: bool,
    pub user_answer_label: String,
    pub correct_answer_label: String,
}

impl ResultRowVm {
    fn from_result(number: usize, result: &QuestionResult) -> Self {
        Self {
            number,
            prompt: result.prompt.clone(),
            is_correct: result.is_correct,
            user_answer_label: result
                .user_answer
                .map_or_else(|| "No answer".to_string(), option_letter),
            correct_answer_label: format!(
                "{} - {}",
                option_letter(result.correct_answer),
                result.correct_answer_text
            ),
        }
    }
}

/// Everything the results screen shows, computed once when scoring lands.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsVm {
    percentage: f64,
    correct: u32,
    incorrect: u32,
    total: u32,
    time_taken: Option<u64>,
    rows: Vec<ResultRowVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn new(results: &ResultSet, time_taken: Option<u64>) -> Self {
        Self {
            percentage: results.score.clamped_percentage(),
            correct: results.score.correct,
            incorrect: results.score.incorrect(),
            total: results.score.total,
            time_taken,
            rows: results
                .per_question
                .iter()
                .enumerate()
                .map(|(idx, result)| ResultRowVm::from_result(idx + 1, result))
                .collect(),
        }
    }

    #[must_use]
    pub fn percentage_label(&self) -> String {
        format_percentage(self.percentage)
    }

    /// Width for the score bar, `0..=100`.
    #[must_use]
    pub fn bar_width(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn tone(&self) -> ScoreTone {
        ScoreTone::for_percentage(self.percentage)
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        score_message(self.percentage)
    }

    #[must_use]
    pub fn badge(&self) -> &'static str {
        achievement_badge(self.percentage)
    }

    #[must_use]
    pub fn summary_label(&self) -> String {
        format!("{} out of {} correct", self.correct, self.total)
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn time_taken_label(&self) -> Option<String> {
        self.time_taken.map(format_elapsed)
    }

    #[must_use]
    pub fn rows(&self) -> &[ResultRowVm] {
        &self.rows
    }
}
