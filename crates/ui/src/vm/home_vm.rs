use quiz_core::model::{QuizLength, QuizStats};

use super::labels::kind_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthChoiceVm {
    pub length: QuizLength,
    pub label: String,
    pub css_class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsPanelVm {
    pub total_questions: u64,
    pub kinds: Vec<(String, u64)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    stats: Option<StatsPanelVm>,
    choices: Vec<LengthChoiceVm>,
}

impl HomeVm {
    #[must_use]
    pub fn new(stats: Option<QuizStats>) -> Self {
        let stats = stats.map(|stats| StatsPanelVm {
            total_questions: stats.total_questions,
            kinds: stats
                .question_type_counts
                .iter()
                .map(|(kind, count)| (kind_label(Some(kind)), *count))
                .collect(),
        });
        let choices = QuizLength::ALL
            .iter()
            .map(|&length| LengthChoiceVm {
                length,
                label: format!("{} ({} Questions)", length.label(), length.question_count()),
                css_class: match length {
                    QuizLength::Quick => "btn btn-quick",
                    QuizLength::Standard => "btn btn-standard",
                    QuizLength::Challenge => "btn btn-challenge",
                },
            })
            .collect();
        Self { stats, choices }
    }

    #[must_use]
    pub fn stats(&self) -> Option<&StatsPanelVm> {
        self.stats.as_ref()
    }

    #[must_use]
    pub fn choices(&self) -> &[LengthChoiceVm] {
        &self.choices
    }
}
