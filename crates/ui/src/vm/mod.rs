mod flow;
mod home_vm;
mod labels;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use flow::{AppFlow, Screen};
pub use home_vm::{HomeVm, LengthChoiceVm, StatsPanelVm};
pub use labels::{format_percentage, kind_label, option_letter};
pub use quiz_vm::{
    OptionVm, QuizIntent, QuizOutcome, QuizVm, TimerTone, UNANSWERED_WARNING, start_quiz,
};
pub use results_vm::{ResultRowVm, ResultsVm, ScoreTone, achievement_badge, score_message};
pub use time_fmt::{format_countdown, format_elapsed};
