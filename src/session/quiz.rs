use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::config::QuizRules;
use crate::content::{Category, LearnableItem};
use crate::engine::distractors::{ChoiceSet, draw_choices};
use crate::error::QuizError;
use crate::session::timer::{Countdown, TimerEvent, TimerSink};
use crate::store::progress::ProgressStore;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> u64 {
    NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Passed,
    Failed,
    TimedOut,
}

impl QuizOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            QuizOutcome::Passed => "passed",
            QuizOutcome::Failed => "failed",
            QuizOutcome::TimedOut => "timed-out",
        }
    }

    pub fn is_pass(self) -> bool {
        self == QuizOutcome::Passed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    AwaitingAnswer(usize),
    Finished(QuizOutcome),
}

/// What happened to the user's lesson cursor when the session finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// Not a passed upgrading session.
    NotRequested,
    /// Passed upgrading session without a logged-in user.
    NoUser,
    Saved { cursor: u32 },
    /// The store rejected the write; the outcome itself is unaffected.
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinishReport {
    pub outcome: QuizOutcome,
    pub mistakes: u32,
    pub progress: ProgressUpdate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickResult {
    /// Input not accepted: session over, time up, or group already answered.
    Ignored,
    Correct,
    /// Wrong pick; `correct` is the option the UI should reveal.
    Incorrect { correct: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    Finished(FinishReport),
    /// Session was already finished; nothing changed.
    Ignored,
}

/// One option group together with the user's pick.
#[derive(Clone, Debug)]
pub struct ChoiceGroup {
    pub choices: ChoiceSet,
    pub picked: Option<usize>,
}

impl ChoiceGroup {
    pub fn is_answered(&self) -> bool {
        self.picked.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.picked == Some(self.choices.correct)
    }
}

#[derive(Clone, Debug)]
pub struct Question {
    pub item: LearnableItem,
    pub groups: Vec<ChoiceGroup>,
    field_mistakes: u32,
    charged: bool,
}

impl Question {
    pub fn is_fully_answered(&self) -> bool {
        self.groups.iter().all(ChoiceGroup::is_answered)
    }

    pub fn field_mistakes(&self) -> u32 {
        self.field_mistakes
    }

    /// Whether this question already cost one unit of the mistake budget.
    pub fn is_charged(&self) -> bool {
        self.charged
    }
}

/// A multiple-choice test over one lesson's elements.
///
/// The element order is shuffled once and every question, with the
/// distractors for each of its fields, is drawn up front. Each question costs
/// at most one unit of the mistake budget, however many of its fields are
/// wrong. State changes only through method calls on the owning thread; the
/// countdown thread reports through [`TimerEvent`]s.
pub struct QuizSession {
    id: u64,
    category: Category,
    elements: Vec<LearnableItem>,
    questions: Vec<Question>,
    upgrading: bool,
    user: Option<String>,
    rules: QuizRules,
    rng: SmallRng,
    phase: QuizPhase,
    mistake_budget: i32,
    initial_budget: i32,
    mistakes: u32,
    time_budget_secs: u32,
    remaining_secs: u32,
    can_click: bool,
    countdown: Option<Countdown>,
    timer_sink: Option<TimerSink>,
    started_at: Instant,
    finished_at: Option<Instant>,
    report: Option<FinishReport>,
}

impl QuizSession {
    pub fn new(
        category: Category,
        elements: Vec<LearnableItem>,
        upgrading: bool,
        user: Option<String>,
        rules: QuizRules,
        mut rng: SmallRng,
    ) -> Result<Self, QuizError> {
        let (elements, questions) = prepare(category, elements, &rules, &mut rng)?;
        let count = elements.len();
        let budget = rules.mistake_budget(count);
        let time_budget = rules.time_budget(category, count);

        log::info!(
            "Starting {category} quiz: {count} questions, {time_budget}s, {budget} mistakes allowed, upgrading={upgrading}"
        );

        Ok(Self {
            id: next_session_id(),
            category,
            elements,
            questions,
            upgrading,
            user,
            rules,
            rng,
            phase: QuizPhase::AwaitingAnswer(0),
            mistake_budget: budget,
            initial_budget: budget,
            mistakes: 0,
            time_budget_secs: time_budget,
            remaining_secs: time_budget,
            can_click: true,
            countdown: None,
            timer_sink: None,
            started_at: Instant::now(),
            finished_at: None,
            report: None,
        })
    }

    /// Start (or restart) the countdown, posting its events to `sink`.
    pub fn start_timer(&mut self, sink: TimerSink) {
        if let Some(old) = self.countdown.take() {
            old.cancel();
        }
        self.countdown = Some(Countdown::start(
            self.id,
            self.time_budget_secs,
            self.rules.tick,
            sink.clone(),
        ));
        self.timer_sink = Some(sink);
    }

    /// Throw away all progress and start over with the same elements and
    /// flags: fresh shuffle, fresh distractors, full budget, restarted timer.
    pub fn reset(&mut self) -> Result<(), QuizError> {
        if let Some(old) = self.countdown.take() {
            old.cancel();
        }
        let elements = std::mem::take(&mut self.elements);
        let (elements, questions) = prepare(self.category, elements, &self.rules, &mut self.rng)?;
        let count = elements.len();

        self.id = next_session_id();
        self.elements = elements;
        self.questions = questions;
        self.phase = QuizPhase::AwaitingAnswer(0);
        self.mistake_budget = self.rules.mistake_budget(count);
        self.initial_budget = self.mistake_budget;
        self.mistakes = 0;
        self.time_budget_secs = self.rules.time_budget(self.category, count);
        self.remaining_secs = self.time_budget_secs;
        self.can_click = true;
        self.started_at = Instant::now();
        self.finished_at = None;
        self.report = None;

        if let Some(sink) = self.timer_sink.clone() {
            self.start_timer(sink);
        }
        log::info!("Restarted {} quiz as session {}", self.category, self.id);
        Ok(())
    }

    /// Record a pick of `option` in option group `group` of the current question.
    pub fn click(&mut self, group: usize, option: usize) -> ClickResult {
        if self.countdown_expired() {
            self.expire();
            return ClickResult::Ignored;
        }
        let QuizPhase::AwaitingAnswer(index) = self.phase else {
            return ClickResult::Ignored;
        };
        if !self.can_click {
            return ClickResult::Ignored;
        }

        let question = &mut self.questions[index];
        let Some(choice_group) = question.groups.get_mut(group) else {
            return ClickResult::Ignored;
        };
        if choice_group.is_answered() || option >= choice_group.choices.options.len() {
            return ClickResult::Ignored;
        }

        choice_group.picked = Some(option);
        let correct = choice_group.choices.correct;
        let result = if option == correct {
            ClickResult::Correct
        } else {
            question.field_mistakes += 1;
            ClickResult::Incorrect { correct }
        };

        if question.is_fully_answered() && question.field_mistakes > 0 {
            self.charge(index);
        }
        result
    }

    /// Move to the next question ("Continue"). A question that is not fully
    /// answered counts as one mistake. Past the last question the session
    /// finishes and, when passed and upgrading, advances the user's cursor.
    pub fn advance(&mut self, progress: &dyn ProgressStore) -> Advance {
        if self.countdown_expired() {
            return match self.expire() {
                Some(report) => Advance::Finished(report),
                None => Advance::Ignored,
            };
        }
        let QuizPhase::AwaitingAnswer(index) = self.phase else {
            return Advance::Ignored;
        };

        if !self.questions[index].is_fully_answered() {
            self.charge(index);
        }

        let next = index + 1;
        if next < self.questions.len() {
            self.phase = QuizPhase::AwaitingAnswer(next);
            return Advance::Next(next);
        }

        // Exactly one of "finished" and "expired" wins the countdown state.
        let finished_in_time = self.countdown.as_ref().is_none_or(Countdown::cancel);
        if !finished_in_time {
            return match self.expire() {
                Some(report) => Advance::Finished(report),
                None => Advance::Ignored,
            };
        }

        let outcome = if self.mistake_budget >= 0 {
            QuizOutcome::Passed
        } else {
            QuizOutcome::Failed
        };
        let progress = self.update_progress(outcome, progress);
        Advance::Finished(self.finish(outcome, progress))
    }

    /// Handle an event from the countdown thread. Events of other sessions
    /// (e.g. from before a reset) are ignored.
    pub fn handle_timer(&mut self, event: TimerEvent) -> Option<FinishReport> {
        if event.session() != self.id {
            return None;
        }
        match event {
            TimerEvent::Tick { remaining, .. } => {
                if !self.is_finished() {
                    self.remaining_secs = remaining;
                }
                None
            }
            TimerEvent::Expired { .. } => self.expire(),
        }
    }

    /// Time is up: stop accepting input and fail the session. Returns the
    /// report if this call ended the session.
    pub fn expire(&mut self) -> Option<FinishReport> {
        if self.is_finished() {
            return None;
        }
        self.remaining_secs = 0;
        Some(self.finish(QuizOutcome::TimedOut, ProgressUpdate::NotRequested))
    }

    /// Leave the session early (back to the menu); no outcome is recorded.
    pub fn abandon(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
        self.can_click = false;
    }

    fn charge(&mut self, index: usize) {
        let question = &mut self.questions[index];
        if question.charged {
            return;
        }
        question.charged = true;
        self.mistake_budget -= 1;
        self.mistakes += 1;
    }

    fn countdown_expired(&self) -> bool {
        !self.is_finished() && self.countdown.as_ref().is_some_and(Countdown::is_expired)
    }

    fn update_progress(&self, outcome: QuizOutcome, progress: &dyn ProgressStore) -> ProgressUpdate {
        if !outcome.is_pass() || !self.upgrading {
            return ProgressUpdate::NotRequested;
        }
        let Some(user) = self.user.as_deref() else {
            log::info!("Passed upgrading {} quiz as guest; nothing saved", self.category);
            return ProgressUpdate::NoUser;
        };
        match progress.increment_lesson_cursor(user, self.category) {
            Ok(cursor) => {
                log::info!("{user} unlocked {} lesson {cursor}", self.category);
                ProgressUpdate::Saved { cursor }
            }
            Err(e) => {
                log::error!("Failed to save {} progress for {user}: {e:#}", self.category);
                ProgressUpdate::Failed(e.to_string())
            }
        }
    }

    fn finish(&mut self, outcome: QuizOutcome, progress: ProgressUpdate) -> FinishReport {
        self.can_click = false;
        self.phase = QuizPhase::Finished(outcome);
        self.finished_at = Some(Instant::now());
        if let Some(countdown) = self.countdown.as_ref() {
            countdown.cancel();
        }
        let report = FinishReport {
            outcome,
            mistakes: self.mistakes,
            progress,
        };
        log::info!(
            "{} quiz session {} finished: {} with {} mistakes",
            self.category,
            self.id,
            outcome.as_str(),
            self.mistakes
        );
        self.report = Some(report.clone());
        report
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, QuizPhase::Finished(_))
    }

    pub fn outcome(&self) -> Option<QuizOutcome> {
        match self.phase {
            QuizPhase::Finished(outcome) => Some(outcome),
            QuizPhase::AwaitingAnswer(_) => None,
        }
    }

    pub fn report(&self) -> Option<&FinishReport> {
        self.report.as_ref()
    }

    pub fn can_click(&self) -> bool {
        self.can_click
    }

    pub fn is_upgrading(&self) -> bool {
        self.upgrading
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Elements in presentation order.
    pub fn elements(&self) -> &[LearnableItem] {
        &self.elements
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            QuizPhase::AwaitingAnswer(index) => Some(index),
            QuizPhase::Finished(_) => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|index| &self.questions[index])
    }

    pub fn mistake_budget(&self) -> i32 {
        self.mistake_budget
    }

    pub fn initial_budget(&self) -> i32 {
        self.initial_budget
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> f64 {
        let end = self.finished_at.unwrap_or_else(Instant::now);
        end.duration_since(self.started_at).as_secs_f64()
    }

    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        match self.phase {
            QuizPhase::AwaitingAnswer(index) => index as f64 / self.questions.len() as f64,
            QuizPhase::Finished(_) => 1.0,
        }
    }
}

/// Shuffle elements and draw every question's option groups.
fn prepare(
    category: Category,
    mut elements: Vec<LearnableItem>,
    rules: &QuizRules,
    rng: &mut SmallRng,
) -> Result<(Vec<LearnableItem>, Vec<Question>), QuizError> {
    if elements.is_empty() {
        return Err(QuizError::NoContentAvailable { category });
    }
    elements.shuffle(rng);

    let mut questions = Vec::with_capacity(elements.len());
    for index in 0..elements.len() {
        let mut groups = Vec::with_capacity(category.quizzed_fields().len());
        for &field in category.quizzed_fields() {
            let choices = draw_choices(&elements, index, field, rules.distractors, rng)?;
            groups.push(ChoiceGroup {
                choices,
                picked: None,
            });
        }
        questions.push(Question {
            item: elements[index].clone(),
            groups,
            field_mistakes: 0,
            charged: false,
        });
    }
    Ok((elements, questions))
}
