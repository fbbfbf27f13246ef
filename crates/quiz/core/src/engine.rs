//! Progression state machine and transition pipeline.
//!
//! The [`QuizEngine`] is the authoritative reducer for [`GameState`]. Every
//! operation applies its state changes synchronously and returns the ordered
//! list of [`Transition`]s it produced, so the runtime can publish them as
//! events and sequence presentation around them. Operations invoked in the
//! wrong phase return an empty list: a no-op, not an error.
use crate::config::QuizConfig;
use crate::question::Question;
use crate::rng::{RngOracle, compute_seed};
use crate::state::{GameState, Phase, Stage};

/// Outcome of judging a submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Observable state change produced by an engine operation.
///
/// Transitions come out in the order they were applied; a single `submit`
/// may produce a judgement, a score change, a stage advance, and the next
/// question in one batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Session moved from idle to awaiting its first answer.
    Started,
    /// A submitted answer was judged against the outstanding question.
    Judged { verdict: Verdict, expected: u32 },
    ScoreChanged(u32),
    /// Stage or level changed; carries the values now being drilled.
    StageAdvanced { level: u32, stage: Stage },
    /// Progression collapsed back to level 1 / Sequential / score 0.
    ProgressReset,
    QuestionIssued(Question),
    /// Countdown (re)armed for the freshly issued question.
    TimerArmed { limit: u16 },
    /// One second elapsed on the countdown.
    Tick { remaining: u16 },
    /// Countdown hit zero while an answer was outstanding.
    TimerExpired { expected: u32 },
    /// The final Mixed pass at the top level was completed.
    Finished {
        completed: bool,
        final_score: u32,
        final_level: u32,
    },
    /// Session returned to idle.
    Cleared,
}

/// Engine that manages progression, judging, and countdown bookkeeping.
///
/// Borrows the state mutably for the duration of one operation; the runtime
/// worker constructs a fresh engine per command.
pub struct QuizEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> QuizEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Begins a session: collapses progression, issues the first question,
    /// and arms the countdown. Only valid from [`Phase::NotStarted`].
    pub fn start(&mut self, rng: &dyn RngOracle) -> Vec<Transition> {
        if self.state.phase != Phase::NotStarted {
            return Vec::new();
        }

        self.state.collapse_progress();
        self.state.phase = Phase::AwaitingAnswer;

        let mut out = vec![Transition::Started];
        self.issue_question(&mut out, rng);
        out
    }

    /// Judges an answer against the outstanding question.
    ///
    /// `None` models non-numeric input and never matches. A match rewards
    /// and moves forward; a mismatch collapses progression to the start.
    pub fn submit(&mut self, answer: Option<u32>, rng: &dyn RngOracle) -> Vec<Transition> {
        if self.state.phase != Phase::AwaitingAnswer {
            return Vec::new();
        }
        let Some(question) = self.state.current else {
            return Vec::new();
        };

        let mut out = Vec::new();
        if question.is_correct(answer) {
            self.state.score += QuizConfig::REWARD_PER_CORRECT;
            self.state.question_index += 1;
            out.push(Transition::Judged {
                verdict: Verdict::Correct,
                expected: question.expected_answer,
            });
            out.push(Transition::ScoreChanged(self.state.score));

            if self.state.question_index == QuizConfig::QUESTIONS_PER_STAGE {
                self.advance(&mut out, rng);
            } else {
                self.issue_question(&mut out, rng);
            }
        } else {
            out.push(Transition::Judged {
                verdict: Verdict::Incorrect,
                expected: question.expected_answer,
            });
            self.reset_progress(&mut out, rng);
        }
        out
    }

    /// Countdown expiry: identical penalty to a wrong answer.
    pub fn on_timer_expire(&mut self, rng: &dyn RngOracle) -> Vec<Transition> {
        if self.state.phase != Phase::AwaitingAnswer {
            return Vec::new();
        }
        let Some(question) = self.state.current else {
            return Vec::new();
        };

        let mut out = vec![Transition::TimerExpired {
            expected: question.expected_answer,
        }];
        self.reset_progress(&mut out, rng);
        out
    }

    /// Advances the countdown by one second, firing the expiry transition
    /// exactly once when it reaches zero.
    pub fn tick(&mut self, rng: &dyn RngOracle) -> Vec<Transition> {
        if self.state.phase != Phase::AwaitingAnswer || self.state.time_remaining == 0 {
            return Vec::new();
        }

        self.state.time_remaining -= 1;
        let mut out = vec![Transition::Tick {
            remaining: self.state.time_remaining,
        }];
        if self.state.time_remaining == 0 {
            out.extend(self.on_timer_expire(rng));
        }
        out
    }

    /// Returns to [`Phase::NotStarted`] with all fields cleared. Valid from
    /// any state; repeating it is harmless.
    pub fn reset(&mut self) -> Vec<Transition> {
        self.state.clear();
        vec![Transition::Cleared]
    }

    /// Stage transition after a completed pass: Sequential → Mixed →
    /// (next level, Sequential); the Mixed pass at the top level finishes
    /// the game instead of advancing to a non-existent level.
    fn advance(&mut self, out: &mut Vec<Transition>, rng: &dyn RngOracle) {
        match self.state.stage {
            Stage::Sequential => {
                self.state.stage = Stage::Mixed;
                self.state.question_index = 0;
                out.push(Transition::StageAdvanced {
                    level: self.state.level,
                    stage: Stage::Mixed,
                });
                self.issue_question(out, rng);
            }
            Stage::Mixed => {
                if self.state.level == QuizConfig::MAX_LEVEL {
                    self.finish(out);
                } else {
                    self.state.level += 1;
                    self.state.stage = Stage::Sequential;
                    self.state.question_index = 0;
                    out.push(Transition::StageAdvanced {
                        level: self.state.level,
                        stage: Stage::Sequential,
                    });
                    self.issue_question(out, rng);
                }
            }
        }
    }

    /// The designed penalty: collapse everything and restart at 1 × 1.
    fn reset_progress(&mut self, out: &mut Vec<Transition>, rng: &dyn RngOracle) {
        self.state.collapse_progress();
        out.push(Transition::ProgressReset);
        out.push(Transition::ScoreChanged(0));
        self.issue_question(out, rng);
    }

    fn finish(&mut self, out: &mut Vec<Transition>) {
        self.state.phase = Phase::Finished;
        self.state.current = None;
        self.state.time_remaining = 0;
        out.push(Transition::Finished {
            completed: true,
            final_score: self.state.score,
            final_level: self.state.level,
        });
    }

    fn issue_question(&mut self, out: &mut Vec<Transition>, rng: &dyn RngOracle) {
        let question = match self.state.stage {
            Stage::Sequential => Question::sequential(self.state.level, self.state.question_index),
            Stage::Mixed => {
                let seed = compute_seed(self.state.game_seed, self.state.nonce, 0);
                Question::mixed(self.state.level, rng, seed)
            }
        };
        self.state.nonce += 1;
        self.state.current = Some(question);
        self.state.time_remaining = self.state.time_limit;
        out.push(Transition::QuestionIssued(question));
        out.push(Transition::TimerArmed {
            limit: self.state.time_limit,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    fn started_state(seed: u64) -> GameState {
        let mut state = GameState::with_seed(seed, &QuizConfig::default());
        QuizEngine::new(&mut state).start(&PcgRng);
        state
    }

    fn answer_correctly(state: &mut GameState) -> Vec<Transition> {
        let expected = state
            .current
            .expect("question outstanding")
            .expected_answer;
        QuizEngine::new(state).submit(Some(expected), &PcgRng)
    }

    fn answer_wrongly(state: &mut GameState) -> Vec<Transition> {
        let expected = state
            .current
            .expect("question outstanding")
            .expected_answer;
        QuizEngine::new(state).submit(Some(expected + 1), &PcgRng)
    }

    #[test]
    fn start_issues_first_sequential_question() {
        let state = started_state(0);
        assert_eq!(state.phase, Phase::AwaitingAnswer);
        assert_eq!(state.current, Some(Question::sequential(1, 0)));
        assert_eq!(state.time_remaining, state.time_limit);
    }

    #[test]
    fn start_is_a_noop_while_active() {
        let mut state = started_state(0);
        let snapshot = state.clone();
        assert!(QuizEngine::new(&mut state).start(&PcgRng).is_empty());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn ten_correct_answers_advance_to_mixed() {
        // Scenario A
        let mut state = started_state(0);
        for _ in 0..9 {
            answer_correctly(&mut state);
        }
        let transitions = answer_correctly(&mut state);

        assert_eq!(state.level, 1);
        assert_eq!(state.stage, Stage::Mixed);
        assert_eq!(state.question_index, 0);
        assert_eq!(state.score, 100);
        assert!(transitions.contains(&Transition::StageAdvanced {
            level: 1,
            stage: Stage::Mixed,
        }));
    }

    #[test]
    fn final_mixed_answer_at_top_level_completes_the_game() {
        // Scenario B, crafted directly at the last question.
        let mut state = GameState::with_seed(3, &QuizConfig::default());
        state.phase = Phase::AwaitingAnswer;
        state.level = 10;
        state.stage = Stage::Mixed;
        state.question_index = 9;
        state.score = 1990;
        state.current = Some(Question::mixed(10, &PcgRng, 17));
        state.time_remaining = state.time_limit;

        let transitions = answer_correctly(&mut state);

        assert_eq!(state.phase, Phase::Finished);
        assert!(state.current.is_none());
        assert!(transitions.contains(&Transition::Finished {
            completed: true,
            final_score: 2000,
            final_level: 10,
        }));
    }

    #[test]
    fn perfect_run_takes_two_hundred_questions() {
        let mut state = started_state(42);
        let mut answered = 0;
        while state.phase == Phase::AwaitingAnswer {
            answer_correctly(&mut state);
            answered += 1;
            assert!(answered <= 200, "game did not finish");
        }

        assert_eq!(answered, 200);
        assert_eq!(state.phase, Phase::Finished);
        assert_eq!(state.score, 2000);
        assert_eq!(state.level, 10);
    }

    #[test]
    fn wrong_answer_collapses_progress() {
        // Scenario C: reach level 3 Mixed, then miss once.
        let mut state = started_state(9);
        while !(state.level == 3 && state.stage == Stage::Mixed) {
            answer_correctly(&mut state);
        }
        assert!(state.score > 0);

        let transitions = answer_wrongly(&mut state);

        assert_eq!(state.level, 1);
        assert_eq!(state.stage, Stage::Sequential);
        assert_eq!(state.question_index, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, Phase::AwaitingAnswer);
        assert!(matches!(
            transitions.as_slice(),
            [
                Transition::Judged {
                    verdict: Verdict::Incorrect,
                    ..
                },
                Transition::ProgressReset,
                Transition::ScoreChanged(0),
                Transition::QuestionIssued(_),
                Transition::TimerArmed { .. },
            ]
        ));
    }

    #[test]
    fn wrong_answer_collapses_from_any_point() {
        for warmup in [0usize, 5, 17, 33, 120] {
            let mut state = started_state(warmup as u64);
            for _ in 0..warmup {
                answer_correctly(&mut state);
            }
            answer_wrongly(&mut state);
            assert_eq!(state.level, 1, "after {warmup} correct answers");
            assert_eq!(state.stage, Stage::Sequential);
            assert_eq!(state.score, 0);
        }
    }

    #[test]
    fn non_numeric_input_is_a_mismatch() {
        let mut state = started_state(0);
        let transitions = QuizEngine::new(&mut state).submit(None, &PcgRng);
        assert!(matches!(
            transitions.first(),
            Some(Transition::Judged {
                verdict: Verdict::Incorrect,
                ..
            })
        ));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn submit_outside_awaiting_answer_is_a_noop() {
        let mut idle = GameState::new(&QuizConfig::default());
        let snapshot = idle.clone();
        assert!(QuizEngine::new(&mut idle).submit(Some(1), &PcgRng).is_empty());
        assert_eq!(idle, snapshot);

        let mut finished = started_state(1);
        while finished.phase == Phase::AwaitingAnswer {
            answer_correctly(&mut finished);
        }
        let snapshot = finished.clone();
        assert!(
            QuizEngine::new(&mut finished)
                .submit(Some(1), &PcgRng)
                .is_empty()
        );
        assert_eq!(finished, snapshot);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut state = started_state(5);
        for _ in 0..12 {
            answer_correctly(&mut state);
        }

        QuizEngine::new(&mut state).reset();
        let once = state.clone();
        QuizEngine::new(&mut state).reset();

        assert_eq!(state, once);
        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!(state.score, 0);
        assert!(state.current.is_none());
    }

    #[test]
    fn countdown_expires_exactly_once_and_collapses() {
        // Scenario D, minus the runtime's ticker (exercised in the runtime
        // crate): three-second limit, tick it down to zero.
        let mut state = GameState::with_seed(0, &QuizConfig::with_time_limit(3));
        QuizEngine::new(&mut state).start(&PcgRng);
        for _ in 0..4 {
            answer_correctly(&mut state);
        }
        assert_eq!(state.score, 40);

        assert_eq!(
            QuizEngine::new(&mut state).tick(&PcgRng),
            vec![Transition::Tick { remaining: 2 }]
        );
        assert_eq!(
            QuizEngine::new(&mut state).tick(&PcgRng),
            vec![Transition::Tick { remaining: 1 }]
        );

        let expiry = QuizEngine::new(&mut state).tick(&PcgRng);
        let expired_count = expiry
            .iter()
            .filter(|t| matches!(t, Transition::TimerExpired { .. }))
            .count();
        assert_eq!(expired_count, 1);
        assert_eq!(state.level, 1);
        assert_eq!(state.stage, Stage::Sequential);
        assert_eq!(state.score, 0);
        // The replacement question re-arms the countdown.
        assert_eq!(state.time_remaining, 3);
    }

    #[test]
    fn tick_outside_a_session_is_a_noop() {
        let mut state = GameState::new(&QuizConfig::default());
        assert!(QuizEngine::new(&mut state).tick(&PcgRng).is_empty());
    }

    #[test]
    fn mixed_sequence_is_replayable_for_a_seed() {
        let questions = |seed: u64| {
            let mut state = started_state(seed);
            let mut seen = Vec::new();
            for _ in 0..15 {
                seen.push(state.current.expect("question outstanding"));
                answer_correctly(&mut state);
            }
            seen
        };

        assert_eq!(questions(42), questions(42));
    }
}
