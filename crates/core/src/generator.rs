//! Question and answer-set generation.
//!
//! Both generators draw from a [`RandomSource`] rather than a concrete rng,
//! so a scripted source can reproduce any draw sequence exactly.

use crate::model::{AnswerSet, MAX_TABLE, MIN_TABLE, Question, SelectionError, TableSelection};
use crate::rng::RandomSource;

/// Largest distance between a distractor and the correct answer.
pub const MAX_OFFSET: u32 = 10;

//
// ─── QUESTION GENERATOR ────────────────────────────────────────────────────────
//

/// Draws multiplication questions from a table selection.
pub struct QuestionGenerator;

impl QuestionGenerator {
    /// Generates `count` independent questions.
    ///
    /// Each question picks its table uniformly from the selection and its
    /// multiplier uniformly from `1..=12`. Repeats are allowed.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Empty` if no tables are selected.
    pub fn generate(
        count: u32,
        selection: &TableSelection,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Question>, SelectionError> {
        if selection.is_empty() {
            return Err(SelectionError::Empty);
        }

        Ok((0..count).map(|_| Self::draw(selection.tables(), rng)).collect())
    }

    /// Generates a single question, for modes that draw on demand.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Empty` if no tables are selected.
    pub fn generate_one(
        selection: &TableSelection,
        rng: &mut dyn RandomSource,
    ) -> Result<Question, SelectionError> {
        if selection.is_empty() {
            return Err(SelectionError::Empty);
        }

        Ok(Self::draw(selection.tables(), rng))
    }

    fn draw(tables: &[u8], rng: &mut dyn RandomSource) -> Question {
        let table = tables[rng.pick(tables.len())];
        let span = usize::from(MAX_TABLE - MIN_TABLE) + 1;
        let multiplier = MIN_TABLE + rng.pick(span) as u8;

        Question::from_parts(table, multiplier)
    }
}

//
// ─── DISTRACTOR GENERATOR ──────────────────────────────────────────────────────
//

/// Builds the four-choice answer set for a question.
pub struct DistractorGenerator;

impl DistractorGenerator {
    /// Generates three distractors near the correct answer and shuffles all
    /// four choices.
    ///
    /// Distractors are drawn as `correct + offset` with offsets uniform in
    /// `-10..=10`; candidates that are zero, negative, or already present
    /// are rejected and redrawn. The final order comes from a Fisher-Yates
    /// shuffle, so the correct answer's position is uniform.
    ///
    /// A scripted source must supply enough picks to survive rejected
    /// candidates; see [`crate::rng::ScriptedRandom`].
    #[must_use]
    pub fn generate_answers(question: Question, rng: &mut dyn RandomSource) -> AnswerSet {
        let correct = question.answer();
        let mut choices = [correct, 0, 0, 0];
        let mut filled = 1;

        while filled < AnswerSet::SIZE {
            let offset = rng.pick(2 * MAX_OFFSET as usize + 1) as i64 - i64::from(MAX_OFFSET);
            let candidate = i64::from(correct) + offset;
            if candidate <= 0 {
                continue;
            }
            let candidate = candidate as u32;
            if choices[..filled].contains(&candidate) {
                continue;
            }
            choices[filled] = candidate;
            filled += 1;
        }

        for i in (1..choices.len()).rev() {
            let j = rng.pick(i + 1);
            choices.swap(i, j);
        }

        AnswerSet::from_parts(choices, correct)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRandom, SeededRandom};

    #[test]
    fn scripted_draw_picks_table_and_multiplier() {
        let selection = TableSelection::default();
        let mut rng = ScriptedRandom::new([1, 6]);

        let question = QuestionGenerator::generate_one(&selection, &mut rng).unwrap();

        // Index 1 of [2, 5, 10] is 5; multiplier is pick + 1.
        assert_eq!(question.multiplicand(), 5);
        assert_eq!(question.multiplier(), 7);
        assert_eq!(question.answer(), 35);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn single_table_selection_always_draws_that_table() {
        let selection = TableSelection::new([7]).unwrap();
        let mut rng = SeededRandom::from_seed(3);

        let questions = QuestionGenerator::generate(1, &selection, &mut rng).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].multiplicand(), 7);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut rng = SeededRandom::from_seed(1);
        let empty = TableSelection::empty();

        let err = QuestionGenerator::generate(10, &empty, &mut rng).unwrap_err();
        assert_eq!(err, SelectionError::Empty);

        let err = QuestionGenerator::generate_one(&empty, &mut rng).unwrap_err();
        assert_eq!(err, SelectionError::Empty);
    }

    #[test]
    fn generated_questions_stay_inside_the_selection() {
        let selection = TableSelection::new([3, 7]).unwrap();
        let mut rng = SeededRandom::from_seed(42);

        let questions = QuestionGenerator::generate(50, &selection, &mut rng).unwrap();

        assert_eq!(questions.len(), 50);
        for question in &questions {
            assert!(selection.contains(question.multiplicand()));
            assert!((1..=12).contains(&question.multiplier()));
            assert_eq!(
                question.answer(),
                u32::from(question.multiplicand()) * u32::from(question.multiplier())
            );
        }
    }

    #[test]
    fn scripted_answers_follow_offsets_and_shuffle() {
        let question = Question::new(5, 7).unwrap();
        // Offsets are pick - 10: +2, -3, 0 (duplicate of 35, rejected), +10.
        // Then three shuffle picks.
        let mut rng = ScriptedRandom::new([12, 7, 10, 20, 0, 1, 1]);

        let set = DistractorGenerator::generate_answers(question, &mut rng);

        assert_eq!(set.choices(), [45, 32, 37, 35]);
        assert!(set.is_correct(35));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn non_positive_candidates_are_redrawn() {
        let question = Question::new(1, 1).unwrap();
        // -10 and -1 produce candidates at or below zero and are skipped.
        let mut rng = ScriptedRandom::new([0, 9, 11, 12, 13, 0, 0, 0]);

        let set = DistractorGenerator::generate_answers(question, &mut rng);

        let mut sorted = set.choices();
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4]);
        assert!(set.is_correct(1));
    }

    #[test]
    fn distractors_stay_within_the_offset_window() {
        let selection = TableSelection::new([2, 5, 10, 12]).unwrap();
        let mut rng = SeededRandom::from_seed(7);

        for _ in 0..100 {
            let question = QuestionGenerator::generate_one(&selection, &mut rng).unwrap();
            let set = DistractorGenerator::generate_answers(question, &mut rng);
            let correct = i64::from(set.correct());

            assert!(set.contains(question.answer()));
            for choice in set.choices() {
                let distance = (i64::from(choice) - correct).abs();
                assert!(
                    distance <= i64::from(MAX_OFFSET),
                    "choice {choice} too far from {correct}"
                );
                assert!(choice > 0);
            }
        }
    }
}
