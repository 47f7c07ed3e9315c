//! Questionnaire session: the caller presents questions one at a time and
//! feeds answers back; the session keeps the running score and produces the
//! final recommendation. Nothing here persists anything.

use crate::error::{ServiceError, ServiceResult};
use crate::types::{Category, Decision, InputType, Question};

/// One collected answer, tagged by how it was collected.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    /// Button row: 1 = yes, 0 = neutral, -1 = no.
    Choice(i8),
    /// Free numeric input (e.g. hours of work).
    Numeric(f64),
    /// Free text input.
    Text(String),
    /// 1..=10 slider.
    Scale(u8),
}

/// Signed contribution of one answer to the session score. Each answer is
/// scored independently of every other, so the total is order-independent.
pub fn impact(question: &Question, answer: &Answer) -> ServiceResult<i32> {
    match (question.input_type, answer) {
        (InputType::Buttons, Answer::Choice(raw)) => {
            if raw.abs() > 1 {
                return Err(ServiceError::InvalidAnswer(format!(
                    "choice {raw} out of range for '{}'",
                    question.id
                )));
            }
            // For impulse/emotion/money questions a "yes" counts against the
            // purchase; for need/future it counts for it.
            let leaning = match question.category {
                Category::Impulse | Category::Emotion | Category::Money => -1,
                Category::Need | Category::Future => 1,
            };
            Ok(i32::from(*raw) * leaning)
        }
        (InputType::Number, Answer::Numeric(value)) => {
            if value.is_nan() {
                return Err(ServiceError::InvalidAnswer(format!(
                    "NaN answer for '{}'",
                    question.id
                )));
            }
            // More than 2 hours of work (or units of whatever is asked) is
            // expensive.
            Ok(if *value > 2.0 { -1 } else { 1 })
        }
        (InputType::Scale, Answer::Scale(value)) => {
            if !(1..=10).contains(value) {
                return Err(ServiceError::InvalidAnswer(format!(
                    "scale {value} out of 1..=10 for '{}'",
                    question.id
                )));
            }
            Ok(if *value >= 8 {
                1
            } else if *value <= 4 {
                -1
            } else {
                0
            })
        }
        // Actually writing something out counts as reflection.
        (InputType::Text, Answer::Text(text)) => Ok(if text.chars().count() > 5 { 1 } else { 0 }),
        _ => Err(ServiceError::InvalidAnswer(format!(
            "answer kind does not match input type of '{}'",
            question.id
        ))),
    }
}

/// Ephemeral state for one intervention, owned by the presenting caller.
#[derive(Clone, Debug)]
pub struct Session {
    questions: Vec<Question>,
    index: usize,
    score: i32,
}

impl Session {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            index: 0,
            score: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// The question awaiting an answer, if any.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Score the answer to the current question and advance. Returns the
    /// impact applied. Rejected answers leave the session untouched.
    pub fn answer(&mut self, answer: &Answer) -> ServiceResult<i32> {
        let question = self
            .questions
            .get(self.index)
            .ok_or_else(|| ServiceError::InvalidAnswer("no question pending".to_string()))?;
        let delta = impact(question, answer)?;
        self.score += delta;
        self.index += 1;
        Ok(delta)
    }

    /// Final recommendation once every question is answered.
    pub fn decision(&self) -> Decision {
        if self.score >= 3 {
            Decision::Buy
        } else if self.score < 0 {
            Decision::Skip
        } else {
            Decision::Wait
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn q(id: &str) -> Question {
        catalog::find(id).unwrap().clone()
    }

    #[test]
    fn buttons_yes_is_bad_for_impulse_money_emotion() {
        for id in ["s1", "s2", "m5"] {
            assert_eq!(impact(&q(id), &Answer::Choice(1)).unwrap(), -1);
            assert_eq!(impact(&q(id), &Answer::Choice(-1)).unwrap(), 1);
            assert_eq!(impact(&q(id), &Answer::Choice(0)).unwrap(), 0);
        }
    }

    #[test]
    fn buttons_yes_is_good_for_need_and_future() {
        for id in ["m2", "m3", "b1"] {
            assert_eq!(impact(&q(id), &Answer::Choice(1)).unwrap(), 1);
            assert_eq!(impact(&q(id), &Answer::Choice(-1)).unwrap(), -1);
        }
    }

    #[test]
    fn number_over_two_is_expensive() {
        assert_eq!(impact(&q("m1"), &Answer::Numeric(8.0)).unwrap(), -1);
        assert_eq!(impact(&q("m1"), &Answer::Numeric(2.0)).unwrap(), 1);
        assert_eq!(impact(&q("m1"), &Answer::Numeric(0.5)).unwrap(), 1);
    }

    #[test]
    fn scale_bands() {
        assert_eq!(impact(&q("b2"), &Answer::Scale(10)).unwrap(), 1);
        assert_eq!(impact(&q("b2"), &Answer::Scale(8)).unwrap(), 1);
        assert_eq!(impact(&q("b2"), &Answer::Scale(7)).unwrap(), 0);
        assert_eq!(impact(&q("b2"), &Answer::Scale(5)).unwrap(), 0);
        assert_eq!(impact(&q("b2"), &Answer::Scale(4)).unwrap(), -1);
        assert_eq!(impact(&q("b2"), &Answer::Scale(1)).unwrap(), -1);
    }

    #[test]
    fn text_counts_only_past_five_characters() {
        assert_eq!(impact(&q("m4"), &Answer::Text("None".into())).unwrap(), 0);
        assert_eq!(
            impact(&q("m4"), &Answer::Text("a library card".into())).unwrap(),
            1
        );
    }

    #[test]
    fn nan_and_mismatched_answers_are_rejected() {
        assert!(impact(&q("m1"), &Answer::Numeric(f64::NAN)).is_err());
        assert!(impact(&q("m1"), &Answer::Choice(1)).is_err());
        assert!(impact(&q("s1"), &Answer::Text("hi".into())).is_err());
        assert!(impact(&q("b2"), &Answer::Scale(11)).is_err());
        assert!(impact(&q("s1"), &Answer::Choice(2)).is_err());
    }

    #[test]
    fn rejected_answer_leaves_session_in_place() {
        let mut session = Session::new(vec![q("m1")]);
        assert!(session.answer(&Answer::Choice(1)).is_err());
        assert_eq!(session.index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.answer(&Answer::Numeric(1.0)).is_ok());
        assert!(session.is_complete());
    }

    #[test]
    fn score_is_order_independent() {
        let pairs = vec![
            (q("s1"), Answer::Choice(-1)),
            (q("m2"), Answer::Choice(1)),
            (q("m1"), Answer::Numeric(1.0)),
            (q("b2"), Answer::Scale(9)),
        ];
        let forward = {
            let mut s = Session::new(pairs.iter().map(|(q, _)| q.clone()).collect());
            for (_, a) in &pairs {
                s.answer(a).unwrap();
            }
            s.score()
        };
        let backward = {
            let mut s = Session::new(pairs.iter().rev().map(|(q, _)| q.clone()).collect());
            for (_, a) in pairs.iter().rev() {
                s.answer(a).unwrap();
            }
            s.score()
        };
        assert_eq!(forward, 4);
        assert_eq!(forward, backward);
    }

    #[test]
    fn decision_boundaries() {
        let mut session = Session::new(vec![]);
        session.score = 3;
        assert_eq!(session.decision(), Decision::Buy);
        session.score = 2;
        assert_eq!(session.decision(), Decision::Wait);
        session.score = 0;
        assert_eq!(session.decision(), Decision::Wait);
        session.score = -1;
        assert_eq!(session.decision(), Decision::Skip);
    }

    #[test]
    fn thought_through_medium_purchase_ends_in_buy() {
        // Answer "no" to the impulse/money/emotion buttons, "yes" to
        // need/future; every answer pushes the score up.
        let questions: Vec<Question> = ["m0", "m2", "m3", "m5"].iter().map(|id| q(id)).collect();
        let mut session = Session::new(questions);
        session.answer(&Answer::Choice(-1)).unwrap(); // m0: money, no
        session.answer(&Answer::Choice(1)).unwrap(); // m2: need, yes
        session.answer(&Answer::Choice(1)).unwrap(); // m3: future, yes
        session.answer(&Answer::Choice(-1)).unwrap(); // m5: emotion, no
        assert_eq!(session.score(), 4);
        assert_eq!(session.decision(), Decision::Buy);
    }
}
