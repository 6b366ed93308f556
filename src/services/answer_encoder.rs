use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        question_spec::{AnswerInput, NumericParams, QuestionSpec},
        quiz_question::{AnswerRecord, NumericAnswerSpec, QuestionAnswers},
    },
};

/// Maps the type-specific arguments of a question to its answer records.
pub struct AnswerEncoder;

impl AnswerEncoder {
    pub fn encode(spec: &QuestionSpec) -> AppResult<QuestionAnswers> {
        let answers = match spec {
            QuestionSpec::MultipleChoice { correct, wrong } => {
                QuestionAnswers::Records(Self::single_correct(correct, wrong)?)
            }
            QuestionSpec::TrueFalse { correct, wrong } => {
                QuestionAnswers::Records(Self::true_false(correct, wrong)?)
            }
            QuestionSpec::MultipleAnswers { correct, wrong } => {
                QuestionAnswers::Records(Self::multiple_answers(correct, wrong))
            }
            QuestionSpec::ShortAnswer { correct } => {
                QuestionAnswers::Records(Self::short_answer(correct))
            }
            QuestionSpec::FillInMultipleBlanks { blanks } => {
                QuestionAnswers::Records(Self::fill_in_blanks(blanks))
            }
            QuestionSpec::Numerical(params) => QuestionAnswers::Numerical(Self::numerical(params)),
            QuestionSpec::Essay | QuestionSpec::FileUpload | QuestionSpec::TextOnly => {
                QuestionAnswers::Records(Vec::new())
            }
        };
        Ok(answers)
    }

    /// One correct record (first element only when a list is given) followed by every
    /// wrong answer.
    pub fn single_correct(correct: &AnswerInput, wrong: &[String]) -> AppResult<Vec<AnswerRecord>> {
        let mut answers = vec![AnswerRecord::correct(first_of(correct, "correct")?)];
        answers.extend(wrong.iter().map(AnswerRecord::incorrect));
        Ok(answers)
    }

    pub fn true_false(correct: &AnswerInput, wrong: &AnswerInput) -> AppResult<Vec<AnswerRecord>> {
        Ok(vec![
            AnswerRecord::correct(first_of(correct, "correct")?),
            AnswerRecord::incorrect(first_of(wrong, "wrong")?),
        ])
    }

    pub fn multiple_answers(correct: &[String], wrong: &[String]) -> Vec<AnswerRecord> {
        correct
            .iter()
            .map(AnswerRecord::correct)
            .chain(wrong.iter().map(AnswerRecord::incorrect))
            .collect()
    }

    pub fn short_answer(correct: &[String]) -> Vec<AnswerRecord> {
        correct.iter().map(AnswerRecord::correct).collect()
    }

    /// Blank ids run `a`, `b`, ... in the order of `blanks`. More than 26 blanks continue
    /// past `z` into the following characters.
    pub fn fill_in_blanks(blanks: &[Vec<String>]) -> Vec<AnswerRecord> {
        blanks
            .iter()
            .zip('a'..)
            .flat_map(|(accepted, blank_id)| {
                accepted
                    .iter()
                    .map(move |text| AnswerRecord::blank(text, blank_id))
            })
            .collect()
    }

    /// Precision wins over error margin, which wins over a range. `None` when no
    /// parameter set is complete.
    pub fn numerical(params: &NumericParams) -> Option<NumericAnswerSpec> {
        match *params {
            NumericParams {
                answer: Some(approximate),
                precision: Some(precision),
                ..
            } => Some(NumericAnswerSpec::PrecisionAnswer {
                approximate,
                precision,
            }),
            NumericParams {
                answer: Some(exact),
                error_margin: Some(error_margin),
                ..
            } => Some(NumericAnswerSpec::ExactAnswer {
                exact,
                error_margin,
            }),
            NumericParams {
                begin: Some(start),
                end: Some(end),
                ..
            } => Some(NumericAnswerSpec::RangeAnswer { start, end }),
            _ => None,
        }
    }
}

fn first_of<'a>(input: &'a AnswerInput, argument: &str) -> AppResult<&'a str> {
    input.first().ok_or_else(|| {
        AppError::ValidationError(format!("'{}' answer list must not be empty", argument))
    })
}
