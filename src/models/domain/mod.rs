pub mod course;
pub mod question_spec;
pub mod quiz;
pub mod quiz_group;
pub mod quiz_question;

/// Identifier assigned by the LMS.
pub type CanvasId = u64;

pub use course::{Course, CourseRef, Folder, Module};
pub use question_spec::{AnswerInput, NumericParams, QuestionSpec};
pub use quiz::{Quiz, QuizHandle};
pub use quiz_group::QuizGroupRef;
pub use quiz_question::{
    AnswerRecord, NumericAnswerSpec, Question, QuestionAnswers, QuestionType, SubmittedQuestion,
};
