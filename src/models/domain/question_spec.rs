use crate::models::domain::quiz_question::QuestionType;

/// Correctness argument that may be a single text or a list of texts.
/// Single-correct question types only ever use the first element of a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInput {
    Single(String),
    Many(Vec<String>),
}

impl AnswerInput {
    pub fn first(&self) -> Option<&str> {
        match self {
            AnswerInput::Single(text) => Some(text),
            AnswerInput::Many(texts) => texts.first().map(String::as_str),
        }
    }
}

impl From<&str> for AnswerInput {
    fn from(text: &str) -> Self {
        AnswerInput::Single(text.to_string())
    }
}

impl From<String> for AnswerInput {
    fn from(text: String) -> Self {
        AnswerInput::Single(text)
    }
}

impl From<Vec<String>> for AnswerInput {
    fn from(texts: Vec<String>) -> Self {
        AnswerInput::Many(texts)
    }
}

impl From<Vec<&str>> for AnswerInput {
    fn from(texts: Vec<&str>) -> Self {
        AnswerInput::Many(texts.into_iter().map(str::to_string).collect())
    }
}

/// Optional parameters of a numerical question. Which answer variant is produced
/// depends on which of them are set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericParams {
    pub answer: Option<f64>,
    pub precision: Option<f64>,
    pub error_margin: Option<f64>,
    pub begin: Option<f64>,
    pub end: Option<f64>,
}

impl NumericParams {
    pub fn precision(answer: f64, precision: f64) -> Self {
        Self::default().with_answer(answer).with_precision(precision)
    }

    pub fn exact(answer: f64, error_margin: f64) -> Self {
        Self::default()
            .with_answer(answer)
            .with_error_margin(error_margin)
    }

    pub fn range(begin: f64, end: f64) -> Self {
        Self::default().with_begin(begin).with_end(end)
    }

    pub fn with_answer(mut self, answer: f64) -> Self {
        self.answer = Some(answer);
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_error_margin(mut self, error_margin: f64) -> Self {
        self.error_margin = Some(error_margin);
        self
    }

    pub fn with_begin(mut self, begin: f64) -> Self {
        self.begin = Some(begin);
        self
    }

    pub fn with_end(mut self, end: f64) -> Self {
        self.end = Some(end);
        self
    }
}

/// Type-specific arguments of each of the nine question kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum QuestionSpec {
    MultipleChoice {
        correct: AnswerInput,
        wrong: Vec<String>,
    },
    MultipleAnswers {
        correct: Vec<String>,
        wrong: Vec<String>,
    },
    Numerical(NumericParams),
    Essay,
    FileUpload,
    ShortAnswer {
        correct: Vec<String>,
    },
    TrueFalse {
        correct: AnswerInput,
        wrong: AnswerInput,
    },
    TextOnly,
    FillInMultipleBlanks {
        blanks: Vec<Vec<String>>,
    },
}

impl QuestionSpec {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionSpec::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionSpec::MultipleAnswers { .. } => QuestionType::MultipleAnswers,
            QuestionSpec::Numerical(_) => QuestionType::Numerical,
            QuestionSpec::Essay => QuestionType::Essay,
            QuestionSpec::FileUpload => QuestionType::FileUpload,
            QuestionSpec::ShortAnswer { .. } => QuestionType::ShortAnswer,
            QuestionSpec::TrueFalse { .. } => QuestionType::TrueFalse,
            QuestionSpec::TextOnly => QuestionType::TextOnly,
            QuestionSpec::FillInMultipleBlanks { .. } => QuestionType::FillInMultipleBlanks,
        }
    }
}
