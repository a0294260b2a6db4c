use thiserror::Error;

use crate::model::{
    Category, LocalizedText, OptionLabel, Question, QuestionError, QuestionOption,
    QuestionOrdinal,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question at position {position} has ordinal {found}")]
    OrdinalMismatch {
        position: usize,
        found: QuestionOrdinal,
    },

    #[error("invalid option label {0:?}")]
    InvalidLabel(char),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Ordered, fixed list of questions for a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank whose ordinals run 1..=n in list order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Empty` for an empty list and
    /// `QuestionBankError::OrdinalMismatch` when ordinals are out of sequence.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        for (index, question) in questions.iter().enumerate() {
            if question.ordinal().index() != index {
                return Err(QuestionBankError::OrdinalMismatch {
                    position: index,
                    found: question.ordinal(),
                });
            }
        }
        Ok(Self { questions })
    }

    /// The seven "Box of You" gift questions in English and Indonesian.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` only if the built-in table is malformed.
    pub fn reference() -> Result<Self, QuestionBankError> {
        let mut questions = Vec::with_capacity(REFERENCE.len());
        for (index, spec) in REFERENCE.iter().enumerate() {
            let ordinal = QuestionOrdinal::from_index(index).ok_or(QuestionBankError::Empty)?;
            let mut options = Vec::with_capacity(spec.options.len());
            for (letter, category, en, id) in spec.options {
                let label =
                    OptionLabel::new(*letter).ok_or(QuestionBankError::InvalidLabel(*letter))?;
                options.push(QuestionOption::new(
                    label,
                    *category,
                    LocalizedText::new(*en, *id),
                ));
            }
            questions.push(Question::new(
                ordinal,
                LocalizedText::new(spec.en, spec.id),
                options,
                spec.weight,
            )?);
        }
        Self::new(questions)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, ordinal: QuestionOrdinal) -> Option<&Question> {
        self.questions.get(ordinal.index())
    }

    #[must_use]
    pub fn weight(&self, ordinal: QuestionOrdinal) -> Option<u32> {
        self.question(ordinal).map(Question::weight)
    }

    /// Ordinal of the final question.
    #[must_use]
    pub fn last_ordinal(&self) -> QuestionOrdinal {
        self.questions
            .last()
            .map_or(QuestionOrdinal::FIRST, Question::ordinal)
    }
}

//
// ─── REFERENCE DATA ────────────────────────────────────────────────────────────
//

struct QuestionSpec {
    en: &'static str,
    id: &'static str,
    weight: u32,
    options: &'static [(char, Category, &'static str, &'static str)],
}

const REFERENCE: &[QuestionSpec] = &[
    QuestionSpec {
        en: "Who are you giving the gift to?",
        id: "Siapa yang mau kamu kasih hadiah?",
        weight: 1,
        options: &[
            ('A', Category::Jolly, "Male", "Laki-laki"),
            ('B', Category::Slick, "Female", "Perempuan"),
        ],
    },
    QuestionSpec {
        en: "What kind of gift would they like most? 🎁",
        id: "Hadiah kayak apa yang paling doi suka? 🎁",
        weight: 1,
        options: &[
            ('A', Category::Jolly, "Fun, makes them laugh", "Yang seru, bikin ketawa"),
            ('B', Category::Snip, "Functional and useful", "Yang fungsional dan berguna"),
            ('C', Category::Slick, "Comforting, soothing", "Yang menenangkan"),
            ('D', Category::Buck, "Keeps memories", "Yang menyimpan kenangan"),
        ],
    },
    QuestionSpec {
        en: "How would they feel if the gift doesn't match their taste?",
        id: "Gimana perasaan doi kalau hadiahnya nggak sesuai?",
        weight: 1,
        options: &[
            ('A', Category::Jolly, "Still special, no problem", "Tetap istimewa, no problem"),
            ('B', Category::Snip, "A bit off, but thank you", "Agak kurang pas, tapi makasih"),
            ('C', Category::Slick, "I value the effort", "Yang penting usahanya"),
            ('D', Category::Buck, "Keep it, doesn't suit me", "Simpen aja, kurang cocok"),
        ],
    },
    QuestionSpec {
        en: "Which type of item would they choose?",
        id: "Kira-kira, doi bakal milih jenis barang yang mana?",
        weight: 1,
        options: &[
            ('A', Category::Jolly, "Fun and ready-to-use", "Yang seru dan siap pakai"),
            ('B', Category::Snip, "Supports productivity", "Yang mendukung produktivitas"),
            ('C', Category::Slick, "Shows my care", "Yang menunjukkan perhatian"),
            ('D', Category::Buck, "Emotional, sentimental", "Yang emosional, berkesan"),
        ],
    },
    QuestionSpec {
        en: "What do they usually do when bored?",
        id: "Doi kalo lagi gabut biasanya ngapain?",
        weight: 1,
        options: &[
            ('A', Category::Jolly, "Hang out with friends, fun", "Nongkrong sama temen, seru-seruan"),
            ('B', Category::Snip, "Tinker/learn new things", "Utak-atik/belajar hal baru"),
            ('C', Category::Slick, "Watch movies/read books", "Nonton film/baca buku"),
            ('D', Category::Buck, "Make art + sad music", "Bikin karya + denger lagu sedih"),
        ],
    },
    QuestionSpec {
        en: "Which gift would they dislike the most?",
        id: "Hadiah kayak apa yang doi paling nggak suka?",
        weight: 3,
        options: &[
            ('A', Category::Jolly, "Boring or mainstream", "Yang membosankan atau mainstream"),
            ('B', Category::Snip, "Useless decoration", "Hiasan yang nggak guna"),
            ('C', Category::Slick, "Overly flashy", "Yang terlalu mencolok"),
            ('D', Category::Buck, "Careless gift", "Hadiah yang asal-asalan"),
        ],
    },
    QuestionSpec {
        en: "Which of these matches them the most?",
        id: "Kira-kira, dari semua ini mana yang doi banget?",
        weight: 3,
        options: &[
            ('A', Category::Jolly, "Loves crowds, cheerful", "Suka keramaian, ceria"),
            ('B', Category::Snip, "Serious, explorative", "Serius, eksploratif"),
            ('C', Category::Slick, "Peaceful, chill", "Damai, santai"),
            ('D', Category::Buck, "Emotional, artistic", "Emosional, artistik"),
        ],
    },
];
