use serde::{Deserialize, Serialize};

/// One toss-up/bonus pair as served by the question API. Treated as immutable
/// once fetched. Formats stay in their wire form ("Multiple Choice",
/// "Short Answer"); the judge only cares about the multiple-choice case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub category: String,
    pub tossup_question: String,
    pub tossup_format: String,
    pub tossup_answer: String,
    pub bonus_question: String,
    pub bonus_format: String,
    pub bonus_answer: String,
    #[serde(default)]
    pub uri: String,
}

pub const MULTIPLE_CHOICE: &str = "Multiple Choice";

impl Question {
    pub fn tossup_is_multiple_choice(&self) -> bool {
        self.tossup_format == MULTIPLE_CHOICE
    }
}

/// Response shape of the single-random-question endpoint.
#[derive(Debug, Deserialize)]
pub struct RandomQuestionResponse {
    pub question: Question,
}

/// Response shape of the bulk question-pool endpoint.
#[derive(Debug, Deserialize)]
pub struct QuestionBatchResponse {
    pub questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_random_question_wire_shape() {
        let body = serde_json::json!({
            "question": {
                "category": "PHYSICS",
                "tossup_question": "What is the SI unit of electrical resistance?",
                "tossup_format": "Short Answer",
                "tossup_answer": "OHM",
                "bonus_question": "Which law relates voltage, current, and resistance?",
                "bonus_format": "Multiple Choice",
                "bonus_answer": "B) Ohm's law",
                "uri": "https://example.org/q.pdf"
            }
        });

        let parsed: RandomQuestionResponse =
            serde_json::from_value(body).expect("wire shape should deserialize");
        assert_eq!(parsed.question.category, "PHYSICS");
        assert!(!parsed.question.tossup_is_multiple_choice());
        assert_eq!(parsed.question.bonus_format, MULTIPLE_CHOICE);
    }

    #[test]
    fn missing_citation_defaults_to_empty() {
        let body = serde_json::json!({
            "questions": [{
                "category": "MATH",
                "tossup_question": "What is 7 times 8?",
                "tossup_format": "Short Answer",
                "tossup_answer": "56",
                "bonus_question": "What is 56 divided by 4?",
                "bonus_format": "Short Answer",
                "bonus_answer": "14"
            }]
        });

        let parsed: QuestionBatchResponse =
            serde_json::from_value(body).expect("pool shape should deserialize");
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(parsed.questions[0].uri, "");
    }
}

#[cfg(test)]
pub(crate) fn sample_question(format: &str, answer: &str) -> Question {
    Question {
        category: "BIOLOGY".to_string(),
        tossup_question: "What organelle is the site of cellular respiration?".to_string(),
        tossup_format: format.to_string(),
        tossup_answer: answer.to_string(),
        bonus_question: "Name the stage of respiration that occurs in the cytoplasm.".to_string(),
        bonus_format: "Short Answer".to_string(),
        bonus_answer: "GLYCOLYSIS".to_string(),
        uri: "https://example.org/source.pdf".to_string(),
    }
}
