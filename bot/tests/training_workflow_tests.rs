//! Scenario tests for the answer-collection workflow, driven through
//! in-memory collaborators so no gateway or database is needed.

use async_trait::async_trait;
use scibo_bot::error::BotResult;
use scibo_bot::models::Question;
use scibo_bot::services::score_service::ScoreLedger;
use scibo_bot::services::training_service::{
    AnswerReply, TrainOutcome, TrainingChannel, TrainingService,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

fn question(format: &str, answer: &str) -> Question {
    Question {
        category: "BIOLOGY".to_string(),
        tossup_question: "What organelle is the site of cellular respiration?".to_string(),
        tossup_format: format.to_string(),
        tossup_answer: answer.to_string(),
        bonus_question: "Name the stage of respiration in the cytoplasm.".to_string(),
        bonus_format: "Short Answer".to_string(),
        bonus_answer: "GLYCOLYSIS".to_string(),
        uri: "https://example.org/source.pdf".to_string(),
    }
}

fn trainer() -> TrainingService {
    TrainingService::new(Duration::from_millis(50), Duration::from_millis(50))
}

#[derive(Default)]
struct InMemoryLedger {
    scores: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl ScoreLedger for InMemoryLedger {
    async fn get_score(&self, user_id: &str) -> BotResult<i64> {
        Ok(*self.scores.lock().unwrap().get(user_id).unwrap_or(&0))
    }

    async fn add_points(&self, user_id: &str, delta: i64) -> BotResult<i64> {
        let mut scores = self.scores.lock().unwrap();
        let total = scores.entry(user_id.to_string()).or_insert(0);
        *total += delta;
        Ok(*total)
    }
}

/// Scripted chat scope: at most one queued reply, one scripted override
/// verdict, and a transcript of everything the workflow sent.
#[derive(Default)]
struct ScriptedChannel {
    reply: Option<AnswerReply>,
    override_reacted: bool,
    posted_questions: Vec<String>,
    override_prompts: Vec<String>,
    announcements: Vec<String>,
}

impl ScriptedChannel {
    fn with_reply(responder: &str, content: &str) -> Self {
        Self {
            reply: Some(AnswerReply {
                responder: responder.to_string(),
                content: content.to_string(),
            }),
            ..Self::default()
        }
    }
}

#[async_trait]
impl TrainingChannel for ScriptedChannel {
    async fn post_question(&mut self, question: &Question) -> anyhow::Result<()> {
        self.posted_questions.push(question.tossup_question.clone());
        Ok(())
    }

    async fn await_answer(&mut self, _deadline: Duration) -> anyhow::Result<Option<AnswerReply>> {
        Ok(self.reply.take())
    }

    async fn send_override_prompt(
        &mut self,
        question: &Question,
        _reply: &AnswerReply,
    ) -> anyhow::Result<()> {
        self.override_prompts.push(question.tossup_answer.clone());
        Ok(())
    }

    async fn await_override(
        &mut self,
        _responder: &str,
        _window: Duration,
    ) -> anyhow::Result<bool> {
        Ok(self.override_reacted)
    }

    async fn announce(&mut self, text: &str) -> anyhow::Result<()> {
        self.announcements.push(text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn correct_first_try_awards_four_points() {
    let ledger = InMemoryLedger::default();
    let mut channel = ScriptedChannel::with_reply("alice", "mitochondria");
    let question = question("Short Answer", "Mitochondria");

    let outcome = trainer()
        .run(&mut channel, &ledger, &question)
        .await
        .unwrap();

    assert_eq!(outcome, TrainOutcome::CorrectOnFirstTry { total: 4 });
    assert_eq!(ledger.get_score("alice").await.unwrap(), 4);
    assert!(channel.override_prompts.is_empty());
    assert_eq!(
        channel.announcements,
        vec!["Great job! Your score is now 4.".to_string()]
    );
}

#[tokio::test]
async fn timeout_leaves_score_untouched_and_notifies_once() {
    let ledger = InMemoryLedger::default();
    let mut channel = ScriptedChannel::default(); // no reply queued
    let question = question("Short Answer", "Mitochondria");

    let outcome = trainer()
        .run(&mut channel, &ledger, &question)
        .await
        .unwrap();

    assert_eq!(outcome, TrainOutcome::TimedOut);
    assert_eq!(ledger.get_score("alice").await.unwrap(), 0);
    assert_eq!(channel.posted_questions.len(), 1);
    assert_eq!(
        channel.announcements,
        vec!["Sorry, the question timed out waiting for an answer.".to_string()]
    );
}

#[tokio::test]
async fn incorrect_then_override_awards_four_points_exactly_once() {
    let ledger = InMemoryLedger::default();
    let mut channel = ScriptedChannel::with_reply("bob", "chloroplast");
    channel.override_reacted = true;
    let question = question("Short Answer", "Mitochondria");

    let outcome = trainer()
        .run(&mut channel, &ledger, &question)
        .await
        .unwrap();

    assert_eq!(outcome, TrainOutcome::CorrectByOverride { total: 4 });
    // +4, not +8: the first-try award never happened
    assert_eq!(ledger.get_score("bob").await.unwrap(), 4);
    assert_eq!(channel.override_prompts, vec!["Mitochondria".to_string()]);
}

#[tokio::test]
async fn incorrect_with_expired_override_window_scores_nothing() {
    let ledger = InMemoryLedger::default();
    let mut channel = ScriptedChannel::with_reply("bob", "chloroplast");
    let question = question("Short Answer", "Mitochondria");

    let outcome = trainer()
        .run(&mut channel, &ledger, &question)
        .await
        .unwrap();

    assert_eq!(outcome, TrainOutcome::Incorrect);
    assert_eq!(ledger.get_score("bob").await.unwrap(), 0);
    assert_eq!(channel.override_prompts.len(), 1);
    assert!(channel.announcements.is_empty());
}

#[tokio::test]
async fn multiple_choice_reply_matches_on_the_choice_letter() {
    let ledger = InMemoryLedger::default();
    let mut channel = ScriptedChannel::with_reply("carol", "b");
    let question = question("Multiple Choice", "B) Ohm");

    let outcome = trainer()
        .run(&mut channel, &ledger, &question)
        .await
        .unwrap();

    assert_eq!(outcome, TrainOutcome::CorrectOnFirstTry { total: 4 });
}

#[tokio::test]
async fn points_accumulate_in_increments_of_four() {
    let ledger = InMemoryLedger::default();
    let question = question("Short Answer", "Mitochondria");

    for round in 1..=3 {
        let mut channel = ScriptedChannel::with_reply("dave", "mitochondria");
        let outcome = trainer()
            .run(&mut channel, &ledger, &question)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            TrainOutcome::CorrectOnFirstTry {
                total: 4 * round as i64
            }
        );
    }

    let total = ledger.get_score("dave").await.unwrap();
    assert_eq!(total, 12);
    assert_eq!(total % 4, 0);
}

#[tokio::test]
async fn score_is_awarded_to_whoever_replied() {
    // The collector is keyed to the asker, but the ledger update follows the
    // captured reply's author.
    let ledger = InMemoryLedger::default();
    let mut channel = ScriptedChannel::with_reply("erin", "mitochondria");
    let question = question("Short Answer", "Mitochondria");

    trainer()
        .run(&mut channel, &ledger, &question)
        .await
        .unwrap();

    assert_eq!(ledger.get_score("erin").await.unwrap(), 4);
    assert_eq!(ledger.get_score("someone-else").await.unwrap(), 0);
}
