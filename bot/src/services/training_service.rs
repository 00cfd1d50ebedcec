use crate::models::Question;
use crate::services::score_service::ScoreLedger;
use async_trait::async_trait;
use std::time::Duration;

/// Points awarded for a correct toss-up.
pub const TOSSUP_POINTS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Format-specific comparison of a candidate answer against the expected one.
/// Multiple choice only inspects the choice letter; everything else requires
/// full trimmed equality. Case never matters. The verdict is advisory: an
/// Incorrect can still be reversed by the human override step.
pub fn judge(question: &Question, candidate: &str) -> Verdict {
    let matches = if question.tossup_is_multiple_choice() {
        let candidate_letter = candidate.trim().chars().next().map(|c| c.to_ascii_lowercase());
        let expected_letter = question
            .tossup_answer
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase());
        candidate_letter.is_some() && candidate_letter == expected_letter
    } else {
        candidate.trim().to_lowercase() == question.tossup_answer.trim().to_lowercase()
    };

    if matches {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Terminal outcome of one answer-collection session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainOutcome {
    CorrectOnFirstTry { total: i64 },
    CorrectByOverride { total: i64 },
    Incorrect,
    TimedOut,
}

/// The first qualifying reply captured in the session scope.
#[derive(Debug, Clone)]
pub struct AnswerReply {
    pub responder: String,
    pub content: String,
}

/// Chat-side collaborator of the workflow. The Discord implementation filters
/// replies by (scope, asker) and override reactions by (message, responder),
/// which is what keeps concurrent sessions from cross-matching.
#[async_trait]
pub trait TrainingChannel {
    /// Publishes the toss-up plus its citation to the session scope.
    async fn post_question(&mut self, question: &Question) -> anyhow::Result<()>;

    /// Waits for the first message by the asker in the scope, or `None` on
    /// deadline expiry. Later messages are not consumed by this session.
    async fn await_answer(&mut self, deadline: Duration) -> anyhow::Result<Option<AnswerReply>>;

    /// Posts the override prompt embedding the correct answer and the
    /// invitation to react with the override marker.
    async fn send_override_prompt(
        &mut self,
        question: &Question,
        reply: &AnswerReply,
    ) -> anyhow::Result<()>;

    /// Waits for the responder to attach the override marker to the override
    /// prompt. Returns false when the window closes unreacted.
    async fn await_override(&mut self, responder: &str, window: Duration) -> anyhow::Result<bool>;

    /// Result announcement back into the scope (score reply, timeout notice).
    async fn announce(&mut self, text: &str) -> anyhow::Result<()>;
}

/// The answer-collection workflow: post the question, collect exactly one
/// reply from the asker before the deadline, judge it, optionally open the
/// human-override window, and emit at most one score update. One instance per
/// invocation; state lives on the stack of `run`.
pub struct TrainingService {
    reply_timeout: Duration,
    override_timeout: Duration,
}

impl TrainingService {
    pub fn new(reply_timeout: Duration, override_timeout: Duration) -> Self {
        Self {
            reply_timeout,
            override_timeout,
        }
    }

    /// Ledger failures surface as [`crate::error::BotError`] inside the
    /// returned error; the command boundary maps them to user-facing text.
    pub async fn run<C, L>(
        &self,
        channel: &mut C,
        ledger: &L,
        question: &Question,
    ) -> anyhow::Result<TrainOutcome>
    where
        C: TrainingChannel + Send,
        L: ScoreLedger + Sync + ?Sized,
    {
        channel.post_question(question).await?;

        let Some(reply) = channel
            .await_answer(self.reply_timeout)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Answer collector failed, treating as timeout");
                None
            })
        else {
            let _ = channel
                .announce("Sorry, the question timed out waiting for an answer.")
                .await;
            return Ok(TrainOutcome::TimedOut);
        };

        if judge(question, &reply.content) == Verdict::Correct {
            let total = ledger.add_points(&reply.responder, TOSSUP_POINTS).await?;
            let _ = channel
                .announce(&format!("Great job! Your score is now {}.", total))
                .await;
            return Ok(TrainOutcome::CorrectOnFirstTry { total });
        }

        if let Err(e) = channel.send_override_prompt(question, &reply).await {
            tracing::warn!(error = %e, "Failed to post override prompt");
            return Ok(TrainOutcome::Incorrect);
        }

        let overridden = channel
            .await_override(&reply.responder, self.override_timeout)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Override collector failed, treating as expired");
                false
            });

        if overridden {
            let total = ledger.add_points(&reply.responder, TOSSUP_POINTS).await?;
            let _ = channel
                .announce(&format!("Great job! Your score is now {}.", total))
                .await;
            Ok(TrainOutcome::CorrectByOverride { total })
        } else {
            tracing::debug!(responder = %reply.responder, "Override window closed unreacted");
            Ok(TrainOutcome::Incorrect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::sample_question;

    #[test]
    fn multiple_choice_compares_only_the_leading_letter() {
        let question = sample_question("Multiple Choice", "B) Ohm");
        assert_eq!(judge(&question, "b"), Verdict::Correct);
        assert_eq!(judge(&question, "B) Ohm's law"), Verdict::Correct);
        assert_eq!(judge(&question, "c"), Verdict::Incorrect);
    }

    #[test]
    fn short_answer_requires_full_equality_ignoring_case() {
        let question = sample_question("Short Answer", "Mitochondria");
        assert_eq!(judge(&question, "mitochondria"), Verdict::Correct);
        assert_eq!(judge(&question, "  MITOCHONDRIA  "), Verdict::Correct);
        assert_eq!(judge(&question, "mitochondrion"), Verdict::Incorrect);
    }

    #[test]
    fn empty_answers_never_match() {
        let mc = sample_question("Multiple Choice", "B) Ohm");
        assert_eq!(judge(&mc, ""), Verdict::Incorrect);
        assert_eq!(judge(&mc, "   "), Verdict::Incorrect);

        let sa = sample_question("Short Answer", "Mitochondria");
        assert_eq!(judge(&sa, ""), Verdict::Incorrect);
    }
}
