use crate::bot::{Context, Error};
use crate::error::BotError;
use crate::models::{category, Question};
use crate::services::question_service::QuestionService;
use crate::services::score_service::ScoreService;
use crate::services::training_service::{AnswerReply, TrainingChannel, TrainingService};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::time::Duration;

const OVERRIDE_EMOJI_ID: u64 = 842778128966615060;
const OVERRIDE_EMOJI_NAME: &str = "override";

fn override_marker() -> serenity::ReactionType {
    serenity::ReactionType::Custom {
        animated: false,
        id: serenity::EmojiId::new(OVERRIDE_EMOJI_ID),
        name: Some(OVERRIDE_EMOJI_NAME.to_string()),
    }
}

/// Discord-side half of the answer-collection workflow. Reply collection is
/// filtered by (channel, asker) and the override reaction by (prompt message,
/// responder), so sessions running concurrently elsewhere never cross-match.
struct DiscordTrainingChannel<'a> {
    ctx: Context<'a>,
    asker: serenity::UserId,
    answer_msg: Option<serenity::Message>,
    override_msg: Option<serenity::Message>,
}

#[async_trait]
impl TrainingChannel for DiscordTrainingChannel<'_> {
    async fn post_question(&mut self, question: &Question) -> anyhow::Result<()> {
        self.ctx
            .say(format!(
                "{}\n\n||Source: {}||",
                question.tossup_question, question.uri
            ))
            .await?;
        Ok(())
    }

    async fn await_answer(&mut self, deadline: Duration) -> anyhow::Result<Option<AnswerReply>> {
        let message = self
            .ctx
            .channel_id()
            .await_reply(self.ctx.serenity_context())
            .author_id(self.asker)
            .timeout(deadline)
            .await;

        Ok(message.map(|message| {
            let reply = AnswerReply {
                responder: message.author.id.to_string(),
                content: message.content.clone(),
            };
            self.answer_msg = Some(message);
            reply
        }))
    }

    async fn send_override_prompt(
        &mut self,
        question: &Question,
        _reply: &AnswerReply,
    ) -> anyhow::Result<()> {
        let answer_msg = self
            .answer_msg
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no answer message captured"))?;

        let embed = serenity::CreateEmbed::new()
            .author(
                serenity::CreateEmbedAuthor::new(answer_msg.author.tag())
                    .icon_url(answer_msg.author.face()),
            )
            .field(
                "Correct answer",
                format!("`{}`", question.tossup_answer),
                false,
            )
            .description(format!(
                "It seems your answer was incorrect. Please react with {} to override your \
                 answer if you think you got it right.",
                override_marker()
            ))
            .timestamp(serenity::Timestamp::now());

        let message = self
            .ctx
            .channel_id()
            .send_message(
                self.ctx.serenity_context(),
                serenity::CreateMessage::new().embed(embed),
            )
            .await?;

        // Best effort; the prompt still works if the seed reaction fails.
        if let Err(e) = message
            .react(self.ctx.serenity_context(), override_marker())
            .await
        {
            tracing::warn!(error = %e, "Failed to seed the override reaction");
        }

        self.override_msg = Some(message);
        Ok(())
    }

    async fn await_override(&mut self, responder: &str, window: Duration) -> anyhow::Result<bool> {
        let Some(override_msg) = &self.override_msg else {
            return Ok(false);
        };
        let responder = serenity::UserId::new(responder.parse::<u64>()?);

        let reaction = override_msg
            .await_reaction(self.ctx.serenity_context())
            .author_id(responder)
            .filter(|reaction| {
                matches!(
                    &reaction.emoji,
                    serenity::ReactionType::Custom { id, .. } if id.get() == OVERRIDE_EMOJI_ID
                )
            })
            .timeout(window)
            .await;

        Ok(reaction.is_some())
    }

    async fn announce(&mut self, text: &str) -> anyhow::Result<()> {
        match &self.answer_msg {
            Some(answer_msg) => {
                answer_msg.reply(self.ctx.serenity_context(), text).await?;
            }
            None => {
                self.ctx.say(text).await?;
            }
        }
        Ok(())
    }
}

/// Sends a single training question to be answered
#[poise::command(slash_command)]
pub async fn train(
    ctx: Context<'_>,
    #[description = "Optional subject to be used as a filter"] subject: Option<String>,
) -> Result<(), Error> {
    let state = ctx.data().state.clone();

    let categories = match category::resolve(subject.as_deref()) {
        Ok(categories) => categories,
        Err(e) => {
            ctx.say(e.user_message()).await?;
            return Ok(());
        }
    };

    let questions = QuestionService::new(
        state.http.clone(),
        state.config.scibowldb_base_url.clone(),
    );
    let question = match questions.fetch_random(&categories).await {
        Ok(question) => question,
        Err(e) => {
            tracing::error!(error = %e, "Question fetch failed");
            ctx.say(e.user_message()).await?;
            return Ok(());
        }
    };

    let scores = ScoreService::new(state.mongo.clone());
    let trainer = TrainingService::new(
        Duration::from_secs(state.config.reply_timeout_secs),
        Duration::from_secs(state.config.override_timeout_secs),
    );
    let mut channel = DiscordTrainingChannel {
        ctx,
        asker: ctx.author().id,
        answer_msg: None,
        override_msg: None,
    };

    match trainer.run(&mut channel, &scores, &question).await {
        Ok(outcome) => {
            tracing::info!(user = %ctx.author().id, outcome = ?outcome, "Training session finished");
        }
        Err(e) => {
            tracing::error!(error = ?e, user = %ctx.author().id, "Training session failed");
            let text = e
                .downcast_ref::<BotError>()
                .map(BotError::user_message)
                .unwrap_or("Uh oh! :( There was an internal error. Please try again.");
            let _ = ctx.say(text).await;
        }
    }

    Ok(())
}
