use crate::bot::{Context, Error};
use poise::serenity_prelude as serenity;

const HELP_MESSAGE: &str = "Here's what I can do:\n\
    `/train [subject]` sends a practice toss-up and scores your reply.\n\
    `/rounds generate` builds a printable round of 25 questions; \
    `/rounds list` links your recent rounds; `/rounds hit` shows round counts.\n\
    `/top` shows the training leaderboard.\n\
    `/about` covers contributors, the changelog, and bot stats.\n\
    `/iss` shows where the ISS is right now.";

/// Replies with a help message explaining what the bot can do
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .description(HELP_MESSAGE)
        .colour(serenity::Colour::new(0xFFFFFF));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
