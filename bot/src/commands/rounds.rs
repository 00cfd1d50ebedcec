use crate::bot::{Context, Error};
use crate::services::question_service::QuestionService;
use crate::services::round_service::RoundService;
use poise::serenity_prelude as serenity;

fn round_service(ctx: &Context<'_>) -> RoundService {
    let state = &ctx.data().state;
    let questions = QuestionService::new(
        state.http.clone(),
        state.config.scibowldb_base_url.clone(),
    );
    RoundService::new(state.mongo.clone(), questions, state.http.clone())
}

/// Commands regarding generated practice rounds
#[poise::command(slash_command, subcommands("generate", "list", "hit"))]
pub async fn rounds(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Generates a round with randomized questions from the question database
#[poise::command(slash_command)]
pub async fn generate(ctx: Context<'_>) -> Result<(), Error> {
    let state = &ctx.data().state;
    let service = round_service(&ctx);

    // Sampling and persisting takes more than the interaction ack window.
    ctx.defer_ephemeral().await?;

    let user_id = ctx.author().id.to_string();
    let (id, round) = match service.generate(&user_id, &ctx.author().tag()).await {
        Ok(generated) => generated,
        Err(e) => {
            tracing::error!(error = %e, user = %user_id, "Round generation failed");
            ctx.say(e.user_message()).await?;
            return Ok(());
        }
    };

    let link = format!("{}/{}", state.config.round_base_url, id.to_hex());
    let mut reply = poise::CreateReply::default()
        .content(format!("Here's your round: {}", link))
        .ephemeral(true);

    // Optional external render step; a converter failure degrades to the
    // link-only reply.
    if let Some(converter_url) = &state.config.pdf_converter_url {
        match service.render_pdf(converter_url, &round.html_content).await {
            Ok(bytes) => {
                reply = reply.attachment(serenity::CreateAttachment::bytes(bytes, "round.pdf"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "PDF conversion failed, sending link only");
            }
        }
    }

    ctx.send(reply).await?;
    Ok(())
}

/// Lists your 5 most recently generated rounds with links
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let state = &ctx.data().state;
    let service = round_service(&ctx);
    let user_id = ctx.author().id.to_string();

    let rounds = match service.list_recent(&user_id, 5).await {
        Ok(rounds) => rounds,
        Err(e) => {
            tracing::error!(error = %e, user = %user_id, "Round listing failed");
            ctx.say(e.user_message()).await?;
            return Ok(());
        }
    };

    if rounds.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content("You haven't requested any rounds!")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let mut final_message = String::new();
    for (i, round) in rounds.iter().enumerate() {
        let id = round.id.map(|id| id.to_hex()).unwrap_or_default();
        final_message.push_str(&format!(
            "{}. [{}]({}/{})\n",
            i + 1,
            round.requested_at.format("%Y-%m-%d"),
            state.config.round_base_url,
            id
        ));
    }

    let embed = serenity::CreateEmbed::new()
        .author(
            serenity::CreateEmbedAuthor::new(ctx.author().tag()).icon_url(ctx.author().face()),
        )
        .title(format!("Last 5 rounds requested by {}", ctx.author().tag()))
        .description(final_message)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Shows the total number of rounds hit as well as the number for you
#[poise::command(slash_command)]
pub async fn hit(ctx: Context<'_>) -> Result<(), Error> {
    let service = round_service(&ctx);
    let user_id = ctx.author().id.to_string();

    match service.hit_counts(&user_id).await {
        Ok((total, user)) => {
            ctx.say(format!("Total Hits: {}\nYour Hits: {}", total, user))
                .await?;
        }
        Err(e) => {
            tracing::error!(error = %e, user = %user_id, "Round hit count failed");
            ctx.say(e.user_message()).await?;
        }
    }
    Ok(())
}
