use crate::commands;
use crate::services::AppState;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub struct Data {
    pub state: Arc<AppState>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

const ACTIVITY_TEXT: &str = "for /help | Science Bowl practice";
const WELCOME_MESSAGE: &str =
    "'Sup, I'm a Science Bowl practice bot! Use `/help` to learn more about me!";

pub async fn create_client(state: Arc<AppState>) -> anyhow::Result<serenity::Client> {
    // Collectors need the message and reaction streams on top of the guild
    // baseline.
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGE_REACTIONS
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let token = state.config.discord_token.clone();

    let options = poise::FrameworkOptions {
        commands: vec![
            commands::train::train(),
            commands::rounds::rounds(),
            commands::top::top(),
            commands::about::about(),
            commands::iss::iss(),
            commands::help::help(),
        ],
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        on_error: |error| {
            Box::pin(async move {
                if let Err(e) = poise::builtins::on_error(error).await {
                    tracing::error!(error = %e, "Error while handling command error");
                }
            })
        },
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .options(options)
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!(user = %ready.user.name, "Logged in");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                ctx.set_activity(Some(serenity::ActivityData::watching(ACTIVITY_TEXT)));
                Ok(Data { state })
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    _data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            if !matches!(is_new, Some(true)) {
                return Ok(());
            }
            tracing::info!(guild = %guild.name, "Joined guild");

            // Best-effort greeting; guilds without a #general just skip it.
            if let Some(channel) = guild
                .channels
                .values()
                .find(|c| c.name == "general" && c.kind == serenity::ChannelType::Text)
            {
                if let Err(e) = channel.say(ctx, WELCOME_MESSAGE).await {
                    tracing::warn!(error = %e, guild = %guild.name, "Welcome message failed");
                }
            }
        }
        serenity::FullEvent::GuildDelete { incomplete, full } => {
            let name = full
                .as_ref()
                .map(|g| g.name.clone())
                .unwrap_or_else(|| incomplete.id.to_string());
            tracing::info!(
                guild = %name,
                remaining = ctx.cache.guild_count(),
                "Removed from guild"
            );
        }
        _ => {}
    }
    Ok(())
}
