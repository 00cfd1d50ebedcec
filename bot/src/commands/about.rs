use crate::bot::{Context, Error};
use crate::services::score_service::ScoreService;
use anyhow::{anyhow, Context as _};
use poise::serenity_prelude as serenity;

/// Commands regarding the creation and development of the bot
#[poise::command(slash_command, subcommands("contributors", "changelog", "bot"))]
pub async fn about(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Lists contributors to the bot
#[poise::command(slash_command)]
pub async fn contributors(ctx: Context<'_>) -> Result<(), Error> {
    let embed = serenity::CreateEmbed::new()
        .title("Contributors")
        .field("Creator", "<@745063586422063214> [ADawesomeguy#2235]", true)
        .field(
            "Contributors",
            "<@650525101048987649> [tEjAs#8127]\n<@426864344463048705> [tetrident#9396]",
            true,
        )
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Lists the 5 most recent changes in a git-log style format
#[poise::command(slash_command)]
pub async fn changelog(ctx: Context<'_>) -> Result<(), Error> {
    let commits = match recent_commits(5).await {
        Ok(commits) => commits,
        Err(e) => {
            tracing::error!(error = %e, "Changelog lookup failed");
            ctx.say("Unable to read the changelog. Please try again!")
                .await?;
            return Ok(());
        }
    };

    let mut embed = serenity::CreateEmbed::new()
        .author(
            serenity::CreateEmbedAuthor::new(ctx.author().tag()).icon_url(ctx.author().face()),
        )
        .title("Changelog")
        .timestamp(serenity::Timestamp::now());

    let repo_url = ctx.data().state.config.repo_url.as_deref();
    for commit in commits {
        embed = embed.field(commit.abbrev.clone(), commit.field_text(repo_url), false);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Lists information about the bot
#[poise::command(slash_command)]
pub async fn bot(ctx: Context<'_>) -> Result<(), Error> {
    let state = &ctx.data().state;
    let guild_count = ctx.serenity_context().cache.guild_count();

    let training_users = match ScoreService::new(state.mongo.clone()).count_users().await {
        Ok(count) => count.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "Training-user count failed");
            "unavailable".to_string()
        }
    };

    let embed = serenity::CreateEmbed::new()
        .author(
            serenity::CreateEmbedAuthor::new(ctx.author().tag()).icon_url(ctx.author().face()),
        )
        .title("About this bot")
        .field("Servers", guild_count.to_string(), true)
        .field("Training Users", training_users, true)
        .timestamp(serenity::Timestamp::now());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommitInfo {
    pub hash: String,
    pub abbrev: String,
    pub subject: String,
    pub author: String,
    pub date: String,
}

impl CommitInfo {
    fn field_text(&self, repo_url: Option<&str>) -> String {
        let mut text = format!(
            "> `Hash:` {}\n> `Subject:` {}\n> `Author:` {}\n> `Date:` {}\n",
            self.hash, self.subject, self.author, self.date
        );
        if let Some(repo_url) = repo_url {
            text.push_str(&format!("> `Link:` [commit]({}/commit/{})\n", repo_url, self.hash));
        }
        text
    }
}

/// Reads the deployment checkout's history; each record is unit-separated so
/// commit subjects with arbitrary punctuation survive parsing.
async fn recent_commits(count: usize) -> anyhow::Result<Vec<CommitInfo>> {
    let output = tokio::process::Command::new("git")
        .args([
            "log",
            "-n",
            &count.to_string(),
            "--pretty=format:%H%x1f%h%x1f%s%x1f%an%x1f%ar",
        ])
        .output()
        .await
        .context("Failed to run git log")?;

    if !output.status.success() {
        return Err(anyhow!(
            "git log exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    Ok(parse_git_log(&String::from_utf8_lossy(&output.stdout)))
}

pub(crate) fn parse_git_log(stdout: &str) -> Vec<CommitInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('\u{1f}');
            Some(CommitInfo {
                hash: parts.next()?.to_string(),
                abbrev: parts.next()?.to_string(),
                subject: parts.next()?.to_string(),
                author: parts.next()?.to_string(),
                date: parts.next()?.to_string(),
            })
        })
        .collect()
}
