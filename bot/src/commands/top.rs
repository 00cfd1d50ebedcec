use crate::bot::{Context, Error};
use crate::models::ScoreRecord;
use crate::services::score_service::ScoreService;
use poise::serenity_prelude as serenity;

/// Minimum number of score records before a leaderboard is shown.
const MIN_LEADERBOARD_USERS: usize = 10;

/// One line per user, rank first, mention and total after. Ties keep the
/// store's stable order. Errs with the shortfall message when there are not
/// enough records to fill the board.
pub fn render_top_ten(records: &[ScoreRecord]) -> Result<String, String> {
    if records.len() < MIN_LEADERBOARD_USERS {
        return Err(format!(
            "There are only {} users, we need at least 10!",
            records.len()
        ));
    }

    let mut content = String::new();
    for (i, record) in records.iter().take(MIN_LEADERBOARD_USERS).enumerate() {
        content.push_str(&format!(
            "{}: <@{}>: {}\n",
            i + 1,
            record.author_id,
            record.score
        ));
    }
    Ok(content)
}

/// Lists top ten scores across servers
#[poise::command(slash_command)]
pub async fn top(ctx: Context<'_>) -> Result<(), Error> {
    let state = &ctx.data().state;
    let scores = ScoreService::new(state.mongo.clone());

    let records = match scores.top_scores(MIN_LEADERBOARD_USERS as i64).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Leaderboard query failed");
            ctx.say(e.user_message()).await?;
            return Ok(());
        }
    };

    match render_top_ten(&records) {
        Ok(content) => {
            let embed = serenity::CreateEmbed::new()
                .title("Top Ten!")
                .description(content);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Err(shortfall) => {
            ctx.say(shortfall).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user: &str, score: i64) -> ScoreRecord {
        ScoreRecord {
            id: None,
            author_id: user.to_string(),
            score,
        }
    }

    #[test]
    fn nine_records_report_the_shortfall() {
        let records: Vec<ScoreRecord> =
            (0..9).map(|i| record(&format!("user-{}", i), 4)).collect();
        let err = render_top_ten(&records).unwrap_err();
        assert_eq!(err, "There are only 9 users, we need at least 10!");
    }

    #[test]
    fn ten_records_enumerate_in_store_order() {
        let records: Vec<ScoreRecord> = (0..10)
            .map(|i| record(&format!("user-{}", i), 40 - 4 * i as i64))
            .collect();
        let content = render_top_ten(&records).unwrap();

        assert_eq!(content.lines().count(), 10);
        assert!(content.starts_with("1: <@user-0>: 40\n"));
        assert!(content.contains("10: <@user-9>: 4\n"));
    }

    #[test]
    fn extra_records_are_cut_at_ten() {
        let records: Vec<ScoreRecord> = (0..15)
            .map(|i| record(&format!("user-{}", i), 100 - i as i64))
            .collect();
        let content = render_top_ten(&records).unwrap();
        assert_eq!(content.lines().count(), 10);
        assert!(!content.contains("user-10"));
    }
}
