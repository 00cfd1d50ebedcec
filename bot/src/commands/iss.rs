use crate::bot::{Context, Error};
use crate::services::iss_service::{self, IssService};
use poise::serenity_prelude as serenity;

/// Shows the current location of the ISS on a map
#[poise::command(slash_command)]
pub async fn iss(ctx: Context<'_>) -> Result<(), Error> {
    let state = &ctx.data().state;
    let service = IssService::new(state.http.clone());

    let position = match service.current_position().await {
        Ok(position) => position,
        Err(e) => {
            tracing::error!(error = %e, "ISS position fetch failed");
            ctx.say("Unable to fetch data. Please try again!").await?;
            return Ok(());
        }
    };

    let mut embed = serenity::CreateEmbed::new()
        .title("The current location of the ISS!")
        .url("https://spotthestation.nasa.gov/tracking_map.cfm");

    // The static map needs a Mapbox token; without one the coordinates still
    // get reported.
    match &state.config.mapbox_token {
        Some(token) => {
            embed = embed.image(iss_service::map_url(&position, token));
        }
        None => {
            embed = embed.description(format!(
                "Latitude: {} | Longitude: {}",
                position.latitude, position.longitude
            ));
        }
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
