use anyhow::{anyhow, Context};
use serde::Deserialize;

const ISS_NOW_URL: &str = "http://api.open-notify.org/iss-now.json";

#[derive(Debug, Deserialize)]
pub struct IssPosition {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    iss_position: IssPosition,
}

/// Client for the open-notify ISS position feed.
pub struct IssService {
    http: reqwest::Client,
}

impl IssService {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub async fn current_position(&self) -> anyhow::Result<IssPosition> {
        let response = self
            .http
            .get(ISS_NOW_URL)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await
            .context("Failed to call ISS position feed")?;

        if !response.status().is_success() {
            return Err(anyhow!("ISS feed returned {}", response.status()));
        }

        let body: IssNowResponse = response
            .json()
            .await
            .context("Failed to parse ISS position response")?;
        Ok(body.iss_position)
    }
}

/// Static-map URL centered on the given position, pin included.
pub fn map_url(position: &IssPosition, mapbox_token: &str) -> String {
    format!(
        "https://api.mapbox.com/styles/v1/mapbox/light-v10/static/pin-s+000({lon},{lat})/{lon},{lat},1/1000x1000?access_token={token}",
        lon = position.longitude,
        lat = position.latitude,
        token = mapbox_token,
    )
}
