use crate::error::{BotError, BotResult};
use crate::models::question::{Question, QuestionBatchResponse, RandomQuestionResponse};
use crate::models::CategoryTag;
use anyhow::{anyhow, Context};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct QuestionFilter<'a> {
    categories: Vec<&'a str>,
}

/// Client for the trivia question source. No automatic retries: fetch
/// failures surface as [`BotError::FetchFailed`] and the user is asked to
/// try again.
pub struct QuestionService {
    http: reqwest::Client,
    base_url: String,
}

impl QuestionService {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// One random question drawn from the given category set.
    pub async fn fetch_random(&self, categories: &[CategoryTag]) -> BotResult<Question> {
        let url = format!("{}/api/questions/random", self.base_url);
        let response: RandomQuestionResponse = self
            .post_filter(&url, categories)
            .await
            .map_err(BotError::FetchFailed)?;

        tracing::debug!(
            category = %response.question.category,
            "Fetched random question"
        );
        Ok(response.question)
    }

    /// The full question pool for the given category set, used by round
    /// generation to sample from.
    pub async fn fetch_pool(&self, categories: &[CategoryTag]) -> BotResult<Vec<Question>> {
        let url = format!("{}/api/questions", self.base_url);
        let response: QuestionBatchResponse = self
            .post_filter(&url, categories)
            .await
            .map_err(BotError::FetchFailed)?;

        if response.questions.is_empty() {
            return Err(BotError::FetchFailed(anyhow!(
                "question source returned an empty pool"
            )));
        }

        tracing::debug!(count = response.questions.len(), "Fetched question pool");
        Ok(response.questions)
    }

    async fn post_filter<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        categories: &[CategoryTag],
    ) -> anyhow::Result<T> {
        let filter = QuestionFilter {
            categories: categories.iter().map(CategoryTag::as_str).collect(),
        };

        let response = self
            .http
            .post(url)
            .json(&filter)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await
            .with_context(|| format!("Failed to call question source at {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow!("question source returned {}", status));
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse question source response")
    }
}
