use crate::error::{BotError, BotResult};
use crate::models::category::DEFAULT_CATEGORIES;
use crate::models::{GeneratedRound, Question};
use crate::services::question_service::QuestionService;
use anyhow::{anyhow, Context};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;
use mongodb::Database;
use rand::Rng;

const COLLECTION: &str = "generated_rounds";

/// Questions per generated round, one toss-up/bonus pair each.
pub const ROUND_SIZE: usize = 25;

pub struct RoundService {
    mongo: Database,
    questions: QuestionService,
    http: reqwest::Client,
}

impl RoundService {
    pub fn new(mongo: Database, questions: QuestionService, http: reqwest::Client) -> Self {
        Self {
            mongo,
            questions,
            http,
        }
    }

    fn collection(&self) -> mongodb::Collection<GeneratedRound> {
        self.mongo.collection(COLLECTION)
    }

    /// Samples 25 pairs from the default-category pool, renders the HTML
    /// document, and persists it. Returns the new round id together with the
    /// persisted document. Any fetch failure aborts the whole generation;
    /// nothing partial is saved.
    pub async fn generate(
        &self,
        requested_by: &str,
        author_tag: &str,
    ) -> BotResult<(ObjectId, GeneratedRound)> {
        let pool = self
            .questions
            .fetch_pool(&DEFAULT_CATEGORIES)
            .await
            .map_err(|e| BotError::GenerationFailed(anyhow!(e)))?;

        // Duplicate picks across pairs are allowed.
        let picks: Vec<Question> = {
            let mut rng = rand::rng();
            (0..ROUND_SIZE)
                .map(|_| pool[rng.random_range(0..pool.len())].clone())
                .collect()
        };

        let round = GeneratedRound {
            id: None,
            html_content: build_round_html(&picks),
            requested_by: requested_by.to_string(),
            author_tag: author_tag.to_string(),
            requested_at: Utc::now(),
        };

        let result = self
            .collection()
            .insert_one(&round)
            .await
            .context("Failed to insert generated round")
            .map_err(BotError::Persistence)?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| BotError::Persistence(anyhow!("round insert returned a non-oid id")))?;

        tracing::info!(round = %id, user = %requested_by, "Round generated");
        Ok((id, round))
    }

    pub async fn find_by_id(&self, id: ObjectId) -> BotResult<Option<GeneratedRound>> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .context("Failed to look up round")
            .map_err(BotError::Persistence)
    }

    /// The requester's most recent rounds, newest first.
    pub async fn list_recent(&self, requested_by: &str, limit: i64) -> BotResult<Vec<GeneratedRound>> {
        let cursor = self
            .collection()
            .find(doc! { "requestedBy": requested_by })
            .with_options(
                FindOptions::builder()
                    .sort(doc! { "timestamp": -1 })
                    .limit(limit)
                    .build(),
            )
            .await
            .context("Failed to query rounds")
            .map_err(BotError::Persistence)?;

        cursor
            .try_collect()
            .await
            .context("Failed to read round cursor")
            .map_err(BotError::Persistence)
    }

    /// Total rounds generated and the requester's share, for `/rounds hit`.
    pub async fn hit_counts(&self, requested_by: &str) -> BotResult<(u64, u64)> {
        let total = self
            .collection()
            .count_documents(doc! {})
            .await
            .context("Failed to count rounds")
            .map_err(BotError::Persistence)?;
        let user = self
            .collection()
            .count_documents(doc! { "requestedBy": requested_by })
            .await
            .context("Failed to count user rounds")
            .map_err(BotError::Persistence)?;

        Ok((total, user))
    }

    /// Hands the HTML document to the external render service (Gotenberg-style
    /// multipart upload) and returns the PDF bytes. Callers degrade to the
    /// link-only reply when this fails.
    pub async fn render_pdf(&self, converter_url: &str, html: &str) -> anyhow::Result<Vec<u8>> {
        let part = reqwest::multipart::Part::text(html.to_string())
            .file_name("index.html")
            .mime_str("text/html")?;
        let form = reqwest::multipart::Form::new().part("files", part);

        let response = self
            .http
            .post(format!("{}/convert/html", converter_url))
            .multipart(form)
            .timeout(std::time::Duration::from_secs(30))
            .send()
            .await
            .context("Failed to call PDF converter")?;

        if !response.status().is_success() {
            return Err(anyhow!("PDF converter returned {}", response.status()));
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read PDF converter response")?;
        Ok(bytes.to_vec())
    }
}

/// Renders the fixed round template: a heading, then 25 numbered toss-up and
/// bonus blocks with category bolded, format italicized, and the answer
/// revealed inline. Newlines inside question text become `<br>`.
pub fn build_round_html(picks: &[Question]) -> String {
    let mut html = String::from(
        "<html><head><link rel=\"preconnect\" href=\"https://fonts.gstatic.com\">\
         <link href=\"https://fonts.googleapis.com/css2?family=Ubuntu&display=swap\" rel=\"stylesheet\">\
         </head><body style=\"width: 70%; margin-left: auto; margin-right: auto;\">\
         <h2 style=\"text-align: center; text-decoration: underline overline; padding: 7px;\">\
         ROUND GENERATED USING THE SCIBOWLDB API</h2>",
    );

    for (i, question) in picks.iter().enumerate() {
        let number = i + 1;
        let mut block = format!(
            "<br><br><h3 style=\"text-align: center;\"><strong>TOSS-UP</strong></h3>\n<br>\
             {number}) <strong>{category}</strong> <em>{format}</em> {text}<br><br>\
             <strong>ANSWER:</strong> {answer}<br>",
            number = number,
            category = question.category,
            format = question.tossup_format,
            text = question.tossup_question,
            answer = question.tossup_answer,
        );
        block.push_str(&format!(
            "<br><br><h3 style=\"text-align: center;\"><strong>BONUS</strong></h3>\n<br>\
             {number}) <strong>{category}</strong> <em>{format}</em> {text}<br><br>\
             <strong>ANSWER:</strong> {answer}<br><br><hr><br>",
            number = number,
            category = question.category,
            format = question.bonus_format,
            text = question.bonus_question,
            answer = question.bonus_answer,
        ));
        html.push_str(&block.replace('\n', "<br>"));
    }

    html.push_str("</body></html>");
    html
}
