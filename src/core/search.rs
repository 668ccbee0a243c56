use crate::core::extract::{first_phone, first_result_website};
use crate::core::ClientSettings;
use crate::domain::model::{FieldMap, SourceKind, SourceResult};
use crate::domain::ports::SearchSource;
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::Html;

/// 搜尋結果頁的 client，擷取公司網站與電話
pub struct WebSearchClient {
    endpoint: String,
    engine_domain: String,
    settings: ClientSettings,
    client: Client,
}

impl WebSearchClient {
    pub fn new(
        endpoint: impl Into<String>,
        engine_domain: impl Into<String>,
        settings: ClientSettings,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            engine_domain: engine_domain.into(),
            settings,
            client: Client::new(),
        }
    }

    async fn fetch_results_page(&self, query_text: &str) -> Result<String> {
        tracing::debug!("📡 Search: GET {} q={}", self.endpoint, query_text);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query_text)])
            .header(USER_AGENT, &self.settings.user_agent)
            .timeout(self.settings.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::StatusError {
                source_name: SourceKind::WebSearch.label().to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// 解析結果頁；沒有找到任何東西時回傳空的 map
    pub fn parse_results(&self, body: &str) -> FieldMap {
        let mut fields = FieldMap::new();

        let document = Html::parse_document(body);
        if let Some(website) = first_result_website(&document, &self.engine_domain) {
            fields.insert("website".to_string(), website);
        }
        if let Some(phone) = first_phone(body) {
            fields.insert("phone".to_string(), phone);
        }

        fields
    }
}

#[async_trait]
impl SearchSource for WebSearchClient {
    async fn search(&self, query_text: &str) -> SourceResult {
        match self.fetch_results_page(query_text).await {
            Ok(body) => {
                let fields = self.parse_results(&body);
                tracing::info!("🔍 Search '{}': {} fields extracted", query_text, fields.len());
                SourceResult::Found(fields)
            }
            Err(e) => {
                tracing::warn!(source = "Google Search", error = %e, "web search failed");
                SourceResult::Absent
            }
        }
    }
}
