use crate::core::extract::{
    about_excerpt, certification_mentions, first_contact_email, first_phone, rendered_text,
};
use crate::core::ClientSettings;
use crate::domain::model::{FieldMap, SourceKind, SourceResult};
use crate::domain::ports::SiteSource;
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::Html;

/// 抓取公司網站並擷取聯絡資訊、認證與 about 段落
pub struct SiteScraper {
    settings: ClientSettings,
    client: Client,
}

impl SiteScraper {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        tracing::debug!("📡 Website: GET {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.settings.user_agent)
            .timeout(self.settings.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::StatusError {
                source_name: SourceKind::CompanyWebsite.label().to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// 從頁面原始內容擷取欄位
pub fn extract_site_fields(body: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    if let Some(phone) = first_phone(body) {
        fields.insert("phone".to_string(), phone);
    }
    if let Some(email) = first_contact_email(body) {
        fields.insert("primary_contact_email".to_string(), email);
    }

    let document = Html::parse_document(body);
    if let Some(certifications) = certification_mentions(&rendered_text(&document)) {
        fields.insert("certifications".to_string(), certifications);
    }
    if let Some(about) = about_excerpt(&document) {
        fields.insert("past_performance".to_string(), about);
    }

    fields
}

#[async_trait]
impl SiteSource for SiteScraper {
    async fn scrape(&self, url: &str) -> SourceResult {
        match self.fetch_page(url).await {
            Ok(body) => {
                let fields = extract_site_fields(&body);
                tracing::info!("🌐 Website {}: {} fields extracted", url, fields.len());
                SourceResult::Found(fields)
            }
            Err(e) => {
                tracing::warn!(source = "Company Website", url = %url, error = %e, "website scrape failed");
                SourceResult::Absent
            }
        }
    }
}
