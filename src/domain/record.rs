use crate::domain::model::{EnrichedProfile, SourceKind};
use crate::domain::ports::DocumentTextSource;
use crate::utils::error::{EnrichError, Result};
use crate::utils::text::{clean_extracted_text, DEFAULT_MAX_DOCUMENT_LENGTH, MIN_DOCUMENT_LENGTH};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 對應 company_profiles 資料表欄位的紀錄，交給外部 sink 寫入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfileRecord {
    pub company_name: String,
    pub company_ein: Option<String>,
    pub company_duns: Option<String>,
    pub company_cage_code: Option<String>,
    pub company_uei: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub primary_contact_email: Option<String>,
    pub business_type: Option<String>,
    pub certifications: Option<String>,
    pub naics_codes: Option<String>,
    /// 原始的登錄啟用日期，尚未換算成年數
    pub years_in_business: Option<String>,
    pub past_performance: Option<String>,
    pub notes: Option<String>,
    pub sources_used: Vec<SourceKind>,
    pub fetched_at: DateTime<Utc>,
}

impl CompanyProfileRecord {
    pub fn from_profile(company_name: &str, profile: &EnrichedProfile) -> Self {
        let field = |name: &str| {
            profile
                .get(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            company_name: company_name.to_string(),
            company_ein: field("company_ein"),
            company_duns: field("company_duns"),
            company_cage_code: field("company_cage_code"),
            company_uei: field("company_uei"),
            address: field("address"),
            city: field("city"),
            state: field("state"),
            zip_code: field("zip_code"),
            phone: field("phone"),
            website: field("website"),
            primary_contact_email: field("primary_contact_email"),
            business_type: field("business_type"),
            certifications: field("certifications"),
            naics_codes: field("naics_codes"),
            years_in_business: field("years_in_business"),
            past_performance: field("past_performance"),
            notes: None,
            sources_used: profile.sources_used().to_vec(),
            fetched_at: Utc::now(),
        }
    }

    /// 附加外部擷取的文件文字到 notes（來源不會填這個欄位）。
    /// 清理後太短或 notes 已有內容時不變動。
    pub fn with_document_text(mut self, text: &str) -> Self {
        let cleaned = clean_extracted_text(text, DEFAULT_MAX_DOCUMENT_LENGTH);
        let length = cleaned.chars().count();
        if length <= MIN_DOCUMENT_LENGTH {
            tracing::debug!("📄 Document text too short ({} chars), skipping", length);
            return self;
        }

        if self.notes.as_deref().map_or(true, str::is_empty) {
            self.notes = Some(cleaned);
        }
        self
    }

    pub fn with_document_from<D: DocumentTextSource>(self, extractor: &D, path: &Path) -> Result<Self> {
        let text = extractor.extract_text(path)?;
        if text.trim().chars().count() <= MIN_DOCUMENT_LENGTH {
            return Err(EnrichError::DocumentError {
                message: format!("No text could be extracted from {}", path.display()),
            });
        }
        Ok(self.with_document_text(&text))
    }

    /// 檔名用的 slug
    pub fn slug(&self) -> String {
        let slug = self
            .company_name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        if slug.is_empty() {
            "company".to_string()
        } else {
            slug
        }
    }
}
