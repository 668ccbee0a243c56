use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 單一來源回傳的欄位集合（欄位名稱 -> 值）
pub type FieldMap = BTreeMap<String, String>;

/// 查詢輸入，建立後不可變
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyQuery {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
}

impl CompanyQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: None,
            state: None,
            website: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// 搜尋字串：名稱 + 城市 + 州，空白欄位略過
    pub fn search_text(&self) -> String {
        [Some(self.name.as_str()), self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Survey 用的搜尋字串：城市只在州也存在時才加入
    pub fn location_text(&self) -> String {
        let city = non_blank(self.city.as_deref());
        let state = non_blank(self.state.as_deref());

        match (city, state) {
            (Some(city), Some(state)) => format!("{} {} {}", self.name, city, state),
            (None, Some(state)) => format!("{} {}", self.name, state),
            _ => self.name.clone(),
        }
    }

    /// 明確提供的網站（空字串視為未提供）
    pub fn explicit_website(&self) -> Option<&str> {
        non_blank(self.website.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 資料來源識別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "SAM.gov")]
    Registry,
    #[serde(rename = "Company Website")]
    CompanyWebsite,
    #[serde(rename = "Google Search")]
    WebSearch,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Registry => "SAM.gov",
            SourceKind::CompanyWebsite => "Company Website",
            SourceKind::WebSearch => "Google Search",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 單次來源呼叫的結果。失敗與「查無資料」都以 `Absent` 表示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceResult {
    Found(FieldMap),
    Absent,
}

impl SourceResult {
    pub fn is_absent(&self) -> bool {
        matches!(self, SourceResult::Absent)
    }

    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            SourceResult::Found(fields) => Some(fields),
            SourceResult::Absent => None,
        }
    }

    /// 至少帶有一個欄位
    pub fn has_fields(&self) -> bool {
        self.fields().is_some_and(|fields| !fields.is_empty())
    }

    pub fn into_fields(self) -> Option<FieldMap> {
        match self {
            SourceResult::Found(fields) => Some(fields),
            SourceResult::Absent => None,
        }
    }
}

/// 一次 enrichment 的合併結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrichedProfile {
    sources_used: Vec<SourceKind>,
    data: FieldMap,
    success: bool,
}

impl EnrichedProfile {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn sources_used(&self) -> &[SourceKind] {
        &self.sources_used
    }

    pub fn data(&self) -> &FieldMap {
        &self.data
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.data.get(field).map(String::as_str)
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// 依優先順序合併：已有非空值的欄位不會被後來的來源覆蓋。
    /// 來源只有在帶回至少一個欄位時才算數，回傳是否計入。
    pub(crate) fn merge_from(&mut self, source: SourceKind, result: SourceResult) -> bool {
        if !result.has_fields() {
            return false;
        }
        let Some(fields) = result.into_fields() else {
            return false;
        };

        for (key, value) in fields {
            let vacant = self.data.get(&key).map_or(true, |existing| existing.is_empty());
            if vacant {
                self.data.insert(key, value);
            }
        }

        self.sources_used.push(source);
        self.success = true;
        true
    }
}

/// 不做 gating 的來源普查結果；後面的來源會覆蓋前面的值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSurvey {
    pub company_name: String,
    pub sources_checked: Vec<SourceKind>,
    pub data_found: FieldMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_search_text_tolerates_blanks() {
        let query = CompanyQuery::new("ABC Cleaning Services")
            .with_city("Norfolk")
            .with_state("VA");
        assert_eq!(query.search_text(), "ABC Cleaning Services Norfolk VA");

        let query = CompanyQuery::new("ABC Cleaning Services").with_city("  ");
        assert_eq!(query.search_text(), "ABC Cleaning Services");

        let query = CompanyQuery::new("ABC Cleaning Services").with_state("VA");
        assert_eq!(query.search_text(), "ABC Cleaning Services VA");
    }

    #[test]
    fn test_location_text_requires_state_for_city() {
        let query = CompanyQuery::new("Acme").with_city("Norfolk");
        assert_eq!(query.location_text(), "Acme");

        let query = CompanyQuery::new("Acme").with_city("Norfolk").with_state("VA");
        assert_eq!(query.location_text(), "Acme Norfolk VA");

        let query = CompanyQuery::new("Acme").with_state("VA");
        assert_eq!(query.location_text(), "Acme VA");
    }

    #[test]
    fn test_explicit_website_ignores_blank() {
        assert_eq!(CompanyQuery::new("Acme").with_website("").explicit_website(), None);
        assert_eq!(
            CompanyQuery::new("Acme")
                .with_website("https://acme.com")
                .explicit_website(),
            Some("https://acme.com")
        );
    }

    #[test]
    fn test_merge_keeps_earlier_values() {
        let mut profile = EnrichedProfile::new();
        profile.merge_from(
            SourceKind::Registry,
            SourceResult::Found(fields(&[("phone", "757-555-0100"), ("certifications", "")])),
        );
        profile.merge_from(
            SourceKind::CompanyWebsite,
            SourceResult::Found(fields(&[
                ("phone", "757-555-9999"),
                ("certifications", "HUBZone"),
                ("primary_contact_email", "info@acme.com"),
            ])),
        );

        assert_eq!(profile.get("phone"), Some("757-555-0100"));
        assert_eq!(profile.get("certifications"), Some("HUBZone"));
        assert_eq!(profile.get("primary_contact_email"), Some("info@acme.com"));
        assert_eq!(
            profile.sources_used(),
            &[SourceKind::Registry, SourceKind::CompanyWebsite]
        );
        assert!(profile.success());
    }

    #[test]
    fn test_merge_ignores_absent_and_empty_results() {
        let mut profile = EnrichedProfile::new();
        assert!(!profile.merge_from(SourceKind::Registry, SourceResult::Absent));
        assert!(!profile.merge_from(SourceKind::WebSearch, SourceResult::Found(FieldMap::new())));

        assert!(!profile.success());
        assert!(profile.data().is_empty());
        assert!(profile.sources_used().is_empty());
    }

    #[test]
    fn test_source_kind_serializes_as_label() {
        let json = serde_json::to_string(&vec![SourceKind::Registry, SourceKind::WebSearch]).unwrap();
        assert_eq!(json, r#"["SAM.gov","Google Search"]"#);
    }
}
