use crate::config::EnrichConfig;
use crate::core::registry::SamGovClient;
use crate::core::search::WebSearchClient;
use crate::core::site::SiteScraper;
use crate::core::{
    ClientSettings, CompanyQuery, EnrichedProfile, FieldMap, RegistrySource, SearchSource,
    SiteSource, SourceKind,
};
use crate::domain::model::SourceSurvey;
use tracing::Instrument;

/// 依固定順序呼叫各來源並合併結果。
///
/// 1. SAM.gov
/// 2. 公司網站（只在呼叫端明確提供時）
/// 3. 網頁搜尋，只在前兩步都沒有資料時才執行
///
/// 來源失敗不會往外拋，`enrich` 一定回傳 profile。
pub struct EnrichmentEngine<R: RegistrySource, W: SiteSource, S: SearchSource> {
    registry: R,
    site: W,
    search: S,
}

impl EnrichmentEngine<SamGovClient, SiteScraper, WebSearchClient> {
    pub fn from_config(config: &EnrichConfig) -> Self {
        let settings = ClientSettings::from(&config.http);

        let registry = SamGovClient::new(
            config.registry.endpoint.clone(),
            config.registry.api_key().map(str::to_string),
            settings.clone(),
        );
        if !registry.is_enabled() {
            tracing::warn!("⚠️ SAM.gov API key not configured, registry lookups disabled");
        }

        Self::new(
            registry,
            SiteScraper::new(settings.clone()),
            WebSearchClient::new(
                config.search.endpoint.clone(),
                config.search.engine_domain.clone(),
                settings,
            ),
        )
    }
}

impl<R: RegistrySource, W: SiteSource, S: SearchSource> EnrichmentEngine<R, W, S> {
    pub fn new(registry: R, site: W, search: S) -> Self {
        Self {
            registry,
            site,
            search,
        }
    }

    #[tracing::instrument(name = "enrich", skip_all, fields(company = %query.name))]
    pub async fn enrich(&self, query: &CompanyQuery) -> EnrichedProfile {
        let mut profile = EnrichedProfile::new();

        let registry_result = self
            .registry
            .lookup(&query.name)
            .instrument(source_span(SourceKind::Registry))
            .await;
        if profile.merge_from(SourceKind::Registry, registry_result) {
            tracing::info!("✅ Found data on SAM.gov");
        }

        if let Some(website) = query.explicit_website() {
            tracing::info!("🔍 Scraping company website {}...", website);
            let site_result = self
                .site
                .scrape(website)
                .instrument(source_span(SourceKind::CompanyWebsite))
                .await;
            if profile.merge_from(SourceKind::CompanyWebsite, site_result) {
                tracing::info!("✅ Found additional data on website");
            }
        }

        if !profile.success() {
            let query_text = query.search_text();
            tracing::info!("🔍 Falling back to web search for '{}'...", query_text);
            let search_result = self
                .search
                .search(&query_text)
                .instrument(source_span(SourceKind::WebSearch))
                .await;
            if profile.merge_from(SourceKind::WebSearch, search_result) {
                tracing::info!("✅ Found data via web search");
            }
        }

        if !profile.success() {
            tracing::warn!("❌ No source returned data for {}", query.name);
        }

        tracing::debug!(
            "Enrichment for {} finished: sources={:?}, fields={}",
            query.name,
            profile.sources_used(),
            profile.data().len()
        );

        profile
    }

    /// 不做 gating 地查 SAM.gov 與網頁搜尋，後者覆蓋前者
    #[tracing::instrument(name = "survey", skip_all, fields(company = %query.name))]
    pub async fn survey(&self, query: &CompanyQuery) -> SourceSurvey {
        let mut survey = SourceSurvey {
            company_name: query.name.clone(),
            sources_checked: Vec::new(),
            data_found: FieldMap::new(),
        };

        let registry_result = self
            .registry
            .lookup(&query.name)
            .instrument(source_span(SourceKind::Registry))
            .await;
        let search_result = self
            .search
            .search(&query.location_text())
            .instrument(source_span(SourceKind::WebSearch))
            .await;

        for (source, result) in [
            (SourceKind::Registry, registry_result),
            (SourceKind::WebSearch, search_result),
        ] {
            if let Some(fields) = result.into_fields().filter(|fields| !fields.is_empty()) {
                survey.sources_checked.push(source);
                survey.data_found.extend(fields);
            }
        }

        tracing::info!(
            "📋 Survey for {}: {} sources, {} fields",
            query.name,
            survey.sources_checked.len(),
            survey.data_found.len()
        );

        survey
    }
}

fn source_span(source: SourceKind) -> tracing::Span {
    tracing::info_span!("source", name = source.label())
}
