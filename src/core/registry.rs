use crate::core::ClientSettings;
use crate::domain::model::{FieldMap, SourceKind, SourceResult};
use crate::domain::ports::RegistrySource;
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

const INCLUDE_SECTIONS: &str = "entityRegistration,coreData,repsAndCerts";

/// SAM.gov 實體查詢 client。沒有 API key 時完全不發出請求。
pub struct SamGovClient {
    endpoint: String,
    api_key: Option<String>,
    settings: ClientSettings,
    client: Client,
}

impl SamGovClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, settings: ClientSettings) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            settings,
            client: Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_entity(&self, api_key: &str, legal_name: &str) -> Result<Option<FieldMap>> {
        tracing::debug!("📡 SAM.gov: GET {} legalBusinessName={}", self.endpoint, legal_name);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", api_key),
                ("legalBusinessName", legal_name),
                ("includeSections", INCLUDE_SECTIONS),
            ])
            .timeout(self.settings.timeout)
            .send()
            .await?;

        tracing::debug!("📡 SAM.gov: response status {}", response.status());

        if !response.status().is_success() {
            return Err(EnrichError::StatusError {
                source_name: SourceKind::Registry.label().to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: EntitySearchResponse =
            serde_json::from_str(&body).map_err(|e| EnrichError::ParseError {
                message: format!("SAM.gov entity response: {}", e),
            })?;

        Ok(parsed
            .entity_data
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|entity| entity.into_fields()))
    }
}

#[async_trait]
impl RegistrySource for SamGovClient {
    async fn lookup(&self, legal_name: &str) -> SourceResult {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("SAM.gov lookup skipped: no API key configured");
            return SourceResult::Absent;
        };

        tracing::info!("🔍 Searching SAM.gov for {}...", legal_name);

        match self.fetch_entity(api_key, legal_name).await {
            Ok(Some(fields)) => {
                tracing::info!("✅ SAM.gov: matched '{}' ({} fields)", legal_name, fields.len());
                SourceResult::Found(fields)
            }
            Ok(None) => {
                tracing::info!("SAM.gov: no entity registered as '{}'", legal_name);
                SourceResult::Absent
            }
            Err(e) => {
                tracing::warn!(source = "SAM.gov", error = %e, "registry lookup failed");
                SourceResult::Absent
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntitySearchResponse {
    entity_data: Option<Vec<EntityRecord>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EntityRecord {
    core_data: Option<CoreData>,
    entity_registration: Option<EntityRegistration>,
    reps_and_certs: Option<RepsAndCerts>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CoreData {
    #[serde(deserialize_with = "lenient_string")]
    tax_identification_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    duns_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    cage_code: Option<String>,
    #[serde(rename = "ueiSAM", deserialize_with = "lenient_string")]
    uei_sam: Option<String>,
    physical_address: Option<PhysicalAddress>,
    #[serde(deserialize_with = "lenient_string")]
    business_type_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PhysicalAddress {
    #[serde(rename = "addressLine1", deserialize_with = "lenient_string")]
    address_line1: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    city: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    state_or_province_code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    zip_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EntityRegistration {
    #[serde(deserialize_with = "lenient_string")]
    activation_date: Option<String>,
    naics_list: Option<Vec<NaicsEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NaicsEntry {
    #[serde(deserialize_with = "lenient_string")]
    naics_code: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    is_primary: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RepsAndCerts {
    #[serde(rename = "isSmallBusiness", deserialize_with = "lenient_flag")]
    small_business: Option<bool>,
    #[serde(rename = "is8AProgram", deserialize_with = "lenient_flag")]
    eight_a: Option<bool>,
    #[serde(rename = "isWomanOwned", deserialize_with = "lenient_flag")]
    woman_owned: Option<bool>,
    #[serde(rename = "isServiceDisabledVeteranOwned", deserialize_with = "lenient_flag")]
    service_disabled_veteran_owned: Option<bool>,
    #[serde(rename = "isHUBZone", deserialize_with = "lenient_flag")]
    hubzone: Option<bool>,
}

/// 字串欄位偶爾以數字回傳，統一轉成字串
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// 旗標欄位有時是 "Y"/"true" 字串或 0/1，無法辨識的一律視為未設定
fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => Some(b),
        Some(serde_json::Value::String(s)) => {
            match s.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" | "true" | "t" | "1" => Some(true),
                "n" | "no" | "false" | "f" | "0" => Some(false),
                _ => None,
            }
        }
        Some(serde_json::Value::Number(n)) => Some(n.as_f64().is_some_and(|v| v != 0.0)),
        _ => None,
    })
}

impl EntityRecord {
    fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        };

        let core = self.core_data.unwrap_or_default();
        put("company_ein", core.tax_identification_number);
        put("company_duns", core.duns_number);
        put("company_cage_code", core.cage_code);
        put("company_uei", core.uei_sam);

        let address = core.physical_address.unwrap_or_default();
        put("address", address.address_line1);
        put("city", address.city);
        put("state", address.state_or_province_code);
        put("zip_code", address.zip_code);

        put("business_type", core.business_type_code);

        let registration = self.entity_registration.unwrap_or_default();
        // TODO: 換算成實際年數需要先確認以哪一天為基準
        put("years_in_business", registration.activation_date);
        put("naics_codes", naics_codes(registration.naics_list.unwrap_or_default()));

        put("certifications", self.reps_and_certs.unwrap_or_default().labels());

        fields
    }
}

/// 主要 NAICS 在前、其餘在後，各自保持原順序
fn naics_codes(entries: Vec<NaicsEntry>) -> Option<String> {
    let (primary, secondary): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|entry| entry.is_primary.unwrap_or(false));

    let codes: Vec<String> = primary
        .into_iter()
        .chain(secondary)
        .filter_map(|entry| entry.naics_code)
        .collect();

    if codes.is_empty() {
        None
    } else {
        Some(codes.join(", "))
    }
}

impl RepsAndCerts {
    fn labels(&self) -> Option<String> {
        let flags = [
            (self.small_business, "Small Business"),
            (self.eight_a, "8(a)"),
            (self.woman_owned, "WOSB"),
            (self.service_disabled_veteran_owned, "SDVOSB"),
            (self.hubzone, "HUBZone"),
        ];

        let labels: Vec<&str> = flags
            .iter()
            .filter(|(flag, _)| flag.unwrap_or(false))
            .map(|(_, label)| *label)
            .collect();

        if labels.is_empty() {
            None
        } else {
            Some(labels.join(", "))
        }
    }
}
