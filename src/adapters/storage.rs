use crate::domain::ports::ProfileSink;
use crate::domain::record::CompanyProfileRecord;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 把 profile 紀錄寫成 `<base>/<slug>.json`
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    base_path: PathBuf,
}

impl JsonFileSink {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn path_for(&self, record: &CompanyProfileRecord) -> PathBuf {
        self.base_path.join(format!("{}.json", record.slug()))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl ProfileSink for JsonFileSink {
    async fn save(&self, record: &CompanyProfileRecord) -> Result<String> {
        let full_path = self.path_for(record);

        tokio::fs::create_dir_all(&self.base_path).await?;

        let json_data = serde_json::to_string_pretty(record)?;
        tracing::debug!("Writing profile ({} bytes) to {}", json_data.len(), full_path.display());
        tokio::fs::write(&full_path, json_data).await?;

        Ok(full_path.display().to_string())
    }
}
