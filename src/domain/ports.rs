use crate::domain::model::SourceResult;
use crate::domain::record::CompanyProfileRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// 結構化的實體登錄資料庫（SAM.gov）
#[async_trait]
pub trait RegistrySource: Send + Sync {
    async fn lookup(&self, legal_name: &str) -> SourceResult;
}

/// 一般網頁搜尋
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, query_text: &str) -> SourceResult;
}

/// 公司自己的網站
#[async_trait]
pub trait SiteSource: Send + Sync {
    async fn scrape(&self, url: &str) -> SourceResult;
}

/// 合併結果的寫入端，回傳寫入位置
pub trait ProfileSink: Send + Sync {
    fn save(
        &self,
        record: &CompanyProfileRecord,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// 上傳文件的文字擷取，由外部元件實作
pub trait DocumentTextSource: Send + Sync {
    fn extract_text(&self, path: &Path) -> Result<String>;
}
