use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 優先，否則只開本 crate
fn crate_filter(verbose: bool) -> EnvFilter {
    let directive = if verbose {
        "company_enrich=debug,info"
    } else {
        "company_enrich=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// 終端機用：精簡格式，保留 `enrich{company=..}:source{name=..}` 這類 span 前綴
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(crate_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON 格式，每筆事件帶上目前的公司名稱與來源（`span.company`、`span.name`）
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(crate_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_span_list(false)
                .with_target(true),
        )
        .init();
}
