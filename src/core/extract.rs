//! 非結構化文字的擷取規則：電話、email、認證關鍵字、about 段落、搜尋結果連結。
//!
//! 全部以文件順序掃描，取第一個符合條件的結果。

use crate::utils::text::excerpt;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::{form_urlencoded, Url};

/// 網站認證關鍵字，輸出順序即此順序
pub const CERTIFICATION_KEYWORDS: [&str; 7] = [
    "8(a)",
    "woman-owned",
    "WOSB",
    "SDVOSB",
    "veteran",
    "HUBZone",
    "small business",
];

/// 公司網站允許的網域結尾
pub const WEBSITE_SUFFIXES: [&str; 4] = [".com", ".net", ".org", ".biz"];

pub const ABOUT_EXCERPT_LIMIT: usize = 500;

const EMAIL_DENYLIST: [&str; 2] = ["noreply", "tracking"];

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("phone pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

static ABOUT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)about").expect("about pattern is valid"));

static LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector is valid"));

static BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section, div").expect("block selector is valid"));

pub fn first_phone(body: &str) -> Option<String> {
    PHONE.find(body).map(|m| m.as_str().to_string())
}

/// 第一個不是 noreply / tracking 的 email（大小寫敏感）
pub fn first_contact_email(body: &str) -> Option<String> {
    EMAIL
        .find_iter(body)
        .map(|m| m.as_str())
        .find(|email| !EMAIL_DENYLIST.iter().any(|deny| email.contains(deny)))
        .map(str::to_string)
}

/// 頁面文字中出現的所有認證（聯集，依關鍵字順序），以 ", " 串接
pub fn certification_mentions(page_text: &str) -> Option<String> {
    let haystack = page_text.to_lowercase();
    let found: Vec<&str> = CERTIFICATION_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .collect();

    if found.is_empty() {
        None
    } else {
        Some(found.join(", "))
    }
}

/// 整頁的純文字
pub fn rendered_text(document: &Html) -> String {
    document.root_element().text().collect()
}

/// 第一個 class 含 "about" 的 section/div，取前 500 字元
pub fn about_excerpt(document: &Html) -> Option<String> {
    document
        .select(&BLOCKS)
        .find(|block| block.value().classes().any(|class| ABOUT_CLASS.is_match(class)))
        .map(|block| {
            let text: String = block.text().collect();
            excerpt(&text, ABOUT_EXCERPT_LIMIT)
        })
}

/// 從搜尋結果頁找第一個像公司網站的轉址目標
pub fn first_result_website(document: &Html, engine_domain: &str) -> Option<String> {
    document
        .select(&LINKS)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(redirect_target)
        .find(|target| is_company_website(target, engine_domain))
}

/// 解開 `/url?q=<target>&...` 形式的轉址連結
pub fn redirect_target(href: &str) -> Option<String> {
    let (_, query) = href.split_once("/url?")?;
    let query = query.split('#').next().unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
}

fn is_company_website(target: &str, engine_domain: &str) -> bool {
    if !target.starts_with("http") {
        return false;
    }

    let Ok(url) = Url::parse(target) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    let engine_domain = engine_domain.trim().to_ascii_lowercase();

    let is_engine = !engine_domain.is_empty()
        && (host == engine_domain || host.ends_with(&format!(".{}", engine_domain)));
    if is_engine {
        return false;
    }

    WEBSITE_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_formats() {
        assert_eq!(first_phone("Call (757) 555-0100 today").as_deref(), Some("(757) 555-0100"));
        assert_eq!(first_phone("tel: 757.555.0100").as_deref(), Some("757.555.0100"));
        assert_eq!(first_phone("tel: 757 555 0100").as_deref(), Some("757 555 0100"));
        assert_eq!(first_phone("7575550100").as_deref(), Some("7575550100"));
        assert_eq!(first_phone("no digits here"), None);
    }

    #[test]
    fn test_first_phone_wins() {
        let body = "Main 757-555-0100, Fax 757-555-0199";
        assert_eq!(first_phone(body).as_deref(), Some("757-555-0100"));
    }

    #[test]
    fn test_email_filters_noreply_and_tracking() {
        let body = "noreply@x.com tracking.pixel@x.com admin@x.com sales@x.com";
        assert_eq!(first_contact_email(body).as_deref(), Some("admin@x.com"));

        let body = "contact admin@x.com or noreply@x.com";
        assert_eq!(first_contact_email(body).as_deref(), Some("admin@x.com"));
    }

    #[test]
    fn test_email_filter_is_case_sensitive() {
        assert_eq!(first_contact_email("NoReply@x.com").as_deref(), Some("NoReply@x.com"));
        assert_eq!(first_contact_email("noreply@x.com"), None);
    }

    #[test]
    fn test_certifications_union_in_keyword_order() {
        let text = "We are a certified HUBZone firm founded by a veteran.";
        assert_eq!(certification_mentions(text).as_deref(), Some("veteran, HUBZone"));
    }

    #[test]
    fn test_certifications_case_insensitive() {
        let text = "An SBA 8(A) participant and WOMAN-OWNED Small Business";
        assert_eq!(
            certification_mentions(text).as_deref(),
            Some("8(a), woman-owned, small business")
        );
        assert_eq!(certification_mentions("Commercial cleaning since 1998"), None);
    }

    #[test]
    fn test_about_excerpt_first_match() {
        let html = r#"
            <div class="hero">Welcome</div>
            <section class="company About-Us">First about</section>
            <div class="about">Second about</div>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(about_excerpt(&document).as_deref(), Some("First about"));
    }

    #[test]
    fn test_about_excerpt_truncates() {
        let html = format!(r#"<div class="about">{}</div>"#, "x".repeat(800));
        let document = Html::parse_document(&html);
        assert_eq!(about_excerpt(&document).map(|s| s.len()), Some(500));
    }

    #[test]
    fn test_about_excerpt_ignores_other_tags() {
        let html = r#"<article class="about">Not a block</article><p class="about">Nope</p>"#;
        let document = Html::parse_document(html);
        assert_eq!(about_excerpt(&document), None);
    }

    #[test]
    fn test_redirect_target_decodes() {
        assert_eq!(
            redirect_target("/url?q=https://acme-cleaning.com/about%3Fref%3D1&sa=U&ved=abc").as_deref(),
            Some("https://acme-cleaning.com/about?ref=1")
        );
        assert_eq!(
            redirect_target("https://www.google.com/url?sa=t&q=https://acme.net/").as_deref(),
            Some("https://acme.net/")
        );
        assert_eq!(redirect_target("/search?q=acme"), None);
    }

    #[test]
    fn test_first_result_website_filters() {
        let html = r#"
            <a href="/search?q=acme&tbm=isch">Images</a>
            <a href="/url?q=https://maps.google.com/place/acme&sa=U">Map</a>
            <a href="/url?q=/relative/path&sa=U">Relative</a>
            <a href="/url?q=https://acme.io/&sa=U">Wrong suffix</a>
            <a href="/url?q=https://www.acme-cleaning.com/&sa=U">Acme</a>
            <a href="/url?q=https://acme-cleaning.org/&sa=U">Later</a>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(
            first_result_website(&document, "google.com").as_deref(),
            Some("https://www.acme-cleaning.com/")
        );
    }

    #[test]
    fn test_first_result_website_none() {
        let document = Html::parse_document(r#"<a href="/url?q=https://www.google.com/intl">x</a>"#);
        assert_eq!(first_result_website(&document, "google.com"), None);
    }
}
