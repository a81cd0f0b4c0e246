//! Documentation content model.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::SiteError;

/// Content language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Language code used in config files and `lang` attributes.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

impl FromStr for Locale {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            other => Err(SiteError::UnknownLocale(other.to_owned())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A string with an English original and an optional Chinese translation.
///
/// In TOML either a table `{ en = "...", zh = "..." }` or a plain string,
/// which is used for both locales.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "LocalizedRepr")]
pub struct LocalizedString {
    pub en: String,
    pub zh: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedRepr {
    Plain(String),
    Table { en: String, zh: Option<String> },
}

impl From<LocalizedRepr> for LocalizedString {
    fn from(repr: LocalizedRepr) -> Self {
        match repr {
            LocalizedRepr::Plain(en) => Self { en, zh: None },
            LocalizedRepr::Table { en, zh } => Self { en, zh },
        }
    }
}

impl LocalizedString {
    #[must_use]
    pub fn new(en: impl Into<String>, zh: Option<String>) -> Self {
        Self { en: en.into(), zh }
    }

    /// Text for `locale`; a missing or empty `zh` falls back to `en`.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Zh => self
                .zh
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(&self.en),
        }
    }
}

/// Code sample shown after a section's prose.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CodeExample {
    pub language: String,
    #[serde(default)]
    pub title: Option<String>,
    pub code: String,
}

/// One section of a page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DocSection {
    /// Anchor id of the section.
    pub id: String,
    pub heading: LocalizedString,
    /// Markdown body.
    pub content: LocalizedString,
    #[serde(default)]
    pub code_examples: Vec<CodeExample>,
}

/// A documentation page, one per content file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DocPage {
    /// Output path without extension, e.g. `sdk/python`. Derived from the
    /// file path when omitted.
    #[serde(default)]
    pub slug: String,
    pub title: LocalizedString,
    #[serde(default)]
    pub description: LocalizedString,
    #[serde(default)]
    pub sections: Vec<DocSection>,
    /// HTTP endpoints documented on the page, rendered after the sections.
    #[serde(default)]
    pub endpoints: Vec<ApiEndpoint>,

    /// File the page was loaded from (set after loading).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl DocPage {
    /// Whether the page is an API reference page (documents endpoints).
    #[must_use]
    pub fn is_api_reference(&self) -> bool {
        !self.endpoints.is_empty()
    }
}

/// HTTP method of an API endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How callers authenticate against an endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthKind {
    #[default]
    ApiKey,
    Bearer,
    Public,
}

/// Body, query or path parameter of an endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub description: LocalizedString,
}

fn default_content_type() -> String {
    "application/json".to_owned()
}

/// Request body of an endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RequestBody {
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub parameters: Vec<ApiParameter>,
    /// Example body, shown verbatim.
    #[serde(default)]
    pub example: Option<String>,
}

/// Documented response of an endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    #[serde(default)]
    pub description: LocalizedString,
    /// Example JSON body. Responses without one are not shown.
    #[serde(default)]
    pub example: Option<String>,
}

/// One HTTP endpoint on an API reference page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ApiEndpoint {
    pub method: HttpMethod,
    pub path: String,
    pub title: LocalizedString,
    #[serde(default)]
    pub description: LocalizedString,
    #[serde(default)]
    pub auth: AuthKind,
    #[serde(default)]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub query_params: Vec<ApiParameter>,
    #[serde(default)]
    pub path_params: Vec<ApiParameter>,
    #[serde(default)]
    pub responses: Vec<ApiResponse>,
    #[serde(default)]
    pub code_examples: Vec<CodeExample>,
}

impl ApiEndpoint {
    /// Anchor id of the endpoint's section.
    ///
    /// `POST /api/v1/keys/:id` becomes `post-api-v1-keys--id`.
    #[must_use]
    pub fn anchor(&self) -> String {
        let path: String = self
            .path
            .chars()
            .map(|c| if c == '/' || c == ':' { '-' } else { c })
            .collect();
        format!(
            "{}-{}",
            self.method.as_str().to_ascii_lowercase(),
            path.trim_matches('-')
        )
    }
}

/// Sidebar link with optional nested links.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NavItem {
    pub title: LocalizedString,
    pub href: String,
    /// Short summary, shown as the link's tooltip.
    #[serde(default)]
    pub description: LocalizedString,
    #[serde(default)]
    pub items: Vec<NavItem>,
}

/// Titled group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NavSection {
    pub title: LocalizedString,
    #[serde(default)]
    pub items: Vec<NavItem>,
}

/// Sidebar navigation shared by every page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DocsNav {
    #[serde(default)]
    pub sections: Vec<NavSection>,
}

impl DocsNav {
    /// Every link target in the navigation, depth first.
    #[must_use]
    pub fn hrefs(&self) -> Vec<&str> {
        fn walk<'a>(items: &'a [NavItem], out: &mut Vec<&'a str>) {
            for item in items {
                out.push(&item.href);
                walk(&item.items, out);
            }
        }

        let mut out = Vec::new();
        for section in &self.sections {
            walk(&section.items, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_locale_parse() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("zh".parse::<Locale>().unwrap(), Locale::Zh);
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(SiteError::UnknownLocale(code)) if code == "fr"
        ));
        assert_eq!(Locale::Zh.to_string(), "zh");
    }

    #[test]
    fn test_zh_falls_back_to_en() {
        let only_en = LocalizedString::new("Install", None);
        let empty_zh = LocalizedString::new("Install", Some(String::new()));
        let both = LocalizedString::new("Install", Some("安装".to_owned()));

        assert_eq!(only_en.get(Locale::Zh), "Install");
        assert_eq!(empty_zh.get(Locale::Zh), "Install");
        assert_eq!(both.get(Locale::Zh), "安装");
        assert_eq!(both.get(Locale::En), "Install");
    }

    #[test]
    fn test_parse_page() {
        let toml = r#"
slug = "sdk/python"
title = { en = "Python SDK", zh = "Python SDK" }
description = "Client library"

[[sections]]
id = "install"
heading = { en = "Install", zh = "安装" }
content = { en = "Run `pip install omem`." }

[[sections.code_examples]]
language = "bash"
title = "Shell"
code = "pip install omem"
"#;
        let page: DocPage = toml::from_str(toml).unwrap();

        assert_eq!(page.slug, "sdk/python");
        assert_eq!(page.description.get(Locale::Zh), "Client library");
        assert_eq!(page.sections.len(), 1);
        let section = &page.sections[0];
        assert_eq!(section.heading.get(Locale::Zh), "安装");
        assert_eq!(section.content.get(Locale::Zh), "Run `pip install omem`.");
        assert_eq!(
            section.code_examples,
            vec![CodeExample {
                language: "bash".to_owned(),
                title: Some("Shell".to_owned()),
                code: "pip install omem".to_owned(),
            }]
        );
        assert!(page.source_path.is_none());
    }

    #[test]
    fn test_parse_api_page() {
        let toml = r#"
title = "Memory API"

[[endpoints]]
method = "POST"
path = "/api/v1/memory/ingest"
title = { en = "Save Conversation", zh = "保存对话" }

[endpoints.request_body]

[[endpoints.request_body.parameters]]
name = "memory_domain"
type = "string"
default = '"dialog"'
description = "Business domain"

[[endpoints.responses]]
status = 202
example = '{ "job_id": "j1" }'

[[endpoints.responses]]
status = 401
"#;
        let page: DocPage = toml::from_str(toml).unwrap();

        assert!(page.is_api_reference());
        let endpoint = &page.endpoints[0];
        assert_eq!(endpoint.method, HttpMethod::Post);
        assert_eq!(endpoint.auth, AuthKind::ApiKey);
        let body = endpoint.request_body.as_ref().unwrap();
        assert_eq!(body.content_type, "application/json");
        assert_eq!(body.parameters[0].ty, "string");
        assert!(!body.parameters[0].required);
        assert_eq!(body.parameters[0].default.as_deref(), Some("\"dialog\""));
        assert_eq!(endpoint.responses.len(), 2);
        assert!(endpoint.responses[1].example.is_none());
    }

    #[test]
    fn test_unknown_http_method_rejected() {
        let toml = "title = \"x\"\n[[endpoints]]\nmethod = \"FETCH\"\npath = \"/a\"\ntitle = \"a\"\n";
        assert!(toml::from_str::<DocPage>(toml).is_err());
    }

    #[test]
    fn test_endpoint_anchor() {
        let endpoint = ApiEndpoint {
            method: HttpMethod::Delete,
            path: "/api/v1/keys/:id".to_owned(),
            title: LocalizedString::new("Revoke", None),
            description: LocalizedString::default(),
            auth: AuthKind::Bearer,
            request_body: None,
            query_params: Vec::new(),
            path_params: Vec::new(),
            responses: Vec::new(),
            code_examples: Vec::new(),
        };
        assert_eq!(endpoint.anchor(), "delete-api-v1-keys--id");
    }

    #[test]
    fn test_parse_nav_and_hrefs() {
        let toml = r#"
[[sections]]
title = { en = "Getting Started", zh = "开始使用" }

[[sections.items]]
title = "Python SDK"
href = "/docs/sdk/python"
description = { en = "Get memory working in 5 minutes" }

[[sections.items.items]]
title = "Errors"
href = "/docs/sdk/python#errors"

[[sections]]
title = "Reference"

[[sections.items]]
title = "Limits"
href = "/docs/reference/limits"
"#;
        let nav: DocsNav = toml::from_str(toml).unwrap();

        assert_eq!(nav.sections[0].title.get(Locale::Zh), "开始使用");
        assert_eq!(
            nav.hrefs(),
            vec![
                "/docs/sdk/python",
                "/docs/sdk/python#errors",
                "/docs/reference/limits"
            ]
        );
    }

    #[test]
    fn test_parse_page_requires_title() {
        assert!(toml::from_str::<DocPage>("slug = \"x\"").is_err());
    }
}
