//! Page assembly.
//!
//! A page renders as an `<article>`: title, description, then one
//! `<section>` per [`DocSection`] holding the rendered markdown and the
//! section's code examples. API reference pages add one `<section>` per
//! [`ApiEndpoint`] after that.

use std::fmt::Write;

use ink_renderer::{Renderer, escape_html};

use crate::content::{ApiEndpoint, ApiParameter, AuthKind, CodeExample, DocPage, DocSection, Locale};

/// Fixed interface text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiText {
    Authentication,
    RequestBody,
    QueryParameters,
    PathParameters,
    Parameter,
    Type,
    Required,
    Description,
    Default,
    ExampleRequest,
    Response,
    NotFoundTitle,
    NotFoundBody,
}

impl UiText {
    fn get(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Authentication, Locale::En) => "Authentication",
            (Self::Authentication, Locale::Zh) => "认证",
            (Self::RequestBody, Locale::En) => "Request Body",
            (Self::RequestBody, Locale::Zh) => "请求体",
            (Self::QueryParameters, Locale::En) => "Query Parameters",
            (Self::QueryParameters, Locale::Zh) => "查询参数",
            (Self::PathParameters, Locale::En) => "Path Parameters",
            (Self::PathParameters, Locale::Zh) => "路径参数",
            (Self::Parameter, Locale::En) => "Parameter",
            (Self::Parameter, Locale::Zh) => "参数",
            (Self::Type, Locale::En) => "Type",
            (Self::Type, Locale::Zh) => "类型",
            (Self::Required, Locale::En) => "Required",
            (Self::Required, Locale::Zh) => "必填",
            (Self::Description, Locale::En) => "Description",
            (Self::Description, Locale::Zh) => "描述",
            (Self::Default, Locale::En) => "Default",
            (Self::Default, Locale::Zh) => "默认值",
            (Self::ExampleRequest, Locale::En) => "Example request",
            (Self::ExampleRequest, Locale::Zh) => "请求示例",
            (Self::Response, Locale::En) => "Response",
            (Self::Response, Locale::Zh) => "响应",
            (Self::NotFoundTitle, Locale::En) => "Page Not Found",
            (Self::NotFoundTitle, Locale::Zh) => "页面未找到",
            (Self::NotFoundBody, Locale::En) => "The documentation page you requested doesn't exist.",
            (Self::NotFoundBody, Locale::Zh) => "您请求的文档页面不存在。",
        }
    }
}

fn auth_label(auth: AuthKind, locale: Locale) -> &'static str {
    match (auth, locale) {
        (AuthKind::ApiKey, Locale::En) => "API key",
        (AuthKind::ApiKey, Locale::Zh) => "API 密钥",
        (AuthKind::Bearer, Locale::En) => "Bearer token",
        (AuthKind::Bearer, Locale::Zh) => "Bearer 令牌",
        (AuthKind::Public, Locale::En) => "None (public)",
        (AuthKind::Public, Locale::Zh) => "无（公开）",
    }
}

/// Result of rendering one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    pub slug: String,
    /// The `<article>` element.
    pub html: String,
    /// Renderer warnings, prefixed with the section id.
    pub warnings: Vec<String>,
    /// Resolved targets of every internal link on the page.
    pub internal_links: Vec<String>,
}

/// Renders pages in one locale.
#[derive(Clone, Copy, Debug)]
pub struct PageRenderer<'a> {
    renderer: &'a Renderer,
    locale: Locale,
}

impl<'a> PageRenderer<'a> {
    #[must_use]
    pub fn new(renderer: &'a Renderer, locale: Locale) -> Self {
        Self { renderer, locale }
    }

    #[must_use]
    pub fn render(&self, page: &DocPage) -> RenderedPage {
        let mut html = String::with_capacity(4096);
        let mut warnings = Vec::new();
        let mut internal_links = Vec::new();

        html.push_str("<article>\n");
        writeln!(html, "<h1>{}</h1>", escape_html(page.title.get(self.locale))).unwrap();
        let description = page.description.get(self.locale);
        if !description.is_empty() {
            writeln!(
                html,
                r#"<p class="page-description">{}</p>"#,
                escape_html(description)
            )
            .unwrap();
        }

        for section in &page.sections {
            let result = self.renderer.render_document(section.content.get(self.locale));
            internal_links.extend(
                result
                    .markup
                    .internal_paths()
                    .into_iter()
                    .map(str::to_owned),
            );
            warnings.extend(
                result
                    .warnings
                    .into_iter()
                    .map(|w| format!("section '{}': {w}", section.id)),
            );
            self.write_section(&mut html, section, result.markup.as_str());
        }
        for endpoint in &page.endpoints {
            self.write_endpoint(&mut html, endpoint);
        }
        html.push_str("</article>");

        RenderedPage {
            slug: page.slug.clone(),
            html,
            warnings,
            internal_links,
        }
    }

    fn write_section(&self, html: &mut String, section: &DocSection, prose: &str) {
        writeln!(html, r#"<section id="{}">"#, escape_html(&section.id)).unwrap();
        writeln!(html, "<h2>{}</h2>", escape_html(section.heading.get(self.locale))).unwrap();
        writeln!(html, "<div class=\"prose\">\n{prose}\n</div>").unwrap();
        for example in &section.code_examples {
            write_code_example(html, example);
        }
        html.push_str("</section>\n");
    }

    fn write_endpoint(&self, html: &mut String, endpoint: &ApiEndpoint) {
        let locale = self.locale;
        let method = endpoint.method.as_str();
        writeln!(
            html,
            r#"<section id="{}" class="api-endpoint">"#,
            escape_html(&endpoint.anchor())
        )
        .unwrap();
        writeln!(
            html,
            r#"<div class="api-endpoint-header"><span class="api-method api-method-{}">{method}</span><code class="api-path">{}</code></div>"#,
            method.to_ascii_lowercase(),
            escape_html(&endpoint.path)
        )
        .unwrap();
        writeln!(html, "<h3>{}</h3>", escape_html(endpoint.title.get(locale))).unwrap();
        let description = endpoint.description.get(locale);
        if !description.is_empty() {
            writeln!(html, r#"<p class="api-description">{}</p>"#, escape_html(description)).unwrap();
        }
        writeln!(
            html,
            r#"<p class="api-auth">{}: {}</p>"#,
            UiText::Authentication.get(locale),
            auth_label(endpoint.auth, locale)
        )
        .unwrap();

        self.write_params(html, UiText::PathParameters, &endpoint.path_params);
        self.write_params(html, UiText::QueryParameters, &endpoint.query_params);
        if let Some(body) = &endpoint.request_body {
            self.write_params(html, UiText::RequestBody, &body.parameters);
            if let Some(example) = &body.example {
                write_code_example(
                    html,
                    &CodeExample {
                        language: language_for(&body.content_type).to_owned(),
                        title: Some(UiText::ExampleRequest.get(locale).to_owned()),
                        code: example.clone(),
                    },
                );
            }
        }

        for example in &endpoint.code_examples {
            write_code_example(html, example);
        }

        for response in &endpoint.responses {
            let Some(example) = &response.example else {
                continue;
            };
            html.push_str("<div class=\"api-response\">\n");
            writeln!(
                html,
                "<h4>{} {}</h4>",
                UiText::Response.get(locale),
                response.status
            )
            .unwrap();
            let description = response.description.get(locale);
            if !description.is_empty() {
                writeln!(html, "<p>{}</p>", escape_html(description)).unwrap();
            }
            write_code_example(
                html,
                &CodeExample {
                    language: "json".to_owned(),
                    title: None,
                    code: example.clone(),
                },
            );
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }

    fn write_params(&self, html: &mut String, heading: UiText, params: &[ApiParameter]) {
        if params.is_empty() {
            return;
        }
        let locale = self.locale;
        html.push_str("<div class=\"api-params\">\n");
        writeln!(html, "<h4>{}</h4>", heading.get(locale)).unwrap();
        html.push_str("<table class=\"api-params-table\">\n<thead>\n");
        writeln!(
            html,
            "<tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>",
            UiText::Parameter.get(locale),
            UiText::Type.get(locale),
            UiText::Required.get(locale),
            UiText::Description.get(locale)
        )
        .unwrap();
        html.push_str("</thead>\n<tbody>\n");
        for param in params {
            let required = if param.required { "✓" } else { "—" };
            write!(
                html,
                "<tr><td><code>{}</code></td><td><code>{}</code></td><td>{required}</td><td>{}",
                escape_html(&param.name),
                escape_html(&param.ty),
                escape_html(param.description.get(locale))
            )
            .unwrap();
            if let Some(default) = &param.default {
                write!(
                    html,
                    r#" <span class="api-param-default">{}: <code>{}</code></span>"#,
                    UiText::Default.get(locale),
                    escape_html(default)
                )
                .unwrap();
            }
            html.push_str("</td></tr>\n");
        }
        html.push_str("</tbody>\n</table>\n</div>\n");
    }
}

/// Code-block language for a request content type.
fn language_for(content_type: &str) -> &str {
    if content_type.contains("json") {
        "json"
    } else {
        "text"
    }
}

/// The article shown for a path with no page behind it.
#[must_use]
pub fn not_found_article(locale: Locale) -> String {
    format!(
        "<article class=\"not-found\">\n<h1>{}</h1>\n<p>{}</p>\n</article>",
        UiText::NotFoundTitle.get(locale),
        UiText::NotFoundBody.get(locale)
    )
}

/// Title of the not-found page.
#[must_use]
pub fn not_found_title(locale: Locale) -> &'static str {
    UiText::NotFoundTitle.get(locale)
}

fn write_code_example(html: &mut String, example: &CodeExample) {
    let language = escape_html(&example.language);
    html.push_str("<div class=\"code-example\">\n<div class=\"code-example-header\">");
    if let Some(title) = &example.title {
        write!(html, r#"<span class="code-example-title">{}</span>"#, escape_html(title)).unwrap();
    }
    writeln!(html, r#"<span class="code-example-language">{language}</span></div>"#).unwrap();
    writeln!(
        html,
        r#"<pre data-language="{language}"><code class="language-{language}">{}</code></pre>"#,
        escape_html(&example.code)
    )
    .unwrap();
    html.push_str("</div>\n");
}

/// Wrap an article in a minimal standalone HTML document.
///
/// A sidebar, when given, goes in an `<aside>` before the article.
#[must_use]
pub fn html_document(title: &str, locale: Locale, sidebar: Option<&str>, article: &str) -> String {
    let mut html = String::with_capacity(article.len() + 512);
    writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{locale}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>",
        escape_html(title)
    )
    .unwrap();
    if let Some(sidebar) = sidebar {
        writeln!(html, "<aside class=\"docs-sidebar\">\n{sidebar}\n</aside>").unwrap();
    }
    writeln!(html, "{article}\n</body>\n</html>").unwrap();
    html
}
