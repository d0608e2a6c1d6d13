//! The HTML shell the client bundle mounts into.

pub const SITE_TITLE: &str = "Hydrological Information Management Systems";
pub const SITE_DESCRIPTION: &str = "Pilot for flood and drought hazard maps in South Sudan, enhancing access to water management data and supporting informed decision-making.";

#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    /// `%s` is replaced by a page's own title.
    pub title_template: String,
    pub description: String,
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self {
            title: SITE_TITLE.to_string(),
            title_template: format!("%s | {SITE_TITLE}"),
            description: SITE_DESCRIPTION.to_string(),
        }
    }
}

impl PageMetadata {
    /// Document title for a page, or the site title when it has none.
    pub fn page_title(&self, page: Option<&str>) -> String {
        match page {
            Some(page) if !page.is_empty() => self.title_template.replace("%s", page),
            _ => self.title.clone(),
        }
    }
}

const APP_BODY: &str = r#"<div id="app"></div>
<script type="module" src="/app.js"></script>"#;

const NOT_FOUND_BODY: &str = r#"<main>
<h1>Page not found</h1>
<p><a href="/">Back to the map</a></p>
</main>"#;

pub fn render_index(meta: &PageMetadata) -> String {
    render_page(meta, None, APP_BODY)
}

/// Served for paths that match no route or asset.
pub fn render_not_found(meta: &PageMetadata) -> String {
    render_page(meta, Some("Page not found"), NOT_FOUND_BODY)
}

fn render_page(meta: &PageMetadata, page: Option<&str>, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="stylesheet" href="/app.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(&meta.page_title(page)),
        description = escape_html(&meta.description),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn titles_follow_template() {
        let meta = PageMetadata::default();
        assert_eq!(meta.page_title(None), SITE_TITLE);
        assert_eq!(
            meta.page_title(Some("Flood hazard")),
            "Flood hazard | Hydrological Information Management Systems"
        );
        assert_eq!(meta.page_title(Some("")), SITE_TITLE);
    }

    #[test]
    fn index_carries_metadata() {
        let html = render_index(&PageMetadata::default());
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains(&format!("<title>{SITE_TITLE}</title>")));
        assert!(html.contains(SITE_DESCRIPTION));
    }

    #[test]
    fn not_found_page_uses_title_template() {
        let html = render_not_found(&PageMetadata::default());
        assert!(html.contains(
            "<title>Page not found | Hydrological Information Management Systems</title>"
        ));
        assert!(html.contains(r#"<a href="/">Back to the map</a>"#));
        assert!(!html.contains(r#"<div id="app">"#));
    }

    #[test]
    fn metadata_is_escaped() {
        let meta = PageMetadata {
            title: "A <b> & \"c\"".to_string(),
            ..PageMetadata::default()
        };
        let html = render_index(&meta);
        assert!(html.contains("<title>A &lt;b&gt; &amp; &quot;c&quot;</title>"));
    }
}
