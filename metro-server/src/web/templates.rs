//! Askama templates for the documentation page.

use askama::Template;

/// Swagger UI page pointing at the generated OpenAPI document.
#[derive(Template)]
#[template(path = "api_docs.html")]
pub struct ApiDocsTemplate {
    pub title: String,
    pub spec_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_spec_url() {
        let html = ApiDocsTemplate {
            title: "Dernier Métro API".into(),
            spec_url: "/api-docs/openapi.json".into(),
        }
        .render()
        .unwrap();

        assert!(html.contains("<title>Dernier Métro API</title>"));
        assert!(html.contains("url: \"/api-docs/openapi.json\""));
        assert!(html.contains("swagger-ui-bundle.js"));
    }
}
