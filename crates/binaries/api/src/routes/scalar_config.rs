//! The Scalar reference page served at `/docs`, with the document inlined.

use serde_json::{Value, json, to_value};
use utoipa::openapi::OpenApi;

/// Scalar options for the places API. `content` is the inlined document.
fn reference_config(open_api: &OpenApi) -> Result<Value, serde_json::Error> {
    Ok(json!({
        "content": to_value(open_api)?,
        "layout": "modern",
        "theme": "kepler",
        "defaultOpenAllTags": true,
        "hideModels": false,
        "hiddenClients": ["unirest"],
    }))
}

/// Renders the `/docs` page titled after the document's `info.title`.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized.
pub fn get_custom_html(open_api: &OpenApi) -> Result<String, serde_json::Error> {
    let config = reference_config(open_api)?;
    let title = open_api.info.title.replace('<', "&lt;");

    Ok(format!(
        r#"<!doctype html>
<html>
  <head>
    <title>{title}</title>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
  </head>
  <body>
    <div id="app"></div>
    <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>
    <script>Scalar.createApiReference('#app', {config})</script>
  </body>
</html>
"#
    ))
}
