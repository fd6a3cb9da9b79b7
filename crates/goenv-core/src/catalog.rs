use goenv_backend::{GoRelease, GoenvError, NetworkStage};
use log::debug;

pub const DEFAULT_CATALOG_URL: &str = "https://go.dev/dl/?mode=json&include=all";

/// Parse the go.dev JSON catalog.
///
/// # Errors
/// Returns [`GoenvError::CatalogParseFailed`] when the body is not a JSON
/// array of releases.
pub fn parse_catalog(body: &str) -> Result<Vec<GoRelease>, GoenvError> {
    serde_json::from_str(body).map_err(GoenvError::catalog_parse)
}

pub(crate) async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<GoRelease>, GoenvError> {
    debug!("Fetching release catalog from {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|error| GoenvError::catalog_fetch(NetworkStage::Request, error))?;

    if !response.status().is_success() {
        return Err(GoenvError::catalog_fetch(
            NetworkStage::Status,
            format!("HTTP {}", response.status()),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|error| GoenvError::catalog_fetch(NetworkStage::Body, error))?;

    let releases = parse_catalog(&body)?;
    debug!("Catalog lists {} releases", releases.len());
    Ok(releases)
}

#[cfg(test)]
mod tests {
    use goenv_backend::GoenvError;

    use super::parse_catalog;

    #[test]
    fn parse_catalog_keeps_catalog_order_and_duplicates() {
        let body = r#"[
            {"version": "go1.22.1", "stable": true, "files": []},
            {"version": "go1.21.8", "stable": true, "files": []},
            {"version": "go1.22.1", "stable": true, "files": []}
        ]"#;

        let releases = parse_catalog(body).expect("catalog should parse");
        let versions: Vec<&str> = releases.iter().map(|r| r.version.as_str()).collect();

        assert_eq!(versions, ["go1.22.1", "go1.21.8", "go1.22.1"]);
    }

    #[test]
    fn parse_catalog_rejects_non_array_documents() {
        assert!(matches!(
            parse_catalog(r#"{"version": "go1.22.1"}"#),
            Err(GoenvError::CatalogParseFailed { .. })
        ));
        assert!(matches!(
            parse_catalog("<html>rate limited</html>"),
            Err(GoenvError::CatalogParseFailed { .. })
        ));
    }
}
