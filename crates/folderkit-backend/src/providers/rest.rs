//! SharePoint-style REST backend.
//!
//! Speaks the four endpoints the workflow needs: folder existence, the
//! `MoveCopyUtil` folder copy, folder-to-item resolution, and a `MERGE`
//! update of list item fields guarded by `IF-MATCH`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use folderkit_core::config::AppConfig;
use folderkit_core::error::{AppError, ErrorKind};
use folderkit_core::result::AppResult;
use folderkit_core::traits::backend::{MetadataFields, ProvisioningBackend};
use folderkit_core::types::{ItemHandle, ItemId};

const ODATA_NOMETADATA: &str = "application/json;odata=nometadata";
const ODATA_MINIMAL: &str = "application/json;odata=minimalmetadata";
const ODATA_VERBOSE: &str = "application/json;odata=verbose";

/// REST client backend.
#[derive(Debug, Clone)]
pub struct RestBackend {
    /// HTTP client for making requests.
    client: Client,
    /// Absolute web URL, no trailing slash. API calls hang off this.
    web_url: String,
    /// Scheme and host, used to build absolute copy paths.
    tenant_root: String,
    /// Title of the list whose items receive metadata updates.
    list_title: String,
    /// Optional bearer token.
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExistsResponse {
    value: bool,
}

impl RestBackend {
    /// Create a backend for the given web.
    pub fn new(
        web_url: &str,
        tenant_root: &str,
        list_title: &str,
        access_token: Option<String>,
        user_agent: &str,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            web_url: web_url.trim_end_matches('/').to_string(),
            tenant_root: tenant_root.trim_end_matches('/').to_string(),
            list_title: list_title.to_string(),
            access_token,
        })
    }

    /// Create a backend from application configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(
            config.site.web_url(),
            &config.site.tenant_root(),
            &config.metadata.list_title,
            config.backend.access_token.clone(),
            &config.backend.user_agent,
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn folder_url(&self, path: &str) -> String {
        format!(
            "{}/_api/web/GetFolderByServerRelativeUrl('{}')",
            self.web_url,
            odata_literal(path)
        )
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ServiceUnavailable,
                format!("{action}: request failed"),
                e,
            )
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, body = %body, "{action} rejected");

        Err(match status {
            StatusCode::NOT_FOUND => AppError::not_found(format!("{action}: not found")),
            StatusCode::PRECONDITION_FAILED => {
                AppError::conflict(format!("{action}: item version changed"))
            }
            _ => AppError::backend(format!("{action}: HTTP {status}")),
        })
    }

    async fn read_json(response: Response, action: &str) -> AppResult<Value> {
        response.json::<Value>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("{action}: invalid response body"),
                e,
            )
        })
    }
}

#[async_trait]
impl ProvisioningBackend for RestBackend {
    fn backend_type(&self) -> &str {
        "rest"
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let url = format!("{}/Exists", self.folder_url(path));
        debug!(url = %url, "Checking folder existence");

        let response = self
            .send(
                self.request(Method::GET, &url)
                    .header("Accept", ODATA_NOMETADATA),
                "Folder existence check",
            )
            .await?;

        let body = Self::read_json(response, "Folder existence check").await?;
        let parsed: ExistsResponse = serde_json::from_value(body)?;
        Ok(parsed.value)
    }

    async fn copy(
        &self,
        source: &str,
        destination: &str,
        preserve_provenance: bool,
    ) -> AppResult<()> {
        let url = format!("{}/_api/SP.MoveCopyUtil.CopyFolderByPath()", self.web_url);
        let body = copy_request_body(
            &format!("{}{}", self.tenant_root, source),
            &format!("{}{}", self.tenant_root, destination),
            preserve_provenance,
        );
        debug!(url = %url, source = %source, destination = %destination, "Copying folder");

        self.send(
            self.request(Method::POST, &url)
                .header("Content-Type", ODATA_VERBOSE)
                .header("Accept", ODATA_VERBOSE)
                .header("odata-version", "3.0")
                .body(body.to_string()),
            "Folder copy",
        )
        .await?;

        Ok(())
    }

    async fn resolve_identifier(&self, path: &str) -> AppResult<Option<ItemHandle>> {
        let url = format!("{}?$expand=ListItemAllFields", self.folder_url(path));
        debug!(url = %url, "Resolving folder item");

        let response = self
            .send(
                self.request(Method::GET, &url).header("Accept", ODATA_MINIMAL),
                "Folder item lookup",
            )
            .await?;

        let body = Self::read_json(response, "Folder item lookup").await?;
        Ok(parse_item_handle(&body))
    }

    async fn patch_metadata(
        &self,
        id: ItemId,
        fields: &MetadataFields,
        expected_version: Option<&str>,
    ) -> AppResult<()> {
        let url = format!(
            "{}/_api/web/lists/getbytitle('{}')/items({})",
            self.web_url,
            odata_literal(&self.list_title),
            id
        );
        let if_match = expected_version.unwrap_or("*");
        debug!(url = %url, item_id = %id, if_match = %if_match, "Patching item metadata");

        self.send(
            self.request(Method::POST, &url)
                .header("Content-Type", ODATA_NOMETADATA)
                .header("Accept", ODATA_NOMETADATA)
                .header("IF-MATCH", if_match)
                .header("X-HTTP-Method", "MERGE")
                .body(Value::Object(fields.clone()).to_string()),
            "Item metadata update",
        )
        .await?;

        Ok(())
    }
}

/// Escape a value for use inside an OData single-quoted string literal,
/// percent-encoding the characters a URL would otherwise swallow.
fn odata_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            _ => out.push(c),
        }
    }
    out
}

fn copy_request_body(source_url: &str, destination_url: &str, preserve_provenance: bool) -> Value {
    json!({
        "srcPath": {
            "__metadata": { "type": "SP.ResourcePath" },
            "DecodedUrl": source_url
        },
        "destPath": {
            "__metadata": { "type": "SP.ResourcePath" },
            "DecodedUrl": destination_url
        },
        "options": {
            "__metadata": { "type": "SP.MoveCopyOptions" },
            "RetainEditorAndModifiedOnMove": preserve_provenance
        }
    })
}

/// Pull the item id and etag out of a folder response.
///
/// Accepts both the minimal-metadata shape and the verbose `d` wrapper.
fn parse_item_handle(body: &Value) -> Option<ItemHandle> {
    let root = body.get("d").unwrap_or(body);
    let item = root.get("ListItemAllFields")?;

    let id = item
        .get("ID")
        .or_else(|| item.get("Id"))
        .and_then(Value::as_u64)?;

    let version = item
        .get("odata.etag")
        .or_else(|| item.get("__metadata").and_then(|m| m.get("etag")))
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(ItemHandle {
        id: ItemId(id),
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odata_literal_escapes_quotes() {
        assert_eq!(odata_literal("/Docs/O'Brien"), "/Docs/O''Brien");
        assert_eq!(odata_literal("/Docs/R&D #1"), "/Docs/R&D %231");
    }

    #[test]
    fn test_copy_body_uses_absolute_urls() {
        let body = copy_request_body(
            "https://t/sites/x/Docs/02. Project Folder Template",
            "https://t/sites/x/Docs/Acme",
            true,
        );
        assert_eq!(
            body["srcPath"]["DecodedUrl"],
            "https://t/sites/x/Docs/02. Project Folder Template"
        );
        assert_eq!(body["destPath"]["DecodedUrl"], "https://t/sites/x/Docs/Acme");
        assert_eq!(body["options"]["RetainEditorAndModifiedOnMove"], true);
        assert_eq!(body["options"]["__metadata"]["type"], "SP.MoveCopyOptions");
    }

    #[test]
    fn test_parse_item_handle_minimal_metadata() {
        let body = json!({
            "Name": "Acme",
            "ListItemAllFields": { "ID": 42, "odata.etag": "\"3\"" }
        });
        let handle = parse_item_handle(&body).unwrap();
        assert_eq!(handle.id, ItemId(42));
        assert_eq!(handle.version.as_deref(), Some("\"3\""));
    }

    #[test]
    fn test_parse_item_handle_verbose() {
        let body = json!({
            "d": { "ListItemAllFields": { "Id": 7, "__metadata": { "etag": "\"1\"" } } }
        });
        let handle = parse_item_handle(&body).unwrap();
        assert_eq!(handle.id, ItemId(7));
        assert_eq!(handle.version.as_deref(), Some("\"1\""));
    }

    #[test]
    fn test_parse_item_handle_without_item() {
        assert!(parse_item_handle(&json!({ "Name": "Acme" })).is_none());
        assert!(parse_item_handle(&json!({ "ListItemAllFields": null })).is_none());
    }
}
