//! Request context: where a new folder goes and which template it copies.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

use folderkit_core::config::AppConfig;
use folderkit_core::config::site::TemplateConfig;
use folderkit_core::error::AppError;
use folderkit_core::types::ResourceKind;

/// Host context for one provisioning request.
///
/// Built from configuration plus, optionally, the URL of the page the user
/// is on. Passed explicitly to everything that needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Scheme and host of the tenant.
    pub tenant_root: String,
    /// Server-relative URL of the list root folder.
    pub list_root: String,
    /// Display title of the current list.
    pub list_title: String,
    /// Folder the user has navigated into, from the page URL.
    pub current_folder: Option<String>,
    /// Template folder names by kind.
    project_template: String,
    client_template: String,
}

impl RequestContext {
    /// Build a context with the default template names and no browsed
    /// folder.
    pub fn new(tenant_root: &str, list_root: &str, list_title: &str) -> Self {
        let templates = TemplateConfig::default();
        Self {
            tenant_root: tenant_root.trim_end_matches('/').to_string(),
            list_root: list_root.trim_end_matches('/').to_string(),
            list_title: list_title.to_string(),
            current_folder: None,
            project_template: templates.project,
            client_template: templates.client,
        }
    }

    /// Build a context from configuration and an optional page URL.
    ///
    /// The page's `parent_query_parameter` (default `ID`), when present,
    /// names the folder being browsed; its value is percent-decoded.
    pub fn from_config(config: &AppConfig, page_url: Option<&str>) -> Result<Self, AppError> {
        let current_folder = match page_url {
            Some(page_url) => {
                let url = Url::parse(page_url).map_err(|e| {
                    AppError::validation(format!("Invalid page URL '{page_url}': {e}"))
                })?;
                query_value(&url, &config.list.parent_query_parameter)
                    .map(|value| value.trim_end_matches('/').to_string())
                    .filter(|value| !value.is_empty())
            }
            None => None,
        };

        Ok(Self {
            tenant_root: config.site.tenant_root(),
            list_root: config.list.server_relative_url.trim_end_matches('/').to_string(),
            list_title: config.list.title.clone(),
            current_folder,
            project_template: config.templates.project.clone(),
            client_template: config.templates.client.clone(),
        })
    }

    /// Folder the new folder is created in.
    ///
    /// Projects go into the folder being browsed when there is one; clients
    /// always go into the list root.
    pub fn parent_path(&self, kind: ResourceKind) -> &str {
        match (kind, &self.current_folder) {
            (ResourceKind::Project, Some(folder)) => folder,
            _ => &self.list_root,
        }
    }

    /// Server-relative path of the template folder for `kind`.
    ///
    /// Templates always live at the list root.
    pub fn template_path(&self, kind: ResourceKind) -> String {
        let name = match kind {
            ResourceKind::Project => &self.project_template,
            ResourceKind::Client => &self.client_template,
        };
        format!("{}/{}", self.list_root, name)
    }

    /// Absolute URL for a server-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.tenant_root, path)
    }
}

/// Percent-decoded value of the first `name` parameter in the query.
///
/// A literal `+` is kept: folder paths are percent-encoded, not form-encoded.
fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query()?
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use folderkit_core::config::site::{ListConfig, SiteConfig};

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            site: SiteConfig {
                absolute_url: "https://tenant/sites/x".to_string(),
                server_relative_url: "/sites/x".to_string(),
            },
            list: ListConfig {
                server_relative_url: "/sites/x/Docs/".to_string(),
                ..Default::default()
            },
            templates: Default::default(),
            metadata: Default::default(),
            workflow: Default::default(),
            backend: Default::default(),
            logging: Default::default(),
        }
    }

    #[test]
    fn test_defaults_to_list_root() {
        let ctx = RequestContext::from_config(&config(), None).unwrap();
        assert_eq!(ctx.tenant_root, "https://tenant");
        assert_eq!(ctx.parent_path(ResourceKind::Project), "/sites/x/Docs");
        assert_eq!(ctx.parent_path(ResourceKind::Client), "/sites/x/Docs");
        assert_eq!(
            ctx.template_path(ResourceKind::Project),
            "/sites/x/Docs/02. Project Folder Template"
        );
        assert_eq!(
            ctx.template_path(ResourceKind::Client),
            "/sites/x/Docs/01. Client Folder Template"
        );
    }

    #[test]
    fn test_id_parameter_overrides_project_parent_only() {
        let page = "https://tenant/sites/x/Docs/Forms/AllItems.aspx?ID=%2Fsites%2Fx%2FDocs%2FAcme%20Corp&viewid=1";
        let ctx = RequestContext::from_config(&config(), Some(page)).unwrap();

        assert_eq!(ctx.parent_path(ResourceKind::Project), "/sites/x/Docs/Acme Corp");
        assert_eq!(ctx.parent_path(ResourceKind::Client), "/sites/x/Docs");
        assert_eq!(
            ctx.template_path(ResourceKind::Project),
            "/sites/x/Docs/02. Project Folder Template"
        );
    }

    #[test]
    fn test_id_parameter_keeps_plus() {
        let literal = "https://tenant/sites/x/Docs/Forms/AllItems.aspx?ID=/sites/x/Docs/R+D";
        let ctx = RequestContext::from_config(&config(), Some(literal)).unwrap();
        assert_eq!(ctx.parent_path(ResourceKind::Project), "/sites/x/Docs/R+D");

        let encoded = "https://tenant/sites/x/Docs/Forms/AllItems.aspx?viewid=1&ID=%2Fsites%2Fx%2FDocs%2FR%2BD%2F";
        let ctx = RequestContext::from_config(&config(), Some(encoded)).unwrap();
        assert_eq!(ctx.parent_path(ResourceKind::Project), "/sites/x/Docs/R+D");
    }

    #[test]
    fn test_empty_id_parameter_is_ignored() {
        let page = "https://tenant/sites/x/Docs/Forms/AllItems.aspx?ID=&viewid=1";
        let ctx = RequestContext::from_config(&config(), Some(page)).unwrap();
        assert_eq!(ctx.parent_path(ResourceKind::Project), "/sites/x/Docs");
    }

    #[test]
    fn test_page_without_parameter() {
        let page = "https://tenant/sites/x/Docs/Forms/AllItems.aspx?viewid=1";
        let ctx = RequestContext::from_config(&config(), Some(page)).unwrap();
        assert!(ctx.current_folder.is_none());
    }

    #[test]
    fn test_invalid_page_url() {
        assert!(RequestContext::from_config(&config(), Some("not a url")).is_err());
    }

    #[test]
    fn test_absolute_url() {
        let ctx = RequestContext::from_config(&config(), None).unwrap();
        assert_eq!(
            ctx.absolute_url("/sites/x/Docs/Acme Launch"),
            "https://tenant/sites/x/Docs/Acme Launch"
        );
    }
}
