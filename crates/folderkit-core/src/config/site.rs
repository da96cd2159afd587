//! Site and list location configuration.

use serde::{Deserialize, Serialize};

/// The site (web) the extension runs in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute URL of the web, e.g. `https://tenant.example.com/sites/x`.
    pub absolute_url: String,
    /// Server-relative URL of the web, e.g. `/sites/x`. `/` for the root web.
    #[serde(default = "default_server_relative_url")]
    pub server_relative_url: String,
}

impl SiteConfig {
    /// Scheme and host of the tenant, without the web's own path.
    ///
    /// `https://t.example.com/sites/x` with server-relative `/sites/x`
    /// yields `https://t.example.com`; a root web (`/`) keeps the absolute
    /// URL as-is.
    pub fn tenant_root(&self) -> String {
        let absolute = self.absolute_url.trim_end_matches('/');
        if self.server_relative_url.len() > 1 {
            absolute.replacen(self.server_relative_url.trim_end_matches('/'), "", 1)
        } else {
            absolute.to_string()
        }
    }

    /// The absolute web URL without a trailing slash.
    pub fn web_url(&self) -> &str {
        self.absolute_url.trim_end_matches('/')
    }
}

/// The list whose view hosts the commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Display title of the list. Commands are only visible on this list.
    #[serde(default = "default_list_title")]
    pub title: String,
    /// Server-relative URL of the list root folder.
    #[serde(default)]
    pub server_relative_url: String,
    /// Page query parameter that names an alternate parent folder.
    #[serde(default = "default_parent_query_parameter")]
    pub parent_query_parameter: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            title: default_list_title(),
            server_relative_url: String::new(),
            parent_query_parameter: default_parent_query_parameter(),
        }
    }
}

/// Template folder names, relative to the list root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template copied for new project folders.
    #[serde(default = "default_project_template")]
    pub project: String,
    /// Template copied for new client folders.
    #[serde(default = "default_client_template")]
    pub client: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            project: default_project_template(),
            client: default_client_template(),
        }
    }
}

/// Metadata tagging applied to new project folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Title of the list whose item carries the marker field.
    #[serde(default = "default_list_title")]
    pub list_title: String,
    /// Boolean field set to `true` on new project folders.
    #[serde(default = "default_marker_field")]
    pub marker_field: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            list_title: default_list_title(),
            marker_field: default_marker_field(),
        }
    }
}

fn default_server_relative_url() -> String {
    "/".to_string()
}

fn default_list_title() -> String {
    "Client & Partner Data".to_string()
}

fn default_parent_query_parameter() -> String {
    "ID".to_string()
}

fn default_project_template() -> String {
    "02. Project Folder Template".to_string()
}

fn default_client_template() -> String {
    "01. Client Folder Template".to_string()
}

fn default_marker_field() -> String {
    "IsProjectFolder".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(absolute_url: &str, server_relative_url: &str) -> SiteConfig {
        SiteConfig {
            absolute_url: absolute_url.to_string(),
            server_relative_url: server_relative_url.to_string(),
        }
    }

    #[test]
    fn test_tenant_root_strips_web_path() {
        let s = site("https://tenant.example.com/sites/x", "/sites/x");
        assert_eq!(s.tenant_root(), "https://tenant.example.com");
    }

    #[test]
    fn test_tenant_root_for_root_web() {
        let s = site("https://tenant.example.com/", "/");
        assert_eq!(s.tenant_root(), "https://tenant.example.com");
        assert_eq!(s.web_url(), "https://tenant.example.com");
    }
}
