//! The selector label identity shared by every generated resource
//!
//! Every resource belonging to one resolved project carries the same four
//! labels. Selection-based operations (status, logs, sync, shell) rely on
//! these being applied consistently, so the identity is built once from the
//! config and threaded through every constructor instead of recomputed at
//! call sites.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

/// Label key for the application name
pub const LABEL_NAME: &str = "app.kubernetes.io/name";
/// Label key for the instance
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";
/// Label key for the component role
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";
/// Label key for the managing tool
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Value of the managed-by label for everything sitekit creates
pub const MANAGED_BY: &str = "sitekit";

/// Component role of a resource within the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    App,
    Database,
    Storage,
    Config,
}

impl Component {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Config => "config",
        }
    }

    /// Parse a component from its label value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "app" => Some(Self::App),
            "database" => Some(Self::Database),
            "storage" => Some(Self::Storage),
            "config" => Some(Self::Config),
            _ => None,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The immutable label identity of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorLabels {
    pub name: String,
    pub instance: String,
    pub component: Component,
    pub managed_by: String,
}

impl SelectorLabels {
    /// Build the identity for a component of the given project
    pub fn new(project_name: &str, component: Component) -> Self {
        Self {
            name: project_name.to_string(),
            instance: project_name.to_string(),
            component,
            managed_by: MANAGED_BY.to_string(),
        }
    }

    /// The serving-workload identity for a config (component `app`)
    pub fn for_site(config: &SiteConfig) -> Self {
        Self::new(&config.project_name, Component::App)
    }

    /// Render as a label map, ready for metadata.labels
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (LABEL_NAME.to_string(), self.name.clone()),
            (LABEL_INSTANCE.to_string(), self.instance.clone()),
            (LABEL_COMPONENT.to_string(), self.component.to_string()),
            (LABEL_MANAGED_BY.to_string(), self.managed_by.clone()),
        ])
    }

    /// Label selector string addressing this project's serving pods.
    ///
    /// Component is deliberately excluded: the selector addresses the
    /// project, and component varies per resource.
    pub fn selector(&self) -> String {
        format!(
            "{}={},{}={},{}={}",
            LABEL_NAME, self.name, LABEL_INSTANCE, self.instance, LABEL_MANAGED_BY, self.managed_by
        )
    }
}
