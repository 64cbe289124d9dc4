//! Configuration for async resources

use serde::{Deserialize, Serialize};

/// When a resource re-runs its producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceMode {
    /// Run on mount and whenever the dependency value changes.
    #[default]
    AutoOnDependencyChange,
    /// Run only when `trigger()` is called.
    ManualTrigger,
}

impl ResourceMode {
    /// Whether dependency changes start a new generation.
    pub fn follows_dependencies(self) -> bool {
        matches!(self, ResourceMode::AutoOnDependencyChange)
    }
}

const DEFAULT_LABEL: &str = "resource";

/// Configuration for one async resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    mode: ResourceMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl ResourceConfig {
    /// Create a new config with default settings (auto mode, no label).
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for a resource that follows its dependencies.
    pub fn auto() -> Self {
        Self::new().with_mode(ResourceMode::AutoOnDependencyChange)
    }

    /// Config for a resource that only runs on `trigger()`.
    pub fn manual() -> Self {
        Self::new().with_mode(ResourceMode::ManualTrigger)
    }

    pub fn with_mode(mut self, mode: ResourceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Name used in log lines for this resource.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn mode(&self) -> ResourceMode {
        self.mode
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }
}
