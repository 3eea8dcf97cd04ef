//! In-process system plugins.
//!
//! A plugin contributes entity systems to a manager. The registry only
//! enumerates and installs; locating and loading plugin code from disk is
//! the embedder's concern.

#![allow(dead_code)]

use tracing::info;

use stage_entity::EntityManager;

/// A bundle of entity systems installable into a manager.
pub trait SystemPlugin {
    /// Plugin name, for enumeration and diagnostics.
    fn name(&self) -> &str;

    /// Register this plugin's entity systems with the manager.
    fn install(&self, manager: &mut EntityManager);
}

/// Registry of available plugins.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn SystemPlugin>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin to the registry.
    pub fn register(&mut self, plugin: Box<dyn SystemPlugin>) {
        self.plugins.push(plugin);
    }

    /// Names of all registered plugins, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Install every plugin's systems into the manager.
    pub fn install_all(&self, manager: &mut EntityManager) {
        for plugin in &self.plugins {
            info!(plugin = plugin.name(), "installing plugin");
            plugin.install(manager);
        }
    }
}
