//! # stage_app — demo driver
//!
//! Builds an entity manager, installs the stock component systems through
//! the plugin registry, spawns a small scene, and runs a bounded frame
//! loop.
//!
//! ## Startup Sequence
//!
//! 1. Initialise structured logging.
//! 2. Install plugins (each contributes entity systems).
//! 3. Spawn a camera entity and a few placed props.
//! 4. Enter the fixed-timestep frame loop.

mod config;
mod frame;
mod plugin;

use anyhow::Result;
use glam::Vec3;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stage_components::{Camera, MapMembership, Transform3D};
use stage_entity::{ComponentStore, EntityEvent, EntityManager, PooledAllocator};

use config::FrameConfig;
use frame::{EventHandler, FrameLoop};
use plugin::{PluginRegistry, SystemPlugin};

/// Installs the stock component systems.
///
/// Map membership uses the pooled strategy: map entities churn on every
/// scene load, so their components recycle through a fixed pool.
struct CoreComponentsPlugin;

impl SystemPlugin for CoreComponentsPlugin {
    fn name(&self) -> &str {
        "core-components"
    }

    fn install(&self, manager: &mut EntityManager) {
        manager.add_system(Box::new(ComponentStore::<Transform3D>::new()));
        manager.add_system(Box::new(ComponentStore::<Camera>::new()));
        manager.add_system(Box::new(ComponentStore::<MapMembership>::with_allocator(
            Box::new(PooledAllocator::new(1024)),
        )));
    }
}

/// Logs scene transitions as they are delivered at the frame boundary.
struct SceneLogger;

impl EventHandler for SceneLogger {
    fn handle(&mut self, event: &EntityEvent, manager: &mut EntityManager) {
        match event {
            EntityEvent::AddedToScene(id) => {
                let name = manager
                    .component::<MapMembership>(*id)
                    .map(|m| m.entity_name.clone())
                    .unwrap_or_default();
                info!(entity = %id, name = %name, "entered scene");
            }
            EntityEvent::RemovedFromScene(id) => info!(entity = %id, "left scene"),
            EntityEvent::SystemAdded(ty) => info!(component_type = ty.0, "system added"),
            EntityEvent::SystemRemoved(ty) => info!(component_type = ty.0, "system removed"),
        }
    }
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("stage_app=info".parse()?))
        .init();

    info!("stagecraft demo starting");

    let mut registry = PluginRegistry::new();
    registry.register(Box::new(CoreComponentsPlugin));

    let mut manager = EntityManager::new();
    registry.install_all(&mut manager);

    // Main camera entity, mirroring what an editor creates on scene load.
    let camera = manager.create_entity();
    manager.create_component::<Camera>(camera.id())?;
    let membership = manager.create_component::<MapMembership>(camera.id())?;
    membership.entity_name = "main_camera".to_string();
    membership.map_name = "maps/camera".to_string();
    manager.add_to_scene(camera.id())?;

    // A handful of placed props.
    for i in 0..4 {
        let prop = manager.create_entity();
        let transform = manager.create_component::<Transform3D>(prop.id())?;
        transform.translation = Vec3::new(i as f32 * 2.0, 0.0, 0.0);
        manager
            .create_component::<MapMembership>(prop.id())?
            .map_name = "maps/default".to_string();
        manager.add_to_scene(prop.id())?;
    }

    info!(
        entities = manager.entity_count(),
        systems = manager.system_count(),
        "scene ready"
    );

    let mut frames = FrameLoop::with_manager(
        FrameConfig {
            frame_rate: 60.0,
            max_frames: 120,
        },
        manager,
    );
    frames.add_handler(Box::new(SceneLogger));
    frames.run();

    info!(frames = frames.frame_id(), "stagecraft demo shut down");
    Ok(())
}
