//! Loads assets that double as resources and inserts them once they are ready.

use super::*;
use std::collections::VecDeque;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ResourceHandles>();
    app.add_systems(PreUpdate, insert_loaded_resources);
}

pub trait LoadResource {
    /// Loads `T` from `path` and inserts it as a resource as soon as it and its
    /// dependencies are loaded. Until then the resource does not exist.
    fn load_resource_from_path<T: Resource + Asset + Clone>(
        &mut self,
        path: impl Into<String>,
    ) -> &mut Self;
}

impl LoadResource for App {
    fn load_resource_from_path<T: Resource + Asset + Clone>(
        &mut self,
        path: impl Into<String>,
    ) -> &mut Self {
        self.init_asset::<T>();
        let world = self.world_mut();
        let handle: Handle<T> = world.resource::<AssetServer>().load::<T>(path.into());
        world
            .resource_mut::<ResourceHandles>()
            .push_handle(handle.clone());

        // Desktop dev builds watch the file, so keep the resource in sync with edits.
        #[cfg(feature = "dev")]
        self.add_systems(
            Update,
            move |mut commands: Commands,
                  mut events: MessageReader<AssetEvent<T>>,
                  assets: Res<Assets<T>>| {
                for event in events.read() {
                    if let AssetEvent::Modified { id } = event {
                        if *id == handle.id() {
                            if let Some(asset) = assets.get(&handle) {
                                info!("reloaded {}", std::any::type_name::<T>());
                                commands.insert_resource(asset.clone());
                            }
                        }
                    }
                }
            },
        );

        self
    }
}

type InsertLoaded = fn(&mut World, &UntypedHandle);

#[derive(Resource, Default)]
pub struct ResourceHandles {
    waiting: VecDeque<(UntypedHandle, InsertLoaded)>,
    finished: Vec<UntypedHandle>,
}

impl ResourceHandles {
    /// True once every tracked asset is available as a resource.
    pub fn is_all_done(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn push_handle<T: Asset + Resource + Clone>(&mut self, handle: Handle<T>) {
        self.waiting.push_back((handle.untyped(), |world, handle| {
            let assets = world.resource::<Assets<T>>();
            if let Some(value) = assets.get(handle.id().typed::<T>()) {
                world.insert_resource(value.clone());
            }
        }));
    }
}

fn insert_loaded_resources(world: &mut World) {
    world.resource_scope(|world, mut handles: Mut<ResourceHandles>| {
        world.resource_scope(|world, assets: Mut<AssetServer>| {
            let pending = std::mem::take(&mut handles.waiting);
            for (handle, insert) in pending {
                if assets.is_loaded_with_dependencies(&handle) {
                    insert(world, &handle);
                    handles.finished.push(handle);
                } else if assets.load_state(&handle).is_failed() {
                    error!("failed to load {:?}, keeping defaults", handle.path());
                    handles.finished.push(handle);
                } else {
                    handles.waiting.push_back((handle, insert));
                }
            }
        });
    });
}
