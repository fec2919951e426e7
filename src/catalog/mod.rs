//! Where creatures come from: random ids, the legendary list and the HTTP client.
use crate::models::Config;
use bevy::prelude::*;

mod client;
mod record;
mod roll;

pub use client::*;
pub use record::*;
pub use roll::*;

#[cfg(test)]
pub(crate) use record::tests as fixtures;

pub fn plugin(app: &mut App) {
    app.init_resource::<LegendarySet>().add_systems(
        PreUpdate,
        sync_with_config.run_if(resource_exists_and_changed::<Config>),
    );
}

/// Rebuilds the legendary set and the client whenever the config (re)loads.
fn sync_with_config(config: Res<Config>, mut commands: Commands) {
    let legendary: LegendarySet = config.catalog.legendary.iter().copied().collect();
    info!(
        "catalog: {} creatures, {} legendary, {}",
        config.catalog.size,
        legendary.len(),
        config.catalog.endpoint
    );
    commands.insert_resource(legendary);
    commands.insert_resource(Catalog::new(PokeApi::new(config.catalog.endpoint.clone())));
}
