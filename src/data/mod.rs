//! Data layer — populates all registries at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the plant catalog,
//! the town-event catalog, and the mayor's fine reasons from the hard-coded
//! game-design data defined in submodules, then transitions the game into
//! GameState::Title.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

mod events;
mod plants;

use bevy::prelude::*;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then transitions to Title.
fn load_all_data(
    mut plant_registry: ResMut<PlantRegistry>,
    mut event_registry: ResMut<EventRegistry>,
    mut mayor_reasons: ResMut<MayorReasons>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    plants::populate_plants(&mut plant_registry);
    info!("  Plants loaded: {}", plant_registry.plants.len());

    events::populate_events(&mut event_registry);
    info!("  Town events loaded: {}", event_registry.events.len());

    events::populate_mayor_reasons(&mut mayor_reasons);
    info!("  Mayor fine reasons loaded: {}", mayor_reasons.reasons.len());

    next_state.set(GameState::Title);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_registries_populate() {
        let mut plant_registry = PlantRegistry::default();
        let mut event_registry = EventRegistry::default();
        let mut mayor_reasons = MayorReasons::default();

        plants::populate_plants(&mut plant_registry);
        events::populate_events(&mut event_registry);
        events::populate_mayor_reasons(&mut mayor_reasons);

        assert_eq!(plant_registry.plants.len(), 5);
        assert_eq!(event_registry.events.len(), 4);
        assert_eq!(mayor_reasons.reasons.len(), 5);
    }
}
