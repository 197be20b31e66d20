use bevy::prelude::*;
use grid_helpers::HostMessageHandler;

use crate::core::GameState;

#[derive(Default, Clone, Copy)]
pub struct SwapGridWidget;

impl HostMessageHandler for SwapGridWidget {
    fn restart(world: &mut World) {
        info!("Restarting swap grid");

        let mut next_state = world.resource_mut::<NextState<GameState>>();
        next_state.set(GameState::Init);
    }
}
