use bevy::prelude::*;
use grid_helpers::input::PointerTrackingPlugin;
use host::SwapGridWidget;

use crate::core::{DragActive, GameState, Selection};
use crate::grid::TileGrid;
use crate::interaction::{end_drag_on_release, handle_press, handle_release};
use crate::render::{
    populate_board, reset_board, spawn_board, sync_cells_to_grid, sync_ghost, visualize_selection,
};

mod core;
mod grid;
mod host;
mod interaction;
mod render;

/// Entry point for the widget.
pub fn run() {
    grid_helpers::get_default_app::<SwapGridWidget>(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
    .add_plugins(PointerTrackingPlugin)
    .init_state::<GameState>()
    .init_resource::<TileGrid>()
    .init_resource::<Selection>()
    .init_resource::<DragActive>()
    .add_systems(Startup, spawn_board)
    .add_systems(OnEnter(GameState::Init), reset_board)
    .add_systems(Update, populate_board.run_if(in_state(GameState::Init)))
    .add_systems(
        Update,
        (
            (handle_press, handle_release, end_drag_on_release).chain(),
            sync_cells_to_grid,
            visualize_selection,
            sync_ghost,
        )
            .run_if(in_state(GameState::Active)),
    )
    .run();
}
