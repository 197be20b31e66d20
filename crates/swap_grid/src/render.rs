use bevy::prelude::*;
use grid_helpers::input::{PointerButtonState, PointerPosition};

use crate::core::{
    CellVisual, DragActive, GameState, GhostTile, GridPos, MainCamera, Selection,
    SelectionHighlight, CELL_OFFSET, CELL_SIZE, GHOST_POINTER_OFFSET, NUMBER_OF_COLUMNS,
};
use crate::grid::TileGrid;

const FRAME_SIZE: f32 = CELL_OFFSET * NUMBER_OF_COLUMNS as f32 + 16.;
const FRAME_INNER_SIZE: f32 = FRAME_SIZE - 16.;

const HIGHLIGHT_COLOR: Color = Color::Srgba(Srgba::new(1., 0.85, 0.2, 0.6));
const GHOST_COLOR: Color = Color::Srgba(Srgba::new(1., 1., 1., 0.85));

pub fn spawn_board(mut commands: Commands) {
    // Camera
    commands.spawn(Camera2d).insert(MainCamera);
    // Frame
    commands
        .spawn((
            Sprite::from_color(Color::WHITE, Vec2::splat(FRAME_SIZE)),
            Transform::from_xyz(0., 0., -10.),
        ))
        .with_child((
            Sprite::from_color(Color::BLACK, Vec2::splat(FRAME_INNER_SIZE)),
            Transform::from_xyz(0., 0., 5.),
        ));
}

/// Clears every per-round entity and resource so the lazy init path can run
/// again. Runs on the initial state entry too, where there is nothing to
/// clean yet.
pub fn reset_board(
    mut commands: Commands,
    mut grid: ResMut<TileGrid>,
    mut selection: ResMut<Selection>,
    mut drag: ResMut<DragActive>,
    stale: Query<Entity, Or<(With<CellVisual>, With<GhostTile>, With<SelectionHighlight>)>>,
) {
    for entity in stale.iter() {
        commands.entity(entity).despawn_recursive();
    }
    grid.clear();
    selection.0 = None;
    drag.0 = false;
}

/// Fills the empty board and spawns its tiles, once per mount.
pub fn populate_board(
    mut commands: Commands,
    mut grid: ResMut<TileGrid>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if grid.is_empty() {
        grid.populate();
    }
    spawn_cells(&mut commands, &grid);
    next_state.set(GameState::Active);
}

fn spawn_cells(commands: &mut Commands, grid: &TileGrid) {
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let pos = GridPos::new(row, col);
            let Some(cell) = grid.cell(pos) else {
                continue;
            };
            commands
                .spawn((
                    Sprite::from_color(Color::WHITE, Vec2::splat(CELL_SIZE)),
                    CellVisual { id: cell.id },
                    pos,
                    Transform::from(pos),
                    Name::new("cell prevent-select"),
                ))
                .with_child(cell_label(cell.id));
        }
    }
}

fn cell_label(id: usize) -> impl Bundle {
    (
        Text2d::new(id.to_string()),
        TextFont {
            font_size: 32.,
            ..default()
        },
        TextColor(Color::BLACK),
        Transform::from_xyz(0., 0., 10.),
    )
}

/// Re-derives each tile's slot from the board after a swap.
pub fn sync_cells_to_grid(
    grid: Res<TileGrid>,
    mut cells: Query<(&CellVisual, &mut GridPos, &mut Transform)>,
) {
    if !grid.is_changed() {
        return;
    }
    for (cell, mut pos, mut transform) in &mut cells {
        let Some(current) = grid.position_of(cell.id) else {
            continue;
        };
        if *pos != current {
            *pos = current;
            *transform = current.into();
        }
    }
}

pub fn visualize_selection(
    mut commands: Commands,
    selection: Res<Selection>,
    mut highlight: Query<(Entity, &mut Transform), With<SelectionHighlight>>,
) {
    if !selection.is_changed() {
        return;
    }
    if let Some(pos) = selection.0 {
        let mut transform = Transform::from(pos);
        transform.translation.z = 5.;
        if let Ok((_, mut old_transform)) = highlight.get_single_mut() {
            *old_transform = transform;
        } else {
            commands.spawn((
                Sprite::from_color(HIGHLIGHT_COLOR, Vec2::splat(CELL_SIZE)),
                transform,
                SelectionHighlight,
                Name::new("selected"),
            ));
        }
    } else if let Ok((entity, _)) = highlight.get_single_mut() {
        commands.entity(entity).despawn();
    }
}

/// The ghost renders only while the cell-level drag AND the global button
/// state agree. The dual check keeps it from lingering in the frame where
/// one side has seen the release and the other has not.
pub fn sync_ghost(
    mut commands: Commands,
    drag: Res<DragActive>,
    button_state: Res<PointerButtonState>,
    pointer: Res<PointerPosition>,
    selection: Res<Selection>,
    grid: Res<TileGrid>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut ghost: Query<(Entity, &mut Transform), With<GhostTile>>,
) {
    if !ghost_visible(drag.0, button_state.pressed) {
        if let Ok((entity, _)) = ghost.get_single_mut() {
            commands.entity(entity).despawn_recursive();
        }
        return;
    }

    let Some(pos) = selection.0 else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.get_single() else {
        return;
    };
    let Some(world_position) = camera
        .viewport_to_world(camera_transform, ghost_screen_position(pointer.0))
        .map(|ray| ray.origin.truncate())
        .ok()
    else {
        return;
    };

    if let Ok((_, mut transform)) = ghost.get_single_mut() {
        transform.translation = world_position.extend(20.);
    } else {
        let Some(cell) = grid.cell(pos) else {
            return;
        };
        commands
            .spawn((
                Sprite::from_color(GHOST_COLOR, Vec2::splat(CELL_SIZE)),
                Transform::from_translation(world_position.extend(20.)),
                GhostTile,
                Name::new("cell selected dummy-cell"),
            ))
            .with_child(cell_label(cell.id));
    }
}

const fn ghost_visible(drag_active: bool, pressed: bool) -> bool {
    drag_active && pressed
}

/// The ghost sits up and left of the pointer, not centered on it.
fn ghost_screen_position(pointer: Vec2) -> Vec2 {
    pointer - Vec2::splat(GHOST_POINTER_OFFSET)
}
