use bevy::prelude::*;
use grid_helpers::input::{
    just_pressed_world_position, just_released_world_position, PointerReleased,
};
use grid_helpers::{send_widget_message, WidgetMessage};

use crate::core::{CellVisual, DragActive, GridPos, Selection};
use crate::grid::TileGrid;

/// Pressing a cell selects it and starts a drag.
pub fn handle_press(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    cells: Query<(&GridPos, &Sprite, &Transform), With<CellVisual>>,
    mut selection: ResMut<Selection>,
    mut drag: ResMut<DragActive>,
) {
    let Some(world_position) =
        just_pressed_world_position(&mouse_button_input, &touch_input, &windows, &camera)
    else {
        return;
    };
    let Some(pos) = cell_at_position(world_position, &cells) else {
        return;
    };
    apply_press(&mut selection, &mut drag, pos);
}

/// Releasing on a cell swaps it with the selected cell.
pub fn handle_release(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    cells: Query<(&GridPos, &Sprite, &Transform), With<CellVisual>>,
    mut grid: ResMut<TileGrid>,
    mut selection: ResMut<Selection>,
    mut drag: ResMut<DragActive>,
) {
    let Some(world_position) =
        just_released_world_position(&mouse_button_input, &touch_input, &windows, &camera)
    else {
        return;
    };
    let Some(target) = cell_at_position(world_position, &cells) else {
        return;
    };
    if let Some((from, to)) = apply_release(&mut grid, &mut selection, &mut drag, target) {
        send_widget_message(WidgetMessage::Swapped {
            from: [from.row as u32, from.col as u32],
            to: [to.row as u32, to.col as u32],
        });
        info!("swapped {from:?} with {to:?}\n{}", *grid);
    }
}

/// A release anywhere ends the drag; the selection stays where it was.
pub fn end_drag_on_release(
    mut released: EventReader<PointerReleased>,
    mut drag: ResMut<DragActive>,
) {
    for _event in released.read() {
        drag.0 = false;
    }
}

fn cell_at_position(
    position: Vec2,
    cells: &Query<(&GridPos, &Sprite, &Transform), With<CellVisual>>,
) -> Option<GridPos> {
    for (pos, sprite, transform) in cells {
        let size = sprite.custom_size.unwrap_or(Vec2::ONE);
        let rect = Rect::from_center_size(transform.translation.truncate(), size);
        if rect.contains(position) {
            return Some(*pos);
        }
    }
    None
}

fn apply_press(selection: &mut Selection, drag: &mut DragActive, pos: GridPos) {
    selection.0 = Some(pos);
    drag.0 = true;
}

/// Commits a swap against the current selection. Returns the swapped pair,
/// or `None` when there is no selection or the swap was rejected; in both
/// cases nothing changes.
fn apply_release(
    grid: &mut TileGrid,
    selection: &mut Selection,
    drag: &mut DragActive,
    target: GridPos,
) -> Option<(GridPos, GridPos)> {
    let from = selection.0?;
    if let Err(err) = grid.swap(from, target) {
        warn!("{err}");
        return None;
    }
    selection.0 = Some(target);
    drag.0 = false;
    Some((from, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_grid() -> TileGrid {
        let mut grid = TileGrid::default();
        grid.populate();
        grid
    }

    fn id_at(grid: &TileGrid, row: usize, col: usize) -> Option<usize> {
        grid.cell(GridPos::new(row, col)).map(|cell| cell.id)
    }

    #[test]
    fn press_selects_and_starts_drag() {
        let mut selection = Selection::default();
        let mut drag = DragActive::default();

        apply_press(&mut selection, &mut drag, GridPos::new(0, 0));

        assert_eq!(
            selection.0,
            Some(GridPos::new(0, 0)),
            "press records the pressed cell"
        );
        assert!(drag.0, "press starts the drag");
    }

    #[test]
    fn press_then_release_swaps_and_ends_drag() {
        let mut grid = populated_grid();
        let mut selection = Selection::default();
        let mut drag = DragActive::default();

        apply_press(&mut selection, &mut drag, GridPos::new(0, 0));
        let swapped = apply_release(&mut grid, &mut selection, &mut drag, GridPos::new(1, 1));

        assert_eq!(
            swapped,
            Some((GridPos::new(0, 0), GridPos::new(1, 1))),
            "the swap commits"
        );
        assert_eq!(id_at(&grid, 0, 0), Some(6), "target id moved to the source");
        assert_eq!(id_at(&grid, 1, 1), Some(0), "source id moved to the target");
        assert_eq!(
            selection.0,
            Some(GridPos::new(1, 1)),
            "selection follows the release cell"
        );
        assert!(!drag.0, "a committed swap ends the drag");
    }

    #[test]
    fn release_without_selection_changes_nothing() {
        let mut grid = populated_grid();
        let mut selection = Selection::default();
        let mut drag = DragActive::default();

        let swapped = apply_release(&mut grid, &mut selection, &mut drag, GridPos::new(1, 1));

        assert_eq!(swapped, None, "nothing to swap without a selection");
        assert_eq!(id_at(&grid, 1, 1), Some(6), "the board is untouched");
        assert_eq!(selection.0, None, "no selection appears from nowhere");
        assert!(!drag.0, "the drag flag is untouched");
    }

    #[test]
    fn release_outside_the_board_ends_the_drag_but_keeps_the_selection() {
        let mut app = App::new();
        app.add_event::<PointerReleased>();
        app.insert_resource(Selection(Some(GridPos::new(2, 2))));
        app.insert_resource(DragActive(true));
        app.add_systems(Update, end_drag_on_release);

        app.world_mut().send_event(PointerReleased);
        app.update();

        assert!(
            !app.world().resource::<DragActive>().0,
            "a global release always ends the drag"
        );
        assert_eq!(
            app.world().resource::<Selection>().0,
            Some(GridPos::new(2, 2)),
            "a cancelled drag keeps the last selection highlighted"
        );
    }

    #[test]
    fn release_on_the_selected_cell_is_a_legal_no_op_swap() {
        let mut grid = populated_grid();
        let mut selection = Selection::default();
        let mut drag = DragActive::default();

        apply_press(&mut selection, &mut drag, GridPos::new(2, 2));
        let swapped = apply_release(&mut grid, &mut selection, &mut drag, GridPos::new(2, 2));

        assert_eq!(
            swapped,
            Some((GridPos::new(2, 2), GridPos::new(2, 2))),
            "a self swap still commits"
        );
        assert_eq!(id_at(&grid, 2, 2), Some(12), "the cell keeps its id");
        assert_eq!(
            selection.0,
            Some(GridPos::new(2, 2)),
            "selection stays on the cell"
        );
        assert!(!drag.0, "a self swap still ends the drag");
    }
}
