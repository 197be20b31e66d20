use bevy::input::InputSystem;
use bevy::prelude::*;

/// Last known pointer position in screen coordinates, updated on every
/// cursor or touch movement. `(0, 0)` until the first event arrives.
#[derive(Resource, Default, Clone, Copy)]
pub struct PointerPosition(pub Vec2);

/// Whether the primary pointer button (left mouse or any touch) is held.
#[derive(Resource, Default, Clone, Copy)]
pub struct PointerButtonState {
    pub pressed: bool,
}

#[derive(Event)]
pub struct PointerPressed;

#[derive(Event)]
pub struct PointerReleased;

/// Tracks the global pointer across mouse and touch input.
///
/// Systems consuming [`PointerPressed`] and [`PointerReleased`] are wired
/// when the [`App`] is built; reactions cannot be swapped at runtime.
pub struct PointerTrackingPlugin;

impl Plugin for PointerTrackingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerPosition>()
            .init_resource::<PointerButtonState>()
            .add_event::<PointerPressed>()
            .add_event::<PointerReleased>()
            .add_systems(
                PreUpdate,
                (track_pointer_position, track_button_state).after(InputSystem),
            );
    }
}

fn track_pointer_position(
    mut cursor_moved: EventReader<CursorMoved>,
    touch_input: Res<Touches>,
    mut position: ResMut<PointerPosition>,
) {
    for event in cursor_moved.read() {
        position.0 = event.position;
    }
    for touch in touch_input.iter() {
        position.0 = touch.position();
    }
}

fn track_button_state(
    button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut state: ResMut<PointerButtonState>,
    mut pressed: EventWriter<PointerPressed>,
    mut released: EventWriter<PointerReleased>,
) {
    if button_input.just_pressed(MouseButton::Left) || touch_input.any_just_pressed() {
        state.pressed = true;
        pressed.send(PointerPressed);
    }
    if button_input.just_released(MouseButton::Left) || touch_input.any_just_released() {
        state.pressed = false;
        released.send(PointerReleased);
    }
}

pub fn just_pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        let cursor_position = windows.single().cursor_position()?;
        Some(cursor_position)
    } else if touch_input.any_just_pressed() {
        let touch = touch_input.iter_just_pressed().next()?;
        Some(touch.position())
    } else {
        None
    }
}

pub fn just_pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_pressed_screen_position(button_input, touch_input, windows)?;

    let (camera, camera_transform) = camera.single();

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}

pub fn just_released_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_released(MouseButton::Left) {
        let cursor_position = windows.single().cursor_position()?;
        Some(cursor_position)
    } else if touch_input.any_just_released() {
        let touch = touch_input.iter_just_released().next()?;
        Some(touch.position())
    } else {
        None
    }
}

pub fn just_released_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_released_screen_position(button_input, touch_input, windows)?;

    let (camera, camera_transform) = camera.single();

    camera
        .viewport_to_world(camera_transform, position)
        .map(|ray| ray.origin.truncate())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracking_app() -> App {
        let mut app = App::new();
        app.add_plugins(PointerTrackingPlugin);
        app.init_resource::<ButtonInput<MouseButton>>();
        app.init_resource::<Touches>();
        app.add_event::<CursorMoved>();
        app
    }

    #[test]
    fn cursor_movement_updates_the_pointer_position() {
        let mut app = tracking_app();

        app.world_mut().send_event(CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(12., 34.),
            delta: None,
        });
        app.update();

        assert_eq!(
            app.world().resource::<PointerPosition>().0,
            Vec2::new(12., 34.),
            "the resource holds the last reported cursor position"
        );
    }

    #[test]
    fn presses_and_releases_drive_the_shared_button_state() {
        let mut app = tracking_app();
        assert!(
            !app.world().resource::<PointerButtonState>().pressed,
            "the button starts released"
        );

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert!(
            app.world().resource::<PointerButtonState>().pressed,
            "a left press marks the button held"
        );

        let mut buttons = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        buttons.clear();
        buttons.release(MouseButton::Left);
        app.update();
        assert!(
            !app.world().resource::<PointerButtonState>().pressed,
            "a release marks the button up again"
        );
    }
}
