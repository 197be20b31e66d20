#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(
    mut primary_query: bevy::ecs::system::Query<
        &mut bevy::window::Window,
        bevy::ecs::query::With<bevy::window::PrimaryWindow>,
    >,
) {
    // Surface::configure rejects dimensions above the backend's maximum
    // texture size, so keep the canvas below that.
    const MAX_WIDTH: f32 = 2048.0;
    const MAX_HEIGHT: f32 = 2048.0;

    let Some(target) = browser_inner_size() else {
        return;
    };

    for mut window in &mut primary_query {
        if (window.resolution.width() - target.x).abs() > f32::EPSILON
            || (window.resolution.height() - target.y).abs() > f32::EPSILON
        {
            window
                .resolution
                .set(target.x.min(MAX_WIDTH), target.y.min(MAX_HEIGHT));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_inner_size() -> Option<bevy::math::Vec2> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(bevy::math::Vec2::new(width as f32, height as f32))
}
