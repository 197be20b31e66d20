use std::sync::{Arc, LazyLock};

use bevy::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::MessageEvent;

/// Messages the embedding page can post to the widget.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMessage {
    /// Reset the board to sorted order, as a page reload would.
    Restart,
}

/// Messages the widget posts back to the embedding page.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetMessage {
    Ready,
    Swapped { from: [u32; 2], to: [u32; 2] },
}

pub static HOST_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<HostMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(not(target_arch = "wasm32"))]
pub static WIDGET_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<WidgetMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(target_arch = "wasm32")]
pub fn listen_host_messages() {
    let window = web_sys::window().expect("no global `window` exists");
    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let message: Result<HostMessage, serde_wasm_bindgen::Error> =
            serde_wasm_bindgen::from_value(event.data());

        let Ok(message) = message else {
            error!("Could not parse host message {:?}", &event.data());
            return;
        };

        HOST_MESSAGE_QUEUE.lock().push(message);
    }) as Box<dyn FnMut(MessageEvent)>);

    window
        .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        .expect("failed to add message event listener");

    closure.forget(); // Leaks memory, but ensures the closure lives for the lifetime of the program
}

#[cfg(not(target_arch = "wasm32"))]
pub fn send_widget_message(message: WidgetMessage) {
    WIDGET_MESSAGE_QUEUE.lock().push(message);
}

#[cfg(target_arch = "wasm32")]
pub fn send_widget_message(message: WidgetMessage) {
    let window = web_sys::window().expect("no global `window` exists");
    let Ok(message_value) = serde_wasm_bindgen::to_value(&message) else {
        error!("Could not serialize {message:?}");
        return;
    };

    let Ok(Some(parent_window)) = window.parent() else {
        error!("{message:?} not sent, parent_window not found.");
        return;
    };

    if let Err(err) = parent_window.post_message(&message_value, "*") {
        error!("Could not post message {message_value:?}. {err:?}");
    };
}

/// This trait implements the messages that can be sent by the embedding page.
///
/// The functions are dispatched by [`HostBridgePlugin`] and are not meant to
/// be called directly from widget systems.
pub trait HostMessageHandler: Send + Sync + Default + 'static {
    fn restart(world: &mut World);
}

fn process_host_messages<T: HostMessageHandler>(world: &mut World) {
    let messages = HOST_MESSAGE_QUEUE.lock().drain(..).collect::<Vec<_>>();

    for message in messages {
        match message {
            HostMessage::Restart => T::restart(world),
        }
    }
}

fn ready() {
    send_widget_message(WidgetMessage::Ready);
}

#[derive(Default)]
pub struct HostBridgePlugin<T: HostMessageHandler>(core::marker::PhantomData<T>);

impl<T: HostMessageHandler> Plugin for HostBridgePlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, process_host_messages::<T>);
        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(Startup, listen_host_messages);
        }
        app.add_systems(PostStartup, ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_messages_queue_on_native() {
        WIDGET_MESSAGE_QUEUE.lock().clear();

        send_widget_message(WidgetMessage::Ready);
        send_widget_message(WidgetMessage::Swapped {
            from: [0, 0],
            to: [1, 1],
        });

        let queue = WIDGET_MESSAGE_QUEUE.lock();
        assert_eq!(
            queue.as_slice(),
            &[
                WidgetMessage::Ready,
                WidgetMessage::Swapped {
                    from: [0, 0],
                    to: [1, 1],
                },
            ],
            "native builds queue messages instead of posting them"
        );
    }
}
