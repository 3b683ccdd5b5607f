use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::color_picker::{socket_url, PickerUpdate};

struct Connection {
    socket: WebSocket,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Detach before the closures are freed so late events don't reach them.
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        let _ = self.socket.close();
    }
}

/// WebSocket client receiving color updates from the picker device.
pub struct PickerClient {
    default_port: u16,
    on_update: Rc<dyn Fn(PickerUpdate)>,
    connection: Option<Connection>,
}

impl PickerClient {
    pub fn new(default_port: u16, on_update: impl Fn(PickerUpdate) + 'static) -> Self {
        Self {
            default_port,
            on_update: Rc::new(on_update),
            connection: None,
        }
    }

    /// Point the client at `host`, replacing any open connection.
    pub fn set_host(&mut self, host: &str) -> Result<(), JsValue> {
        self.connection = None;
        let url = socket_url(host, self.default_port);
        let socket = WebSocket::new(&url)?;

        let on_update = self.on_update.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                log::warn!("ignoring non-text picker frame");
                return;
            };
            match PickerUpdate::from_json(&text) {
                Ok(update) => on_update(update),
                Err(err) => log::warn!("{err}"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let closed_url = url.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            log::info!("picker {closed_url} disconnected (code {})", event.code());
        }) as Box<dyn FnMut(CloseEvent)>);
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        log::info!("connecting to picker at {url}");
        self.connection = Some(Connection {
            socket,
            _on_message: on_message,
            _on_close: on_close,
        });
        Ok(())
    }
}
