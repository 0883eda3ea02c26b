use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::error::CarouselError;
use crate::helper::{viewport_width, window};

/// Feeds viewport widths from `resize` events into a channel. The listener
/// is removed when the watcher is dropped.
pub struct ViewportWatcher {
    window: Window,
    on_resize: Closure<dyn FnMut()>,
}

impl std::fmt::Debug for ViewportWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ViewportWatcher")
    }
}

impl ViewportWatcher {
    pub fn attach() -> Result<(Self, UnboundedReceiver<f64>), CarouselError> {
        let (sender, receiver) = unbounded();
        let watcher = Self::attach_with_sender(sender)?;
        Ok((watcher, receiver))
    }

    pub fn attach_with_sender(sender: UnboundedSender<f64>) -> Result<Self, CarouselError> {
        let window = window()?;
        let on_resize = Closure::<dyn FnMut()>::new(move || match viewport_width() {
            Ok(width) => {
                // receiver gone means the carousel is being torn down
                let _ = sender.unbounded_send(width);
            }
            Err(err) => log::warn!("ignoring resize: {}", err),
        });
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        Ok(Self { window, on_resize })
    }
}

impl Drop for ViewportWatcher {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove resize listener: {:?}", err);
        }
    }
}

/// Takes every width queued since the last frame and keeps the newest.
pub fn latest_width(receiver: &mut UnboundedReceiver<f64>) -> Option<f64> {
    let mut latest = None;
    while let Ok(width) = receiver.try_recv() {
        latest = Some(width);
    }
    latest
}
