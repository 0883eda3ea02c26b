pub mod animation;
mod app;
pub mod config;
pub mod element;
pub mod error;
pub mod events;
pub mod geometry;
mod helper;
pub mod renderer;
pub mod runtime;
pub mod scheduler;
pub mod sequence;
pub mod viewport;
pub mod wheel;

pub use app::App;
pub use config::{CarouselOptions, RendererKind};
pub use error::CarouselError;
pub use geometry::{Breakpoint, BreakpointTable, GeometryConfig};
pub use runtime::{CarouselRuntime, Frame, Phase, RotationState};
pub use sequence::{DisplayItem, ExtendedSequence};
pub use wheel::{compute_angle_step, is_visible, wrap_angle, z_order, ItemPlacement, WheelLayout};

use std::rc::Rc;

use log::Level;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Function;

use events::{CarouselEvent, EventData};
use helper::{get_element, viewport_width};
use renderer::{Canvas2DRenderer, DomRenderer, Renderer};
use scheduler::RafScheduler;
use viewport::ViewportWatcher;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // a second module instance on the page already installed the logger
    let _ = console_log::init_with_level(Level::Info);
}

/// A mounted carousel. Dropping or `free()`-ing the handle unmounts it.
#[wasm_bindgen]
#[derive(Debug)]
pub struct CarouselHandle {
    app: App,
}

#[wasm_bindgen]
impl CarouselHandle {
    /// Subscribes `callback` to `ready`, `spin-up-complete`, `reconfigured`
    /// or `teardown`. The callback receives the event data as a plain object.
    /// Returns an id for `off`.
    pub fn on(&self, event_name: &str, callback: Function) -> Result<u32, JsValue> {
        let event = CarouselEvent::from_static_str(event_name).ok_or_else(|| {
            JsValue::from(CarouselError::InvalidOptions(format!(
                "unknown event: {}",
                event_name
            )))
        })?;
        let id = self.app.on(
            event,
            Rc::new(move |data: &EventData| {
                let payload = match serde_wasm_bindgen::to_value(data) {
                    Ok(payload) => payload,
                    Err(err) => {
                        log::error!("failed to encode {} event: {}", data.event_type, err);
                        return;
                    }
                };
                if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                    log::error!("{} listener threw: {:?}", data.event_type, err);
                }
            }),
        );
        Ok(id.into())
    }

    /// Removes a listener added with `on`. Returns whether it was registered.
    pub fn off(&self, listener_id: u32) -> bool {
        self.app.off(listener_id.into())
    }

    pub fn unmount(&mut self) {
        self.app.unmount();
    }

    pub fn rotation(&self) -> f64 {
        self.app.rotation()
    }

    pub fn phase(&self) -> String {
        self.app.phase().as_str().to_string()
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.app.is_mounted()
    }
}

/// Mounts a carousel into the element `container_id`. `items` is an array of
/// `{ title, tags, imageRef }`; `options` may be omitted.
#[wasm_bindgen]
pub fn mount_carousel(
    container_id: &str,
    items: JsValue,
    options: JsValue,
) -> Result<CarouselHandle, JsValue> {
    let items: Vec<DisplayItem> =
        serde_wasm_bindgen::from_value(items).map_err(CarouselError::from)?;
    let options = CarouselOptions::from_js(options)?;
    Ok(CarouselHandle {
        app: mount(container_id, items, options)?,
    })
}

#[wasm_bindgen]
pub fn mount_carousel_json(
    container_id: &str,
    items_json: &str,
    options_json: Option<String>,
) -> Result<CarouselHandle, JsValue> {
    let items: Vec<DisplayItem> = serde_json::from_str(items_json).map_err(CarouselError::from)?;
    let options = match options_json {
        Some(json) => CarouselOptions::from_json(&json)?,
        None => CarouselOptions::default(),
    };
    Ok(CarouselHandle {
        app: mount(container_id, items, options)?,
    })
}

pub fn mount(
    container_id: &str,
    items: Vec<DisplayItem>,
    options: CarouselOptions,
) -> Result<App, CarouselError> {
    let host = get_element(container_id)?;
    let runtime = CarouselRuntime::new(items, &options, viewport_width()?)?;

    let renderer: Box<dyn Renderer> = match options.renderer {
        RendererKind::Dom => Box::new(DomRenderer::new(host)?),
        RendererKind::Canvas => Box::new(Canvas2DRenderer::new(host)?),
    };
    let (watcher, widths) = ViewportWatcher::attach()?;

    let mut app = App::new(runtime, renderer, Box::new(RafScheduler::new()), widths)
        .with_viewport_watcher(watcher);
    app.mount()?;
    Ok(app)
}
