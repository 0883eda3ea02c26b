use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::mpsc::UnboundedReceiver;

use crate::error::CarouselError;
use crate::events::{CarouselEvent, EventData, EventManager, Listener, ListenerId};
use crate::renderer::Renderer;
use crate::runtime::{CarouselRuntime, Phase};
use crate::scheduler::FrameScheduler;
use crate::viewport::{latest_width, ViewportWatcher};

/// Binds a runtime to a scheduler, a renderer and a stream of viewport
/// widths, and owns their lifecycle.
#[derive(Debug)]
pub struct App {
    pub runtime: Rc<RefCell<CarouselRuntime>>,
    renderer: Rc<RefCell<Box<dyn Renderer>>>,
    scheduler: Box<dyn FrameScheduler>,
    widths: Rc<RefCell<UnboundedReceiver<f64>>>,
    events: Rc<EventManager>,
    viewport_watcher: Option<ViewportWatcher>,
    ready_pending: Rc<Cell<bool>>,
    mounted: bool,
}

impl App {
    pub fn new(
        runtime: CarouselRuntime,
        renderer: Box<dyn Renderer>,
        scheduler: Box<dyn FrameScheduler>,
        widths: UnboundedReceiver<f64>,
    ) -> Self {
        Self {
            runtime: Rc::new(RefCell::new(runtime)),
            renderer: Rc::new(RefCell::new(renderer)),
            scheduler,
            widths: Rc::new(RefCell::new(widths)),
            events: Rc::new(EventManager::new()),
            viewport_watcher: None,
            ready_pending: Rc::new(Cell::new(false)),
            mounted: false,
        }
    }

    /// Keeps the resize listener alive for as long as the carousel is mounted.
    pub fn with_viewport_watcher(mut self, watcher: ViewportWatcher) -> Self {
        self.viewport_watcher = Some(watcher);
        self
    }

    pub fn on(&self, event: CarouselEvent, callback: Listener) -> ListenerId {
        self.events.add_listener(event, callback)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn phase(&self) -> Phase {
        self.runtime.borrow().phase()
    }

    pub fn rotation(&self) -> f64 {
        self.runtime.borrow().rotation().global_rotation_degrees
    }

    /// Paints the first frame, starts the entrance and hands the frame
    /// callback to the scheduler. `Ready` fires on the first scheduled frame,
    /// so listeners added right after `mount` still receive it.
    pub fn mount(&mut self) -> Result<(), CarouselError> {
        if self.mounted {
            return Ok(());
        }
        if self.runtime.borrow().phase() == Phase::TornDown {
            return Err(CarouselError::TornDown);
        }

        {
            let runtime = self.runtime.borrow();
            let sequence = runtime.sequence();
            self.renderer
                .borrow_mut()
                .mount(&sequence, &runtime.frame())?;
            log::info!(
                "carousel mounted: {} items x{} ({} slots)",
                sequence.source_items().len(),
                sequence.duplication_count(),
                sequence.len()
            );
        }

        self.runtime.borrow_mut().begin()?;
        self.ready_pending.set(true);
        self.scheduler.start(self.frame_callback())?;
        self.mounted = true;
        Ok(())
    }

    /// Stops the frame callback, removes the resize listener and the
    /// rendered band. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.ready_pending.set(false);
        self.scheduler.stop();
        self.viewport_watcher.take();
        self.widths.borrow_mut().close();
        self.renderer.borrow_mut().unmount();
        self.runtime.borrow_mut().teardown();
        log::info!("carousel torn down");
        emit(&self.events, &self.runtime, CarouselEvent::Teardown);
        self.events.clear();
    }

    fn frame_callback(&self) -> Box<dyn FnMut(f64)> {
        let runtime = self.runtime.clone();
        let renderer = self.renderer.clone();
        let widths = self.widths.clone();
        let events = self.events.clone();
        let ready_pending = self.ready_pending.clone();

        Box::new(move |delta_time: f64| {
            let mut fired = Vec::new();
            if ready_pending.replace(false) {
                fired.push(CarouselEvent::Ready);
            }

            let pending_width = latest_width(&mut widths.borrow_mut());
            if let Some(width) = pending_width {
                let change = runtime.borrow_mut().resize(width);
                if let Some(change) = change {
                    log::debug!(
                        "viewport {}px: radius {} -> {}, x{} -> x{}",
                        change.viewport_width,
                        change.from.radius,
                        change.to.radius,
                        change.from.duplication_count,
                        change.to.duplication_count
                    );
                    let runtime = runtime.borrow();
                    if let Err(err) = renderer
                        .borrow_mut()
                        .mount(&runtime.sequence(), &runtime.frame())
                    {
                        log::error!("failed to rebuild carousel after resize: {}", err);
                    }
                    fired.push(CarouselEvent::Reconfigured);
                }
            }

            let (frame, settled) = {
                let mut runtime = runtime.borrow_mut();
                let before = runtime.phase();
                let frame = runtime.tick(delta_time);
                (frame, before == Phase::SpinningUp && runtime.phase() == Phase::Cruising)
            };
            if settled {
                log::info!("carousel spin-up complete");
                fired.push(CarouselEvent::SpinUpComplete);
            }

            if let Err(err) = renderer.borrow_mut().draw(&frame) {
                log::error!("failed to draw carousel frame: {}", err);
            }

            for event in fired {
                emit(&events, &runtime, event);
            }
        })
    }
}

fn emit(events: &EventManager, runtime: &Rc<RefCell<CarouselRuntime>>, event: CarouselEvent) {
    let data = {
        let runtime = runtime.borrow();
        EventData::new(
            event,
            runtime.phase(),
            runtime.rotation().global_rotation_degrees,
            *runtime.geometry(),
        )
    };
    events.trigger(&data);
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}
