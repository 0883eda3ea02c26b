use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use wasm_timer::Instant;

use crate::error::CarouselError;
use crate::helper::{cancel_animation_frame, request_animation_frame};

/// Called once per frame with the seconds elapsed since the previous call.
pub type FrameCallback = Box<dyn FnMut(f64)>;

/// Drives a carousel's frame callback. One scheduler serves one carousel;
/// `stop` is final for the registered callback.
pub trait FrameScheduler: Debug {
    fn start(&mut self, on_frame: FrameCallback) -> Result<(), CarouselError>;
    fn stop(&mut self);
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame`-backed scheduler.
#[derive(Default)]
pub struct RafScheduler {
    frame: Rc<RefCell<Option<FrameClosure>>>,
    handle: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
    in_frame: Rc<Cell<bool>>,
}

impl Debug for RafScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RafScheduler {{ running: {}, handle: {:?} }}",
            self.running.get(),
            self.handle.get()
        )
    }
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule(
        frame: &Rc<RefCell<Option<FrameClosure>>>,
        handle: &Rc<Cell<Option<i32>>>,
    ) -> Result<(), CarouselError> {
        if let Some(closure) = frame.borrow().as_ref() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref())?;
            handle.set(Some(id));
        }
        Ok(())
    }
}

impl FrameScheduler for RafScheduler {
    fn start(&mut self, mut on_frame: FrameCallback) -> Result<(), CarouselError> {
        if self.running.get() {
            return Err(CarouselError::AlreadyRunning);
        }

        let frame = self.frame.clone();
        let handle = self.handle.clone();
        let running = self.running.clone();
        let in_frame = self.in_frame.clone();
        let mut last_frame = Instant::now();

        let closure = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            handle.set(None);
            if !running.get() {
                return;
            }
            let now = Instant::now();
            let delta = (now - last_frame).as_secs_f64();
            last_frame = now;

            in_frame.set(true);
            on_frame(delta);
            in_frame.set(false);

            if running.get() {
                if let Err(err) = RafScheduler::schedule(&frame, &handle) {
                    log::error!("failed to request animation frame: {}", err);
                    running.set(false);
                }
            }
        });

        *self.frame.borrow_mut() = Some(closure);
        self.running.set(true);
        if let Err(err) = Self::schedule(&self.frame, &self.handle) {
            self.running.set(false);
            self.frame.borrow_mut().take();
            return Err(err);
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Err(err) = cancel_animation_frame(id) {
                log::warn!("failed to cancel animation frame {}: {}", id, err);
            }
        }
        // The closure cannot be dropped while it is executing.
        if let Some(closure) = self.frame.borrow_mut().take() {
            if self.in_frame.get() {
                spawn_local(async move { drop(closure) });
            }
        }
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        if self.running.get() || self.frame.borrow().is_some() {
            self.stop();
        }
    }
}
