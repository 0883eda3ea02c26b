mod spin_up;

pub use spin_up::{SpinUp, SpinUpOptions, SpinUpSample};

pub trait Animatable {
    fn update(&mut self, delta_time: f64);
    fn is_finished(&self) -> bool;
    fn reset(&mut self);
    fn value(&self) -> f64;
}

/// Interpolates between two values over `duration` seconds.
#[derive(Clone, Debug)]
pub struct Tween {
    start_value: f64,
    end_value: f64,
    duration: f64,
    elapsed_time: f64,
    easing: fn(f64) -> f64,
}

impl Tween {
    pub fn new(start_value: f64, end_value: f64, duration: f64) -> Self {
        Self {
            start_value,
            end_value,
            duration: duration.max(0.0),
            elapsed_time: 0.0,
            easing: easing::linear,
        }
    }

    pub fn with_easing(mut self, easing: fn(f64) -> f64) -> Self {
        self.easing = easing;
        self
    }

    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed_time / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

impl Animatable for Tween {
    fn update(&mut self, delta_time: f64) {
        self.elapsed_time += delta_time.max(0.0);
        if self.elapsed_time > self.duration {
            self.elapsed_time = self.duration;
        }
    }

    fn is_finished(&self) -> bool {
        self.elapsed_time >= self.duration
    }

    fn reset(&mut self) {
        self.elapsed_time = 0.0;
    }

    fn value(&self) -> f64 {
        if self.is_finished() {
            return self.end_value;
        }
        let eased_t = (self.easing)(self.progress());
        self.start_value + (self.end_value - self.start_value) * eased_t
    }
}

pub mod easing {
    pub fn linear(t: f64) -> f64 { t }
    pub fn ease_out_quad(t: f64) -> f64 { t * (2.0 - t) }
    pub fn ease_out_cubic(t: f64) -> f64 {
        let inv = 1.0 - t;
        1.0 - inv * inv * inv
    }
}
