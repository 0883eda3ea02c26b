use serde::{Deserialize, Serialize};

use super::{easing, Animatable, Tween};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpinUpOptions {
    /// Degrees per frame when the wheel first appears.
    pub start_speed: f64,
    /// Degrees per frame once the entrance has settled.
    pub cruise_speed: f64,
    pub duration_secs: f64,
    /// Starting blur radius, eased to zero over `duration_secs`.
    pub blur_px: f64,
    pub fade_secs: f64,
}

impl Default for SpinUpOptions {
    fn default() -> Self {
        Self {
            start_speed: 1.6,
            cruise_speed: 0.02,
            duration_secs: 2.4,
            blur_px: 12.0,
            fade_secs: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinUpSample {
    pub speed: f64,
    pub blur_px: f64,
    pub opacity: f64,
    pub finished: bool,
}

/// Entrance animation: speed and blur decelerate together while the band
/// fades in.
#[derive(Clone, Debug)]
pub struct SpinUp {
    speed: Tween,
    blur: Tween,
    fade: Tween,
}

impl SpinUp {
    pub fn new(options: &SpinUpOptions) -> Self {
        Self {
            speed: Tween::new(options.start_speed, options.cruise_speed, options.duration_secs)
                .with_easing(easing::ease_out_cubic),
            blur: Tween::new(options.blur_px, 0.0, options.duration_secs)
                .with_easing(easing::ease_out_cubic),
            fade: Tween::new(0.0, 1.0, options.fade_secs).with_easing(easing::ease_out_quad),
        }
    }

    pub fn advance(&mut self, delta_time: f64) -> SpinUpSample {
        self.speed.update(delta_time);
        self.blur.update(delta_time);
        self.fade.update(delta_time);
        self.sample()
    }

    pub fn sample(&self) -> SpinUpSample {
        SpinUpSample {
            speed: self.speed.value(),
            blur_px: self.blur.value().max(0.0),
            opacity: self.fade.value().clamp(0.0, 1.0),
            finished: self.is_finished(),
        }
    }

    pub fn cruise_speed(&self) -> f64 {
        self.speed.end_value()
    }

    pub fn is_finished(&self) -> bool {
        self.speed.is_finished() && self.blur.is_finished() && self.fade.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_decelerates_to_cruise() {
        let options = SpinUpOptions::default();
        let mut spin_up = SpinUp::new(&options);

        let mut last = spin_up.sample().speed;
        assert_eq!(last, options.start_speed);
        for _ in 0..200 {
            let sample = spin_up.advance(1.0 / 60.0);
            assert!(sample.speed <= last);
            last = sample.speed;
        }
        let settled = spin_up.sample();
        assert!(settled.finished);
        assert_eq!(settled.speed, options.cruise_speed);
        assert_eq!(settled.blur_px, 0.0);
        assert_eq!(settled.opacity, 1.0);
    }

    #[test]
    fn fade_finishes_before_speed() {
        let mut spin_up = SpinUp::new(&SpinUpOptions::default());
        let sample = spin_up.advance(1.0);
        assert_eq!(sample.opacity, 1.0);
        assert!(!sample.finished);
    }
}
