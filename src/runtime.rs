use std::rc::Rc;

use into_static_str::IntoStaticStr;
use serde::Serialize;

use crate::animation::{SpinUp, SpinUpOptions};
use crate::config::CarouselOptions;
use crate::error::CarouselError;
use crate::geometry::{BreakpointTable, GeometryConfig};
use crate::sequence::{DisplayItem, ExtendedSequence};
use crate::wheel::{ItemPlacement, WheelLayout};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Initializing,
    SpinningUp,
    Cruising,
    TornDown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub global_rotation_degrees: f64,
    pub current_angular_speed: f64,
}

impl RotationState {
    pub fn advance(&mut self) {
        self.global_rotation_degrees -= self.current_angular_speed;
    }
}

/// Everything a renderer needs for one paint.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub phase: Phase,
    pub rotation: f64,
    pub opacity: f64,
    pub blur_px: f64,
    pub geometry: GeometryConfig,
    pub placements: Vec<ItemPlacement>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reconfiguration {
    pub from: GeometryConfig,
    pub to: GeometryConfig,
    pub viewport_width: f64,
}

/// Owns rotation, entrance animation and the active geometry of one wheel.
///
/// The runtime never touches the host: it is driven by `tick` and `resize`
/// and answers with `Frame`s.
#[derive(Debug)]
pub struct CarouselRuntime {
    items: Rc<[DisplayItem]>,
    breakpoints: BreakpointTable,
    breakpoint_index: usize,
    layout: WheelLayout,
    rotation: RotationState,
    spin_up: SpinUp,
    spin_up_options: SpinUpOptions,
    visibility_threshold: f64,
    opacity: f64,
    blur_px: f64,
    phase: Phase,
}

impl CarouselRuntime {
    pub fn new(
        items: Vec<DisplayItem>,
        options: &CarouselOptions,
        viewport_width: f64,
    ) -> Result<Self, CarouselError> {
        let breakpoints = options.breakpoint_table()?;
        let breakpoint_index = breakpoints.resolve_index(viewport_width);
        let items: Rc<[DisplayItem]> = items.into();
        let geometry = breakpoints.entries()[breakpoint_index].geometry;
        let layout = WheelLayout::new(geometry, items.len(), options.visibility_threshold);
        let spin_up = SpinUp::new(&options.spin_up);

        Ok(Self {
            items,
            breakpoints,
            breakpoint_index,
            layout,
            rotation: RotationState {
                global_rotation_degrees: 0.0,
                current_angular_speed: options.spin_up.start_speed,
            },
            spin_up,
            spin_up_options: options.spin_up.clone(),
            visibility_threshold: options.visibility_threshold,
            opacity: 0.0,
            blur_px: 0.0,
            phase: Phase::Initializing,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn geometry(&self) -> &GeometryConfig {
        self.layout.geometry()
    }

    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    pub fn sequence(&self) -> ExtendedSequence {
        ExtendedSequence::new(self.items.clone(), self.geometry().duplication_count)
    }

    pub fn is_constrained(&self) -> bool {
        self.breakpoints
            .get(self.breakpoint_index)
            .map(|entry| entry.constrained)
            .unwrap_or(false)
    }

    /// Starts the entrance. Only valid from `Initializing`.
    pub fn begin(&mut self) -> Result<(), CarouselError> {
        match self.phase {
            Phase::Initializing => {
                self.spin_up = SpinUp::new(&self.spin_up_options);
                self.apply_spin_up_sample();
                self.phase = Phase::SpinningUp;
                Ok(())
            }
            Phase::TornDown => Err(CarouselError::TornDown),
            _ => Ok(()),
        }
    }

    /// Advances one animation frame and returns what to paint.
    pub fn tick(&mut self, delta_time: f64) -> Frame {
        match self.phase {
            Phase::SpinningUp => {
                self.spin_up.advance(delta_time);
                self.apply_spin_up_sample();
                self.rotation.advance();
                if self.spin_up.is_finished() {
                    self.rotation.current_angular_speed = self.spin_up.cruise_speed();
                    self.phase = Phase::Cruising;
                }
            }
            Phase::Cruising => self.rotation.advance(),
            Phase::Initializing | Phase::TornDown => {}
        }
        self.frame()
    }

    /// Swaps the geometry when `viewport_width` crosses into another
    /// breakpoint. Rotation is left untouched.
    pub fn resize(&mut self, viewport_width: f64) -> Option<Reconfiguration> {
        if self.phase == Phase::TornDown {
            return None;
        }
        let index = self.breakpoints.resolve_index(viewport_width);
        if index == self.breakpoint_index {
            return None;
        }
        let from = *self.geometry();
        let to = self.breakpoints.entries()[index].geometry;
        self.breakpoint_index = index;
        self.apply_geometry(to);
        if self.phase == Phase::SpinningUp {
            self.apply_spin_up_sample();
        }
        Some(Reconfiguration {
            from,
            to,
            viewport_width,
        })
    }

    /// Replaces the geometry outright, outside the breakpoint table.
    pub fn apply_geometry(&mut self, geometry: GeometryConfig) {
        self.layout = WheelLayout::new(geometry, self.items.len(), self.visibility_threshold);
    }

    pub fn teardown(&mut self) {
        self.rotation.current_angular_speed = 0.0;
        self.phase = Phase::TornDown;
    }

    pub fn placements(&self) -> Vec<ItemPlacement> {
        self.layout.layout(self.rotation.global_rotation_degrees)
    }

    pub fn frame(&self) -> Frame {
        Frame {
            phase: self.phase,
            rotation: self.rotation.global_rotation_degrees,
            opacity: self.opacity,
            blur_px: self.blur_px,
            geometry: *self.geometry(),
            placements: if self.phase == Phase::TornDown {
                Vec::new()
            } else {
                self.placements()
            },
        }
    }

    fn apply_spin_up_sample(&mut self) {
        let sample = self.spin_up.sample();
        self.rotation.current_angular_speed = sample.speed;
        self.opacity = sample.opacity;
        self.blur_px = if self.is_constrained() { 0.0 } else { sample.blur_px };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn items(n: usize) -> Vec<DisplayItem> {
        (0..n)
            .map(|i| DisplayItem {
                title: format!("Card {}", i),
                tags: vec!["3D".to_string(), "Webflow".to_string()],
                image_ref: format!("https://example.test/{}.jpg", i),
            })
            .collect()
    }

    fn runtime(width: f64) -> CarouselRuntime {
        CarouselRuntime::new(items(5), &CarouselOptions::default(), width).unwrap()
    }

    #[test]
    fn starts_hidden_and_still() {
        let mut runtime = runtime(1200.0);
        assert_eq!(runtime.phase(), Phase::Initializing);
        let frame = runtime.tick(FRAME);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.rotation, 0.0);
        assert_eq!(frame.placements.len(), 80);
    }

    #[test]
    fn spins_up_then_cruises() {
        let mut runtime = runtime(1200.0);
        runtime.begin().unwrap();
        assert_eq!(runtime.phase(), Phase::SpinningUp);

        let first = runtime.tick(FRAME);
        assert!(first.blur_px > 0.0);
        assert!(first.rotation < 0.0);

        let mut last_speed = runtime.rotation().current_angular_speed;
        let mut frames = 0;
        while runtime.phase() == Phase::SpinningUp {
            runtime.tick(FRAME);
            let speed = runtime.rotation().current_angular_speed;
            assert!(speed <= last_speed);
            last_speed = speed;
            frames += 1;
            assert!(frames < 10_000);
        }
        assert_eq!(runtime.phase(), Phase::Cruising);
        assert_eq!(
            runtime.rotation().current_angular_speed,
            SpinUpOptions::default().cruise_speed
        );

        let before = runtime.rotation().global_rotation_degrees;
        let frame = runtime.tick(FRAME);
        assert!((before - frame.rotation - SpinUpOptions::default().cruise_speed).abs() < 1e-12);
        assert_eq!(frame.opacity, 1.0);
        assert_eq!(frame.blur_px, 0.0);
    }

    #[test]
    fn constrained_tier_never_blurs() {
        let mut runtime = runtime(800.0);
        assert!(runtime.is_constrained());
        runtime.begin().unwrap();
        for _ in 0..30 {
            assert_eq!(runtime.tick(FRAME).blur_px, 0.0);
        }
    }

    #[test]
    fn resize_across_breakpoint_keeps_rotation() {
        let mut runtime = runtime(1200.0);
        runtime.begin().unwrap();
        for _ in 0..90 {
            runtime.tick(FRAME);
        }
        let rotation = runtime.rotation().global_rotation_degrees;
        assert_eq!(*runtime.geometry(), GeometryConfig::FULL);

        let change = runtime.resize(800.0).expect("breakpoint crossed");
        assert_eq!(change.from, GeometryConfig::FULL);
        assert_eq!(change.to, GeometryConfig::COMPACT);
        assert_eq!(runtime.geometry().radius, 1600.0);
        assert_eq!(runtime.geometry().card_width, 280.0);
        assert_eq!(runtime.geometry().gap, 80.0);
        assert_eq!(runtime.sequence().duplication_count(), 3);
        assert_eq!(runtime.rotation().global_rotation_degrees, rotation);
        assert_eq!(runtime.frame().placements.len(), 15);
        assert_eq!(runtime.phase(), Phase::SpinningUp);
    }

    #[test]
    fn resize_within_tier_is_a_no_op() {
        let mut runtime = runtime(1200.0);
        assert!(runtime.resize(1600.0).is_none());
        assert!(runtime.resize(1024.0).is_none());
        assert!(runtime.resize(900.0).is_some());
        assert!(runtime.resize(700.0).is_none());
    }

    #[test]
    fn reapplying_geometry_is_idempotent() {
        let mut runtime = runtime(1200.0);
        runtime.begin().unwrap();
        for _ in 0..12 {
            runtime.tick(FRAME);
        }
        runtime.apply_geometry(GeometryConfig::COMPACT);
        let once = runtime.placements();
        runtime.apply_geometry(GeometryConfig::COMPACT);
        assert_eq!(once, runtime.placements());
    }

    #[test]
    fn zero_speed_freezes_angles() {
        let mut options = CarouselOptions::default();
        options.spin_up.start_speed = 0.0;
        options.spin_up.cruise_speed = 0.0;
        let mut runtime = CarouselRuntime::new(items(4), &options, 1300.0).unwrap();
        runtime.begin().unwrap();
        let first = runtime.tick(FRAME).placements;
        for _ in 0..500 {
            assert_eq!(runtime.tick(FRAME).placements, first);
        }
        assert_eq!(runtime.phase(), Phase::Cruising);
    }

    #[test]
    fn oversized_duplication_is_rejected_before_layout() {
        let mut options = CarouselOptions::default();
        options.breakpoints[0].geometry.duplication_count = usize::MAX;
        assert!(matches!(
            CarouselRuntime::new(items(5), &options, 1200.0),
            Err(CarouselError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn empty_items_render_nothing() {
        let mut runtime = CarouselRuntime::new(Vec::new(), &CarouselOptions::default(), 1200.0)
            .unwrap();
        runtime.begin().unwrap();
        let frame = runtime.tick(FRAME);
        assert!(frame.placements.is_empty());
        assert!(frame.rotation.is_finite());
    }

    #[test]
    fn teardown_stops_motion() {
        let mut runtime = runtime(1200.0);
        runtime.begin().unwrap();
        runtime.tick(FRAME);
        runtime.teardown();
        let rotation = runtime.rotation().global_rotation_degrees;
        let frame = runtime.tick(FRAME);
        assert_eq!(frame.phase, Phase::TornDown);
        assert_eq!(frame.rotation, rotation);
        assert!(frame.placements.is_empty());
        assert!(runtime.resize(500.0).is_none());
        assert!(matches!(runtime.begin(), Err(CarouselError::TornDown)));
    }

    #[test]
    fn phase_names_are_kebab_case() {
        assert_eq!(Phase::SpinningUp.as_str(), "spinning-up");
        assert_eq!(Phase::TornDown.as_str(), "torn-down");
        let name: &'static str = Phase::Cruising.into();
        assert_eq!(name, "cruising");
        assert_eq!(Phase::from_static_str("initializing"), Some(Phase::Initializing));
    }
}
