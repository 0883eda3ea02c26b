use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Upper bound on `duplication_count`; every repetition is one DOM slot per
/// source item.
pub const MAX_DUPLICATION_COUNT: usize = 64;

/// Shape of the virtual wheel. Replaced as a whole, never patched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryConfig {
    pub radius: f64,
    pub card_width: f64,
    pub gap: f64,
    pub duplication_count: usize,
}

impl GeometryConfig {
    pub const FULL: GeometryConfig = GeometryConfig {
        radius: 2025.0,
        card_width: 360.0,
        gap: 100.0,
        duplication_count: 16,
    };

    pub const COMPACT: GeometryConfig = GeometryConfig {
        radius: 1600.0,
        card_width: 280.0,
        gap: 80.0,
        duplication_count: 3,
    };

    pub fn validate(&self) -> Result<(), CarouselError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CarouselError::InvalidGeometry(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.card_width.is_finite() && self.card_width > 0.0) {
            return Err(CarouselError::InvalidGeometry(format!(
                "card width must be positive, got {}",
                self.card_width
            )));
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(CarouselError::InvalidGeometry(format!(
                "gap must not be negative, got {}",
                self.gap
            )));
        }
        if self.duplication_count == 0 || self.duplication_count > MAX_DUPLICATION_COUNT {
            return Err(CarouselError::InvalidGeometry(format!(
                "duplication count must be between 1 and {}, got {}",
                MAX_DUPLICATION_COUNT, self.duplication_count
            )));
        }
        Ok(())
    }

    /// Arc length one card occupies on the wheel's rim.
    pub fn footprint(&self) -> f64 {
        self.card_width + self.gap
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub min_width: f64,
    pub geometry: GeometryConfig,
    /// Constrained tiers skip the entrance blur.
    #[serde(default)]
    pub constrained: bool,
}

/// Ordered `{min_width, geometry}` lookup, widest first.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointTable {
    entries: Vec<Breakpoint>,
}

impl BreakpointTable {
    pub fn new(mut entries: Vec<Breakpoint>) -> Result<Self, CarouselError> {
        if entries.is_empty() {
            return Err(CarouselError::EmptyBreakpoints);
        }
        for entry in &entries {
            entry.geometry.validate()?;
        }
        entries.sort_by(|a, b| b.min_width.total_cmp(&a.min_width));
        Ok(Self { entries })
    }

    /// Index of the entry that applies to `width`. Widths below every
    /// `min_width` fall back to the narrowest entry.
    pub fn resolve_index(&self, width: f64) -> usize {
        self.entries
            .iter()
            .position(|entry| width >= entry.min_width)
            .unwrap_or(self.entries.len() - 1)
    }

    pub fn resolve(&self, width: f64) -> &Breakpoint {
        &self.entries[self.resolve_index(width)]
    }

    pub fn get(&self, index: usize) -> Option<&Breakpoint> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Breakpoint] {
        &self.entries
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            entries: default_breakpoints(),
        }
    }
}

pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint {
            min_width: 1024.0,
            geometry: GeometryConfig::FULL,
            constrained: false,
        },
        Breakpoint {
            min_width: 0.0,
            geometry: GeometryConfig::COMPACT,
            constrained: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_switches_at_1024() {
        let table = BreakpointTable::default();
        assert_eq!(table.resolve(1200.0).geometry, GeometryConfig::FULL);
        assert_eq!(table.resolve(1024.0).geometry, GeometryConfig::FULL);
        assert_eq!(table.resolve(1023.9).geometry, GeometryConfig::COMPACT);
        assert_eq!(table.resolve(800.0).geometry, GeometryConfig::COMPACT);
        assert!(table.resolve(800.0).constrained);
        assert!(!table.resolve(1200.0).constrained);
    }

    #[test]
    fn negative_width_falls_back_to_narrowest() {
        let table = BreakpointTable::default();
        assert_eq!(table.resolve(-5.0).geometry, GeometryConfig::COMPACT);
    }

    #[test]
    fn entries_are_sorted_widest_first() {
        let table = BreakpointTable::new(vec![
            Breakpoint {
                min_width: 0.0,
                geometry: GeometryConfig::COMPACT,
                constrained: true,
            },
            Breakpoint {
                min_width: 1440.0,
                geometry: GeometryConfig {
                    radius: 2400.0,
                    ..GeometryConfig::FULL
                },
                constrained: false,
            },
            Breakpoint {
                min_width: 1024.0,
                geometry: GeometryConfig::FULL,
                constrained: false,
            },
        ])
        .unwrap();

        assert_eq!(table.resolve(1500.0).geometry.radius, 2400.0);
        assert_eq!(table.resolve(1100.0).geometry, GeometryConfig::FULL);
        assert_eq!(table.resolve(500.0).geometry, GeometryConfig::COMPACT);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let bad = [
            GeometryConfig { radius: 0.0, ..GeometryConfig::FULL },
            GeometryConfig { card_width: -1.0, ..GeometryConfig::FULL },
            GeometryConfig { gap: -0.5, ..GeometryConfig::FULL },
            GeometryConfig { duplication_count: 0, ..GeometryConfig::FULL },
            GeometryConfig { duplication_count: MAX_DUPLICATION_COUNT + 1, ..GeometryConfig::FULL },
            GeometryConfig { duplication_count: usize::MAX, ..GeometryConfig::FULL },
            GeometryConfig { radius: f64::NAN, ..GeometryConfig::FULL },
        ];
        for geometry in bad {
            assert!(matches!(
                geometry.validate(),
                Err(CarouselError::InvalidGeometry(_))
            ));
        }
        assert!(GeometryConfig::FULL.validate().is_ok());
        assert!(GeometryConfig { gap: 0.0, ..GeometryConfig::COMPACT }.validate().is_ok());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(
            BreakpointTable::new(Vec::new()),
            Err(CarouselError::EmptyBreakpoints)
        ));
    }
}
