mod canvas_2d_renderer;
mod dom_renderer;

use std::fmt::Debug;

pub use canvas_2d_renderer::Canvas2DRenderer;
pub use dom_renderer::DomRenderer;

use crate::error::CarouselError;
use crate::runtime::Frame;
use crate::sequence::ExtendedSequence;

/// Vertical offset of the cards' top anchor inside the band.
pub const ANCHOR_TOP_PX: f64 = 50.0;
pub const BAND_MIN_HEIGHT_PX: f64 = 1000.0;

/// Presentation side of the wheel. `mount` is called again after every
/// reconfiguration with the new sequence and geometry.
pub trait Renderer: Debug {
    fn mount(&mut self, sequence: &ExtendedSequence, frame: &Frame) -> Result<(), CarouselError>;
    fn draw(&mut self, frame: &Frame) -> Result<(), CarouselError>;
    fn unmount(&mut self);
}

pub fn blur_filter(blur_px: f64) -> String {
    if blur_px > 0.0 {
        format!("blur({:.2}px)", blur_px)
    } else {
        "none".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_filter_values() {
        assert_eq!(blur_filter(0.0), "none");
        assert_eq!(blur_filter(-1.0), "none");
        assert_eq!(blur_filter(12.0), "blur(12.00px)");
    }
}
