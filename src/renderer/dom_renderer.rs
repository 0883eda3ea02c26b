use web_sys::{Document, HtmlElement};

use super::{blur_filter, Renderer, ANCHOR_TOP_PX, BAND_MIN_HEIGHT_PX};
use crate::element::CardView;
use crate::error::CarouselError;
use crate::helper::{create_html_element, document, generate_id};
use crate::runtime::Frame;
use crate::sequence::ExtendedSequence;

/// Renders one absolutely positioned element per sequence slot, rotated
/// around a shared `transform-origin` below the band.
#[derive(Debug)]
pub struct DomRenderer {
    document: Document,
    host: HtmlElement,
    stage_id: String,
    stage: Option<HtmlElement>,
    band: Option<HtmlElement>,
    anchor: Option<HtmlElement>,
    cards: Vec<CardView>,
    opacity: Option<f64>,
    blur_px: Option<f64>,
}

impl DomRenderer {
    pub fn new(host: HtmlElement) -> Result<Self, CarouselError> {
        Ok(Self {
            document: document()?,
            host,
            stage_id: generate_id("wheel-stage"),
            stage: None,
            band: None,
            anchor: None,
            cards: Vec::new(),
            opacity: None,
            blur_px: None,
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn ensure_stage(&mut self) -> Result<HtmlElement, CarouselError> {
        if let Some(anchor) = &self.anchor {
            return Ok(anchor.clone());
        }

        let stage = create_html_element(&self.document, "div")?;
        stage.set_id(&self.stage_id);
        stage.set_class_name("wheel-stage");
        let style = stage.style();
        style.set_property("position", "relative")?;
        style.set_property("left", "50%")?;
        style.set_property("margin-left", "-50vw")?;
        style.set_property("width", "100vw")?;
        style.set_property("overflow", "hidden")?;
        style.set_property("padding", "96px 0")?;
        style.set_property("min-height", &format!("{}px", BAND_MIN_HEIGHT_PX))?;

        let band = create_html_element(&self.document, "div")?;
        band.set_class_name("wheel-band");
        let band_style = band.style();
        band_style.set_property("position", "relative")?;
        band_style.set_property("width", "100%")?;
        band_style.set_property("height", "100%")?;
        band_style.set_property("display", "flex")?;
        band_style.set_property("justify-content", "center")?;
        band_style.set_property("opacity", "0")?;

        let anchor = create_html_element(&self.document, "div")?;
        anchor.set_class_name("wheel-anchor");
        let anchor_style = anchor.style();
        anchor_style.set_property("position", "relative")?;
        anchor_style.set_property("width", "0")?;
        anchor_style.set_property("height", "0")?;
        anchor_style.set_property("top", &format!("{}px", ANCHOR_TOP_PX))?;

        band.append_child(&anchor)?;
        stage.append_child(&band)?;
        self.host.append_child(&stage)?;

        self.stage = Some(stage);
        self.band = Some(band);
        self.anchor = Some(anchor.clone());
        Ok(anchor)
    }

    fn apply_band_style(&mut self, frame: &Frame) -> Result<(), CarouselError> {
        let Some(band) = &self.band else {
            return Ok(());
        };
        let style = band.style();
        if self.opacity != Some(frame.opacity) {
            style.set_property("opacity", &format!("{:.3}", frame.opacity))?;
            self.opacity = Some(frame.opacity);
        }
        if self.blur_px != Some(frame.blur_px) {
            style.set_property("filter", &blur_filter(frame.blur_px))?;
            self.blur_px = Some(frame.blur_px);
        }
        Ok(())
    }

    fn clear_cards(&mut self) {
        for card in self.cards.drain(..) {
            card.remove();
        }
    }
}

impl Renderer for DomRenderer {
    fn mount(&mut self, sequence: &ExtendedSequence, frame: &Frame) -> Result<(), CarouselError> {
        let anchor = self.ensure_stage()?;
        self.clear_cards();

        for item in sequence.iter() {
            let card = CardView::new(&self.document, item, &frame.geometry)?;
            anchor.append_child(card.element())?;
            self.cards.push(card);
        }
        log::debug!(
            "mounted {} card slots into #{}",
            self.cards.len(),
            self.stage_id
        );
        self.draw(frame)
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), CarouselError> {
        self.apply_band_style(frame)?;
        for (card, placement) in self.cards.iter_mut().zip(frame.placements.iter()) {
            card.apply(placement);
            card.flush()?;
        }
        Ok(())
    }

    fn unmount(&mut self) {
        self.clear_cards();
        if let Some(stage) = self.stage.take() {
            stage.remove();
        }
        self.band = None;
        self.anchor = None;
        self.opacity = None;
        self.blur_px = None;
    }
}

impl Drop for DomRenderer {
    fn drop(&mut self) {
        self.unmount();
    }
}
