use std::collections::HashMap;

use dirty_setter::Dirty;
use once_cell::sync::Lazy;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlElement, HtmlImageElement};

use super::StyleView;
use crate::error::CarouselError;
use crate::geometry::GeometryConfig;
use crate::helper::create_html_element;
use crate::sequence::DisplayItem;
use crate::wheel::ItemPlacement;

/// Cards are 7 wide by 9 tall.
const CARD_ASPECT: f64 = 9.0 / 7.0;
const IMAGE_SHARE: f64 = 0.58;

pub const FALLBACK_TAG_COLOR: &str = "rgba(107, 114, 128, 0.9)";

static TAG_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Email Marketing", "rgba(168, 85, 247, 0.9)"),
        ("Web Design", "rgba(59, 130, 246, 0.9)"),
        ("Development", "rgba(34, 197, 94, 0.9)"),
        ("UI/UX", "rgba(236, 72, 153, 0.9)"),
        ("React", "rgba(6, 182, 212, 0.9)"),
        ("Animation", "rgba(249, 115, 22, 0.9)"),
        ("Design", "rgba(99, 102, 241, 0.9)"),
        ("3D", "rgba(239, 68, 68, 0.9)"),
        ("Webflow", "rgba(20, 184, 166, 0.9)"),
        ("Interaction", "rgba(234, 179, 8, 0.9)"),
        ("JavaScript", "rgba(245, 158, 11, 0.9)"),
    ])
});

pub fn tag_color(tag: &str) -> &'static str {
    TAG_COLORS.get(tag).copied().unwrap_or(FALLBACK_TAG_COLOR)
}

pub fn card_height(card_width: f64) -> f64 {
    card_width * CARD_ASPECT
}

/// One slot on the wheel. Only rotation, stacking and visibility change per
/// frame; the card markup is built once.
#[derive(Debug, Dirty)]
pub struct CardView {
    slot: HtmlElement,
    #[dirty_setter]
    rotation: f64,
    #[dirty_setter]
    z_index: i32,
    #[dirty_setter]
    visible: bool,
    dirty: bool,
}

impl StyleView for CardView {
    fn set_dirty_flag(&mut self, is_dirty: bool) {
        self.dirty = is_dirty;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl CardView {
    pub fn new(
        document: &Document,
        item: &DisplayItem,
        geometry: &GeometryConfig,
    ) -> Result<Self, CarouselError> {
        let slot = create_html_element(document, "div")?;
        slot.set_class_name("wheel-slot");
        let style = slot.style();
        style.set_property("position", "absolute")?;
        style.set_property("top", "0px")?;
        style.set_property("width", &format!("{}px", geometry.card_width))?;
        style.set_property("left", &format!("-{}px", geometry.card_width / 2.0))?;
        style.set_property("transform-origin", &format!("50% {}px", geometry.radius))?;
        style.set_property("will-change", "transform")?;
        style.set_property("visibility", "hidden")?;

        let card = build_card(document, item, geometry)?;
        slot.append_child(&card)?;

        Ok(Self {
            slot,
            rotation: 0.0,
            z_index: 0,
            visible: false,
            dirty: true,
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.slot
    }

    pub fn apply(&mut self, placement: &ItemPlacement) {
        self.set_visible(placement.visible);
        if placement.visible {
            self.set_rotation(placement.angle_degrees);
            self.set_z_index(placement.z_order);
        }
    }

    /// Writes pending style changes to the slot element.
    pub fn flush(&mut self) -> Result<(), CarouselError> {
        if !self.is_dirty() {
            return Ok(());
        }
        let style = self.slot.style();
        if self.visible {
            style.set_property("visibility", "visible")?;
            style.set_property("transform", &format!("rotate({}deg)", self.rotation))?;
            style.set_property("z-index", &self.z_index.to_string())?;
        } else {
            style.set_property("visibility", "hidden")?;
        }
        self.set_dirty_flag(false);
        Ok(())
    }

    pub fn remove(&self) {
        self.slot.remove();
    }
}

/// Card markup: image (or its title when the image is unavailable), title
/// and tag chips.
pub fn build_card(
    document: &Document,
    item: &DisplayItem,
    geometry: &GeometryConfig,
) -> Result<HtmlElement, CarouselError> {
    let height = card_height(geometry.card_width);

    let card = create_html_element(document, "div")?;
    card.set_class_name("wheel-card");
    let style = card.style();
    style.set_property("position", "relative")?;
    style.set_property("display", "flex")?;
    style.set_property("flex-direction", "column")?;
    style.set_property("overflow", "hidden")?;
    style.set_property("box-sizing", "border-box")?;
    style.set_property("width", &format!("{}px", geometry.card_width))?;
    style.set_property("height", &format!("{}px", height))?;
    style.set_property("padding", "15px")?;
    style.set_property("border-radius", "16px")?;
    style.set_property("background", "#1a1a1a")?;
    style.set_property("box-shadow", "0 25px 50px -12px rgba(0, 0, 0, 0.25)")?;

    let frame = create_html_element(document, "div")?;
    frame.set_class_name("wheel-card__media");
    let frame_style = frame.style();
    frame_style.set_property("position", "relative")?;
    frame_style.set_property("width", "100%")?;
    frame_style.set_property("height", &format!("{}px", (height * IMAGE_SHARE).round()))?;
    frame_style.set_property("overflow", "hidden")?;
    frame_style.set_property("border-radius", "12px")?;
    frame_style.set_property("background", "rgba(255, 255, 255, 0.06)")?;
    card.append_child(&frame)?;

    if item.image_ref.is_empty() {
        let label = fallback_label(document, &item.title)?;
        frame.append_child(&label)?;
    } else {
        let image = HtmlImageElement::new()?;
        image.set_class_name("wheel-card__image");
        image.set_alt(&item.title);
        image.set_src(&item.image_ref);
        let image_style = image.style();
        image_style.set_property("width", "100%")?;
        image_style.set_property("height", "100%")?;
        image_style.set_property("object-fit", "cover")?;
        frame.append_child(&image)?;
        watch_image(document.clone(), image, item.title.clone());
    }

    let body = create_html_element(document, "div")?;
    body.set_class_name("wheel-card__body");
    body.style().set_property("padding-top", "16px")?;

    let title = create_html_element(document, "h3")?;
    title.set_class_name("wheel-card__title");
    title.set_text_content(Some(&item.title));
    let title_style = title.style();
    title_style.set_property("margin", "0 0 12px 0")?;
    title_style.set_property("color", "#ffffff")?;
    title_style.set_property("font-size", "18px")?;
    title_style.set_property("font-weight", "700")?;
    body.append_child(&title)?;

    let tags = create_html_element(document, "div")?;
    tags.set_class_name("wheel-card__tags");
    let tags_style = tags.style();
    tags_style.set_property("display", "flex")?;
    tags_style.set_property("flex-wrap", "wrap")?;
    tags_style.set_property("gap", "8px")?;
    for tag in &item.tags {
        let chip = create_html_element(document, "span")?;
        chip.set_class_name("wheel-card__tag");
        chip.set_text_content(Some(tag));
        let chip_style = chip.style();
        chip_style.set_property("border-radius", "9999px")?;
        chip_style.set_property("padding", "4px 12px")?;
        chip_style.set_property("font-size", "12px")?;
        chip_style.set_property("font-weight", "500")?;
        chip_style.set_property("color", "#ffffff")?;
        chip_style.set_property("background", tag_color(tag))?;
        tags.append_child(&chip)?;
    }
    body.append_child(&tags)?;
    card.append_child(&body)?;

    Ok(card)
}

fn fallback_label(document: &Document, title: &str) -> Result<HtmlElement, CarouselError> {
    let label = create_html_element(document, "span")?;
    label.set_class_name("wheel-card__fallback");
    label.set_text_content(Some(title));
    let style = label.style();
    style.set_property("display", "flex")?;
    style.set_property("align-items", "center")?;
    style.set_property("justify-content", "center")?;
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    style.set_property("color", "rgba(255, 255, 255, 0.7)")?;
    style.set_property("font-size", "14px")?;
    style.set_property("text-align", "center")?;
    Ok(label)
}

/// Swaps the image for its title once the browser reports it cannot be
/// decoded.
fn watch_image(document: Document, image: HtmlImageElement, title: String) {
    spawn_local(async move {
        if JsFuture::from(image.decode()).await.is_ok() {
            return;
        }
        log::warn!("image for '{}' failed to load, showing title instead", title);
        let swapped = fallback_label(&document, &title).and_then(|label| {
            image
                .replace_with_with_node_1(&label)
                .map_err(CarouselError::from)
        });
        if let Err(err) = swapped {
            log::warn!("image fallback for '{}' failed: {}", title, err);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_have_colours() {
        assert_eq!(tag_color("3D"), "rgba(239, 68, 68, 0.9)");
        assert_eq!(tag_color("Webflow"), "rgba(20, 184, 166, 0.9)");
        assert_eq!(tag_color("Unknown"), FALLBACK_TAG_COLOR);
        assert_eq!(tag_color(""), FALLBACK_TAG_COLOR);
    }

    #[test]
    fn card_height_follows_aspect() {
        assert!((card_height(280.0) - 360.0).abs() < 1e-9);
        assert!((card_height(360.0) - 462.857).abs() < 1e-3);
    }
}
