use nalgebra as na;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement};

use super::{blur_filter, Renderer, ANCHOR_TOP_PX, BAND_MIN_HEIGHT_PX};
use crate::element::{card_height, tag_color};
use crate::error::CarouselError;
use crate::geometry::GeometryConfig;
use crate::helper::{convert_3x3_to_1x6, create_html_element, document, viewport_width, window};
use crate::runtime::Frame;
use crate::sequence::{DisplayItem, ExtendedSequence};
use crate::wheel::ItemPlacement;

const CARD_PADDING: f64 = 15.0;
const IMAGE_SHARE: f64 = 0.58;

/// Paints the wheel into a single canvas. Each card is drawn in its own
/// coordinate space obtained from the pivot rotation matrix.
pub struct Canvas2DRenderer {
    host: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    items: Vec<DisplayItem>,
    images: Vec<Option<HtmlImageElement>>,
    css_width: f64,
    css_height: f64,
    dpr: f64,
    blur_px: Option<f64>,
}

impl std::fmt::Debug for Canvas2DRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Canvas2DRenderer {{ items: {}, size: {}x{} @{} }}",
            self.items.len(),
            self.css_width,
            self.css_height,
            self.dpr
        )
    }
}

impl Canvas2DRenderer {
    pub fn new(host: HtmlElement) -> Result<Self, CarouselError> {
        let document = document()?;
        let canvas = create_html_element(&document, "canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| CarouselError::Dom("<canvas> is not an HTMLCanvasElement".to_string()))?;
        canvas.set_class_name("wheel-canvas");
        let style = canvas.style();
        style.set_property("display", "block")?;
        style.set_property("opacity", "1")?;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| CarouselError::Dom("Failed to get 2D context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| CarouselError::Dom("context is not 2d".to_string()))?;

        Ok(Self {
            host,
            canvas,
            context,
            items: Vec::new(),
            images: Vec::new(),
            css_width: 0.0,
            css_height: BAND_MIN_HEIGHT_PX,
            dpr: 1.0,
            blur_px: None,
        })
    }

    /// Width of the band in CSS pixels.
    pub fn css_width(&self) -> f64 {
        self.css_width
    }

    /// Host width and device pixel ratio as currently laid out.
    fn measure(&self) -> Result<(f64, f64), CarouselError> {
        let host_width = self.host.client_width() as f64;
        let css_width = if host_width > 0.0 {
            host_width
        } else {
            viewport_width()?
        };
        Ok((css_width, window()?.device_pixel_ratio().max(1.0)))
    }

    fn resize_canvas(&mut self) -> Result<(), CarouselError> {
        let (css_width, dpr) = self.measure()?;
        self.css_width = css_width;
        self.dpr = dpr;

        self.canvas.set_width((self.css_width * self.dpr) as u32);
        self.canvas.set_height((self.css_height * self.dpr) as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", self.css_width))?;
        style.set_property("height", &format!("{}px", self.css_height))?;
        Ok(())
    }

    fn load_images(&mut self, items: &[DisplayItem]) -> Result<(), CarouselError> {
        let mut images = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let reusable = self
                .items
                .get(index)
                .filter(|previous| previous.image_ref == item.image_ref)
                .and_then(|_| self.images.get(index).cloned().flatten());
            let image = match reusable {
                Some(image) => Some(image),
                None if item.image_ref.is_empty() => None,
                None => {
                    let image = HtmlImageElement::new()?;
                    image.set_src(&item.image_ref);
                    Some(image)
                }
            };
            images.push(image);
        }
        self.items = items.to_vec();
        self.images = images;
        Ok(())
    }

    fn set_fill(&self, color: &str) {
        self.context.set_fill_style_str(color);
    }

    fn draw_card(
        &self,
        placement: &ItemPlacement,
        geometry: &GeometryConfig,
    ) -> Result<(), CarouselError> {
        let Some(item) = self.items.get(placement.source_index) else {
            return Ok(());
        };
        let width = geometry.card_width;
        let height = card_height(width);
        let x = -width / 2.0;
        let y = 0.0;

        self.set_fill("#1a1a1a");
        self.context.fill_rect(x, y, width, height);

        let media_width = width - CARD_PADDING * 2.0;
        let media_height = (height * IMAGE_SHARE).round();
        let media_x = x + CARD_PADDING;
        let media_y = y + CARD_PADDING;

        let image = self
            .images
            .get(placement.source_index)
            .and_then(|image| image.as_ref())
            .filter(|image| image.complete() && image.natural_width() > 0);

        match image {
            Some(image) => {
                self.context.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    media_x,
                    media_y,
                    media_width,
                    media_height,
                )?;
            }
            None => {
                self.set_fill("rgba(255, 255, 255, 0.06)");
                self.context.fill_rect(media_x, media_y, media_width, media_height);
                self.set_fill("rgba(255, 255, 255, 0.7)");
                self.context.set_font("14px sans-serif");
                self.context.set_text_align("center");
                self.context.set_text_baseline("middle");
                self.context.fill_text(
                    &item.title,
                    media_x + media_width / 2.0,
                    media_y + media_height / 2.0,
                )?;
            }
        }

        let title_y = media_y + media_height + 16.0;
        self.set_fill("#ffffff");
        self.context.set_font("700 18px sans-serif");
        self.context.set_text_align("left");
        self.context.set_text_baseline("top");
        self.context.fill_text(&item.title, media_x, title_y)?;

        self.context.set_font("500 12px sans-serif");
        let mut chip_x = media_x;
        let mut chip_y = title_y + 18.0 + 12.0;
        for tag in &item.tags {
            let text_width = self.context.measure_text(tag)?.width();
            let chip_width = text_width + 24.0;
            if chip_x + chip_width > media_x + media_width && chip_x > media_x {
                chip_x = media_x;
                chip_y += 28.0;
            }
            self.set_fill(tag_color(tag));
            self.context.fill_rect(chip_x, chip_y, chip_width, 22.0);
            self.set_fill("#ffffff");
            self.context.fill_text(tag, chip_x + 12.0, chip_y + 5.0)?;
            chip_x += chip_width + 8.0;
        }
        Ok(())
    }
}

impl Renderer for Canvas2DRenderer {
    fn mount(&mut self, sequence: &ExtendedSequence, frame: &Frame) -> Result<(), CarouselError> {
        if self.canvas.parent_node().is_none() {
            self.host.append_child(&self.canvas)?;
        }
        self.resize_canvas()?;
        self.load_images(sequence.source_items())?;
        log::debug!(
            "canvas mounted for {} slots at {}x{}",
            sequence.len(),
            self.css_width,
            self.css_height
        );
        self.draw(frame)
    }

    fn draw(&mut self, frame: &Frame) -> Result<(), CarouselError> {
        // the band follows the viewport even when no breakpoint is crossed
        let (css_width, dpr) = self.measure()?;
        if css_width != self.css_width || dpr != self.dpr {
            self.resize_canvas()?;
        }

        self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        if self.blur_px != Some(frame.blur_px) {
            self.canvas
                .style()
                .set_property("filter", &blur_filter(frame.blur_px))?;
            self.blur_px = Some(frame.blur_px);
        }
        self.context.set_global_alpha(frame.opacity.clamp(0.0, 1.0));

        let mut visible: Vec<&ItemPlacement> =
            frame.placements.iter().filter(|p| p.visible).collect();
        visible.sort_by_key(|p| p.z_order);

        let scale = na::Matrix3::new(self.dpr, 0.0, 0.0, 0.0, self.dpr, 0.0, 0.0, 0.0, 1.0);
        let anchor_x = self.css_width / 2.0;
        for placement in visible {
            // card space: x centred on the anchor, y from the card's top edge
            let to_anchor = na::Matrix3::new(1.0, 0.0, anchor_x, 0.0, 1.0, ANCHOR_TOP_PX, 0.0, 0.0, 1.0);
            let matrix = scale
                * placement.transform(anchor_x, ANCHOR_TOP_PX, frame.geometry.radius)
                * to_anchor;
            let m = convert_3x3_to_1x6(matrix);
            self.context.set_transform(m[0], m[1], m[2], m[3], m[4], m[5])?;
            self.draw_card(placement, &frame.geometry)?;
        }
        Ok(())
    }

    fn unmount(&mut self) {
        self.canvas.remove();
        self.items.clear();
        self.images.clear();
        self.blur_px = None;
    }
}

impl Drop for Canvas2DRenderer {
    fn drop(&mut self) {
        self.unmount();
    }
}
