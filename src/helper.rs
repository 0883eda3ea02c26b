use nalgebra as na;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use wasm_bindgen::JsCast;
use web_sys::js_sys::Function;
use web_sys::{Document, HtmlElement, Window};

use crate::error::CarouselError;

pub fn window() -> Result<Window, CarouselError> {
    web_sys::window().ok_or(CarouselError::NoWindow)
}

pub fn document() -> Result<Document, CarouselError> {
    window()?.document().ok_or(CarouselError::NoDocument)
}

pub fn get_element(element_id: &str) -> Result<HtmlElement, CarouselError> {
    document()?
        .get_element_by_id(element_id)
        .ok_or_else(|| CarouselError::ElementNotFound(element_id.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| CarouselError::Dom(format!("element '{}' is not an HTMLElement", element_id)))
}

pub fn create_html_element(document: &Document, tag: &str) -> Result<HtmlElement, CarouselError> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| CarouselError::Dom(format!("<{}> is not an HTMLElement", tag)))
}

/// Current layout viewport width in CSS pixels.
pub fn viewport_width() -> Result<f64, CarouselError> {
    window()?
        .inner_width()?
        .as_f64()
        .ok_or_else(|| CarouselError::Dom("innerWidth is not a number".to_string()))
}

pub fn request_animation_frame(f: &Function) -> Result<i32, CarouselError> {
    Ok(window()?.request_animation_frame(f)?)
}

pub fn cancel_animation_frame(handle: i32) -> Result<(), CarouselError> {
    Ok(window()?.cancel_animation_frame(handle)?)
}

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_id(prefix: &str) -> String {
    let random_part: u32 = rand::thread_rng().gen();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{:x}-{:x}", prefix, random_part, counter)
}

pub fn get_rotation_matrix(angle_radians: f64) -> na::Matrix3<f64> {
    const EPSILON: f64 = 1e-6;
    if angle_radians.abs() < EPSILON {
        let sin = angle_radians;
        let cos = 1.0 - 0.5 * angle_radians * angle_radians;
        na::Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0)
    } else {
        let (sin, cos) = angle_radians.sin_cos();
        na::Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0)
    }
}

/// Rotation by `angle_degrees` (clockwise in screen space) about `(px, py)`.
pub fn pivot_rotation(angle_degrees: f64, px: f64, py: f64) -> na::Matrix3<f64> {
    let to_pivot = na::Matrix3::new(1.0, 0.0, px, 0.0, 1.0, py, 0.0, 0.0, 1.0);
    let from_pivot = na::Matrix3::new(1.0, 0.0, -px, 0.0, 1.0, -py, 0.0, 0.0, 1.0);
    to_pivot * get_rotation_matrix(angle_degrees.to_radians()) * from_pivot
}

pub fn convert_3x3_to_1x6(matrix: na::Matrix3<f64>) -> na::Matrix1x6<f64> {
    na::Matrix1x6::new(
        matrix[(0, 0)],
        matrix[(1, 0)],
        matrix[(0, 1)],
        matrix[(1, 1)],
        matrix[(0, 2)],
        matrix[(1, 2)],
    )
}
