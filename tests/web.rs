#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::js_sys::Promise;
use web_sys::{HtmlCanvasElement, HtmlElement};

use wheel_carousel::element::build_card;
use wheel_carousel::renderer::{Canvas2DRenderer, DomRenderer, Renderer};
use wheel_carousel::{
    mount_carousel_json, CarouselOptions, CarouselRuntime, DisplayItem, GeometryConfig,
};

wasm_bindgen_test_configure!(run_in_browser);

fn host(id: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    host.set_id(id);
    document.body().unwrap().append_child(&host).unwrap();
    host
}

fn items(n: usize) -> Vec<DisplayItem> {
    (0..n)
        .map(|i| DisplayItem {
            title: format!("Card {}", i),
            tags: vec!["Branding".to_string()],
            image_ref: String::new(),
        })
        .collect()
}

#[wasm_bindgen_test]
fn dom_renderer_mounts_one_slot_per_sequence_entry() {
    let host = host("dom-renderer-host");
    let mut runtime = CarouselRuntime::new(items(5), &CarouselOptions::default(), 1200.0).unwrap();
    runtime.begin().unwrap();

    let mut renderer = DomRenderer::new(host.clone()).unwrap();
    renderer.mount(&runtime.sequence(), &runtime.frame()).unwrap();

    assert_eq!(renderer.card_count(), 80);
    let slots = host.query_selector_all(".wheel-slot").unwrap();
    assert_eq!(slots.length(), 80);

    let first = slots
        .item(0)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    let transform = first.style().get_property_value("transform").unwrap();
    assert!(transform.starts_with("rotate("), "transform was {}", transform);

    renderer.unmount();
    assert_eq!(host.query_selector_all(".wheel-slot").unwrap().length(), 0);
    assert!(host.first_child().is_none());
}

#[wasm_bindgen_test]
fn mount_into_missing_container_fails() {
    let result = mount_carousel_json("no-such-container", r#"[{"title":"A"}]"#, None);
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn unmount_removes_the_stage() {
    let host = host("mount-host");
    let mut handle = mount_carousel_json(
        "mount-host",
        r#"[{"title":"A","tags":["3D"]},{"title":"B","tags":[]}]"#,
        None,
    )
    .unwrap();
    assert!(handle.is_mounted());
    assert_eq!(handle.phase(), "spinning-up");
    assert!(host.first_child().is_some());

    handle.unmount();
    assert!(!handle.is_mounted());
    assert_eq!(handle.phase(), "torn-down");
    assert!(host.first_child().is_none());
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn card_for(id: &str, image_ref: &str) -> HtmlElement {
    let host = host(id);
    let document = web_sys::window().unwrap().document().unwrap();
    let item = DisplayItem {
        title: "Email Campaign".to_string(),
        tags: vec!["Email Marketing".to_string()],
        image_ref: image_ref.to_string(),
    };
    let card = build_card(&document, &item, &GeometryConfig::FULL).unwrap();
    host.append_child(&card).unwrap();
    card
}

fn fallback_text(card: &HtmlElement) -> Option<String> {
    card.query_selector(".wheel-card__fallback")
        .unwrap()
        .and_then(|label| label.text_content())
}

#[wasm_bindgen_test]
fn card_without_image_shows_its_title() {
    let card = card_for("card-no-image", "");
    assert!(card.query_selector("img").unwrap().is_none());
    assert_eq!(fallback_text(&card).as_deref(), Some("Email Campaign"));
}

#[wasm_bindgen_test]
async fn broken_image_is_replaced_by_its_title() {
    let card = card_for("card-broken-image", "data:image/png;base64,bm90LWFuLWltYWdl");
    assert!(card.query_selector("img").unwrap().is_some());

    for _ in 0..100 {
        if fallback_text(&card).is_some() {
            break;
        }
        sleep(20).await;
    }
    assert_eq!(fallback_text(&card).as_deref(), Some("Email Campaign"));
    assert!(card.query_selector("img").unwrap().is_none());
}

#[wasm_bindgen_test]
fn canvas_mount_draws_and_unmounts() {
    let host = host("canvas-mount-host");
    let mut handle = mount_carousel_json(
        "canvas-mount-host",
        r#"[{"title":"A","tags":["3D"]},{"title":"B","tags":["Webflow"]}]"#,
        Some(r#"{"renderer":"canvas"}"#.to_string()),
    )
    .unwrap();

    let canvas = host
        .query_selector("canvas.wheel-canvas")
        .unwrap()
        .expect("canvas mounted")
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    assert!(canvas.width() > 0);
    assert!(canvas.height() > 0);

    handle.unmount();
    assert!(host.first_child().is_none());
    assert_eq!(handle.phase(), "torn-down");
}

#[wasm_bindgen_test]
fn canvas_follows_host_width_between_breakpoints() {
    let host = host("canvas-resize-host");
    host.style().set_property("width", "600px").unwrap();
    let mut runtime = CarouselRuntime::new(items(3), &CarouselOptions::default(), 1300.0).unwrap();
    runtime.begin().unwrap();

    let mut renderer = Canvas2DRenderer::new(host.clone()).unwrap();
    renderer.mount(&runtime.sequence(), &runtime.frame()).unwrap();
    assert_eq!(renderer.css_width(), 600.0);

    host.style().set_property("width", "900px").unwrap();
    renderer.draw(&runtime.tick(1.0 / 60.0)).unwrap();
    assert_eq!(renderer.css_width(), 900.0);

    let canvas = host
        .query_selector("canvas")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    assert_eq!(canvas.style().get_property_value("width").unwrap(), "900px");

    renderer.unmount();
    assert!(host.first_child().is_none());
}
