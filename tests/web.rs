// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use carrot_field::game::{FieldBounds, ItemKind, ItemPlacement};
use carrot_field::web::sound::playback_started;
use carrot_field::web::view::{GameView, item_kind_of};
use carrot_field::web::{mount, set_stop_listener};
use carrot_field::{AssetPaths, GameBuilder, GameError, StopReason};
use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
<header class="game__header">
  <button class="game__button"><i class="fas fa-play"></i></button>
  <span class="game__timer">0:0</span>
  <span class="game__score">0</span>
</header>
<section class="game__field" style="position:relative; width:400px; height:200px;"></section>
<section class="pop-up" style="visibility:hidden">
  <button class="pop-up__refresh"></button>
  <span class="pop-up__message"></span>
</section>
"#;

fn page() -> Document {
    let doc = web_sys::window().unwrap().document().unwrap();
    doc.body().unwrap().set_inner_html(PAGE);
    doc
}

fn visibility(doc: &Document, selector: &str) -> String {
    let el: HtmlElement = doc.query_selector(selector).unwrap().unwrap().dyn_into().unwrap();
    el.style().get_property_value("visibility").unwrap()
}

#[wasm_bindgen_test]
fn attach_requires_every_element() {
    let doc = page();
    doc.query_selector(".pop-up__message").unwrap().unwrap().remove();
    match GameView::attach(&doc) {
        Err(GameError::MissingElement(sel)) => assert_eq!(sel, ".pop-up__message"),
        _ => panic!("expected missing element"),
    }
}

#[wasm_bindgen_test]
fn button_icon_and_visibility_toggle() {
    let doc = page();
    let view = GameView::attach(&doc).unwrap();
    view.show_stop_button().unwrap();
    assert!(doc.query_selector(".fa-stop").unwrap().is_some());
    assert!(doc.query_selector(".fa-play").unwrap().is_none());
    assert_eq!(visibility(&doc, ".game__button"), "visible");

    view.hide_game_button().unwrap();
    view.show_start_button().unwrap();
    assert!(doc.query_selector(".fa-play").unwrap().is_some());
    assert_eq!(visibility(&doc, ".game__button"), "hidden");
}

#[wasm_bindgen_test]
fn pop_up_shows_banner() {
    let doc = page();
    let view = GameView::attach(&doc).unwrap();
    view.show_pop_up("YOU WON").unwrap();
    assert_eq!(visibility(&doc, ".pop-up"), "visible");
    let msg: HtmlElement = doc
        .query_selector(".pop-up__message")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(msg.inner_text(), "YOU WON");
    view.hide_pop_up().unwrap();
    assert_eq!(visibility(&doc, ".pop-up"), "hidden");
}

#[wasm_bindgen_test]
fn reset_field_replaces_items() {
    let doc = page();
    let view = GameView::attach(&doc).unwrap();
    assert_eq!(
        view.field_bounds(),
        FieldBounds {
            width: 400.0,
            height: 200.0
        }
    );
    let items = [
        ItemPlacement {
            kind: ItemKind::Carrot,
            x: 10.0,
            y: 20.0,
        },
        ItemPlacement {
            kind: ItemKind::Bug,
            x: 30.0,
            y: 40.0,
        },
    ];
    let assets = AssetPaths::default();
    view.reset_field(&items, &assets).unwrap();
    view.reset_field(&items, &assets).unwrap();
    assert_eq!(doc.query_selector_all(".game__field img").unwrap().length(), 2);

    let carrot = doc.query_selector(".carrot").unwrap().unwrap();
    assert_eq!(item_kind_of(&carrot), Some(ItemKind::Carrot));
    assert_eq!(carrot.get_attribute("src").as_deref(), Some("img/carrot.png"));
    let field = doc.query_selector(".game__field").unwrap().unwrap();
    assert_eq!(item_kind_of(&field), None);
}

#[wasm_bindgen_test]
fn timer_and_score_text() {
    let doc = page();
    let view = GameView::attach(&doc).unwrap();
    view.update_timer(65);
    view.update_score(3);
    view.show_timer_and_score().unwrap();
    let timer: HtmlElement = doc.query_selector(".game__timer").unwrap().unwrap().dyn_into().unwrap();
    assert_eq!(timer.inner_text(), "1:5");
    assert_eq!(visibility(&doc, ".game__score"), "visible");
}

// --- Mounted game, driven through real clicks -------------------------------

fn click(doc: &Document, selector: &str) {
    let el: HtmlElement = doc.query_selector(selector).unwrap().unwrap().dyn_into().unwrap();
    el.click();
}

fn count(doc: &Document, selector: &str) -> u32 {
    doc.query_selector_all(selector).unwrap().length()
}

fn text(doc: &Document, selector: &str) -> String {
    doc.query_selector(selector)
        .unwrap()
        .unwrap()
        .text_content()
        .unwrap_or_default()
}

fn mount_small(carrots: u32, bugs: u32) -> Document {
    let doc = page();
    let cfg = GameBuilder::new()
        .carrot_count(carrots)
        .bug_count(bugs)
        .item_size(40.0)
        .build()
        .unwrap();
    mount(cfg).unwrap();
    doc
}

#[wasm_bindgen_test]
fn button_starts_round() {
    let doc = mount_small(3, 2);
    click(&doc, ".game__button");
    assert_eq!(count(&doc, ".game__field .carrot"), 3);
    assert_eq!(count(&doc, ".game__field .bug"), 2);
    assert_eq!(text(&doc, ".game__score"), "3");
    assert_eq!(text(&doc, ".game__timer"), "0:10");
    assert_eq!(visibility(&doc, ".pop-up"), "hidden");
    assert_eq!(visibility(&doc, ".game__button"), "visible");
    assert!(doc.query_selector(".game__button .fa-stop").unwrap().is_some());
}

#[wasm_bindgen_test]
fn pulling_carrots_counts_down_then_wins() {
    let doc = mount_small(2, 1);
    click(&doc, ".game__button");
    click(&doc, ".carrot");
    assert_eq!(count(&doc, ".carrot"), 1);
    assert_eq!(text(&doc, ".game__score"), "1");

    click(&doc, ".carrot");
    assert_eq!(count(&doc, ".carrot"), 0);
    assert_eq!(text(&doc, ".pop-up__message"), "YOU WON");
    assert_eq!(visibility(&doc, ".pop-up"), "visible");
    assert_eq!(visibility(&doc, ".game__button"), "hidden");
    assert!(doc.query_selector(".game__button .fa-play").unwrap().is_some());
}

#[wasm_bindgen_test]
fn bug_ends_round_and_later_clicks_are_ignored() {
    let doc = mount_small(2, 1);
    click(&doc, ".game__button");
    click(&doc, ".bug");
    assert_eq!(text(&doc, ".pop-up__message"), "YOU LOST");
    click(&doc, ".carrot");
    assert_eq!(count(&doc, ".carrot"), 2);
    assert_eq!(text(&doc, ".game__score"), "2");
}

#[wasm_bindgen_test]
fn second_button_press_cancels() {
    let doc = mount_small(2, 1);
    click(&doc, ".game__button");
    click(&doc, ".game__button");
    assert_eq!(text(&doc, ".pop-up__message"), "REPLAY?👻");
    assert_eq!(visibility(&doc, ".game__button"), "hidden");
}

#[wasm_bindgen_test]
fn replay_starts_fresh_round() {
    let doc = mount_small(2, 1);
    click(&doc, ".game__button");
    click(&doc, ".carrot");
    click(&doc, ".bug");
    click(&doc, ".pop-up__refresh");
    assert_eq!(visibility(&doc, ".pop-up"), "hidden");
    assert_eq!(count(&doc, ".carrot"), 2);
    assert_eq!(text(&doc, ".game__score"), "2");
}

#[wasm_bindgen_test]
fn custom_stop_listener_replaces_banner() {
    let doc = mount_small(2, 1);
    let seen = Rc::new(Cell::new(None));
    let sink = seen.clone();
    set_stop_listener(move |reason, _view| sink.set(Some(reason))).unwrap();
    click(&doc, ".game__button");
    click(&doc, ".bug");
    assert_eq!(seen.get(), Some(StopReason::Lose));
    assert_eq!(visibility(&doc, ".pop-up"), "hidden");
    assert_eq!(text(&doc, ".pop-up__message"), "");
}

#[wasm_bindgen_test]
fn remount_from_stop_listener_is_refused() {
    let doc = mount_small(1, 1);
    let outcome: Rc<RefCell<Option<Result<(), GameError>>>> = Rc::new(RefCell::new(None));
    let sink = outcome.clone();
    set_stop_listener(move |_reason, _view| {
        *sink.borrow_mut() = Some(mount(GameBuilder::new().build().unwrap()));
    })
    .unwrap();
    click(&doc, ".game__button");
    click(&doc, ".bug");
    match outcome.borrow_mut().take() {
        Some(Err(GameError::Dom(msg))) => assert_eq!(msg, "controller busy"),
        other => panic!("expected busy error, got {other:?}"),
    }
    // The original controller still drives the page.
    click(&doc, ".pop-up__refresh");
    assert_eq!(count(&doc, ".carrot"), 1);
}

#[wasm_bindgen_test]
fn remount_follows_rerendered_page() {
    mount_small(3, 0);
    let doc = mount_small(1, 0);
    click(&doc, ".game__button");
    assert_eq!(count(&doc, ".carrot"), 1);
    click(&doc, ".carrot");
    assert_eq!(text(&doc, ".pop-up__message"), "YOU WON");
}

#[wasm_bindgen_test]
async fn refused_playback_is_reported() {
    let refused = Promise::reject(&JsValue::from_str("NotAllowedError"));
    assert!(!playback_started("bgm", refused).await);
    let started = Promise::resolve(&JsValue::UNDEFINED);
    assert!(playback_started("bgm", started).await);
}
