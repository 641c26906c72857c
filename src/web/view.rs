// DOM handles for the game page and the style toggles applied to them.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::{GameError, Result};
use crate::game::{AssetPaths, FieldBounds, ItemKind, ItemPlacement, format_timer};

pub const GAME_BUTTON: &str = ".game__button";
pub const GAME_TIMER: &str = ".game__timer";
pub const GAME_SCORE: &str = ".game__score";
pub const GAME_FIELD: &str = ".game__field";
pub const POP_UP: &str = ".pop-up";
pub const POP_UP_MESSAGE: &str = ".pop-up__message";
pub const POP_UP_REFRESH: &str = ".pop-up__refresh";

const PLAY_ICON: &str = "fa-play";
const STOP_ICON: &str = "fa-stop";

pub struct GameView {
    doc: Document,
    button: HtmlElement,
    timer: HtmlElement,
    score: HtmlElement,
    field: HtmlElement,
    pop_up: HtmlElement,
    pop_up_message: HtmlElement,
    pop_up_refresh: HtmlElement,
}

fn find(doc: &Document, selector: &'static str) -> Result<HtmlElement> {
    doc.query_selector(selector)
        .map_err(|e| GameError::dom(selector, e))?
        .ok_or(GameError::MissingElement(selector))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GameError::Dom(format!("{selector} is not an HTML element")))
}

fn set_visible(el: &HtmlElement, visible: bool) -> Result<()> {
    el.style()
        .set_property("visibility", if visible { "visible" } else { "hidden" })
        .map_err(|e| GameError::dom("style.visibility", e))
}

impl GameView {
    /// Look up every element the game drives. Fails on the first missing one.
    pub fn attach(doc: &Document) -> Result<Self> {
        Ok(Self {
            doc: doc.clone(),
            button: find(doc, GAME_BUTTON)?,
            timer: find(doc, GAME_TIMER)?,
            score: find(doc, GAME_SCORE)?,
            field: find(doc, GAME_FIELD)?,
            pop_up: find(doc, POP_UP)?,
            pop_up_message: find(doc, POP_UP_MESSAGE)?,
            pop_up_refresh: find(doc, POP_UP_REFRESH)?,
        })
    }

    pub fn button(&self) -> &HtmlElement {
        &self.button
    }

    pub fn field(&self) -> &HtmlElement {
        &self.field
    }

    pub fn pop_up_refresh(&self) -> &HtmlElement {
        &self.pop_up_refresh
    }

    pub fn show_stop_button(&self) -> Result<()> {
        set_visible(&self.button, true)?;
        self.swap_icon(PLAY_ICON, STOP_ICON)
    }

    pub fn show_start_button(&self) -> Result<()> {
        self.swap_icon(STOP_ICON, PLAY_ICON)
    }

    pub fn hide_game_button(&self) -> Result<()> {
        set_visible(&self.button, false)
    }

    pub fn show_timer_and_score(&self) -> Result<()> {
        set_visible(&self.timer, true)?;
        set_visible(&self.score, true)
    }

    pub fn update_timer(&self, remaining_sec: u32) {
        self.timer.set_inner_text(&format_timer(remaining_sec));
    }

    pub fn update_score(&self, carrots_left: u32) {
        self.score.set_inner_text(&carrots_left.to_string());
    }

    pub fn show_pop_up(&self, text: &str) -> Result<()> {
        self.pop_up_message.set_inner_text(text);
        set_visible(&self.pop_up, true)
    }

    pub fn hide_pop_up(&self) -> Result<()> {
        set_visible(&self.pop_up, false)
    }

    pub fn field_bounds(&self) -> FieldBounds {
        let rect = self.field.get_bounding_client_rect();
        FieldBounds {
            width: rect.width(),
            height: rect.height(),
        }
    }

    /// Empty the field, then add one absolutely positioned `<img>` per placement.
    pub fn reset_field(&self, items: &[ItemPlacement], assets: &AssetPaths) -> Result<()> {
        self.field.set_inner_html("");
        for item in items {
            let img = self
                .doc
                .create_element("img")
                .map_err(|e| GameError::dom("create img", e))?;
            img.set_attribute("class", item.kind.class_name())
                .and_then(|_| img.set_attribute("src", item.kind.image_path(assets)))
                .and_then(|_| {
                    img.set_attribute(
                        "style",
                        &format!("position:absolute; left:{}px; top:{}px;", item.x, item.y),
                    )
                })
                .map_err(|e| GameError::dom("item attributes", e))?;
            self.field
                .append_child(&img)
                .map_err(|e| GameError::dom("append item", e))?;
        }
        Ok(())
    }

    fn swap_icon(&self, from: &str, to: &str) -> Result<()> {
        let selector = format!(".{from}");
        let icon = self
            .button
            .query_selector(&selector)
            .map_err(|e| GameError::dom("button icon", e))?;
        // Already showing `to`: nothing to swap.
        let Some(icon) = icon else { return Ok(()) };
        let classes = icon.class_list();
        classes
            .add_1(to)
            .and_then(|_| classes.remove_1(from))
            .map_err(|e| GameError::dom("button icon", e))
    }
}

/// Which item, if any, a click on the field landed on.
pub fn item_kind_of(target: &Element) -> Option<ItemKind> {
    let classes = target.class_list();
    [ItemKind::Carrot, ItemKind::Bug]
        .into_iter()
        .find(|kind| classes.contains(kind.class_name()))
}
