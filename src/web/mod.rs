//! Browser front end: binds a [`GameSession`] to the page.
//!
//! The controller lives in a thread-local slot; DOM listeners and the countdown
//! ticker reach it through [`dispatch`]. Each controller owns its listeners, so
//! remounting onto a re-rendered page unhooks the old elements.

pub mod sound;
pub mod ticker;
pub mod view;

use std::cell::RefCell;

use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, MouseEvent, window};

use crate::error::{GameError, Result};
use crate::game::{
    ClickOutcome, GameConfig, GameSession, RoundStart, StopReason, TickOutcome, Toggle, field,
};
use crate::rng::BrowserRandom;
use sound::SoundBank;
use ticker::{COUNTDOWN_PERIOD_MS, Ticker};
use view::{GameView, item_kind_of};

/// Called whenever a round ends, after the button and music are reset.
pub type StopListener = Box<dyn FnMut(StopReason, &GameView)>;

pub struct GameController {
    config: GameConfig,
    session: GameSession,
    view: GameView,
    sounds: SoundBank,
    ticker: Ticker,
    rng: BrowserRandom,
    on_stop: Option<StopListener>,
    listeners: Vec<Listener>,
}

impl GameController {
    pub fn new(config: GameConfig, view: GameView, sounds: SoundBank) -> Self {
        Self {
            session: GameSession::new(&config),
            config,
            view,
            sounds,
            ticker: Ticker::new(),
            rng: BrowserRandom,
            on_stop: None,
            listeners: Vec::new(),
        }
    }

    pub fn set_stop_listener(&mut self, listener: impl FnMut(StopReason, &GameView) + 'static) {
        self.on_stop = Some(Box::new(listener));
    }

    fn on_button(&mut self) -> Result<()> {
        match self.session.toggle() {
            Toggle::Started(round) => self.begin_round(round),
            Toggle::Stopped => self.end_round(StopReason::Cancel),
        }
    }

    fn on_replay(&mut self) -> Result<()> {
        let round = self.session.start();
        self.begin_round(round)
    }

    fn on_field_click(&mut self, target: Element) -> Result<()> {
        let Some(kind) = item_kind_of(&target) else {
            return Ok(());
        };
        match self.session.click(kind) {
            ClickOutcome::Ignored => Ok(()),
            ClickOutcome::Pulled { carrots_left } => {
                self.sounds.play_carrot();
                target.remove();
                self.view.update_score(carrots_left);
                Ok(())
            }
            ClickOutcome::Won => {
                self.sounds.play_carrot();
                target.remove();
                self.view.update_score(0);
                self.end_round(StopReason::Win)
            }
            ClickOutcome::Lost => {
                self.sounds.play_bug();
                self.end_round(StopReason::Lose)
            }
        }
    }

    fn on_tick(&mut self) -> Result<()> {
        match self.session.tick() {
            TickOutcome::Idle => {
                self.ticker.stop();
                Ok(())
            }
            TickOutcome::Counted { remaining_sec } => {
                self.view.update_timer(remaining_sec);
                Ok(())
            }
            TickOutcome::Finished(reason) => self.end_round(reason),
        }
    }

    fn begin_round(&mut self, round: RoundStart) -> Result<()> {
        let items = field::populate(self.view.field_bounds(), &self.config, &mut self.rng);
        self.view.reset_field(&items, &self.config.assets)?;
        self.view.update_score(round.carrots_left);
        self.view.hide_pop_up()?;
        self.view.show_stop_button()?;
        self.view.show_timer_and_score()?;
        self.view.update_timer(round.remaining_sec);
        self.sounds.play_bgm();
        self.ticker
            .start(COUNTDOWN_PERIOD_MS, || dispatch("tick", GameController::on_tick))?;
        info!(
            duration = round.remaining_sec,
            carrots = self.session.carrot_count(),
            bugs = self.session.bug_count(),
            "round started"
        );
        Ok(())
    }

    fn end_round(&mut self, reason: StopReason) -> Result<()> {
        self.ticker.stop();
        self.view.hide_game_button()?;
        self.view.show_start_button()?;
        self.sounds.stop_bgm();
        match reason {
            StopReason::Win => self.sounds.play_win(),
            StopReason::Cancel | StopReason::Lose => self.sounds.play_alert(),
        }
        info!(reason = reason.as_str(), "round over");
        if let Some(listener) = self.on_stop.as_mut() {
            listener(reason, &self.view);
        }
        Ok(())
    }
}

thread_local! {
    static CONTROLLER: RefCell<Option<GameController>> = RefCell::new(None);
}

/// Run `f` against the mounted controller, logging instead of throwing on failure.
fn dispatch(event: &'static str, f: impl FnOnce(&mut GameController) -> Result<()>) {
    CONTROLLER.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            warn!(event, "controller busy; event dropped");
            return;
        };
        if let Some(controller) = slot.as_mut() {
            if let Err(err) = f(controller) {
                warn!(event, %err, "handler failed");
            }
        }
    });
}

/// A click listener that unhooks itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl Listener {
    fn attach(
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(MouseEvent) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| GameError::dom("addEventListener", e))?;
        Ok(Self {
            target,
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

fn install_listeners(view: &GameView) -> Result<Vec<Listener>> {
    let button = Listener::attach(EventTarget::from(view.button().clone()), "click", |_evt| {
        dispatch("button", GameController::on_button)
    })?;
    let replay = Listener::attach(
        EventTarget::from(view.pop_up_refresh().clone()),
        "click",
        |_evt| dispatch("replay", GameController::on_replay),
    )?;
    let field_click = Listener::attach(EventTarget::from(view.field().clone()), "click", |evt| {
        let Some(target) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        dispatch("field", move |c| c.on_field_click(target));
    })?;
    Ok(vec![button, replay, field_click])
}

/// Attach the game to the current page. Mounting again replaces the previous
/// controller, its listeners and its config.
///
/// Fails with `GameError::Dom` when called from inside one of the game's own
/// handlers (for example a stop listener).
pub fn mount(config: GameConfig) -> Result<()> {
    let level = config.log_level();
    if !crate::logging::init(level) {
        debug!(requested = %level, "log subscriber already installed; level unchanged");
    }
    let doc = window()
        .and_then(|w| w.document())
        .ok_or_else(|| GameError::Dom("no document".into()))?;
    let view = GameView::attach(&doc)?;
    let sounds = SoundBank::load(&config.assets)?;
    let mut controller = GameController::new(config, view, sounds);
    controller.set_stop_listener(|reason, view| {
        if let Err(err) = view.show_pop_up(reason.banner()) {
            warn!(%err, "could not show pop-up");
        }
    });
    controller.listeners = install_listeners(&controller.view)?;

    let previous = CONTROLLER.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| GameError::Dom("controller busy".into()))?;
        Ok::<_, GameError>(slot.replace(controller))
    })?;
    if previous.is_some() {
        info!("game remounted");
    } else {
        info!("game mounted");
    }
    Ok(())
}

/// Install a custom end-of-round listener on the mounted game.
pub fn set_stop_listener(listener: impl FnMut(StopReason, &GameView) + 'static) -> Result<()> {
    CONTROLLER.with(|cell| {
        let mut slot = cell
            .try_borrow_mut()
            .map_err(|_| GameError::Dom("controller busy".into()))?;
        let controller = slot
            .as_mut()
            .ok_or_else(|| GameError::Dom("game not mounted".into()))?;
        controller.set_stop_listener(listener);
        Ok(())
    })
}
