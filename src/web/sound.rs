// Audio cues. Browsers may refuse playback (autoplay policy); that is logged, not fatal.

use js_sys::Promise;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::error::{GameError, Result};
use crate::game::AssetPaths;

pub struct SoundBank {
    carrot: HtmlAudioElement,
    bug: HtmlAudioElement,
    bgm: HtmlAudioElement,
    alert: HtmlAudioElement,
    win: HtmlAudioElement,
}

fn load(src: &str) -> Result<HtmlAudioElement> {
    HtmlAudioElement::new_with_src(src).map_err(|e| GameError::dom(src, e))
}

/// Wait on the promise returned by `play()`. `false` when the browser refused playback.
pub async fn playback_started(sound: &str, started: Promise) -> bool {
    match JsFuture::from(started).await {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(sound, ?err, "playback refused");
            false
        }
    }
}

fn play(audio: &HtmlAudioElement, name: &'static str) {
    audio.set_current_time(0.0);
    match audio.play() {
        Ok(started) => spawn_local(async move {
            playback_started(name, started).await;
        }),
        Err(err) => tracing::warn!(sound = name, ?err, "play() threw"),
    }
}

impl SoundBank {
    pub fn load(assets: &AssetPaths) -> Result<Self> {
        let bgm = load(&assets.bgm)?;
        bgm.set_loop(true);
        Ok(Self {
            carrot: load(&assets.carrot_sound)?,
            bug: load(&assets.bug_sound)?,
            bgm,
            alert: load(&assets.alert_sound)?,
            win: load(&assets.win_sound)?,
        })
    }

    pub fn play_carrot(&self) {
        play(&self.carrot, "carrot");
    }

    pub fn play_bug(&self) {
        play(&self.bug, "bug");
    }

    pub fn play_alert(&self) {
        play(&self.alert, "alert");
    }

    pub fn play_win(&self) {
        play(&self.win, "win");
    }

    /// Background music restarts from the top each round.
    pub fn play_bgm(&self) {
        play(&self.bgm, "bgm");
    }

    pub fn stop_bgm(&self) {
        if let Err(err) = self.bgm.pause() {
            tracing::warn!(?err, "could not pause bgm");
        }
    }
}
