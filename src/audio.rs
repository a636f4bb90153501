//! Volume-scaled playback of music tracks and one-shot effects.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::content::{SoundEffect, Track};
use crate::error::{GameError, clamp};

// HTMLMediaElement.HAVE_ENOUGH_DATA
const HAVE_ENOUGH_DATA: u16 = 4;

/// Where gameplay sends its sound requests.
pub trait AudioSink {
    fn set_music_volume(&mut self, volume: f64) -> Result<(), GameError>;
    fn play_music(&mut self, track: Track, looped: bool);
    fn play_effect(&mut self, effect: SoundEffect);
}

/// Music and effect volumes, each kept within `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volumes {
    pub sfx: f64,
    pub music: f64,
}

impl Default for Volumes {
    fn default() -> Self {
        Self { sfx: 1.0, music: 1.0 }
    }
}

impl Volumes {
    pub fn set_sfx(&mut self, value: f64) -> Result<(), GameError> {
        self.sfx = clamp(value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_music(&mut self, value: f64) -> Result<(), GameError> {
        self.music = clamp(value, 0.0, 1.0)?;
        Ok(())
    }
}

/// Browser implementation backed by `HtmlAudioElement`.
pub struct SoundManager {
    volumes: Volumes,
    ambience: HtmlAudioElement,
}

impl SoundManager {
    pub fn new(ambience: HtmlAudioElement) -> Self {
        Self {
            volumes: Volumes::default(),
            ambience,
        }
    }

    pub fn set_sfx_volume(&mut self, volume: f64) -> Result<(), GameError> {
        self.volumes.set_sfx(volume)
    }

    fn track(&self, track: Track) -> &HtmlAudioElement {
        match track {
            Track::Ambience => &self.ambience,
        }
    }
}

impl AudioSink for SoundManager {
    fn set_music_volume(&mut self, volume: f64) -> Result<(), GameError> {
        self.volumes.set_music(volume)
    }

    fn play_music(&mut self, track: Track, looped: bool) {
        let audio = self.track(track).clone();
        audio.set_loop(looped);
        audio.set_volume(self.volumes.music);
        if audio.ready_state() == HAVE_ENOUGH_DATA {
            let _ = audio.play();
        } else {
            play_when_ready(&audio);
        }
        log::info!("music {:?} started (loop={looped})", track);
    }

    fn play_effect(&mut self, effect: SoundEffect) {
        match HtmlAudioElement::new_with_src(effect.path()) {
            Ok(sound) => {
                sound.set_volume(self.volumes.sfx);
                play_when_ready(&sound);
            }
            Err(err) => log::warn!("could not create {:?} effect: {:?}", effect, err),
        }
    }
}

/// Start playback on the first `canplay`, then detach the handler.
fn play_when_ready(audio: &HtmlAudioElement) {
    let target = audio.clone();
    let callback = Closure::once_into_js(move || {
        target.set_oncanplay(None);
        let _ = target.play();
    });
    audio.set_oncanplay(Some(callback.unchecked_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volumes_clamp_into_unit_range() {
        let mut v = Volumes::default();
        v.set_music(0.5).unwrap();
        v.set_sfx(3.0).unwrap();
        assert_eq!(v, Volumes { sfx: 1.0, music: 0.5 });
        v.set_music(-1.0).unwrap();
        assert_eq!(v.music, 0.0);
    }

    #[test]
    fn non_finite_volume_is_rejected() {
        let mut v = Volumes::default();
        assert!(v.set_sfx(f64::NAN).is_err());
        assert_eq!(v.sfx, 1.0);
    }
}
