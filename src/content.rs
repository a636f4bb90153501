//! Asset catalogue and the browser-side preloader.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAudioElement, HtmlImageElement};

use crate::error::GameError;
use crate::geometry::Point;

/// Every image the toy draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Background,
    Cat,
    OrangeCat,
    Pallas,
    BlueCat,
}

impl ImageKey {
    pub const ALL: [ImageKey; 5] = [
        ImageKey::Background,
        ImageKey::Cat,
        ImageKey::OrangeCat,
        ImageKey::Pallas,
        ImageKey::BlueCat,
    ];

    pub fn path(self) -> &'static str {
        match self {
            ImageKey::Background => "./images/bg1.png",
            ImageKey::Cat => "./images/cat.png",
            ImageKey::OrangeCat => "./images/orangecat.png",
            ImageKey::Pallas => "./images/pallas.png",
            ImageKey::BlueCat => "./images/bluecat.png",
        }
    }
}

/// Looping music tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    Ambience,
}

impl Track {
    pub fn path(self) -> &'static str {
        match self {
            Track::Ambience => "./sounds/town-ambient.ogg",
        }
    }
}

/// One-shot sound effects; each play creates a fresh audio element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    Nyaa,
}

impl SoundEffect {
    pub fn path(self) -> &'static str {
        match self {
            SoundEffect::Nyaa => "./sounds/nyaa.ogg",
        }
    }
}

/// An image reference plus the size it had when it was looked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageHandle {
    pub key: ImageKey,
    pub size: Point,
}

/// Resolves image keys to handles. Sizes may be zero while an image is still loading.
pub trait ImageSource {
    fn image(&self, key: ImageKey) -> ImageHandle;
}

/// Eagerly loaded browser assets.
pub struct ContentManager {
    images: Vec<(ImageKey, HtmlImageElement)>,
    ambience: HtmlAudioElement,
}

impl ContentManager {
    pub fn load() -> Result<Self, GameError> {
        let mut images = Vec::with_capacity(ImageKey::ALL.len());
        for key in ImageKey::ALL {
            let img = HtmlImageElement::new()?;
            log_load_failure(&img, key.path())?;
            img.set_src(key.path());
            images.push((key, img));
        }
        let ambience = HtmlAudioElement::new_with_src(Track::Ambience.path())?;
        log_load_failure(&ambience, Track::Ambience.path())?;
        // Warm the browser cache so the first nyaa is not delayed.
        HtmlAudioElement::new_with_src(SoundEffect::Nyaa.path())?;
        log::info!("queued {} images and 2 sounds for loading", images.len());
        Ok(Self { images, ambience })
    }

    pub fn element(&self, key: ImageKey) -> Option<&HtmlImageElement> {
        self.images.iter().find(|(k, _)| *k == key).map(|(_, img)| img)
    }

    pub fn track(&self, track: Track) -> &HtmlAudioElement {
        match track {
            Track::Ambience => &self.ambience,
        }
    }
}

impl ImageSource for ContentManager {
    fn image(&self, key: ImageKey) -> ImageHandle {
        let size = self
            .element(key)
            .map(|img| Point::new(img.natural_width() as f64, img.natural_height() as f64))
            .unwrap_or_default();
        ImageHandle { key, size }
    }
}

fn log_load_failure(target: &web_sys::EventTarget, path: &'static str) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        log::warn!("failed to load asset {path}");
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
