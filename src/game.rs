//! Browser runtime: DOM wiring, event listeners and the animation-frame loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, window};

use crate::audio::SoundManager;
use crate::config::GameConfig;
use crate::content::{ContentManager, Track};
use crate::credits;
use crate::dice::Dice;
use crate::draw::{CanvasSurface, Surface};
use crate::error::GameError;
use crate::geometry::Point;
use crate::input::{Input, Key};
use crate::scene::{Click, Frame, GameScreen, StateStack};

/// A DOM listener that detaches itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, GameError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("could not detach {} listener: {err:?}", self.event);
        }
    }
}

struct Game {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    bounds: Point,
    content: ContentManager,
    sound: SoundManager,
    input: Input,
    dice: Dice,
    states: StateStack,
    /// Ties this game to the frame loop started for it.
    generation: u64,
    listeners: Vec<Listener>,
}

impl Game {
    fn new(config: &GameConfig) -> Result<Self, GameError> {
        let win = window().ok_or(GameError::MissingGlobal("window"))?;
        let doc = win.document().ok_or(GameError::MissingGlobal("document"))?;
        let canvas: HtmlCanvasElement = doc
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| GameError::MissingElement(config.canvas_id.clone()))?
            .dyn_into()
            .map_err(|_| GameError::WrongElementType {
                id: config.canvas_id.clone(),
                expected: "HTMLCanvasElement",
            })?;
        canvas.set_width(config.canvas_width);
        canvas.set_height(config.canvas_height);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(GameError::MissingGlobal("2d context"))?
            .dyn_into()
            .map_err(|_| GameError::WrongElementType {
                id: config.canvas_id.clone(),
                expected: "CanvasRenderingContext2d",
            })?;
        ctx.set_image_smoothing_enabled(false);

        let content = ContentManager::load()?;
        let mut sound = SoundManager::new(content.track(Track::Ambience).clone());
        sound.set_sfx_volume(config.sfx_volume)?;
        credits::load(&config.credits_path);

        let mut states = StateStack::new();
        states.push(Box::new(GameScreen::new(config)?));

        Ok(Self {
            canvas,
            ctx,
            bounds: config.bounds(),
            content,
            sound,
            input: Input::new(),
            dice: Dice::from_entropy(),
            states,
            generation: NEXT_GENERATION.with(|next| {
                let id = next.get();
                next.set(id.wrapping_add(1));
                id
            }),
            listeners: Vec::new(),
        })
    }

    fn tick(&mut self) {
        let mut frame = Frame {
            bounds: self.bounds,
            input: &self.input,
            dice: &mut self.dice,
        };
        self.states.update(&mut frame);

        let mut surface = CanvasSurface {
            ctx: &self.ctx,
            content: &self.content,
        };
        surface.clear(self.bounds);
        self.states.draw(&mut surface);
    }

    fn on_mouse_down(&mut self, evt: &web_sys::MouseEvent) -> Result<(), GameError> {
        let rect = self.canvas.get_bounding_client_rect();
        let client = Point::new(evt.client_x() as f64, evt.client_y() as f64);
        let position = Input::cursor_position(client, Point::new(rect.left(), rect.top()));
        let Some(state) = self.states.top_mut() else {
            return Ok(());
        };
        let mut click = Click {
            position,
            dice: &mut self.dice,
            audio: &mut self.sound,
            images: &self.content,
        };
        state.on_mouse_down(&mut click)
    }
}

thread_local! {
    static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
    static NEXT_GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Whether the loop started for `loop_generation` should keep ticking.
fn loop_is_current(game_generation: Option<u64>, loop_generation: u64) -> bool {
    game_generation == Some(loop_generation)
}

impl Game {
    fn attach_listeners(&mut self) -> Result<(), GameError> {
        let doc = window()
            .and_then(|w| w.document())
            .ok_or(GameError::MissingGlobal("document"))?;

        // Suppress the context menu so right clicks stay on the canvas.
        self.listeners.push(Listener::attach(&self.canvas, "contextmenu", |evt| {
            evt.prevent_default();
        })?);

        self.listeners.push(Listener::attach(&self.canvas, "mousedown", |evt| {
            let Some(evt) = evt.dyn_ref::<web_sys::MouseEvent>() else {
                return;
            };
            GAME.with(|cell| {
                if let Some(game) = cell.borrow_mut().as_mut() {
                    if let Err(err) = game.on_mouse_down(evt) {
                        log::warn!("mouse-down ignored: {err}");
                    }
                }
            });
        })?);

        self.listeners.push(Listener::attach(&doc, "keydown", |evt| {
            let Some(evt) = evt.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            let code = evt.key_code();
            if Key::from_code(code).is_some_and(Key::blocks_default) {
                evt.prevent_default();
            }
            GAME.with(|cell| {
                if let Some(game) = cell.borrow_mut().as_mut() {
                    game.input.key_down(code);
                }
            });
        })?);

        self.listeners.push(Listener::attach(&doc, "keyup", |evt| {
            let Some(evt) = evt.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            let code = evt.key_code();
            GAME.with(|cell| {
                if let Some(game) = cell.borrow_mut().as_mut() {
                    game.input.key_up(code);
                }
            });
        })?);
        Ok(())
    }
}

/// Build the game against `config`, hook up input, and start the frame loop.
/// Fails with `AlreadyRunning` until the current game is stopped.
pub fn start(config: &GameConfig) -> Result<(), JsValue> {
    if GAME.with(|g| g.borrow().is_some()) {
        return Err(GameError::AlreadyRunning.into());
    }
    let mut game = Game::new(config)?;
    game.attach_listeners()?;
    let generation = game.generation;
    GAME.with(|g| g.replace(Some(game)));
    log::info!(
        "cat toy running on #{} ({}x{})",
        config.canvas_id,
        config.canvas_width,
        config.canvas_height
    );

    start_loop(generation);
    Ok(())
}

/// Drop the running game. Its listeners detach and its loop exits at the
/// next frame.
pub fn stop() {
    // Dropped outside the borrow so listener teardown never re-enters GAME.
    let stopped = GAME.with(|cell| cell.borrow_mut().take());
    if let Some(game) = stopped {
        log::info!("game {} stopped", game.generation);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop(generation: u64) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let running = GAME.with(|cell| {
            let mut cell = cell.borrow_mut();
            match cell.as_mut() {
                Some(game) if loop_is_current(Some(game.generation), generation) => {
                    game.tick();
                    true
                }
                _ => false,
            }
        });
        if !running {
            log::info!("frame loop {generation} stopped");
            return;
        }
        if let Some(w) = window() {
            if let Some(cb) = f.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        if let Some(cb) = g.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_loop_stops_once_a_newer_game_takes_over() {
        assert!(loop_is_current(Some(3), 3));
        assert!(!loop_is_current(Some(4), 3));
        assert!(!loop_is_current(None, 3));
    }
}
