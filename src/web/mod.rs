//! Browser driver. Owns the canvas, the DOM overlays, the input listeners and
//! the requestAnimationFrame loop, and feeds them into a [`Game`].
//!
//! State lives in a thread-local so JS callbacks can reach it. Every callback
//! registered here is held by a handle whose `Drop` unregisters it, so tearing
//! the game down leaves nothing behind that could mutate state later.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent,
    window,
};

use crate::config::RoundConfig;
use crate::game::Game;
use crate::storage::LocalStore;

mod render;

use render::Overlays;

type BrowserGame = Game<LocalStore, SmallRng>;

struct WebGame {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    overlays: Overlays,
    game: BrowserGame,
    frames: FrameLoop,
    owns_canvas: bool,
    _listeners: Vec<Listener>,
}

impl WebGame {
    fn render(&self) {
        render::draw(&self.ctx, &self.canvas, self.game.session());
        self.overlays.update(self.game.session());
    }

    fn teardown(self) {
        self.frames.cancel();
        self.overlays.remove();
        if self.owns_canvas {
            self.canvas.remove();
        }
        // listeners unregister on drop
    }
}

thread_local! {
    static GAME_STATE: RefCell<Option<WebGame>> = const { RefCell::new(None) };
}

pub(crate) fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// --- Scheduling handles -----------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self re-arming animation frame loop with a cancel handle. The loop keeps
/// requesting frames while [`on_frame`] reports the round is still running.
struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn new() -> Self {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let cb = callback.clone();
        let pend = pending.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            pend.set(None);
            if on_frame(ts) {
                schedule(&cb, &pend);
            }
        }) as Box<dyn FnMut(f64)>));
        Self { callback, pending }
    }

    fn request(&self) {
        schedule(&self.callback, &self.pending);
    }

    /// Cancel the pending frame and release the callback (this also breaks the
    /// closure's reference cycle).
    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn schedule(callback: &FrameCallback, pending: &Cell<Option<i32>>) {
    if pending.get().is_some() {
        return;
    }
    let Some(w) = window() else { return };
    if let Some(cb) = callback.borrow().as_ref() {
        if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            pending.set(Some(id));
        }
    }
}

/// DOM event listener removed again on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

// --- Lifecycle --------------------------------------------------------------

/// Build the play area and overlays in the Idle state. Replaces any game that
/// is already mounted.
pub fn mount(cfg: RoundConfig) -> Result<(), JsValue> {
    stop();

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let (canvas, owns_canvas) = render::ensure_canvas(&doc)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let overlays = render::ensure_overlays(&doc)?;

    let store = LocalStore::new(cfg.storage_key.clone());
    let game = Game::new(cfg, store, SmallRng::from_entropy(), now_ms());

    let mut listeners = Vec::new();
    {
        let canvas_tap = canvas.clone();
        listeners.push(Listener::attach(&canvas, "mousedown", move |evt| {
            let m: &MouseEvent = evt.unchecked_ref();
            handle_tap(&canvas_tap, m.client_x() as f64, m.client_y() as f64);
        })?);
    }
    {
        let canvas_tap = canvas.clone();
        listeners.push(Listener::attach(&canvas, "touchstart", move |evt| {
            // stop the browser from synthesising a second (mouse) tap
            evt.prevent_default();
            let t: &TouchEvent = evt.unchecked_ref();
            if let Some(touch) = t.changed_touches().get(0) {
                handle_tap(&canvas_tap, touch.client_x() as f64, touch.client_y() as f64);
            }
        })?);
    }
    listeners.push(Listener::attach(&overlays.button, "click", |_evt| {
        if let Err(e) = start_round() {
            log::warn!("start failed: {e:?}");
        }
    })?);

    let state = WebGame {
        canvas,
        ctx,
        overlays,
        game,
        frames: FrameLoop::new(),
        owns_canvas,
        _listeners: listeners,
    };
    state.render();
    GAME_STATE.with(|cell| cell.replace(Some(state)));
    log::info!("mounted");
    Ok(())
}

/// Start or restart a round on the mounted game.
pub fn start_round() -> Result<(), JsValue> {
    let now = now_ms();
    GAME_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        let st = guard
            .as_mut()
            .ok_or_else(|| JsValue::from_str("game not mounted"))?;
        st.game.start(now);
        st.render();
        st.frames.request();
        Ok(())
    })
}

/// Tear down the mounted game, if any.
pub fn stop() {
    // take first so the drop runs without the thread-local borrowed
    let state = GAME_STATE.with(|cell| cell.borrow_mut().take());
    if let Some(st) = state {
        st.teardown();
        log::info!("stopped");
    }
}

#[cfg(feature = "serde_json")]
pub fn snapshot_json() -> Option<String> {
    GAME_STATE.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|st| serde_json::to_string(&st.game.session().snapshot()).ok())
    })
}

// --- Callbacks --------------------------------------------------------------

/// Returns whether another frame should be requested.
fn on_frame(ts: f64) -> bool {
    GAME_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        let Some(st) = guard.as_mut() else {
            return false;
        };
        st.game.frame(ts);
        st.render();
        st.game.session().is_running()
    })
}

fn handle_tap(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) {
    let rect = canvas.get_bounding_client_rect();
    GAME_STATE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            let caught = st.game.tap(
                client_x - rect.left(),
                client_y - rect.top(),
                rect.width(),
                rect.height(),
            );
            if caught.is_some() {
                st.render();
            }
        }
    });
}
