//! Orbfield entry point
//!
//! On wasm32 mounts the background and orb canvases and runs their loops.
//! Natively runs a short headless session and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{Document, Event, MouseEvent, PageTransitionEvent};

    use orbfield::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use orbfield::platform::{PageMounts, PlatformError};
    use orbfield::platform::web::{AnimationLoop, Listener, Surface, window};
    use orbfield::renderer::{draw_background, draw_orbs};
    use orbfield::session::{Ambient, Session};
    use orbfield::tuning::{BackgroundTuning, OrbTuning};
    use orbfield::Settings;
    use orbfield::settings::quality_from_query;

    type Storage = Box<dyn KeyValueStore>;
    type GameSession = Session<Storage>;

    /// Mounted background canvas. Dropping it unmounts.
    struct BackgroundView {
        _frame_loop: AnimationLoop,
        _listeners: Vec<Listener>,
    }

    /// Mounted orb canvas. Dropping it unmounts.
    struct GameView {
        _frame_loop: AnimationLoop,
        _listeners: Vec<Listener>,
    }

    fn open_storage() -> Storage {
        match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{e}, score will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    fn mount_background(settings: &Settings, seed: u64) -> Result<BackgroundView, PlatformError> {
        let surface = Rc::new(Surface::acquire("space-bg")?);
        let (w, h) = surface.size();
        let ambient = Rc::new(RefCell::new(Ambient::new(
            seed,
            w,
            h,
            settings,
            BackgroundTuning::default(),
        )));

        let window = window()?;
        let document = window.document().ok_or(PlatformError::NoWindow)?;
        let resize = {
            let surface = surface.clone();
            let ambient = ambient.clone();
            Listener::new(window.as_ref(), "resize", move |_event: Event| {
                if let Ok((w, h)) = surface.fit_viewport() {
                    ambient.borrow_mut().resize(w, h);
                }
            })?
        };
        let visibility = {
            let ambient = ambient.clone();
            let doc = document.clone();
            Listener::new(document.as_ref(), "visibilitychange", move |_event: Event| {
                if !doc.hidden() {
                    ambient.borrow_mut().resume();
                }
            })?
        };

        let frame_loop = AnimationLoop::start(move |time: f64| {
            let mut ambient = ambient.borrow_mut();
            if ambient.frame(time) > 0 {
                draw_background(&surface.ctx, &ambient.background);
            }
        })?;

        log::info!("Background mounted ({w}x{h})");
        Ok(BackgroundView {
            _frame_loop: frame_loop,
            _listeners: vec![resize, visibility],
        })
    }

    fn mount_game(settings: &Settings, seed: u64, storage: Storage) -> Result<GameView, PlatformError> {
        let surface = Rc::new(Surface::acquire("orb-game")?);
        let (w, h) = surface.size();
        let session = Rc::new(RefCell::new(Session::new(
            seed,
            w,
            h,
            settings,
            OrbTuning::default(),
            storage,
        )));

        let window = window()?;
        let document = window.document().ok_or(PlatformError::NoWindow)?;
        let mut listeners = Vec::new();

        // Resize
        {
            let surface = surface.clone();
            let session = session.clone();
            listeners.push(Listener::new(window.as_ref(), "resize", move |_event: Event| {
                if let Ok((w, h)) = surface.fit_viewport() {
                    session.borrow_mut().resize(w, h);
                }
            })?);
        }

        // Pointer position (anywhere on the page)
        {
            let session = session.clone();
            listeners.push(Listener::new(window.as_ref(), "mousemove", move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    session
                        .borrow_mut()
                        .pointer_moved(event.client_x() as f32, event.client_y() as f32);
                }
            })?);
        }

        // Clicks on the orb canvas
        {
            let session = session.clone();
            listeners.push(Listener::new(surface.canvas.as_ref(), "click", move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    session
                        .borrow_mut()
                        .queue_click(event.client_x() as f32, event.client_y() as f32);
                }
            })?);
        }

        // Banner dismiss
        if let Some(btn) = document.get_element_by_id("easter-egg-dismiss") {
            let session = session.clone();
            listeners.push(Listener::new(btn.as_ref(), "click", move |_event: Event| {
                session.borrow_mut().dismiss_notification();
            })?);
        }

        // Optional reset control
        if let Some(btn) = document.get_element_by_id("orb-reset") {
            let session = session.clone();
            listeners.push(Listener::new(btn.as_ref(), "click", move |_event: Event| {
                session.borrow_mut().reset();
            })?);
        }

        // Don't fast-forward after the tab was hidden
        {
            let session = session.clone();
            let doc = document.clone();
            listeners.push(Listener::new(document.as_ref(), "visibilitychange", move |_event: Event| {
                if !doc.hidden() {
                    session.borrow_mut().resume();
                }
            })?);
        }

        let frame_loop = AnimationLoop::start(move |time: f64| {
            let mut session = session.borrow_mut();
            session.frame(time);
            draw_orbs(&surface.ctx, &session.field);
            update_hud(&document, &session);
        })?;

        log::info!("Orb game mounted ({w}x{h})");
        Ok(GameView {
            _frame_loop: frame_loop,
            _listeners: listeners,
        })
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Mirror score, popups and banner into the DOM
    fn update_hud(document: &Document, session: &GameSession) {
        let score = session.store.score();

        set_hidden(document, "orb-score", !session.hud.badge_visible(score));
        if let Some(el) = document.query_selector("#orb-score .orb-score-value").ok().flatten() {
            let text = score.to_string();
            if el.text_content().as_deref() != Some(text.as_str()) {
                el.set_text_content(Some(&text));
            }
        }

        if let Some(layer) = document.get_element_by_id("orb-feedback") {
            let html: String = session
                .hud
                .feedback
                .iter()
                .map(|f| {
                    let t = f.progress();
                    format!(
                        r#"<span class="orb-plus" style="left:{:.0}px;top:{:.0}px;opacity:{:.2};transform:scale({:.2})">+1</span>"#,
                        f.at.x - 10.0,
                        f.at.y - 10.0 - 30.0 * t,
                        1.0 - t,
                        1.0 + 0.5 * t,
                    )
                })
                .collect();
            layer.set_inner_html(&html);
        }

        set_hidden(
            document,
            "easter-egg",
            !session.store.show_easter_egg_notification(),
        );
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orbfield starting...");

        let mut storage = open_storage();
        let mut settings = Settings::load(&storage);
        settings.save(&mut storage);

        let window = match window() {
            Ok(window) => window,
            Err(e) => {
                log::warn!("Orbfield not started: {e}");
                return;
            }
        };

        // Query override applies to this visit only
        if let Some(quality) = window
            .location()
            .search()
            .ok()
            .and_then(|search| quality_from_query(&search))
        {
            settings.quality = quality;
        }
        log::info!("Quality preset: {}", settings.quality.as_str());

        let seed = js_sys::Date::now() as u64;

        let background = if settings.background_enabled {
            mount_background(&settings, seed ^ 0x9e37_79b9_7f4a_7c15)
                .map_err(|e| log::warn!("Background not started: {e}"))
                .ok()
        } else {
            None
        };

        let game = if settings.game_enabled {
            mount_game(&settings, seed, storage)
                .map_err(|e| log::warn!("Orb game not started: {e}"))
                .ok()
        } else {
            None
        };

        // Unmount both on page teardown, not when entering the back/forward cache
        let mounts = RefCell::new(PageMounts::new((background, game)));
        match Listener::new(window.as_ref(), "pagehide", move |event: Event| {
            let persisted = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(|e| e.persisted());
            if mounts.borrow_mut().page_hide(persisted).is_some() {
                log::info!("Orbfield unmounted");
            }
        }) {
            // Lives as long as the page
            Ok(listener) => std::mem::forget(listener),
            Err(e) => log::warn!("No pagehide hook: {e}"),
        }

        log::info!("Orbfield running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orbfield (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ten simulated seconds with a click on the first idle orb twice a second
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use orbfield::persistence::MemoryStore;
    use orbfield::session::{Ambient, Session};
    use orbfield::tuning::{BackgroundTuning, OrbTuning};
    use orbfield::Settings;

    let settings = Settings::default();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);

    let mut session = Session::new(seed, 1280.0, 720.0, &settings, OrbTuning::default(), MemoryStore::new());
    let mut ambient = Ambient::new(seed, 1280.0, 720.0, &settings, BackgroundTuning::default());
    session.pointer_moved(640.0, 360.0);

    let frame_ms = 1000.0 / 60.0;
    for frame in 0..600u32 {
        let now = frame as f64 * frame_ms;
        if frame % 30 == 0 {
            let target = session
                .field
                .orbs
                .iter()
                .filter(|o| !o.is_collecting())
                .map(|o| o.pos)
                .next();
            if let Some(pos) = target {
                session.queue_click(pos.x, pos.y);
            }
        }
        session.frame(now);
        ambient.frame(now);

        if session.store.show_easter_egg_notification() && frame % 60 == 0 {
            log::info!("Easter egg banner visible at frame {frame}");
        }
    }

    let bg = &ambient.background;
    println!(
        "score: {}  unlocked: {}  shooting stars: {}  embers: {}",
        session.store.score(),
        session.store.easter_egg_unlocked(),
        bg.shooting_stars.len(),
        bg.embers.len()
    );
}
