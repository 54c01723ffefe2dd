//! Neon Breaker entry point
//!
//! On web this wires the engine to the page canvas, LocalStorage, keyboard and
//! `requestAnimationFrame`. Natively it runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use neon_breaker::achievements;
    use neon_breaker::consts::*;
    use neon_breaker::persistence::LocalStorage;
    use neon_breaker::platform::{AnimationFrameScheduler, key_down, key_up};
    use neon_breaker::renderer::CanvasSurface;
    use neon_breaker::{ConfigUpdate, Engine, EngineConfig, Snapshot};

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Neon Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("missing #canvas element")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let surface = CanvasSurface::from_canvas(&canvas).map_err(js_err)?;
        let (scheduler, frame_slot) = AnimationFrameScheduler::new();
        let engine = Engine::new(
            EngineConfig::default(),
            Box::new(surface),
            Box::new(scheduler),
            Box::new(LocalStorage::open()),
        )
        .map_err(js_err)?;
        let engine = Rc::new(RefCell::new(engine));

        // Frame callback: one tick per display refresh
        {
            let weak = Rc::downgrade(&engine);
            *frame_slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                if let Some(engine) = weak.upgrade() {
                    engine.borrow_mut().on_frame();
                }
            }));
        }

        {
            let hud_document = document.clone();
            let mut engine = engine.borrow_mut();
            engine.subscribe(move |snapshot| update_hud(&hud_document, snapshot));
            update_hud(&document, &engine.snapshot());
        }

        setup_key_handlers(&window, engine.clone())?;
        setup_theme_toggle(&document, engine)?;

        Ok(())
    }

    fn setup_key_handlers(
        window: &web_sys::Window,
        engine: Rc<RefCell<Engine>>,
    ) -> Result<(), JsValue> {
        {
            let engine = engine.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = key_down(&event.key()) {
                    event.prevent_default();
                    engine.borrow_mut().handle_input(input);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = key_up(&event.key()) {
                    engine.borrow_mut().handle_input(input);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_theme_toggle(document: &Document, engine: Rc<RefCell<Engine>>) -> Result<(), JsValue> {
        let Some(button) = document.get_element_by_id("theme-toggle") else {
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let theme = engine.borrow().config().theme.toggled();
            engine.borrow_mut().update_config(ConfigUpdate::theme(theme));
            log::info!("Theme switched to {}", theme.as_str());
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "" } else { "hidden" };
            if let Err(e) = el.set_attribute("class", class) {
                log::warn!("Failed to update #{}: {:?}", id, e);
            }
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(document: &Document, snapshot: &Snapshot) {
        set_text(document, "hud-score", &snapshot.score.to_string());
        set_text(document, "hud-high", &snapshot.high_score.to_string());
        set_text(document, "hud-level", &snapshot.level.to_string());
        set_text(document, "hud-lives", &snapshot.lives.to_string());

        set_visible(document, "start-overlay", !snapshot.is_playing && !snapshot.is_paused);
        set_visible(document, "game-over", snapshot.is_game_over);
        set_visible(document, "pause-overlay", snapshot.is_paused);

        let list = achievements::listing(&snapshot.achievements)
            .iter()
            .map(|(a, unlocked)| {
                format!(
                    "[{}] {}: {}",
                    if *unlocked { "x" } else { " " },
                    a.title,
                    a.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        set_text(document, "achievements-list", &list);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use neon_breaker::consts::*;
    use neon_breaker::persistence::MemoryStore;
    use neon_breaker::platform::ManualScheduler;
    use neon_breaker::renderer::RecordingSurface;
    use neon_breaker::sim::autopilot;
    use neon_breaker::{Engine, EngineConfig, EngineError, achievements};

    /// Frames to simulate when no count is given (one minute at 60 Hz)
    const DEFAULT_FRAMES: u64 = 60 * 60;

    pub fn run(max_frames: Option<u64>) -> Result<(), EngineError> {
        let max_frames = max_frames.unwrap_or(DEFAULT_FRAMES);
        let scheduler = ManualScheduler::new();
        let mut engine = Engine::new(
            EngineConfig::default(),
            Box::new(RecordingSurface::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
            Box::new(scheduler.clone()),
            Box::new(MemoryStore::new()),
        )?;

        let mut last_level = 1;
        engine.subscribe(move |snapshot| {
            if snapshot.level != last_level {
                last_level = snapshot.level;
                println!("Reached level {} (score {})", snapshot.level, snapshot.score);
            }
        });

        engine.start();

        let mut frames = 0;
        while frames < max_frames && scheduler.next_due().is_some() {
            let direction = autopilot::steer(engine.state());
            engine.set_paddle_direction(direction);
            engine.on_frame();
            frames += 1;
        }

        let snapshot = engine.snapshot();
        println!(
            "After {} frames: score {}, level {}, lives {}{}",
            frames,
            snapshot.score,
            snapshot.level,
            snapshot.lives,
            if snapshot.is_game_over { " (game over)" } else { "" }
        );
        for (achievement, unlocked) in achievements::listing(&snapshot.achievements) {
            if unlocked {
                println!("  unlocked: {}", achievement.title);
            }
        }

        engine.destroy();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Breaker (native) starting...");
    log::info!("Running headless autopilot session - build for wasm32 to play");

    let max_frames = std::env::args().nth(1).and_then(|arg| arg.parse().ok());
    if let Err(e) = native::run(max_frames) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
