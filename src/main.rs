//! Kite Pilot entry point
//!
//! Handles platform-specific initialization and wires the DOM to the game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, PointerEvent};

    use kite_pilot::audio::web::AudioManager;
    use kite_pilot::consts::{WORLD_HEIGHT, WORLD_WIDTH};
    use kite_pilot::game::{FrameObserver, FrameReport, start_round};
    use kite_pilot::highscores::{DISPLAYED_SCORES, format_date, format_entry};
    use kite_pilot::persistence::LocalStore;
    use kite_pilot::platform::web::{RafScheduler, now_ms};
    use kite_pilot::platform::{InputAction, action_for_key};
    use kite_pilot::renderer::{RenderState, WgpuRenderer};
    use kite_pilot::sim::TickOutcome;
    use kite_pilot::{Game, Settings, Tuning};

    /// Everything the DOM handlers share
    #[derive(Clone)]
    struct App {
        game: Rc<RefCell<Game>>,
        settings: Rc<RefCell<Settings>>,
        scheduler: Rc<RafScheduler>,
        observer: FrameObserver,
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn update_mute_button(settings: &Settings) {
        set_text("mute-btn", if settings.muted { "Sound: off" } else { "Sound: on" });
    }

    /// Refresh the HUD after each frame; show the game-over panel once the round ends
    fn on_frame(game: &Rc<RefCell<Game>>, report: &FrameReport) {
        set_text("score", &report.score.to_string());
        if report.outcome == TickOutcome::Ended {
            let g = game.borrow();
            if let Some(result) = g.last_result() {
                set_text("final-score", &result.score.to_string());
                let rank = match result.rank {
                    Some(r) => format!("Leaderboard rank #{}", r),
                    None => String::new(),
                };
                set_text("final-rank", &rank);
            }
            drop(g);
            set_visible("game-over", true);
            render_leaderboard(game);
        }
    }

    /// Rebuild the leaderboard list from storage
    fn render_leaderboard(game: &Rc<RefCell<Game>>) {
        let document = document();
        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_inner_html("");

        let scores = game.borrow().top_scores(DISPLAYED_SCORES);
        if scores.is_empty() {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some("No scores yet"));
                let _ = list.append_child(&li);
            }
            return;
        }

        for (i, entry) in scores.iter().enumerate() {
            let Ok(li) = document.create_element("li") else {
                continue;
            };
            li.set_text_content(Some(&format_entry(i + 1, entry)));
            if let Ok(small) = document.create_element("small") {
                small.set_text_content(Some(&format_date(&entry.date)));
                let _ = li.append_child(&small);
            }
            let _ = list.append_child(&li);
        }
    }

    fn start(app: &App) {
        let name = document()
            .get_element_by_id("player-name")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default();

        {
            let mut settings = app.settings.borrow_mut();
            if settings.last_player_name != name {
                settings.last_player_name = name.clone();
                settings.save(&mut LocalStore);
            }
        }

        app.game.borrow_mut().resume_audio();
        set_visible("overlay", false);
        set_visible("game-over", false);
        set_text("score", "0");

        let seed = js_sys::Date::now() as u64;
        start_round(&app.game, &app.scheduler, &app.observer, &name, seed, now_ms());
    }

    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        if let Some(btn) = document().get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Kite Pilot starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution; CSS keeps the 2:3 aspect
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load(&LocalStore);
        let mut game = Game::new(Tuning::default(), Box::new(LocalStore));
        game.set_audio(Box::new(AudioManager::new(settings.effective_volume())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, (WORLD_WIDTH, WORLD_HEIGHT)).await {
                            Ok(state) => {
                                game.set_renderer(Box::new(WgpuRenderer::new(state, settings.show_grid)))
                            }
                            Err(e) => log::error!("Failed to create device: {:?}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {:?}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {:?}", e),
        }

        game.redraw();

        let game = Rc::new(RefCell::new(game));
        let observer: FrameObserver = {
            let game = Rc::downgrade(&game);
            Rc::new(move |report: &FrameReport| {
                if let Some(game) = game.upgrade() {
                    on_frame(&game, report);
                }
            })
        };

        let app = App {
            game,
            settings: Rc::new(RefCell::new(settings)),
            scheduler: Rc::new(RafScheduler),
            observer,
        };

        // Pre-fill the name field
        if let Some(input) = document
            .get_element_by_id("player-name")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(&app.settings.borrow().last_player_name);
        }
        update_mute_button(&app.settings.borrow());
        render_leaderboard(&app.game);

        setup_input_handlers(&canvas, &app);
        setup_buttons(&app);

        set_visible("overlay", true);
        log::info!("Kite Pilot ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: &App) {
        // Pointer down anywhere on the canvas flaps
        {
            let game = app.game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().flap();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = app.game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(InputAction::Flap) = action_for_key(&event.code()) {
                    // Keep Space from scrolling or pressing a focused button
                    let mut g = game.borrow_mut();
                    if g.is_running() {
                        event.prevent_default();
                        g.flap();
                    }
                }
            });
            let _ = web_sys::window()
                .unwrap()
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: &App) {
        {
            let app = app.clone();
            on_click("start-btn", move |_| start(&app));
        }
        {
            let app = app.clone();
            on_click("restart-btn", move |_| start(&app));
        }
        {
            let app = app.clone();
            on_click("mute-btn", move |_| {
                let mut settings = app.settings.borrow_mut();
                settings.toggle_mute();
                settings.save(&mut LocalStore);
                let mut game = app.game.borrow_mut();
                game.set_volume(settings.effective_volume());
                game.resume_audio();
                update_mute_button(&settings);
            });
        }
        {
            let app = app.clone();
            on_click("leaderboard-btn", move |_| {
                render_leaderboard(&app.game);
                set_visible("leaderboard-modal", true);
            });
        }
        on_click("close-leaderboard-btn", |_| set_visible("leaderboard-modal", false));
        {
            let app = app.clone();
            on_click("clear-scores-btn", move |_| {
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message("Clear all saved scores?").ok())
                    .unwrap_or(false);
                if confirmed {
                    app.game.borrow_mut().clear_scores();
                    render_leaderboard(&app.game);
                }
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Upper bound for the headless demo (one minute at the reference rate)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_MAX_FRAMES: u32 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kite_pilot::consts::REFERENCE_FRAME_MS;
    use kite_pilot::game::{FrameObserver, FrameReport, start_round};
    use kite_pilot::highscores::{DISPLAYED_SCORES, format_entry};
    use kite_pilot::persistence::MemoryStore;
    use kite_pilot::platform::ManualScheduler;
    use kite_pilot::sim::autopilot;
    use kite_pilot::{Game, Tuning};

    env_logger::init();
    log::info!("Kite Pilot (native) starting...");
    log::info!("The playable build targets the browser; running a headless autopilot round");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2024);

    let game = Rc::new(RefCell::new(Game::new(
        Tuning::default(),
        Box::new(MemoryStore::new()),
    )));
    let scheduler = Rc::new(ManualScheduler::new());
    let observer: FrameObserver = Rc::new(|report: &FrameReport| {
        for event in &report.events {
            log::debug!("{:?}", event);
        }
    });

    start_round(&game, &scheduler, &observer, "Autopilot", seed, 0.0);

    let mut now = 0.0;
    let mut frames = 0;
    while scheduler.pending() > 0 && frames < DEMO_MAX_FRAMES {
        if autopilot::should_flap(&game.borrow().round) {
            game.borrow_mut().flap();
        }
        scheduler.fire(now);
        now += REFERENCE_FRAME_MS;
        frames += 1;
    }

    let g = game.borrow();
    match g.last_result() {
        Some(result) => println!(
            "Round over after {} frames: {} scored {} ({:?})",
            frames, result.name, result.score, result.collision
        ),
        None => println!("Still flying after {} frames with score {}", frames, g.score()),
    }
    for (i, entry) in g.top_scores(DISPLAYED_SCORES).iter().enumerate() {
        println!("{}", format_entry(i + 1, entry));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
