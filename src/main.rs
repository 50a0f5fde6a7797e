//! Skill Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent};

    use skill_pong::Settings;
    use skill_pong::renderer::{CanvasPainter, render};
    use skill_pong::sim::{FrameInput, GameEvent, GameState, Score, SkillKind, tick};

    const CANVAS_ID: &str = "pong";
    const SCORE_LEFT_ID: &str = "score-left";
    const SCORE_RIGHT_ID: &str = "score-right";

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        painter: CanvasPainter,
        /// Decorative randomness, kept apart from the simulation RNG
        visuals: Pcg32,
        input: FrameInput,
        document: Document,
    }

    impl Game {
        /// Step the simulation one frame and push events to the page
        fn update(&mut self) {
            let input = self.input.take();
            tick(&mut self.state, &input);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) => self.update_score(score),
                    GameEvent::PointScored(side) => log::debug!("Point to {:?}", side),
                    GameEvent::Destroyed => log::info!("Game destroyed"),
                    _ => {}
                }
            }
        }

        fn render(&mut self) {
            let frame = render(&self.state, &self.settings, &mut self.visuals);
            if let Err(e) = self.painter.paint(&frame) {
                log::warn!("Paint failed in {} mode: {:?}", frame.mode.as_str(), e);
            }
        }

        fn update_score(&self, score: Score) {
            for (id, value) in [(SCORE_LEFT_ID, score.left), (SCORE_RIGHT_ID, score.right)] {
                if let Some(el) = self.document.get_element_by_id(id) {
                    el.set_text_content(Some(&value.to_string()));
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Skill Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no #pong canvas")?
            .dyn_into()?;

        let settings = Settings::load(&canvas);
        let arena = settings.arena;
        canvas.set_width(arena.width as u32);
        canvas.set_height(arena.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;
        let mut painter = CanvasPainter::new(ctx, arena.width as f64, arena.height as f64);
        painter.load_sprites(&document);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = GameState::with_arena(arena, seed).map_err(|e| e.to_string())?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            painter,
            visuals: Pcg32::seed_from_u64(seed ^ 0x5eed),
            input: FrameInput::default(),
            document,
        }));
        {
            let g = game.borrow();
            g.update_score(g.state.play.score);
        }

        setup_input_handlers(&canvas, game.clone());
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        request_animation_frame(game);

        log::info!("Skill Pong running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let y = event.client_y() as f32 - rect.top() as f32;
            game.borrow_mut().input.pointer_y = Some(y);
        });
        let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }

        request_animation_frame(game);
    }

    /// Queue a skill for the next frame
    pub fn queue_skill(name: &str) {
        let kind = match name.parse::<SkillKind>() {
            Ok(kind) => kind,
            Err(e) => {
                log::warn!("{e}");
                return;
            }
        };
        GAME.with(|slot| match slot.borrow().as_ref() {
            Some(game) => game.borrow_mut().input.skill = Some(kind),
            None => log::warn!("Skill {} requested before the game started", kind.as_str()),
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Trigger a skill by name: `wave`, `bombard`, `horror` (or their character
/// names). Ignored while another skill is running.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = activateSkill)]
pub fn activate_skill(name: &str) {
    wasm_game::queue_skill(name);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: `skill-pong [seed] [skill] [frames]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), skill_pong::PongError> {
    use skill_pong::Settings;
    use skill_pong::sim::{FrameInput, GameEvent, GameState, SkillKind, tick};

    const DEFAULT_FRAMES: u64 = 600;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skill Pong (native) starting...");

    let settings = Settings::load();
    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Bad seed {arg:?}, using 0");
            0
        }),
        None => settings.seed.unwrap_or(0),
    };
    let skill = args.next().map(|name| name.parse::<SkillKind>()).transpose()?;
    let frames = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Bad frame count {arg:?}, using {DEFAULT_FRAMES}");
            DEFAULT_FRAMES
        }),
        None => DEFAULT_FRAMES,
    };

    let mut state = GameState::with_arena(settings.arena, seed)?;
    log::info!("Simulating {} frames with seed {}", frames, seed);

    for frame in 0..frames {
        let input = FrameInput {
            pointer_y: None,
            skill: if frame == 0 { skill } else { None },
        };
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::WallBounce | GameEvent::PaddleHit(_) => log::trace!("{event:?}"),
                GameEvent::ScoreChanged(_) => log::debug!("{event:?} on frame {frame}"),
                _ => log::info!("{event:?} on frame {frame}"),
            }
        }
    }

    let summary = serde_json::json!({
        "seed": seed,
        "frames": state.time_frames,
        "skill": state.skill,
        "match": state.play,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
