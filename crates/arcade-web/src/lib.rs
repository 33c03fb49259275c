pub mod runner;

pub use runner::GameRunner;

#[doc(hidden)]
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates the `thread_local!` storage for the GameRunner, a `with_runner()`
/// helper and the wasm-bindgen exports the host page calls: lifecycle, keyboard
/// input, manifest loading and buffer accessors.
///
/// The host calls `game_init`, then `game_load_manifest`, then `game_tick` every
/// animation frame. The game itself is initialized on the first tick.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use arcade_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// arcade_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `arcade_engine::Game`
///   and provides `new()`
/// - `$game_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            log::info!("{}: created", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        /// Throws a JS `Error` when the manifest cannot be registered.
        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) -> Result<(), JsValue> {
            with_runner(|r| r.load_manifest(json)).map_err(|err| {
                log::warn!("{}: {}", $game_name, err);
                $crate::js_sys::Error::new(&err.to_string()).into()
            })
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_size().x)
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_size().y)
        }

        /// Text of the label on the first entity tagged `tag`, or an empty string.
        #[wasm_bindgen]
        pub fn get_label_text(tag: &str) -> String {
            with_runner(|r| r.label_text(tag).unwrap_or_default().to_string())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
