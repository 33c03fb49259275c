use wasm_bindgen::prelude::*;
use arcade_engine::*;

pub mod config;
pub mod game;
pub mod session;

pub use config::{ConfigError, StarCatcherConfig};
pub use game::StarCatcher;
pub use session::{Session, SessionState};

arcade_web::export_game!(StarCatcher, "star-catcher");

/// Replace the game's tunables. Call after `game_init` and before the first
/// `game_tick`; throws a JS `Error` if the config is rejected.
#[wasm_bindgen]
pub fn game_load_config(json: &str) -> Result<(), JsValue> {
    StarCatcherConfig::from_json(json)
        .and_then(|config| with_runner(|r| r.game_mut().set_config(config)))
        .map_err(|err| {
            log::warn!("star-catcher: {}", err);
            js_sys::Error::new(&err.to_string()).into()
        })
}
