pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{run_frame, Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::label::TextLabel;
pub use components::sprite::{SpriteComponent, AtlasId, Tint};
pub use components::animation::{AnimationComponent, AnimationDef, Repeat};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::arcade::{
    ArcadeWorld, BodyDesc, BodyGroup, BodyType, Contact,
    RelationDesc, RelationId, RelationKind, MAX_GROUPS,
};
pub use core::scripted::ScriptedWorld;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{keys, CursorKeys, InputEvent, InputQueue};
pub use assets::error::AssetError;
pub use assets::manifest::AssetManifest;
pub use assets::registry::{AssetRegistry, SheetInfo};
pub use systems::render::build_render_buffer;
pub use systems::text::FontConfig;
pub use systems::animation::tick_animations;

#[cfg(feature = "physics")]
pub use core::physics::{PhysicsWorld, PhysicsBody};
