pub mod arcade;
#[cfg(feature = "physics")]
pub mod physics;
pub mod scene;
pub mod scripted;
pub mod time;
