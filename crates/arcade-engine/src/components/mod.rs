pub mod animation;
pub mod entity;
pub mod label;
pub mod sprite;
