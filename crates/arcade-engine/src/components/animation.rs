//! Animation component for sprite frame sequences.
//!
//! Named sequences of atlas frames, played back at a fixed rate.

use std::collections::HashMap;

/// How many times a sequence plays after the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop until something else is played.
    Forever,
    /// Play `1 + n` times, then hold the last frame.
    Count(u32),
}

/// Definition of a single animation sequence.
#[derive(Debug, Clone)]
pub struct AnimationDef {
    /// Frames as (col, row) pairs in the atlas.
    pub frames: Vec<(f32, f32)>,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub repeat: Repeat,
}

impl AnimationDef {
    /// Consecutive columns of one row, looping forever.
    pub fn horizontal_strip(row: f32, start_col: f32, frame_count: u32, fps: f32) -> Self {
        let frames = (0..frame_count)
            .map(|i| (start_col + i as f32, row))
            .collect();
        Self {
            frames,
            frame_duration: 1.0 / fps,
            repeat: Repeat::Forever,
        }
    }

    /// Sprite-sheet frame numbers `start..=end`, counted row-major over a sheet
    /// `columns` frames wide. Plays once.
    pub fn sheet_range(columns: u32, start: u32, end: u32, fps: f32) -> Self {
        let columns = columns.max(1);
        let frames = (start..=end)
            .map(|frame| ((frame % columns) as f32, (frame / columns) as f32))
            .collect();
        Self {
            frames,
            frame_duration: 1.0 / fps,
            repeat: Repeat::Count(0),
        }
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }
}

/// Animation state for an entity.
#[derive(Debug, Clone)]
pub struct AnimationComponent {
    pub animations: HashMap<String, AnimationDef>,
    /// Currently selected animation name.
    pub current: String,
    pub frame_index: usize,
    /// Time accumulated in the current frame.
    pub frame_timer: f32,
    pub playing: bool,
    /// Completed passes of the current animation.
    pub passes: u32,
}

impl Default for AnimationComponent {
    fn default() -> Self {
        Self {
            animations: HashMap::new(),
            current: String::new(),
            frame_index: 0,
            frame_timer: 0.0,
            playing: false,
            passes: 0,
        }
    }
}

impl AnimationComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, def: AnimationDef) {
        self.animations.insert(name.into(), def);
    }

    /// Play a named animation from its first frame. Unknown names are ignored.
    pub fn play(&mut self, name: &str) {
        if self.animations.contains_key(name) {
            self.current = name.to_string();
            self.frame_index = 0;
            self.frame_timer = 0.0;
            self.passes = 0;
            self.playing = true;
        }
    }

    /// Play unless `name` is already the running animation.
    pub fn play_if_different(&mut self, name: &str) {
        if !(self.playing && self.current == name) {
            self.play(name);
        }
    }

    pub fn current_def(&self) -> Option<&AnimationDef> {
        self.animations.get(&self.current)
    }

    /// Current frame (col, row) for sprite rendering.
    pub fn current_frame(&self) -> Option<(f32, f32)> {
        self.current_def()
            .and_then(|def| def.frames.get(self.frame_index).copied())
    }

    /// Advance by dt seconds. Returns true if the frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing {
            return false;
        }

        let Some(def) = self.animations.get(&self.current) else {
            return false;
        };

        if def.frames.is_empty() || def.frame_duration <= 0.0 {
            return false;
        }

        self.frame_timer += dt;
        let mut frame_changed = false;

        while self.frame_timer >= def.frame_duration {
            self.frame_timer -= def.frame_duration;

            if self.frame_index + 1 < def.frames.len() {
                self.frame_index += 1;
                frame_changed = true;
                continue;
            }

            let again = match def.repeat {
                Repeat::Forever => true,
                Repeat::Count(n) => self.passes < n,
            };
            self.passes += 1;
            if again {
                frame_changed |= self.frame_index != 0;
                self.frame_index = 0;
            } else {
                self.playing = false;
                break;
            }
        }

        frame_changed
    }
}
