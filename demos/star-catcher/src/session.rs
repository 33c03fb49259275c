/// Where a session is in its lifecycle. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Score and lifecycle of one play-through.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    score: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Playing,
            score: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Add points while playing. Returns the new score.
    pub fn add_score(&mut self, points: u32) -> u32 {
        if !self.is_over() {
            self.score += points;
        }
        self.score
    }

    /// Enter `GameOver`. Returns false if the session had already ended.
    pub fn end(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.state = SessionState::GameOver;
        true
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
