use chess_core::Color;

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 6;
pub const DEFAULT_DEPTH: u8 = 3;

/// How the automated player searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// The side the engine plays and maximises for.
    pub color: Color,
    /// Plies searched from the root, clamped to `MIN_DEPTH..=MAX_DEPTH`.
    pub depth: u8,
    /// Alpha-beta cutoffs. Turning this off gives plain minimax with the same result.
    pub pruning: bool,
    /// Score root moves on the rayon pool.
    pub parallel: bool,
}

impl EngineConfig {
    pub fn new(color: Color, depth: u8) -> Self {
        Self {
            color,
            depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
            ..Self::default()
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            color: Color::Black,
            depth: DEFAULT_DEPTH,
            pruning: true,
            parallel: true,
        }
    }
}

/// Setup for a [`crate::Game`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Play against the engine; `None` for two human players.
    pub engine: Option<EngineConfig>,
    /// Starting position; the standard layout when `None`.
    pub fen: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_clamped() {
        assert_eq!(EngineConfig::new(Color::White, 0).depth, MIN_DEPTH);
        assert_eq!(EngineConfig::new(Color::White, 40).depth, MAX_DEPTH);
        assert_eq!(EngineConfig::new(Color::White, 2).depth, 2);
    }
}
