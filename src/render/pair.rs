use rand::Rng;

use crate::{
    config::model::PuzzleConfig,
    foundation::error::SpotgridResult,
    placement::target::PuzzleInstance,
    render::compositor::{Compositor, RenderResult},
};

/// Question and answer images of one puzzle instance.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPair {
    instance: PuzzleInstance,
    question: RenderResult,
    answer: RenderResult,
}

impl RenderPair {
    pub(crate) fn new(instance: PuzzleInstance, question: RenderResult, answer: RenderResult) -> Self {
        Self {
            instance,
            question,
            answer,
        }
    }

    /// Instance both images were rendered from.
    pub fn instance(&self) -> &PuzzleInstance {
        &self.instance
    }

    /// Image without the highlight.
    pub fn question(&self) -> &RenderResult {
        &self.question
    }

    /// Image with the target highlighted.
    pub fn answer(&self) -> &RenderResult {
        &self.answer
    }
}

/// Per-session puzzle state: current config, current instance and its cached pair.
///
/// Rendering never picks a new target. Only [`PuzzleSession::regenerate`] does, and it
/// drops the cached pair. A server keeps one session per client.
pub struct PuzzleSession {
    compositor: Compositor,
    config: PuzzleConfig,
    instance: PuzzleInstance,
    cached: Option<RenderPair>,
}

impl PuzzleSession {
    /// Start a session with a fresh puzzle for `config`.
    pub fn new(config: PuzzleConfig) -> Self {
        let instance = PuzzleInstance::new(&config);
        Self::with_instance(config, instance)
    }

    /// Start a session from an existing instance.
    pub fn with_instance(config: PuzzleConfig, instance: PuzzleInstance) -> Self {
        Self {
            compositor: Compositor::new(),
            config,
            instance,
            cached: None,
        }
    }

    /// Current config.
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    /// Current puzzle instance.
    pub fn instance(&self) -> &PuzzleInstance {
        &self.instance
    }

    /// Whether a rendered pair is cached for the current instance and config.
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Replace the config, keeping the target when it still fits the new grid.
    ///
    /// The cached pair is dropped whenever the config actually changes.
    pub fn set_config(&mut self, config: PuzzleConfig) {
        if config == self.config {
            return;
        }
        self.cached = None;
        let fits = self
            .instance
            .target()
            .fits(config.grid.rows, config.grid.cols);
        self.config = config;
        if !fits {
            tracing::debug!("grid shrank below the current target; regenerating puzzle");
            self.instance = self.instance.regenerate(&self.config);
        }
    }

    /// Rendered pair for the current instance, rendering on first use only.
    pub fn pair(&mut self) -> SpotgridResult<&RenderPair> {
        let pair = match self.cached.take() {
            Some(pair) => pair,
            None => self.compositor.render_pair(&self.config, &self.instance)?,
        };
        Ok(self.cached.insert(pair))
    }

    /// Start a new puzzle instance and invalidate the cached pair.
    pub fn regenerate(&mut self) -> &PuzzleInstance {
        self.regenerate_with(&mut rand::thread_rng())
    }

    /// Like [`PuzzleSession::regenerate`] but drawing from `rng`.
    pub fn regenerate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &PuzzleInstance {
        self.instance = self.instance.regenerate_with(rng, &self.config);
        self.cached = None;
        tracing::debug!(puzzle = self.instance.id().0, target = ?self.instance.target(), "regenerated puzzle");
        &self.instance
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pair.rs"]
mod tests;
