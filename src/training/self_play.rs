//! Self-play training loop.
//!
//! One `ActionSelector` plays both seats. After each game the captured
//! decisions are expanded into their 8 symmetric variants, the loser's
//! decisions are dropped (draws keep both sides), and the survivors join
//! the run's corpus. Once all games are played the evaluator is trained
//! on the corpus and saved.

use std::path::PathBuf;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{Result, TrainError, TrainerConfig};
use crate::nn::{FitReport, LinearPolicy, PolicyEvaluator};
use crate::play::{play_self, GameRecord};
use crate::rules::GameEngine;

use super::example::{filter_by_outcome, TrainingExample};
use super::record::{Percentages, WinLossRecord};
use super::selector::ActionSelector;
use super::symmetry::expand_example;

/// One finished self-play game and the examples it contributed.
#[derive(Clone, Debug)]
pub struct GameReport {
    /// The game as played.
    pub game: GameRecord,

    /// Decisions captured before augmentation and filtering.
    pub captured: usize,

    /// Augmented examples that survived the outcome filter.
    pub examples: Vec<TrainingExample>,
}

/// What a call to [`SelfPlayTrainer::run`] did.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Games played.
    pub games: usize,

    /// Size of the training corpus.
    pub examples: usize,

    /// `None` when the corpus was empty and no training happened.
    pub fit: Option<FitReport>,

    /// Where the model was saved, if it was.
    pub model_path: Option<PathBuf>,

    /// Cumulative win/lose/draw shares of the tracked color.
    pub percentages: Option<Percentages>,
}

/// Runs self-play games and trains the evaluator on the results.
pub struct SelfPlayTrainer<E: GameEngine + Clone, P: PolicyEvaluator> {
    /// Engine used to drive games. The selector holds its own copy for
    /// legality queries.
    engine: E,

    /// Shared by both seats.
    selector: ActionSelector<E, P>,

    config: TrainerConfig,

    /// Cumulative across runs.
    record: WinLossRecord,
}

impl<E: GameEngine + Clone, P: PolicyEvaluator> SelfPlayTrainer<E, P> {
    /// Create a trainer.
    ///
    /// Fails if the config is invalid or the engine, evaluator and config
    /// disagree on the board size.
    pub fn new(engine: E, evaluator: P, config: &TrainerConfig) -> Result<Self> {
        config.validate()?;
        for (what, size) in [
            ("engine", engine.board_size()),
            ("evaluator", evaluator.board_size()),
        ] {
            if size != config.board_size {
                return Err(TrainError::InvalidConfig(format!(
                    "{what} board size {size} does not match configured size {}",
                    config.board_size
                )));
            }
        }

        Ok(Self {
            selector: ActionSelector::new(engine.clone(), evaluator, config),
            engine,
            config: config.clone(),
            record: WinLossRecord::new(),
        })
    }

    /// Play one game with collection enabled and return its examples.
    ///
    /// Collection is switched off again before returning, whether or not
    /// the game finished cleanly.
    pub fn play_one(&mut self) -> Result<GameReport> {
        self.selector.set_collecting(true);
        self.selector.take_captured();

        let played = play_self(&self.engine, &mut self.selector);
        self.selector.set_collecting(false);
        let captured = self.selector.take_captured();
        let game = played?;

        let mut augmented = Vec::with_capacity(captured.len() * 8);
        for example in &captured {
            augmented.extend(expand_example(example)?);
        }
        let examples = filter_by_outcome(augmented, game.outcome);

        self.record.record(game.outcome, self.config.tracked_color);
        debug!(
            "{}: {} moves, {} captured, {} kept after augmentation",
            game.outcome,
            game.len(),
            captured.len(),
            examples.len()
        );

        Ok(GameReport {
            captured: captured.len(),
            examples,
            game,
        })
    }

    /// Play `num_games` games, then train on everything collected and save.
    ///
    /// With no examples (e.g. `num_games == 0`) the evaluator is neither
    /// trained nor saved.
    pub fn run(
        &mut self,
        num_games: usize,
        batch_size: usize,
        epochs: usize,
    ) -> Result<TrainingSummary> {
        let mut corpus = Vec::new();
        for i in 0..num_games {
            if self.config.verbose {
                info!("Self playing {}/{}", i + 1, num_games);
            }
            let report = self.play_one()?;
            corpus.extend(report.examples);
        }

        let mut summary = TrainingSummary {
            games: num_games,
            examples: corpus.len(),
            ..Default::default()
        };

        if corpus.is_empty() {
            warn!("No training examples collected; skipping fit");
        } else {
            let fit = self
                .selector
                .evaluator_mut()
                .fit(&corpus, batch_size, epochs)?;
            info!(
                "Trained on {} examples: {} epochs, loss {:.4} (best {:.4})",
                corpus.len(),
                fit.epochs_run,
                fit.final_loss,
                fit.best_loss
            );

            let dir = &self.config.model_dir;
            self.selector.evaluator().save(dir)?;
            let path = self.selector.evaluator().model_path(dir);
            info!("Model saved to {}", path.display());

            summary.fit = Some(fit);
            summary.model_path = Some(path);
        }

        summary.percentages = self.record.report();
        Ok(summary)
    }

    /// `run` with the game count, batch size and epochs from the config.
    pub fn run_configured(&mut self) -> Result<TrainingSummary> {
        self.run(self.config.games, self.config.batch_size, self.config.epochs)
    }

    /// Cumulative results of the tracked color.
    pub fn record(&self) -> &WinLossRecord {
        &self.record
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn selector(&self) -> &ActionSelector<E, P> {
        &self.selector
    }

    pub fn evaluator(&self) -> &P {
        self.selector.evaluator()
    }

    /// Consume the trainer and return the evaluator.
    pub fn into_evaluator(self) -> P {
        self.selector.into_parts().1
    }
}

/// Load the saved model for the configured board size, or build one with
/// `init`.
///
/// A missing model is not an error. A model that exists but cannot be
/// read is.
pub fn load_or_init<P, F>(config: &TrainerConfig, init: F) -> Result<P>
where
    P: PolicyEvaluator,
    F: FnOnce(&TrainerConfig) -> P,
{
    match P::load(&config.model_dir, config)? {
        Some(policy) => {
            info!("Model loaded from {}", policy.model_path(&config.model_dir).display());
            Ok(policy)
        }
        None => {
            info!(
                "No model exists at {}; starting from fresh weights",
                crate::nn::model_path(&config.model_dir, config.board_size).display()
            );
            Ok(init(config))
        }
    }
}

/// `load_or_init` for the linear policy.
pub fn load_or_init_policy(config: &TrainerConfig) -> Result<LinearPolicy> {
    load_or_init(config, LinearPolicy::from_config)
}
