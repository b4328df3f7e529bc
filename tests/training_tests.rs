//! Integration tests for the self-play trainer.
//!
//! A scripted engine stands in for the board rules so each game's length
//! and outcome are known in advance.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use othello_selfplay::core::{Board, Color, Move, MoveList, Result, TrainError, TrainerConfig};
use othello_selfplay::nn::{FitReport, LinearPolicy, PolicyEvaluator};
use othello_selfplay::rules::{GameEngine, GameOutcome, OthelloEngine};
use othello_selfplay::training::{
    filter_by_outcome, load_or_init, load_or_init_policy, SelfPlayTrainer, TrainingExample,
    WinLossRecord,
};

// =============================================================================
// Test Collaborators
// =============================================================================

/// Every empty cell is legal. The game ends after `plies` placements with
/// the next outcome from `outcomes`.
#[derive(Clone)]
struct ScriptedEngine {
    size: usize,
    plies: usize,
    outcomes: Vec<GameOutcome>,
    games_started: Cell<usize>,
}

impl ScriptedEngine {
    fn new(size: usize, plies: usize, outcomes: Vec<GameOutcome>) -> Self {
        Self {
            size,
            plies,
            outcomes,
            games_started: Cell::new(0),
        }
    }
}

impl GameEngine for ScriptedEngine {
    fn board_size(&self) -> usize {
        self.size
    }

    fn new_board(&self) -> Board {
        self.games_started.set(self.games_started.get() + 1);
        Board::new(self.size)
    }

    fn valid_moves(&self, board: &Board, _color: Color) -> MoveList {
        (0..board.area())
            .map(|i| Move::from_index(i, self.size))
            .filter(|&mv| board.is_empty_at(mv))
            .collect()
    }

    fn execute_move(&self, board: &mut Board, color: Color, mv: Move) -> Result<()> {
        if !board.is_empty_at(mv) {
            return Err(TrainError::IllegalMove { mv, color });
        }
        board.set(mv, Some(color));
        Ok(())
    }

    fn outcome(&self, board: &Board) -> Option<GameOutcome> {
        if board.area() - board.empty_count() < self.plies {
            return None;
        }
        let game = self.games_started.get().saturating_sub(1);
        Some(self.outcomes[game % self.outcomes.len()])
    }
}

/// Uniform scores; counts `fit` and `save` calls.
struct CountingPolicy {
    size: usize,
    fit_calls: usize,
    save_calls: Cell<usize>,
    last_corpus: Vec<TrainingExample>,
    last_batch: Option<(usize, usize)>,
}

impl CountingPolicy {
    fn new(size: usize) -> Self {
        Self {
            size,
            fit_calls: 0,
            save_calls: Cell::new(0),
            last_corpus: Vec::new(),
            last_batch: None,
        }
    }
}

impl PolicyEvaluator for CountingPolicy {
    fn board_size(&self) -> usize {
        self.size
    }

    fn predict(&self, _board: &Board) -> Vec<f32> {
        vec![0.5; self.size * self.size]
    }

    fn fit(
        &mut self,
        examples: &[TrainingExample],
        batch_size: usize,
        epochs: usize,
    ) -> Result<FitReport> {
        self.fit_calls += 1;
        self.last_corpus = examples.to_vec();
        self.last_batch = Some((batch_size, epochs));
        Ok(FitReport {
            epochs_run: epochs,
            ..Default::default()
        })
    }

    fn save(&self, _dir: &Path) -> Result<()> {
        self.save_calls.set(self.save_calls.get() + 1);
        Ok(())
    }
}

/// Always returns a vector one entry short.
struct ShortPolicy(usize);

impl PolicyEvaluator for ShortPolicy {
    fn board_size(&self) -> usize {
        self.0
    }

    fn predict(&self, _board: &Board) -> Vec<f32> {
        vec![1.0; self.0 * self.0 - 1]
    }

    fn fit(&mut self, _: &[TrainingExample], _: usize, _: usize) -> Result<FitReport> {
        Ok(FitReport::default())
    }

    fn save(&self, _dir: &Path) -> Result<()> {
        Ok(())
    }
}

fn config(size: usize) -> TrainerConfig {
    TrainerConfig::default()
        .with_board_size(size)
        .with_verbose(false)
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "othello-selfplay-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn trainer(
    plies: usize,
    outcomes: Vec<GameOutcome>,
) -> SelfPlayTrainer<ScriptedEngine, CountingPolicy> {
    SelfPlayTrainer::new(
        ScriptedEngine::new(4, plies, outcomes),
        CountingPolicy::new(4),
        &config(4),
    )
    .unwrap()
}

// =============================================================================
// Outcome Filtering
// =============================================================================

#[test]
fn test_black_win_keeps_only_black_variants() {
    let mut trainer = trainer(4, vec![GameOutcome::BlackWins]);
    let report = trainer.play_one().unwrap();

    // B, W, B, W
    assert_eq!(report.captured, 4);
    assert_eq!(report.examples.len(), 2 * 8);
    assert!(report.examples.iter().all(|e| e.color == Color::Black));
}

#[test]
fn test_white_win_keeps_only_white_variants() {
    let mut trainer = trainer(5, vec![GameOutcome::WhiteWins]);
    let report = trainer.play_one().unwrap();

    // B, W, B, W, B
    assert_eq!(report.captured, 5);
    assert_eq!(report.examples.len(), 2 * 8);
    assert!(report.examples.iter().all(|e| e.color == Color::White));
}

#[test]
fn test_draw_keeps_both_colors() {
    let mut trainer = trainer(4, vec![GameOutcome::Draw]);
    let report = trainer.play_one().unwrap();

    assert_eq!(report.examples.len(), 4 * 8);
    let blacks = report.examples.iter().filter(|e| e.color == Color::Black).count();
    assert_eq!(blacks, 2 * 8);
}

#[test]
fn test_filter_by_outcome_free_function() {
    let black = TrainingExample::one_hot(Board::new(4), 0, Color::Black).unwrap();
    let white = TrainingExample::one_hot(Board::new(4), 1, Color::White).unwrap();
    let examples = vec![black.clone(), white.clone(), black.clone()];

    assert_eq!(
        filter_by_outcome(examples.clone(), GameOutcome::BlackWins),
        vec![black.clone(), black.clone()]
    );
    assert_eq!(
        filter_by_outcome(examples.clone(), GameOutcome::WhiteWins),
        vec![white]
    );
    assert_eq!(filter_by_outcome(examples.clone(), GameOutcome::Draw), examples);
}

// =============================================================================
// Capture Discipline
// =============================================================================

#[test]
fn test_colors_read_per_call_not_cached() {
    let mut trainer = trainer(4, vec![GameOutcome::Draw]);
    let report = trainer.play_one().unwrap();

    // Each decision's 8 variants carry the color of the seat that played it.
    let colors: Vec<Color> = report.examples.chunks(8).map(|c| c[0].color).collect();
    assert_eq!(
        colors,
        vec![Color::Black, Color::White, Color::Black, Color::White]
    );
    let played: Vec<Color> = report.game.moves.iter().map(|(c, _)| *c).collect();
    assert_eq!(colors, played);
}

#[test]
fn test_captured_boards_are_pre_move_snapshots() {
    let mut trainer = trainer(4, vec![GameOutcome::Draw]);
    let report = trainer.play_one().unwrap();

    // The identity variant is the 7th of each group.
    let originals: Vec<&TrainingExample> = report.examples.chunks(8).map(|c| &c[6]).collect();
    for (i, example) in originals.iter().enumerate() {
        assert_eq!(example.board.empty_count(), 16 - i);
        let (_, mv) = report.game.moves[i];
        assert_eq!(example.target_index(), Some(mv.index(4)));
        assert!(example.board.is_empty_at(mv));
    }
    // The final board moved on without touching the snapshots.
    assert_eq!(report.game.board.empty_count(), 12);
}

#[test]
fn test_collecting_off_after_run() {
    let mut trainer = trainer(4, vec![GameOutcome::BlackWins]);
    trainer.run(2, 8, 1).unwrap();
    assert!(!trainer.selector().is_collecting());
    assert!(trainer.selector().captured().is_empty());
}

// =============================================================================
// Training Run
// =============================================================================

#[test]
fn test_run_zero_games_no_fit_no_save() {
    let mut trainer = trainer(4, vec![GameOutcome::BlackWins]);
    let summary = trainer.run(0, 64, 50).unwrap();

    assert_eq!(summary.examples, 0);
    assert!(summary.fit.is_none());
    assert_eq!(trainer.evaluator().fit_calls, 0);
    assert_eq!(trainer.evaluator().save_calls.get(), 0);
    assert_eq!(trainer.record().total(), 0);
}

#[test]
fn test_run_fits_once_on_whole_corpus() {
    let mut trainer = trainer(4, vec![GameOutcome::BlackWins, GameOutcome::Draw]);
    let summary = trainer.run(2, 32, 3).unwrap();

    // 16 from the black win, 32 from the draw
    assert_eq!(summary.examples, 48);
    assert_eq!(trainer.evaluator().fit_calls, 1);
    assert_eq!(trainer.evaluator().save_calls.get(), 1);
    assert_eq!(trainer.evaluator().last_corpus.len(), 48);
    assert_eq!(trainer.evaluator().last_batch, Some((32, 3)));
    assert_eq!(summary.fit.map(|f| f.epochs_run), Some(3));
}

#[test]
fn test_record_after_three_outcomes() {
    let mut trainer = trainer(
        4,
        vec![GameOutcome::BlackWins, GameOutcome::WhiteWins, GameOutcome::Draw],
    );
    let summary = trainer.run(3, 8, 1).unwrap();

    let mut expected = WinLossRecord::new();
    expected.record(GameOutcome::BlackWins, Color::Black);
    expected.record(GameOutcome::WhiteWins, Color::Black);
    expected.record(GameOutcome::Draw, Color::Black);
    assert_eq!(*trainer.record(), expected);
    assert_eq!(
        (trainer.record().wins(), trainer.record().losses(), trainer.record().draws()),
        (1, 1, 1)
    );

    let p = summary.percentages.unwrap();
    assert!((p.win + p.lose + p.draw - 100.0).abs() < 1e-9);
}

#[test]
fn test_tracked_white() {
    let mut trainer = SelfPlayTrainer::new(
        ScriptedEngine::new(4, 4, vec![GameOutcome::BlackWins]),
        CountingPolicy::new(4),
        &config(4).with_tracked_color(Color::White),
    )
    .unwrap();
    trainer.run(2, 8, 1).unwrap();
    assert_eq!(trainer.record().losses(), 2);
    assert_eq!(trainer.record().wins(), 0);
}

#[test]
fn test_wrong_policy_length_aborts_run() {
    let mut trainer = SelfPlayTrainer::new(
        ScriptedEngine::new(4, 4, vec![GameOutcome::Draw]),
        ShortPolicy(4),
        &config(4),
    )
    .unwrap();

    let err = trainer.run(1, 8, 1).unwrap_err();
    assert!(matches!(err, TrainError::PolicyLength { expected: 16, actual: 15 }));
    assert!(!trainer.selector().is_collecting());
    assert_eq!(trainer.record().total(), 0);
}

#[test]
fn test_invalid_config_rejected() {
    let result = SelfPlayTrainer::new(
        ScriptedEngine::new(4, 4, vec![GameOutcome::Draw]),
        CountingPolicy::new(4),
        &config(4).with_batch_size(0),
    );
    assert!(matches!(result, Err(TrainError::InvalidConfig(_))));
}

// =============================================================================
// With the Real Rules and Model
// =============================================================================

#[test]
fn test_linear_policy_end_to_end() {
    let dir = scratch_dir("e2e");
    let config = config(4).with_model_dir(&dir).with_seed(7);

    let policy = load_or_init_policy(&config).unwrap();
    let mut trainer = SelfPlayTrainer::new(OthelloEngine::new(4), policy, &config).unwrap();
    let summary = trainer.run(2, 16, 2).unwrap();

    assert!(summary.examples > 0);
    let path = summary.model_path.expect("model saved");
    assert!(path.exists());
    assert!(LinearPolicy::load(&dir, &config).unwrap().is_some());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_run_zero_leaves_saved_model_untouched() {
    let dir = scratch_dir("zero");
    let config = config(4).with_model_dir(&dir);

    let policy = LinearPolicy::from_config(&config);
    policy.save(&dir).unwrap();
    let path = policy.model_path(&dir);
    let before = std::fs::read(&path).unwrap();

    let mut trainer = SelfPlayTrainer::new(OthelloEngine::new(4), policy, &config).unwrap();
    trainer.run(0, 16, 2).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), before);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_run_zero_creates_no_model() {
    let dir = scratch_dir("none");
    let config = config(4).with_model_dir(&dir);

    let policy = load_or_init_policy(&config).unwrap();
    let mut trainer = SelfPlayTrainer::new(OthelloEngine::new(4), policy, &config).unwrap();
    trainer.run(0, 16, 2).unwrap();

    assert!(!dir.exists());
}

#[test]
fn test_unreadable_model_is_fatal() {
    let dir = scratch_dir("unreadable");
    let config = config(4).with_model_dir(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("model_4x4.bin"), b"garbage").unwrap();

    let err = load_or_init_policy(&config).unwrap_err();
    assert!(matches!(err, TrainError::CorruptModel { .. }));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_generic_loader_reads_saved_linear_policy() {
    let dir = scratch_dir("generic");
    let config = config(4).with_model_dir(&dir).with_seed(21);
    let saved = LinearPolicy::from_config(&config);
    saved.save(&dir).unwrap();

    let fresh = |c: &TrainerConfig| LinearPolicy::from_config(&c.clone().with_seed(99));
    let loaded = load_or_init(&config, fresh).unwrap();
    let board = OthelloEngine::new(4).new_board();
    assert_eq!(loaded.predict(&board), saved.predict(&board));

    let _ = std::fs::remove_dir_all(&dir);
}
