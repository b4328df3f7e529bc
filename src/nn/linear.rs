//! Trainable linear softmax policy.
//!
//! Logits are an affine map of the one-hot board planes (see `encoder`),
//! computed by a burn `Linear` layer on the NdArray backend and turned into
//! a distribution with softmax. Training minimises categorical
//! cross-entropy against the example targets with burn's Adam, and follows
//! a plateau schedule:
//! - learning rate × `lr_factor` after `lr_patience` epochs without a lower loss
//! - stop after `early_stop_patience` epochs without a lower loss
//! - the lowest-loss weights are kept when training ends

use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use burn::backend::{Autodiff, NdArray};
use burn::module::{AutodiffModule, Module, Param};
use burn::nn::Linear;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::record::{BinBytesRecorder, FullPrecisionSettings, Recorder};
use burn::tensor::activation::{log_softmax, softmax};
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Tensor, TensorData};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::{Board, Result, TrainError, TrainerConfig};
use crate::training::TrainingExample;

use super::encoder::{encode_board, feature_count};
use super::traits::{model_path, FitReport, PolicyEvaluator};

type TrainBackend = Autodiff<NdArray>;
type InferenceBackend = NdArray;
type Device = <TrainBackend as Backend>::Device;
type ModelRecorder = BinBytesRecorder<FullPrecisionSettings>;

const ADAM_EPSILON: f32 = 1e-7;
const INIT_SCALE: f32 = 0.01;

/// Single dense layer from board planes to cell logits.
#[derive(Module, Debug)]
struct PolicyNet<B: Backend> {
    output: Linear<B>,
}

impl<B: Backend> PolicyNet<B> {
    /// `weights` is `features × area` row-major, `bias` one per cell.
    fn from_parts(size: usize, weights: Vec<f32>, bias: Vec<f32>, device: &B::Device) -> Self {
        let area = size * size;
        let weight = Tensor::<B, 2>::from_data(
            TensorData::new(weights, [feature_count(size), area]),
            device,
        );
        let bias = Tensor::<B, 1>::from_data(TensorData::new(bias, [area]), device);
        Self {
            output: Linear {
                weight: Param::from_tensor(weight),
                bias: Some(Param::from_tensor(bias)),
            },
        }
    }

    fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        self.output.forward(features)
    }
}

/// On-disk model: board size plus the burn record bytes.
#[derive(Serialize, Deserialize)]
struct SavedPolicy {
    size: usize,
    record: Vec<u8>,
}

/// Learning schedule taken from `TrainerConfig`.
#[derive(Clone, Debug, PartialEq)]
pub struct FitSchedule {
    pub learning_rate: f32,
    pub lr_patience: usize,
    pub lr_factor: f32,
    pub min_learning_rate: f32,
    pub early_stop_patience: usize,
    pub seed: u64,
}

impl FitSchedule {
    /// Schedule from the training configuration.
    pub fn from_config(config: &TrainerConfig) -> Self {
        Self {
            learning_rate: config.learning_rate,
            lr_patience: config.lr_patience,
            lr_factor: config.lr_factor,
            min_learning_rate: config.min_learning_rate,
            early_stop_patience: config.early_stop_patience,
            seed: config.seed,
        }
    }
}

impl Default for FitSchedule {
    fn default() -> Self {
        Self::from_config(&TrainerConfig::default())
    }
}

/// Linear softmax policy over board cells.
#[derive(Clone, Debug)]
pub struct LinearPolicy {
    size: usize,
    model: PolicyNet<TrainBackend>,
    schedule: FitSchedule,
    device: Device,
}

impl LinearPolicy {
    /// Freshly initialised model. Weights are drawn from a ChaCha stream
    /// seeded by `schedule.seed`, biases start at zero.
    pub fn new(size: usize, schedule: FitSchedule) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(schedule.seed);
        let weights = (0..feature_count(size) * size * size)
            .map(|_| rng.gen_range(-INIT_SCALE..INIT_SCALE))
            .collect();
        Self::with_parameters(size, weights, vec![0.0; size * size], schedule)
    }

    /// Freshly initialised model for the configured board size.
    pub fn from_config(config: &TrainerConfig) -> Self {
        Self::new(config.board_size, FitSchedule::from_config(config))
    }

    fn with_parameters(size: usize, weights: Vec<f32>, bias: Vec<f32>, schedule: FitSchedule) -> Self {
        let device = Device::default();
        Self {
            size,
            model: PolicyNet::from_parts(size, weights, bias, &device),
            schedule,
            device,
        }
    }

    /// Learning schedule in use.
    pub fn schedule(&self) -> &FitSchedule {
        &self.schedule
    }

    fn area(&self) -> usize {
        self.size * self.size
    }

    /// Weights followed by biases, flattened.
    fn parameters(&self) -> std::result::Result<Vec<f32>, String> {
        let mut values = self
            .model
            .output
            .weight
            .val()
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| format!("{e:?}"))?;
        if let Some(bias) = &self.model.output.bias {
            let bias = bias.val().into_data().to_vec::<f32>().map_err(|e| format!("{e:?}"))?;
            values.extend(bias);
        }
        Ok(values)
    }

    /// Batch of encoded boards, `rows × features`.
    fn input_tensor(&self, rows: Vec<f32>, count: usize) -> Tensor<TrainBackend, 2> {
        Tensor::from_data(
            TensorData::new(rows, [count, feature_count(self.size)]),
            &self.device,
        )
    }

    fn check_example(&self, example: &TrainingExample) -> Result<()> {
        if example.board.size() != self.size {
            return Err(TrainError::ModelSizeMismatch {
                expected: self.size,
                actual: example.board.size(),
            });
        }
        if example.policy.len() != self.area() {
            return Err(TrainError::PolicyLength {
                expected: self.area(),
                actual: example.policy.len(),
            });
        }
        Ok(())
    }
}

impl PolicyEvaluator for LinearPolicy {
    fn board_size(&self) -> usize {
        self.size
    }

    fn predict(&self, board: &Board) -> Vec<f32> {
        if board.size() != self.size {
            return Vec::new();
        }
        let model: PolicyNet<InferenceBackend> = self.model.valid();
        let input = Tensor::<InferenceBackend, 2>::from_data(
            TensorData::new(encode_board(board), [1, feature_count(self.size)]),
            &self.device,
        );
        softmax(model.forward(input), 1)
            .into_data()
            .to_vec::<f32>()
            .unwrap_or_default()
    }

    fn fit(
        &mut self,
        examples: &[TrainingExample],
        batch_size: usize,
        epochs: usize,
    ) -> Result<FitReport> {
        if batch_size == 0 {
            return Err(TrainError::InvalidConfig("batch_size must be positive".into()));
        }
        for example in examples {
            self.check_example(example)?;
        }

        let mut lr = self.schedule.learning_rate;
        if examples.is_empty() || epochs == 0 {
            return Ok(FitReport {
                learning_rate: lr,
                ..FitReport::default()
            });
        }

        let area = self.area();
        let encoded: Vec<Vec<f32>> = examples.iter().map(|e| encode_board(&e.board)).collect();

        let mut rng = ChaCha8Rng::seed_from_u64(self.schedule.seed);
        let mut order: Vec<usize> = (0..examples.len()).collect();
        let mut optim = AdamConfig::new().with_epsilon(ADAM_EPSILON).init();
        let mut model = self.model.clone();

        let mut best_loss = f32::INFINITY;
        let mut best_model = model.clone();
        let mut since_best = 0usize;
        let mut since_lr_cut = 0usize;
        let mut final_loss = f32::INFINITY;
        let mut epochs_run = 0usize;
        let mut stopped_early = false;

        for epoch in 0..epochs {
            order.shuffle(&mut rng);
            let mut epoch_loss = 0.0f64;

            for batch in order.chunks(batch_size) {
                let inputs = batch.iter().flat_map(|&i| encoded[i].iter().copied()).collect();
                let targets: Vec<f32> = batch
                    .iter()
                    .flat_map(|&i| examples[i].policy.iter().copied())
                    .collect();
                let input = self.input_tensor(inputs, batch.len());
                let target = Tensor::<TrainBackend, 2>::from_data(
                    TensorData::new(targets, [batch.len(), area]),
                    &self.device,
                );

                // Soft-target cross-entropy; an all-zero target row adds nothing.
                let loss = log_softmax(model.forward(input), 1)
                    .mul(target)
                    .sum_dim(1)
                    .neg()
                    .mean();
                let batch_loss: f32 = loss.clone().into_scalar().elem();
                epoch_loss += f64::from(batch_loss) * batch.len() as f64;

                let grads = GradientsParams::from_grads(loss.backward(), &model);
                model = optim.step(f64::from(lr), model, grads);
            }

            final_loss = (epoch_loss / examples.len() as f64) as f32;
            epochs_run = epoch + 1;
            debug!("epoch {}/{}: loss {:.5}, lr {:.2e}", epochs_run, epochs, final_loss, lr);

            if final_loss < best_loss {
                best_loss = final_loss;
                best_model = model.clone();
                since_best = 0;
                since_lr_cut = 0;
            } else {
                since_best += 1;
                since_lr_cut += 1;
                if since_best >= self.schedule.early_stop_patience {
                    stopped_early = epochs_run < epochs;
                    break;
                }
                if since_lr_cut >= self.schedule.lr_patience {
                    lr = (lr * self.schedule.lr_factor).max(self.schedule.min_learning_rate);
                    since_lr_cut = 0;
                    debug!("loss plateau, learning rate reduced to {:.2e}", lr);
                }
            }
        }

        self.model = best_model;
        info!(
            "fit {} examples: {} epochs, best loss {:.5}{}",
            examples.len(),
            epochs_run,
            best_loss,
            if stopped_early { " (stopped early)" } else { "" }
        );

        Ok(FitReport {
            epochs_run,
            final_loss,
            best_loss,
            learning_rate: lr,
            stopped_early,
        })
    }

    fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let record = ModelRecorder::default()
            .record(self.model.clone().into_record(), ())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        let saved = SavedPolicy {
            size: self.size,
            record,
        };

        let path = self.model_path(dir);
        let tmp = path.with_extension("bin.tmp");
        {
            let writer = BufWriter::new(fs::File::create(&tmp)?);
            bincode::serialize_into(writer, &saved)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Returns `Ok(None)` when no model exists for this board size. A file
    /// that cannot be decoded, has the wrong shape, or holds non-finite
    /// weights is `CorruptModel`; one trained for another board size is
    /// `ModelSizeMismatch`.
    fn load(dir: &Path, config: &TrainerConfig) -> Result<Option<Self>> {
        let path = model_path(dir, config.board_size);
        if !path.exists() {
            return Ok(None);
        }
        let corrupt = |reason: String| TrainError::CorruptModel {
            path: path.clone(),
            reason,
        };

        let reader = BufReader::new(fs::File::open(&path)?);
        let saved: SavedPolicy =
            bincode::deserialize_from(reader).map_err(|e| corrupt(e.to_string()))?;
        if saved.size != config.board_size {
            return Err(TrainError::ModelSizeMismatch {
                expected: config.board_size,
                actual: saved.size,
            });
        }

        let size = saved.size;
        let mut policy = Self::with_parameters(
            size,
            vec![0.0; feature_count(size) * size * size],
            vec![0.0; size * size],
            FitSchedule::from_config(config),
        );
        let record = ModelRecorder::default()
            .load(saved.record, &policy.device)
            .map_err(|e| corrupt(e.to_string()))?;
        policy.model = policy.model.load_record(record);

        if policy.model.output.weight.dims() != [feature_count(size), size * size] {
            return Err(corrupt("weight shape does not match board size".into()));
        }
        let values = policy.parameters().map_err(corrupt)?;
        if values.len() != (feature_count(size) + 1) * size * size {
            return Err(corrupt("parameter count does not match board size".into()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(corrupt("non-finite weights".into()));
        }
        Ok(Some(policy))
    }
}
