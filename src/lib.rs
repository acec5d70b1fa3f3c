//! A small from-scratch feed-forward network for dice-face recognition.
//!
//! `dice-net` implements a fixed three-layer dense network trained by
//! per-sample gradient descent: encoded dice-face images map to a normalized
//! scalar target (face value / 10). Everything numeric is built from first
//! principles — no linear-algebra crates, no batching.
//!
//! # Design
//!
//! - [`Layer`]s own their weights, shared bias, per-neuron enable switches
//!   and input buffer; the [`Network`] is a named, insertion-ordered registry
//!   that chains them, copying (never aliasing) each layer's output into the
//!   next layer's input.
//! - The [`Trainer`] runs the gradient-descent loop one layer at a time with
//!   optional Lasso/Ridge (Elastic-Net) regularization, quarter-point
//!   learning-rate decay and early stopping, and reports an explicit
//!   [`TrainOutcome`] instead of a silent missing value.
//! - Trained parameters persist as one binary blob ([`ParamSet`]) that
//!   round-trips bit-identically; a missing file at build time falls back to
//!   fresh initialization.
//!
//! # Quick start
//!
//! ```rust
//! use dice_net::{Dataset, Init, Network, Topology, TrainConfig, Trainer};
//!
//! # fn main() -> dice_net::Result<()> {
//! let data = Dataset::from_json_str(
//!     r#"{"cube": {"1": [[0.0, 1.0, 1.0, 0.0]]}}"#,
//!     "cube",
//! )?;
//!
//! let mut network = Network::new(true, Init::Xavier);
//! network.build_with_seed(data.sample("1", 1)?, Topology::default(), 0)?;
//!
//! let params_path = std::env::temp_dir().join("weights_and_biases.bin");
//! let trainer = Trainer::new(TrainConfig::default())?;
//! trainer.train_on_dataset(&mut network, &data, "1", &params_path)?;
//! # std::fs::remove_file(&params_path).ok();
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod config;
pub mod data;
pub mod error;
pub mod init;
pub mod layer;
pub mod network;
pub mod params;
pub mod train;

pub use activation::{softmax, Activation};
pub use builder::Switch;
pub use config::TrainConfig;
pub use data::Dataset;
pub use error::{Error, Result};
pub use init::Init;
pub use layer::{Layer, LayerKind};
pub use network::{
    Network, Topology, HIDDEN_LAYER_FIRST, HIDDEN_LAYER_SECOND, OUTPUT_OUTER_LAYER,
};
pub use params::ParamSet;
pub use train::{calculate_error, learning_rate_decay, TrainOutcome, Trainer};
