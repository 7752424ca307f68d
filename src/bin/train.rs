//! Offline trainer
//!
//! Reads the dataset named by `DATASET_PATH` and writes the artifact to
//! `MODEL_DIR/MODEL_FILENAME`. Takes no arguments.

use ckd_predictor::{init_tracing, trainer, Config};

fn main() {
    // .env must be loaded before the subscriber reads RUST_LOG
    dotenvy::dotenv().ok();
    init_tracing("ckd_predictor=debug,train=debug");

    let config = Config::from_env();

    trainer::train_and_save_model(
        &config.dataset_path,
        &config.model_dir,
        &config.model_filename,
        &config.training,
    );
}
