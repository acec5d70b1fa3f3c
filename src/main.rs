use log::info;

use dice_net::{Dataset, Init, Network, Topology, TrainConfig, Trainer};

const CORPUS_PATH: &str = "encoded_images.json";
const PARAMS_PATH: &str = "weights_and_biases.bin";
const DATASET_NAME: &str = "cube";
const CATEGORY: &str = "1";

fn main() -> dice_net::Result<()> {
    env_logger::init();

    let data = Dataset::from_json_file(CORPUS_PATH, DATASET_NAME)?;
    let first_sample = data.sample(CATEGORY, 1)?.to_vec();

    let mut network = Network::new(true, Init::Xavier);
    network.load_parameters(PARAMS_PATH)?;
    network.build_with_seed(&first_sample, Topology::default(), 0)?;
    info!(
        "network built: {}",
        network.layer_names().collect::<Vec<_>>().join(" -> ")
    );

    let trainer = Trainer::new(TrainConfig::default())?;
    trainer.train_on_dataset(&mut network, &data, CATEGORY, PARAMS_PATH)?;
    info!("training complete, parameters saved to {PARAMS_PATH}");

    Ok(())
}
