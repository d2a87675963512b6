use argh::FromArgs;
use rand::{rngs::StdRng, SeedableRng};
use scrawl::{
    augment::{AugmentConfig, Augmenter, RngSource},
    image::ImageBatch,
    imgproc::resize::resize,
    io::png::{read_image_inverted, write_image_inverted},
};

/// Applies a random morphological operator and a random rotation and slant to a word image
#[derive(Debug, FromArgs)]
struct Args {
    /// path to the input mono8 png
    #[argh(option, short = 'i')]
    input: String,

    /// path to the output png
    #[argh(option, short = 'o')]
    output: String,

    /// height of the resized image
    #[argh(option, default = "128")]
    height: usize,

    /// seed of the random generator
    #[argh(option, short = 's', default = "0")]
    seed: u64,

    /// path to a json augmentation config
    #[argh(option, short = 'c')]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => AugmentConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => AugmentConfig::default(),
    };
    let augmenter = Augmenter::new(config)?;

    let image = read_image_inverted(&args.input)?;
    let image = resize(&image, Some(args.height), None)?;
    log::info!("resized {} to {}", args.input, image.size());

    let mut rng = RngSource::new(StdRng::seed_from_u64(args.seed));
    let augmented = augmenter.augment(&ImageBatch::from_image(&image)?, &mut rng)?;

    write_image_inverted(&args.output, &augmented.image(0)?)?;
    log::info!("wrote {}", args.output);

    Ok(())
}
