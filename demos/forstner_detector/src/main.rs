use argh::FromArgs;
use std::path::PathBuf;

use forstner::{
    imgproc::{
        features::{ForstnerConfig, ForstnerDetector, MARKER_COLOR},
        filter::GradientBorder,
    },
    io::functional::read_image_any_rgb8,
};

/// Detect Förstner corners on an image.
#[derive(FromArgs)]
struct Args {
    /// path to the image to detect corners on
    #[argh(option, short = 'i', default = "PathBuf::from(\"pictures/robopenguin.bmp\")")]
    image_path: PathBuf,

    /// path to a json file with the detector configuration
    #[argh(option)]
    config: Option<PathBuf>,

    /// side length of the aggregation window, must be odd
    #[argh(option)]
    window_size: Option<usize>,

    /// minimum corner response of a marked pixel
    #[argh(option)]
    response_threshold: Option<f64>,

    /// minimum roundness of a marked pixel
    #[argh(option)]
    roundness_threshold: Option<f64>,

    /// gradient border policy: intensity, zero or replicate
    #[argh(option)]
    border: Option<GradientBorder>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let mut config = match args.config {
        Some(path) => serde_json::from_reader(std::fs::File::open(path)?)?,
        None => ForstnerConfig::default(),
    };
    if let Some(window_size) = args.window_size {
        config = config.with_window_size(window_size);
    }
    if let Some(threshold) = args.response_threshold {
        config = config.with_response_threshold(threshold);
    }
    if let Some(threshold) = args.roundness_threshold {
        config = config.with_roundness_threshold(threshold);
    }
    if let Some(border) = args.border {
        config = config.with_border(border);
    }
    log::info!("using {config:?}");

    let detector = ForstnerDetector::new(config)?;

    // read the image
    let img_rgb8 = read_image_any_rgb8(&args.image_path)?;

    // detect the corners
    let output = detector.detect(&img_rgb8)?;
    println!("Found {} corners", output.corners.len());

    // start the recording stream
    let rec = rerun::RecordingStreamBuilder::new("Förstner Detector App").spawn()?;

    rec.log_static(
        "image",
        &rerun::Image::from_elements(
            img_rgb8.as_slice(),
            img_rgb8.size().into(),
            rerun::ColorModel::RGB,
        ),
    )?;

    rec.log_static(
        "marked",
        &rerun::Image::from_elements(
            output.marked.as_slice(),
            output.marked.size().into(),
            rerun::ColorModel::RGB,
        ),
    )?;

    // log the corners on top of the input
    let points = output
        .corners
        .iter()
        .map(|c| (c.x as f32, c.y as f32))
        .collect::<Vec<_>>();

    rec.log_static(
        "image/corners",
        &rerun::Points2D::new(points).with_colors([MARKER_COLOR]),
    )?;

    Ok(())
}
