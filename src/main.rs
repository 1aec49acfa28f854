mod aabb;
mod config;
mod distributions;
mod error;
mod exposure;
mod geometry;
mod layout;
mod materials;
mod mesh_io;
mod placement;
mod scene;
mod scene_writer;
mod walls;


use std::error::Error;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use indicatif::ParallelProgressIterator;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::exposure::{apply_scale, ExposureNormalizer};
use crate::materials::ImageMaterials;
use crate::mesh_io::is_mesh_file;
use crate::scene::random_scene;
use crate::scene_writer::write_scene;

const USAGE: &str = "usage:
  scene-synth generate <models_dir> <images_dir> <out_dir> <count> [seed]
  scene-synth normalize <input_image> <output_image> [seed]

SCENE_SYNTH_CONFIG may point to a TOML file overriding the sampling defaults.";

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config = match std::env::var_os("SCENE_SYNTH_CONFIG") {
        Some(path) => SceneConfig::load_from_file(path)?,
        None => SceneConfig::default(),
    };
    match args.get(1).map(String::as_str) {
        Some("generate") if args.len() >= 6 => {
            let count: u64 = args[5].parse()?;
            let seed = parse_seed(args.get(6))?;
            generate(
                Path::new(&args[2]),
                Path::new(&args[3]),
                Path::new(&args[4]),
                count,
                seed,
                &config,
            )
        }
        Some("normalize") if args.len() >= 4 => {
            let seed = parse_seed(args.get(4))?;
            normalize(Path::new(&args[2]), Path::new(&args[3]), seed, &config)
        }
        _ => Err(USAGE.into()),
    }
}

fn parse_seed(arg: Option<&String>) -> Result<u64, Box<dyn Error>> {
    let seed = match arg {
        Some(arg) => arg.parse()?,
        None => rand::random(),
    };
    log::info!("seed: {seed}");
    Ok(seed)
}

fn list_files(dir: &Path, filter: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>, SceneError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && filter(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_image_file(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

fn generate(
    models_dir: &Path,
    images_dir: &Path,
    out_dir: &Path,
    count: u64,
    seed: u64,
    config: &SceneConfig,
) -> Result<(), Box<dyn Error>> {
    let models = list_files(models_dir, is_mesh_file)?;
    let materials = ImageMaterials::new(list_files(images_dir, is_image_file)?);
    log::info!(
        "{} models, {} images",
        models.len(),
        materials.images.len()
    );
    fs::create_dir_all(out_dir)?;

    (0..count)
        .into_par_iter()
        .progress_count(count)
        .try_for_each(|i| -> Result<(), SceneError> {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed.wrapping_add(i));
            let scene = random_scene(models.as_slice(), &materials, config, &mut rng)?;
            let out_path = out_dir.join(format!("scene_{i}.txt"));
            let mut out_file = BufWriter::new(fs::File::create(&out_path)?);
            write_scene(&scene, &config.render, &mut out_file)?;
            log::debug!(
                "wrote {} ({} surfaces, {} lights)",
                out_path.display(),
                scene.surfaces().count(),
                scene.lights().count()
            );
            Ok(())
        })?;
    Ok(())
}

fn normalize(
    input: &Path,
    output: &Path,
    seed: u64,
    config: &SceneConfig,
) -> Result<(), Box<dyn Error>> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut img = image::open(input)?.into_rgb32f();
    let normalizer = ExposureNormalizer::new(config.exposure.clone());
    let scale = normalizer.brightness_scale(&img, &mut rng);
    log::info!("scaling {} by {scale:.3}", input.display());
    apply_scale(&mut img, scale);
    DynamicImage::ImageRgb32F(img).into_rgb8().save(output)?;
    Ok(())
}
