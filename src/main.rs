use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use image::RgbImage;
use rand::Rng;
use rayon::prelude::*;

use imagenet_datasets::{
    transform::Resize, Dataset, DatasetConfig, ImagenetKaggleDataset, Transform,
};

/// What the CLI needs to know about one decoded item.
trait Inspect {
    fn label(&self) -> i64;
    fn shape(&self) -> String;
}

impl Inspect for (RgbImage, usize) {
    fn label(&self) -> i64 {
        self.1 as i64
    }

    fn shape(&self) -> String {
        format!("{}x{}x3", self.0.height(), self.0.width())
    }
}

#[cfg(feature = "h5")]
impl Inspect for (imagenet_datasets::RawImage, i64) {
    fn label(&self) -> i64 {
        self.1
    }

    fn shape(&self) -> String {
        self.0
            .shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("x")
    }
}

trait Visitor {
    fn visit<D>(self, ds: &D) -> anyhow::Result<()>
    where
        D: Dataset + Sync,
        D::Item: Inspect;
}

fn with_dataset<V: Visitor>(config_path: &Path, visitor: V) -> anyhow::Result<()> {
    let config = DatasetConfig::load(config_path)
        .with_context(|| format!("failed to read config {:?}", config_path))?;

    match config {
        DatasetConfig::Kaggle {
            root,
            split,
            sorted,
            resize,
        } => {
            let resize = resize.map(|(w, h)| Resize::new(w, h));
            let ds = ImagenetKaggleDataset::builder(&root, split)
                .sorted(sorted)
                .transform(move |img: RgbImage| match resize {
                    Some(r) => r.apply(img),
                    None => img,
                })
                .build()
                .with_context(|| format!("failed to index {:?}", root))?;
            visitor.visit(&ds)
        }
        #[cfg(feature = "h5")]
        DatasetConfig::H5 { path, subset } => {
            let ds = imagenet_datasets::ImagenetH5Dataset::open(&path, &subset)
                .with_context(|| format!("failed to open {:?}", path))?;
            visitor.visit(&ds)
        }
        #[cfg(not(feature = "h5"))]
        DatasetConfig::H5 { .. } => bail!("built without HDF5 support (feature `h5`)"),
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Info {
    config: PathBuf,
}

impl Visitor for &Info {
    fn visit<D>(self, ds: &D) -> anyhow::Result<()>
    where
        D: Dataset + Sync,
        D::Item: Inspect,
    {
        println!("{}: {} items", self.config.display(), ds.len());
        if !ds.is_empty() {
            let first = ds.get(0)?;
            let name = usize::try_from(first.label())
                .ok()
                .and_then(|c| ds.class_name(c))
                .unwrap_or_default();
            println!("first item: label {} {} shape {}", first.label(), name, first.shape());
        }
        Ok(())
    }
}

impl Info {
    fn exec(self) -> anyhow::Result<()> {
        with_dataset(&self.config, &self)
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Peek {
    config: PathBuf,
    #[clap(short, long, default_value = "5")]
    count: usize,
}

impl Visitor for &Peek {
    fn visit<D>(self, ds: &D) -> anyhow::Result<()>
    where
        D: Dataset + Sync,
        D::Item: Inspect,
    {
        if ds.is_empty() {
            bail!("dataset is empty");
        }
        let mut rng = rand::thread_rng();
        for _ in 0..self.count {
            let i = rng.gen_range(0..ds.len());
            let item = ds.get(i)?;
            let name = usize::try_from(item.label())
                .ok()
                .and_then(|c| ds.class_name(c))
                .unwrap_or_default();
            println!(
                "[{:>8}] label: {:>5} {:<24} shape: {}",
                i,
                item.label(),
                name,
                item.shape()
            );
        }
        Ok(())
    }
}

impl Peek {
    fn exec(self) -> anyhow::Result<()> {
        with_dataset(&self.config, &self)
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Verify {
    config: PathBuf,
}

impl Visitor for &Verify {
    fn visit<D>(self, ds: &D) -> anyhow::Result<()>
    where
        D: Dataset + Sync,
        D::Item: Inspect,
    {
        log::info!("decoding {} items", ds.len());
        let failures: Vec<_> = (0..ds.len())
            .into_par_iter()
            .filter_map(|i| ds.get(i).err().map(|e| (i, e.to_string())))
            .collect();

        for (i, e) in &failures {
            println!("{} [{}] {}", "FAIL".red(), i, e);
        }

        if failures.is_empty() {
            println!("{} {} items decoded", "OK".green(), ds.len());
            Ok(())
        } else {
            bail!("{} of {} items failed to decode", failures.len(), ds.len())
        }
    }
}

impl Verify {
    fn exec(self) -> anyhow::Result<()> {
        with_dataset(&self.config, &self)
    }
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
enum SubCommand {
    /// Print the dataset length and its first item.
    Info(Info),
    /// Decode a few random items.
    Peek(Peek),
    /// Decode every item and report failures.
    Verify(Verify),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match SubCommand::parse() {
        SubCommand::Info(info) => info.exec(),
        SubCommand::Peek(peek) => peek.exec(),
        SubCommand::Verify(verify) => verify.exec(),
    }
}
