//! Indexable ImageNet datasets for image classification training.
//!
//! Two adapters implement the same [`Dataset`] contract:
//! - [`ImagenetH5Dataset`] reads items packed into an HDF5 container
//!   (requires the default `h5` feature);
//! - [`ImagenetKaggleDataset`] reads image files from the Kaggle ImageNet
//!   directory layout, labelled through its JSON descriptors.
//!
//! ```no_run
//! use imagenet_datasets::{Dataset, ImagenetKaggleDataset, Split};
//!
//! let ds = ImagenetKaggleDataset::new("/data/imagenet", Split::Val)?;
//! let (img, target) = ds.get(0)?;
//! println!("{}x{} -> {}", img.width(), img.height(), target);
//! # Ok::<(), imagenet_datasets::Error>(())
//! ```

pub mod config;
pub mod dataset;
mod error;
pub mod transform;
pub mod utilities;

pub use {
    config::DatasetConfig,
    dataset::{ClassIndex, Dataset, ImagenetKaggleBuilder, ImagenetKaggleDataset, Split, ValLabels},
    error::{Error, Result},
    transform::Transform,
};

#[cfg(feature = "h5")]
pub use dataset::{ImagenetH5Dataset, RawImage};
