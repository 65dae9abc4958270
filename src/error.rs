use std::path::PathBuf;

/// Errors produced while indexing or reading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Position outside `[0, len)`.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The requested subset group does not exist in the container.
    #[error("subset '{subset}' not found in {path:?}")]
    SubsetNotFound { path: PathBuf, subset: String },

    /// Synset missing from the class index descriptor.
    #[error("synset '{0}' not found in class index")]
    UnknownSynset(String),

    /// Validation sample missing from the validation label descriptor.
    #[error("validation sample '{0}' not found in validation labels")]
    UnknownValSample(String),

    #[error("unsupported split '{0}', expected 'train' or 'val'")]
    InvalidSplit(String),

    /// Class index key that does not parse as an integer.
    #[error("invalid class id '{0}' in class index")]
    InvalidClassId(String),

    /// Class index entry with an empty value array.
    #[error("class id '{0}' has no synset in class index")]
    MissingSynset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Container `image` array stored with an element type other than uint8.
    #[error("image '{item}' is stored as {found}, expected uint8")]
    ImageType { item: String, found: String },

    #[cfg(feature = "h5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
