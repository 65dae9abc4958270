// ImageNet in the Kaggle "ImageNet Object Localization Challenge" layout:
//
//   root/
//     imagenet_class_index.json
//     ILSVRC2012_val_labels.json
//     ILSVRC/Data/CLS-LOC/
//       train/<synset>/<image>
//       val/<image>

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::{check_index, ClassIndex, Dataset, ValLabels, CLASS_INDEX_FILE, VAL_LABELS_FILE};
use crate::{transform::Identity, utilities::load_img_rgb, Error, Result, Transform};

pub const SAMPLES_DIR: &str = "ILSVRC/Data/CLS-LOC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
        }
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "train" => Ok(Split::Train),
            "val" => Ok(Split::Val),
            other => Err(Error::InvalidSplit(other.to_string())),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for [`ImagenetKaggleDataset`].
pub struct ImagenetKaggleBuilder<T = Identity> {
    root: PathBuf,
    split: Split,
    sorted: bool,
    transform: T,
}

impl ImagenetKaggleBuilder<Identity> {
    pub fn new(root: impl AsRef<Path>, split: Split) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            split,
            sorted: false,
            transform: Identity,
        }
    }
}

impl<T> ImagenetKaggleBuilder<T> {
    /// Sort directory entries by name instead of trusting the listing order.
    pub fn sorted(mut self, yes: bool) -> Self {
        self.sorted = yes;
        self
    }

    pub fn transform<U: Transform<RgbImage>>(self, transform: U) -> ImagenetKaggleBuilder<U> {
        ImagenetKaggleBuilder {
            root: self.root,
            split: self.split,
            sorted: self.sorted,
            transform,
        }
    }
}

impl<T: Transform<RgbImage>> ImagenetKaggleBuilder<T> {
    pub fn build(self) -> Result<ImagenetKaggleDataset<T>> {
        ImagenetKaggleDataset::scan(self.root, self.split, self.sorted, self.transform)
    }
}

/// Directory-backed ImageNet dataset.
///
/// Holds only paths and targets; every `get` reopens and decodes the file, so
/// concurrent access from several workers needs no coordination.
#[derive(Debug)]
pub struct ImagenetKaggleDataset<T = Identity> {
    split: Split,
    samples: Vec<PathBuf>,
    targets: Vec<usize>,
    syn_to_class: ClassIndex,
    transform: T,
}

impl ImagenetKaggleDataset<Identity> {
    pub fn new(root: impl AsRef<Path>, split: Split) -> Result<Self> {
        ImagenetKaggleBuilder::new(root, split).build()
    }

    pub fn builder(root: impl AsRef<Path>, split: Split) -> ImagenetKaggleBuilder<Identity> {
        ImagenetKaggleBuilder::new(root, split)
    }
}

impl<T: Transform<RgbImage>> ImagenetKaggleDataset<T> {
    fn scan(root: PathBuf, split: Split, sorted: bool, transform: T) -> Result<Self> {
        let syn_to_class = ClassIndex::load(&root.join(CLASS_INDEX_FILE))?;

        let samples_dir = root.join(SAMPLES_DIR).join(split.as_str());
        let mut samples = Vec::new();
        let mut targets = Vec::new();

        match split {
            Split::Train => {
                for (syn_id, syn_folder) in list_dir(&samples_dir, sorted)? {
                    let target = syn_to_class.class_of(&syn_id)?;
                    for (_, sample_path) in list_dir(&syn_folder, sorted)? {
                        samples.push(sample_path);
                        targets.push(target);
                    }
                }
            }
            Split::Val => {
                let val_to_syn = ValLabels::load(&root.join(VAL_LABELS_FILE))?;
                for (entry, sample_path) in list_dir(&samples_dir, sorted)? {
                    let target = syn_to_class.class_of(val_to_syn.synset_of(&entry)?)?;
                    samples.push(sample_path);
                    targets.push(target);
                }
            }
        }

        log::info!(
            "indexed {} {} samples under {:?}",
            samples.len(),
            split,
            samples_dir
        );

        Ok(Self {
            split,
            samples,
            targets,
            syn_to_class,
            transform,
        })
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn samples(&self) -> &[PathBuf] {
        &self.samples
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn path_of(&self, index: usize) -> Result<&Path> {
        check_index(index, self.samples.len())?;
        Ok(&self.samples[index])
    }

    pub fn target_of(&self, index: usize) -> Result<usize> {
        check_index(index, self.targets.len())?;
        Ok(self.targets[index])
    }

    /// Number of classes in the class index, not only those present on disk.
    pub fn num_classes(&self) -> usize {
        self.syn_to_class.len()
    }
}

impl<T: Transform<RgbImage>> Dataset for ImagenetKaggleDataset<T> {
    type Item = (T::Output, usize);

    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.samples.len())?;
        let x = load_img_rgb(&self.samples[index])?;
        Ok((self.transform.apply(x), self.targets[index]))
    }

    fn class_name(&self, class: usize) -> Option<String> {
        self.syn_to_class.name_of(class).map(str::to_string)
    }
}

/// Lists `(file name, full path)` of every entry in `dir`.
fn list_dir(dir: &Path, sorted: bool) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }
    if sorted {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_parsing() {
        assert_eq!("train".parse::<Split>().unwrap(), Split::Train);
        assert_eq!("val".parse::<Split>().unwrap(), Split::Val);
        assert_eq!(Split::Val.to_string(), "val");
        match "test".parse::<Split>() {
            Err(Error::InvalidSplit(s)) => assert_eq!(s, "test"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn list_dir_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let names: Vec<_> = list_dir(dir.path(), true)
            .unwrap()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
