// YAML description of a dataset, used by the command-line tool.
//
//   kind: kaggle
//   root: /data/imagenet
//   split: val
//   sorted: true
//   resize: [224, 224]
//
//   kind: h5
//   path: /data/imagenet.h5
//   subset: train

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{dataset::Split, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DatasetConfig {
    H5 {
        path: PathBuf,
        subset: String,
    },
    Kaggle {
        root: PathBuf,
        split: Split,
        #[serde(default)]
        sorted: bool,
        #[serde(default)]
        resize: Option<(u32, u32)>,
    },
}

impl DatasetConfig {
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kaggle_config_with_defaults() {
        let config = DatasetConfig::from_yaml("kind: kaggle\nroot: /data/imagenet\nsplit: train\n")
            .unwrap();
        assert_eq!(
            config,
            DatasetConfig::Kaggle {
                root: PathBuf::from("/data/imagenet"),
                split: Split::Train,
                sorted: false,
                resize: None,
            }
        );
    }

    #[test]
    fn kaggle_config_with_resize() {
        let config = DatasetConfig::from_yaml(
            "kind: kaggle\nroot: data\nsplit: val\nsorted: true\nresize: [224, 160]\n",
        )
        .unwrap();
        match config {
            DatasetConfig::Kaggle { split, sorted, resize, .. } => {
                assert_eq!(split, Split::Val);
                assert!(sorted);
                assert_eq!(resize, Some((224, 160)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn h5_config() {
        let config = DatasetConfig::from_yaml("kind: h5\npath: imagenet.h5\nsubset: val\n").unwrap();
        assert_eq!(
            config,
            DatasetConfig::H5 {
                path: PathBuf::from("imagenet.h5"),
                subset: "val".to_string(),
            }
        );
    }

    #[test]
    fn unknown_split_is_rejected() {
        let err = DatasetConfig::from_yaml("kind: kaggle\nroot: data\nsplit: test\n").unwrap_err();
        assert!(matches!(err, crate::Error::Yaml(_)));
    }
}
