// JSON descriptors shipped with the Kaggle ImageNet layout:
//
//   imagenet_class_index.json   { "0": ["n01440764", "tench"], ... }
//   ILSVRC2012_val_labels.json  { "ILSVRC2012_val_00000001.JPEG": "n01751748", ... }

use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use crate::{Error, Result};

pub const CLASS_INDEX_FILE: &str = "imagenet_class_index.json";
pub const VAL_LABELS_FILE: &str = "ILSVRC2012_val_labels.json";

/// Synset to class id mapping, plus the human-readable class names.
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    syn_to_class: HashMap<String, usize>,
    names: HashMap<usize, String>,
}

impl ClassIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Self::from_raw(raw)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Self::from_raw(serde_json::from_str(s)?)
    }

    fn from_raw(raw: HashMap<String, Vec<String>>) -> Result<Self> {
        let mut index = ClassIndex::default();
        for (class_id, v) in raw {
            let id = class_id
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidClassId(class_id.clone()))?;
            let mut v = v.into_iter();
            let synset = v.next().ok_or_else(|| Error::MissingSynset(class_id.clone()))?;
            if let Some(name) = v.next() {
                index.names.insert(id, name);
            }
            index.syn_to_class.insert(synset, id);
        }
        Ok(index)
    }

    pub fn class_of(&self, synset: &str) -> Result<usize> {
        self.syn_to_class
            .get(synset)
            .copied()
            .ok_or_else(|| Error::UnknownSynset(synset.to_string()))
    }

    pub fn name_of(&self, class: usize) -> Option<&str> {
        self.names.get(&class).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.syn_to_class.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syn_to_class.is_empty()
    }
}

/// Validation file name to synset mapping.
#[derive(Debug, Clone, Default)]
pub struct ValLabels(HashMap<String, String>);

impl ValLabels {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self(serde_json::from_reader(BufReader::new(File::open(
            path,
        )?))?))
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(s)?))
    }

    pub fn synset_of(&self, sample: &str) -> Result<&str> {
        self.0
            .get(sample)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownValSample(sample.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_index_maps_synsets_and_names() {
        let index = ClassIndex::from_json(
            r#"{"0": ["n01440764", "tench"], "1": ["n01443537", "goldfish"]}"#,
        )
        .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.class_of("n01443537").unwrap(), 1);
        assert_eq!(index.name_of(0), Some("tench"));
        assert_eq!(index.name_of(7), None);
    }

    #[test]
    fn class_ids_are_trusted_as_given() {
        let index = ClassIndex::from_json(r#"{"42": ["n01440764"]}"#).unwrap();
        assert_eq!(index.class_of("n01440764").unwrap(), 42);
        assert_eq!(index.name_of(42), None);
    }

    #[test]
    fn unknown_synset() {
        let index = ClassIndex::from_json(r#"{"0": ["n01440764", "tench"]}"#).unwrap();
        match index.class_of("n99999999") {
            Err(Error::UnknownSynset(s)) => assert_eq!(s, "n99999999"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_class_index_entries() {
        assert!(matches!(
            ClassIndex::from_json(r#"{"zero": ["n01440764"]}"#),
            Err(Error::InvalidClassId(_))
        ));
        assert!(matches!(
            ClassIndex::from_json(r#"{"0": []}"#),
            Err(Error::MissingSynset(_))
        ));
        assert!(matches!(
            ClassIndex::from_json("[1, 2]"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn val_labels_lookup() {
        let labels =
            ValLabels::from_json(r#"{"ILSVRC2012_val_00000001.JPEG": "n01440764"}"#).unwrap();
        assert_eq!(
            labels.synset_of("ILSVRC2012_val_00000001.JPEG").unwrap(),
            "n01440764"
        );
        assert!(matches!(
            labels.synset_of("ILSVRC2012_val_00000002.JPEG"),
            Err(Error::UnknownValSample(_))
        ));
    }
}
