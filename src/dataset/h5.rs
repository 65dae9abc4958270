// ImageNet packed into a single HDF5 container:
//
//   /<subset>/<item id>/image   uint8 array, any shape (usually H x W x 3)
//   /<subset>/<item id>/label   integer scalar
//
// The item index is the list of member names under `<subset>`, in the
// container's own iteration order (ascending by name).

use std::path::{Path, PathBuf};

use hdf5::{
    types::{IntSize, TypeDescriptor},
    File, Group,
};

use super::{check_index, Dataset};
use crate::{transform::Identity, Error, Result, Transform};

/// An image array read verbatim from the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub data: Vec<u8>,
    pub shape: Vec<usize>,
}

/// Dataset over the groups of one subset of an HDF5 container.
///
/// One read-only file handle is opened at construction and shared by every
/// `get`. The `hdf5` crate serialises library calls behind a global lock, so
/// concurrent `get`s are safe but do not read in parallel; loaders that need
/// parallel reads should open one dataset per worker.
pub struct ImagenetH5Dataset<T = Identity> {
    path: PathBuf,
    subset: String,
    _file: File,
    imgs: Group,
    img_ids: Vec<String>,
    transform: T,
}

impl ImagenetH5Dataset<Identity> {
    pub fn open(path: impl AsRef<Path>, subset: &str) -> Result<Self> {
        Self::with_transform(path, subset, Identity)
    }
}

impl<T: Transform<RawImage>> ImagenetH5Dataset<T> {
    pub fn with_transform(path: impl AsRef<Path>, subset: &str, transform: T) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        if !file.link_exists(subset) {
            return Err(Error::SubsetNotFound {
                path,
                subset: subset.to_string(),
            });
        }
        let imgs = file.group(subset)?;
        let img_ids = imgs.member_names()?;

        log::info!(
            "indexed {} items in subset '{}' of {:?}",
            img_ids.len(),
            subset,
            path
        );

        Ok(Self {
            path,
            subset: subset.to_string(),
            _file: file,
            imgs,
            img_ids,
            transform,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn subset(&self) -> &str {
        &self.subset
    }

    pub fn item_ids(&self) -> &[String] {
        &self.img_ids
    }

    pub fn item_id(&self, index: usize) -> Result<&str> {
        check_index(index, self.img_ids.len())?;
        Ok(&self.img_ids[index])
    }

    fn read_image(item: &Group) -> Result<RawImage> {
        let ds = item.dataset("image")?;
        // read_raw would silently convert any numeric type to u8
        let dtype = ds.dtype()?.to_descriptor()?;
        if dtype != TypeDescriptor::Unsigned(IntSize::U1) {
            return Err(Error::ImageType {
                item: item.name(),
                found: format!("{:?}", dtype),
            });
        }
        let shape = ds.shape();
        let data = ds.read_raw::<u8>()?;
        Ok(RawImage { data, shape })
    }
}

impl<T: Transform<RawImage>> Dataset for ImagenetH5Dataset<T> {
    type Item = (T::Output, i64);

    fn len(&self) -> usize {
        self.img_ids.len()
    }

    fn get(&self, index: usize) -> Result<Self::Item> {
        check_index(index, self.img_ids.len())?;

        let item = self.imgs.group(&self.img_ids[index])?;
        let img = Self::read_image(&item)?;
        let img = self.transform.apply(img);
        let label = item.dataset("label")?.read_scalar::<i64>()?;

        Ok((img, label))
    }
}
