// Transforms applied to a decoded image before it is handed to the caller.

use image::{imageops::FilterType, RgbImage};

/// A mapping applied to every decoded image.
///
/// Any `Fn(I) -> O` closure that is `Send + Sync` is a transform, so most
/// callers never implement this trait by hand.
pub trait Transform<I>: Send + Sync {
    type Output;

    fn apply(&self, input: I) -> Self::Output;
}

impl<I, O, F> Transform<I> for F
where
    F: Fn(I) -> O + Send + Sync,
{
    type Output = O;

    fn apply(&self, input: I) -> O {
        self(input)
    }
}

/// Returns the image unchanged. Used when no transform is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<I> Transform<I> for Identity {
    type Output = I;

    fn apply(&self, input: I) -> I {
        input
    }
}

/// Applies `first`, then `second` to its output.
#[derive(Debug, Clone)]
pub struct Compose<A, B> {
    first: A,
    second: B,
}

impl<A, B> Compose<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<I, A, B> Transform<I> for Compose<A, B>
where
    A: Transform<I>,
    B: Transform<A::Output>,
{
    type Output = B::Output;

    fn apply(&self, input: I) -> B::Output {
        self.second.apply(self.first.apply(input))
    }
}

/// Exact resize to `width` x `height`.
#[derive(Debug, Clone, Copy)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
}

impl Resize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Transform<RgbImage> for Resize {
    type Output = RgbImage;

    fn apply(&self, input: RgbImage) -> RgbImage {
        if input.dimensions() == (self.width, self.height) {
            return input;
        }
        image::imageops::resize(&input, self.width, self.height, FilterType::Triangle)
    }
}

/// Planar `[C, H, W]` image with values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChwImage {
    pub data: Vec<f32>,
    pub shape: [usize; 3],
}

/// Converts interleaved RGB into a planar float tensor layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToChwTensor;

impl Transform<RgbImage> for ToChwTensor {
    type Output = ChwImage;

    fn apply(&self, input: RgbImage) -> ChwImage {
        let (w, h) = input.dimensions();
        let npix = w as usize * h as usize;
        let raw = input.as_raw();
        let mut data = vec![0.0f32; 3 * npix];
        for i in 0..npix {
            for c in 0..3 {
                data[c * npix + i] = raw[i * 3 + c] as f32 / 255.;
            }
        }
        ChwImage {
            data,
            shape: [3, h as usize, w as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn closure_is_a_transform() {
        let t = |x: u32| x * 2;
        assert_eq!(Transform::apply(&t, 21u32), 42);
    }

    #[test]
    fn compose_applies_in_order() {
        let t = Compose::new(|x: u32| x + 1, |x: u32| x * 10);
        assert_eq!(t.apply(1u32), 20);
    }

    #[test]
    fn resize_changes_dimensions() {
        let img = RgbImage::from_pixel(8, 4, Rgb([10, 20, 30]));
        let out = Resize::new(2, 3).apply(img);
        assert_eq!(out.dimensions(), (2, 3));
    }

    #[test]
    fn to_chw_is_planar_and_normalized() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 51]));
        let out = ToChwTensor.apply(img);
        assert_eq!(out.shape, [3, 1, 2]);
        assert_eq!(out.data, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.2]);
    }
}
