use image::{GrayImage, Luma};

/// Foreground value stored in a mask
pub const FOREGROUND: u8 = 255;
/// Background value stored in a mask
pub const BACKGROUND: u8 = 0;

/// One-byte-per-pixel binary mask whose pixels are always 0 or 255
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// Create an all-background mask with given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    /// Wrap an image, mapping every non-zero pixel to 255
    pub fn from_image(mut image: GrayImage) -> Self {
        for p in image.iter_mut() {
            if *p != BACKGROUND {
                *p = FOREGROUND;
            }
        }
        Self { image }
    }

    /// Build a mask by testing every pixel of `source`
    pub fn from_predicate<F>(source: &GrayImage, predicate: F) -> Self
    where
        F: Fn(u8) -> bool,
    {
        let image = GrayImage::from_fn(source.width(), source.height(), |x, y| {
            if predicate(source.get_pixel(x, y)[0]) {
                Luma([FOREGROUND])
            } else {
                Luma([BACKGROUND])
            }
        });
        Self { image }
    }

    /// Get mask width
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Get mask height
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True if the pixel at (x, y) is foreground; out of bounds reads as background
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        self.image.get_pixel(x, y)[0] == FOREGROUND
    }

    /// Set pixel at (x, y); out of bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let v = if value { FOREGROUND } else { BACKGROUND };
        self.image.put_pixel(x, y, Luma([v]));
    }

    /// Number of foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.image.iter().filter(|&&p| p == FOREGROUND).count()
    }

    /// True when every pixel holds the same value (including the empty mask)
    pub fn is_uniform(&self) -> bool {
        let mut pixels = self.image.iter();
        match pixels.next() {
            Some(&first) => pixels.all(|&p| p == first),
            None => true,
        }
    }

    /// Borrow the underlying 0/255 image
    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    /// Consume the mask and return the underlying image
    pub fn into_image(self) -> GrayImage {
        self.image
    }
}

impl Default for BinaryMask {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_mask() {
        let mut mask = BinaryMask::new(8, 8);
        assert_eq!(mask.width(), 8);
        assert_eq!(mask.height(), 8);
        assert!(mask.is_uniform());

        mask.set(3, 4, true);
        assert!(mask.get(3, 4));
        assert!(!mask.get(3, 3));
        assert_eq!(mask.count_foreground(), 1);
        assert!(!mask.is_uniform());
        assert_eq!(mask.as_image().get_pixel(3, 4)[0], 255);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut mask = BinaryMask::new(8, 8);
        mask.set(10, 10, true); // Should not panic
        assert!(!mask.get(10, 10));
    }

    #[test]
    fn test_from_image_normalizes_values() {
        let img = GrayImage::from_raw(2, 2, vec![0, 1, 128, 255]).unwrap();
        let mask = BinaryMask::from_image(img);
        let values: Vec<u8> = mask.as_image().iter().copied().collect();
        assert_eq!(values, vec![0, 255, 255, 255]);
    }

    #[test]
    fn test_from_predicate() {
        let img = GrayImage::from_raw(2, 2, vec![10, 200, 101, 102]).unwrap();
        let mask = BinaryMask::from_predicate(&img, |v| v >= 102);
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(0, 1));
        assert!(mask.get(1, 1));
    }
}
