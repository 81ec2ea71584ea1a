use std::collections::VecDeque;
use std::path::PathBuf;

use image::DynamicImage;

use super::ImageSource;
use crate::error::{Error, Result};

/// Serves stored images in order, one per capture.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    queue: VecDeque<PathBuf>,
}

impl FileImageSource {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            queue: paths.into_iter().collect(),
        }
    }

    /// Images not yet captured.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ImageSource for FileImageSource {
    fn capture(&mut self) -> Result<DynamicImage> {
        let path = self
            .queue
            .pop_front()
            .ok_or_else(|| Error::capture("no more image files"))?;
        tracing::info!("Loading image: {}", path.display());
        self.read_file(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn captures_in_order_then_runs_dry() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])).save(&a).unwrap();
        RgbImage::from_pixel(5, 4, Rgb([4, 5, 6])).save(&b).unwrap();

        let mut src = FileImageSource::new([a, b]);
        assert_eq!(src.capture().unwrap().width(), 3);
        assert_eq!(src.remaining(), 1);
        assert_eq!(src.capture().unwrap().width(), 5);
        assert!(matches!(src.capture(), Err(Error::Capture { .. })));
    }

    #[test]
    fn garbage_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("broken.png");
        std::fs::write(&p, b"not an image").unwrap();
        let mut src = FileImageSource::new([p]);
        assert!(matches!(src.capture(), Err(Error::ImageDecode { .. })));
    }
}
