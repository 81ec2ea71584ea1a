use std::path::PathBuf;

use image::RgbImage;

use super::ImageSink;

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ImageSink for NullSink {
    fn display(&mut self, _image: &RgbImage) {}
}

/// Writes each image as `<prefix>_<n>.png` into a directory.
#[derive(Debug, Clone)]
pub struct PngDirSink {
    dir: PathBuf,
    prefix: String,
    count: usize,
}

impl PngDirSink {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            count: 0,
        }
    }

    /// Number of images written so far.
    pub fn written(&self) -> usize {
        self.count
    }
}

impl ImageSink for PngDirSink {
    fn display(&mut self, image: &RgbImage) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!("cannot create {}: {}", self.dir.display(), e);
            return;
        }
        let path = self
            .dir
            .join(format!("{}_{:03}.png", self.prefix, self.count));
        match image.save(&path) {
            Ok(()) => {
                self.count += 1;
                tracing::info!("Annotated image written to {}", path.display());
            }
            Err(e) => tracing::warn!("failed to write {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_numbered_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = PngDirSink::new(dir.path().join("out"), "p2c");
        sink.display(&RgbImage::new(4, 4));
        sink.display(&RgbImage::new(4, 4));
        assert_eq!(sink.written(), 2);
        assert!(dir.path().join("out/p2c_001.png").exists());
    }

    #[test]
    fn unwritable_target_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let mut sink = PngDirSink::new(blocker.join("sub"), "p2c");
        sink.display(&RgbImage::new(2, 2));
        assert_eq!(sink.written(), 0);
    }
}
