//! Picks the first usable image out of an ordered list of candidates.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use egui::ColorImage;
use image::imageops::FilterType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageCategory { Background, Character }

impl fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageCategory::Background => "background",
            ImageCategory::Character  => "character",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fit {
    /// Source pixels as they are, shrunk only when larger than the box.
    /// The painter stretches the texture to wherever it is drawn.
    Native,
    /// Largest size inside the target box with the source aspect ratio.
    Contain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetBox {
    pub width:  u32,
    pub height: u32,
    pub fit:    Fit,
}

impl TargetBox {
    pub fn new(width: u32, height: u32, fit: Fit) -> Self { Self { width, height, fit } }
}

pub struct DecodedImage {
    pub source: PathBuf,
    pub image:  ColorImage,
}

impl DecodedImage {
    pub fn width(&self) -> usize { self.image.size[0] }
    pub fn height(&self) -> usize { self.image.size[1] }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("source", &self.source)
            .field("size", &self.image.size)
            .finish()
    }
}

pub trait Decode {
    fn exists(&self, path: &Path) -> bool { path.is_file() }
    fn decode(&self, path: &Path, target: TargetBox) -> Result<DecodedImage>;
}

/// Decodes from disk with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDecoder;

impl Decode for FileDecoder {
    fn decode(&self, path: &Path, target: TargetBox) -> Result<DecodedImage> {
        if target.width == 0 || target.height == 0 {
            bail!("empty target box {}x{}", target.width, target.height);
        }
        let img = image::open(path).with_context(|| format!("decoding {}", path.display()))?;
        let img = match target.fit {
            Fit::Native if img.width() <= target.width && img.height() <= target.height => img,
            Fit::Native | Fit::Contain => img.resize(target.width, target.height, FilterType::Triangle),
        };
        let img = img.to_rgba8();
        let (w, h) = img.dimensions();
        Ok(DecodedImage {
            source: path.to_path_buf(),
            image:  ColorImage::from_rgba_unmultiplied([w as usize, h as usize], img.as_raw()),
        })
    }
}

pub struct ImageResolver<D = FileDecoder> {
    decoder: D,
}

impl ImageResolver {
    pub fn on_disk() -> Self { Self::new(FileDecoder) }
}

impl<D: Decode> ImageResolver<D> {
    pub fn new(decoder: D) -> Self { Self { decoder } }

    /// Returns the first candidate that exists and decodes. Failures are
    /// logged and skipped; `None` means the caller draws its fallback.
    pub fn resolve(&self, category: ImageCategory, candidates: &[PathBuf], target: TargetBox) -> Option<DecodedImage> {
        for path in candidates {
            if !self.decoder.exists(path) {
                log::debug!("{category} candidate {} not found", path.display());
                continue;
            }
            match self.decoder.decode(path, target) {
                Ok(img) => {
                    log::info!("using {category} image {} ({}x{})", path.display(), img.width(), img.height());
                    return Some(img);
                }
                Err(e) => log::warn!("could not load {category} image: {e:#}"),
            }
        }
        log::info!("no {category} image found, using fallback");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("oneshot-splash-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, w: u32, h: u32) {
        image::RgbaImage::from_pixel(w, h, image::Rgba([200, 40, 90, 255])).save(path).unwrap();
    }

    #[test]
    fn skips_missing_and_corrupt_candidates() {
        let dir = scratch_dir("fallback");
        let missing = dir.join("background.png");
        let corrupt = dir.join("wallpaper.png");
        let valid = dir.join("hypr-wallpaper.png");
        std::fs::write(&corrupt, b"definitely not a png").unwrap();
        write_png(&valid, 32, 16);

        let img = ImageResolver::on_disk()
            .resolve(ImageCategory::Background, &[missing, corrupt, valid.clone()], TargetBox::new(64, 48, Fit::Native))
            .unwrap();
        assert_eq!(img.source, valid);
        assert_eq!((img.width(), img.height()), (32, 16));
    }

    #[test]
    fn native_keeps_source_pixels_unless_oversized() {
        let dir = scratch_dir("native");
        let small = dir.join("wallpaper.png");
        let huge = dir.join("background.png");
        write_png(&small, 300, 100);
        write_png(&huge, 1000, 500);

        let target = TargetBox::new(400, 400, Fit::Native);
        let kept = FileDecoder.decode(&small, target).unwrap();
        assert_eq!((kept.width(), kept.height()), (300, 100));
        let shrunk = FileDecoder.decode(&huge, target).unwrap();
        assert_eq!((shrunk.width(), shrunk.height()), (400, 200));
    }

    #[test]
    fn nothing_usable_is_absent() {
        let dir = scratch_dir("absent");
        let corrupt = dir.join("niko.png");
        std::fs::write(&corrupt, b"").unwrap();
        let found = ImageResolver::on_disk()
            .resolve(ImageCategory::Character, &[dir.join("nope.png"), corrupt], TargetBox::new(400, 400, Fit::Contain));
        assert!(found.is_none());
        assert!(ImageResolver::on_disk().resolve(ImageCategory::Character, &[], TargetBox::new(400, 400, Fit::Contain)).is_none());
    }

    #[test]
    fn contain_keeps_aspect_ratio() {
        let dir = scratch_dir("contain");
        let wide = dir.join("niko.png");
        write_png(&wide, 800, 400);
        let img = ImageResolver::on_disk()
            .resolve(ImageCategory::Character, &[wide], TargetBox::new(400, 400, Fit::Contain))
            .unwrap();
        assert_eq!((img.width(), img.height()), (400, 200));
    }

    #[test]
    fn zero_sized_target_falls_through() {
        let dir = scratch_dir("zero");
        let p = dir.join("a.png");
        write_png(&p, 4, 4);
        assert!(FileDecoder.decode(&p, TargetBox::new(0, 10, Fit::Native)).is_err());
    }

    /// Pretends every listed path exists; decodes only the ones marked good.
    struct Recording {
        good:     Vec<PathBuf>,
        attempts: RefCell<Vec<PathBuf>>,
    }

    impl Decode for Recording {
        fn exists(&self, _path: &Path) -> bool { true }
        fn decode(&self, path: &Path, _target: TargetBox) -> Result<DecodedImage> {
            self.attempts.borrow_mut().push(path.to_path_buf());
            if !self.good.iter().any(|g| g == path) {
                bail!("bad image");
            }
            Ok(DecodedImage { source: path.to_path_buf(), image: ColorImage::new([1, 1], Default::default()) })
        }
    }

    #[test]
    fn stops_at_first_success() {
        let paths: Vec<PathBuf> = ["a", "b", "c", "d"].iter().map(PathBuf::from).collect();
        let resolver = ImageResolver::new(Recording {
            good:     vec![paths[1].clone(), paths[2].clone()],
            attempts: RefCell::new(Vec::new()),
        });
        let img = resolver.resolve(ImageCategory::Background, &paths, TargetBox::new(1, 1, Fit::Native)).unwrap();
        assert_eq!(img.source, paths[1]);
        assert_eq!(*resolver.decoder.attempts.borrow(), paths[..2]);
    }
}
