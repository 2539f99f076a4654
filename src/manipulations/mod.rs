use crate::errors::Result;
use image::{GenericImageView, imageops::FilterType};
use self::source::ImageSource;
use std::path::Path;

pub mod dimensions;
pub mod source;

pub fn idgen() -> String {
    uuid::Uuid::new_v4().to_string()
}

// Result of a completed resize. Paths are relative to the public base so
// they can be stored and served as-is.
#[derive(Debug, Clone)]
pub struct ResizeOutcome {
    pub name: String,
    pub path: String,
    pub output_path: String,
    pub width: u32,
    pub height: u32,
}

// Materializes the source into `images/<token>/` under the public base,
// then decodes, scales, and writes the derivative next to the original as
// `<stem>-resized.<extension>`. Blocking (file and image work); callers on
// the runtime use spawn_blocking.
pub fn resize(
    public_base: &Path,
    token: &str,
    source: ImageSource,
    w: &str,
    h: Option<&str>,
) -> Result<ResizeOutcome> {
    let dest_dir = public_base.join("images").join(token);
    if !dest_dir.exists() {
        std::fs::create_dir_all(&dest_dir)?;
    }

    let materialized = source.materialize(&dest_dir)?;
    let image = image::open(&materialized.path)?;
    let (original_width, original_height) = image.dimensions();
    let (width, height) = dimensions::compute(original_width, original_height, w, h)?;

    let resized_name = format!("{}-resized.{}", materialized.stem, materialized.extension);
    image
        .resize_exact(width, height, FilterType::Triangle)
        .save(dest_dir.join(&resized_name))?;

    Ok(ResizeOutcome {
        path: format!("images/{token}/{}", materialized.name),
        output_path: format!("images/{token}/{resized_name}"),
        name: materialized.name,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        image::DynamicImage::new_rgba8(width, height)
            .save(&path)
            .unwrap();

        path
    }

    #[test]
    fn resize_writes_original_and_derivative() {
        let workspace = tempfile::tempdir().unwrap();
        let public_base = tempfile::tempdir().unwrap();
        let original = write_test_png(workspace.path(), "sample.png", 8, 4);

        let outcome = resize(
            public_base.path(),
            "token-1",
            ImageSource::PathReference(original),
            "50%",
            None,
        )
        .unwrap();

        assert_eq!(outcome.name, "sample.png");
        assert_eq!(outcome.path, "images/token-1/sample.png");
        assert_eq!(outcome.output_path, "images/token-1/sample-resized.png");
        assert_eq!((outcome.width, outcome.height), (4, 2));

        // Stored paths must resolve to real files right after creation
        assert!(public_base.path().join(&outcome.path).exists());
        assert!(public_base.path().join(&outcome.output_path).exists());

        let derivative = image::open(public_base.path().join(&outcome.output_path)).unwrap();
        assert_eq!(derivative.dimensions(), (4, 2));
    }

    #[test]
    fn resize_accepts_absolute_target() {
        let workspace = tempfile::tempdir().unwrap();
        let public_base = tempfile::tempdir().unwrap();
        let original = write_test_png(workspace.path(), "wide.png", 10, 10);

        let outcome = resize(
            public_base.path(),
            "token-2",
            ImageSource::PathReference(original),
            "3",
            Some("5"),
        )
        .unwrap();

        assert_eq!((outcome.width, outcome.height), (3, 5));
    }

    #[test]
    fn invalid_sizing_leaves_no_derivative() {
        let workspace = tempfile::tempdir().unwrap();
        let public_base = tempfile::tempdir().unwrap();
        let original = write_test_png(workspace.path(), "bad.png", 8, 8);

        let result = resize(
            public_base.path(),
            "token-3",
            ImageSource::PathReference(original),
            "huge",
            None,
        );

        assert!(result.is_err());
        assert!(
            !public_base
                .path()
                .join("images/token-3/bad-resized.png")
                .exists()
        );
    }
}
