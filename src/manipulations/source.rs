use crate::errors::{Error, Result};
use axum::body::Bytes;
use std::{
    fs,
    path::{Path, PathBuf},
};

// Where the image bytes come from. An upload carries the payload in memory
// and is written out under its client-supplied name; a path reference names
// a file already on the local file system, which gets copied and left in
// place.
#[derive(Debug)]
pub enum ImageSource {
    Upload { name: String, bytes: Bytes },
    PathReference(PathBuf),
}

// A source made durable inside the request's directory.
#[derive(Debug, Clone)]
pub struct Materialized {
    pub name: String,
    pub stem: String,
    pub extension: String,
    pub path: PathBuf,
}

impl ImageSource {
    pub fn materialize(self, dest_dir: &Path) -> Result<Materialized> {
        match self {
            ImageSource::Upload { name, bytes } => {
                check_upload_name(&name)?;
                let (stem, extension) = split_name(&name)?;
                let path = dest_dir.join(&name);
                fs::write(&path, &bytes)?;

                Ok(Materialized {
                    stem,
                    extension,
                    name,
                    path,
                })
            }
            ImageSource::PathReference(source) => {
                let name = source
                    .file_name()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| Error::IllegalFileName(source.display().to_string()))?
                    .to_string();
                let (stem, extension) = split_name(&name)?;
                let path = dest_dir.join(&name);
                fs::copy(&source, &path)?;

                Ok(Materialized {
                    stem,
                    extension,
                    name,
                    path,
                })
            }
        }
    }
}

// Client-supplied names are used verbatim as stored names, so anything that
// could leave the destination directory is refused outright.
fn check_upload_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(Error::IllegalFileName(name.to_string()));
    }

    Ok(())
}

// The derivative is encoded by extension, so a name without one is unusable
fn split_name(name: &str) -> Result<(String, String)> {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::IllegalFileName(name.to_string()))?;
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::IllegalFileName(name.to_string()))?;

    Ok((stem.to_string(), extension.to_string()))
}
