use crate::{errors::Result, store, vars::RESIZD_PUBLIC_BASE};
use std::{fs, path::PathBuf};

// Deleting a record never removes its files, so the images tree slowly
// accumulates directories no record points at. This sweep removes them.
// Offline only: it is never run from the request path.
pub async fn run() -> Result<()> {
    println!("Running orphan cleanup...");
    store::init().await?;

    let images_dir = PathBuf::from(*RESIZD_PUBLIC_BASE).join("images");
    if !images_dir.exists() {
        println!("Nothing to clean: {} does not exist", images_dir.display());
        return Ok(());
    }

    let mut removed = 0;
    for entry in fs::read_dir(&images_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let Some(token) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if store::manipulations::any_in_dir(store::pool(), token).await? {
            continue;
        }

        match fs::remove_dir_all(&path) {
            Ok(()) => {
                println!("Removed orphaned directory: {}", path.display());
                removed += 1;
            }
            Err(e) => eprintln!("Failed to remove {}: {e}", path.display()),
        }
    }

    println!("Cleanup completed. Directories removed: {removed}");

    Ok(())
}
