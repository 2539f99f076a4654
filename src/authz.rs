use crate::{
    errors::{Error, Result},
    store::{albums::Album, manipulations::ManipulationRecord},
};

// Ownership policy lives here, above the store: handlers call these guards
// around store reads and writes, and the store itself never filters by
// requester.

pub fn ensure_album_owner(album: &Album, user_id: i64) -> Result<()> {
    if album.user_id != user_id {
        return Err(Error::Unauthorized);
    }

    Ok(())
}

pub fn ensure_record_owner(record: &ManipulationRecord, user_id: i64) -> Result<()> {
    if record.user_id != user_id {
        return Err(Error::Unauthorized);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ManipulationKind;
    use chrono::Utc;

    fn album(user_id: i64) -> Album {
        Album {
            id: 1,
            name: "trip".to_string(),
            user_id,
            created_at: Utc::now(),
        }
    }

    fn record(user_id: i64) -> ManipulationRecord {
        ManipulationRecord {
            id: 1,
            kind: ManipulationKind::Resize,
            name: "a.png".to_string(),
            path: "images/tok/a.png".to_string(),
            output_path: "images/tok/a-resized.png".to_string(),
            data: "{}".to_string(),
            album_id: None,
            user_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_passes_stranger_fails() {
        assert!(ensure_album_owner(&album(7), 7).is_ok());
        assert!(matches!(
            ensure_album_owner(&album(7), 8),
            Err(Error::Unauthorized)
        ));
        assert!(ensure_record_owner(&record(7), 7).is_ok());
        assert!(matches!(
            ensure_record_owner(&record(7), 8),
            Err(Error::Unauthorized)
        ));
    }
}
