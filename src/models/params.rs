use crate::{
    errors::{Error, Result},
    manipulations::source::ImageSource,
};
use axum::extract::Multipart;
use serde::Deserialize;
use serde_json::{Map, Value, json};

const IMAGE_FIELD: &str = "image";
const WIDTH_FIELD: &str = "w";
const HEIGHT_FIELD: &str = "h";
const ALBUM_FIELD: &str = "album_id";

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
}

impl Pagination {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

// Parsed form of the resize request. The image arrives either as a file
// part (binary upload) or as a text part naming a local file.
#[derive(Debug)]
pub struct ResizeInput {
    pub source: ImageSource,
    pub w: String,
    pub h: Option<String>,
    pub album_id: Option<i64>,
}

impl ResizeInput {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut source = None;
        let mut w = None;
        let mut h = None;
        let mut album_id = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(IMAGE_FIELD) => {
                    // A file name marks a binary upload, its absence a path reference
                    if let Some(file_name) = field.file_name().map(str::to_string) {
                        source = Some(ImageSource::Upload {
                            name: file_name,
                            bytes: field.bytes().await?,
                        });
                    } else {
                        source = Some(ImageSource::PathReference(field.text().await?.into()));
                    }
                }
                Some(WIDTH_FIELD) => w = Some(field.text().await?),
                Some(HEIGHT_FIELD) => {
                    let value = field.text().await?;
                    if !value.is_empty() {
                        h = Some(value);
                    }
                }
                Some(ALBUM_FIELD) => {
                    let value = field.text().await?;
                    album_id = Some(value.parse::<i64>().map_err(|_| Error::InvalidField {
                        field: ALBUM_FIELD.to_string(),
                        value,
                    })?);
                }
                _ => {}
            }
        }

        Ok(ResizeInput {
            source: source.ok_or(Error::MissingField(IMAGE_FIELD.to_string()))?,
            w: w.ok_or(Error::MissingField(WIDTH_FIELD.to_string()))?,
            h,
            album_id,
        })
    }

    // Serialized copy of the request parameters, minus the image payload.
    // Stored opaquely on the record.
    pub fn data(&self) -> Value {
        let mut data = Map::new();
        data.insert(WIDTH_FIELD.to_string(), json!(self.w));
        if let Some(h) = &self.h {
            data.insert(HEIGHT_FIELD.to_string(), json!(h));
        }
        if let Some(album_id) = self.album_id {
            data.insert(ALBUM_FIELD.to_string(), json!(album_id));
        }

        Value::Object(data)
    }
}
