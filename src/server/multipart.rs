//! Multipart form → [`UploadRequest`] conversion.

use std::io::SeekFrom;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use futures::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::staging::{RawAsset, UploadRequest};

/// Read the upload form.
///
/// Text fields `date`, `slug` and `note` are collected. Files are taken from
/// `files` parts, or from `file` parts when there are no `files` parts. File
/// parts without a filename (an empty file input) are ignored. Each file is
/// spooled to an anonymous temp file so memory use stays flat.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadRequest> {
    let mut request = UploadRequest::default();
    let mut files = Vec::new();
    let mut single_files = Vec::new();
    let mut field_names = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        field_names.push(name.clone());

        match name.as_str() {
            "date" => request.date = field.text().await.map_err(multipart_error)?,
            "slug" => request.custom_slug = field.text().await.map_err(multipart_error)?,
            "note" => request.note = field.text().await.map_err(multipart_error)?,
            "files" | "file" => {
                let Some(file_name) = field
                    .file_name()
                    .filter(|file_name| !file_name.is_empty())
                    .map(str::to_string)
                else {
                    continue;
                };

                let asset = spool(file_name, field).await?;
                if name == "files" {
                    files.push(asset);
                } else {
                    single_files.push(asset);
                }
            }
            _ => {}
        }
    }

    request.assets = if files.is_empty() { single_files } else { files };

    tracing::debug!("Form fields: {:?}", field_names);
    tracing::debug!(
        "Files ({}): {}",
        request.assets.len(),
        request
            .assets
            .iter()
            .map(|asset| asset.original_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(request)
}

/// Stream one file part to disk and rewind it for reading.
async fn spool(file_name: String, mut field: Field<'_>) -> Result<RawAsset> {
    let mut spool = File::from_std(tempfile::tempfile()?);

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(multipart_error)?;
        spool.write_all(&chunk).await?;
    }

    spool.flush().await?;
    spool.seek(SeekFrom::Start(0)).await?;

    Ok(RawAsset::new(file_name, spool.into_std().await))
}

fn multipart_error(err: MultipartError) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(err.body_text())
    } else {
        Error::Multipart(err.body_text())
    }
}
