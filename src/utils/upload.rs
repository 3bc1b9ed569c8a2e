use std::path::{Path, PathBuf};

use actix_multipart::{Field, Multipart};
use actix_web::web::BytesMut;
use chrono::Utc;
use futures_util::TryStreamExt;
use log::error;
use tokio::io::AsyncWriteExt;

use crate::errors::AppError;

const AVATAR_FIELD: &str = "avatar";
const AVATAR_PUBLIC_PREFIX: &str = "/images/profile_pics";

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

// The multipart fields of a create/update request. Text fields are collected
// as sent; an empty value counts as absent. The avatar, if present, has
// already been written to disk by the time the handler sees this.
#[derive(Debug, Default)]
pub struct EmployeeForm {
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub country: Option<String>,
    pub avatar: Option<String>,
}

// Drains the multipart payload. The file field is streamed to the upload
// directory before any field validation runs, so a rejected request can
// still leave a stored file behind.
pub async fn collect_employee_form(
    mut payload: Multipart,
    upload_dir: &Path,
) -> Result<EmployeeForm, AppError> {
    let mut form = EmployeeForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(|err| {
        error!("Multipart stream aborted: {}", err);
        AppError::Internal(err.to_string())
    })? {
        let (name, filename) = {
            let disposition = field.content_disposition();
            (
                disposition.get_name().map(str::to_string),
                disposition.get_filename().map(str::to_string),
            )
        };
        let name = match name {
            Some(name) => name,
            None => continue,
        };

        if name == AVATAR_FIELD {
            if let Some(filename) = filename {
                form.avatar = Some(save_avatar(&mut field, upload_dir, &filename).await?);
            }
            continue;
        }

        let value = read_text(&mut field).await?;
        let value = if value.is_empty() { None } else { Some(value) };
        match name.as_str() {
            "fname" => form.fname = value,
            "lname" => form.lname = value,
            "email" => form.email = value,
            "dob" => form.dob = value,
            "country" => form.country = value,
            _ => {}
        }
    }

    Ok(form)
}

pub fn public_path(stored_name: &str) -> String {
    format!("{}/{}", AVATAR_PUBLIC_PREFIX, stored_name)
}

async fn read_text(field: &mut Field) -> Result<String, AppError> {
    let mut data = BytesMut::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?
    {
        data.extend_from_slice(&chunk);
    }
    String::from_utf8(data.to_vec()).map_err(|err| AppError::Internal(err.to_string()))
}

async fn save_avatar(
    field: &mut Field,
    upload_dir: &Path,
    original: &str,
) -> Result<String, AppError> {
    let stored_name = stored_filename(original);
    let dest = upload_dir.join(&stored_name);

    let mut file = tokio::fs::File::create(&dest).await.map_err(|err| {
        error!("Failed to create upload file {:?}: {}", dest, err);
        AppError::Storage(err.to_string())
    })?;
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?
    {
        file.write_all(&chunk).await.map_err(|err| {
            error!("Failed to write upload file {:?}: {}", dest, err);
            AppError::Storage(err.to_string())
        })?;
    }

    Ok(stored_name)
}

// `photo.png` becomes `photo-<unix millis>.png`; a name with several dots
// keeps only the part before the first dot and the last extension. Client
// path components are stripped before the name is used.
fn stored_filename(original: &str) -> String {
    let original = Path::new(original)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(AVATAR_FIELD);
    let timestamp = Utc::now().timestamp_millis();
    let stem = original.split('.').next().unwrap_or(original);
    match original.rsplit_once('.') {
        Some((_, ext)) => format!("{}-{}.{}", stem, timestamp, ext),
        None => format!("{}-{}", original, timestamp),
    }
}
