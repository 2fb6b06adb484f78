use actix_multipart::Multipart;
use actix_web::error::ErrorBadRequest;
use futures_util::TryStreamExt;

use crate::model::employee::EmployeeInput;
use crate::service::PhotoUpload;

const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;

/// Employee fields plus the optional photo, decoded from `multipart/form-data`.
pub struct EmployeeForm {
    pub input: EmployeeInput,
    pub photo: Option<PhotoUpload>,
}

/// Reads `name`, `email`, `department` and an optional `photo` file part.
/// Unknown parts are drained and ignored.
///
/// A photo over `max_photo_bytes` is drained without being buffered and comes
/// back as a discarded upload, so the size error is reported together with
/// every other field error.
pub async fn read_employee_form(
    mut payload: Multipart,
    max_photo_bytes: usize,
) -> actix_web::Result<EmployeeForm> {
    let mut input = EmployeeInput::default();
    let mut photo = None;

    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let file_name = disposition.get_filename().unwrap_or_default().to_string();

        if name == "photo" {
            let mut bytes = Vec::new();
            let mut size = 0;
            while let Some(chunk) = field.try_next().await? {
                size += chunk.len();
                if size <= max_photo_bytes {
                    bytes.extend_from_slice(&chunk);
                }
            }
            photo = Some(if size > max_photo_bytes {
                PhotoUpload::discarded(file_name, size)
            } else {
                PhotoUpload::new(bytes, file_name)
            });
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
                return Err(ErrorBadRequest(format!("Field {name} is too large")));
            }
            bytes.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "name" => input.name = text(&name, bytes)?,
            "email" => input.email = text(&name, bytes)?,
            "department" => input.department = text(&name, bytes)?,
            _ => {}
        }
    }

    Ok(EmployeeForm { input, photo })
}

fn text(field: &str, bytes: Vec<u8>) -> actix_web::Result<String> {
    String::from_utf8(bytes).map_err(|_| ErrorBadRequest(format!("Field {field} must be UTF-8 text")))
}
