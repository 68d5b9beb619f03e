//! Product image upload handlers.
//!
//! A successful upload creates exactly one stored object and exactly one
//! metadata row. Validation (ownership, multipart fields, payload) happens
//! before anything is written; if the metadata insert fails afterwards the
//! stored object is removed again.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::instrument;

use vila_core::{ProductId, StoreId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentProfile;
use crate::models::ProductImage;
use crate::routes::account::owned_store;
use crate::state::AppState;

/// Multipart field name carrying the file.
const FILE_FIELD: &str = "file";

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// URL under which the uploaded object is served.
    #[serde(rename = "publicUrl")]
    pub public_url: String,
}

/// One file part pulled out of the multipart body.
struct FilePart {
    content_type: String,
    data: Vec<u8>,
}

/// Upload an image for a product in an owned store.
///
/// Accepts multipart form data with a single `file` part. Missing or
/// unreadable parts are a 400-class error and leave no object and no row
/// behind.
#[instrument(skip(state, profile, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    // Ownership first: an unowned store 404s before the body is read.
    let store = owned_store(&state, &profile, store_id).await?;

    let products = ProductRepository::new(state.pool());
    let product = products
        .get_in_store(product_id, store.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let file = read_file_part(multipart).await?;

    // Validation inside save() runs before the object is written.
    let object = state
        .media()
        .save(store.id, &file.content_type, &file.data)
        .await?;

    let image = match products
        .insert_image(
            product.id,
            store.id,
            profile.id,
            &object.path,
            &file.content_type,
            object.size_bytes,
        )
        .await
    {
        Ok(image) => image,
        Err(e) => {
            // Metadata insert failed: remove the object so the
            // one-object-one-row property holds.
            if let Err(cleanup) = state.media().remove(&object.path).await {
                tracing::warn!(path = %object.path, error = %cleanup, "orphaned media object");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        image_id = %image.id,
        product_id = %product.id,
        store_id = %store.id,
        "product image uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            public_url: image.public_url(),
        }),
    ))
}

/// List the images recorded for a product in an owned store.
#[instrument(skip(state, profile))]
pub async fn list_images(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path((store_id, product_id)): Path<(StoreId, ProductId)>,
) -> Result<Json<Vec<ProductImage>>> {
    let store = owned_store(&state, &profile, store_id).await?;

    let products = ProductRepository::new(state.pool());
    let product = products
        .get_in_store(product_id, store.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let images = products.list_images(product.id).await?;
    Ok(Json(images))
}

/// Pull the `file` part out of the multipart body.
///
/// Returns `BadRequest` when the part is missing, unnamed, or unreadable.
async fn read_file_part(mut multipart: Multipart) -> Result<FilePart> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("file part has no content type".to_owned()))?
            .to_owned();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("could not read file part: {e}")))?;

        return Ok(FilePart {
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::BadRequest(format!(
        "missing multipart field '{FILE_FIELD}'"
    )))
}
