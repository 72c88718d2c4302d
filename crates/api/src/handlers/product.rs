//! Handlers for the product catalog endpoints.

use std::io::{self, Cursor};

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use ecom_core::error::CoreError;
use ecom_core::types::DbId;
use ecom_core::upload::ImageUpload;
use ecom_db::models::product::{NewProduct, Product};
use futures::TryStreamExt;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart part carrying the product JSON.
const PRODUCT_PART: &str = "product";

/// Multipart part carrying the image file.
const IMAGE_PART: &str = "imageFile";

/// GET /api/
pub async fn greeting() -> &'static str {
    "Hello World"
}

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog.list_products().await?;
    Ok(Json(products))
}

/// GET /api/product/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.get_product(id).await?;
    Ok(Json(product))
}

/// GET /api/product/{id}/image
///
/// Responds with the raw image bytes and the content type recorded at upload.
pub async fn get_product_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let image = state.catalog.get_product_image(id).await?;
    let content_type = HeaderValue::from_str(image.content_type_or_default())
        .map_err(|e| AppError::InternalError(format!("Stored image type is not a header value: {e}")))?;
    Ok(([(CONTENT_TYPE, content_type)], image.data).into_response())
}

/// POST /api/product
///
/// Expects a `product` part (JSON [`NewProduct`]) and an `imageFile` part.
/// When the product part comes first the image is streamed straight into the
/// catalog; otherwise it is buffered until the product part arrives. Returns
/// 201 with an empty body.
pub async fn add_product(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<StatusCode> {
    let mut product: Option<NewProduct> = None;
    let mut spooled: Option<ImageUpload<Cursor<Vec<u8>>>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            PRODUCT_PART => {
                if product.is_some() {
                    return Err(duplicate_part(PRODUCT_PART));
                }
                let bytes = field.bytes().await.map_err(multipart_error)?;
                let input: NewProduct = serde_json::from_slice(&bytes).map_err(|e| {
                    AppError::BadRequest(format!("Invalid '{PRODUCT_PART}' part: {e}"))
                })?;
                product = Some(input);
            }
            IMAGE_PART => {
                if spooled.is_some() {
                    return Err(duplicate_part(IMAGE_PART));
                }
                let upload = ImageUpload::new(
                    field.file_name().map(str::to_owned),
                    field.content_type().map(str::to_owned),
                    field_reader(field),
                );
                match product.take() {
                    Some(input) => {
                        state
                            .catalog
                            .add_product(input, upload)
                            .await
                            .map_err(classify_upload_failure)?;
                        // Anything after the image is ignored once the product is stored.
                        return Ok(StatusCode::CREATED);
                    }
                    None => {
                        spooled = Some(upload.spool().await.map_err(upload_error)?);
                    }
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let input = product.ok_or_else(|| missing_part(PRODUCT_PART))?;
    let upload = spooled.ok_or_else(|| missing_part(IMAGE_PART))?;
    state.catalog.add_product(input, upload).await?;
    Ok(StatusCode::CREATED)
}

/// Adapt a multipart field into an [`AsyncRead`], turning transport errors
/// into I/O errors.
fn field_reader(field: Field<'_>) -> impl AsyncRead + Unpin + Send + '_ {
    StreamReader::new(field.map_err(std::io::Error::other))
}

/// A framing or transport failure between parts. Hitting the body limit is
/// 413, anything else is a malformed request.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(err.body_text());
    }
    AppError::BadRequest(err.body_text())
}

/// A failure while reading image bytes. The body limit surfaces here as an
/// I/O error wrapping the multipart error.
fn upload_error(err: io::Error) -> AppError {
    let too_large = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
        .is_some_and(|e| e.status() == StatusCode::PAYLOAD_TOO_LARGE);
    if too_large {
        return AppError::PayloadTooLarge(err.to_string());
    }
    CoreError::Upload(err).into()
}

fn classify_upload_failure(err: AppError) -> AppError {
    match err {
        AppError::Core(CoreError::Upload(io)) => upload_error(io),
        other => other,
    }
}

fn missing_part(part: &str) -> AppError {
    AppError::BadRequest(format!("Missing required '{part}' part"))
}

fn duplicate_part(part: &str) -> AppError {
    AppError::BadRequest(format!("Duplicate '{part}' part"))
}
