//! Catalog service: the layer between HTTP handlers and the product store.

use std::sync::Arc;

use ecom_core::error::CoreError;
use ecom_core::types::DbId;
use ecom_core::upload::{ImageUpload, ProductImage};
use ecom_db::models::product::{NewProduct, Product};
use ecom_db::store::ProductStore;
use tokio::io::AsyncRead;

use crate::error::AppResult;

/// Entity name used in not-found errors.
const PRODUCT: &str = "Product";

/// Product catalog operations over a [`ProductStore`].
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// All products in the catalog.
    #[tracing::instrument(skip_all)]
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let products = self.store.find_all().await?;
        tracing::debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// The product with `id`, or `CoreError::NotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: DbId) -> AppResult<Product> {
        match self.store.find_by_id(id).await? {
            Some(product) => Ok(product),
            None => {
                tracing::warn!("Product not found");
                Err(CoreError::NotFound {
                    entity: PRODUCT,
                    id,
                }
                .into())
            }
        }
    }

    /// Read `upload` to the end, attach it to `input`, and persist the result.
    ///
    /// The image is read completely before anything is written, so a failed
    /// read leaves the store untouched.
    #[tracing::instrument(
        skip_all,
        fields(name = %input.name, file_name = ?upload.file_name())
    )]
    pub async fn add_product<R>(
        &self,
        input: NewProduct,
        upload: ImageUpload<R>,
    ) -> AppResult<Product>
    where
        R: AsyncRead + Unpin + Send,
    {
        let image = upload.read_image().await.map_err(CoreError::Upload)?;
        let size = image.data.len();

        let saved = self.store.save(input.into_product(image)).await?;
        tracing::info!(product_id = ?saved.product_id, image_bytes = size, "Product added");
        Ok(saved)
    }

    /// The image stored with product `id`.
    ///
    /// Not found if either the product is absent or it has no image.
    #[tracing::instrument(skip(self))]
    pub async fn get_product_image(&self, id: DbId) -> AppResult<ProductImage> {
        let product = self.get_product(id).await?;
        product.image().ok_or_else(|| {
            tracing::warn!("Product has no image");
            CoreError::NotFound {
                entity: "Product image",
                id,
            }
            .into()
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
