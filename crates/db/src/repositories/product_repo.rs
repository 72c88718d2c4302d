//! Repository for the `products` table.

use ecom_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::Product;

/// Column list for `products` queries.
const COLUMNS: &str = "\
    product_id, name, price, brand, description, category, release_date, \
    available, stock_quantity, image_name, image_type, image_data";

/// Provides the SQL behind the catalog store.
pub struct ProductRepo;

impl ProductRepo {
    /// List every product in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY product_id ASC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE product_id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new product, returning the row with its generated ID.
    ///
    /// Any `product_id` already set on `input` is ignored.
    pub async fn create(pool: &PgPool, input: &Product) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (name, price, brand, description, category, release_date, \
                 available, stock_quantity, image_name, image_type, image_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.release_date)
            .bind(input.available)
            .bind(input.stock_quantity)
            .bind(&input.image_name)
            .bind(&input.image_type)
            .bind(&input.image_data)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every column of an existing product. Returns `None` if no
    /// row with `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &Product,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                name = $2, price = $3, brand = $4, description = $5, category = $6, \
                release_date = $7, available = $8, stock_quantity = $9, \
                image_name = $10, image_type = $11, image_data = $12 \
             WHERE product_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.brand)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.release_date)
            .bind(input.available)
            .bind(input.stock_quantity)
            .bind(&input.image_name)
            .bind(&input.image_type)
            .bind(&input.image_data)
            .fetch_optional(pool)
            .await
    }
}
