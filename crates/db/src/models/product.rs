//! Product entity model and DTOs.

use chrono::NaiveDate;
use ecom_core::types::DbId;
use ecom_core::upload::ProductImage;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
///
/// `product_id` is `None` until the store assigns one on insert. The JSON
/// form uses camelCase keys and carries `image_data` as standard base64.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: Option<DbId>,
    pub name: String,
    /// Plain floating-point amount with no currency attached.
    pub price: f64,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "release_date::deserialize")]
    pub release_date: Option<NaiveDate>,
    pub available: bool,
    pub stock_quantity: i32,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    #[serde(default, alias = "imageDate", with = "base64_bytes")]
    pub image_data: Vec<u8>,
}

impl Product {
    /// The attached image, if the product was stored with one.
    pub fn image(&self) -> Option<ProductImage> {
        if self.image_name.is_none() && self.image_data.is_empty() {
            return None;
        }
        Some(ProductImage {
            name: self.image_name.clone(),
            content_type: self.image_type.clone(),
            data: self.image_data.clone(),
        })
    }
}

/// DTO for creating a product, sent as the `product` part of the
/// add-product request.
///
/// Every field is optional; missing ones take their default. Identifier and
/// image fields in the payload are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "release_date::deserialize")]
    pub release_date: Option<NaiveDate>,
    pub available: bool,
    pub stock_quantity: i32,
}

impl NewProduct {
    /// Build an unsaved [`Product`] carrying `image`.
    pub fn into_product(self, image: ProductImage) -> Product {
        Product {
            product_id: None,
            name: self.name,
            price: self.price,
            brand: self.brand,
            description: self.description,
            category: self.category,
            release_date: self.release_date,
            available: self.available,
            stock_quantity: self.stock_quantity,
            image_name: image.name,
            image_type: image.content_type,
            image_data: image.data,
        }
    }
}

/// Accepts a plain `YYYY-MM-DD` date, an RFC 3339 timestamp or epoch
/// milliseconds. Timestamps keep their UTC calendar day.
mod release_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Text(String),
        Millis(i64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = match Option::<RawDate>::deserialize(deserializer)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let date = match raw {
            RawDate::Text(text) => parse_text(&text)
                .ok_or_else(|| D::Error::custom(format!("invalid release date '{text}'")))?,
            RawDate::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| D::Error::custom(format!("release date {ms} is out of range")))?
                .date_naive(),
        };
        Ok(Some(date))
    }

    fn parse_text(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|ts| ts.with_timezone(&Utc).date_naive())
        })
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
