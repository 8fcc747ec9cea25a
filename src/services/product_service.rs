use serde::Serialize;

use super::http::ServiceClient;
use crate::models::Product;
use crate::utils::AppError;

// ==================== CATALOG SERVICE ====================

const PRODUCTS_PATH: &str = "/api/catalog/products";
const ADMIN_PRODUCTS_PATH: &str = "/api/catalog/admin/products";

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

pub async fn get_all_products(client: &ServiceClient) -> Result<Vec<Product>, AppError> {
    log::info!("📦 Fetching all products");
    let products: Vec<Product> = client.get_json(PRODUCTS_PATH, "fetch products").await?;
    log::info!("✅ Retrieved {} products", products.len());
    Ok(products)
}

pub async fn get_product_by_id(client: &ServiceClient, id: i64) -> Result<Product, AppError> {
    log::info!("📦 Fetching product {}", id);
    client
        .get_json(&format!("{}/{}", PRODUCTS_PATH, id), "fetch product")
        .await
}

pub async fn get_products_by_category(
    client: &ServiceClient,
    category: &str,
) -> Result<Vec<Product>, AppError> {
    let path = format!("{}?category={}", PRODUCTS_PATH, urlencoding::encode(category));
    client.get_json(&path, "fetch products by category").await
}

pub async fn get_products_by_name(
    client: &ServiceClient,
    name: &str,
) -> Result<Vec<Product>, AppError> {
    let path = format!("{}?name={}", PRODUCTS_PATH, urlencoding::encode(name));
    client.get_json(&path, "fetch products by name").await
}

pub async fn create_product<B>(client: &ServiceClient, product: &B) -> Result<Product, AppError>
where
    B: Serialize + ?Sized,
{
    log::info!("➕ Creating product");
    let created: Product = client
        .post_json(ADMIN_PRODUCTS_PATH, product, "create product")
        .await?;
    log::info!("✅ Product {} created ({})", created.id, created.product_name);
    Ok(created)
}

pub async fn update_product<B>(
    client: &ServiceClient,
    id: i64,
    product: &B,
) -> Result<Product, AppError>
where
    B: Serialize + ?Sized,
{
    log::info!("✏️  Updating product {}", id);
    client
        .put_json(&format!("{}/{}", ADMIN_PRODUCTS_PATH, id), product, "update product")
        .await
}

pub async fn delete_product(client: &ServiceClient, id: i64) -> Result<(), AppError> {
    log::info!("🗑️  Deleting product {}", id);
    client
        .delete(&format!("{}/{}", ADMIN_PRODUCTS_PATH, id), "delete product")
        .await
}

// ==================== CLIENT-SIDE FILTERING ====================

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// `None` or `"All"` disables the category filter
    pub category: Option<String>,
    pub search: String,
}

impl ProductFilter {
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        Self {
            category: category
                .map(str::to_string)
                .filter(|c| !c.is_empty() && c != ALL_CATEGORIES),
            search: search.unwrap_or_default().to_string(),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }

        if self.search.is_empty() {
            return true;
        }

        let term = self.search.to_lowercase();
        product.product_name.to_lowercase().contains(&term)
            || product.description.to_lowercase().contains(&term)
    }

    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// `All` followed by each distinct category in first-seen order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut result = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !product.category.is_empty() && !result.contains(&product.category) {
            result.push(product.category.clone());
        }
    }
    result
}
