//! Product repository contract and SQLite implementation.

use super::{from_epoch_ms, to_epoch_ms, RepoError, RepoResult};
use crate::model::money::Money;
use crate::model::product::{Category, Product, ProductId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    price_amount,
    currency,
    category,
    created_at,
    updated_at
FROM products";

pub trait ProductRepository {
    fn create(&self, product: &Product) -> RepoResult<()>;
    fn get(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// All products ordered by name.
    fn list(&self) -> RepoResult<Vec<Product>>;
    fn update(&self, product: &Product) -> RepoResult<()>;
    fn delete(&self, id: ProductId) -> RepoResult<()>;
}

pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn create(&self, product: &Product) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO products (
                id,
                name,
                description,
                price_amount,
                currency,
                category,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                product.id().to_string(),
                product.name(),
                product.description(),
                product.price().amount_minor(),
                product.price().currency(),
                product.category().name(),
                to_epoch_ms(product.created_at()),
                to_epoch_ms(product.updated_at()),
            ],
        )?;
        Ok(())
    }

    fn get(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"))?;
        let columns = stmt
            .query_row([id.to_string()], read_product_columns)
            .optional()?;

        columns.map(ProductColumns::into_product).transpose()
    }

    fn list(&self) -> RepoResult<Vec<Product>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(read_product_columns(row)?.into_product()?);
        }

        Ok(products)
    }

    fn update(&self, product: &Product) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE products
             SET
                name = ?1,
                description = ?2,
                price_amount = ?3,
                currency = ?4,
                category = ?5,
                updated_at = ?6
             WHERE id = ?7;",
            params![
                product.name(),
                product.description(),
                product.price().amount_minor(),
                product.price().currency(),
                product.category().name(),
                to_epoch_ms(product.updated_at()),
                product.id().to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("product", product.id()));
        }

        Ok(())
    }

    fn delete(&self, id: ProductId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::not_found("product", id));
        }

        Ok(())
    }
}

struct ProductColumns {
    id: String,
    name: String,
    description: String,
    price_amount: i64,
    currency: String,
    category: String,
    created_at: i64,
    updated_at: i64,
}

fn read_product_columns(row: &Row<'_>) -> rusqlite::Result<ProductColumns> {
    Ok(ProductColumns {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price_amount: row.get("price_amount")?,
        currency: row.get("currency")?,
        category: row.get("category")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl ProductColumns {
    fn into_product(self) -> RepoResult<Product> {
        let id: ProductId = self.id.parse().map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{}` in products.id", self.id))
        })?;

        let product = Product::restore(
            id,
            self.name,
            self.description,
            Money::new(self.price_amount, &self.currency)?,
            Category::new(self.category)?,
            from_epoch_ms(self.created_at, "products.created_at")?,
            from_epoch_ms(self.updated_at, "products.updated_at")?,
        )?;
        Ok(product)
    }
}
