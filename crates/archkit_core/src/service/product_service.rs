//! Product use-case service.

use crate::model::money::{Money, MoneyError};
use crate::model::product::{Category, Product, ProductError, ProductId};
use crate::repo::product_repo::ProductRepository;
use crate::repo::RepoError;
use crate::service::pricing_service::PricingService;
use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductServiceError {
    #[error(transparent)]
    Domain(#[from] ProductError),
    #[error(transparent)]
    Money(#[from] MoneyError),
    #[error("product not found: {0}")]
    NotFound(ProductId),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for ProductServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Product(err) => Self::Domain(err),
            RepoError::Money(err) => Self::Money(err),
            other => Self::Repo(other),
        }
    }
}

pub type ProductServiceResult<T> = Result<T, ProductServiceError>;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    /// Decimal major units.
    pub price: f64,
    pub currency: String,
    pub category: String,
}

pub struct ProductService<R: ProductRepository> {
    repo: R,
    pricing: PricingService,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            pricing: PricingService::new(),
        }
    }

    pub fn create_product(&self, input: CreateProductInput) -> ProductServiceResult<Product> {
        let price = Money::from_decimal(input.price, &input.currency)?;
        let category = Category::new(input.category)?;
        let product = Product::new(input.name, input.description, price, category)?;
        self.repo.create(&product)?;
        info!(
            "event=product_create module=service status=ok product_id={}",
            product.id()
        );
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> ProductServiceResult<Product> {
        self.repo.get(id)?.ok_or(ProductServiceError::NotFound(id))
    }

    pub fn list_products(&self) -> ProductServiceResult<Vec<Product>> {
        Ok(self.repo.list()?)
    }

    pub fn update_product_info(
        &self,
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ProductServiceResult<Product> {
        let mut product = self.get_product(id)?;
        product.update_info(name, description)?;
        self.persist(&product)?;
        Ok(product)
    }

    pub fn apply_discount(&self, id: ProductId, percent: f64) -> ProductServiceResult<Product> {
        let mut product = self.get_product(id)?;
        self.pricing.apply_discount(&mut product, percent)?;
        self.persist(&product)?;
        info!(
            "event=product_discount module=service status=ok product_id={id} price_minor={}",
            product.price().amount_minor()
        );
        Ok(product)
    }

    pub fn delete_product(&self, id: ProductId) -> ProductServiceResult<()> {
        self.repo.delete(id).map_err(|err| not_found_or(err, id))
    }

    fn persist(&self, product: &Product) -> ProductServiceResult<()> {
        self.repo
            .update(product)
            .map_err(|err| not_found_or(err, product.id()))
    }
}

fn not_found_or(err: RepoError, id: ProductId) -> ProductServiceError {
    match err {
        RepoError::NotFound { .. } => ProductServiceError::NotFound(id),
        other => other.into(),
    }
}
