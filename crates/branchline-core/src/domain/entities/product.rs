//! The `Product` leaf aggregate: belongs to exactly one office and carries a
//! non-negative stock count.

use serde::{Deserialize, Serialize};

use super::{DomainError, EntityName};
use crate::domain::value_objects::{EntityKind, OfficeId, ParentRef, ProductId};

/// A validated product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ProductInput")]
pub struct Product {
    id: Option<ProductId>,
    name: EntityName,
    stock: i64,
    office_id: OfficeId,
}

impl Product {
    pub fn new(
        id: Option<ProductId>,
        name: impl AsRef<str>,
        stock: i64,
        office_id: OfficeId,
    ) -> Result<Self, DomainError> {
        let name = EntityName::parse(EntityKind::Product, name)?;
        if stock < 0 {
            return Err(DomainError::NegativeStock { stock });
        }

        Ok(Self {
            id,
            name,
            stock,
            office_id,
        })
    }

    pub const fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub const fn stock(&self) -> i64 {
        self.stock
    }

    pub const fn office_id(&self) -> OfficeId {
        self.office_id
    }

    pub const fn parent(&self) -> ParentRef {
        ParentRef::Office(self.office_id)
    }

    pub fn with_id(self, id: ProductId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

/// Raw, unvalidated product fields as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub office_id: Option<i64>,
}

impl TryFrom<ProductInput> for Product {
    type Error = DomainError;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        let name = EntityName::parse_opt(EntityKind::Product, input.name.as_deref())?;
        let stock = input
            .stock
            .ok_or(DomainError::MissingRequiredField { field: "stock" })?;
        if stock < 0 {
            return Err(DomainError::NegativeStock { stock });
        }
        let office_id = input
            .office_id
            .map(OfficeId::new)
            .ok_or(DomainError::MissingRequiredField { field: "office_id" })?;

        Ok(Self {
            id: input.id.map(ProductId::new),
            name,
            stock,
            office_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(stock: Option<i64>, office_id: Option<i64>) -> ProductInput {
        ProductInput {
            id: None,
            name: Some("widget".into()),
            stock,
            office_id,
        }
    }

    #[test]
    fn zero_stock_is_valid() {
        let product = Product::new(None, "widget", 0, OfficeId::new(1)).unwrap();
        assert_eq!(product.stock(), 0);
        assert_eq!(product.name().as_str(), "WIDGET");
    }

    #[test]
    fn negative_stock_fails() {
        for stock in [-1, -100, i64::MIN] {
            assert_eq!(
                Product::new(None, "widget", stock, OfficeId::new(1)),
                Err(DomainError::NegativeStock { stock })
            );
        }
    }

    #[test]
    fn missing_stock_fails() {
        assert_eq!(
            Product::try_from(input(None, Some(1))),
            Err(DomainError::MissingRequiredField { field: "stock" })
        );
    }

    #[test]
    fn missing_office_fails() {
        assert_eq!(
            Product::try_from(input(Some(5), None)),
            Err(DomainError::MissingRequiredField { field: "office_id" })
        );
    }

    #[test]
    fn negative_stock_from_input_fails() {
        assert_eq!(
            Product::try_from(input(Some(-3), Some(1))),
            Err(DomainError::NegativeStock { stock: -3 })
        );
    }

    #[test]
    fn with_id_keeps_fields() {
        let product = Product::new(None, "widget", 4, OfficeId::new(2))
            .unwrap()
            .with_id(ProductId::new(10));
        assert_eq!(product.id(), Some(ProductId::new(10)));
        assert_eq!(product.parent(), ParentRef::Office(OfficeId::new(2)));
    }
}
