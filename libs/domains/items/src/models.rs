use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::InvalidValue;
use crate::values::{ItemDescription, ItemName, Money};

/// Item aggregate root.
///
/// All mutation goes through the invariant-enforcing methods below; fields
/// are never assigned by callers. An item without an id has never been
/// persisted; the repository assigns identity exactly once via
/// [`Item::with_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: Option<Uuid>,
    name: ItemName,
    description: Option<ItemDescription>,
    price: Money,
    in_stock: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a new, unpersisted item from creation input.
    ///
    /// Value objects are constructed field by field; the first failure wins
    /// and nothing is assembled.
    pub fn new(input: CreateItem) -> Result<Self, InvalidValue> {
        let name = ItemName::new(&input.name)?;
        let description = ItemDescription::from_optional(input.description.as_deref())?;
        let price = Money::from_f64(input.price)?;
        let now = Utc::now();
        Ok(Self {
            id: None,
            name,
            description,
            price,
            in_stock: input.in_stock,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn description(&self) -> Option<&ItemDescription> {
        self.description.as_ref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Attach the repository-assigned identity. For repository adapters:
    /// identity is assigned at first persistence and immutable afterwards.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Replace the name, revalidating the new value.
    pub fn rename(&mut self, new_name: &str) -> Result<(), InvalidValue> {
        self.name = ItemName::new(new_name)?;
        self.touch();
        Ok(())
    }

    /// Replace the price, revalidating the new value.
    pub fn reprice(&mut self, new_price: f64) -> Result<(), InvalidValue> {
        self.price = Money::from_f64(new_price)?;
        self.touch();
        Ok(())
    }

    /// Flip stock availability. No validation is possible here.
    pub fn set_stock(&mut self, flag: bool) {
        self.in_stock = flag;
        self.touch();
    }

    /// Apply only the fields present in the update.
    ///
    /// Every present field is validated into its value object before any
    /// assignment happens, so a failure leaves the entity exactly as it was.
    /// An update with no fields at all is a no-op and does not bump
    /// `updated_at`.
    pub fn apply_partial_update(&mut self, update: UpdateItem) -> Result<(), InvalidValue> {
        let name = update.name.as_deref().map(ItemName::new).transpose()?;
        let description = match update.description.as_deref() {
            // a blank description explicitly clears the field
            Some(raw) => Some(ItemDescription::from_optional(Some(raw))?),
            None => None,
        };
        let price = update.price.map(Money::from_f64).transpose()?;
        let in_stock = update.in_stock;

        if name.is_none() && description.is_none() && price.is_none() && in_stock.is_none() {
            return Ok(());
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(flag) = in_stock {
            self.in_stock = flag;
        }
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 999999.99))]
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// DTO for partially updating an existing item.
///
/// Absent fields are left untouched. serde cannot distinguish `null` from
/// an omitted key, so both mean "leave as is"; clearing the description is
/// expressed with a blank string.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 999999.99))]
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

/// DTO returned across the application boundary. Carries primitives only;
/// the mapping from the entity is enumerated field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemResponse {
    /// Map a persisted entity to its response shape; `None` for an entity
    /// that has no id yet (which a repository must never return).
    pub fn from_entity(item: &Item) -> Option<Self> {
        let id = item.id()?;
        Some(Self {
            id,
            name: item.name().as_str().to_owned(),
            description: item.description().map(|d| d.as_str().to_owned()),
            price: item.price().as_f64(),
            in_stock: item.in_stock(),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        })
    }
}

/// Query parameters for the search endpoint
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name and description
    #[serde(default)]
    pub q: String,
}

/// Flat storage representation used by cache adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemRecord {
    /// `None` when the item was never persisted; such items have no place
    /// in a cache.
    pub fn from_entity(item: &Item) -> Option<Self> {
        let id = item.id()?;
        Some(Self {
            id,
            name: item.name().as_str().to_owned(),
            description: item.description().map(|d| d.as_str().to_owned()),
            price_cents: item.price().cents(),
            in_stock: item.in_stock(),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        })
    }

    /// Rehydrate the entity, revalidating every field; a record that fails
    /// its own invariants is rejected rather than trusted.
    pub fn into_entity(self) -> Result<Item, InvalidValue> {
        let name = ItemName::new(&self.name)?;
        let description = ItemDescription::from_optional(self.description.as_deref())?;
        let price = Money::from_cents(self.price_cents)?;
        if self.updated_at < self.created_at {
            return Err(InvalidValue::new("updated_at", "cannot precede created_at"));
        }
        Ok(Item {
            id: Some(self.id),
            name,
            description,
            price,
            in_stock: self.in_stock,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
