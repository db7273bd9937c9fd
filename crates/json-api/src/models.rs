//! Shared request and response bodies.
//!
//! Prices travel as integer minor units of the configured currency.

use rusty_money::{Money, iso::Currency};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::{
    cart::{Cart, CartLine},
    events::TimeSlot,
    ids::ProductId,
    menu::{MenuCategory, MenuItem},
};

use crate::extensions::*;

/// A menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemPayload {
    /// Product identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Category label the item is listed under
    pub category: String,

    /// Unit price in minor units
    pub price: i64,

    /// Price before a discount, in minor units
    #[serde(default)]
    pub original_price: Option<i64>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional image
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MenuItemPayload {
    pub(crate) fn into_menu_item(
        self,
        currency: &'static Currency,
    ) -> Result<MenuItem<'static>, StatusError> {
        let price = non_negative(self.price)?;
        let original_price = self.original_price.map(non_negative).transpose()?;

        let mut item = MenuItem::new(
            ProductId::from_uuid(self.id),
            self.name,
            self.category,
            Money::from_minor(price, currency),
        );

        item.original_price = original_price.map(|price| Money::from_minor(price, currency));
        item.description = self.description;
        item.image_url = self.image_url;

        Ok(item)
    }
}

impl From<&MenuItem<'_>> for MenuItemPayload {
    fn from(item: &MenuItem<'_>) -> Self {
        MenuItemPayload {
            id: item.id.into_uuid(),
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price.to_minor_units(),
            original_price: item.original_price.map(|price| price.to_minor_units()),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

/// A cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLinePayload {
    /// The item ordered
    pub item: MenuItemPayload,

    /// Units ordered
    pub quantity: u32,

    /// Free-text instructions attached to the line
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl CartLinePayload {
    fn into_cart_line(self, currency: &'static Currency) -> Result<CartLine<'static>, StatusError> {
        Ok(CartLine {
            item: self.item.into_menu_item(currency)?,
            quantity: self.quantity,
            special_instructions: self.special_instructions,
        })
    }
}

impl From<&CartLine<'_>> for CartLinePayload {
    fn from(line: &CartLine<'_>) -> Self {
        CartLinePayload {
            item: (&line.item).into(),
            quantity: line.quantity,
            special_instructions: line.special_instructions.clone(),
        }
    }
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuCategoryPayload {
    /// Category identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Items listed in the category
    pub items: Vec<MenuItemPayload>,
}

impl MenuCategoryPayload {
    pub(crate) fn into_menu_category(
        self,
        currency: &'static Currency,
    ) -> Result<MenuCategory<'static>, StatusError> {
        let items = self
            .items
            .into_iter()
            .map(|item| item.into_menu_item(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuCategory::new(self.id, self.name, items))
    }
}

impl From<&MenuCategory<'_>> for MenuCategoryPayload {
    fn from(category: &MenuCategory<'_>) -> Self {
        MenuCategoryPayload {
            id: category.id.clone(),
            name: category.name.clone(),
            items: category.items.iter().map(Into::into).collect(),
        }
    }
}

/// An event collection slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimeSlotResponse {
    /// Slot start
    pub time: String,

    /// Order cap, absent when uncapped
    pub max_orders: Option<u32>,
}

impl From<&TimeSlot> for TimeSlotResponse {
    fn from(slot: &TimeSlot) -> Self {
        TimeSlotResponse {
            time: slot.time.clone(),
            max_orders: slot.max_orders,
        }
    }
}

/// Build a cart priced in `currency` from request lines.
pub(crate) fn into_cart(
    lines: Vec<CartLinePayload>,
    currency: &'static Currency,
) -> Result<Cart<'static>, StatusError> {
    let lines = lines
        .into_iter()
        .map(|line| line.into_cart_line(currency))
        .collect::<Result<Vec<_>, _>>()?;

    Cart::with_lines(lines, currency).or_400("Invalid cart payload")
}

fn non_negative(price: i64) -> Result<i64, StatusError> {
    if price < 0 {
        return Err(StatusError::bad_request().brief("Prices must not be negative"));
    }

    Ok(price)
}
