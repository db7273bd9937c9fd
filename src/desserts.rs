//! Free desserts
//!
//! Events with free desserts give one dessert unit away per event product unit in the cart.
//! Desserts already accepted through the offer use up the budget first; what is left goes to
//! dessert lines in cart order, and a line can be partly free.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartError, CartLine},
    events::classifier::CartEventInfo,
    menu::CategoryKind,
    pricing::{PricingError, line_total, zero},
};

/// Label attached to lines priced as free desserts.
pub const FREE_DESSERT_LABEL: &str = "Dessert offert";

/// How one dessert line splits into free and paid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeDessertAllocation {
    /// Index of the line in the cart
    pub line: usize,

    /// Units given away
    pub free_quantity: u32,

    /// Units still charged
    pub paid_quantity: u32,
}

/// Free-dessert status of a single cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeDessertInfo<'a> {
    /// At least one unit of the line is free
    pub is_free_dessert: bool,

    /// Unit price before the offer
    pub original_price: Money<'a, Currency>,

    /// Event giving the dessert away
    pub event_name: Option<String>,

    /// Units given away
    pub free_quantity: u32,
}

/// Total event product units in the cart: the free-dessert budget.
pub fn event_units(cart: &Cart<'_>, info: &CartEventInfo) -> u64 {
    let event_products = info.event_product_set();

    cart.lines()
        .iter()
        .filter(|line| event_products.contains(&line.product_id()))
        .map(|line| u64::from(line.quantity))
        .sum()
}

/// Units of desserts accepted through the offer, found by the marker in their instructions.
pub fn offered_units(cart: &Cart<'_>, info: &CartEventInfo) -> u64 {
    cart.lines()
        .iter()
        .filter(|line| is_offered_line(line, info))
        .map(|line| u64::from(line.quantity))
        .sum()
}

/// Split every dessert line into free and paid units, in cart order.
///
/// Lines carrying the offer marker are already free and are left out. Returns nothing when the
/// event has no free desserts or the cart has no event product.
pub fn allocate_free_desserts(cart: &Cart<'_>, info: &CartEventInfo) -> Vec<FreeDessertAllocation> {
    if !info.free_desserts_apply() {
        return Vec::new();
    }

    let mut remaining = budget(cart, info);
    let mut allocations = Vec::new();

    for (index, line) in cart.lines().iter().enumerate() {
        if remaining == 0 {
            break;
        }

        if !is_allocatable(line, info) {
            continue;
        }

        let free_quantity = take(&mut remaining, line.quantity);

        allocations.push(FreeDessertAllocation {
            line: index,
            free_quantity,
            paid_quantity: line.quantity - free_quantity,
        });
    }

    allocations
}

/// Total value of the free dessert units.
///
/// # Errors
///
/// Returns a [`PricingError`] if the amount overflows.
pub fn calculate_dessert_discount<'a>(
    cart: &Cart<'a>,
    info: &CartEventInfo,
) -> Result<Money<'a, Currency>, PricingError> {
    allocate_free_desserts(cart, info)
        .iter()
        .filter_map(|allocation| {
            cart.lines()
                .get(allocation.line)
                .map(|line| line_total(&line.item.price, allocation.free_quantity))
        })
        .try_fold(zero(cart.currency()), |acc, amount| Ok(acc.add(amount?)?))
}

/// Free-dessert status of the line at `index`, or `None` if there is no such line.
///
/// A line accepted through the offer is free as a whole. Otherwise the slots left for the line
/// are what the budget has after every earlier dessert line took its share.
pub fn free_dessert_info<'a>(
    cart: &Cart<'a>,
    info: &CartEventInfo,
    index: usize,
) -> Option<FreeDessertInfo<'a>> {
    let line = cart.lines().get(index)?;

    let not_free = FreeDessertInfo {
        is_free_dessert: false,
        original_price: line.item.price,
        event_name: None,
        free_quantity: 0,
    };

    if is_offered_line(line, info) && line.quantity > 0 {
        return Some(FreeDessertInfo {
            is_free_dessert: true,
            original_price: line.item.original_price.unwrap_or(line.item.price),
            event_name: info.event_name.clone(),
            free_quantity: line.quantity,
        });
    }

    if !info.free_desserts_apply() || !is_allocatable(line, info) {
        return Some(not_free);
    }

    let mut remaining = budget(cart, info);

    for earlier in cart.lines().iter().take(index).filter(|l| is_allocatable(l, info)) {
        take(&mut remaining, earlier.quantity);
    }

    let free_quantity = take(&mut remaining, line.quantity);

    if free_quantity == 0 {
        return Some(not_free);
    }

    Some(FreeDessertInfo {
        is_free_dessert: true,
        original_price: line.item.price,
        event_name: info.event_name.clone(),
        free_quantity,
    })
}

/// The cart with free units split off into zero-priced lines.
///
/// A free line keeps the original price for display and is labelled with
/// [`FREE_DESSERT_LABEL`]; the paid remainder of a partly free line follows it.
///
/// # Errors
///
/// Returns a [`CartError`] if the rebuilt cart is inconsistent.
pub fn apply_free_dessert_prices<'a>(
    cart: &Cart<'a>,
    info: &CartEventInfo,
) -> Result<Cart<'a>, CartError> {
    let allocations = allocate_free_desserts(cart, info);

    if allocations.is_empty() {
        return Ok(cart.clone());
    }

    let mut lines = Vec::with_capacity(cart.len() + allocations.len());

    for (index, line) in cart.lines().iter().enumerate() {
        let Some(allocation) = allocations.iter().find(|a| a.line == index) else {
            lines.push(line.clone());
            continue;
        };

        lines.push(free_line(line, allocation.free_quantity, info));

        if allocation.paid_quantity > 0 {
            lines.push(CartLine {
                quantity: allocation.paid_quantity,
                ..line.clone()
            });
        }
    }

    Cart::with_lines(lines, cart.currency())
}

/// Cart total once free desserts are deducted.
///
/// # Errors
///
/// Returns a [`CartError`] on overflow.
pub fn total_with_free_desserts<'a>(
    cart: &Cart<'a>,
    info: &CartEventInfo,
) -> Result<Money<'a, Currency>, CartError> {
    let subtotal = cart.subtotal()?;
    let discount = calculate_dessert_discount(cart, info)?;

    Ok(subtotal.sub(discount).map_err(PricingError::from)?)
}

fn budget(cart: &Cart<'_>, info: &CartEventInfo) -> u64 {
    event_units(cart, info).saturating_sub(offered_units(cart, info))
}

fn is_offered_line(line: &CartLine<'_>, info: &CartEventInfo) -> bool {
    !info.free_dessert_marker.is_empty() && line.has_marker(&info.free_dessert_marker)
}

fn is_allocatable(line: &CartLine<'_>, info: &CartEventInfo) -> bool {
    line.item.kind == CategoryKind::Dessert && line.quantity > 0 && !is_offered_line(line, info)
}

fn take(remaining: &mut u64, quantity: u32) -> u32 {
    let taken = u32::try_from((*remaining).min(u64::from(quantity))).unwrap_or(quantity);

    *remaining -= u64::from(taken);

    taken
}

fn free_line<'a>(line: &CartLine<'a>, quantity: u32, info: &CartEventInfo) -> CartLine<'a> {
    let label = match &info.event_name {
        Some(event) => format!("{FREE_DESSERT_LABEL} ({event})"),
        None => FREE_DESSERT_LABEL.to_string(),
    };

    let special_instructions = Some(match &line.special_instructions {
        Some(existing) => format!("{existing} - {label}"),
        None => label,
    });

    let mut item = line.item.clone();
    item.original_price = Some(item.price);
    item.price = zero(item.price.currency());

    CartLine {
        item,
        quantity,
        special_instructions,
    }
}
