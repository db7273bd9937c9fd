//! Cart
//!
//! A read-only snapshot of the customer's cart, in line order.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    ids::ProductId,
    menu::MenuItem,
    pricing::{PricingError, line_total, zero},
};

/// Errors related to cart construction or totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A line's currency differs from the cart currency (index, line currency, cart currency).
    #[error("Line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    /// The product ordered
    pub item: MenuItem<'a>,

    /// Number of units
    pub quantity: u32,

    /// Free-text instructions attached to the line
    pub special_instructions: Option<String>,
}

impl<'a> CartLine<'a> {
    /// Creates a line without instructions.
    pub fn new(item: MenuItem<'a>, quantity: u32) -> Self {
        Self {
            item,
            quantity,
            special_instructions: None,
        }
    }

    /// Attach special instructions.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.special_instructions = Some(instructions.into());
        self
    }

    /// The product on this line.
    pub fn product_id(&self) -> ProductId {
        self.item.id
    }

    /// True if the instructions contain `marker`.
    pub fn has_marker(&self, marker: &str) -> bool {
        self.special_instructions
            .as_deref()
            .is_some_and(|instructions| instructions.contains(marker))
    }

    /// Price × quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the total overflows.
    pub fn total(&self) -> Result<Money<'a, Currency>, PricingError> {
        line_total(&self.item.price, self.quantity)
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    pub fn new(currency: &'a Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart with the given lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line is priced in another currency.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine<'a>>>,
        currency: &'a Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        lines
            .iter()
            .enumerate()
            .try_for_each(|(i, line)| check_currency(i, line, currency))?;

        Ok(Cart { lines, currency })
    }

    /// Append a line.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the line is priced in another currency.
    pub fn push(&mut self, line: CartLine<'a>) -> Result<(), CartError> {
        check_currency(self.lines.len(), &line, self.currency)?;
        self.lines.push(line);

        Ok(())
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if there was a money arithmetic or overflow error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        let total = self
            .lines
            .iter()
            .try_fold(zero(self.currency), |acc, line| {
                acc.add(line.total()?).map_err(PricingError::from)
            })?;

        Ok(total)
    }

    /// Lines in cart order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}

fn check_currency(index: usize, line: &CartLine<'_>, currency: &Currency) -> Result<(), CartError> {
    let line_currency = line.item.price.currency();

    if line_currency == currency {
        Ok(())
    } else {
        Err(CartError::CurrencyMismatch(
            index,
            line_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn line(price: i64, quantity: u32, currency: &'static Currency) -> CartLine<'static> {
        CartLine::new(
            MenuItem::new(
                ProductId::new(),
                "Plateau",
                "plateaux",
                Money::from_minor(price, currency),
            ),
            quantity,
        )
    }

    #[test]
    fn with_lines_currency_mismatch_errors() {
        let lines = [line(100, 1, iso::EUR), line(100, 1, iso::USD)];

        let result = Cart::with_lines(lines, iso::EUR);

        assert_eq!(
            result.err(),
            Some(CartError::CurrencyMismatch(
                1,
                iso::USD.iso_alpha_code,
                iso::EUR.iso_alpha_code
            ))
        );
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> TestResult {
        let cart = Cart::with_lines([line(1290, 2, iso::EUR), line(450, 3, iso::EUR)], iso::EUR)?;

        assert_eq!(cart.subtotal()?, Money::from_minor(3930, iso::EUR));

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new(iso::EUR);

        assert_eq!(cart.subtotal()?, Money::from_minor(0, iso::EUR));

        Ok(())
    }

    #[test]
    fn push_rejects_foreign_currency() {
        let mut cart = Cart::new(iso::EUR);

        assert!(cart.push(line(100, 1, iso::GBP)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn has_marker_checks_instructions() {
        let plain = line(100, 1, iso::EUR);
        let marked = line(0, 1, iso::EUR).with_instructions("Dessert offert - Saint Valentin");

        assert!(!plain.has_marker("Dessert offert"));
        assert!(marked.has_marker("Dessert offert"));
    }
}
