//! Promotion Discounts

use rusty_money::{Money, MoneyError, iso::Currency};

use crate::{
    pricing::{PricingError, percent_of_minor},
    promotions::{DayBasedPromotion, PromotionDiscount},
};

/// A price once a promotion is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromotionPrice<'a> {
    /// Price charged
    pub discounted_price: Money<'a, Currency>,

    /// Amount taken off
    pub discount_amount: Money<'a, Currency>,
}

/// Apply `promotion` to `price`.
///
/// A percentage takes `price × discount / 100`, rounded half away from zero to minor units. A
/// fixed amount takes at most the whole price. The discount is never negative.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the percentage cannot be represented in minor units.
/// - [`PricingError::Money`]: the fixed amount is in another currency.
pub fn calculate_promotion_discount<'a>(
    price: Money<'a, Currency>,
    promotion: &DayBasedPromotion<'a>,
) -> Result<PromotionPrice<'a>, PricingError> {
    let price_minor = price.to_minor_units();

    let discount_minor = match promotion.discount {
        PromotionDiscount::Percentage(percent) => percent_of_minor(percent, price_minor)?,
        PromotionDiscount::FixedAmount(amount) => {
            if amount.currency() != price.currency() {
                return Err(PricingError::Money(MoneyError::CurrencyMismatch {
                    expected: price.currency().iso_alpha_code,
                    actual: amount.currency().iso_alpha_code,
                }));
            }

            amount.to_minor_units()
        }
    };

    let discount_minor = discount_minor.clamp(0, price_minor.max(0));
    let discount_amount = Money::from_minor(discount_minor, price.currency());

    Ok(PromotionPrice {
        discounted_price: price.sub(discount_amount)?,
        discount_amount,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::promotions::test_support::box_du_midi;

    use super::*;

    #[test]
    fn ten_percent_of_twenty_euros() -> TestResult {
        let mut promotion = box_du_midi();
        promotion.discount = PromotionDiscount::Percentage(Decimal::TEN);

        let quote = calculate_promotion_discount(Money::from_minor(2000, iso::EUR), &promotion)?;

        assert_eq!(quote.discounted_price, Money::from_minor(1800, iso::EUR));
        assert_eq!(quote.discount_amount, Money::from_minor(200, iso::EUR));

        Ok(())
    }

    #[test]
    fn fixed_discount_is_capped_at_price() -> TestResult {
        let mut promotion = box_du_midi();
        promotion.discount = PromotionDiscount::FixedAmount(Money::from_minor(1000, iso::EUR));

        let quote = calculate_promotion_discount(Money::from_minor(500, iso::EUR), &promotion)?;

        assert_eq!(quote.discount_amount, Money::from_minor(500, iso::EUR));
        assert_eq!(quote.discounted_price, Money::from_minor(0, iso::EUR));

        Ok(())
    }

    #[test]
    fn percentage_rounds_half_away_from_zero() -> TestResult {
        let mut promotion = box_du_midi();
        promotion.discount = PromotionDiscount::Percentage(Decimal::new(125, 1));

        let quote = calculate_promotion_discount(Money::from_minor(1020, iso::EUR), &promotion)?;

        assert_eq!(quote.discount_amount, Money::from_minor(128, iso::EUR));

        Ok(())
    }

    #[test]
    fn negative_discount_is_ignored() -> TestResult {
        let mut promotion = box_du_midi();
        promotion.discount = PromotionDiscount::Percentage(Decimal::from(-10));

        let quote = calculate_promotion_discount(Money::from_minor(2000, iso::EUR), &promotion)?;

        assert_eq!(quote.discount_amount, Money::from_minor(0, iso::EUR));

        Ok(())
    }

    #[test]
    fn fixed_discount_in_other_currency_fails() {
        let mut promotion = box_du_midi();
        promotion.discount = PromotionDiscount::FixedAmount(Money::from_minor(100, iso::GBP));

        let result = calculate_promotion_discount(Money::from_minor(500, iso::EUR), &promotion);

        assert!(matches!(result, Err(PricingError::Money(_))));
    }
}
