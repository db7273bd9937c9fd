//! Integration tests for event, dessert and promotion eligibility

use jiff::{
    Timestamp,
    civil::{Date, Time, Weekday, date},
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::EUR};
use smallvec::smallvec;
use testresult::TestResult;

use carte::prelude::*;

fn special_event(name: &str, slug: &str, event_date: Date) -> SpecialEvent {
    SpecialEvent {
        id: EventId::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        event_date,
        preorder_start: date(2025, 12, 1),
        preorder_end: date(2025, 12, 23),
        restrict_menu_on_event: false,
        allowed_categories: Vec::new(),
        is_active: true,
        restaurant_id: None,
        delivery_enabled: true,
        pickup_enabled: true,
        time_slots: Vec::new(),
        free_desserts_enabled: true,
        image_url: None,
        banner_title: None,
        banner_description: None,
    }
}

fn link(event: &SpecialEvent, product: ProductId) -> EventProduct {
    EventProduct {
        id: EventProductId::new(),
        event_id: event.id,
        product_id: product,
    }
}

fn item(id: ProductId, category: &str, price: i64) -> MenuItem<'static> {
    MenuItem::new(id, "Produit", category, Money::from_minor(price, EUR))
}

#[test]
fn event_and_preorder_days() {
    let noel = special_event("Noël", "noel", date(2025, 12, 24));

    assert!(noel.is_event_day(date(2025, 12, 24)));
    assert!(!noel.is_event_day(date(2025, 12, 23)));
    assert!(noel.is_preorder_period(date(2025, 12, 1)));
    assert!(noel.is_preorder_period(date(2025, 12, 23)));
    assert!(!noel.is_preorder_period(date(2025, 12, 24)));
    assert!(!noel.is_preorder_period(date(2025, 11, 30)));
}

#[test]
fn one_free_dessert_per_event_unit() -> TestResult {
    let restaurant = RestaurantId::new();
    let dessert = ProductId::new();
    let bundle = ProductId::new();
    let noel = special_event("Noël", "noel", date(2025, 12, 24));
    let catalog = EventCatalog::new(vec![noel.clone()], vec![link(&noel, bundle)]);

    let mut offer = FreeDessertOffer::new(OfferSettings::new(FreeDessertTable::new([(
        restaurant, dessert,
    )])));
    let mut cart = Cart::new(EUR);
    let mut accepted = 0;

    for _ in 0..3 {
        cart.push(CartLine::new(item(bundle, "plateaux", 4500), 1))?;

        let TriggerOutcome::Load(product) = offer.trigger(bundle, restaurant, &cart, &catalog)?
        else {
            return Err("offer suppressed too early".into());
        };

        offer.dessert_loaded(CatalogProduct {
            id: product,
            name: "Mochi".to_string(),
            description: None,
            price: Money::from_minor(550, EUR),
            image_url: None,
        })?;

        let free = offer.accept().ok_or("nothing to accept")?;
        cart.push(offer.free_dessert_line(free, Some(&noel.name)))?;
        accepted += 1;
    }

    assert_eq!(accepted, 3);
    assert!(matches!(
        offer.trigger(bundle, restaurant, &cart, &catalog)?,
        TriggerOutcome::Suppressed(Suppression::QuotaExhausted { .. })
    ));

    cart.push(CartLine::new(item(ProductId::new(), "desserts", 600), 1))?;

    let info = classify_cart(&cart, &catalog);

    assert_eq!(calculate_dessert_discount(&cart, &info)?, Money::from_minor(0, EUR));
    assert_eq!(total_with_free_desserts(&cart, &info)?, cart.subtotal()?);

    Ok(())
}

#[test]
fn dessert_discount_and_priced_cart_agree() -> TestResult {
    let bundle = ProductId::new();
    let noel = special_event("Noël", "noel", date(2025, 12, 24));
    let catalog = EventCatalog::new(vec![noel.clone()], vec![link(&noel, bundle)]);

    let cart = Cart::with_lines(
        [
            CartLine::new(item(bundle, "plateaux", 4500), 2),
            CartLine::new(item(ProductId::new(), "desserts", 600), 3),
            CartLine::new(item(ProductId::new(), "boissons", 300), 2),
        ],
        EUR,
    )?;

    let info = classify_cart(&cart, &catalog);
    let discount = calculate_dessert_discount(&cart, &info)?;

    assert_eq!(discount, Money::from_minor(1200, EUR));
    assert_eq!(calculate_dessert_discount(&cart, &info)?, discount);
    assert_eq!(
        apply_free_dessert_prices(&cart, &info)?.subtotal()?,
        total_with_free_desserts(&cart, &info)?
    );

    Ok(())
}

#[test]
fn both_flags_filter_like_an_event_cart() {
    let bundle = ProductId::new();
    let info = CartEventInfo {
        has_event_products: true,
        has_non_event_products: true,
        event_product_ids: vec![bundle],
        ..CartEventInfo::default()
    };

    let menu = vec![
        MenuCategory::new(
            "plateaux",
            "Plateaux",
            vec![item(bundle, "plateaux", 4500)],
        ),
        MenuCategory::new(
            "sushi_classique",
            "Sushi",
            vec![item(ProductId::new(), "sushi_classique", 900)],
        ),
    ];

    let filtered = filter_categories_for_event_exclusivity(menu, &info);

    assert_eq!(filtered.len(), 1);
}

#[test]
fn box_du_midi_promotion() -> TestResult {
    let promotion = DayBasedPromotion {
        id: PromotionId::new(),
        title: "Box du Midi".to_string(),
        description: "-10% le mardi midi".to_string(),
        discount: PromotionDiscount::Percentage(Decimal::TEN),
        applicable_days: smallvec![Weekday::Tuesday],
        applicable_categories: vec!["box_du_midi".to_string()],
        applicable_products: Vec::new(),
        applicable_restaurants: Vec::new(),
        window: Some(TimeWindow::new(Time::new(11, 0, 0, 0)?, Time::new(14, 0, 0, 0)?)),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    };
    let promotions = [promotion];

    let tuesday_lunch = date(2025, 1, 7).at(12, 30, 0, 0);

    let found = promotion_for_category("box_du_midi", &promotions, tuesday_lunch, None)
        .ok_or("promotion not found")?;
    let quote = calculate_promotion_discount(Money::from_minor(2000, EUR), found)?;

    assert_eq!(quote.discounted_price, Money::from_minor(1800, EUR));
    assert_eq!(quote.discount_amount, Money::from_minor(200, EUR));
    assert!(
        active_promotions(&promotions, date(2025, 1, 7).at(15, 0, 0, 0), None).is_empty()
    );
    assert!(
        active_promotions(&promotions, date(2025, 1, 8).at(12, 30, 0, 0), None).is_empty()
    );

    Ok(())
}

#[test]
fn christmas_day_restricts_menu() {
    let plateau = ProductId::new();
    let mut noel = special_event("Menu de Noël", "noel-2025", date(2025, 12, 24));
    noel.restrict_menu_on_event = true;
    noel.allowed_categories = vec!["desserts".to_string()];
    let catalog = EventCatalog::new(vec![noel.clone()], vec![link(&noel, plateau)]);

    let menu = vec![
        MenuCategory::new("plateaux", "Plateaux", vec![item(plateau, "plateaux", 6000)]),
        MenuCategory::new(
            "sushi_classique",
            "Sushi classique",
            vec![item(ProductId::new(), "sushi_classique", 900)],
        ),
        MenuCategory::new(
            "desserts",
            "Desserts",
            vec![item(ProductId::new(), "desserts", 600)],
        ),
    ];

    let mode = ChristmasMode::new(&catalog, date(2025, 12, 24));
    let filtered = mode.filter_menu(menu);
    let ids: Vec<&str> = filtered.iter().map(|category| category.id.as_str()).collect();

    assert!(mode.is_christmas_mode());
    assert_eq!(ids, vec!["plateaux", "desserts"]);
}
