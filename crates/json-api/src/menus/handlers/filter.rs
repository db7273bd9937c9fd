//! Menu Filter Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carte::{
    events::{
        christmas::ChristmasMode, classifier::classify_cart,
        exclusivity::filter_categories_for_event_exclusivity,
    },
    ids::RestaurantId,
};
use carte_app::domain::events::load_catalog_or_empty;

use crate::{
    extensions::*,
    models::{CartLinePayload, MenuCategoryPayload, into_cart},
};

/// Menu Filter Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuFilterRequest {
    /// Restaurant the menu belongs to
    #[serde(default)]
    pub restaurant_id: Option<Uuid>,

    /// Service day, defaults to today
    #[serde(default)]
    pub date: Option<String>,

    /// Current cart lines
    #[serde(default)]
    pub lines: Vec<CartLinePayload>,

    /// Full menu
    pub categories: Vec<MenuCategoryPayload>,
}

/// Menu Filter Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuFilterResponse {
    /// Whether the menu is shown in Christmas mode
    pub is_christmas_mode: bool,

    /// Categories left orderable
    pub categories: Vec<MenuCategoryPayload>,
}

/// Menu Filter Handler
///
/// Returns the menu left orderable once event exclusivity and the Christmas restriction apply.
#[endpoint(
    tags("menus"),
    summary = "Filter Menu",
    responses(
        (status_code = StatusCode::OK, description = "Menu filtered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<MenuFilterRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuFilterResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();
    let settings = state.settings();

    let today = request.date.into_service_date(&settings.time_zone)?;
    let restaurant = request.restaurant_id.map(RestaurantId::from_uuid);
    let cart = into_cart(request.lines, settings.currency)?;

    let categories = request
        .categories
        .into_iter()
        .map(|category| category.into_menu_category(settings.currency))
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = load_catalog_or_empty(state.app.events.as_ref(), restaurant, today).await;
    let info = classify_cart(&cart, &catalog);
    let christmas = ChristmasMode::new(&catalog, today);

    let categories =
        christmas.filter_menu(filter_categories_for_event_exclusivity(categories, &info));

    Ok(Json(MenuFilterResponse {
        is_christmas_mode: christmas.is_christmas_mode(),
        categories: categories.iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use carte::{events::EventCatalog, ids::ProductId};
    use carte_app::domain::events::MockEventsService;

    use crate::{
        models::{
            MenuItemPayload,
            tests::{item_payload, line_payload},
        },
        test_helpers::{Mocks, make_event, make_link, service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("menus/filter").post(handler))
    }

    fn mocks_with(catalog: EventCatalog) -> Mocks {
        let mut events = MockEventsService::new();

        events
            .expect_load_catalog()
            .once()
            .return_once(move |_, _| Ok(catalog));

        Mocks {
            events,
            ..Mocks::strict()
        }
    }

    fn category(id: &str, items: Vec<MenuItemPayload>) -> MenuCategoryPayload {
        MenuCategoryPayload {
            id: id.to_string(),
            name: id.to_string(),
            items,
        }
    }

    fn ids(response: &MenuFilterResponse) -> Vec<&str> {
        response
            .categories
            .iter()
            .map(|category| category.id.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_christmas_day_restricts_menu() -> TestResult {
        let christmas_box = ProductId::new();
        let mut christmas = make_event("Noël", "noel-2026", date(2026, 12, 25));

        christmas.restrict_menu_on_event = true;
        christmas.allowed_categories = vec!["boissons".to_string()];

        let link = make_link(&christmas, christmas_box);
        let catalog = EventCatalog::new(vec![christmas], vec![link]);

        let body = json!({
            "date": "2026-12-25",
            "categories": [
                category("plateaux", vec![
                    item_payload(christmas_box.into_uuid(), "plateaux", 5900),
                    item_payload(Uuid::now_v7(), "plateaux", 3200),
                ]),
                category(
                    "sushi_classique",
                    vec![item_payload(Uuid::now_v7(), "sushi_classique", 1200)],
                ),
                category("boissons", vec![item_payload(Uuid::now_v7(), "boissons", 300)]),
            ],
        });

        let response: MenuFilterResponse = TestClient::post("http://example.com/menus/filter")
            .json(&body)
            .send(&make_service(mocks_with(catalog)))
            .await
            .take_json()
            .await?;

        let plateaux = response.categories.first().ok_or("missing plateaux")?;

        assert!(response.is_christmas_mode);
        assert_eq!(ids(&response), vec!["plateaux", "boissons"]);
        assert_eq!(plateaux.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_event_cart_hides_regular_products() -> TestResult {
        let bundle = ProductId::new();
        let valentine = make_event("Saint Valentin", "st-valentin", date(2026, 2, 14));
        let link = make_link(&valentine, bundle);
        let catalog = EventCatalog::new(vec![valentine], vec![link]);

        let body = json!({
            "date": "2026-02-10",
            "lines": [line_payload(bundle.into_uuid(), "plateaux", 4500, 1)],
            "categories": [
                category("plateaux", vec![
                    item_payload(bundle.into_uuid(), "plateaux", 4500),
                    item_payload(Uuid::now_v7(), "plateaux", 3200),
                ]),
                category(
                    "sushi_classique",
                    vec![item_payload(Uuid::now_v7(), "sushi_classique", 1200)],
                ),
                category("desserts", vec![item_payload(Uuid::now_v7(), "desserts", 550)]),
            ],
        });

        let response: MenuFilterResponse = TestClient::post("http://example.com/menus/filter")
            .json(&body)
            .send(&make_service(mocks_with(catalog)))
            .await
            .take_json()
            .await?;

        assert!(!response.is_christmas_mode);
        assert_eq!(ids(&response), vec!["plateaux", "desserts"]);

        Ok(())
    }
}
