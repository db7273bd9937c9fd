//! App Router

use salvo::Router;

use crate::{carts, events, menus, offers, promotions};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("events").get(events::index::handler))
        .push(Router::with_path("carts/events").post(carts::events::handler))
        .push(Router::with_path("menus/filter").post(menus::filter::handler))
        .push(
            Router::with_path("promotions")
                .push(Router::with_path("active").get(promotions::active::handler))
                .push(Router::with_path("quote").post(promotions::quote::handler)),
        )
        .push(Router::with_path("offers/free-dessert").post(offers::free_dessert::handler))
}
