//! List Carts Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::*};

use verdant_app::domain::carts::{data::CartFilter, models::CartStatus};

use crate::{
    carts::{errors::into_status_error, responses::CartListResponse},
    extensions::*,
    state::State,
};

/// List Carts Handler
///
/// Administrative listing for the dispatch dashboard: all filters optional
/// and conjunctive, fixed page size, newest first.
#[endpoint(
    tags("carts"),
    summary = "List Carts",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of carts"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed filter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    start_date: QueryParam<String, false>,
    end_date: QueryParam<String, false>,
    name: QueryParam<String, false>,
    phone_number: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CartListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = CartFilter {
        status: status
            .into_inner()
            .map(|raw| raw.parse::<CartStatus>())
            .transpose()
            .or_400("could not parse \"status\" query parameter")?,
        start_date: parse_date(start_date, "start_date")?,
        end_date: parse_date(end_date, "end_date")?,
        name: name.into_inner(),
        phone_number: phone_number.into_inner(),
    };

    let page = state
        .app
        .carts
        .list_carts(filter, page.into_inner().unwrap_or(1))
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}

fn parse_date(
    param: QueryParam<String, false>,
    name: &str,
) -> Result<Option<Date>, StatusError> {
    param
        .into_inner()
        .map(|raw| raw.parse::<Date>())
        .transpose()
        .or_400(&format!("could not parse \"{name}\" query parameter"))
}
