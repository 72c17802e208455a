use axum::{
    extract::State,
    response::Json,
};
use serde::Deserialize;

use crate::error::{ApiError, RouteFailure};
use crate::models::Business;
use crate::normalize;
use crate::routes::{QueryParams, query_params, required};
use crate::state::AppState;
use crate::upstream::{BusinessArea, BusinessSearch};

/// Query parameters for business search
#[derive(Deserialize)]
pub struct BusinessQuery {
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    /// Free-text location, used when no coordinate is given
    #[serde(default)]
    pub search_query: Option<String>,
    /// 1-based page of five results
    #[serde(default)]
    pub page: Option<String>,
}

impl BusinessQuery {
    fn into_search(self) -> Result<BusinessSearch, ApiError> {
        let page = self
            .page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);

        let area = if self.latitude.is_some() || self.longitude.is_some() {
            BusinessArea::Near {
                latitude: required(self.latitude, "latitude")?,
                longitude: required(self.longitude, "longitude")?,
            }
        } else {
            BusinessArea::Named(required(self.search_query, "search_query")?)
        };

        Ok(BusinessSearch { area, page })
    }
}

/// GET /restaurants, GET /yelp - Businesses near a coordinate or a named place
pub async fn get_businesses(
    State(state): State<AppState>,
    query: QueryParams<BusinessQuery>,
) -> Result<Json<Vec<Business>>, RouteFailure> {
    let params = query_params(query)?;
    let search = params.into_search()?;
    let body = state.upstream.businesses(&search).await.map_err(ApiError::from)?;
    let businesses = normalize::businesses(&body).map_err(ApiError::from)?;

    Ok(Json(businesses))
}
