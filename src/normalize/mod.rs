//! Maps raw provider JSON onto the fixed record shapes this API returns.
//!
//! Each function reads one provider's response and nothing else. Field values are
//! copied as-is except for the movie poster URL, the weather date and the trail
//! condition timestamp.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Business, Location, Movie, Place, Trail, WeatherDay};

/// Prefix TMDB poster paths are served under.
pub const POSTER_URL_PREFIX: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("{kind} response had no results")]
    Empty { kind: &'static str },

    #[error("{kind} response had an unexpected shape: {source}")]
    Shape {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} field `{field}` is invalid: {value}")]
    InvalidField {
        kind: &'static str,
        field: &'static str,
        value: String,
    },
}

fn decode<T: DeserializeOwned>(kind: &'static str, value: &Value) -> Result<T, NormalizeError> {
    T::deserialize(value).map_err(|source| NormalizeError::Shape { kind, source })
}

/// Text form of a JSON string or number.
fn scalar_text(
    kind: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<String, NormalizeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(NormalizeError::InvalidField {
            kind,
            field,
            value: other.to_string(),
        }),
    }
}

/// Characters `start..end` of `text`, clamped to its length.
fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

// Location

#[derive(Deserialize)]
struct GeocodeHit {
    lat: Value,
    lon: Value,
    display_name: String,
}

/// Builds a `Location` from the first hit of a geocoder response.
pub fn location(search_query: &str, body: &Value) -> Result<Location, NormalizeError> {
    const KIND: &str = "geocode";

    let hits: Vec<Value> = decode(KIND, body)?;
    let first = hits.first().ok_or(NormalizeError::Empty { kind: KIND })?;
    let hit: GeocodeHit = decode(KIND, first)?;

    Ok(Location {
        search_query: search_query.to_string(),
        formatted_query: hit.display_name,
        latitude: scalar_text(KIND, "lat", &hit.lat)?,
        longitude: scalar_text(KIND, "lon", &hit.lon)?,
    })
}

// Business

#[derive(Deserialize)]
struct BusinessResponse {
    businesses: Vec<YelpBusiness>,
}

#[derive(Deserialize)]
struct YelpBusiness {
    name: String,
    image_url: Option<String>,
    price: Option<String>,
    rating: f64,
    url: String,
}

pub fn businesses(body: &Value) -> Result<Vec<Business>, NormalizeError> {
    let response: BusinessResponse = decode("business", body)?;
    Ok(response
        .businesses
        .into_iter()
        .map(|b| Business {
            name: b.name,
            image_url: b.image_url,
            price: b.price,
            rating: b.rating,
            url: b.url,
        })
        .collect())
}

// Movie

#[derive(Deserialize)]
struct MovieResponse {
    results: Vec<TmdbMovie>,
}

#[derive(Deserialize)]
struct TmdbMovie {
    title: String,
    overview: String,
    vote_average: f64,
    vote_count: u64,
    poster_path: Option<String>,
    popularity: f64,
    release_date: Option<String>,
}

pub fn movies(body: &Value) -> Result<Vec<Movie>, NormalizeError> {
    let response: MovieResponse = decode("movie", body)?;
    Ok(response
        .results
        .into_iter()
        .map(|m| Movie {
            title: m.title,
            overview: m.overview,
            average_votes: m.vote_average,
            total_votes: m.vote_count,
            image_url: m
                .poster_path
                .map(|path| format!("{}{}", POSTER_URL_PREFIX, path)),
            popularity: m.popularity,
            released_on: m.release_date,
        })
        .collect())
}

// Place

#[derive(Deserialize)]
struct PlaceResponse {
    features: Vec<MapboxFeature>,
}

#[derive(Deserialize)]
struct MapboxFeature {
    text: String,
    place_name: String,
    #[serde(default)]
    properties: MapboxProperties,
}

#[derive(Deserialize, Default)]
struct MapboxProperties {
    category: Option<String>,
}

pub fn places(body: &Value) -> Result<Vec<Place>, NormalizeError> {
    let response: PlaceResponse = decode("place", body)?;
    Ok(response
        .features
        .into_iter()
        .map(|f| Place {
            name: f.text,
            kind: f.properties.category,
            address: f.place_name,
        })
        .collect())
}

// Weather

#[derive(Deserialize)]
struct ForecastResponse {
    data: Vec<ForecastDay>,
}

#[derive(Deserialize)]
struct ForecastDay {
    weather: ForecastWeather,
    valid_date: String,
}

#[derive(Deserialize)]
struct ForecastWeather {
    description: String,
}

/// Renders `YYYY-MM-DD` the way a browser's `Date.toDateString()` does.
fn date_string(valid_date: &str) -> Result<String, NormalizeError> {
    chrono::NaiveDate::parse_from_str(valid_date, "%Y-%m-%d")
        .map(|date| date.format("%a %b %d %Y").to_string())
        .map_err(|_| NormalizeError::InvalidField {
            kind: "weather",
            field: "valid_date",
            value: valid_date.to_string(),
        })
}

pub fn weather_days(body: &Value) -> Result<Vec<WeatherDay>, NormalizeError> {
    let response: ForecastResponse = decode("weather", body)?;
    response
        .data
        .into_iter()
        .map(|day| {
            Ok(WeatherDay {
                forecast: day.weather.description,
                time: date_string(&day.valid_date)?,
            })
        })
        .collect()
}

// Trail

#[derive(Deserialize)]
struct TrailResponse {
    trails: Vec<HikingTrail>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HikingTrail {
    name: String,
    location: String,
    length: f64,
    stars: f64,
    star_votes: u64,
    summary: String,
    url: String,
    condition_details: Option<String>,
    condition_date: String,
}

pub fn trails(body: &Value) -> Result<Vec<Trail>, NormalizeError> {
    let response: TrailResponse = decode("trail", body)?;
    Ok(response
        .trails
        .into_iter()
        .map(|t| Trail {
            // Positional split of the timestamp; 0..9 drops the last day digit.
            condition_date: char_slice(&t.condition_date, 0, 9),
            condition_time: char_slice(&t.condition_date, 11, 19),
            name: t.name,
            location: t.location,
            length: t.length,
            stars: t.stars,
            star_votes: t.star_votes,
            summary: t.summary,
            trail_url: t.url,
            conditions: t.condition_details,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_uses_first_hit() {
        let body = json!([
            {"lat": "47.6038321", "lon": "-122.3300624", "display_name": "Seattle, King County, Washington, USA"},
            {"lat": "0", "lon": "0", "display_name": "Elsewhere"}
        ]);
        let loc = location("seattle", &body).unwrap();
        assert_eq!(loc.search_query, "seattle");
        assert_eq!(loc.formatted_query, "Seattle, King County, Washington, USA");
        assert_eq!(loc.latitude, "47.6038321");
        assert_eq!(loc.longitude, "-122.3300624");
    }

    #[test]
    fn test_location_accepts_numeric_coordinates() {
        let body = json!([{"lat": 47.5, "lon": -122.25, "display_name": "Seattle"}]);
        let loc = location("Seattle", &body).unwrap();
        assert_eq!(loc.latitude, "47.5");
        assert_eq!(loc.longitude, "-122.25");
    }

    #[test]
    fn test_location_empty_results() {
        let err = location("Nowhere", &json!([])).unwrap_err();
        assert!(matches!(err, NormalizeError::Empty { kind: "geocode" }));
    }

    #[test]
    fn test_location_rejects_object_body() {
        let err = location("Seattle", &json!({"error": "Invalid key"})).unwrap_err();
        assert!(matches!(err, NormalizeError::Shape { .. }));
    }

    #[test]
    fn test_location_rejects_non_scalar_latitude() {
        let body = json!([{"lat": {"deg": 47}, "lon": "1", "display_name": "x"}]);
        let err = location("x", &body).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InvalidField { field: "lat", .. }
        ));
    }

    #[test]
    fn test_businesses_preserve_order_and_fields() {
        let body = json!({
            "businesses": [
                {"name": "Pike Place Chowder", "image_url": "https://img/1.jpg", "price": "$$", "rating": 4.5, "url": "https://yelp/1", "id": "ignored"},
                {"name": "Un Bien", "image_url": "https://img/2.jpg", "rating": 5.0, "url": "https://yelp/2"}
            ],
            "total": 2
        });
        let list = businesses(&body).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Pike Place Chowder");
        assert_eq!(list[0].price.as_deref(), Some("$$"));
        assert_eq!(list[0].rating, 4.5);
        assert_eq!(list[1].name, "Un Bien");
        assert_eq!(list[1].price, None);
    }

    #[test]
    fn test_businesses_missing_field_fails() {
        let body = json!({"businesses": [{"name": "No Url", "rating": 3.0}]});
        assert!(matches!(
            businesses(&body).unwrap_err(),
            NormalizeError::Shape { kind: "business", .. }
        ));
    }

    #[test]
    fn test_movies_prefix_poster_path() {
        let body = json!({
            "results": [{
                "title": "Sleepless in Seattle",
                "overview": "A widower...",
                "vote_average": 6.8,
                "vote_count": 1520,
                "poster_path": "/iLWsLVrfkFvOXOG9PbUAYg7AK3E.jpg",
                "popularity": 15.3,
                "release_date": "1993-06-24"
            }, {
                "title": "No Poster",
                "overview": "",
                "vote_average": 0.0,
                "vote_count": 0,
                "poster_path": null,
                "popularity": 0.6
            }]
        });
        let list = movies(&body).unwrap();
        assert_eq!(
            list[0].image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/iLWsLVrfkFvOXOG9PbUAYg7AK3E.jpg")
        );
        assert_eq!(list[0].average_votes, 6.8);
        assert_eq!(list[0].total_votes, 1520);
        assert_eq!(list[0].released_on.as_deref(), Some("1993-06-24"));
        assert_eq!(list[1].image_url, None);
        assert_eq!(list[1].released_on, None);
    }

    #[test]
    fn test_places_map_text_category_and_address() {
        let body = json!({
            "features": [
                {"text": "Space Needle", "place_name": "Space Needle, 400 Broad St, Seattle", "properties": {"category": "landmark, tourism"}},
                {"text": "Corner Shop", "place_name": "Corner Shop, Seattle"}
            ]
        });
        let list = places(&body).unwrap();
        assert_eq!(list[0].name, "Space Needle");
        assert_eq!(list[0].kind.as_deref(), Some("landmark, tourism"));
        assert_eq!(list[0].address, "Space Needle, 400 Broad St, Seattle");
        assert_eq!(list[1].kind, None);

        let json = serde_json::to_value(&list[0]).unwrap();
        assert_eq!(json["type"], "landmark, tourism");
    }

    #[test]
    fn test_weather_days_keep_order_and_format_dates() {
        let body = json!({
            "city_name": "Seattle",
            "data": [
                {"valid_date": "2021-05-01", "weather": {"description": "Light rain", "code": 500}},
                {"valid_date": "2021-05-02", "weather": {"description": "Overcast clouds"}},
                {"valid_date": "2021-05-03", "weather": {"description": "Clear sky"}}
            ]
        });
        let days = weather_days(&body).unwrap();
        assert_eq!(
            days,
            vec![
                WeatherDay { forecast: "Light rain".into(), time: "Sat May 01 2021".into() },
                WeatherDay { forecast: "Overcast clouds".into(), time: "Sun May 02 2021".into() },
                WeatherDay { forecast: "Clear sky".into(), time: "Mon May 03 2021".into() },
            ]
        );
    }

    #[test]
    fn test_weather_bad_date() {
        let body = json!({"data": [{"valid_date": "May 1st", "weather": {"description": "Rain"}}]});
        assert!(matches!(
            weather_days(&body).unwrap_err(),
            NormalizeError::InvalidField { field: "valid_date", .. }
        ));
    }

    fn trail_json(name: &str, condition_date: &str) -> Value {
        json!({
            "name": name,
            "location": "North Bend, Washington",
            "length": 8.2,
            "stars": 4.6,
            "starVotes": 112,
            "summary": "A steep climb.",
            "url": "https://www.hikingproject.com/trail/1",
            "conditionDetails": "Mostly Dry",
            "conditionDate": condition_date
        })
    }

    #[test]
    fn test_trail_condition_split_is_positional() {
        let body = json!({"trails": [trail_json("Mailbox Peak", "2021-05-01T12:30:45Z")]});
        let list = trails(&body).unwrap();
        let trail = &list[0];
        assert_eq!(trail.condition_date, "2021-05-0");
        assert_eq!(trail.condition_time, "12:30:45");
        assert_eq!(trail.star_votes, 112);
        assert_eq!(trail.trail_url, "https://www.hikingproject.com/trail/1");
        assert_eq!(trail.conditions.as_deref(), Some("Mostly Dry"));
    }

    #[test]
    fn test_trail_condition_split_space_separated() {
        let body = json!({"trails": [trail_json("Rattlesnake Ledge", "2019-10-18 08:02:11")]});
        let trail = &trails(&body).unwrap()[0];
        assert_eq!(trail.condition_date, "2019-10-1");
        assert_eq!(trail.condition_time, "08:02:11");
    }

    #[test]
    fn test_trail_condition_split_short_string() {
        let body = json!({"trails": [trail_json("Unknown", "1970")]});
        let trail = &trails(&body).unwrap()[0];
        assert_eq!(trail.condition_date, "1970");
        assert_eq!(trail.condition_time, "");
    }

    #[test]
    fn test_trails_preserve_order() {
        let body = json!({"trails": [
            trail_json("First", "2021-05-01T00:00:00Z"),
            trail_json("Second", "2021-05-02T00:00:00Z"),
            trail_json("Third", "2021-05-03T00:00:00Z")
        ]});
        let names: Vec<String> = trails(&body).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }
}
