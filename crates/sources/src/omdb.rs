//! OMDb-backed remote movie source.
//!
//! OMDb has no genre-browse endpoint, so genre lookups run keyword
//! searches: each genre maps to a few search terms and the lookup walks
//! them until it has enough distinct hits. Each hit can then be enriched
//! through the by-ID endpoint (genre, director, plot, poster, rating);
//! enrichment failure degrades to the bare search record and never fails
//! the lookup.
//!
//! ## Request shapes
//! - Search: `?apikey=..&s=<keyword>&type=movie&page=1`
//! - Detail: `?apikey=..&i=<imdb_id>&plot=short`

use crate::traits::MovieSource;
use crate::types::{GenreQuery, Result, SourceError};
use async_trait::async_trait;
use movie_data::{Genre, MovieRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Public OMDb endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default bound on one outbound request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default cap on records returned per lookup
const DEFAULT_RESULTS_PER_LOOKUP: usize = 5;

/// Keywords searched for the trending sentinel. OMDb has no trending
/// endpoint, so broad-appeal genres stand in for it.
const TRENDING_KEYWORDS: &[&str] = &["action", "adventure", "comedy", "drama"];

/// Search keywords per genre. OMDb matches search terms against titles,
/// so each genre lists words that show up in titles of that kind.
fn search_keywords(genre: Genre) -> &'static [&'static str] {
    match genre {
        Genre::Action => &["action", "adventure", "hero"],
        Genre::Adventure => &["adventure", "quest", "journey"],
        Genre::Animation => &["animated", "cartoon", "family"],
        Genre::Biography => &["biography", "true", "story"],
        Genre::Comedy => &["funny", "laugh", "humor"],
        Genre::Drama => &["drama", "emotional", "story"],
        Genre::Family => &["family", "kids", "children"],
        Genre::Fantasy => &["fantasy", "magic", "adventure"],
        Genre::Horror => &["horror", "scary", "fear"],
        Genre::Musical => &["musical", "music", "song"],
        Genre::Mystery => &["mystery", "detective", "crime"],
        Genre::Romance => &["love", "romantic", "romance"],
        Genre::SciFi => &["science", "fiction", "future"],
        Genre::Thriller => &["thriller", "suspense", "mystery"],
    }
}

// OMDb API types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MovieDetail {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
}

/// Remote movie source backed by the OMDb API
pub struct OmdbSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    results_per_lookup: usize,
    enrich_details: bool,
}

impl OmdbSource {
    /// Create a source talking to the public OMDb endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            results_per_lookup: DEFAULT_RESULTS_PER_LOOKUP,
            enrich_details: true,
        }
    }

    /// Point the source at a different endpoint (testing, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Configure the per-request timeout (default: 5s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure how many records one lookup returns at most (default: 5)
    pub fn with_results_per_lookup(mut self, limit: usize) -> Self {
        self.results_per_lookup = limit.max(1);
        self
    }

    /// Enable or disable the per-hit detail lookup (default: enabled)
    pub fn with_detail_enrichment(mut self, enabled: bool) -> Self {
        self.enrich_details = enabled;
        self
    }

    /// Run one keyword search. A "Movie not found!" body is a normal miss
    /// for the keyword and comes back as an empty hit list.
    async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>> {
        debug!("Searching OMDb for keyword {:?}", keyword);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("s", keyword),
                ("type", "movie"),
                ("page", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        let decoded: SearchResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| SourceError::Unavailable {
                reason: format!("Undecodable search response: {}", e),
            })?;

        if decoded.response != "True" {
            debug!(
                "No OMDb results for {:?}: {}",
                keyword,
                decoded.error.as_deref().unwrap_or("no error detail")
            );
            return Ok(Vec::new());
        }

        Ok(decoded.search)
    }

    /// Fetch the detail record for one IMDb ID
    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("i", imdb_id),
                ("plot", "short"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response)?
            .json()
            .await
            .map_err(|e| SourceError::Unavailable {
                reason: format!("Undecodable detail response: {}", e),
            })
    }

    /// Build the bare record for a search hit
    fn record_from_hit(&self, hit: &SearchHit, query: GenreQuery) -> MovieRecord {
        let link = format!("https://www.imdb.com/title/{}/", hit.imdb_id);
        let mut record = MovieRecord::new(hit.title.clone(), parse_year(&hit.year), link);
        record.poster = hit.poster.clone().and_then(clean_field);
        if let GenreQuery::Genre(genre) = query {
            record = record.with_genre(genre);
        }
        record
    }
}

#[async_trait]
impl MovieSource for OmdbSource {
    fn name(&self) -> &str {
        "omdb"
    }

    #[instrument(skip(self))]
    async fn lookup(&self, query: GenreQuery) -> Result<Vec<MovieRecord>> {
        let keywords = match query {
            GenreQuery::Genre(genre) => search_keywords(genre),
            GenreQuery::Trending => TRENDING_KEYWORDS,
        };

        let mut records: Vec<MovieRecord> = Vec::new();
        let mut seen_ids = HashSet::new();

        for &keyword in keywords {
            if records.len() >= self.results_per_lookup {
                break;
            }
            for hit in self.search(keyword).await? {
                if records.len() >= self.results_per_lookup {
                    break;
                }
                // The same film often matches several keywords
                if !seen_ids.insert(hit.imdb_id.clone()) {
                    continue;
                }

                let mut record = self.record_from_hit(&hit, query);
                if self.enrich_details {
                    match self.fetch_detail(&hit.imdb_id).await {
                        Ok(detail) => apply_detail(&mut record, detail),
                        Err(e) => warn!("Detail lookup failed for {}: {}", hit.imdb_id, e),
                    }
                }
                records.push(record);
            }
        }

        if records.is_empty() {
            return Err(SourceError::NotFound {
                query: query.to_string(),
            });
        }

        debug!("OMDb returned {} records for {}", records.len(), query);
        Ok(records)
    }
}

/// Map transport-level failures onto the source error taxonomy
fn map_transport_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Unavailable {
            reason: e.to_string(),
        }
    }
}

/// Reject non-success statuses, distinguishing the rate-limit signal
fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited);
    }
    if !status.is_success() {
        return Err(SourceError::Unavailable {
            reason: format!("HTTP {}", status),
        });
    }
    Ok(response)
}

/// Copy detail fields onto a record, dropping OMDb's "N/A" placeholders
fn apply_detail(record: &mut MovieRecord, detail: MovieDetail) {
    if detail.response != "True" {
        return;
    }
    record.director = detail.director.and_then(clean_field);
    record.plot = detail.plot.and_then(clean_field);
    record.imdb_rating = detail.imdb_rating.and_then(clean_field);
    if record.poster.is_none() {
        record.poster = detail.poster.and_then(clean_field);
    }
    // Trending hits carry no genre tag of their own; borrow the first
    // recognizable one from the detail record
    if record.genre.is_none() {
        record.genre = detail
            .genre
            .as_deref()
            .and_then(|list| list.split(',').find_map(Genre::from_name));
    }
}

/// OMDb year strings include ranges like "2012-2014"; take the leading year
fn parse_year(raw: &str) -> Option<u16> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// Empty and "N/A" field values collapse to None
fn clean_field(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "N/A" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;

    /// Stub OMDb server: dispatches on the query string the way the real
    /// API does, serving canned bodies on an ephemeral port
    async fn start_stub_omdb(
        handler: fn(&HashMap<String, String>) -> (StatusCode, &'static str),
    ) -> String {
        let app = Router::new().route(
            "/",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                handler(&params)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn source_for(endpoint: String) -> OmdbSource {
        OmdbSource::new("test-key")
            .with_base_url(endpoint)
            .with_detail_enrichment(false)
            .with_results_per_lookup(3)
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1995"), Some(1995));
        assert_eq!(parse_year("2012-2014"), Some(2012));
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_clean_field_drops_placeholders() {
        assert_eq!(clean_field("N/A".to_string()), None);
        assert_eq!(clean_field("  ".to_string()), None);
        assert_eq!(
            clean_field(" 8.8 ".to_string()),
            Some("8.8".to_string())
        );
    }

    #[test]
    fn test_every_genre_has_keywords() {
        for &genre in Genre::all() {
            assert!(!search_keywords(genre).is_empty());
        }
    }

    #[test]
    fn test_decode_search_response() {
        let json = r#"{
            "Search": [
                {"Title": "Funny Games", "Year": "2007", "imdbID": "tt0808279", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "1",
            "Response": "True"
        }"#;
        let decoded: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.response, "True");
        assert_eq!(decoded.search.len(), 1);
        assert_eq!(decoded.search[0].imdb_id, "tt0808279");
    }

    #[test]
    fn test_decode_not_found_response() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let decoded: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.response, "False");
        assert!(decoded.search.is_empty());
        assert_eq!(decoded.error.as_deref(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn test_lookup_walks_keywords_and_dedupes() {
        fn handler(params: &HashMap<String, String>) -> (StatusCode, &'static str) {
            match params.get("s").map(String::as_str) {
                Some("funny") => (
                    StatusCode::OK,
                    r#"{"Response":"True","Search":[
                        {"Title":"First Laugh","Year":"2001","imdbID":"tt0000001"},
                        {"Title":"Second Laugh","Year":"2002","imdbID":"tt0000002"}
                    ]}"#,
                ),
                Some("laugh") => (
                    StatusCode::OK,
                    r#"{"Response":"True","Search":[
                        {"Title":"Second Laugh","Year":"2002","imdbID":"tt0000002"},
                        {"Title":"Third Laugh","Year":"2003","imdbID":"tt0000003"}
                    ]}"#,
                ),
                _ => (
                    StatusCode::OK,
                    r#"{"Response":"False","Error":"Movie not found!"}"#,
                ),
            }
        }

        let endpoint = start_stub_omdb(handler).await;
        let source = source_for(endpoint);

        let records = source
            .lookup(GenreQuery::Genre(Genre::Comedy))
            .await
            .unwrap();

        // tt0000002 appears under both keywords but only once here
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].title, "First Laugh");
        assert_eq!(records[1].title, "Second Laugh");
        assert_eq!(records[2].title, "Third Laugh");

        // Fetched under Comedy, so every record carries that tag
        assert!(records.iter().all(|r| r.genre == Some(Genre::Comedy)));
        assert_eq!(records[0].year, Some(2001));
        assert_eq!(
            records[0].link,
            "https://www.imdb.com/title/tt0000001/"
        );
    }

    #[tokio::test]
    async fn test_lookup_enriches_from_detail_endpoint() {
        fn handler(params: &HashMap<String, String>) -> (StatusCode, &'static str) {
            if params.contains_key("i") {
                return (
                    StatusCode::OK,
                    r#"{"Response":"True","Title":"First Laugh","Year":"2001",
                        "Genre":"Comedy, Romance","Director":"Jane Doe",
                        "Plot":"A very funny film.","Poster":"N/A","imdbRating":"7.4"}"#,
                );
            }
            match params.get("s").map(String::as_str) {
                Some("funny") => (
                    StatusCode::OK,
                    r#"{"Response":"True","Search":[
                        {"Title":"First Laugh","Year":"2001","imdbID":"tt0000001"}
                    ]}"#,
                ),
                _ => (
                    StatusCode::OK,
                    r#"{"Response":"False","Error":"Movie not found!"}"#,
                ),
            }
        }

        let endpoint = start_stub_omdb(handler).await;
        let source = OmdbSource::new("test-key")
            .with_base_url(endpoint)
            .with_results_per_lookup(1);

        let records = source
            .lookup(GenreQuery::Genre(Genre::Comedy))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].director.as_deref(), Some("Jane Doe"));
        assert_eq!(records[0].plot.as_deref(), Some("A very funny film."));
        assert_eq!(records[0].imdb_rating.as_deref(), Some("7.4"));
        // "N/A" poster stays empty
        assert_eq!(records[0].poster, None);
    }

    #[tokio::test]
    async fn test_lookup_rate_limit_maps_to_rate_limited() {
        fn handler(_params: &HashMap<String, String>) -> (StatusCode, &'static str) {
            (StatusCode::TOO_MANY_REQUESTS, "slow down")
        }

        let endpoint = start_stub_omdb(handler).await;
        let source = source_for(endpoint);

        let err = source
            .lookup(GenreQuery::Genre(Genre::Drama))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::RateLimited));
    }

    #[tokio::test]
    async fn test_lookup_server_error_maps_to_unavailable() {
        fn handler(_params: &HashMap<String, String>) -> (StatusCode, &'static str) {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom")
        }

        let endpoint = start_stub_omdb(handler).await;
        let source = source_for(endpoint);

        let err = source.lookup(GenreQuery::Trending).await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_lookup_no_hits_anywhere_is_not_found() {
        fn handler(_params: &HashMap<String, String>) -> (StatusCode, &'static str) {
            (
                StatusCode::OK,
                r#"{"Response":"False","Error":"Movie not found!"}"#,
            )
        }

        let endpoint = start_stub_omdb(handler).await;
        let source = source_for(endpoint);

        let err = source
            .lookup(GenreQuery::Genre(Genre::Musical))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound { .. }));
    }
}
