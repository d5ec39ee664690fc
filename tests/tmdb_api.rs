use mockito::Matcher;
use serde_json::json;

use marquee::tmdb::{CatalogApi, CatalogError, TmdbClient};

const API_KEY: &str = "k123";

fn listing_body() -> String {
    json!({
        "page": 1,
        "total_pages": 42,
        "results": [
            { "id": 268, "title": "Batman", "overview": "The Dark Knight of Gotham City.",
              "poster_path": "/batman.jpg", "vote_average": 7.2 },
            { "id": 272, "title": "Batman Begins", "overview": "",
              "poster_path": null, "vote_average": 7.7 }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn attaches_api_key_to_every_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/movie/popular")
        .match_query(Matcher::UrlEncoded("api_key".into(), API_KEY.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing_body())
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    let response = client.fetch_popular().await.unwrap();
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].id, 268);
    mock.assert_async().await;
}

#[tokio::test]
async fn search_carries_query_and_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), API_KEY.into()),
            Matcher::UrlEncoded("query".into(), "batman".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing_body())
        .expect(1)
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    let response = client.search("batman").await.unwrap();
    let titles: Vec<_> = response.results.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Batman", "Batman Begins"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_search_issues_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    let response = client.search("").await.unwrap();
    assert!(response.results.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn blank_movie_id_fails_without_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    assert!(matches!(
        client.fetch_details("   ").await,
        Err(CatalogError::BlankMovieId)
    ));
    assert!(matches!(
        client.fetch_trailers("").await,
        Err(CatalogError::BlankMovieId)
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn details_decodes_movie() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/movie/550")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 550, "title": "Fight Club",
                "overview": "A ticking-time-bomb insomniac.",
                "poster_path": "/fc.jpg", "vote_average": 8.4
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    let movie = client.fetch_details("550").await.unwrap();
    assert_eq!(movie.id, 550);
    assert_eq!(movie.title, "Fight Club");
    assert_eq!(
        movie.poster_url().as_deref(),
        Some("https://image.tmdb.org/t/p/w500/fc.jpg")
    );
}

#[tokio::test]
async fn details_404_maps_to_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/movie/999999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status_code": 34,
                "status_message": "The resource you requested could not be found."
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    assert!(matches!(
        client.fetch_details("999999").await,
        Err(CatalogError::NotFound)
    ));
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/movie/top_rated")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    match client.fetch_top_rated().await {
        Err(CatalogError::Status { status, .. }) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_decode() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/movie/upcoming")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>definitely not json</html>")
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    assert!(matches!(
        client.fetch_upcoming().await,
        Err(CatalogError::Decode(_))
    ));
}

#[tokio::test]
async fn trailers_decode_from_videos_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/movie/550/videos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 550,
                "results": [
                    { "key": "teaser1", "type": "Teaser", "official": false, "site": "YouTube" },
                    { "key": "trailer1", "type": "Trailer", "official": true, "site": "YouTube" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = TmdbClient::new(server.url(), API_KEY);
    let trailers = client.fetch_trailers("550").await.unwrap();
    assert_eq!(trailers.len(), 2);
    assert_eq!(trailers[1].key, "trailer1");
    assert_eq!(trailers[1].kind, "Trailer");
    assert!(trailers[1].official);
}
