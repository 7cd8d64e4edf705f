//! End-to-end behavior of the content pipeline against a mocked catalog

mod common;

use common::{catalog_client, catalog_config, course_json};
use course_content::{
    CatalogClient, CatalogError, ContentCache, Language, fallback_document, generate_meta_tags,
    utils::{extract_youtube_id, format_price},
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn landing_page_renders_from_live_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/ielts-course"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": course_json("ielts-course", 153, "IELTS Course by Munzereen Shahid")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = catalog_client(&server);
    let document = client.resolve_content("ielts-course", Language::En).await;

    assert_eq!(document.id, 153);
    let video_url = document.media[0].url.as_deref().unwrap();
    assert_eq!(extract_youtube_id(video_url).as_deref(), Some("dQw4w9WgXcQ"));

    let cta = &document.cta_text;
    assert_eq!(
        format_price(cta.price.unwrap(), cta.currency.as_deref().unwrap()),
        "BDT\u{a0}3,850"
    );
    assert_eq!(document.checklist[0].text.as_deref(), Some("Total Enrolled 32995"));
    let features = document.section("features").unwrap();
    let feature = &features.values.as_deref().unwrap()[0];
    assert_eq!(feature.title.as_deref(), Some("Live classes"));
    assert_eq!(feature.extra["subtitle"], "Weekly");

    // The rendered JSON carries every nested member the catalog sent
    let served = serde_json::to_value(&*document).unwrap();
    let sent = course_json("ielts-course", 153, "IELTS Course by Munzereen Shahid");
    for field in ["media", "checklist", "seo", "cta_text", "sections"] {
        assert_eq!(served[field], sent[field], "nested `{}` must pass through", field);
    }
    assert_eq!(
        generate_meta_tags(&document).title,
        "IELTS Course by Munzereen Shahid"
    );

    // Served from cache; the mock expects exactly one request
    let again = client.resolve_content("ielts-course", Language::En).await;
    assert!(Arc::ptr_eq(&document, &again));
}

#[tokio::test]
async fn outage_serves_fallback_and_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/ielts-course"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/ielts-course"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(course_json("ielts-course", 7, "Live")),
        )
        .mount(&server)
        .await;

    let client = catalog_client(&server);

    let first = client.resolve_content("ielts-course", Language::En).await;
    assert_eq!(*first, *fallback_document());
    assert_eq!(client.cache_stats().await.size, 0);

    let second = client.resolve_content("ielts-course", Language::En).await;
    assert_eq!(second.title, "Live");
    assert_eq!(client.cache_stats().await.entries, vec!["ielts-course-en"]);
}

#[tokio::test]
async fn clients_sharing_a_cache_fetch_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/ielts-course"))
        .and(query_param("lang", "bn"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(course_json("ielts-course", 1, "Bangla")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = catalog_config(&server);
    let cache = Arc::new(ContentCache::new(config.cache_duration));
    let a = CatalogClient::with_cache(&config, cache.clone()).unwrap();
    let b = CatalogClient::with_cache(&config, cache.clone()).unwrap();

    let from_a = a.resolve_content("ielts-course", Language::Bn).await;
    let from_b = b.resolve_content("ielts-course", Language::Bn).await;
    assert!(Arc::ptr_eq(&from_a, &from_b));

    b.clear_cache().await;
    assert_eq!(a.cache_stats().await.size, 0);
}

#[tokio::test]
async fn slow_catalog_times_out_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/ielts-course"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(course_json("ielts-course", 9, "Too late"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = catalog_client(&server);
    let document = client.resolve_content("ielts-course", Language::En).await;

    assert_eq!(document.title, fallback_document().title);
    assert_eq!(client.cache_stats().await.size, 0);
}

#[tokio::test]
async fn listing_reports_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                course_json("ielts-course", 1, "IELTS"),
                course_json("spoken-english", 2, "Spoken English")
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("lang", "bn"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = catalog_client(&server);

    let courses = client.fetch_courses(Language::En).await.unwrap();
    let slugs: Vec<&str> = courses.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, ["ielts-course", "spoken-english"]);

    let error = client.fetch_courses(Language::Bn).await.unwrap_err();
    assert!(matches!(error, CatalogError::Remote { status: 500, .. }));
    assert_eq!(error.to_string(), "HTTP error! status: 500");
}
