//! Common test utilities for course-content integration tests

use course_content::{CatalogClient, ContentConfig};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

/// Catalog config aimed at `server`, with a short timeout
pub fn catalog_config(server: &MockServer) -> ContentConfig {
    ContentConfig {
        base_url: format!("{}/products", server.uri()),
        request_timeout: Duration::from_millis(300),
        cache_duration: Duration::from_secs(60),
        ..Default::default()
    }
}

/// Catalog client aimed at `server`
pub fn catalog_client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&catalog_config(server)).expect("client should build")
}

/// A complete course document as the catalog serves it
pub fn course_json(slug: &str, id: i64, title: &str) -> Value {
    json!({
        "slug": slug,
        "id": id,
        "title": title,
        "description": "<p>Course description</p>",
        "media": [
            {
                "id": 1,
                "type": "video",
                "name": "preview_gallery",
                "resource_type": "video",
                "resource_value": "dQw4w9WgXcQ",
                "url": "https://youtu.be/dQw4w9WgXcQ",
                "thumbnail_url": "https://cdn.example.com/thumb.jpg"
            }
        ],
        "checklist": [
            {"id": "1", "text": "Total Enrolled 32995", "icon": "https://cdn.example.com/i.png", "color": "black"}
        ],
        "seo": {"title": title, "description": "SEO", "keywords": ["IELTS"], "defaultMeta": []},
        "cta_text": {"name": "Enroll now", "value": "enroll", "price": 3850, "currency": "BDT"},
        "sections": [
            {
                "type": "features",
                "name": "How the course is laid out",
                "order_idx": 4,
                "values": [
                    {"id": "f1", "title": "Live classes", "subtitle": "Weekly", "icon": "https://cdn.example.com/f.png"}
                ]
            },
            {
                "type": "instructors",
                "name": "Course instructor",
                "values": [{"name": "Munzereen Shahid", "slug": "munzereen-shahid"}]
            }
        ]
    })
}
