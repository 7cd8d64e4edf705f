//! Page meta tags derived from a document's SEO block

use crate::types::ContentDocument;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Meta tags for the course page head
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaTags {
    /// `<title>`
    pub title: String,
    /// `<meta name="description">`
    pub description: String,
    /// `<meta name="keywords">`, comma separated
    pub keywords: String,
    /// OpenGraph tags
    pub open_graph: OpenGraph,
    /// Twitter card tags
    pub twitter: TwitterCard,
}

/// OpenGraph (`og:*`) tags
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OpenGraph {
    /// `og:title`
    pub title: String,
    /// `og:description`
    pub description: String,
    /// `og:image`
    pub images: Vec<String>,
    /// `og:type`
    #[serde(rename = "type")]
    pub kind: String,
}

/// Twitter card (`twitter:*`) tags
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TwitterCard {
    /// `twitter:card`
    pub card: String,
    /// `twitter:title`
    pub title: String,
    /// `twitter:description`
    pub description: String,
    /// `twitter:image`
    pub images: Vec<String>,
}

/// Build the meta tags for `document`
pub fn generate_meta_tags(document: &ContentDocument) -> MetaTags {
    let seo = &document.seo;
    let title = seo.title.clone().unwrap_or_default();
    let description = seo.description.clone().unwrap_or_default();
    let images: Vec<String> = seo.og_image.iter().cloned().collect();

    MetaTags {
        title: title.clone(),
        description: description.clone(),
        keywords: seo.keywords.as_deref().unwrap_or_default().join(", "),
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            images: images.clone(),
            kind: "website".to_string(),
        },
        twitter: TwitterCard {
            card: "summary_large_image".to_string(),
            title,
            description,
            images,
        },
    }
}
