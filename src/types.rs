//! Core types for course-content

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Content language supported by the catalog
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Bangla
    Bn,
}

impl Language {
    /// Every language the catalog serves
    pub const SUPPORTED: [Language; 2] = [Language::En, Language::Bn];

    /// Wire code used in cache keys and the `lang` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Bn => "bn",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a language code is not one of [`Language::SUPPORTED`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct ParseLanguageError(pub String);

impl std::str::FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "bn" => Ok(Language::Bn),
            other => Err(ParseLanguageError(other.to_string())),
        }
    }
}

/// Course content resolved for one (slug, language) pair.
///
/// Only the top-level shape is guaranteed (see [`crate::validator`]). Nested
/// entries decode member by member: members that are unknown or do not
/// decode are kept verbatim in the entry's `extra` map and serialized back
/// unchanged. A list element that is not an object becomes a blank entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContentDocument {
    /// Catalog identifier
    #[serde(deserialize_with = "number_as_i64")]
    pub id: i64,

    /// URL slug (e.g. "ielts-course")
    pub slug: String,

    /// Course title
    pub title: String,

    /// Course description (may contain HTML from the catalog)
    pub description: String,

    /// Trailer videos and preview images, in display order
    #[serde(deserialize_with = "lenient_items")]
    pub media: Vec<MediaItem>,

    /// Checklist of what the course includes, in display order
    #[serde(deserialize_with = "lenient_items")]
    pub checklist: Vec<ChecklistItem>,

    /// SEO metadata
    #[serde(deserialize_with = "lenient")]
    pub seo: SeoMetadata,

    /// Call-to-action block
    #[serde(deserialize_with = "lenient")]
    pub cta_text: CtaText,

    /// Typed content sections (instructors, features, pointers, ...)
    #[serde(deserialize_with = "lenient_items")]
    pub sections: Vec<Section>,
}

impl ContentDocument {
    /// First section of the given type, if any
    pub fn section(&self, kind: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.kind.as_deref() == Some(kind))
    }
}

/// JSON object members of a nested entry
pub type Members = Map<String, Value>;

/// A media entry (video trailer, image)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Members", into = "Members")]
pub struct MediaItem {
    /// Entry identifier
    pub id: Option<i64>,
    /// Media type, e.g. "video" or "image"
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Gallery name, e.g. "preview_gallery"
    pub name: Option<String>,
    /// Catalog resource type, e.g. "video" or "image"
    pub resource_type: Option<String>,
    /// Catalog resource value (YouTube id or image URL)
    pub resource_value: Option<String>,
    /// Media URL
    pub url: Option<String>,
    /// YouTube video id for video entries
    pub youtube_id: Option<String>,
    /// Thumbnail URL
    pub thumbnail_url: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Members without a typed field, or whose value did not decode
    #[serde(skip)]
    pub extra: Members,
}

impl From<Members> for MediaItem {
    fn from(members: Members) -> Self {
        let mut fields = Fields(members);
        Self {
            id: fields.take("id"),
            kind: fields.take("type"),
            name: fields.take("name"),
            resource_type: fields.take("resource_type"),
            resource_value: fields.take("resource_value"),
            url: fields.take("url"),
            youtube_id: fields.take("youtube_id"),
            thumbnail_url: fields.take("thumbnail_url"),
            title: fields.take("title"),
            description: fields.take("description"),
            extra: fields.0,
        }
    }
}

impl From<MediaItem> for Members {
    fn from(item: MediaItem) -> Self {
        let mut map = item.extra;
        put(&mut map, "id", item.id);
        put(&mut map, "type", item.kind);
        put(&mut map, "name", item.name);
        put(&mut map, "resource_type", item.resource_type);
        put(&mut map, "resource_value", item.resource_value);
        put(&mut map, "url", item.url);
        put(&mut map, "youtube_id", item.youtube_id);
        put(&mut map, "thumbnail_url", item.thumbnail_url);
        put(&mut map, "title", item.title);
        put(&mut map, "description", item.description);
        map
    }
}

/// A checklist entry
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Members", into = "Members")]
pub struct ChecklistItem {
    /// Entry identifier
    pub id: Option<i64>,
    /// Title
    pub title: Option<String>,
    /// Entry text as the catalog labels it, e.g. "Total Enrolled 32995"
    pub text: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Icon (emoji or URL)
    pub icon: Option<String>,
    /// Members without a typed field, or whose value did not decode
    #[serde(skip)]
    pub extra: Members,
}

impl From<Members> for ChecklistItem {
    fn from(members: Members) -> Self {
        let mut fields = Fields(members);
        Self {
            id: fields.take("id"),
            title: fields.take("title"),
            text: fields.take("text"),
            description: fields.take("description"),
            icon: fields.take("icon"),
            extra: fields.0,
        }
    }
}

impl From<ChecklistItem> for Members {
    fn from(item: ChecklistItem) -> Self {
        let mut map = item.extra;
        put(&mut map, "id", item.id);
        put(&mut map, "title", item.title);
        put(&mut map, "text", item.text);
        put(&mut map, "description", item.description);
        put(&mut map, "icon", item.icon);
        map
    }
}

/// SEO metadata for the course page
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Members", into = "Members")]
pub struct SeoMetadata {
    /// Page title
    pub title: Option<String>,
    /// Meta description
    pub description: Option<String>,
    /// Meta keywords
    pub keywords: Option<Vec<String>>,
    /// OpenGraph image URL
    pub og_image: Option<String>,
    /// Members without a typed field, or whose value did not decode
    #[serde(skip)]
    pub extra: Members,
}

impl From<Members> for SeoMetadata {
    fn from(members: Members) -> Self {
        let mut fields = Fields(members);
        Self {
            title: fields.take("title"),
            description: fields.take("description"),
            keywords: fields.take("keywords"),
            og_image: fields.take("og_image"),
            extra: fields.0,
        }
    }
}

impl From<SeoMetadata> for Members {
    fn from(seo: SeoMetadata) -> Self {
        let mut map = seo.extra;
        put(&mut map, "title", seo.title);
        put(&mut map, "description", seo.description);
        put(&mut map, "keywords", seo.keywords);
        put(&mut map, "og_image", seo.og_image);
        map
    }
}

/// Call-to-action block
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Members", into = "Members")]
pub struct CtaText {
    /// Headline
    pub primary: Option<String>,
    /// Supporting line
    pub secondary: Option<String>,
    /// Button label
    pub button_text: Option<String>,
    /// Price
    pub price: Option<f64>,
    /// ISO 4217 currency code
    pub currency: Option<String>,
    /// Members without a typed field, or whose value did not decode
    #[serde(skip)]
    pub extra: Members,
}

impl From<Members> for CtaText {
    fn from(members: Members) -> Self {
        let mut fields = Fields(members);
        Self {
            primary: fields.take("primary"),
            secondary: fields.take("secondary"),
            button_text: fields.take("button_text"),
            price: fields.take("price"),
            currency: fields.take("currency"),
            extra: fields.0,
        }
    }
}

impl From<CtaText> for Members {
    fn from(cta: CtaText) -> Self {
        let mut map = cta.extra;
        put(&mut map, "primary", cta.primary);
        put(&mut map, "secondary", cta.secondary);
        put(&mut map, "button_text", cta.button_text);
        put(&mut map, "price", cta.price.map(price_number));
        put(&mut map, "currency", cta.currency);
        map
    }
}

/// A typed content section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Members", into = "Members")]
pub struct Section {
    /// Section identifier
    pub id: Option<i64>,
    /// Section type: "instructors", "features", "pointers", "about", ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Section heading
    pub name: Option<String>,
    /// Section entries, in display order (built-in document form)
    pub content: Option<Vec<SectionItem>>,
    /// Section entries, in display order (catalog form)
    pub values: Option<Vec<SectionItem>>,
    /// Members without a typed field, or whose value did not decode
    #[serde(skip)]
    pub extra: Members,
}

impl From<Members> for Section {
    fn from(members: Members) -> Self {
        let mut fields = Fields(members);
        Self {
            id: fields.take("id"),
            kind: fields.take("type"),
            name: fields.take("name"),
            content: fields.take("content"),
            values: fields.take("values"),
            extra: fields.0,
        }
    }
}

impl From<Section> for Members {
    fn from(section: Section) -> Self {
        let mut map = section.extra;
        put(&mut map, "id", section.id);
        put(&mut map, "type", section.kind);
        put(&mut map, "name", section.name);
        put(&mut map, "content", section.content);
        put(&mut map, "values", section.values);
        map
    }
}

/// An entry inside a [`Section`]
///
/// Section types carry different members (`checklist`, `file_url`,
/// `short_description`, ...); those stay in [`SectionItem::extra`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Members", into = "Members")]
pub struct SectionItem {
    /// Entry identifier
    pub id: Option<i64>,
    /// Name (instructor name for instructor sections)
    pub name: Option<String>,
    /// Title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Image URL
    pub image_url: Option<String>,
    /// Bullet points
    pub points: Option<Vec<String>>,
    /// Members without a typed field, or whose value did not decode
    #[serde(skip)]
    pub extra: Members,
}

impl From<Members> for SectionItem {
    fn from(members: Members) -> Self {
        let mut fields = Fields(members);
        Self {
            id: fields.take("id"),
            name: fields.take("name"),
            title: fields.take("title"),
            description: fields.take("description"),
            image_url: fields.take("image_url"),
            points: fields.take("points"),
            extra: fields.0,
        }
    }
}

impl From<SectionItem> for Members {
    fn from(item: SectionItem) -> Self {
        let mut map = item.extra;
        put(&mut map, "id", item.id);
        put(&mut map, "name", item.name);
        put(&mut map, "title", item.title);
        put(&mut map, "description", item.description);
        put(&mut map, "image_url", item.image_url);
        put(&mut map, "points", item.points);
        map
    }
}

/// Diagnostic view of the content cache
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CacheStats {
    /// Number of entries, expired ones included
    pub size: usize,
    /// Cache keys ("{slug}-{language}"), sorted
    pub entries: Vec<String>,
}

/// Whole prices go back out as JSON integers, the way the catalog sends them.
fn price_number(price: f64) -> Value {
    if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
        Value::from(price as i64)
    } else {
        Value::from(price)
    }
}

/// Deserialize any JSON number as `i64`, truncating fractional values.
fn number_as_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|f| f as i64))
        .ok_or_else(|| serde::de::Error::custom(format!("id {number} out of range")))
}

/// Object members being decoded into typed fields.
///
/// A member that does not decode stays in place so it survives in `extra`.
struct Fields(Members);

impl Fields {
    fn take<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.0.remove(key)?;
        match T::deserialize(&value) {
            Ok(decoded) => Some(decoded),
            Err(_) => {
                self.0.insert(key.to_string(), value);
                None
            }
        }
    }
}

/// Write a typed field back as a member; `None` leaves `map` untouched.
fn put<T: Serialize>(map: &mut Members, key: &str, value: Option<T>) {
    if let Some(encoded) = value.and_then(|v| serde_json::to_value(v).ok()) {
        map.insert(key.to_string(), encoded);
    }
}

/// Deserialize `T`, substituting `T::default()` when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize a sequence, replacing malformed elements with `T::default()`.
///
/// A non-array value yields an empty list.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}
