//! Built-in course document served when the catalog cannot be used

use crate::types::{
    ChecklistItem, ContentDocument, CtaText, MediaItem, Section, SectionItem, SeoMetadata,
};
use std::sync::{Arc, LazyLock};

static FALLBACK: LazyLock<Arc<ContentDocument>> = LazyLock::new(|| Arc::new(build()));

/// The fallback document.
///
/// One immutable instance per process; every call hands out the same `Arc`.
pub fn fallback_document() -> Arc<ContentDocument> {
    Arc::clone(&FALLBACK)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn checklist(id: i64, title: &str, description: &str, icon: &str) -> ChecklistItem {
    ChecklistItem {
        id: Some(id),
        title: Some(title.into()),
        description: Some(description.into()),
        icon: Some(icon.into()),
        ..Default::default()
    }
}

fn section(id: i64, kind: &str, name: &str, item: SectionItem) -> Section {
    Section {
        id: Some(id),
        kind: Some(kind.into()),
        name: Some(name.into()),
        content: Some(vec![item]),
        ..Default::default()
    }
}

fn pointed(title: &str, description: &str, points: &[&str]) -> SectionItem {
    SectionItem {
        id: Some(1),
        title: Some(title.into()),
        description: Some(description.into()),
        points: Some(strings(points)),
        ..Default::default()
    }
}

fn build() -> ContentDocument {
    ContentDocument {
        id: 1,
        slug: "ielts-course".into(),
        title: "Complete IELTS Preparation Course".into(),
        description: "Master the IELTS exam with our comprehensive course designed by expert \
                      instructors. Get your target band score with structured learning, practice \
                      tests, and personalized feedback."
            .into(),
        media: vec![MediaItem {
            id: Some(1),
            kind: Some("video".into()),
            url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".into()),
            youtube_id: Some("dQw4w9WgXcQ".into()),
            title: Some("IELTS Course Preview".into()),
            description: Some("Introduction to our comprehensive IELTS preparation course".into()),
            ..Default::default()
        }],
        checklist: vec![
            checklist(
                1,
                "Complete Reading Module",
                "Master reading strategies and comprehension techniques",
                "📖",
            ),
            checklist(
                2,
                "Excel in Writing Tasks",
                "Learn to write coherent essays and reports",
                "✍️",
            ),
            checklist(
                3,
                "Improve Listening Skills",
                "Enhance listening comprehension for various accents",
                "🎧",
            ),
            checklist(
                4,
                "Perfect Speaking Skills",
                "Develop fluency and confidence in speaking",
                "🗣️",
            ),
        ],
        seo: SeoMetadata {
            title: Some("IELTS Course - 10 Minute School".into()),
            description: Some(
                "Master IELTS with our comprehensive course designed by experts.".into(),
            ),
            keywords: Some(strings(&["IELTS", "English", "Language Test", "Study Abroad"])),
            og_image: None,
            ..Default::default()
        },
        cta_text: CtaText {
            primary: Some("Ready to Master IELTS?".into()),
            secondary: Some(
                "Join thousands of successful students who have achieved their target band scores."
                    .into(),
            ),
            button_text: Some("Enroll Now".into()),
            price: Some(1000.0),
            currency: Some("BDT".into()),
            ..Default::default()
        },
        sections: vec![
            section(
                1,
                "instructor",
                "Expert Instructors",
                SectionItem {
                    id: Some(1),
                    title: Some("Munzereen Shahid".into()),
                    description: Some("IELTS Expert with 10+ years of experience".into()),
                    image_url: Some("https://cdn.10minuteschool.com/instructor1.jpg".into()),
                    ..Default::default()
                },
            ),
            section(
                2,
                "features",
                "Course Features",
                pointed(
                    "Comprehensive Content",
                    "Complete coverage of all IELTS modules",
                    &[
                        "All 4 modules covered",
                        "Structured learning path",
                        "Expert strategies",
                    ],
                ),
            ),
            section(
                3,
                "pointers",
                "What You Will Learn",
                pointed(
                    "Master IELTS Reading",
                    "Develop advanced reading strategies",
                    &[
                        "Skimming and scanning techniques",
                        "Understanding complex texts",
                        "Time management",
                    ],
                ),
            ),
            section(
                4,
                "about",
                "Course Details",
                pointed(
                    "Course Duration",
                    "Lifetime access to all course materials",
                    &[
                        "100+ hours of content",
                        "Lifetime access",
                        "Self-paced learning",
                    ],
                ),
            ),
            section(
                5,
                "exclusive",
                "Exclusive Features",
                pointed(
                    "Personalized Learning Path",
                    "AI-powered adaptive learning system",
                    &["Custom study plans", "Progress tracking", "Weakness identification"],
                ),
            ),
        ],
    }
}
