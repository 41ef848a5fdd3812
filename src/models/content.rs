//! Static blog and video catalogs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlogCategory {
    Astrology,
    Mindfulness,
    Rituals,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub id: &'static str,
    pub title: &'static str,
    pub category: BlogCategory,
    pub excerpt: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VideoCategory {
    Meditation,
    Rituals,
    Astrology,
}

#[derive(Debug, Clone, Serialize)]
pub struct Video {
    pub id: &'static str,
    pub title: &'static str,
    pub category: VideoCategory,
    pub duration: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub const BLOG_POSTS: [BlogPost; 5] = [
    BlogPost {
        id: "1",
        title: "Understanding Your Birth Chart: A Complete Guide",
        category: BlogCategory::Astrology,
        excerpt: "Discover how planetary positions at your birth time influence your life path and personality traits.",
        date: "2024-01-15",
    },
    BlogPost {
        id: "2",
        title: "Daily Meditation Practices for Spiritual Growth",
        category: BlogCategory::Mindfulness,
        excerpt: "Learn effective meditation techniques to enhance your spiritual awareness and inner peace.",
        date: "2024-01-18",
    },
    BlogPost {
        id: "3",
        title: "Sacred Rituals for New Moon Manifestation",
        category: BlogCategory::Rituals,
        excerpt: "Harness the power of the new moon with these ancient manifestation rituals and practices.",
        date: "2024-01-20",
    },
    BlogPost {
        id: "4",
        title: "Crystal Healing: A Comprehensive Guide",
        category: BlogCategory::Rituals,
        excerpt: "Explore the healing properties of crystals and how to incorporate them into your spiritual practice.",
        date: "2024-01-25",
    },
    BlogPost {
        id: "5",
        title: "Understanding Planetary Retrogrades",
        category: BlogCategory::Astrology,
        excerpt: "Learn how retrograde planets affect your life and how to navigate these cosmic shifts.",
        date: "2024-01-28",
    },
];

pub const VIDEOS: [Video; 3] = [
    Video {
        id: "1",
        title: "Guided Meditation for Beginners",
        category: VideoCategory::Meditation,
        duration: "15:00",
        url: "https://www.youtube.com/watch?v=inpok4MKVLM",
        description: "A gentle introduction to meditation practice for beginners.",
    },
    Video {
        id: "2",
        title: "Understanding Astrological Houses",
        category: VideoCategory::Astrology,
        duration: "20:00",
        url: "https://www.youtube.com/watch?v=example2",
        description: "Learn about the 12 houses in astrology and their significance.",
    },
    Video {
        id: "3",
        title: "Full Moon Ritual Guide",
        category: VideoCategory::Rituals,
        duration: "25:00",
        url: "https://www.youtube.com/watch?v=example3",
        description: "A complete guide to performing powerful full moon rituals.",
    },
];

/// Blog posts in a category, or all of them when `category` is `None`
pub fn blog_posts(category: Option<BlogCategory>) -> Vec<&'static BlogPost> {
    BLOG_POSTS
        .iter()
        .filter(|post| category.map_or(true, |c| post.category == c))
        .collect()
}

pub fn videos(category: Option<VideoCategory>) -> Vec<&'static Video> {
    VIDEOS
        .iter()
        .filter(|video| category.map_or(true, |c| video.category == c))
        .collect()
}
