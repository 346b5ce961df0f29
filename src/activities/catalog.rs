use super::models::{Activity, RawActivity};

/// Lift raw entries into catalog shape, assigning 1-based sequential ids in
/// input order. The remote source carries no category or description.
pub fn normalize(raw: Vec<RawActivity>) -> Vec<Activity> {
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| Activity {
            id: index as u32 + 1,
            title: entry.title,
            icon: entry.icon,
            weather_tags: entry.tags.into_iter().collect(),
            category: None,
            description: None,
        })
        .collect()
}

/// Fixed fallback catalog used whenever the remote source is unavailable.
/// It replaces the working catalog wholesale; remote and default lists are
/// never merged.
pub fn default_catalog() -> Vec<Activity> {
    fn entry(
        id: u32,
        title: &str,
        icon: &str,
        tags: [&str; 2],
        category: &str,
        description: &str,
    ) -> Activity {
        Activity {
            id,
            title: title.to_string(),
            icon: icon.to_string(),
            weather_tags: tags.iter().map(|tag| tag.to_string()).collect(),
            category: Some(category.to_string()),
            description: Some(description.to_string()),
        }
    }

    vec![
        entry(
            1,
            "🎯 Randonnée",
            "🎯",
            ["outdoor", "sun-critical"],
            "sport",
            "Randonnée en pleine nature",
        ),
        entry(
            2,
            "🚴 Cyclisme",
            "🚴",
            ["outdoor", "wind-sensitive"],
            "sport",
            "Balade à vélo",
        ),
        entry(
            3,
            "🏃 Running",
            "🏃",
            ["outdoor", "rain-prohibited"],
            "sport",
            "Course à pied",
        ),
        entry(
            4,
            "🧺 Pique-nique",
            "🧺",
            ["outdoor", "rain-prohibited"],
            "loisir",
            "Repas en plein air",
        ),
        entry(
            5,
            "📸 Photographie",
            "📸",
            ["outdoor", "sun-critical"],
            "loisir",
            "Séance photo",
        ),
    ]
}
