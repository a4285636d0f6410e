//! Catalog of selectable titles, partitioned by category.

use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Categories a title can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Movies,
    Plays,
    Songs,
    Series,
}

impl Category {
    /// All categories, in display and toggle order.
    pub const ALL: [Category; 4] = [
        Category::Movies,
        Category::Plays,
        Category::Songs,
        Category::Series,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::Plays => "plays",
            Category::Songs => "songs",
            Category::Series => "series",
        }
    }

    /// Capitalized form for panel titles.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Movies => "Movies",
            Category::Plays => "Plays",
            Category::Songs => "Songs",
            Category::Series => "Series",
        }
    }

    /// Parse a category name as written in catalog files or on the command
    /// line. Accepts singular and plural forms, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "movie" | "movies" => Some(Category::Movies),
            "play" | "plays" => Some(Category::Plays),
            "song" | "songs" => Some(Category::Songs),
            "series" => Some(Category::Series),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selectable title. Duplicates are permitted and never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub category: Category,
}

impl Item {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            category,
        }
    }
}

/// Per-category enabled bits. All categories start enabled; bits only change
/// through an explicit toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySettings {
    enabled: [bool; 4],
}

impl Default for CategorySettings {
    fn default() -> Self {
        Self { enabled: [true; 4] }
    }
}

impl CategorySettings {
    /// Settings with every category disabled; used by the one-shot `pick`
    /// command before enabling the requested categories.
    pub fn none() -> Self {
        Self {
            enabled: [false; 4],
        }
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.enabled[category.index()]
    }

    pub fn toggle(&mut self, category: Category) {
        self.enabled[category.index()] = !self.enabled[category.index()];
    }

    pub fn enable(&mut self, category: Category) {
        self.enabled[category.index()] = true;
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled.iter().any(|&e| e)
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|&&e| e).count()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no recognized category sections in catalog")]
    NoSections,
}

/// Immutable, ordered list of titles. Created once and never mutated; a
/// reloaded catalog replaces the whole value.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The compiled-in default catalog.
    pub fn builtin() -> Self {
        let mut items = Vec::new();
        for title in MOVIES {
            items.push(Item::new(*title, Category::Movies));
        }
        for title in PLAYS {
            items.push(Item::new(*title, Category::Plays));
        }
        for title in SONGS {
            items.push(Item::new(*title, Category::Songs));
        }
        for title in SERIES {
            items.push(Item::new(*title, Category::Series));
        }
        Self::new(items)
    }

    /// Parse catalog text.
    ///
    /// Format: `[category]` section headers followed by one title per line.
    /// Blank lines and `#` comments are skipped. An unknown section header is
    /// logged and its lines ignored, so a bad section degrades to empty
    /// instead of failing the whole file.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let section_re = Regex::new(r"^\[([^\]]+)\]$").expect("valid section regex");

        let mut items = Vec::new();
        let mut current: Option<Category> = None;
        let mut saw_section = false;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(caps) = section_re.captures(line) {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                current = Category::from_name(name);
                match current {
                    Some(_) => saw_section = true,
                    None => warn!("skipping unknown catalog section [{}]", name),
                }
                continue;
            }

            match current {
                Some(category) => items.push(Item::new(line, category)),
                None => {
                    // Titles before the first recognized header have no home.
                    warn!("skipping title outside a category section: {}", line);
                }
            }
        }

        if !saw_section {
            return Err(CatalogError::NoSections);
        }

        Ok(Self::new(items))
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Titles whose category is enabled, in catalog order. Empty when no
    /// category is enabled; that is not an error.
    pub fn eligible(&self, settings: &CategorySettings) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| settings.is_enabled(item.category))
            .collect()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .count()
    }
}

const MOVIES: &[&str] = &[
    "The Shawshank Redemption",
    "The Godfather",
    "Pulp Fiction",
    "The Dark Knight",
    "Fight Club",
    "Back to the Future",
    "Jurassic Park",
    "The Princess Bride",
    "Casablanca",
    "Titanic",
];

const PLAYS: &[&str] = &[
    "Hamlet",
    "Romeo and Juliet",
    "Death of a Salesman",
    "A Streetcar Named Desire",
    "Waiting for Godot",
    "The Importance of Being Earnest",
    "Our Town",
    "Fiddler on the Roof",
];

const SONGS: &[&str] = &[
    "Bohemian Rhapsody",
    "Hotel California",
    "Imagine",
    "Billie Jean",
    "Like a Rolling Stone",
    "Hey Jude",
    "Smells Like Teen Spirit",
    "Dancing Queen",
];

const SERIES: &[&str] = &[
    "Breaking Bad",
    "The Wire",
    "The Sopranos",
    "Friends",
    "Seinfeld",
    "The Office",
    "Game of Thrones",
    "Stranger Things",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("movies"), Some(Category::Movies));
        assert_eq!(Category::from_name("Movie"), Some(Category::Movies));
        assert_eq!(Category::from_name("SERIES"), Some(Category::Series));
        assert_eq!(Category::from_name(" songs "), Some(Category::Songs));
        assert_eq!(Category::from_name("podcasts"), None);
    }

    #[test]
    fn test_parse_sections_and_comments() {
        let text = "\
# weekend game night
[movies]
Alien
Up

[songs]
Yesterday
# not a title
Thriller
";
        let catalog = Catalog::parse(text).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.count_in(Category::Movies), 2);
        assert_eq!(catalog.count_in(Category::Songs), 2);
        // Catalog order follows file order.
        assert_eq!(catalog.items()[0], Item::new("Alien", Category::Movies));
        assert_eq!(catalog.items()[3], Item::new("Thriller", Category::Songs));
    }

    #[test]
    fn test_parse_unknown_section_degrades_to_empty() {
        let text = "\
[movies]
Alien
[animals]
Giraffe
[songs]
Yesterday
";
        let catalog = Catalog::parse(text).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.count_in(Category::Movies), 1);
        assert_eq!(catalog.count_in(Category::Songs), 1);
    }

    #[test]
    fn test_parse_without_sections_is_error() {
        let err = Catalog::parse("Alien\nUp\n").unwrap_err();
        assert!(matches!(err, CatalogError::NoSections));
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let text = "[movies]\nAlien\nAlien\n";
        let catalog = Catalog::parse(text).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[plays]\nMacbeth\nOthello").unwrap();
        file.flush().unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.count_in(Category::Plays), 2);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.txt")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn test_eligible_filters_by_settings() {
        let catalog = Catalog::new(vec![
            Item::new("A", Category::Movies),
            Item::new("B", Category::Songs),
        ]);
        let mut settings = CategorySettings::default();
        settings.toggle(Category::Songs);

        let eligible = catalog.eligible(&settings);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].title, "A");
    }

    #[test]
    fn test_eligible_preserves_catalog_order() {
        let catalog = Catalog::new(vec![
            Item::new("A", Category::Movies),
            Item::new("B", Category::Songs),
            Item::new("C", Category::Movies),
        ]);
        let mut settings = CategorySettings::none();
        settings.enable(Category::Movies);

        let titles: Vec<&str> = catalog
            .eligible(&settings)
            .iter()
            .map(|item| item.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_eligible_empty_when_all_disabled() {
        let catalog = Catalog::builtin();
        let settings = CategorySettings::none();
        assert!(catalog.eligible(&settings).is_empty());
        assert!(!settings.any_enabled());
    }

    #[test]
    fn test_builtin_covers_all_categories() {
        let catalog = Catalog::builtin();
        for category in Category::ALL {
            assert!(catalog.count_in(category) > 0, "{} is empty", category);
        }
    }

    #[test]
    fn test_settings_default_and_toggle() {
        let mut settings = CategorySettings::default();
        assert_eq!(settings.enabled_count(), 4);

        settings.toggle(Category::Plays);
        assert!(!settings.is_enabled(Category::Plays));
        assert!(settings.is_enabled(Category::Movies));

        settings.toggle(Category::Plays);
        assert!(settings.is_enabled(Category::Plays));
    }
}
