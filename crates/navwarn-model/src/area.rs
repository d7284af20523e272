//! Sea-area hierarchy with localized names

use serde::{Deserialize, Serialize};

/// A named sea area; `parent` links form the ancestor chain the encoder
/// walks when resolving display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Localized names
    pub descs: Vec<AreaDesc>,
    /// Parent area, if any
    pub parent: Option<Box<Area>>,
}

/// Localized area name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDesc {
    /// ISO 639-1 language code
    pub lang: String,
    /// Display name in that language
    pub name: Option<String>,
}

impl Area {
    /// Localized name record for the given language, if present.
    pub fn desc(&self, lang: &str) -> Option<&AreaDesc> {
        self.descs.iter().find(|desc| desc.lang == lang)
    }

    /// The area followed by its ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &Area> {
        std::iter::successors(Some(self), |area| area.parent.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(lang: &str, name: &str) -> AreaDesc {
        AreaDesc {
            lang: lang.to_string(),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let area = Area {
            descs: vec![named("en", "Drogden")],
            parent: Some(Box::new(Area {
                descs: vec![named("en", "The Sound")],
                parent: None,
            })),
        };

        let names: Vec<_> = area
            .ancestors()
            .filter_map(|a| a.desc("en").and_then(|d| d.name.as_deref()))
            .collect();
        assert_eq!(names, vec!["Drogden", "The Sound"]);
    }

    #[test]
    fn test_desc_lookup_by_language() {
        let area = Area {
            descs: vec![named("da", "Østersøen"), named("en", "The Baltic Sea")],
            parent: None,
        };
        assert_eq!(
            area.desc("da").and_then(|d| d.name.as_deref()),
            Some("Østersøen")
        );
        assert!(area.desc("de").is_none());
    }
}
