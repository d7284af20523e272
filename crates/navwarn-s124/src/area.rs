//! Gazetteer and locality resolution over the area ancestor chain
//!
//! Two independent strategies, both walking self → parent → grandparent
//! until a name is found. Chain exhaustion yields no name; that is normal
//! for areas outside the gazetteer and never an error.

use navwarn_model::Area;

use crate::dataset::LocalizedText;
use crate::series::language_code;

/// Canonical external names for the known seas and straits.
fn gazetteer_name(name: &str) -> Option<&'static str> {
    match name {
        "The Baltic Sea" => Some("Baltic sea"),
        "Skagerrak" => Some("Skagerrak"),
        "Kattegat" => Some("Kattegat"),
        "The Sound" => Some("The Sound"),
        "The Great Belt" | "The Little Belt" => Some("The Belts"),
        _ => None,
    }
}

/// Resolve the general-area name of an area by walking its ancestor chain
/// until an English display name matches the gazetteer.
pub fn general_area_name(area: &Area) -> Option<LocalizedText> {
    for ancestor in area.ancestors() {
        let resolved = ancestor
            .desc("en")
            .and_then(|desc| desc.name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .and_then(gazetteer_name);
        if let Some(canonical) = resolved {
            return Some(LocalizedText {
                language: language_code("en").to_string(),
                text: canonical.to_string(),
            });
        }
    }
    None
}

/// Resolve the locality name of an area in the requested language by walking
/// its ancestor chain until any localized name is found.
pub fn locality_name(area: &Area, lang: &str) -> Option<LocalizedText> {
    for ancestor in area.ancestors() {
        if let Some(name) = ancestor.desc(lang).and_then(|desc| desc.name.clone()) {
            return Some(LocalizedText {
                language: language_code(lang).to_string(),
                text: name,
            });
        }
    }
    None
}
