//! Message-series identifier construction

use navwarn_model::WarningCategory;
use tracing::warn;

use crate::dataset::{SeriesIdentifier, WarningType};

/// Issuing country code carried by every series identifier.
pub const COUNTRY: &str = "DK";

/// Production-agency code of the issuing authority.
pub const PRODUCTION_AGENCY: &str = "111";

/// Name of the national warning series.
pub const NAME_OF_SERIES: &str = "Danish Nav Warn";

/// Map a warning category onto its S-124 warning type.
///
/// Only the four navigational-warning categories have a mapping; notice
/// categories return `None` and the caller decides what an unmapped
/// category means.
pub fn warning_type(category: WarningCategory) -> Option<WarningType> {
    match category {
        WarningCategory::LocalWarning => Some(WarningType::LocalNavigationalWarning),
        WarningCategory::CoastalWarning => Some(WarningType::CoastalNavigationalWarning),
        WarningCategory::SubareaWarning => Some(WarningType::SubAreaNavigationalWarning),
        WarningCategory::NavareaWarning => Some(WarningType::NavareaNavigationalWarning),
        WarningCategory::TemporaryNotice
        | WarningCategory::PreliminaryNotice
        | WarningCategory::PermanentNotice
        | WarningCategory::MiscellaneousNotice => None,
    }
}

/// Build the canonical series identifier for a message.
///
/// `warning_number` uses `-1` when unassigned; `year` is the two-digit
/// issue year. An unmapped category is logged and leaves the warning type
/// unset without failing the encode.
pub fn build_series_identifier(
    category: WarningCategory,
    warning_number: i32,
    year: i32,
    mrn: &str,
) -> SeriesIdentifier {
    let warning_type = warning_type(category);
    if warning_type.is_none() {
        warn!(?category, "warning category not mapped to an S-124 warning type");
    }

    SeriesIdentifier {
        country: COUNTRY.to_string(),
        production_agency: PRODUCTION_AGENCY.to_string(),
        name_of_series: NAME_OF_SERIES.to_string(),
        warning_type,
        warning_number,
        year,
        warning_identifier: mrn.to_string(),
    }
}

/// ISO 639-2 code emitted on language-tagged output nodes.
pub fn language_code(lang: &str) -> &'static str {
    match lang.to_ascii_lowercase().as_str() {
        "da" => "dan",
        _ => "eng",
    }
}
