use lazy_static::lazy_static;
use regex::Regex;

use super::model::jurisdiction::{jurisdiction_info, JurisdictionCode, JURISDICTIONS};

/// Infers a jurisdiction from a free-text location (user-entered, or from
/// OCR). None means the location is unknown, which is not an error.
///
/// The tax math only depends on this trait, so a geocoding resolver can
/// stand in for the text heuristic.
pub trait JurisdictionResolver {
    fn resolve(&self, location: &str) -> Option<JurisdictionCode>;
}

lazy_static! {
    static ref CODE_TOKEN_RE: Regex = Regex::new(r"\b[A-Z]{2}\b").unwrap();
    static ref LOWER_NAMES: Vec<(String, JurisdictionCode)> = JURISDICTIONS
        .iter()
        .map(|j| (j.display_name.to_lowercase(), j.code))
        .collect();
}

/// The text heuristic, in order:
///  1. The first standalone two-letter upper case token, if it is a known code.
///     eg. "Denver, CO"
///  2. The first jurisdiction (in table order) whose full name appears
///     anywhere in the text, case-insensitively. eg. "denver colorado"
///
/// Step 2 is a plain substring search, so "West Virginia" will match
/// Virginia, since it comes first in the table.
///
/// Step 1 never looks past the first token. Locations which lead with some
/// other two capital letters ("TA Travel Center, Denver, CO", "I-70 EB near
/// Denver, CO") resolve to nothing, and end up in the report's unresolved
/// counts.
#[derive(Default, Clone, Copy, Debug)]
pub struct TextHeuristicResolver;

impl TextHeuristicResolver {
    fn resolve_code_token(location: &str) -> Option<JurisdictionCode> {
        let token = CODE_TOKEN_RE.find(location)?;
        jurisdiction_info(token.as_str()).map(|j| j.code)
    }

    fn resolve_full_name(location: &str) -> Option<JurisdictionCode> {
        let lower = location.to_lowercase();
        LOWER_NAMES
            .iter()
            .find(|(name, _)| lower.contains(name.as_str()))
            .map(|(_, code)| *code)
    }
}

impl JurisdictionResolver for TextHeuristicResolver {
    fn resolve(&self, location: &str) -> Option<JurisdictionCode> {
        Self::resolve_code_token(location)
            .or_else(|| Self::resolve_full_name(location))
    }
}

pub fn resolve_jurisdiction(location: &str) -> Option<JurisdictionCode> {
    TextHeuristicResolver.resolve(location)
}
