//! Form helpers shared by the HTML modules.

use shelf_http::AppError;

/// Trim each `(name, value)` field; blank fields fail with a validation error
/// naming every offender.
pub fn require_fields<const N: usize>(fields: [(&str, &str); N]) -> Result<[String; N], AppError> {
    let blank: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| format!("{name} must not be blank"))
        .collect();

    if !blank.is_empty() {
        return Err(AppError::validation(blank, "Please fill in every field"));
    }

    Ok(fields.map(|(_, value)| value.trim().to_string()))
}

/// Parse a record id submitted as form text.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(format!("'{}' is not a valid id", raw.trim())))
}
