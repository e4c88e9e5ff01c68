/// Identifies entities that expose a stable string identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// First entity in `items` whose id equals `id`.
pub fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Parses a user-supplied amount, rejecting blanks, non-numbers and non-finite values.
pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("{field} must be a number, got `{trimmed}`"))?;
    if !value.is_finite() {
        return Err(format!("{field} must be a finite number"));
    }
    Ok(value)
}

pub(crate) fn require_text(field: &str, raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}
