//! Placeholder substitution

use super::RecipientRecord;

/// Reserved placeholder replaced with the sender's display name
pub const SENDER_NAME_PLACEHOLDER: &str = "{Sender_Name}";

/// Replace every `{field}` in `pattern` with the recipient's value for that field,
/// then any remaining `{Sender_Name}` with `sender_name`.
///
/// Fields are substituted in record order. Placeholders with no matching field are
/// left verbatim. Field names are assumed not to overlap as placeholders; a value
/// that itself contains `{other}` may be rewritten by a later field.
pub fn render(pattern: &str, fields: &RecipientRecord, sender_name: &str) -> String {
    let mut rendered = pattern.to_string();

    for (key, value) in fields.iter() {
        let placeholder = format!("{{{key}}}");

        if rendered.contains(&placeholder) {
            rendered = rendered.replace(&placeholder, value);
        }
    }

    if rendered.contains(SENDER_NAME_PLACEHOLDER) {
        rendered = rendered.replace(SENDER_NAME_PLACEHOLDER, sender_name);
    }

    rendered
}
