use pagehost_common::Color;

use crate::schema::PageHostConfig;

use super::helpers::is_js_identifier_path;

pub(crate) fn validate_theme(errors: &mut Vec<String>, config: &PageHostConfig) {
    let theme = &config.theme;

    if theme.watched_property.trim().is_empty() {
        errors.push("theme.watched_property must not be empty".into());
    }
    if !is_js_identifier_path(&theme.changed_event) {
        errors.push(format!(
            "theme.changed_event = {:?} is not a JavaScript identifier",
            theme.changed_event
        ));
    }
    for (name, value) in [
        ("theme.dark_background", &theme.dark_background),
        ("theme.light_background", &theme.light_background),
    ] {
        if Color::from_hex(value).is_none() {
            errors.push(format!("{name} = {value:?} is not a #rrggbb[aa] color"));
        }
    }
}
