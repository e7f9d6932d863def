use crate::schema::PageHostConfig;

use super::helpers::{is_js_identifier_path, is_valid_host, is_valid_scheme};

pub(crate) fn validate_page(errors: &mut Vec<String>, config: &PageHostConfig) {
    let page = &config.page;

    if !is_valid_scheme(&page.scheme) {
        errors.push(format!(
            "page.scheme = {:?} must be a lowercase custom scheme (not a standard web scheme)",
            page.scheme
        ));
    }
    if !is_valid_host(&page.host) {
        errors.push(format!("page.host = {:?} is not a valid host label", page.host));
    }
    if page.entry.trim_start_matches('/').is_empty() {
        errors.push("page.entry must not be empty".into());
    }
    if page.entry.split('/').any(|segment| segment == "..") {
        errors.push(format!("page.entry = {:?} must not contain '..'", page.entry));
    }
    if page.assets_dir.is_empty() {
        errors.push("page.assets_dir must not be empty".into());
    }
}

pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &PageHostConfig) {
    let name = &config.bridge.bootstrap_function;
    if !is_js_identifier_path(name) {
        errors.push(format!(
            "bridge.bootstrap_function = {name:?} is not a JavaScript identifier"
        ));
    }
}
