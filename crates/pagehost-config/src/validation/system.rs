use crate::schema::PageHostConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

pub(crate) fn validate_logging(errors: &mut Vec<String>, config: &PageHostConfig) {
    let level = config.logging.level.as_str();
    if !LOG_LEVELS.contains(&level) {
        errors.push(format!(
            "logging.level = {level:?} must be one of {}",
            LOG_LEVELS.join(", ")
        ));
    }
}
