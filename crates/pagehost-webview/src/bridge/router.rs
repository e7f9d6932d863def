use std::collections::HashMap;

use pagehost_common::RequestError;
use serde_json::Value;

use crate::ipc::{IpcMessage, IpcPayload};

/// Answers requests posted by the page.
pub trait RequestHandler {
    fn handle(&self, message: &IpcMessage) -> Result<Value, RequestError>;
}

type Route = Box<dyn Fn(&IpcPayload) -> Result<Value, RequestError>>;
type Fallback = Box<dyn Fn(&IpcMessage) -> Result<Value, RequestError>>;

/// [`RequestHandler`] that dispatches on the message kind.
#[derive(Default)]
pub struct RequestRouter {
    routes: HashMap<String, Route>,
    fallback: Option<Fallback>,
}

impl RequestRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register`](Self::register).
    pub fn on<F>(mut self, kind: impl Into<String>, route: F) -> Self
    where
        F: Fn(&IpcPayload) -> Result<Value, RequestError> + 'static,
    {
        self.register(kind, route);
        self
    }

    /// Route `kind` to `route`. Returns `true` if an earlier route was replaced.
    pub fn register<F>(&mut self, kind: impl Into<String>, route: F) -> bool
    where
        F: Fn(&IpcPayload) -> Result<Value, RequestError> + 'static,
    {
        self.routes.insert(kind.into(), Box::new(route)).is_some()
    }

    /// Handle kinds with no explicit route.
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&IpcMessage) -> Result<Value, RequestError> + 'static,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.routes.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.fallback = None;
    }
}

impl RequestHandler for RequestRouter {
    fn handle(&self, message: &IpcMessage) -> Result<Value, RequestError> {
        if let Some(route) = self.routes.get(&message.kind) {
            return route(&message.payload);
        }
        match &self.fallback {
            Some(fallback) => fallback(message),
            None => Err(RequestError::UnknownKind(message.kind.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo(payload: &IpcPayload) -> Result<Value, RequestError> {
        Ok(payload.to_value())
    }

    #[test]
    fn dispatches_by_kind() {
        let router = RequestRouter::new()
            .on("echo", echo)
            .on("ping", |_| Ok(json!("pong")));

        let reply = router.handle(&IpcMessage::text("echo", "hi")).unwrap();
        assert_eq!(reply, json!("hi"));
        let reply = router.handle(&IpcMessage::text("ping", "")).unwrap();
        assert_eq!(reply, json!("pong"));
        assert_eq!(router.kinds(), vec!["echo", "ping"]);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let router = RequestRouter::new().on("echo", echo);
        let err = router.handle(&IpcMessage::text("nope", "")).unwrap_err();
        assert_eq!(err, RequestError::UnknownKind("nope".into()));
    }

    #[test]
    fn fallback_handles_unrouted_kinds() {
        let router = RequestRouter::new().with_fallback(|msg| Ok(json!(msg.kind)));
        assert_eq!(
            router.handle(&IpcMessage::text("anything", "")).unwrap(),
            json!("anything")
        );
    }

    #[test]
    fn register_reports_replacement() {
        let mut router = RequestRouter::new();
        assert!(!router.register("k", echo));
        assert!(router.register("k", |_| Ok(Value::Null)));
        assert!(router.contains("k"));
        router.clear();
        assert!(!router.contains("k"));
    }

    #[test]
    fn route_errors_pass_through() {
        let router = RequestRouter::new().on("fail", |_| {
            Err(RequestError::InvalidPayload("expected object".into()))
        });
        assert!(matches!(
            router.handle(&IpcMessage::text("fail", "")),
            Err(RequestError::InvalidPayload(_))
        ));
    }
}
