use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::error::ApiError;

/// Receives the single user-visible notification each terminal failure
/// produces. Injected into the client so hosts can route messages to their
/// own surface.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Invoked when the backend reports application code 401. Owns whatever
/// session teardown the host needs; the client only calls it.
pub trait SessionSink: Send + Sync {
    fn invalidate(&self);
}

/// Default notifier: logs through `tracing` instead of showing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Default session sink for hosts without session handling.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSession;

impl SessionSink for NoopSession {
    fn invalidate(&self) {}
}

/// Map a backend status code to a user-facing message. The server-provided
/// text always wins; the fixed strings only cover codes the server left
/// unexplained.
pub(crate) fn resolve_error_message(code: i64, message: Option<&str>) -> String {
    if let Some(message) = message {
        return message.to_string();
    }
    match code {
        401 => "login expired, please sign in again".to_string(),
        403 => "request was refused".to_string(),
        404 => "requested resource does not exist".to_string(),
        500 => "server error".to_string(),
        _ => format!("[{code}]: unknown error"),
    }
}

/// Map a completed HTTP exchange onto the `{code, msg, data}` envelope rules.
///
/// Bodies carrying a `code` field are explicit envelopes: 200 means success
/// and the whole envelope is returned so callers keep access to `data` and
/// `msg`. Bodies without a `code` field are implicit successes and get
/// wrapped so callers still find a uniform `"data"` key. Both shapes exist
/// in the backend today; neither path may be collapsed into the other.
///
/// Every failure notifies exactly once; envelope code 401 additionally
/// invalidates the session.
pub fn normalize(
    status: StatusCode,
    body: Value,
    notifier: &dyn Notifier,
    session: &dyn SessionSink,
) -> Result<Value, ApiError> {
    if let Some(code_field) = body.get("code") {
        let code = code_field
            .as_i64()
            .unwrap_or_else(|| i64::from(status.as_u16()));
        if code == 200 {
            return Ok(body);
        }

        let server_msg = body.get("msg").and_then(Value::as_str);
        let message = resolve_error_message(code, server_msg);
        notifier.error(&message);
        if code == 401 {
            session.invalidate();
        }
        return Err(ApiError::Envelope { code, message });
    }

    if status.is_success() {
        return Ok(json!({ "data": body }));
    }

    let code = i64::from(status.as_u16());
    let message = resolve_error_message(code, body.as_str().or(status.canonical_reason()));
    notifier.error(&message);
    Err(ApiError::Envelope { code, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct Recorder {
        messages: Mutex<Vec<String>>,
        invalidated: AtomicBool,
    }

    impl Notifier for Recorder {
        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    impl SessionSink for Recorder {
        fn invalidate(&self) {
            self.invalidated.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn envelope_with_code_200_returns_whole_envelope() {
        let recorder = Recorder::default();
        let body = json!({"code": 200, "data": {"x": 1}});
        let result = normalize(StatusCode::OK, body.clone(), &recorder, &recorder);
        assert_eq!(result.unwrap(), body);
        assert!(recorder.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn envelope_with_error_code_fails_with_server_message() {
        let recorder = Recorder::default();
        let body = json!({"code": 403, "msg": "nope"});
        let err = normalize(StatusCode::OK, body, &recorder, &recorder).unwrap_err();
        match err {
            ApiError::Envelope { code, message } => {
                assert_eq!(code, 403);
                // The server's own text beats the fixed fallback string.
                assert_eq!(message, "nope");
            }
            other => panic!("expected envelope error, got {other:?}"),
        }
        assert_eq!(recorder.messages.lock().unwrap()[0], "nope");
        // Exactly one notification per terminal failure.
        assert_eq!(recorder.messages.lock().unwrap().len(), 1);
        assert!(!recorder.invalidated.load(Ordering::SeqCst));
    }

    #[test]
    fn body_without_code_is_wrapped() {
        let recorder = Recorder::default();
        let result = normalize(StatusCode::OK, json!({"x": 1}), &recorder, &recorder);
        assert_eq!(result.unwrap(), json!({"data": {"x": 1}}));
    }

    #[test]
    fn code_401_invalidates_session() {
        let recorder = Recorder::default();
        let body = json!({"code": 401, "msg": "token expired"});
        let err = normalize(StatusCode::OK, body, &recorder, &recorder).unwrap_err();
        match err {
            ApiError::Envelope { code, message } => {
                assert_eq!(code, 401);
                assert_eq!(message, "token expired");
            }
            other => panic!("expected envelope error, got {other:?}"),
        }
        assert!(recorder.invalidated.load(Ordering::SeqCst));
    }

    #[test]
    fn non_success_status_without_envelope_uses_http_status() {
        let recorder = Recorder::default();
        let err = normalize(
            StatusCode::BAD_GATEWAY,
            Value::String("upstream down".to_string()),
            &recorder,
            &recorder,
        )
        .unwrap_err();
        match err {
            ApiError::Envelope { code, message } => {
                assert_eq!(code, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected envelope error, got {other:?}"),
        }
    }

    #[test]
    fn server_message_wins_over_fixed_fallbacks() {
        assert_eq!(resolve_error_message(403, Some("nope")), "nope");
        assert_eq!(resolve_error_message(404, Some("gone for good")), "gone for good");
        assert_eq!(resolve_error_message(42, Some("custom")), "custom");
    }

    #[test]
    fn fixed_messages_cover_unexplained_codes() {
        assert_eq!(resolve_error_message(401, None), "login expired, please sign in again");
        assert_eq!(resolve_error_message(403, None), "request was refused");
        assert_eq!(resolve_error_message(404, None), "requested resource does not exist");
        assert_eq!(resolve_error_message(500, None), "server error");
        assert_eq!(resolve_error_message(42, None), "[42]: unknown error");
    }
}
