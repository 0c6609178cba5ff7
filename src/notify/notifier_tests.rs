//! Tests for `Notifier`.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeZone};
use http::header::AUTHORIZATION;

use super::notifier::Notifier;
use super::{BasicAuth, HttpClient, HttpError, HttpRequest, HttpResponse, NotifyError};
use crate::config::{Config, ConfigError, MapSource};
use crate::time::Clock;

/// Mock HTTP client that records requests and replays one response.
#[derive(Debug)]
struct MockClient {
    response: Mutex<Option<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn responding(status: u16, body: &str) -> Self {
        let status = http::StatusCode::from_u16(status).unwrap();
        Self::new(Ok(HttpResponse::new(status, body.as_bytes().to_vec())))
    }

    fn accepted() -> Self {
        Self::responding(200, r#"{"id":"abc","event":"message"}"#)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.response
            .lock()
            .unwrap()
            .take()
            .expect("MockClient called more than once")
    }
}

struct FixedClock(DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

fn fixed_clock() -> FixedClock {
    FixedClock(Local.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap())
}

fn notifier(client: MockClient) -> Notifier<MockClient, FixedClock> {
    Notifier::new(client).with_clock(fixed_clock())
}

fn config(content: &str) -> Config {
    let mut config = Config::default();
    config.update(&MapSource::parse(content).unwrap()).unwrap();
    config
}

mod sending {
    use super::*;

    #[tokio::test]
    async fn sends_one_post_with_every_header() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "backups"
            server = "https://ntfy.example.com"
            actions = "view, Open, https://example.com"
            attach = "https://example.com/log.txt"
            click = "https://example.com"
            delay = "30min"
            email = "ops@example.com"
            priority = "high"
            tags = ["warning", "disk"]
            title = "Backup"
            user = "me"
            password = "secret"
            "#,
        );

        notifier.notify(&config, "done").await.unwrap();

        let requests = notifier.client().captured_requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url.as_str(), "https://ntfy.example.com/backups");
        assert_eq!(req.body.as_deref(), Some(b"done".as_slice()));
        assert_eq!(req.headers.len(), 8);
        assert_eq!(req.headers["Actions"], "view, Open, https://example.com");
        assert_eq!(req.headers["Attach"], "https://example.com/log.txt");
        assert_eq!(req.headers["Click"], "https://example.com");
        assert_eq!(req.headers["Delay"], "30min");
        assert_eq!(req.headers["Email"], "ops@example.com");
        assert_eq!(req.headers["Priority"], "high");
        assert_eq!(req.headers["Tags"], "warning,disk");
        assert_eq!(req.headers["Title"], "Backup");
        assert_eq!(req.basic_auth, Some(BasicAuth::new("me", "secret")));
    }

    #[tokio::test]
    async fn default_server_is_used() {
        let notifier = notifier(MockClient::accepted());

        notifier
            .notify(&config(r#"topic = "alerts""#), "hi")
            .await
            .unwrap();

        let req = &notifier.client().captured_requests()[0];
        assert_eq!(req.url.as_str(), "https://ntfy.sh/alerts");
        assert!(req.headers.is_empty());
        assert!(req.basic_auth.is_none());
    }

    #[tokio::test]
    async fn trailing_slash_in_server_is_ignored() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            server = "http://localhost:8080/"
            "#,
        );

        notifier.notify(&config, "hi").await.unwrap();

        let req = &notifier.client().captured_requests()[0];
        assert_eq!(req.url.as_str(), "http://localhost:8080/alerts");
    }

    #[tokio::test]
    async fn any_2xx_is_success() {
        let notifier = notifier(MockClient::responding(202, ""));

        let result = notifier.notify(&config(r#"topic = "t""#), "hi").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn token_is_sent_as_bearer() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            token = "tk_abc"
            "#,
        );

        notifier.notify(&config, "hi").await.unwrap();

        let req = &notifier.client().captured_requests()[0];
        assert_eq!(req.headers[AUTHORIZATION], "Bearer tk_abc");
        assert!(req.basic_auth.is_none());
    }

    #[tokio::test]
    async fn unusable_server_is_a_config_error() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            server = "not a url"
            "#,
        );

        let result = notifier.notify(&config, "hi").await;

        assert!(matches!(
            result,
            Err(NotifyError::Config(ConfigError::InvalidUrl { .. }))
        ));
        assert!(notifier.client().captured_requests().is_empty());
    }
}

mod timestamp {
    use super::*;

    #[tokio::test]
    async fn timestamp_is_prefixed() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            timestamp = "%Y-%m-%d %H:%M"
            "#,
        );

        notifier.notify(&config, "done").await.unwrap();

        let req = &notifier.client().captured_requests()[0];
        assert_eq!(req.body.as_deref(), Some(b"2024-03-05 12:30 done".as_slice()));
    }

    #[tokio::test]
    async fn placeholder_positions_message() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            timestamp = "%message (%H:%M)"
            "#,
        );

        notifier.notify(&config, "done").await.unwrap();

        let req = &notifier.client().captured_requests()[0];
        assert_eq!(req.body.as_deref(), Some(b"done (12:30)".as_slice()));
    }

    #[tokio::test]
    async fn disabled_timestamp_ignores_pattern() {
        let notifier = notifier(MockClient::accepted());
        let mut config = config(
            r#"
            topic = "alerts"
            timestamp = "%Y"
            "#,
        );
        config.include_timestamp = false;

        notifier.notify(&config, "done").await.unwrap();

        let req = &notifier.client().captured_requests()[0];
        assert_eq!(req.body.as_deref(), Some(b"done".as_slice()));
    }
}

mod credentials {
    use super::*;

    #[tokio::test]
    async fn user_without_password_sends_nothing() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            user = "me"
            "#,
        );

        let result = notifier.notify(&config, "hi").await;

        assert!(matches!(
            result,
            Err(NotifyError::Config(ConfigError::PartialCredentials))
        ));
        assert!(notifier.client().captured_requests().is_empty());
    }

    #[tokio::test]
    async fn password_without_user_sends_nothing() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            password = "secret"
            "#,
        );

        let result = notifier.notify(&config, "hi").await;

        assert!(matches!(
            result,
            Err(NotifyError::Config(ConfigError::PartialCredentials))
        ));
        assert!(notifier.client().captured_requests().is_empty());
    }

    #[tokio::test]
    async fn basic_and_token_conflict() {
        let notifier = notifier(MockClient::accepted());
        let config = config(
            r#"
            topic = "alerts"
            user = "me"
            password = "secret"
            token = "tk_abc"
            "#,
        );

        let result = notifier.notify(&config, "hi").await;

        assert!(matches!(
            result,
            Err(NotifyError::Config(ConfigError::ConflictingAuth))
        ));
        assert!(notifier.client().captured_requests().is_empty());
    }

    #[tokio::test]
    async fn missing_topic_sends_nothing() {
        let notifier = notifier(MockClient::accepted());

        let result = notifier.notify(&Config::default(), "hi").await;

        assert!(matches!(
            result,
            Err(NotifyError::Config(ConfigError::MissingRequired { .. }))
        ));
        assert!(notifier.client().captured_requests().is_empty());
    }
}

mod rejection {
    use super::*;

    #[tokio::test]
    async fn json_error_uses_error_and_link() {
        let notifier = notifier(MockClient::responding(
            400,
            r#"{"code":40001,"http":400,"error":"error text","link":"error link"}"#,
        ));
        let config = config(
            r#"
            topic = "alerts"
            server = "http://localhost:8080"
            title = "Backup"
            timestamp = "%Y"
            "#,
        );

        let result = notifier.notify(&config, "done").await;

        let Err(NotifyError::Notification(error)) = &result else {
            panic!("Expected a notification error, got {result:?}");
        };
        assert_eq!(error.message, "error text error link");
        assert_eq!(error.server, "http://localhost:8080");
        assert_eq!(error.topic, "alerts");
        assert_eq!(error.headers["Title"], "Backup");
        assert_eq!(error.sent_message, "2024 done");
        assert_eq!(
            error.to_string(),
            "Error sending to http://localhost:8080/alerts: error text error link"
        );
    }

    #[tokio::test]
    async fn json_error_without_link_is_just_the_error() {
        let notifier = notifier(MockClient::responding(429, r#"{"error":"limit reached"}"#));

        let result = notifier.notify(&config(r#"topic = "t""#), "hi").await;

        let Err(NotifyError::Notification(error)) = &result else {
            panic!("Expected a notification error, got {result:?}");
        };
        assert_eq!(error.message, "limit reached");
    }

    #[tokio::test]
    async fn plain_body_uses_status_and_body() {
        let notifier = notifier(MockClient::responding(500, "content value"));

        let result = notifier.notify(&config(r#"topic = "t""#), "hi").await;

        let Err(NotifyError::Notification(error)) = &result else {
            panic!("Expected a notification error, got {result:?}");
        };
        assert_eq!(error.message, "500 content value");
    }

    #[tokio::test]
    async fn json_without_error_field_uses_status_and_body() {
        let notifier = notifier(MockClient::responding(502, r#"{"detail":"x"}"#));

        let result = notifier.notify(&config(r#"topic = "t""#), "hi").await;

        let Err(NotifyError::Notification(error)) = &result else {
            panic!("Expected a notification error, got {result:?}");
        };
        assert_eq!(error.message, r#"502 {"detail":"x"}"#);
    }

    #[tokio::test]
    async fn transport_failure_is_an_http_error() {
        let notifier = notifier(MockClient::new(Err(HttpError::Timeout)));

        let result = notifier.notify(&config(r#"topic = "t""#), "hi").await;

        assert!(matches!(result, Err(NotifyError::Http(HttpError::Timeout))));
        assert_eq!(notifier.client().captured_requests().len(), 1);
    }
}

mod resolve_credentials {
    use super::*;
    use crate::notify::resolve_credentials;

    #[test]
    fn empty_values_count_as_missing() {
        let config = config(
            r#"
            user = ""
            password = ""
            "#,
        );

        assert_eq!(resolve_credentials(&config).unwrap(), None);
    }

    #[test]
    fn pair_becomes_basic_auth() {
        let config = config(
            r#"
            user = "me"
            password = "secret"
            "#,
        );

        assert_eq!(
            resolve_credentials(&config).unwrap(),
            Some(BasicAuth::new("me", "secret"))
        );
    }

    #[test]
    fn token_alone_is_not_basic_auth() {
        let config = config(r#"token = "tk_abc""#);

        assert_eq!(resolve_credentials(&config).unwrap(), None);
    }
}
