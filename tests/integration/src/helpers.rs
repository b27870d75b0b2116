//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, seeding users and sessions,
//! making HTTP requests and opening realtime sockets.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use social_api::{create_app, create_app_state};
use social_common::AppConfig;
use social_db::PgPool;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use uuid::Uuid;

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A seeded user with a live session
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let state = create_app_state(config).await?;
        let pool = state.pool().clone();
        let app = create_app(state);

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            pool,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Insert a user and a session for it
    pub async fn seed_user(&self, profile_public: bool) -> Result<TestUser> {
        let suffix = crate::fixtures::unique_suffix();
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (firstname, lastname, profile_public)
            VALUES ($1, $2, $3)
            RETURNING user_id
            ",
        )
        .bind(format!("Test{suffix}"))
        .bind("User")
        .bind(profile_public)
        .fetch_one(&self.pool)
        .await?;

        let token = Uuid::new_v4().simple().to_string();
        sqlx::query(
            r"
            INSERT INTO sessions (session_key, user_id, expires_at)
            VALUES ($1, $2, NOW() + INTERVAL '1 hour')
            ",
        )
        .bind(&token)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(TestUser { id, token })
    }

    /// Id of the newest notification addressed to a user
    pub async fn latest_notification_id(&self, user_id: i64) -> Result<i64> {
        let id = sqlx::query_scalar(
            r"
            SELECT notification_id
            FROM notifications
            WHERE user_id = $1
            ORDER BY notification_id DESC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with a session token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a GET request carrying the session in the cookie
    pub async fn get_cookie(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Cookie", format!("session_token={token}"))
            .send()
            .await?)
    }

    /// Make a POST request with a session token
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).bearer_auth(token).json(body).send().await?)
    }

    /// Make a DELETE request with a session token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).bearer_auth(token).send().await?)
    }

    /// Open a realtime socket authenticated with a session token
    pub async fn connect_socket(&self, path: &str, token: &str) -> Result<TestSocket> {
        let mut request = format!("ws://{}{}", self.addr, path).into_client_request()?;
        request
            .headers_mut()
            .insert("Authorization", format!("Bearer {token}").parse()?);
        let (stream, _) = tokio_tungstenite::connect_async(request).await?;
        Ok(TestSocket { stream })
    }
}

/// Client side of a realtime socket
pub struct TestSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestSocket {
    /// Send a JSON frame
    pub async fn send_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Wait for the next text frame and parse it
    pub async fn recv_json<T: DeserializeOwned>(&mut self, wait: Duration) -> Result<T> {
        loop {
            let frame = tokio::time::timeout(wait, self.stream.next())
                .await?
                .ok_or_else(|| anyhow::anyhow!("Socket closed"))??;
            if let Message::Text(text) = frame {
                return Ok(serde_json::from_str(&text)?);
            }
        }
    }

    /// Close the socket
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    config.realtime.poll_interval_ms = 200;
    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(())
}
