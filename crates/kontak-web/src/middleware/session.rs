//! Cookie sessions and one-shot flash storage.
//!
//! [`SessionLayer`] resolves the visitor's session from a signed cookie (or
//! starts a new one), inserts a [`Session`] handle into request extensions,
//! and refreshes the cookie on the way out. Handlers pull the handle with
//! `Extension<Session>` and use [`Session::set_flash`] /
//! [`Session::take_flash`].
//!
//! Session state lives in process memory. A session expires after the
//! configured max age without a request; expired entries are purged whenever
//! a session is resolved.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::body::Body;
use axum::response::IntoResponse;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue, Request};
use kontak_core::Flash;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tower::{Layer, Service};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "kontak.sid";

const KEY_CONTEXT: &str = "kontak session cookie v1";

// ============================================================================
// SessionStore
// ============================================================================

struct SessionEntry {
    flash: Option<Flash>,
    expires_at: Instant,
}

struct SessionStoreInner {
    key: [u8; 32],
    max_age: Duration,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

/// Shared in-memory session table.
///
/// Cheap to clone (Arc internals).
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

impl SessionStore {
    /// Create a store whose cookies are signed with a key derived from
    /// `secret`.
    pub fn new(secret: &[u8], max_age: Duration) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                key: blake3::derive_key(KEY_CONTEXT, secret),
                max_age,
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Create a store with a secret generated for this process only.
    pub fn with_random_secret(max_age: Duration) -> Self {
        let secret = format!("{}{}", Uuid::new_v4(), Uuid::new_v4());
        Self::new(secret.as_bytes(), max_age)
    }

    /// Rolling session lifetime.
    pub fn max_age(&self) -> Duration {
        self.inner.max_age
    }

    /// Number of live (possibly not yet purged) sessions.
    pub async fn len(&self) -> usize {
        self.inner.sessions.lock().await.len()
    }

    /// Returns `true` if no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Resume the session named by a verified cookie id, or start a new one.
    ///
    /// Either way the session's expiry is pushed out by the max age.
    pub async fn resume(&self, presented: Option<Uuid>) -> Session {
        let now = Instant::now();
        let expires_at = now + self.inner.max_age;
        let mut sessions = self.inner.sessions.lock().await;
        sessions.retain(|_, entry| entry.expires_at > now);

        let id = match presented {
            Some(id) if sessions.contains_key(&id) => id,
            _ => Uuid::new_v4(),
        };
        sessions
            .entry(id)
            .and_modify(|entry| entry.expires_at = expires_at)
            .or_insert(SessionEntry {
                flash: None,
                expires_at,
            });

        Session {
            id,
            store: self.clone(),
        }
    }

    /// Cookie value for a session id: the id and its keyed BLAKE3 MAC.
    pub fn sign(&self, id: &Uuid) -> String {
        let mac = blake3::keyed_hash(&self.inner.key, id.as_bytes());
        format!("{id}.{}", mac.to_hex())
    }

    /// Recover the session id from a cookie value, rejecting forgeries.
    pub fn verify(&self, value: &str) -> Option<Uuid> {
        let (id, mac) = value.split_once('.')?;
        let id = Uuid::parse_str(id).ok()?;
        let mac = blake3::Hash::from_hex(mac).ok()?;
        // blake3::Hash equality is constant time
        (blake3::keyed_hash(&self.inner.key, id.as_bytes()) == mac).then_some(id)
    }

    /// `Set-Cookie` header value for a session.
    pub fn cookie_header(&self, id: &Uuid) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.sign(id),
            self.inner.max_age.as_secs()
        )
    }

    async fn set_flash(&self, id: Uuid, flash: Flash) {
        let expires_at = Instant::now() + self.inner.max_age;
        let mut sessions = self.inner.sessions.lock().await;
        let entry = sessions.entry(id).or_insert(SessionEntry {
            flash: None,
            expires_at,
        });
        entry.flash = Some(flash);
    }

    async fn take_flash(&self, id: Uuid) -> Option<Flash> {
        let mut sessions = self.inner.sessions.lock().await;
        sessions.get_mut(&id).and_then(|entry| entry.flash.take())
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("max_age", &self.inner.max_age)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session
// ============================================================================

/// Handle to the current visitor's session.
///
/// Inserted into request extensions by [`SessionLayer`].
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    store: SessionStore,
}

impl Session {
    /// Session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Leave a flash for the next page that reads one, replacing any
    /// unread flash.
    pub async fn set_flash(&self, flash: impl Into<Flash>) {
        self.store.set_flash(self.id, flash.into()).await;
    }

    /// Consume the pending flash. A second call returns `None`.
    pub async fn take_flash(&self) -> Option<Flash> {
        self.store.take_flash(self.id).await
    }
}

// ============================================================================
// Tower middleware
// ============================================================================

/// Tower `Layer` that attaches a [`Session`] to every request.
#[derive(Clone, Debug)]
pub struct SessionLayer {
    store: SessionStore,
}

impl SessionLayer {
    /// Create a session layer backed by `store`.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService {
            inner,
            store: self.store.clone(),
        }
    }
}

/// Tower `Service` produced by [`SessionLayer`].
#[derive(Clone, Debug)]
pub struct SessionService<S> {
    inner: S,
    store: SessionStore,
}

impl<S> Service<Request<Body>> for SessionService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let store = self.store.clone();

        Box::pin(async move {
            let presented = session_cookie(req.headers()).and_then(|value| store.verify(value));
            let session = store.resume(presented).await;
            let cookie = store.cookie_header(&session.id());
            req.extensions_mut().insert(session);

            let mut resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {})
                .into_response();

            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    resp.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(error = %e, "Session cookie is not a valid header"),
            }
            Ok(resp)
        })
    }
}

/// Extract the raw session cookie value from the `Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}
