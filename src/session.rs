
use crate::models::User;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

const TOKEN_COOKIE: &str = "session_token";
const USER_COOKIE: &str = "session_user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    KeyValue,
    Cookie,
}

impl StoreKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "file" | "kv" | "keyvalue" => Some(Self::KeyValue),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::KeyValue => "session.json",
            Self::Cookie => "session.cookie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStore {
    /// JSON document `{ "token": .., "user": .. }`.
    KeyValue(PathBuf),
    /// Cookie-jar style `name=value` lines.
    Cookie(PathBuf),
}

impl SessionStore {
    pub fn in_dir(kind: StoreKind, dir: &Path) -> Self {
        let path = dir.join(kind.file_name());
        match kind {
            StoreKind::KeyValue => Self::KeyValue(path),
            StoreKind::Cookie => Self::Cookie(path),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::KeyValue(path) | Self::Cookie(path) => path,
        }
    }

    pub async fn read(&self) -> Option<StoredSession> {
        let bytes = match fs::read(self.path()).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                error!(path = %self.path().display(), "failed to read session store: {err}");
                return None;
            }
        };

        let parsed = match self {
            Self::KeyValue(_) => serde_json::from_slice::<StoredSession>(&bytes).ok(),
            Self::Cookie(_) => parse_cookie_jar(&String::from_utf8_lossy(&bytes)),
        };
        let session = parsed.filter(|session| !session.token.is_empty());
        if session.is_none() {
            warn!(path = %self.path().display(), "ignoring unreadable session store");
        }
        session
    }

    pub async fn write(&self, session: &StoredSession) -> io::Result<()> {
        let payload = match self {
            Self::KeyValue(_) => serde_json::to_vec_pretty(session)?,
            Self::Cookie(_) => render_cookie_jar(session)?.into_bytes(),
        };
        if let Some(parent) = self.path().parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(self.path(), payload).await
    }

    pub async fn remove(&self) -> io::Result<()> {
        match fs::remove_file(self.path()).await {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

fn render_cookie_jar(session: &StoredSession) -> io::Result<String> {
    let user = serde_json::to_vec(&session.user)?;
    Ok(format!(
        "# sick_days session\n{TOKEN_COOKIE}={}\n{USER_COOKIE}={}\n",
        session.token,
        URL_SAFE_NO_PAD.encode(user)
    ))
}

fn parse_cookie_jar(text: &str) -> Option<StoredSession> {
    let mut token = None;
    let mut user = None;
    for line in text.lines().map(str::trim) {
        if line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((TOKEN_COOKIE, value)) => token = Some(value.to_string()),
            Some((USER_COOKIE, value)) => {
                let decoded = URL_SAFE_NO_PAD.decode(value).ok()?;
                user = Some(serde_json::from_slice::<User>(&decoded).ok()?);
            }
            _ => {}
        }
    }
    Some(StoredSession {
        token: token?,
        user: user?,
    })
}

#[derive(Debug, Clone)]
pub struct Session {
    stores: Vec<SessionStore>,
    current: Option<StoredSession>,
}

impl Session {
    pub fn new(stores: Vec<SessionStore>) -> Self {
        Self {
            stores,
            current: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|session| &session.user)
    }

    pub async fn load(&mut self) -> Option<&StoredSession> {
        self.current = None;
        for store in &self.stores {
            if let Some(session) = store.read().await {
                info!(path = %store.path().display(), "restored session");
                self.current = Some(session);
                break;
            }
        }
        self.current.as_ref()
    }

    /// Writes every store. Fails only when no store accepted the session;
    /// the in-memory session is set either way.
    pub async fn persist(&mut self, token: String, user: User) -> io::Result<()> {
        let session = StoredSession { token, user };
        let mut written = 0usize;
        let mut last_err = None;
        for store in &self.stores {
            match store.write(&session).await {
                Ok(()) => written += 1,
                Err(err) => {
                    error!(path = %store.path().display(), "failed to persist session: {err}");
                    last_err = Some(err);
                }
            }
        }
        self.current = Some(session);
        match last_err {
            Some(err) if written == 0 => Err(err),
            _ => Ok(()),
        }
    }

    pub async fn clear(&mut self) {
        self.current = None;
        for store in &self.stores {
            if let Err(err) = store.remove().await {
                error!(path = %store.path().display(), "failed to clear session store: {err}");
            }
        }
    }
}
