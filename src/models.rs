use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 5;
pub const DEFAULT_SEVERITY: u8 = 1;
pub const MIN_PASSWORD_LEN: usize = 8;

/// One day's recorded health status. `severity` is `Some` exactly when
/// `is_sick` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date_key: String,
    pub date: String,
    pub is_sick: bool,
    pub severity: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub date: String,
    pub is_sick: bool,
    pub severity: Option<u8>,
}

/// User record as the auth service returns it. Unknown fields are kept so
/// the record survives a persist/load cycle intact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(pub Map<String, Value>);

impl User {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct YearsResponse {
    #[serde(default)]
    pub years: Vec<i32>,
}

/// Entries stay untyped until normalization so one bad record cannot fail
/// the whole response.
#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub entries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SaveResponse {
    pub entry: Value,
}

#[derive(Debug, Deserialize)]
pub struct SelectYearRequest {
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct SelectDayRequest {
    pub date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFormRequest {
    pub is_sick: bool,
    #[serde(default)]
    pub severity: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<User>,
}
