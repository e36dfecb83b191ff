use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /squad-list`. Absent or `null` fields fall back to zero
/// values and unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SquadListRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub secret: String,
    #[serde(deserialize_with = "null_as_default")]
    pub api_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: i64,
}

impl SquadListRequest {
    /// Decodes the first JSON value in `body`; anything after it is ignored.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        match serde_json::Deserializer::from_slice(body)
            .into_iter::<Self>()
            .next()
        {
            Some(result) => result,
            None => serde_json::from_slice(body),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Latest message preview of a squad. Nothing fills it yet, so every field
/// is `None` and the whole record serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinalChat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squad_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Squad {
    pub squad_id: i64,
    pub name: String,
    pub squad_profile: String,
    pub members: i64,
    pub category: String,
    pub is_private: i64,
    pub admin: i64,
    pub is_admin: i64,
    pub new_messages: i64,
    #[sqlx(skip)]
    pub final_chat: FinalChat,
}

#[derive(Debug, Serialize)]
pub struct SquadListResponse {
    pub success: bool,
    pub msg: &'static str,
    pub data: Vec<Squad>,
}

impl SquadListResponse {
    pub fn new(data: Vec<Squad>) -> Self {
        SquadListResponse {
            success: true,
            msg: "Squad List",
            data,
        }
    }
}
