//! Wire format: one UTF-8 JSON line in, one line out.

use serde::{Deserialize, Serialize};

use super::error::{ServerError, ServerResult};
use crate::model::ObjectId;
use crate::query::{DetailResponse, FilterParams, FilterResponse};

/// Request sent by the front-end. Absent fields are treated as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub classifier: Option<String>,
    /// Agent name substring.
    #[serde(default)]
    pub agt: Option<String>,
    /// Department name substring.
    #[serde(default)]
    pub dep: Option<String>,
}

/// Which lookup a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Detail(ObjectId),
    Filter(FilterParams),
}

impl Request {
    /// Decode one request line (the trailing newline is optional).
    pub fn decode(line: &str) -> ServerResult<Self> {
        serde_json::from_str(line.trim_end_matches(['\r', '\n']))
            .map_err(ServerError::MalformedRequest)
    }

    /// A non-null `id` selects the detail lookup; the other fields are then
    /// ignored.
    pub fn route(self) -> Route {
        match self.id {
            Some(id) => Route::Detail(ObjectId(id)),
            None => Route::Filter(FilterParams {
                label: self.label,
                classifier: self.classifier,
                agent: self.agt,
                department: self.dep,
            }),
        }
    }
}

/// What gets written back on a connection.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Detail(DetailResponse),
    Filter(FilterResponse),
    /// Plain-text error line.
    Error(String),
}

impl Reply {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Detail(_) => "detail",
            Self::Filter(_) => "filter",
            Self::Error(_) => "error",
        }
    }

    /// Encode as a single newline-terminated line.
    pub fn to_line(&self) -> ServerResult<String> {
        let mut line = match self {
            Self::Detail(response) => {
                serde_json::to_string(response).map_err(ServerError::SerializeFailed)?
            }
            Self::Filter(response) => {
                serde_json::to_string(response).map_err(ServerError::SerializeFailed)?
            }
            Self::Error(message) => message.replace(['\r', '\n'], " "),
        };
        line.push('\n');
        Ok(line)
    }
}
