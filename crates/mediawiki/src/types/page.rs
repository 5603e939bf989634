use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response to a `prop=info|pageprops` identity query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfoResponse {
    pub query: PageInfoQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfoQuery {
    #[serde(default)]
    pub normalized: Vec<TitleMapping>,

    #[serde(default)]
    pub redirects: Vec<TitleMapping>,

    /// Keyed by pageid; missing titles are keyed by negative ids.
    pub pages: BTreeMap<String, PageInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleMapping {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub pageid: Option<u64>,

    #[serde(default)]
    pub ns: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub fullurl: Option<String>,

    // Flags are present (as "") when set and absent otherwise.
    #[serde(default)]
    pub missing: Option<Value>,

    #[serde(default)]
    pub invalid: Option<Value>,

    #[serde(default)]
    pub redirect: Option<Value>,

    #[serde(default)]
    pub pageprops: Option<BTreeMap<String, Value>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PageInfo {
    pub fn is_missing(&self) -> bool {
        self.missing.is_some() || self.invalid.is_some()
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    pub fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .is_some_and(|props| props.contains_key("disambiguation"))
    }
}

/// Response to a `prop=extracts` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub query: ExtractQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractQuery {
    pub pages: BTreeMap<String, ExtractPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractPage {
    #[serde(default)]
    pub extract: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
