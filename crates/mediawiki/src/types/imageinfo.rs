use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response to a `prop=imageinfo` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfoResponse {
    pub query: ImageInfoQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfoQuery {
    pub pages: BTreeMap<String, ImageInfoPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfoPage {
    #[serde(default)]
    pub title: Option<String>,

    /// Newest revision first.
    #[serde(default)]
    pub imageinfo: Option<Vec<ImageInfo>>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub descriptionurl: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_imageinfo_deserializes_as_none() {
        let resp: ImageInfoResponse = serde_json::from_value(json!({
          "query": {"pages": {"-1": {"ns": 6, "title": "File:Nope.png", "missing": ""}}}
        }))
        .unwrap();
        let page = &resp.query.pages["-1"];
        assert!(page.imageinfo.is_none());
        assert_eq!(page.extra.get("ns"), Some(&json!(6)));
    }
}
