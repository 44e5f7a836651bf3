//! Container listing formats
//!
//! The storage service lists a container either as plain text, one object
//! name per line, or as XML when `format=xml` is requested.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for container listings
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Maximum number of names to return
    pub limit: Option<u32>,

    /// Return names strictly after this one
    pub marker: Option<String>,

    /// Only return names starting with this prefix
    pub prefix: Option<String>,

    /// Only return objects directly under this pseudo-directory
    pub path: Option<String>,
}

impl ListOptions {
    /// Render the options as a query string, without the leading `?`
    pub fn to_query(&self, xml: bool) -> String {
        let mut params = Vec::new();
        if xml {
            params.push("format=xml".to_string());
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }
        if let Some(marker) = &self.marker {
            params.push(format!("marker={}", urlencoding::encode(marker)));
        }
        if let Some(prefix) = &self.prefix {
            params.push(format!("prefix={}", urlencoding::encode(prefix)));
        }
        if let Some(path) = &self.path {
            params.push(format!("path={}", urlencoding::encode(path)));
        }
        params.join("&")
    }
}

/// One entry of a detailed listing
///
/// Values are kept as the service sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectDetail {
    pub bytes: String,
    pub hash: String,
    pub content_type: String,
    pub last_modified: String,
}

/// Root of an XML listing; elements other than `<object>` (such as
/// `<subdir>` in pseudo-directory listings) may sit between objects and
/// are skipped
#[derive(Debug, Deserialize)]
struct XmlListing {
    #[serde(rename = "object", default)]
    objects: Vec<XmlObject>,
}

#[derive(Debug, Deserialize)]
struct XmlObject {
    name: String,
    #[serde(default)]
    bytes: String,
    #[serde(default)]
    hash: String,
    #[serde(default)]
    content_type: String,
    #[serde(default)]
    last_modified: String,
}

impl XmlObject {
    fn into_entry(self) -> (String, ObjectDetail) {
        let detail = ObjectDetail {
            bytes: self.bytes,
            hash: self.hash,
            content_type: self.content_type,
            last_modified: self.last_modified,
        };
        (self.name, detail)
    }
}

/// Parse a plain listing body into object names, keeping server order
pub fn parse_names(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an XML listing body into a map from object name to detail
pub fn parse_detail(body: &str) -> Result<BTreeMap<String, ObjectDetail>> {
    if body.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let listing: XmlListing = quick_xml::de::from_str(body)
        .map_err(|e| Error::invalid_response(200, format!("malformed listing: {e}")))?;

    Ok(listing
        .objects
        .into_iter()
        .map(XmlObject::into_entry)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_OBJECTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
    <container name="video">
    <object><name>kisscam.mov</name><hash>96efd5a0d78b74cfe2a911c479b98ddd</hash><bytes>9196332</bytes><content_type>video/quicktime</content_type><last_modified>2008-12-18T10:34:43.867648</last_modified></object>
    <object><name>penaltybox.mov</name><hash>d2a4c0c24d8a7b4e935bee23080e0685</hash><bytes>24944966</bytes><content_type>video/quicktime</content_type><last_modified>2008-12-18T10:35:19.273927</last_modified></object>
    </container>
    "#;

    #[test]
    fn test_parse_names() {
        let names = parse_names("foo\nbar\nbaz");
        assert_eq!(names, vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn test_parse_names_drops_empty_lines() {
        let names = parse_names("foo\n\nbar\n");
        assert_eq!(names, vec!["foo", "bar"]);
        assert!(parse_names("").is_empty());
    }

    #[test]
    fn test_parse_detail() {
        let details = parse_detail(TWO_OBJECTS).unwrap();
        assert_eq!(details.len(), 2);

        let kisscam = &details["kisscam.mov"];
        assert_eq!(kisscam.bytes, "9196332");
        assert_eq!(kisscam.hash, "96efd5a0d78b74cfe2a911c479b98ddd");
        assert_eq!(kisscam.content_type, "video/quicktime");
        assert_eq!(kisscam.last_modified, "2008-12-18T10:34:43.867648");
        assert_eq!(details["penaltybox.mov"].bytes, "24944966");
    }

    #[test]
    fn test_parse_detail_empty() {
        assert!(parse_detail("").unwrap().is_empty());
        assert!(parse_detail("<container name=\"empty\"></container>")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_detail_skips_subdirs() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
        <container name="photos">
        <object><name>photos/a.jpg</name><bytes>10</bytes></object>
        <subdir name="photos/2009/"><name>photos/2009/</name></subdir>
        <object><name>photos/b &amp; c.jpg</name><bytes>20</bytes></object>
        </container>"#;

        let details = parse_detail(body).unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details["photos/a.jpg"].bytes, "10");
        assert_eq!(details["photos/b & c.jpg"].bytes, "20");
        assert!(!details.contains_key("photos/2009/"));
    }

    #[test]
    fn test_parse_detail_malformed() {
        let result = parse_detail("<container><object><hash>abc</hash></object></container>");
        assert!(matches!(result, Err(Error::InvalidResponse { .. })));
    }

    #[test]
    fn test_list_options_query() {
        assert_eq!(ListOptions::default().to_query(false), "");
        assert_eq!(ListOptions::default().to_query(true), "format=xml");

        let options = ListOptions {
            limit: Some(10),
            marker: Some("b".into()),
            prefix: Some("photos/2009 ".into()),
            path: None,
        };
        assert_eq!(
            options.to_query(true),
            "format=xml&limit=10&marker=b&prefix=photos%2F2009%20"
        );
    }
}
