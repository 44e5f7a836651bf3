//! Path parsing
//!
//! Remote paths have the format: account/container[/object]
//! Object names may themselves contain `/`.

use crate::error::{Error, Result};

/// A parsed path pointing at a container or an object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    /// Account name
    pub account: String,
    /// Container name
    pub container: String,
    /// Object name (empty for the container itself)
    pub object: String,
}

impl RemotePath {
    /// Create a new RemotePath
    pub fn new(
        account: impl Into<String>,
        container: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            container: container.into(),
            object: object.into(),
        }
    }

    /// Whether the path names a container rather than an object
    pub fn is_container(&self) -> bool {
        self.object.is_empty()
    }

    /// Get the full path as a string (account/container/object)
    pub fn to_full_path(&self) -> String {
        if self.object.is_empty() {
            format!("{}/{}", self.account, self.container)
        } else {
            format!("{}/{}/{}", self.account, self.container, self.object)
        }
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_full_path())
    }
}

/// Parse a path string into a RemotePath
pub fn parse_path(path: &str) -> Result<RemotePath> {
    if path.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }

    let parts: Vec<&str> = path.splitn(3, '/').collect();

    let (account, container, object) = match parts.as_slice() {
        [account, container] => (*account, *container, ""),
        [account, container, object] => (*account, *container, *object),
        _ => {
            return Err(Error::InvalidPath(format!(
                "Path '{path}' is incomplete. Use format: account/container[/object]"
            )));
        }
    };

    if !is_valid_account_name(account) {
        return Err(Error::InvalidPath(format!(
            "Invalid account name '{account}'"
        )));
    }

    if container.is_empty() {
        return Err(Error::InvalidPath("Container name cannot be empty".into()));
    }

    Ok(RemotePath::new(account, container, object))
}

/// Check if a string is a valid account name
pub fn is_valid_account_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_path() {
        let path = parse_path("prod/video/kisscam.mov").unwrap();
        assert_eq!(path.account, "prod");
        assert_eq!(path.container, "video");
        assert_eq!(path.object, "kisscam.mov");
        assert!(!path.is_container());
    }

    #[test]
    fn test_parse_nested_object_path() {
        let path = parse_path("prod/photos/2009/01/cat.jpg").unwrap();
        assert_eq!(path.container, "photos");
        assert_eq!(path.object, "2009/01/cat.jpg");
    }

    #[test]
    fn test_parse_container_path() {
        let path = parse_path("prod/video").unwrap();
        assert_eq!(path.account, "prod");
        assert_eq!(path.container, "video");
        assert!(path.is_container());

        let path = parse_path("prod/video/").unwrap();
        assert!(path.is_container());
    }

    #[test]
    fn test_parse_empty_path() {
        assert!(parse_path("").is_err());
    }

    #[test]
    fn test_parse_account_only() {
        assert!(parse_path("prod").is_err());
        assert!(parse_path("prod/").is_err());
    }

    #[test]
    fn test_parse_invalid_account() {
        let result = parse_path("pr.od/video");
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }

    #[test]
    fn test_remote_path_display() {
        let path = RemotePath::new("prod", "video", "a/b.mov");
        assert_eq!(path.to_string(), "prod/video/a/b.mov");
        assert_eq!(RemotePath::new("prod", "video", "").to_string(), "prod/video");
    }
}
