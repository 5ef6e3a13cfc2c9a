//! JSON Pointer (RFC 6901) locations inside the schema document.
//!
//! Every walked node carries its pointer so that an `InvalidSchema` error can
//! name the exact node that broke generation.

use std::fmt;

/// Location of a node, e.g. `/order/request/body/items/0`.
///
/// The root is the empty pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pointer(String);

impl Pointer {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the pointer to `segment` below `self`.
    ///
    /// Escaping rules: `~` -> `~0`, `/` -> `~1`
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut path: String = String::with_capacity(self.0.len() + segment.len() + 1);
        path.push_str(&self.0);
        path.push('/');
        for c in segment.chars() {
            match c {
                '~' => path.push_str("~0"),
                '/' => path.push_str("~1"),
                other => path.push(other),
            }
        }
        Self(path)
    }

    /// Pointer to a list element.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        assert_eq!("", Pointer::root().as_str());
    }

    #[test]
    fn nested_document_path() {
        let actual: Pointer = Pointer::root()
            .child("order")
            .child("request")
            .child("body")
            .child("items")
            .index(0);
        assert_eq!("/order/request/body/items/0", actual.as_str());
    }

    #[test]
    fn status_code_segment() {
        let actual: Pointer = Pointer::root().child("user").child("response").child("404");
        assert_eq!("/user/response/404", actual.to_string());
    }

    #[test]
    fn segment_with_slash_is_escaped() {
        assert_eq!("/a~1b", Pointer::root().child("a/b").as_str());
    }

    #[test]
    fn segment_with_tilde_is_escaped() {
        assert_eq!("/a~0b", Pointer::root().child("a~b").as_str());
    }

    #[test]
    fn tilde_escaped_before_slash_sequence() {
        // "~1" literally must not be read back as "/"
        assert_eq!("/~01", Pointer::root().child("~1").as_str());
    }

    #[test]
    fn empty_segment_produces_slash() {
        assert_eq!("/", Pointer::root().child("").as_str());
    }
}
