use crate::header::{keyword::Keyword, value::HeaderValue};

/// One keyword/value/comment entry of a header.
#[derive(Clone, PartialEq, Debug)]
pub struct HeaderRecord {
    /// The keyword identifying this record
    pub keyword: Keyword,
    /// The record value
    pub value: HeaderValue,
    /// Optional free-text comment
    pub comment: Option<String>,
}

impl HeaderRecord {
    /// Create a new record
    #[must_use]
    pub fn new(keyword: Keyword, value: HeaderValue, comment: Option<String>) -> Self {
        HeaderRecord {
            keyword,
            value,
            comment,
        }
    }
}

impl std::fmt::Display for HeaderRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<8}= {}", self.keyword, self.value)?;
        if let Some(comment) = &self.comment {
            write!(f, " / {comment}")?;
        }
        Ok(())
    }
}
