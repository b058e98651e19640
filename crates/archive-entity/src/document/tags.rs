//! Tag set stored as a comma-joined TEXT column.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Database, Decode, Encode, Type};

/// Ordered, de-duplicated list of document tags.
///
/// Serialized as a JSON array; persisted as `tag1,tag2,...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Build a tag set from arbitrary strings, trimming and dropping blanks
    /// and duplicates while keeping first-seen order.
    ///
    /// Commas are the storage separator, so an input holding one becomes
    /// several tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in tags {
            for tag in raw.as_ref().split(',').map(str::trim) {
                if !tag.is_empty() && !out.iter().any(|t| t == tag) {
                    out.push(tag.to_string());
                }
            }
        }
        Self(out)
    }

    /// Parse a comma-separated tag string.
    pub fn parse(raw: &str) -> Self {
        Self::new([raw])
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the tags.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Render the storage form.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl Type<Sqlite> for Tags {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Tags {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as Encode<'q, Sqlite>>::encode(self.joined(), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for Tags {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <String as Decode<'r, Sqlite>>::decode(value)?;
        Ok(Self::parse(&raw))
    }
}
