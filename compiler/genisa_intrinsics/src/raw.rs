//! Raw table rows, exactly as they appear in the external table.
//!
//! The table is a JSON object mapping intrinsic names to
//! `[return, [params...], "flags"]`. Rows keep document order, and
//! repeated names are kept so the loader can reject them. A row that does
//! not have the row shape is kept as its error message, so the loader can
//! report it against the row's name.

use std::fmt;

use genisa_types::{parse_type, TypeParseError, TypeSpec};
use serde::de::{MapAccess, Visitor};
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One type token: a type name or a back-reference index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawToken {
    Index(u32),
    Name(String),
}

impl RawToken {
    /// Parse into a type specification.
    pub fn to_spec(&self) -> Result<TypeSpec, TypeParseError> {
        match self {
            RawToken::Index(index) => Ok(TypeSpec::MatchRef(*index)),
            RawToken::Name(name) => parse_type(name),
        }
    }
}

impl From<TypeSpec> for RawToken {
    fn from(spec: TypeSpec) -> Self {
        match spec {
            TypeSpec::MatchRef(index) => RawToken::Index(index),
            other => RawToken::Name(other.to_string()),
        }
    }
}

impl From<&str> for RawToken {
    fn from(name: &str) -> Self {
        RawToken::Name(name.to_owned())
    }
}

impl From<u32> for RawToken {
    fn from(index: u32) -> Self {
        RawToken::Index(index)
    }
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawToken::Index(index) => write!(f, "{index}"),
            RawToken::Name(name) => f.write_str(name),
        }
    }
}

/// Return entry: a single token or a list for multi-value returns.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawReturn {
    Single(RawToken),
    Multi(Vec<RawToken>),
}

impl From<RawToken> for RawReturn {
    fn from(token: RawToken) -> Self {
        RawReturn::Single(token)
    }
}

impl From<&str> for RawReturn {
    fn from(name: &str) -> Self {
        RawReturn::Single(name.into())
    }
}

impl From<Vec<RawToken>> for RawReturn {
    fn from(tokens: Vec<RawToken>) -> Self {
        RawReturn::Multi(tokens)
    }
}

type RowTuple = (RawReturn, Vec<RawToken>, String);

/// One signature row: `[return, [params...], "flags"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RowTuple", into = "RowTuple")]
pub struct RawRow {
    pub ret: RawReturn,
    pub params: Vec<RawToken>,
    pub properties: String,
}

impl RawRow {
    pub fn new(
        ret: impl Into<RawReturn>,
        params: impl IntoIterator<Item = RawToken>,
        properties: &str,
    ) -> Self {
        RawRow {
            ret: ret.into(),
            params: params.into_iter().collect(),
            properties: properties.to_owned(),
        }
    }
}

impl From<RowTuple> for RawRow {
    fn from((ret, params, properties): RowTuple) -> Self {
        RawRow {
            ret,
            params,
            properties,
        }
    }
}

impl From<RawRow> for RowTuple {
    fn from(row: RawRow) -> Self {
        (row.ret, row.params, row.properties)
    }
}

/// The external table: named rows in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    /// `Err` holds the reason a row could not be read as a row.
    rows: Vec<(String, Result<RawRow, String>)>,
}

impl RawTable {
    pub fn new() -> Self {
        RawTable { rows: Vec::new() }
    }

    /// Parse the JSON form of the table.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn push(&mut self, name: impl Into<String>, row: RawRow) {
        self.rows.push((name.into(), Ok(row)));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in document order; a misshapen row yields its error message.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Result<&RawRow, &str>)> {
        self.rows
            .iter()
            .map(|(name, row)| (name.as_str(), row.as_ref().map_err(String::as_str)))
    }
}

impl<N: Into<String>> FromIterator<(N, RawRow)> for RawTable {
    fn from_iter<I: IntoIterator<Item = (N, RawRow)>>(iter: I) -> Self {
        RawTable {
            rows: iter
                .into_iter()
                .map(|(name, row)| (name.into(), Ok(row)))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for RawTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RawTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of intrinsic names to signature rows")
            }

            fn visit_map<A>(self, mut map: A) -> Result<RawTable, A::Error>
            where
                A: MapAccess<'de>,
            {
                // Not a HashMap: repeated keys must survive to the loader.
                let mut rows = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, serde_json::Value>()? {
                    let row = RawRow::deserialize(value).map_err(|err| err.to_string());
                    rows.push((name, row));
                }
                Ok(RawTable { rows })
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

impl Serialize for RawTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (name, row) in &self.rows {
            let row = row
                .as_ref()
                .map_err(|message| S::Error::custom(format!("row `{name}`: {message}")))?;
            map.serialize_entry(name, row)?;
        }
        map.end()
    }
}
