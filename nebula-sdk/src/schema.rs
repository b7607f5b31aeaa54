// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema DDL construction
//!
//! Pure functions that assemble `CREATE SPACE`, `CREATE TAG` and
//! `CREATE EDGE` statements, plus fluent specs on top of them.
//! Nothing here touches the network.
//!
//! ```no_run
//! use nebula_sdk::SchemaSpec;
//!
//! let ddl = SchemaSpec::tag("player")
//!     .if_not_exists()
//!     .field("name", "string")
//!     .field("age", "int")
//!     .build()?;
//!
//! assert_eq!(ddl, "CREATE TAG IF NOT EXISTS player(name string, age int);");
//! # Ok::<(), nebula_sdk::Error>(())
//! ```

use crate::error::{Error, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PARTITION_NUM: u32 = 100;
pub const DEFAULT_REPLICA_FACTOR: u32 = 3;
pub const DEFAULT_CHARSET: &str = "utf8";
pub const DEFAULT_COLLATE: &str = "utf8_bin";

/// Ordered `field name -> type clause` mapping
pub type Fields = IndexMap<String, String>;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*|`[^`]+`)$").expect("identifier pattern is valid")
});

/// Kind of schema object a DDL statement creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Space,
    Tag,
    Edge,
}

impl SchemaKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            SchemaKind::Space => "SPACE",
            SchemaKind::Tag => "TAG",
            SchemaKind::Edge => "EDGE",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for SchemaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPACE" => Ok(SchemaKind::Space),
            "TAG" => Ok(SchemaKind::Tag),
            "EDGE" => Ok(SchemaKind::Edge),
            _ => Err(Error::Builder(format!("unknown schema kind: {:?}", s))),
        }
    }
}

/// Check that `name` can be used unquoted (or back-quoted) in a statement
pub fn validate_identifier(what: &str, name: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(Error::Builder(format!("invalid {} name: {:?}", what, name)))
    }
}

/// Build a `CREATE SPACE` statement
///
/// `0` partitions or replicas and an empty charset or collate mean "unset"
/// and fall back to 100, 3, `utf8` and `utf8_bin`.
pub fn build_create_space_ddl(
    name: &str,
    if_not_exists: bool,
    partitions: u32,
    replicas: u32,
    charset: &str,
    collate: &str,
) -> Result<String> {
    validate_identifier("space", name)?;

    let partitions = if partitions == 0 {
        DEFAULT_PARTITION_NUM
    } else {
        partitions
    };
    let replicas = if replicas == 0 {
        DEFAULT_REPLICA_FACTOR
    } else {
        replicas
    };
    let charset = if charset.is_empty() {
        DEFAULT_CHARSET
    } else {
        charset
    };
    let collate = if collate.is_empty() {
        DEFAULT_COLLATE
    } else {
        collate
    };
    validate_identifier("charset", charset)?;
    validate_identifier("collate", collate)?;

    let mut ddl = String::from("CREATE SPACE ");
    if if_not_exists {
        ddl.push_str("IF NOT EXISTS ");
    }
    ddl.push_str(&format!(
        "{} (partition_num = {}, replica_factor = {}, charset = {}, collate = {});",
        name, partitions, replicas, charset, collate
    ));
    Ok(ddl)
}

/// Build a `CREATE TAG` or `CREATE EDGE` statement
///
/// Fields are emitted in map order. With no fields the parenthesized list
/// is left out. `options` is appended after the field list when non-empty.
pub fn build_create_tag_or_edge_ddl(
    kind: SchemaKind,
    name: &str,
    if_not_exists: bool,
    fields: &Fields,
    options: &str,
) -> Result<String> {
    if kind == SchemaKind::Space {
        return Err(Error::Builder(
            "CREATE SPACE is built with build_create_space_ddl".to_string(),
        ));
    }
    validate_identifier(&kind.keyword().to_ascii_lowercase(), name)?;

    let mut ddl = format!("CREATE {} ", kind.keyword());
    if if_not_exists {
        ddl.push_str("IF NOT EXISTS ");
    }
    ddl.push_str(name);

    if !fields.is_empty() {
        let mut clauses = Vec::with_capacity(fields.len());
        for (field, type_clause) in fields {
            validate_identifier("field", field)?;
            let type_clause = type_clause.trim();
            if type_clause.is_empty() {
                return Err(Error::Builder(format!(
                    "field {:?} has an empty type",
                    field
                )));
            }
            clauses.push(format!("{} {}", field, type_clause));
        }
        ddl.push('(');
        ddl.push_str(&clauses.join(", "));
        ddl.push(')');
    }

    let options = options.trim();
    if !options.is_empty() {
        ddl.push(' ');
        ddl.push_str(options);
    }

    ddl.push(';');
    Ok(ddl)
}

/// Fluent `CREATE SPACE` request
///
/// Unset settings use the server-side defaults the SDK assumes: 100
/// partitions, 3 replicas, `utf8` / `utf8_bin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceSpec {
    name: String,
    if_not_exists: bool,
    partitions: Option<u32>,
    replicas: Option<u32>,
    charset: Option<String>,
    collate: Option<String>,
}

impl SpaceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        SpaceSpec {
            name: name.into(),
            if_not_exists: false,
            partitions: None,
            replicas: None,
            charset: None,
            collate: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn partitions(mut self, n: u32) -> Self {
        self.partitions = Some(n);
        self
    }

    pub fn replicas(mut self, n: u32) -> Self {
        self.replicas = Some(n);
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn collate(mut self, collate: impl Into<String>) -> Self {
        self.collate = Some(collate.into());
        self
    }

    /// Build the statement without executing it
    ///
    /// An explicitly set zero count or empty charset/collate is rejected
    /// rather than treated as unset.
    pub fn build(&self) -> Result<String> {
        if self.partitions == Some(0) {
            return Err(Error::Builder("partitions must be at least 1".to_string()));
        }
        if self.replicas == Some(0) {
            return Err(Error::Builder("replicas must be at least 1".to_string()));
        }
        if self.charset.as_deref() == Some("") {
            return Err(Error::Builder("charset must not be empty".to_string()));
        }
        if self.collate.as_deref() == Some("") {
            return Err(Error::Builder("collate must not be empty".to_string()));
        }

        build_create_space_ddl(
            &self.name,
            self.if_not_exists,
            self.partitions.unwrap_or(0),
            self.replicas.unwrap_or(0),
            self.charset.as_deref().unwrap_or(""),
            self.collate.as_deref().unwrap_or(""),
        )
    }
}

/// Fluent `CREATE TAG` / `CREATE EDGE` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSpec {
    kind: SchemaKind,
    name: String,
    if_not_exists: bool,
    fields: Fields,
    options: String,
}

impl SchemaSpec {
    /// Start a tag (vertex type) definition
    pub fn tag(name: impl Into<String>) -> Self {
        Self::with_kind(SchemaKind::Tag, name)
    }

    /// Start an edge type definition
    pub fn edge(name: impl Into<String>) -> Self {
        Self::with_kind(SchemaKind::Edge, name)
    }

    fn with_kind(kind: SchemaKind, name: impl Into<String>) -> Self {
        SchemaSpec {
            kind,
            name: name.into(),
            if_not_exists: false,
            fields: Fields::new(),
            options: String::new(),
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Add a property
    ///
    /// Fields keep the order they were added in. Adding a name twice
    /// replaces its type but keeps its original position.
    pub fn field(mut self, name: impl Into<String>, type_clause: impl Into<String>) -> Self {
        self.fields.insert(name.into(), type_clause.into());
        self
    }

    /// Add several properties in iteration order
    pub fn with_fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, type_clause) in fields {
            self.fields.insert(name.into(), type_clause.into());
        }
        self
    }

    /// Trailing clause such as `TTL_DURATION = 100, TTL_COL = "created"`
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    /// Build the statement without executing it
    pub fn build(&self) -> Result<String> {
        build_create_tag_or_edge_ddl(
            self.kind,
            &self.name,
            self.if_not_exists,
            &self.fields,
            &self.options,
        )
    }
}
