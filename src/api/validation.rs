//! Request field validation.
//!
//! # Checks (first violation wins)
//! ```text
//! 1. body schema has mandatory fields, request has no body   → Missing request body
//! 2. query schema has mandatory fields, request has no query → Missing request query
//! 3. body mandatory fields, in declared order                → Missing mandatory field in request body: <name>
//! 4. body keys outside mandatory ∪ optional (if optional set) → Unrecognized field in request body: <key>
//! 5. steps 3-4 for the query
//! ```
//!
//! # Design Decisions
//! - Absent schema = no constraint on that location
//! - Absent mandatory list = empty list; the closed-set check still runs
//! - Values are never inspected, only key presence

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::error::{ApiError, ApiResult};

/// Field map of a request body or query.
pub type FieldMap = Map<String, Value>;

/// Validation rules for one request location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawFieldSchema", into = "RawFieldSchema")]
pub struct FieldSchema {
    mandatory: Vec<String>,
    mandatory_set: HashSet<String>,
    /// `None` leaves the field set open.
    optional: Option<HashSet<String>>,
}

/// On-disk shape of a schema.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
struct RawFieldSchema {
    mandatory: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional: Option<Vec<String>>,
}

impl From<RawFieldSchema> for FieldSchema {
    fn from(raw: RawFieldSchema) -> Self {
        let schema = FieldSchema::new(raw.mandatory);
        match raw.optional {
            Some(optional) => schema.with_optional(optional),
            None => schema,
        }
    }
}

impl From<FieldSchema> for RawFieldSchema {
    fn from(schema: FieldSchema) -> Self {
        let optional = schema.optional.map(|set| {
            let mut names: Vec<String> = set.into_iter().collect();
            names.sort();
            names
        });
        Self {
            mandatory: schema.mandatory,
            optional,
        }
    }
}

impl FieldSchema {
    /// Schema requiring `mandatory` fields and leaving other fields unchecked.
    pub fn new<I, S>(mandatory: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mandatory: Vec<String> = mandatory.into_iter().map(Into::into).collect();
        let mandatory_set = mandatory.iter().cloned().collect();
        Self {
            mandatory,
            mandatory_set,
            optional: None,
        }
    }

    /// Declare the optional fields, closing the set of accepted fields.
    pub fn with_optional<I, S>(mut self, optional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional = Some(optional.into_iter().map(Into::into).collect());
        self
    }

    pub fn mandatory(&self) -> &[String] {
        &self.mandatory
    }

    pub fn optional(&self) -> Option<&HashSet<String>> {
        self.optional.as_ref()
    }

    pub fn has_mandatory(&self) -> bool {
        !self.mandatory.is_empty()
    }

    /// Whether a present field is accepted by the closed-set check.
    pub fn allows(&self, field: &str) -> bool {
        match &self.optional {
            Some(optional) => self.mandatory_set.contains(field) || optional.contains(field),
            None => true,
        }
    }

    /// Names listed as both mandatory and optional, in mandatory order.
    pub fn overlapping_fields(&self) -> Vec<&str> {
        match &self.optional {
            Some(optional) => self
                .mandatory
                .iter()
                .filter(|name| optional.contains(name.as_str()))
                .map(String::as_str)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Request location a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Query,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Body => write!(f, "body"),
            Location::Query => write!(f, "query"),
        }
    }
}

/// The parts of a request the validator inspects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData {
    body: Option<FieldMap>,
    query: Option<FieldMap>,
}

impl RequestData {
    pub fn new(body: Option<FieldMap>, query: Option<FieldMap>) -> Self {
        Self { body, query }
    }

    pub fn with_body(mut self, body: FieldMap) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: FieldMap) -> Self {
        self.query = Some(query);
        self
    }

    pub fn body(&self) -> Option<&FieldMap> {
        self.body.as_ref()
    }

    pub fn query(&self) -> Option<&FieldMap> {
        self.query.as_ref()
    }

    fn location(&self, location: Location) -> Option<&FieldMap> {
        match location {
            Location::Body => self.body(),
            Location::Query => self.query(),
        }
    }
}

/// Validate a request against optional body and query schemas.
pub fn validate(
    request: &RequestData,
    body_schema: Option<&FieldSchema>,
    query_schema: Option<&FieldSchema>,
) -> ApiResult<()> {
    require_present(request, body_schema, Location::Body)?;
    require_present(request, query_schema, Location::Query)?;

    if let Some(schema) = body_schema {
        check_fields(request.body(), schema, Location::Body)?;
    }
    if let Some(schema) = query_schema {
        check_fields(request.query(), schema, Location::Query)?;
    }
    Ok(())
}

fn require_present(
    request: &RequestData,
    schema: Option<&FieldSchema>,
    location: Location,
) -> ApiResult<()> {
    let required = schema.is_some_and(FieldSchema::has_mandatory);
    if required && request.location(location).is_none() {
        return Err(ApiError::user(format!("Missing request {}", location)));
    }
    Ok(())
}

fn check_fields(fields: Option<&FieldMap>, schema: &FieldSchema, location: Location) -> ApiResult<()> {
    // Only reachable without fields when nothing is mandatory.
    let Some(fields) = fields else {
        return Ok(());
    };

    if let Some(missing) = schema.mandatory.iter().find(|name| !fields.contains_key(name.as_str())) {
        return Err(ApiError::user(format!(
            "Missing mandatory field in request {}: {}",
            location, missing
        )));
    }

    if schema.optional.is_some() {
        if let Some(unknown) = fields.keys().find(|key| !schema.allows(key)) {
            return Err(ApiError::user(format!(
                "Unrecognized field in request {}: {}",
                location, unknown
            )));
        }
    }
    Ok(())
}
