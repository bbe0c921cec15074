use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::schema::{Domain, FeatureKind, FeatureSchema};

pub mod record;

pub use record::FeatureRecord;

/// A single user choice. JSON booleans, numbers and strings map onto the
/// three variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Flag(bool),
    Number(f64),
    Choice(String),
}

/// Sparse user choices keyed by attribute name.
pub type Selections = BTreeMap<String, SelectionValue>;

/// Turns sparse selections into complete, schema-conformant records.
pub struct QueryBuilder {
    schema: Arc<FeatureSchema>,
}

impl QueryBuilder {
    pub fn new(schema: Arc<FeatureSchema>) -> Self {
        QueryBuilder { schema }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Starts from the schema defaults and applies every selection.
    ///
    /// Numeric values are clamped into their declared range, a NaN falls back
    /// to the default. Categorical names must belong to the attribute's
    /// vocabulary; there is no silent substitution.
    pub fn build(&self, selections: &Selections) -> Result<FeatureRecord, QueryError> {
        let mut values = self.schema.defaults();

        for (name, selection) in selections {
            let attribute = self
                .schema
                .attribute(name)
                .ok_or_else(|| QueryError::UnknownAttribute(name.clone()))?;

            match attribute.kind {
                FeatureKind::Numeric => {
                    let position = attribute.columns[0];
                    let descriptor = self.schema.descriptor(position);
                    let requested = match selection {
                        SelectionValue::Number(number) => *number,
                        SelectionValue::Flag(flag) => {
                            if *flag {
                                1.0
                            } else {
                                0.0
                            }
                        }
                        SelectionValue::Choice(_) => {
                            return Err(QueryError::InvalidSelection {
                                attribute: name.clone(),
                                expected: "a number",
                            })
                        }
                    };
                    values[position] = within_domain(requested, &descriptor.domain, descriptor.default);
                    if values[position] != requested {
                        tracing::debug!("{}={} adjusted to {}", name, requested, values[position]);
                    }
                }
                FeatureKind::OneHot => {
                    let member = choice(name, selection)?;
                    let chosen = attribute.option_index(member).ok_or_else(|| {
                        QueryError::UnknownCategory {
                            attribute: name.clone(),
                            value: member.to_string(),
                        }
                    })?;
                    for (index, position) in attribute.columns.iter().enumerate() {
                        values[*position] = if index == chosen { 1.0 } else { 0.0 };
                    }
                }
                FeatureKind::LabelEncoded => {
                    let label = choice(name, selection)?;
                    let code = attribute.option_index(label).ok_or_else(|| {
                        QueryError::UnknownCategory {
                            attribute: name.clone(),
                            value: label.to_string(),
                        }
                    })?;
                    values[attribute.columns[0]] = code as f64;
                }
            }
        }

        Ok(FeatureRecord::new(self.schema.shared_keys(), values))
    }
}

fn choice<'a>(name: &str, selection: &'a SelectionValue) -> Result<&'a str, QueryError> {
    match selection {
        SelectionValue::Choice(value) => Ok(value.as_str()),
        _ => Err(QueryError::InvalidSelection {
            attribute: name.to_string(),
            expected: "a category name",
        }),
    }
}

fn within_domain(value: f64, domain: &Domain, default: f64) -> f64 {
    if value.is_nan() {
        return default;
    }
    match domain {
        Domain::Range { min, max } => value.max(*min).min(*max),
        Domain::Indicator => value.max(0.0).min(1.0),
        Domain::Codes { count } => value.max(0.0).min(count.saturating_sub(1) as f64),
    }
}
