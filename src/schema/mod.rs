//! Static description of every attribute a listing can carry.
//!
//! A catalog declares attributes by kind. Resolving it against the header row
//! of the historical feature table produces the [`FeatureSchema`]: the ordered
//! set of feature keys, one [`Descriptor`] per key and the grouping of one-hot
//! member columns into families. The schema is immutable once built and is
//! shared read-only by every request.

use std::fs;
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

pub mod catalog;
pub mod vocabularies;

/// Position of a feature key inside a [`FeatureSchema`].
pub type FeatureId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Numeric,
    OneHot,
    LabelEncoded,
}

/// One logical attribute as declared in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeSpec {
    Numeric {
        name: String,
        column: String,
        min: f64,
        max: f64,
        default: f64,
    },
    /// Member columns are discovered from the dataset header: every column
    /// whose longest matching family prefix is `prefix` belongs to the family.
    OneHot {
        name: String,
        prefix: String,
        default: String,
    },
    /// `labels[code]` is the display name of integer code `code`.
    LabelEncoded {
        name: String,
        column: String,
        labels: Vec<String>,
        default: String,
    },
}

impl AttributeSpec {
    pub fn name(&self) -> &str {
        match self {
            AttributeSpec::Numeric { name, .. }
            | AttributeSpec::OneHot { name, .. }
            | AttributeSpec::LabelEncoded { name, .. } => name,
        }
    }
}

/// Reads a catalog stored as a JSON array of attribute declarations.
pub fn load_catalog(path: &str) -> Result<Vec<AttributeSpec>, SchemaError> {
    let text = fs::read_to_string(path).map_err(|source| SchemaError::CatalogFile {
        path: path.to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    Range { min: f64, max: f64 },
    /// A one-hot member column, either 0 or 1.
    Indicator,
    /// An integer code in `0..count`.
    Codes { count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub kind: FeatureKind,
    /// Name of the logical attribute (the family for one-hot members).
    pub attribute: String,
    pub domain: Domain,
    pub default: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub kind: FeatureKind,
    /// Schema positions of the columns backing this attribute, in order.
    pub columns: Vec<FeatureId>,
    /// Family member suffixes or label names; empty for numeric attributes.
    pub options: Vec<String>,
    /// Index into `options` used when the caller selects nothing.
    pub default_option: Option<usize>,
}

impl Attribute {
    pub fn option_index(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|candidate| candidate == option)
    }
}

#[derive(Debug)]
pub struct FeatureSchema {
    keys: Arc<[String]>,
    descriptors: Vec<Descriptor>,
    attributes: Vec<Attribute>,
    key_positions: HashMap<String, FeatureId>,
    attribute_positions: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Resolves `catalog` against the header row of the historical feature table.
    ///
    /// Columns are ordered by catalog declaration; family members keep their
    /// header order. Headers the catalog does not mention are ignored.
    pub fn from_headers(
        catalog: &[AttributeSpec],
        headers: &[String],
    ) -> Result<FeatureSchema, SchemaError> {
        validate_catalog(catalog)?;

        let mut seen = HashSet::with_capacity(headers.len());
        for header in headers {
            if !seen.insert(header.as_str()) {
                return Err(SchemaError::DuplicateColumn(header.clone()));
            }
        }

        let exact_columns: HashSet<&str> = catalog
            .iter()
            .filter_map(|spec| match spec {
                AttributeSpec::Numeric { column, .. }
                | AttributeSpec::LabelEncoded { column, .. } => Some(column.as_str()),
                AttributeSpec::OneHot { .. } => None,
            })
            .collect();

        // Longest prefix wins so that `tipo_producto_x` never lands in `tipo_`.
        let mut prefixes: Vec<&str> = catalog
            .iter()
            .filter_map(|spec| match spec {
                AttributeSpec::OneHot { prefix, .. } => Some(prefix.as_str()),
                _ => None,
            })
            .collect();
        prefixes.sort_unstable_by(|a, b| b.len().cmp(&a.len()));

        let mut family_members: HashMap<&str, Vec<String>> = HashMap::new();
        let mut ignored = 0_usize;
        for header in headers {
            if exact_columns.contains(header.as_str()) {
                continue;
            }
            let family = prefixes
                .iter()
                .find(|prefix| header.len() > prefix.len() && header.starts_with(**prefix));
            match family {
                Some(prefix) => family_members
                    .entry(*prefix)
                    .or_insert_with(Vec::new)
                    .push(header[prefix.len()..].to_string()),
                None => ignored += 1,
            }
        }
        if ignored > 0 {
            tracing::debug!("{} dataset columns are not part of the feature catalog", ignored);
        }

        let mut missing = Vec::new();
        let mut keys = Vec::new();
        let mut descriptors = Vec::new();
        let mut attributes = Vec::with_capacity(catalog.len());

        for spec in catalog {
            match spec {
                AttributeSpec::Numeric {
                    name,
                    column,
                    min,
                    max,
                    default,
                } => {
                    if !seen.contains(column.as_str()) {
                        missing.push(column.clone());
                        continue;
                    }
                    attributes.push(Attribute {
                        name: name.clone(),
                        kind: FeatureKind::Numeric,
                        columns: vec![keys.len()],
                        options: Vec::new(),
                        default_option: None,
                    });
                    keys.push(column.clone());
                    descriptors.push(Descriptor {
                        kind: FeatureKind::Numeric,
                        attribute: name.clone(),
                        domain: Domain::Range {
                            min: *min,
                            max: *max,
                        },
                        default: *default,
                    });
                }
                AttributeSpec::OneHot {
                    name,
                    prefix,
                    default,
                } => {
                    let members = match family_members.remove(prefix.as_str()) {
                        Some(members) => members,
                        None => {
                            missing.push(format!("{}*", prefix));
                            continue;
                        }
                    };
                    let default_option = match members.iter().position(|m| m == default) {
                        Some(position) => position,
                        None => {
                            missing.push(format!("{}{}", prefix, default));
                            continue;
                        }
                    };
                    let columns = (keys.len()..keys.len() + members.len()).collect();
                    for (position, member) in members.iter().enumerate() {
                        keys.push(format!("{}{}", prefix, member));
                        descriptors.push(Descriptor {
                            kind: FeatureKind::OneHot,
                            attribute: name.clone(),
                            domain: Domain::Indicator,
                            default: if position == default_option { 1.0 } else { 0.0 },
                        });
                    }
                    attributes.push(Attribute {
                        name: name.clone(),
                        kind: FeatureKind::OneHot,
                        columns,
                        options: members,
                        default_option: Some(default_option),
                    });
                }
                AttributeSpec::LabelEncoded {
                    name,
                    column,
                    labels,
                    default,
                } => {
                    if !seen.contains(column.as_str()) {
                        missing.push(column.clone());
                        continue;
                    }
                    // validate_catalog guarantees the default label exists
                    let default_code = labels.iter().position(|l| l == default).unwrap_or(0);
                    attributes.push(Attribute {
                        name: name.clone(),
                        kind: FeatureKind::LabelEncoded,
                        columns: vec![keys.len()],
                        options: labels.clone(),
                        default_option: Some(default_code),
                    });
                    keys.push(column.clone());
                    descriptors.push(Descriptor {
                        kind: FeatureKind::LabelEncoded,
                        attribute: name.clone(),
                        domain: Domain::Codes {
                            count: labels.len(),
                        },
                        default: default_code as f64,
                    });
                }
            }
        }

        if !missing.is_empty() {
            return Err(SchemaError::SchemaLoad { missing });
        }

        let key_positions = keys
            .iter()
            .enumerate()
            .map(|(position, key)| (key.clone(), position))
            .collect();
        let attribute_positions = attributes
            .iter()
            .enumerate()
            .map(|(position, attribute)| (attribute.name.clone(), position))
            .collect();

        Ok(FeatureSchema {
            keys: keys.into(),
            descriptors,
            attributes,
            key_positions,
            attribute_positions,
        })
    }

    pub fn describe(&self, key: &str) -> Option<&Descriptor> {
        self.position(key).map(|position| &self.descriptors[position])
    }

    pub fn all_keys(&self) -> &[String] {
        &self.keys
    }

    /// The shared key list handed to every record built against this schema.
    pub fn shared_keys(&self) -> Arc<[String]> {
        Arc::clone(&self.keys)
    }

    /// Keys of the member columns of one one-hot family.
    pub fn family_members(&self, family_name: &str) -> Option<Vec<&str>> {
        self.attribute(family_name)
            .filter(|attribute| attribute.kind == FeatureKind::OneHot)
            .map(|attribute| {
                attribute
                    .columns
                    .iter()
                    .map(|position| self.keys[*position].as_str())
                    .collect()
            })
    }

    pub fn position(&self, key: &str) -> Option<FeatureId> {
        self.key_positions.get(key).copied()
    }

    pub fn descriptor(&self, position: FeatureId) -> &Descriptor {
        &self.descriptors[position]
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attribute_positions
            .get(name)
            .map(|position| &self.attributes[*position])
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn defaults(&self) -> Vec<f64> {
        self.descriptors.iter().map(|d| d.default).collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn qty_families(&self) -> usize {
        self.attributes
            .iter()
            .filter(|attribute| attribute.kind == FeatureKind::OneHot)
            .count()
    }
}

fn validate_catalog(catalog: &[AttributeSpec]) -> Result<(), SchemaError> {
    let mut names = HashSet::with_capacity(catalog.len());
    for spec in catalog {
        if !names.insert(spec.name()) {
            return Err(SchemaError::InvalidCatalog(format!(
                "attribute {} is declared twice",
                spec.name()
            )));
        }
        match spec {
            AttributeSpec::Numeric {
                name,
                min,
                max,
                default,
                ..
            } => {
                if !(*min <= *default && *default <= *max) {
                    return Err(SchemaError::InvalidCatalog(format!(
                        "{} needs min <= default <= max",
                        name
                    )));
                }
            }
            AttributeSpec::OneHot { name, prefix, .. } => {
                if prefix.is_empty() {
                    return Err(SchemaError::InvalidCatalog(format!(
                        "{} has an empty column prefix",
                        name
                    )));
                }
            }
            AttributeSpec::LabelEncoded {
                name,
                labels,
                default,
                ..
            } => {
                if !labels.contains(default) {
                    return Err(SchemaError::InvalidCatalog(format!(
                        "default {} of {} is not one of its labels",
                        default, name
                    )));
                }
            }
        }
    }
    Ok(())
}
