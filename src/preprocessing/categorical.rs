use hashbrown::HashMap;

use crate::schema::{Attribute, FeatureId, FeatureKind};

/// A category is the active member index of a one-hot family or the integer
/// code of a label-encoded attribute.
pub type Category = usize;

/// Mode imputation followed by one-hot expansion over the categories seen
/// during fitting. A category unseen at fit time encodes as all zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalColumn {
    pub attribute: String,
    kind: FeatureKind,
    columns: Vec<FeatureId>,
    options: Vec<String>,
    /// Sorted ascending; position in this list is the output column offset.
    pub vocabulary: Vec<Category>,
    pub mode: Category,
    /// Fitting rows with more than one active family member. Such a row is
    /// read as its first active member.
    pub ambiguous_rows: usize,
}

impl CategoricalColumn {
    pub fn fit(attribute: &Attribute, rows: &[Vec<Option<f64>>]) -> Self {
        let mut counts: HashMap<Category, usize> = HashMap::new();
        let mut ambiguous_rows = 0;
        for row in rows {
            if attribute.kind == FeatureKind::OneHot
                && active_members(&attribute.columns, |p| row[p]) > 1
            {
                ambiguous_rows += 1;
            }
            if let Some(category) = category_of(attribute.kind, &attribute.columns, |p| row[p]) {
                *counts.entry(category).or_insert(0) += 1;
            }
        }

        // Highest count wins, ties go to the smallest category.
        let mode = counts
            .iter()
            .max_by(|(a, a_count), (b, b_count)| a_count.cmp(b_count).then(b.cmp(a)))
            .map(|(category, _)| *category)
            .unwrap_or_else(|| attribute.default_option.unwrap_or(0));

        let mut vocabulary: Vec<Category> = counts.keys().copied().collect();
        if !counts.contains_key(&mode) {
            vocabulary.push(mode);
        }
        vocabulary.sort_unstable();

        CategoricalColumn {
            attribute: attribute.name.clone(),
            kind: attribute.kind,
            columns: attribute.columns.clone(),
            options: attribute.options.clone(),
            vocabulary,
            mode,
            ambiguous_rows,
        }
    }

    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn columns(&self) -> &[FeatureId] {
        &self.columns
    }

    pub fn category<F>(&self, cell: F) -> Option<Category>
    where
        F: Fn(FeatureId) -> Option<f64>,
    {
        category_of(self.kind, &self.columns, cell)
    }

    /// Appends exactly `width()` indicator values to `out`.
    pub fn encode_into(&self, category: Option<Category>, out: &mut Vec<f64>) {
        let category = category.unwrap_or(self.mode);
        let active = self.vocabulary.binary_search(&category).ok();
        out.extend((0..self.vocabulary.len()).map(|offset| {
            if Some(offset) == active {
                1.0
            } else {
                0.0
            }
        }));
    }

    pub fn output_columns(&self) -> impl Iterator<Item = String> + '_ {
        self.vocabulary.iter().map(move |category| {
            match self.options.get(*category) {
                Some(option) => format!("{}={}", self.attribute, option),
                None => format!("{}={}", self.attribute, category),
            }
        })
    }
}

/// `None` when the value is missing: no active family member, an absent
/// cell or a code that is not a non-negative integer.
fn category_of<F>(kind: FeatureKind, columns: &[FeatureId], cell: F) -> Option<Category>
where
    F: Fn(FeatureId) -> Option<f64>,
{
    match kind {
        FeatureKind::OneHot => columns
            .iter()
            .position(|position| cell(*position).map_or(false, |value| value > 0.5)),
        FeatureKind::LabelEncoded => columns
            .first()
            .and_then(|position| cell(*position))
            .filter(|code| code.is_finite() && *code >= 0.0 && code.fract() == 0.0)
            .map(|code| code as Category),
        FeatureKind::Numeric => None,
    }
}

fn active_members<F>(columns: &[FeatureId], cell: F) -> usize
where
    F: Fn(FeatureId) -> Option<f64>,
{
    columns
        .iter()
        .filter(|position| cell(**position).map_or(false, |value| value > 0.5))
        .count()
}
