use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// A top-level category with its ordered subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Category name (unique within the taxonomy, case-sensitive)
    pub name: String,

    /// Subcategory names in display order (unique within this category)
    pub subcategories: Vec<String>,
}

/// Category → subcategory mapping.
///
/// Both levels keep insertion order, which is also the order of the JSON
/// document on disk. Serialized as a plain JSON object:
///
/// ```text
/// { "Rent": ["Office", "Warehouse", "Home"], "Transport": [...] }
/// ```
///
/// Names are stored and looked up with surrounding whitespace trimmed.
/// Mutations here only touch memory; `CategoryStore` persists them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Taxonomy {
    categories: Vec<CategoryEntry>,
}

impl Taxonomy {
    /// An empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// The taxonomy seeded on first run.
    pub fn builtin() -> Self {
        Self::from_pairs([
            ("Rent", vec!["Office", "Warehouse", "Home"]),
            ("Transport", vec!["Taxi", "Car", "PublicTransit"]),
            ("Payroll", vec!["Staff", "Freelancers"]),
            ("Other", vec!["Supplies", "Equipment", "Advertising"]),
        ])
    }

    /// Build a taxonomy from `(category, subcategories)` pairs, in order.
    /// No validation is done; call [`Taxonomy::validate`] if the input is untrusted.
    pub fn from_pairs<I, C, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, Vec<S>)>,
        C: Into<String>,
        S: Into<String>,
    {
        let categories = pairs
            .into_iter()
            .map(|(name, subs)| CategoryEntry {
                name: name.into(),
                subcategories: subs.into_iter().map(Into::into).collect(),
            })
            .collect();
        Self { categories }
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn contains_category(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Whether `category` exists and lists `subcategory`.
    #[must_use]
    pub fn contains_pair(&self, category: &str, subcategory: &str) -> bool {
        let subcategory = subcategory.trim();
        self.subcategories(category)
            .map(|subs| subs.iter().any(|s| s == subcategory))
            .unwrap_or(false)
    }

    /// Subcategories of `category` in display order, or `None` if unknown.
    #[must_use]
    pub fn subcategories(&self, category: &str) -> Option<&[String]> {
        self.find(category).map(|i| self.categories[i].subcategories.as_slice())
    }

    /// Category names in display order.
    #[must_use]
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.categories.iter()
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Append a new category with no subcategories.
    pub fn add_category(&mut self, name: &str) -> Result<(), CoreError> {
        let name = name.trim();
        if name.is_empty() || self.contains_category(name) {
            return Err(CoreError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(CategoryEntry {
            name: name.to_string(),
            subcategories: Vec::new(),
        });
        Ok(())
    }

    /// Remove a category together with all of its subcategories.
    /// Returns the removed entry.
    pub fn remove_category(&mut self, name: &str) -> Result<CategoryEntry, CoreError> {
        let name = name.trim();
        let idx = self
            .find(name)
            .ok_or_else(|| CoreError::NotFound(format!("category '{name}'")))?;
        Ok(self.categories.remove(idx))
    }

    /// Append a subcategory to an existing category.
    pub fn add_subcategory(&mut self, category: &str, name: &str) -> Result<(), CoreError> {
        let category = category.trim();
        let idx = self
            .find(category)
            .ok_or_else(|| CoreError::NotFound(format!("category '{category}'")))?;
        let name = name.trim();
        let entry = &mut self.categories[idx];
        if name.is_empty() || entry.subcategories.iter().any(|s| s == name) {
            return Err(CoreError::DuplicateSubcategory {
                category: category.to_string(),
                name: name.to_string(),
            });
        }
        entry.subcategories.push(name.to_string());
        Ok(())
    }

    /// Remove one subcategory; the rest keep their order.
    pub fn remove_subcategory(&mut self, category: &str, name: &str) -> Result<(), CoreError> {
        let (category, name) = (category.trim(), name.trim());
        let idx = self
            .find(category)
            .ok_or_else(|| CoreError::NotFound(format!("category '{category}'")))?;
        let entry = &mut self.categories[idx];
        let pos = entry
            .subcategories
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| CoreError::NotFound(format!("subcategory '{name}' in '{category}'")))?;
        entry.subcategories.remove(pos);
        Ok(())
    }

    /// Check the naming invariants: non-empty names, unique categories,
    /// unique subcategories per category.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (i, entry) in self.categories.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(CoreError::ValidationError(
                    "category name must not be empty".into(),
                ));
            }
            if self.categories[..i].iter().any(|c| c.name == entry.name) {
                return Err(CoreError::ValidationError(format!(
                    "duplicate category '{}'",
                    entry.name
                )));
            }
            for (j, sub) in entry.subcategories.iter().enumerate() {
                if sub.trim().is_empty() {
                    return Err(CoreError::ValidationError(format!(
                        "empty subcategory name in '{}'",
                        entry.name
                    )));
                }
                if entry.subcategories[..j].contains(sub) {
                    return Err(CoreError::ValidationError(format!(
                        "duplicate subcategory '{sub}' in '{}'",
                        entry.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn find(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.categories.iter().position(|c| c.name == name)
    }
}

// ── Serde: ordered JSON object ──────────────────────────────────────

impl Serialize for Taxonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for entry in &self.categories {
            map.serialize_entry(&entry.name, &entry.subcategories)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Taxonomy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TaxonomyVisitor;

        impl<'de> Visitor<'de> for TaxonomyVisitor {
            type Value = Taxonomy;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to lists of subcategory names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Taxonomy, A::Error> {
                let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, subcategories)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    categories.push(CategoryEntry {
                        name: name.trim().to_string(),
                        subcategories: subcategories.iter().map(|s| s.trim().to_string()).collect(),
                    });
                }
                let taxonomy = Taxonomy { categories };
                // Duplicate JSON keys reach us as separate entries
                taxonomy.validate().map_err(de::Error::custom)?;
                Ok(taxonomy)
            }
        }

        deserializer.deserialize_map(TaxonomyVisitor)
    }
}
