//! Search filters
//!
//! The four refinements the search endpoint accepts alongside the query
//! term. Absent filters are represented as `None` and omitted from the
//! request entirely, never sent as empty strings.

use std::fmt;

/// Active filter values for a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet {
    /// Cuisine restriction (e.g. "italian")
    pub cuisine: Option<String>,
    /// Diet restriction (e.g. "vegetarian")
    pub diet: Option<String>,
    /// Comma-separated ingredients to exclude
    pub exclude_ingredients: Option<String>,
    /// Maximum ready time in minutes
    pub max_ready_time: Option<u32>,
}

impl FilterSet {
    /// Apply a raw edit to one field. Blank input clears the field; the
    /// ready-time field additionally requires a numeric value.
    pub fn set(&mut self, field: FilterField, raw: &str) {
        match field {
            FilterField::Cuisine => self.cuisine = normalize(raw),
            FilterField::Diet => self.diet = normalize(raw),
            FilterField::ExcludeIngredients => self.exclude_ingredients = normalize(raw),
            FilterField::MaxReadyTime => {
                self.max_ready_time = normalize(raw).and_then(|v| v.parse().ok());
            }
        }
    }

    /// Current value of one field, rendered for display
    pub fn get(&self, field: FilterField) -> Option<String> {
        match field {
            FilterField::Cuisine => self.cuisine.clone(),
            FilterField::Diet => self.diet.clone(),
            FilterField::ExcludeIngredients => self.exclude_ingredients.clone(),
            FilterField::MaxReadyTime => self.max_ready_time.map(|m| m.to_string()),
        }
    }

    /// True when no filter is active
    pub fn is_empty(&self) -> bool {
        self.cuisine.is_none()
            && self.diet.is_none()
            && self.exclude_ingredients.is_none()
            && self.max_ready_time.is_none()
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in FilterField::ALL {
            if let Some(value) = self.get(field) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", field.label(), value)?;
                first = false;
            }
        }
        if first {
            write!(f, "none")?;
        }
        Ok(())
    }
}

/// Trim an edit down to a meaningful value
fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Identifies one filter field for edits and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Cuisine,
    Diet,
    ExcludeIngredients,
    MaxReadyTime,
}

impl FilterField {
    /// All fields in display order
    pub const ALL: [FilterField; 4] = [
        FilterField::Cuisine,
        FilterField::Diet,
        FilterField::ExcludeIngredients,
        FilterField::MaxReadyTime,
    ];

    /// Short label for UI display
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Cuisine => "cuisine",
            FilterField::Diet => "diet",
            FilterField::ExcludeIngredients => "exclude",
            FilterField::MaxReadyTime => "max time",
        }
    }

    /// Query-parameter name on the wire
    pub fn param(self) -> &'static str {
        match self {
            FilterField::Cuisine => "cuisine",
            FilterField::Diet => "diet",
            FilterField::ExcludeIngredients => "excludeIngredients",
            FilterField::MaxReadyTime => "maxReadyTime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_text_field() {
        let mut filters = FilterSet::default();
        filters.set(FilterField::Cuisine, "italian");
        assert_eq!(filters.cuisine.as_deref(), Some("italian"));

        filters.set(FilterField::Cuisine, "");
        assert!(filters.cuisine.is_none());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_blank_input_never_becomes_an_empty_value() {
        let mut filters = FilterSet::default();
        filters.set(FilterField::Diet, "   ");
        assert!(filters.diet.is_none());
    }

    #[test]
    fn test_max_ready_time_requires_a_number() {
        let mut filters = FilterSet::default();
        filters.set(FilterField::MaxReadyTime, "30");
        assert_eq!(filters.max_ready_time, Some(30));

        filters.set(FilterField::MaxReadyTime, "soon");
        assert!(filters.max_ready_time.is_none());
    }

    #[test]
    fn test_equal_values_compare_equal() {
        let mut a = FilterSet::default();
        a.set(FilterField::Cuisine, "italian");
        a.set(FilterField::MaxReadyTime, "45");

        let mut b = FilterSet::default();
        b.set(FilterField::MaxReadyTime, "45");
        b.set(FilterField::Cuisine, "italian");

        assert_eq!(a, b);
    }

    #[test]
    fn test_display_summarizes_active_filters() {
        let mut filters = FilterSet::default();
        assert_eq!(filters.to_string(), "none");

        filters.set(FilterField::Cuisine, "mexican");
        filters.set(FilterField::MaxReadyTime, "20");
        assert_eq!(filters.to_string(), "cuisine=mexican, max time=20");
    }
}
