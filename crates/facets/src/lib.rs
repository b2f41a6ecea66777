//! Multi-facet filtering of a point collection.
//!
//! Three independent facet dimensions (project type, size, state) each hold a
//! set of selected values. Filtering is AND across dimensions and OR within a
//! dimension; an empty set means "no constraint on that dimension".

use std::borrow::Cow;
use std::collections::BTreeSet;

use features::{Feature, FeatureCollection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetError {
    UnknownDimension(String),
}

impl std::fmt::Display for FacetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacetError::UnknownDimension(name) => {
                write!(f, "unknown facet dimension {name:?} (expected type, size or state)")
            }
        }
    }
}

impl std::error::Error for FacetError {}

/// One independently filterable property axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dimension {
    Kind,
    Size,
    State,
}

impl Dimension {
    /// Parses a dimension name as it arrives from host checkbox events.
    pub fn parse(name: &str) -> Result<Self, FacetError> {
        match name {
            "type" => Ok(Dimension::Kind),
            "size" => Ok(Dimension::Size),
            "state" => Ok(Dimension::State),
            other => Err(FacetError::UnknownDimension(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Kind => "type",
            Dimension::Size => "size",
            Dimension::State => "state",
        }
    }
}

/// Selected values per dimension.
///
/// Selections are immutable: every change builds a replacement value, so a
/// burst of rapid checkbox toggles can never observe a half-updated set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    kinds: BTreeSet<String>,
    sizes: BTreeSet<String>,
    states: BTreeSet<String>,
}

impl FacetSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty() && self.sizes.is_empty() && self.states.is_empty()
    }

    pub fn values(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Kind => &self.kinds,
            Dimension::Size => &self.sizes,
            Dimension::State => &self.states,
        }
    }

    /// Returns a copy with `value` added to or removed from `dimension`.
    pub fn with_value(&self, dimension: Dimension, value: &str, selected: bool) -> Self {
        let mut next = self.clone();
        let set = match dimension {
            Dimension::Kind => &mut next.kinds,
            Dimension::Size => &mut next.sizes,
            Dimension::State => &mut next.states,
        };
        if selected {
            set.insert(value.to_string());
        } else {
            set.remove(value);
        }
        next
    }

    /// Returns a copy with one dimension's set cleared.
    pub fn without_dimension(&self, dimension: Dimension) -> Self {
        let mut next = self.clone();
        match dimension {
            Dimension::Kind => next.kinds.clear(),
            Dimension::Size => next.sizes.clear(),
            Dimension::State => next.states.clear(),
        }
        next
    }

    /// AND across dimensions, OR within each dimension's selected set.
    pub fn matches(&self, feature: &Feature) -> bool {
        let p = &feature.properties;
        (self.kinds.is_empty() || self.kinds.contains(&p.kind))
            && (self.sizes.is_empty() || self.sizes.contains(&p.size))
            && (self.states.is_empty() || self.states.contains(&p.state))
    }
}

/// Holds the current selection and computes the visible subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilter {
    selection: FacetSelection,
}

impl FacetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &FacetSelection {
        &self.selection
    }

    /// Adds or removes one value in the named dimension.
    ///
    /// The dimension name comes from the host as a string; unknown names are
    /// rejected without touching the selection.
    pub fn set_selected(
        &mut self,
        dimension: &str,
        value: &str,
        selected: bool,
    ) -> Result<(), FacetError> {
        let dimension = Dimension::parse(dimension)?;
        self.selection = self.selection.with_value(dimension, value, selected);
        Ok(())
    }

    /// Clears one dimension's set.
    pub fn reset(&mut self, dimension: &str) -> Result<(), FacetError> {
        let dimension = Dimension::parse(dimension)?;
        self.selection = self.selection.without_dimension(dimension);
        Ok(())
    }

    /// Computes the visible subset of `original`, in original order.
    ///
    /// When every dimension is unconstrained this returns the original
    /// collection by identity (`Cow::Borrowed`), so the caller's data push
    /// is a revert rather than a new allocation. Pure: no side effects,
    /// idempotent under repeated application.
    pub fn compute_visible<'a>(&self, original: &'a FeatureCollection) -> Cow<'a, FeatureCollection> {
        if self.selection.is_empty() {
            return Cow::Borrowed(original);
        }
        let features = original
            .features
            .iter()
            .filter(|f| self.selection.matches(f))
            .cloned()
            .collect();
        Cow::Owned(FeatureCollection::new(features))
    }
}
