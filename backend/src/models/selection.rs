//! Region / commodity selections coming from the dashboard sidebar.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which values of one categorical dimension are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "values")]
pub enum Selection {
    /// No restriction on this dimension.
    #[default]
    All,
    /// Only these values. An empty set matches nothing.
    Only(BTreeSet<String>),
}

impl Selection {
    /// Token the sidebar widgets use to mean "no restriction".
    pub const ALL_TOKEN: &'static str = "ALL";

    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(values.into_iter().map(Into::into).collect())
    }

    /// Build a selection from raw widget tokens.
    ///
    /// `ALL` anywhere in the list wins over explicit values, which is how the
    /// multiselect behaves when both are ticked. Blank tokens are ignored.
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = BTreeSet::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if token == Self::ALL_TOKEN {
                return Selection::All;
            }
            if !token.is_empty() {
                values.insert(token.to_string());
            }
        }
        Selection::Only(values)
    }

    /// Build a selection from the values of a repeated query parameter.
    ///
    /// Each value is one whole name, so names containing commas survive. A
    /// missing parameter means `All`, a present but blank one means nothing
    /// is selected.
    pub fn from_query<S: AsRef<str>>(values: Option<&[S]>) -> Self {
        match values {
            None => Selection::All,
            Some(values) => Self::parse(values),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values.contains(value),
        }
    }
}

/// The sidebar state for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub regions: Selection,
    pub commodities: Selection,
}

impl FilterSelection {
    pub fn new(regions: Selection, commodities: Selection) -> Self {
        Self {
            regions,
            commodities,
        }
    }

    /// Everything selected on both dimensions.
    pub fn all() -> Self {
        Self::default()
    }
}
