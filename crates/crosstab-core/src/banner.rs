//! Banner hierarchy: H1 groups of H2 columns

/// Identifier of the implicit Total column
pub const TOTAL_COLUMN_ID: &str = "TOTAL";

/// Equation literal that matches every record
pub const TOTAL_EQUATION: &str = "TOTAL";

/// A single filterable subgroup (H2), e.g. "Male" with equation `S1=1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BannerColumn {
    pub id: String,
    pub name: String,
    /// Filter equation; `""` and `"TOTAL"` match everything
    #[cfg_attr(feature = "serde", serde(default))]
    pub equation: String,
    /// Name of the owning H1 group, used only for export headers
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub parent_group_name: Option<String>,
}

impl BannerColumn {
    pub fn new<I, N, E>(id: I, name: N, equation: E) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        E: Into<String>,
    {
        BannerColumn {
            id: id.into(),
            name: name.into(),
            equation: equation.into(),
            parent_group_name: None,
        }
    }

    /// The implicit first column covering the whole dataset
    pub fn total() -> Self {
        BannerColumn::new(TOTAL_COLUMN_ID, "Total", TOTAL_EQUATION)
    }

    /// Attach the owning group's display name
    pub fn with_parent_group<S: Into<String>>(mut self, group: S) -> Self {
        self.parent_group_name = Some(group.into());
        self
    }
}

/// A top-level segmentation category (H1), e.g. "Gender".
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerGroup {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, alias = "banner_columns"))]
    pub columns: Vec<BannerColumn>,
}

impl BannerGroup {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N) -> Self {
        BannerGroup {
            id: id.into(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Builder-style append of an H2 column
    pub fn with_column(mut self, column: BannerColumn) -> Self {
        self.columns.push(column);
        self
    }
}

/// The overall cross-tabulation column scheme.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BannerPlan {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, alias = "banner_groups"))]
    pub groups: Vec<BannerGroup>,
}

impl BannerPlan {
    pub fn new<S: Into<String>>(name: S) -> Self {
        BannerPlan {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    /// Builder-style append of an H1 group
    pub fn with_group(mut self, group: BannerGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Total number of H2 columns across all groups
    pub fn column_count(&self) -> usize {
        self.groups.iter().map(|g| g.columns.len()).sum()
    }
}
