use super::category::Category;

/// The concrete attribute tuple a request is evaluated against.
///
/// Every identifier is optional: an absent attribute simply fails to satisfy
/// any positive criterion that names it. Location identifiers may be
/// partially known (an institution without a campus, and so on).
///
/// # Example
///
/// ```
/// use circ_rules::Lookup;
///
/// let lookup = Lookup::new()
///     .material_type("book-material-id")
///     .loan_type("course-reserve")
///     .patron_group("undergrad");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
    material_type_id: Option<String>,
    loan_type_id: Option<String>,
    patron_group_id: Option<String>,
    institution_id: Option<String>,
    campus_id: Option<String>,
    library_id: Option<String>,
    location_id: Option<String>,
}

impl Lookup {
    /// Create an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the material (item) type id.
    #[must_use]
    pub fn material_type(mut self, id: impl Into<String>) -> Self {
        self.material_type_id = Some(id.into());
        self
    }

    /// Set the loan type id.
    #[must_use]
    pub fn loan_type(mut self, id: impl Into<String>) -> Self {
        self.loan_type_id = Some(id.into());
        self
    }

    /// Set the patron group id.
    #[must_use]
    pub fn patron_group(mut self, id: impl Into<String>) -> Self {
        self.patron_group_id = Some(id.into());
        self
    }

    /// Set the institution id.
    #[must_use]
    pub fn institution(mut self, id: impl Into<String>) -> Self {
        self.institution_id = Some(id.into());
        self
    }

    /// Set the campus id.
    #[must_use]
    pub fn campus(mut self, id: impl Into<String>) -> Self {
        self.campus_id = Some(id.into());
        self
    }

    /// Set the library id.
    #[must_use]
    pub fn library(mut self, id: impl Into<String>) -> Self {
        self.library_id = Some(id.into());
        self
    }

    /// Set the shelving location id.
    #[must_use]
    pub fn location(mut self, id: impl Into<String>) -> Self {
        self.location_id = Some(id.into());
        self
    }

    /// The attribute value for a criteria category, if known.
    pub(crate) fn value(&self, category: Category) -> Option<&str> {
        match category {
            Category::LoanType => self.loan_type_id.as_deref(),
            Category::Institution => self.institution_id.as_deref(),
            Category::Campus => self.campus_id.as_deref(),
            Category::Library => self.library_id.as_deref(),
            Category::ShelvingLocation => self.location_id.as_deref(),
            Category::MaterialType => self.material_type_id.as_deref(),
            Category::PatronGroup => self.patron_group_id.as_deref(),
        }
    }
}
