use itertools::Itertools;

/// Separator between the components of a joined address.
pub const ADDRESS_SEPARATOR: &str = ", ";

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub locality   : Option<String>,
    pub admin_area : Option<String>,
    pub country    : Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.locality.is_none() && self.admin_area.is_none() && self.country.is_none()
    }

    /// Renders `"{locality}, {admin_area}, {country}"`.
    ///
    /// Missing components become empty strings, the separators are always kept.
    pub fn joined(&self) -> String {
        [&self.locality, &self.admin_area, &self.country]
            .into_iter()
            .map(|part| part.as_deref().unwrap_or_default())
            .join(ADDRESS_SEPARATOR)
    }
}
