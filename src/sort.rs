//! Column sorting for the users table.
//!
//! The sortable columns form a closed set; each one carries its own field
//! extractor so there is no runtime lookup by dotted path.
use std::fmt;
use std::str::FromStr;

use crate::model::User;

/// A sortable column of the users table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Name,
    Username,
    Email,
    Phone,
    City,
    Company,
}

impl SortColumn {
    /// Table order, left to right.
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Name,
        SortColumn::Username,
        SortColumn::Email,
        SortColumn::Phone,
        SortColumn::City,
        SortColumn::Company,
    ];

    /// Header label shown in the table.
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Username => "Username",
            SortColumn::Email => "Email",
            SortColumn::Phone => "Phone",
            SortColumn::City => "City",
            SortColumn::Company => "Company",
        }
    }

    /// Dotted path of the field in the JSON record.
    pub fn path(self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Username => "username",
            SortColumn::Email => "email",
            SortColumn::Phone => "phone",
            SortColumn::City => "address.city",
            SortColumn::Company => "company.name",
        }
    }

    pub fn value(self, user: &User) -> &str {
        match self {
            SortColumn::Name => &user.name,
            SortColumn::Username => &user.username,
            SortColumn::Email => &user.email,
            SortColumn::Phone => &user.phone,
            SortColumn::City => &user.address.city,
            SortColumn::Company => &user.company.name,
        }
    }

    /// Column at `index` in table order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort column '{0}'")]
pub struct UnknownColumn(pub String);

impl FromStr for SortColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.path() == s.trim())
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow used next to the active header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Active sort column and direction. No column means fetch order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    /// State after a click on `column`'s header.
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.column == Some(column) {
            Self {
                column: self.column,
                direction: self.direction.toggled(),
            }
        } else {
            Self {
                column: Some(column),
                direction: SortDirection::Ascending,
            }
        }
    }

    pub fn apply(self, rows: &mut [&User]) {
        if let Some(column) = self.column {
            sort_users(rows, column, self.direction);
        }
    }
}

/// Stable sort of `rows` by `column` in root-locale collation order.
pub fn sort_users(rows: &mut [&User], column: SortColumn, direction: SortDirection) {
    let collator = collate::collator();
    rows.sort_by(|a, b| {
        let ord = collate::compare_with(collator.as_ref(), column.value(a), column.value(b));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Locale-aware string comparison backed by the Unicode root collation
/// (CLDR `und`), so letters such as `Ł`, `Ø`, `Æ` and `ß` sort next to
/// their base letters. Strings the collator ranks equal fall back to code
/// point order so distinct values never compare equal.
pub mod collate {
    use icu_collator::options::CollatorOptions;
    use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
    use std::cmp::Ordering;

    /// Root-locale collator built from the compiled-in CLDR data.
    pub fn collator() -> Option<CollatorBorrowed<'static>> {
        match Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(error = %err, "collation data unavailable, sorting by code point");
                None
            }
        }
    }

    pub fn compare_with(collator: Option<&CollatorBorrowed<'static>>, a: &str, b: &str) -> Ordering {
        let ord = match collator {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        };
        ord.then_with(|| a.cmp(b))
    }

    pub fn compare(a: &str, b: &str) -> Ordering {
        compare_with(collator().as_ref(), a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Company};
    use std::cmp::Ordering;

    fn mk_user(id: u64, name: &str, city: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            phone: String::new(),
            website: String::new(),
            address: Address {
                street: String::new(),
                suite: String::new(),
                city: city.to_string(),
                zipcode: String::new(),
                geo: None,
            },
            company: Company {
                name: String::new(),
                catch_phrase: String::new(),
                bs: String::new(),
            },
        }
    }

    fn ids(rows: &[&User]) -> Vec<u64> {
        rows.iter().map(|u| u.id).collect()
    }

    #[test]
    fn parses_dotted_paths() {
        assert_eq!("address.city".parse::<SortColumn>(), Ok(SortColumn::City));
        assert_eq!("company.name".parse::<SortColumn>(), Ok(SortColumn::Company));
        assert_eq!("name".parse::<SortColumn>(), Ok(SortColumn::Name));
        assert!("address.zipcode".parse::<SortColumn>().is_err());
    }

    #[test]
    fn same_column_flips_direction() {
        let s = SortState::default().toggled(SortColumn::Email);
        assert_eq!(s.column, Some(SortColumn::Email));
        assert_eq!(s.direction, SortDirection::Ascending);
        let s = s.toggled(SortColumn::Email);
        assert_eq!(s.column, Some(SortColumn::Email));
        assert_eq!(s.direction, SortDirection::Descending);
        let s = s.toggled(SortColumn::Email);
        assert_eq!(s.direction, SortDirection::Ascending);
    }

    #[test]
    fn new_column_resets_to_ascending() {
        let s = SortState::default()
            .toggled(SortColumn::Name)
            .toggled(SortColumn::Name)
            .toggled(SortColumn::City);
        assert_eq!(s.column, Some(SortColumn::City));
        assert_eq!(s.direction, SortDirection::Ascending);
    }

    #[test]
    fn no_column_keeps_order() {
        let users = vec![mk_user(1, "b", "x"), mk_user(2, "a", "y")];
        let mut rows: Vec<&User> = users.iter().collect();
        SortState::default().apply(&mut rows);
        assert_eq!(ids(&rows), vec![1, 2]);
    }

    #[test]
    fn sorts_by_nested_column_both_ways() {
        let users = vec![
            mk_user(1, "a", "Wisokyburgh"),
            mk_user(2, "b", "Gwenborough"),
            mk_user(3, "c", "McKenziehaven"),
        ];
        let mut rows: Vec<&User> = users.iter().collect();
        sort_users(&mut rows, SortColumn::City, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec![2, 3, 1]);
        sort_users(&mut rows, SortColumn::City, SortDirection::Descending);
        assert_eq!(ids(&rows), vec![1, 3, 2]);
    }

    #[test]
    fn ties_keep_filtered_order_in_both_directions() {
        let users = vec![
            mk_user(1, "x", "Same"),
            mk_user(2, "y", "Alpha"),
            mk_user(3, "z", "Same"),
        ];
        let mut rows: Vec<&User> = users.iter().collect();
        sort_users(&mut rows, SortColumn::City, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec![2, 1, 3]);
        let mut rows: Vec<&User> = users.iter().collect();
        sort_users(&mut rows, SortColumn::City, SortDirection::Descending);
        assert_eq!(ids(&rows), vec![1, 3, 2]);
    }

    #[test]
    fn collation_places_accents_next_to_base_letter() {
        use collate::compare;
        assert_eq!(compare("Émile", "Frank"), Ordering::Less);
        assert_eq!(compare("Zoë", "Émile"), Ordering::Greater);
        assert_eq!(compare("resume", "résumé"), Ordering::Less);
        assert_eq!(compare("résumé", "resumes"), Ordering::Less);
        assert_eq!(compare("Ångström", "Zulu"), Ordering::Less);
    }

    #[test]
    fn collation_keeps_letters_without_decomposition_near_their_base() {
        use collate::compare;
        assert_eq!(compare("Łukasz", "Zofia"), Ordering::Less);
        assert_eq!(compare("Lukas", "Łukasz"), Ordering::Less);
        assert_eq!(compare("Øystein", "Zed"), Ordering::Less);
        assert_eq!(compare("Ægir", "Bob"), Ordering::Less);
        assert_eq!(compare("Straße", "Strauss"), Ordering::Less);
        assert_eq!(compare("Đorđe", "Zoran"), Ordering::Less);
    }

    #[test]
    fn collation_ignores_case_until_last_resort() {
        use collate::compare;
        assert_eq!(compare("apple", "Banana"), Ordering::Less);
        assert_eq!(compare("Apple", "banana"), Ordering::Less);
        assert_eq!(compare("a", "A"), Ordering::Less);
        assert_eq!(compare("A", "b"), Ordering::Less);
        assert_eq!(compare("same", "same"), Ordering::Equal);
    }
}
