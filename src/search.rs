use crate::model::User;

/// True when `needle` (already lower-cased) occurs in one of the searchable fields.
pub fn user_matches(user: &User, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        user.name.as_str(),
        user.username.as_str(),
        user.email.as_str(),
        user.phone.as_str(),
        user.address.city.as_str(),
        user.company.name.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Users whose name, username, email, phone, city or company contains `term`,
/// ignoring case. Keeps the input order.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let q = term.to_lowercase();
    users.iter().filter(|u| user_matches(u, &q)).collect()
}
