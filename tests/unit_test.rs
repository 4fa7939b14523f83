// Unit tests for user-directory
// Exercise the directory snapshot through the public API only

#[cfg(test)]
mod fixtures {
    use user_directory::model::{Address, Company, User};

    pub fn user(id: u64, name: &str, username: &str, email: &str, phone: &str, city: &str, company: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            website: format!("site{id}.example"),
            address: Address {
                street: format!("{id} Main St"),
                suite: String::new(),
                city: city.to_string(),
                zipcode: format!("{id:05}"),
                geo: None,
            },
            company: Company {
                name: company.to_string(),
                catch_phrase: String::new(),
                bs: String::new(),
            },
        }
    }

    pub fn directory() -> Vec<User> {
        vec![
            user(1, "Leanne Graham", "Bret", "Sincere@april.biz", "1-770-736-8031", "Gwenborough", "Romaguera-Crona"),
            user(2, "Ervin Howell", "Antonette", "Shanna@melissa.tv", "010-692-6593", "Wisokyburgh", "Deckow-Crist"),
            user(3, "Clementine Bauch", "Samantha", "Nathan@yesenia.net", "1-463-123-4447", "McKenziehaven", "Romaguera-Jacobson"),
            user(4, "Patricia Lebsack", "Karianne", "Julianne.OConner@kory.org", "493-170-9623", "South Elvis", "Robel-Corkery"),
            user(5, "Chelsey Dietrich", "Kamren", "Lucio_Hettinger@annie.ca", "(254)954-1289", "Roscoeview", "Keebler LLC"),
            user(6, "Émilie Dupont", "emilie", "emilie@exemple.fr", "01 23 45 67 89", "Évry", "Société Générale"),
        ]
    }
}

#[cfg(test)]
mod search_tests {
    use super::fixtures::directory;
    use user_directory::DirectoryState;
    use user_directory::search::filter_users;

    fn searchable(u: &user_directory::User) -> [String; 6] {
        [
            u.name.to_lowercase(),
            u.username.to_lowercase(),
            u.email.to_lowercase(),
            u.phone.to_lowercase(),
            u.address.city.to_lowercase(),
            u.company.name.to_lowercase(),
        ]
    }

    #[test]
    fn every_result_matches_and_every_match_is_returned() {
        let users = directory();
        for term in ["", "a", "ROMAGUERA", "org", "1-", "év", "kamren", "nothing-here"] {
            let q = term.to_lowercase();
            let result = filter_users(&users, term);
            for u in &result {
                assert!(
                    searchable(u).iter().any(|f| f.contains(&q)),
                    "{} should not match {term:?}",
                    u.name
                );
            }
            let expected = users
                .iter()
                .filter(|u| searchable(u).iter().any(|f| f.contains(&q)))
                .count();
            assert_eq!(result.len(), expected, "term {term:?}");
        }
    }

    #[test]
    fn no_match_gives_empty_projection() {
        let state = DirectoryState::new()
            .fetch_succeeded(directory())
            .search_changed("does-not-exist");
        assert!(state.visible_users().is_empty());
    }
}

#[cfg(test)]
mod sort_tests {
    use super::fixtures::{directory, user};
    use user_directory::DirectoryState;
    use user_directory::sort::{SortColumn, SortDirection};

    fn names(state: &DirectoryState) -> Vec<String> {
        state.visible_users().iter().map(|u| u.name.clone()).collect()
    }

    #[test]
    fn clicking_same_header_twice_flips_direction_only() {
        let s = DirectoryState::new()
            .fetch_succeeded(directory())
            .sort_toggled(SortColumn::Email);
        assert_eq!(s.sort.column, Some(SortColumn::Email));
        assert_eq!(s.sort.direction, SortDirection::Ascending);
        let s = s.sort_toggled(SortColumn::Email);
        assert_eq!(s.sort.column, Some(SortColumn::Email));
        assert_eq!(s.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn clicking_other_header_resets_to_ascending() {
        let s = DirectoryState::new()
            .sort_toggled(SortColumn::Phone)
            .sort_toggled(SortColumn::Phone)
            .sort_toggled(SortColumn::Company);
        assert_eq!(s.sort.column, Some(SortColumn::Company));
        assert_eq!(s.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn toggling_twice_restores_order() {
        for column in SortColumn::ALL {
            let s = DirectoryState::new()
                .fetch_succeeded(directory())
                .sort_toggled(column);
            let first = names(&s);
            let s = s.sort_toggled(column);
            let mut reversed = names(&s);
            reversed.reverse();
            assert_eq!(first, reversed, "column {column}");
            let s = s.sort_toggled(column);
            assert_eq!(names(&s), first, "column {column}");
        }
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let mut users = directory();
        users.push(user(7, "Łucja Nowak", "lucja", "lucja@example.pl", "22 000", "Łódź", "Orlen"));
        users.push(user(8, "Øyvind Berg", "oyvind", "oyvind@example.no", "22 001", "Bergen", "Equinor"));
        users.push(user(9, "Ægir Olsen", "aegir", "aegir@example.is", "22 002", "Reykjavík", "Össur"));
        let s = DirectoryState::new()
            .fetch_succeeded(users)
            .sort_toggled(SortColumn::Name);
        assert_eq!(
            names(&s),
            vec![
                "Ægir Olsen",
                "Chelsey Dietrich",
                "Clementine Bauch",
                "Émilie Dupont",
                "Ervin Howell",
                "Leanne Graham",
                "Łucja Nowak",
                "Øyvind Berg",
                "Patricia Lebsack",
            ]
        );
    }

    #[test]
    fn city_sort_uses_nested_field() {
        let s = DirectoryState::new()
            .fetch_succeeded(directory())
            .sort_toggled(SortColumn::City);
        let cities: Vec<String> = s
            .visible_users()
            .iter()
            .map(|u| u.address.city.clone())
            .collect();
        assert_eq!(
            cities,
            vec!["Évry", "Gwenborough", "McKenziehaven", "Roscoeview", "South Elvis", "Wisokyburgh"]
        );
    }

    #[test]
    fn sorting_applies_after_filtering() {
        let s = DirectoryState::new()
            .fetch_succeeded(directory())
            .search_changed("romaguera")
            .sort_toggled(SortColumn::Name)
            .sort_toggled(SortColumn::Name);
        assert_eq!(names(&s), vec!["Leanne Graham", "Clementine Bauch"]);
    }
}

#[cfg(test)]
mod modal_tests {
    use super::fixtures::directory;
    use user_directory::DirectoryState;
    use user_directory::error::FETCH_FAILURE_MESSAGE;

    #[test]
    fn selecting_any_row_opens_detail_with_that_record() {
        let state = DirectoryState::new().fetch_succeeded(directory());
        for user in directory() {
            let s = state.clone().row_selected(user.clone());
            assert!(s.is_detail_modal_open());
            assert_eq!(s.selected_user.as_ref(), Some(&user));
            let s = s.detail_closed();
            assert!(!s.is_detail_modal_open());
            assert!(s.selected_user.is_none());
        }
    }

    #[test]
    fn failed_fetch_before_first_load_leaves_users_empty() {
        let s = DirectoryState::new().fetch_started().fetch_failed();
        assert!(s.users.is_empty());
        assert!(s.is_error_modal_open());
        assert_eq!(s.error_message.as_deref(), Some(FETCH_FAILURE_MESSAGE));
    }

    #[test]
    fn successful_reload_clears_error() {
        let s = DirectoryState::new()
            .fetch_failed()
            .fetch_started()
            .fetch_succeeded(directory());
        assert!(!s.is_error_modal_open());
        assert_eq!(s.users.len(), 6);
    }
}
