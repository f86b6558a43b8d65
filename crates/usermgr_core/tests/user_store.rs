use usermgr_core::{
    InvalidRecordError, RecordId, SortDirection, SortField, StoreCount, User, UserStore,
};

fn user(id: u64, name: &str, email: &str, phone: &str) -> User {
    User {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        ..User::default()
    }
    .with_id(RecordId::Remote(id.into()))
}

fn names(users: &[&User]) -> Vec<String> {
    users.iter().map(|user| user.name.clone()).collect()
}

fn assert_filtered_is_subsequence(store: &UserStore) {
    let mut full = store.all().iter();
    for filtered in store.filtered() {
        assert!(
            full.any(|candidate| std::ptr::eq(candidate, filtered)),
            "filtered user {} missing from full view order",
            filtered.name
        );
    }
}

#[test]
fn count_tracks_adds_and_removes() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "alice@x.com", "555")).unwrap();
    store.add(user(2, "Bob", "bob@x.com", "556")).unwrap();
    store.add(user(3, "Carol", "carol@x.com", "557")).unwrap();
    store.set_filter("ar");
    assert_filtered_is_subsequence(&store);

    assert!(store.remove(&RecordId::remote(2)));
    assert_eq!(store.count(), StoreCount { total: 2, filtered: 1 });
    assert_filtered_is_subsequence(&store);

    store.add(user(4, "Barb", "barb@x.com", "558")).unwrap();
    assert_eq!(store.count(), StoreCount { total: 3, filtered: 2 });
    assert_filtered_is_subsequence(&store);
}

#[test]
fn filter_matches_name_or_email() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "a@x.com", "1")).unwrap();
    store.add(user(2, "Bob", "al@x.com", "2")).unwrap();
    store.add(user(3, "Carl", "c@x.com", "3")).unwrap();

    store.set_filter("al");
    assert_eq!(names(&store.filtered()), vec!["Alice", "Bob"]);
}

#[test]
fn filter_is_case_insensitive_and_matches_phone() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "ALICE@X.COM", "1-770-736")).unwrap();
    store.add(user(2, "Bob", "bob@x.com", "010-692")).unwrap();

    store.set_filter("ALICE@x");
    assert_eq!(names(&store.filtered()), vec!["Alice"]);
    assert_eq!(store.filter_term(), "alice@x");

    store.set_filter("692");
    assert_eq!(names(&store.filtered()), vec!["Bob"]);
}

#[test]
fn empty_filter_restores_full_view() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "a@x.com", "1")).unwrap();
    store.add(user(2, "Bob", "b@x.com", "2")).unwrap();

    store.set_filter("zzz");
    assert_eq!(store.count().filtered, 0);

    store.set_filter("");
    let full: Vec<&User> = store.all().iter().collect();
    assert_eq!(store.filtered(), full);
}

#[test]
fn filter_applies_to_later_adds() {
    let mut store = UserStore::new();
    store.set_filter("bob");
    store.add(user(1, "Alice", "a@x.com", "1")).unwrap();
    store.add(user(2, "Bobby", "b@x.com", "2")).unwrap();

    assert_eq!(names(&store.filtered()), vec!["Bobby"]);
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "a@x.com", "1")).unwrap();
    let before = store.count();

    assert!(!store.remove(&RecordId::remote(99)));
    assert!(!store.remove(&RecordId::new_local()));
    assert_eq!(store.count(), before);
}

#[test]
fn add_rejects_duplicate_id_without_mutation() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "a@x.com", "1")).unwrap();

    let err = store.add(user(1, "Impostor", "i@x.com", "2")).unwrap_err();
    assert_eq!(err, InvalidRecordError::DuplicateId(RecordId::remote(1)));
    assert_eq!(store.count(), StoreCount { total: 1, filtered: 1 });
    assert_eq!(store.get_by_id(&RecordId::remote(1)).unwrap().name, "Alice");
}

#[test]
fn unassigned_users_may_coexist() {
    let mut store = UserStore::new();
    store.add(User::default()).unwrap();
    store.add(User::default()).unwrap();

    assert_eq!(store.len(), 2);
}

#[test]
fn get_by_id_finds_remote_and_local_ids() {
    let mut store = UserStore::new();
    let local = RecordId::new_local();
    store.add(user(7, "Remote", "r@x.com", "1")).unwrap();
    store.add(User::default().with_id(local.clone())).unwrap();

    assert_eq!(store.get_by_id(&RecordId::remote(7)).unwrap().name, "Remote");
    assert!(store.get_by_id(&local).is_some());
    assert!(store.get_by_id(&RecordId::remote(8)).is_none());
}

#[test]
fn replace_keeps_position_and_refreshes_filter() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "a@x.com", "1")).unwrap();
    store.add(user(2, "Bob", "b@x.com", "2")).unwrap();
    store.set_filter("bob");

    assert!(store.replace(user(1, "Bobbie", "a@x.com", "1")));
    assert_eq!(names(&store.filtered()), vec!["Bobbie", "Bob"]);

    assert!(!store.replace(user(42, "Ghost", "g@x.com", "0")));
    assert!(!store.replace(User::default()));
}

#[test]
fn sort_by_name_is_case_insensitive() {
    let mut store = UserStore::new();
    store.add(user(1, "Bob", "b@x.com", "1")).unwrap();
    store.add(user(2, "alice", "a@x.com", "2")).unwrap();

    store.sort(SortField::Name, SortDirection::Asc);
    let full: Vec<&User> = store.all().iter().collect();
    assert_eq!(names(&full), vec!["alice", "Bob"]);
    assert_eq!(names(&store.filtered()), vec!["alice", "Bob"]);

    store.sort(SortField::Name, SortDirection::Desc);
    assert_eq!(names(&store.filtered()), vec!["Bob", "alice"]);
}

#[test]
fn sort_by_id_orders_numbers_then_text_then_local() {
    let mut store = UserStore::new();
    let local = RecordId::new_local();
    store.add(User::default().with_id(local.clone())).unwrap();
    store
        .add(User::default().with_id(RecordId::remote("a1")))
        .unwrap();
    store.add(user(10, "Ten", "t@x.com", "1")).unwrap();
    store.add(user(2, "Two", "w@x.com", "2")).unwrap();

    store.sort(SortField::Id, SortDirection::Asc);
    let ids: Vec<Option<RecordId>> = store.all().iter().map(|user| user.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            Some(RecordId::remote(2)),
            Some(RecordId::remote(10)),
            Some(RecordId::remote("a1")),
            Some(local)
        ]
    );
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let mut store = UserStore::new();
    store.add(user(1, "Sam", "first@x.com", "1")).unwrap();
    store.add(user(2, "sam", "second@x.com", "2")).unwrap();
    store.add(user(3, "Abe", "third@x.com", "3")).unwrap();

    store.sort(SortField::Name, SortDirection::Asc);
    let emails: Vec<&str> = store.all().iter().map(|user| user.email.as_str()).collect();
    assert_eq!(emails, vec!["third@x.com", "first@x.com", "second@x.com"]);
}

#[test]
fn clear_empties_both_views() {
    let mut store = UserStore::new();
    store.add(user(1, "Alice", "a@x.com", "1")).unwrap();
    store.add(user(2, "Bob", "b@x.com", "2")).unwrap();
    store.set_filter("a");

    store.clear();
    assert_eq!(store.count(), StoreCount { total: 0, filtered: 0 });
    assert!(store.is_empty());
}
