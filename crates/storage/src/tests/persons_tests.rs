use super::*;

#[test]
fn seeds_fourteen_persons_with_sequential_ids() {
    let store = PersonStore::seeded();
    assert_eq!(store.persons().len(), 14);
    for (index, person) in store.persons().iter().enumerate() {
        assert_eq!(person.person_id, PersonId(index as i64));
    }
    assert_eq!(store.persons()[6].full_name(), "Miško Hevery");
    assert_eq!(store.persons()[13].full_name(), "Nils Naegele");
}

#[test]
fn first_person_is_thirty_six_with_fourteen_friends() {
    let store = PersonStore::seeded();
    let first = &store.persons()[0];
    assert_eq!(first.friends.len(), 14);
    assert_eq!(first.age(), 36);
}

#[test]
fn every_friends_list_includes_everyone_and_self() {
    let store = PersonStore::seeded();
    let everyone: Vec<PersonId> = store.persons().iter().map(|p| p.person_id).collect();
    for person in store.persons() {
        assert_eq!(person.friends, everyone);
        assert!(person.friends.contains(&person.person_id));
    }
}

#[test]
fn derived_fields_hold_for_every_person() {
    let store = PersonStore::seeded();
    for person in store.persons() {
        assert_eq!(
            person.full_name(),
            format!("{} {}", person.first_name, person.last_name)
        );
        assert_eq!(person.age(), i64::from(2016 - person.year_of_birth));
    }
}

#[test]
fn friend_names_join_full_names_in_list_order() {
    let store = PersonStore::seeded();
    let expected = store
        .friends_of(PersonId(4))
        .expect("friends")
        .iter()
        .map(|friend| friend.full_name())
        .collect::<Vec<_>>()
        .join(", ");
    let names = store.friend_names(PersonId(4)).expect("names");

    assert_eq!(names, expected);
    assert!(names.starts_with("Victor Savkin, Igor Minar, Victor Berchet"));
    assert!(names.ends_with("Alex Eagle, Nils Naegele"));
}

#[test]
fn friend_names_reflect_renamed_friends() {
    let mut store = PersonStore::seeded();
    store
        .update_person(
            PersonId(1),
            PersonUpdate {
                first_name: Some("Iggy".into()),
                ..PersonUpdate::default()
            },
        )
        .expect("update");
    let names = store.friend_names(PersonId(0)).expect("names");
    assert!(names.starts_with("Victor Savkin, Iggy Minar, "));
}

#[test]
fn empty_store_has_no_current_person() {
    let store = PersonStore::from_names(IdAllocator::starting_at(0), std::iter::empty());
    assert!(store.persons().is_empty());
    assert!(store.current_person().is_none());
    assert_eq!(
        store.friend_names(PersonId(0)),
        Err(StoreError::PersonNotFound(PersonId(0)))
    );
}

#[test]
fn current_person_starts_at_first_seed_and_follows_selection() {
    let mut store = PersonStore::seeded();
    let events = store.subscribe();
    assert_eq!(
        store.current_person().map(|p| p.full_name()),
        Some("Victor Savkin".to_string())
    );

    store.select_person(PersonId(11)).expect("select");
    assert_eq!(
        store.current_person().map(|p| p.full_name()),
        Some("João Dias".to_string())
    );
    assert_eq!(
        events.try_recv().expect("event"),
        ChangeEvent::CurrentPersonChanged {
            person_id: PersonId(11)
        }
    );

    assert!(store.select_person(PersonId(99)).is_err());
    assert!(events.try_recv().is_err());
}

#[test]
fn year_edit_changes_age() {
    let mut store = PersonStore::seeded();
    let person = store
        .update_person(
            PersonId(0),
            PersonUpdate {
                year_of_birth: Some(2006),
                ..PersonUpdate::default()
            },
        )
        .expect("update");
    assert_eq!(person.age(), 10);
}
