use crossbeam_channel::Receiver;
use shared::{
    domain::{IdAllocator, Person, PersonId},
    error::StoreError,
    protocol::{ChangeEvent, PersonUpdate},
};
use tracing::debug;

use crate::{seed, ChangeFeed};

/// Person records for the person demo.
///
/// The friends graph is fixed once seeding finishes. Friends are kept as ids
/// and resolved through this store.
#[derive(Debug)]
pub struct PersonStore {
    persons: Vec<Person>,
    current_person: Option<PersonId>,
    feed: ChangeFeed,
}

impl Default for PersonStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl PersonStore {
    pub fn seeded() -> Self {
        Self::from_names(
            IdAllocator::starting_at(seed::FIRST_PERSON_ID),
            seed::PERSONS.iter().copied(),
        )
    }

    /// Builds a store where every person is friends with everyone in seed
    /// order, themself included.
    pub fn from_names<'a>(
        mut ids: IdAllocator,
        names: impl IntoIterator<Item = (&'a str, &'a str, i32)>,
    ) -> Self {
        let mut persons: Vec<Person> = names
            .into_iter()
            .map(|(first, last, year)| Person::new(PersonId(ids.next_id()), first, last, year))
            .collect();

        let everyone: Vec<PersonId> = persons.iter().map(|p| p.person_id).collect();
        for person in &mut persons {
            person.friends = everyone.clone();
        }

        let current_person = persons.first().map(|p| p.person_id);
        debug!(persons = persons.len(), "seeded person store");
        Self {
            persons,
            current_person,
            feed: ChangeFeed::default(),
        }
    }

    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        self.feed.subscribe()
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn person(&self, person_id: PersonId) -> Result<&Person, StoreError> {
        self.persons
            .iter()
            .find(|person| person.person_id == person_id)
            .ok_or(StoreError::PersonNotFound(person_id))
    }

    pub fn friends_of(&self, person_id: PersonId) -> Result<Vec<&Person>, StoreError> {
        self.person(person_id)?
            .friends
            .iter()
            .map(|&friend| self.person(friend))
            .collect()
    }

    pub fn friend_names(&self, person_id: PersonId) -> Result<String, StoreError> {
        let names: Vec<String> = self
            .friends_of(person_id)?
            .into_iter()
            .map(Person::full_name)
            .collect();
        Ok(names.join(", "))
    }

    pub fn current_person(&self) -> Option<&Person> {
        let person_id = self.current_person?;
        self.person(person_id).ok()
    }

    pub fn select_person(&mut self, person_id: PersonId) -> Result<(), StoreError> {
        self.person(person_id)?;
        self.current_person = Some(person_id);
        debug!(%person_id, "selected person");
        self.feed.publish(ChangeEvent::CurrentPersonChanged { person_id });
        Ok(())
    }

    pub fn update_person(
        &mut self,
        person_id: PersonId,
        update: PersonUpdate,
    ) -> Result<&Person, StoreError> {
        let index = self
            .persons
            .iter()
            .position(|person| person.person_id == person_id)
            .ok_or(StoreError::PersonNotFound(person_id))?;

        let person = &mut self.persons[index];
        if let Some(first_name) = update.first_name {
            person.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            person.last_name = last_name;
        }
        if let Some(year_of_birth) = update.year_of_birth {
            person.year_of_birth = year_of_birth;
        }
        debug!(%person_id, "updated person");
        self.feed.publish(ChangeEvent::PersonUpdated { person_id });
        Ok(&self.persons[index])
    }
}

#[cfg(test)]
#[path = "tests/persons_tests.rs"]
mod tests;
