use shared::{
    domain::{Person, PersonId},
    error::ApiError,
    protocol::{DisplayMode, FullNamePanel, Panel, PersonDetails, PersonSummary, PersonUpdate},
};
use storage::PersonStore;
use tracing::info;

/// App shell for the person demo: a display mode toggle over the full-name
/// editor and the person list.
#[derive(Debug, Default)]
pub struct PersonManagementApp {
    store: PersonStore,
    mode: Option<DisplayMode>,
}

impl PersonManagementApp {
    pub fn new(store: PersonStore) -> Self {
        Self { store, mode: None }
    }

    pub fn store(&self) -> &PersonStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PersonStore {
        &mut self.store
    }

    pub fn mode(&self) -> Option<DisplayMode> {
        self.mode
    }

    pub fn switch_to_edit_name(&mut self) {
        self.set_mode(DisplayMode::EditName);
    }

    pub fn switch_to_person_list(&mut self) {
        self.set_mode(DisplayMode::PersonList);
    }

    fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = Some(mode);
        info!(mode = mode.as_str(), "display mode switched");
    }

    pub fn list_persons(&self) -> Vec<PersonSummary> {
        self.store
            .persons()
            .iter()
            .map(|person| PersonSummary {
                person_id: person.person_id,
                full_name: person.full_name(),
            })
            .collect()
    }

    pub fn select_person(&mut self, person_id: PersonId) -> Result<PersonDetails, ApiError> {
        self.store.select_person(person_id)?;
        self.details_for(person_id)
    }

    pub fn person_details(&self) -> Option<PersonDetails> {
        let person = self.store.current_person()?;
        self.details_for(person.person_id).ok()
    }

    pub fn update_person(
        &mut self,
        person_id: PersonId,
        update: PersonUpdate,
    ) -> Result<PersonDetails, ApiError> {
        self.store.update_person(person_id, update)?;
        self.details_for(person_id)
    }

    /// What the shell shows for the current mode. Nothing before the first
    /// switch.
    pub fn visible_panel(&self) -> Option<Panel> {
        match self.mode? {
            DisplayMode::EditName => Some(Panel::EditName {
                person: self.store.current_person().map(full_name_panel),
            }),
            DisplayMode::PersonList => Some(Panel::PersonList {
                persons: self.list_persons(),
                detail: self.person_details(),
            }),
        }
    }

    fn details_for(&self, person_id: PersonId) -> Result<PersonDetails, ApiError> {
        let person = self.store.person(person_id)?;
        let friend_names = if person.friends.is_empty() {
            None
        } else {
            Some(self.store.friend_names(person_id)?)
        };
        Ok(PersonDetails {
            person_id,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            full_name: person.full_name(),
            year_of_birth: person.year_of_birth,
            age: person.age(),
            friend_names,
        })
    }
}

fn full_name_panel(person: &Person) -> FullNamePanel {
    FullNamePanel {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        full_name: person.full_name(),
    }
}
