//! Read-only person reference data.

use serde::{Deserialize, Serialize};

/// Stable identifier of a person in the directory.
pub type PersonId = u64;

/// Participant role. Unread accounting is done per role, not per name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Employee,
}

impl Role {
    /// Display label used when a comment is authored by a role rather than a person.
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Teacher => "Teacher",
            Self::Employee => "Employee",
        }
    }
}

/// Directory entry consumed by search and author resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub role: Role,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }
}

/// Read-only person directory handed to the timeline by its host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDirectory {
    people: Vec<Person>,
}

impl PersonDirectory {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    /// All people in directory order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn find(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }
}
