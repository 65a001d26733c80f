//! The volunteer roster.
//!
//! The [`Roster`] is the only owner of [`Volunteer`] records. Removing a
//! volunteer is deliberately not exposed here: it must go through
//! [`crate::scheduling::remove_volunteer`] so that shifts are cleared too.

use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};

use super::volunteer::{normalize_phone, validate_name};
use super::Volunteer;

/// Ordered collection of volunteers, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    volunteers: Vec<Volunteer>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from existing records, rejecting duplicate ids.
    pub fn from_volunteers(volunteers: Vec<Volunteer>) -> RosterResult<Self> {
        let mut roster = Self::new();
        for volunteer in volunteers {
            roster.add(volunteer)?;
        }
        Ok(roster)
    }

    /// Appends a volunteer.
    ///
    /// # Example
    ///
    /// ```
    /// use sunday_roster::models::{Roster, Volunteer};
    ///
    /// let mut roster = Roster::new();
    /// roster.add(Volunteer::with_id("v1", "Ana", "").unwrap()).unwrap();
    /// assert!(roster.contains("v1"));
    /// assert!(roster.add(Volunteer::with_id("v1", "Bia", "").unwrap()).is_err());
    /// ```
    pub fn add(&mut self, volunteer: Volunteer) -> RosterResult<()> {
        if self.contains(&volunteer.id) {
            return Err(RosterError::InvalidVolunteer {
                field: "id".to_string(),
                message: format!("'{}' is already on the roster", volunteer.id),
            });
        }
        self.volunteers.push(volunteer);
        Ok(())
    }

    /// Replaces the name and phone of an existing volunteer; the id is kept.
    pub fn update(&mut self, id: &str, name: &str, phone: &str) -> RosterResult<&Volunteer> {
        let name = validate_name(name)?;
        let volunteer = self
            .volunteers
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| RosterError::InvalidReference {
                volunteer_id: id.to_string(),
            })?;
        volunteer.name = name;
        volunteer.phone = normalize_phone(phone);
        Ok(volunteer)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Volunteer> {
        let index = self.volunteers.iter().position(|v| v.id == id)?;
        Some(self.volunteers.remove(index))
    }

    /// Looks up a volunteer by id.
    pub fn get(&self, id: &str) -> Option<&Volunteer> {
        self.volunteers.iter().find(|v| v.id == id)
    }

    /// Looks up a volunteer by id, failing with `InvalidReference`.
    pub fn require(&self, id: &str) -> RosterResult<&Volunteer> {
        self.get(id).ok_or_else(|| RosterError::InvalidReference {
            volunteer_id: id.to_string(),
        })
    }

    /// Returns true if the id is on the roster.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over volunteers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Volunteer> {
        self.volunteers.iter()
    }

    /// Returns the number of volunteers.
    pub fn len(&self) -> usize {
        self.volunteers.len()
    }

    /// Returns true if the roster has no volunteers.
    pub fn is_empty(&self) -> bool {
        self.volunteers.is_empty()
    }

    /// Returns the volunteers as a slice.
    pub fn as_slice(&self) -> &[Volunteer] {
        &self.volunteers
    }
}
