//! Search form state and key handling
//!
//! The form owns its field text until submit; `to_request` validates and
//! produces the wire request, so an invalid form never reaches the network.

use crate::models::SearchRequest;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::BTreeSet;
use thiserror::Error;

/// Which form field currently receives keystrokes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormField {
    Query,
    Latitude,
    Longitude,
    MaxResults,
    Branches,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Query => "Query",
            FormField::Latitude => "Latitude (optional)",
            FormField::Longitude => "Longitude (optional)",
            FormField::MaxResults => "Max results",
            FormField::Branches => "Branch filter",
        }
    }

    fn up(self) -> Self {
        match self {
            FormField::Query => FormField::Query,
            FormField::Latitude => FormField::Query,
            FormField::Longitude => FormField::Latitude,
            FormField::MaxResults => FormField::Longitude,
            FormField::Branches => FormField::MaxResults,
        }
    }

    fn down(self) -> Self {
        match self {
            FormField::Query => FormField::Latitude,
            FormField::Latitude => FormField::Longitude,
            FormField::Longitude => FormField::MaxResults,
            FormField::MaxResults => FormField::Branches,
            FormField::Branches => FormField::Branches,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Search query cannot be empty")]
    EmptyQuery,

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Latitude and longitude must be provided together")]
    PartialCoordinates,

    #[error("Invalid max results: {0}")]
    InvalidMaxResults(String),
}

#[derive(Debug, Clone)]
pub struct SearchForm {
    pub query: String,
    pub latitude: String,
    pub longitude: String,
    pub max_results: String,
    pub focus: FormField,
    pub branch_cursor: usize,
    pub selected_branches: BTreeSet<String>,
}

impl SearchForm {
    pub fn new(default_max_results: u32) -> Self {
        Self {
            query: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            max_results: default_max_results.to_string(),
            focus: FormField::Query,
            branch_cursor: 0,
            selected_branches: BTreeSet::new(),
        }
    }

    /// Route a key press into the form.
    pub fn handle_key(&mut self, key: KeyEvent, branch_names: &[String]) {
        match key.code {
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(branch_names),
            KeyCode::Char(' ') if self.focus == FormField::Branches => {
                self.toggle_branch(branch_names)
            }
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_char(),
            _ => {}
        }
    }

    fn move_up(&mut self) {
        if self.focus == FormField::Branches && self.branch_cursor > 0 {
            self.branch_cursor -= 1;
        } else {
            self.focus = self.focus.up();
        }
    }

    fn move_down(&mut self, branch_names: &[String]) {
        if self.focus == FormField::Branches {
            if self.branch_cursor + 1 < branch_names.len() {
                self.branch_cursor += 1;
            }
        } else {
            self.focus = self.focus.down();
        }
    }

    fn toggle_branch(&mut self, branch_names: &[String]) {
        if let Some(name) = branch_names.get(self.branch_cursor) {
            if !self.selected_branches.remove(name) {
                self.selected_branches.insert(name.clone());
            }
        }
    }

    fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::Query => self.query.push(c),
            FormField::Latitude | FormField::Longitude => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.field_mut().push(c);
                }
            }
            FormField::MaxResults => {
                if c.is_ascii_digit() {
                    self.max_results.push(c);
                }
            }
            FormField::Branches => {}
        }
    }

    fn delete_char(&mut self) {
        if self.focus != FormField::Branches {
            self.field_mut().pop();
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Query => &mut self.query,
            FormField::Latitude => &mut self.latitude,
            FormField::Longitude => &mut self.longitude,
            FormField::MaxResults => &mut self.max_results,
            FormField::Branches => &mut self.query,
        }
    }

    pub fn field_text(&self, field: FormField) -> &str {
        match field {
            FormField::Query => &self.query,
            FormField::Latitude => &self.latitude,
            FormField::Longitude => &self.longitude,
            FormField::MaxResults => &self.max_results,
            FormField::Branches => "",
        }
    }

    /// Validate the form and build the wire request.
    pub fn to_request(&self) -> Result<SearchRequest, FormError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(FormError::EmptyQuery);
        }

        let coordinates = self.parse_coordinates()?;
        let max_results = self
            .max_results
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidMaxResults(self.max_results.clone()))?;

        Ok(SearchRequest {
            query: query.to_string(),
            branches: self.selected_branches.iter().cloned().collect(),
            max_results,
            lat: coordinates.map(|(lat, _)| lat),
            lng: coordinates.map(|(_, lng)| lng),
        })
    }

    fn parse_coordinates(&self) -> Result<Option<(f64, f64)>, FormError> {
        let lat = self.latitude.trim();
        let lng = self.longitude.trim();
        match (lat.is_empty(), lng.is_empty()) {
            (true, true) => Ok(None),
            (false, false) => {
                let lat = lat
                    .parse::<f64>()
                    .map_err(|_| FormError::InvalidCoordinate(lat.to_string()))?;
                let lng = lng
                    .parse::<f64>()
                    .map_err(|_| FormError::InvalidCoordinate(lng.to_string()))?;
                Ok(Some((lat, lng)))
            }
            _ => Err(FormError::PartialCoordinates),
        }
    }

    /// Human-readable location for history entries and log lines: manual
    /// coordinates, the single selected branch, or "All branches".
    pub fn location_descriptor(&self) -> String {
        if let Ok(Some((lat, lng))) = self.parse_coordinates() {
            return format!("{:.4}, {:.4}", lat, lng);
        }
        match self.selected_branches.len() {
            0 => "All branches".to_string(),
            1 => self
                .selected_branches
                .iter()
                .next()
                .cloned()
                .unwrap_or_default(),
            n => format!("{} branches", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form_with_query(query: &str) -> SearchForm {
        let mut form = SearchForm::new(20);
        form.query = query.to_string();
        form
    }

    #[test]
    fn test_empty_query_is_rejected() {
        assert_eq!(form_with_query("").to_request(), Err(FormError::EmptyQuery));
        assert_eq!(
            form_with_query("   ").to_request(),
            Err(FormError::EmptyQuery)
        );
    }

    #[test]
    fn test_valid_form_builds_request() {
        let mut form = form_with_query("pharmacy");
        form.selected_branches.insert("Koramangala".to_string());
        let request = form.to_request().unwrap();
        assert_eq!(request.query, "pharmacy");
        assert_eq!(request.branches, vec!["Koramangala".to_string()]);
        assert_eq!(request.max_results, 20);
        assert_eq!(request.lat, None);
    }

    #[test]
    fn test_manual_coordinates_require_both() {
        let mut form = form_with_query("atm");
        form.latitude = "12.97".to_string();
        assert_eq!(form.to_request(), Err(FormError::PartialCoordinates));

        form.longitude = "77.59".to_string();
        let request = form.to_request().unwrap();
        assert_eq!(request.lat, Some(12.97));
        assert_eq!(request.lng, Some(77.59));
    }

    #[test]
    fn test_garbage_coordinate_is_rejected() {
        let mut form = form_with_query("atm");
        form.latitude = "12.9.7".to_string();
        form.longitude = "77.59".to_string();
        assert!(matches!(
            form.to_request(),
            Err(FormError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_numeric_fields_reject_letters() {
        let mut form = SearchForm::new(20);
        form.focus = FormField::Latitude;
        form.handle_key(key(KeyCode::Char('x')), &[]);
        form.handle_key(key(KeyCode::Char('1')), &[]);
        form.handle_key(key(KeyCode::Char('.')), &[]);
        assert_eq!(form.latitude, "1.");
    }

    #[test]
    fn test_branch_toggle_round_trips() {
        let branches = vec!["A".to_string(), "B".to_string()];
        let mut form = SearchForm::new(20);
        form.focus = FormField::Branches;
        form.handle_key(key(KeyCode::Down), &branches);
        form.handle_key(key(KeyCode::Char(' ')), &branches);
        assert!(form.selected_branches.contains("B"));
        form.handle_key(key(KeyCode::Char(' ')), &branches);
        assert!(form.selected_branches.is_empty());
    }

    #[test]
    fn test_location_descriptor_variants() {
        let mut form = form_with_query("atm");
        assert_eq!(form.location_descriptor(), "All branches");

        form.selected_branches.insert("Koramangala".to_string());
        assert_eq!(form.location_descriptor(), "Koramangala");

        form.latitude = "12.9716".to_string();
        form.longitude = "77.5946".to_string();
        assert_eq!(form.location_descriptor(), "12.9716, 77.5946");
    }
}
