//! In-process candidate collection shared by the memory and file backends.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{normalize_query, StoreError};
use crate::candidate::models::{Candidate, CandidatePage, NewCandidate};
use crate::settings::model::{Allocation, Settings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Id given to the next inserted candidate. Never decreases.
    pub next_id: i64,
    pub settings: Settings,
    /// Kept in insertion order, which is also id order.
    pub candidates: Vec<Candidate>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            next_id: 1,
            settings: Settings::default(),
            candidates: Vec::new(),
        }
    }
}

impl Dataset {
    pub fn with_candidates(candidates: Vec<Candidate>, settings: Settings) -> Self {
        let mut candidates = candidates;
        candidates.sort_by_key(|c| c.id);
        let next_id = candidates.last().map(|c| c.id + 1).unwrap_or(1);
        Self {
            next_id,
            settings,
            candidates,
        }
    }

    /// The three sample registrations used for demos, with counters following them.
    pub fn demo() -> Self {
        let sample = |id: i64, form_no: &str, token_no: &str, name: &str, dob: &str, contact_no: &str, place: &str, exam_time: &str| {
            let now = Utc::now();
            Candidate {
                id,
                form_no: form_no.to_string(),
                token_no: token_no.to_string(),
                name: name.to_string(),
                dob: dob.to_string(),
                contact_no: contact_no.to_string(),
                place: place.to_string(),
                photo: None,
                exam_date: Some("21-04-2024".to_string()),
                exam_time: Some(exam_time.to_string()),
                created_at: Some(now),
                updated_at: Some(now),
            }
        };

        Self::with_candidates(
            vec![
                sample(1, "24258", "59", "Faaz Ahmad", "12-3-2013", "9902700413", "Puttur", "12.00 - 1.30 pm"),
                sample(2, "24259", "60", "Risha Khan", "15-5-2012", "9845123678", "Mangalore", "12.00 - 1.30 pm"),
                sample(3, "24260", "61", "Zain Ali", "28-1-2013", "8875421369", "Bangalore", "2.00 - 3.30 pm"),
            ],
            Settings::default(),
        )
    }

    pub fn allocate(&mut self) -> Result<Allocation, StoreError> {
        self.settings.allocate().ok_or(StoreError::CounterOverflow)
    }

    pub fn insert(&mut self, new: NewCandidate) -> Result<Candidate, StoreError> {
        let allocation = self.allocate()?;
        let candidate = Candidate::from_new(self.next_id, new, allocation.form_no, allocation.token_no);
        self.next_id += 1;
        self.candidates.push(candidate.clone());
        Ok(candidate)
    }

    pub fn get(&self, id: i64) -> Option<Candidate> {
        self.candidates.iter().find(|c| c.id == id).cloned()
    }

    pub fn newest_first(&self) -> Vec<Candidate> {
        self.candidates.iter().rev().cloned().collect()
    }

    pub fn page(&self, page: u32, page_size: u32) -> CandidatePage {
        CandidatePage::from_ordered(self.newest_first(), page, page_size)
    }

    pub fn search(&self, query: &str) -> Vec<Candidate> {
        let needle = normalize_query(query);
        self.candidates
            .iter()
            .rev()
            .filter(|c| c.matches(&needle))
            .cloned()
            .collect()
    }

    pub fn update(&mut self, incoming: Candidate) -> Result<Candidate, StoreError> {
        let id = incoming.id;
        let stored = self
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        stored.merge_editable(incoming);
        Ok(stored.clone())
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let initial_len = self.candidates.len();
        self.candidates.retain(|c| c.id != id);
        self.candidates.len() < initial_len
    }
}
