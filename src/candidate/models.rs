use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Exam date printed on the admit card when the candidate has none.
pub const DEFAULT_EXAM_DATE: &str = "21-04-2024";
/// Exam time printed on the admit card when the candidate has none.
pub const DEFAULT_EXAM_TIME: &str = "12.00 - 1.30 pm";
/// Page size used by the paginated listing when the caller gives none.
pub const DEFAULT_PAGE_SIZE: u32 = 6;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "24258")]
    pub form_no: String,
    #[schema(example = "59")]
    pub token_no: String,
    #[schema(example = "Faaz Ahmad")]
    pub name: String,
    #[schema(example = "12-3-2013")]
    pub dob: String,
    #[schema(example = "9902700413")]
    pub contact_no: String,
    #[schema(example = "Puttur")]
    pub place: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    #[schema(example = "21-04-2024")]
    pub exam_date: Option<String>,
    #[serde(default)]
    #[schema(example = "12.00 - 1.30 pm")]
    pub exam_time: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Build a stored record from creation fields and allocated numbers.
    pub fn from_new(id: i64, new: NewCandidate, form_no: String, token_no: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            form_no,
            token_no,
            name: new.name,
            dob: new.dob,
            contact_no: new.contact_no,
            place: new.place,
            photo: new.photo,
            exam_date: new.exam_date,
            exam_time: new.exam_time,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn exam_date_or_default(&self) -> &str {
        non_blank(self.exam_date.as_deref()).unwrap_or(DEFAULT_EXAM_DATE)
    }

    pub fn exam_time_or_default(&self) -> &str {
        non_blank(self.exam_time.as_deref()).unwrap_or(DEFAULT_EXAM_TIME)
    }

    /// Case-insensitive substring match against name, form no, token no and place.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        [&self.name, &self.form_no, &self.token_no, &self.place]
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lowercase))
    }

    /// Copy the editable fields of `incoming` onto this record.
    ///
    /// Identity, form/token numbers and the creation timestamp stay as stored.
    pub fn merge_editable(&mut self, incoming: Candidate) {
        self.name = incoming.name;
        self.dob = incoming.dob;
        self.contact_no = incoming.contact_no;
        self.place = incoming.place;
        self.photo = incoming.photo;
        self.exam_date = incoming.exam_date;
        self.exam_time = incoming.exam_time;
        self.updated_at = Some(Utc::now());
    }

    /// Apply a partial update from the API.
    pub fn apply_update(&mut self, update: &CandidateUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(dob) = &update.dob {
            self.dob = dob.clone();
        }
        if let Some(contact_no) = &update.contact_no {
            self.contact_no = contact_no.clone();
        }
        if let Some(place) = &update.place {
            self.place = place.clone();
        }
        if let Some(photo) = &update.photo {
            self.photo = Some(photo.clone());
        }
        if let Some(exam_date) = &update.exam_date {
            self.exam_date = Some(exam_date.clone());
        }
        if let Some(exam_time) = &update.exam_time {
            self.exam_time = Some(exam_time.clone());
        }
    }
}

impl Candidate {
    /// Strip surrounding whitespace from every text field that is printed.
    pub fn trim_fields(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.dob);
        trim_in_place(&mut self.contact_no);
        trim_in_place(&mut self.place);
        trim_optional(&mut self.photo);
        trim_optional(&mut self.exam_date);
        trim_optional(&mut self.exam_time);
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_optional(value: &mut Option<String>) {
    if let Some(inner) = value {
        trim_in_place(inner);
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    #[schema(example = "Zain Ali")]
    pub name: String,
    #[schema(example = "28-1-2013")]
    pub dob: String,
    #[schema(example = "8875421369")]
    pub contact_no: String,
    #[schema(example = "Bangalore")]
    pub place: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    #[schema(example = "21-04-2024")]
    pub exam_date: Option<String>,
    #[serde(default)]
    #[schema(example = "2.00 - 3.30 pm")]
    pub exam_time: Option<String>,
}

impl NewCandidate {
    /// The same payload with surrounding whitespace removed from every field.
    pub fn trimmed(mut self) -> Self {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.dob);
        trim_in_place(&mut self.contact_no);
        trim_in_place(&mut self.place);
        trim_optional(&mut self.photo);
        trim_optional(&mut self.exam_date);
        trim_optional(&mut self.exam_time);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub contact_no: Option<String>,
    pub place: Option<String>,
    pub photo: Option<String>,
    pub exam_date: Option<String>,
    pub exam_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePage {
    pub items: Vec<Candidate>,
    #[schema(example = 3)]
    pub total: u64,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 6)]
    pub page_size: u32,
    #[schema(example = 1)]
    pub total_pages: u32,
}

impl CandidatePage {
    /// Slice one page out of an already ordered list.
    pub fn from_ordered(all: Vec<Candidate>, page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total = all.len() as u64;
        let skip = (page as usize - 1).saturating_mul(page_size as usize);
        let items = all.into_iter().skip(skip).take(page_size as usize).collect();
        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }
}

pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    total.div_ceil(page_size) as u32
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Items per page, defaults to 6
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name, form no, token no and place
    #[serde(default)]
    pub q: String,
}
