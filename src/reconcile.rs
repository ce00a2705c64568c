use crate::client::HealthApi;
use crate::dates;
use crate::errors::ClientError;
use crate::models::{Entry, SavePayload};
use crate::normalize::normalize_entry;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Entries of the displayed year, ascending by date and unique by day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearCollection {
    year: i32,
    entries: Vec<Entry>,
}

impl YearCollection {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            entries: Vec::new(),
        }
    }

    pub fn from_entries(year: i32, entries: Vec<Entry>) -> Self {
        let by_key: BTreeMap<String, Entry> = entries
            .into_iter()
            .map(|entry| (entry.date_key.clone(), entry))
            .collect();
        Self {
            year,
            entries: by_key.into_values().collect(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a day. Keys from another year never match, even if the
    /// server put such an entry in this year's response.
    pub fn find(&self, date_key: &str) -> Option<&Entry> {
        if !dates::key_in_year(date_key, self.year) {
            return None;
        }
        self.entries.iter().find(|entry| entry.date_key == date_key)
    }

    pub fn merge(&mut self, entry: Entry) {
        self.entries.retain(|existing| existing.date_key != entry.date_key);
        self.entries.push(entry);
        // Keys are zero-padded UTC days, so lexical order is date order.
        self.entries.sort_by(|a, b| a.date_key.cmp(&b.date_key));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KnownYears(BTreeSet<i32>);

impl KnownYears {
    pub fn insert(&mut self, year: i32) -> bool {
        self.0.insert(year)
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<i32> for KnownYears {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What a submit would do: create right away, or update after the user
/// has seen the value it replaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlan {
    pub needs_confirmation: bool,
    pub date_key: String,
    pub payload: SavePayload,
    pub existing: Option<Entry>,
}

pub fn prepare_save(
    form_date: NaiveDate,
    is_sick: bool,
    severity: u8,
    collection: &YearCollection,
) -> SavePlan {
    let payload = SavePayload {
        date: dates::utc_midnight_iso(form_date),
        is_sick,
        severity: is_sick.then_some(severity),
    };
    let date_key = dates::date_key(form_date);
    let existing = collection.find(&date_key).cloned();

    SavePlan {
        needs_confirmation: existing.is_some(),
        date_key,
        payload,
        existing,
    }
}

/// Sends the plan's payload and normalizes the reply. The saved entry must
/// be for the day that was submitted.
pub async fn send_save<A: HealthApi>(
    api: &A,
    token: &str,
    plan: &SavePlan,
) -> Result<Entry, ClientError> {
    let raw = api.save_entry(&plan.payload, token).await?;
    let entry = normalize_entry(&raw)
        .ok_or_else(|| ClientError::Decode(format!("saved entry is malformed: {raw}")))?;
    if entry.date_key != plan.date_key {
        return Err(ClientError::Decode(format!(
            "saved entry is for {} instead of {}",
            entry.date_key, plan.date_key
        )));
    }
    Ok(entry)
}

pub fn apply_save(
    entry: Entry,
    collection: &mut YearCollection,
    known_years: &mut KnownYears,
) -> Result<(), ClientError> {
    if !dates::key_in_year(&entry.date_key, collection.year()) {
        return Err(ClientError::Decode(format!(
            "saved entry {} is outside {}",
            entry.date_key,
            collection.year()
        )));
    }
    collection.merge(entry);
    known_years.insert(collection.year());
    Ok(())
}
