use std::collections::{BTreeMap, BTreeSet};
use serde::{Serialize, Deserialize};

/// A survey respondent: their free-text comment plus the timeframes they
/// marked themselves available for and the timeframes they ended up with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    name: String,
    comment: String,
    available: BTreeSet<String>,
    scheduled: BTreeSet<String>,
}

impl Person {
    fn new(name: &str, comment: &str) -> Self {
        Self {
            name: name.to_string(),
            comment: comment.to_string(),
            available: BTreeSet::new(),
            scheduled: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn available(&self) -> &BTreeSet<String> {
        &self.available
    }

    pub fn scheduled(&self) -> &BTreeSet<String> {
        &self.scheduled
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }
}

/// One row of the survey: a recurring time slot, its position in the input
/// file, and the person sets mirroring the ones on `Person`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeframe {
    name: String,
    ordinal: usize,
    available: BTreeSet<String>,
    scheduled: BTreeSet<String>,
}

impl Timeframe {
    fn new(name: &str, ordinal: usize) -> Self {
        Self {
            name: name.to_string(),
            ordinal,
            available: BTreeSet::new(),
            scheduled: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this timeframe's row in the input file, used to sort
    /// schedule output back into survey order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn available(&self) -> &BTreeSet<String> {
        &self.available
    }

    pub fn scheduled(&self) -> &BTreeSet<String> {
        &self.scheduled
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }
}

/// The person<->timeframe relation, stored as two directional indexes so both
/// lookups are cheap. The scheduled halves are only ever mutated through
/// `assign` and `unassign`, which update both sides in one call; nothing else
/// can leave the two indexes disagreeing.
///
/// `BTreeMap`/`BTreeSet` keep iteration order deterministic within a run
/// (lexicographic by name), which the greedy pass relies on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    persons: BTreeMap<String, Person>,
    timeframes: BTreeMap<String, Timeframe>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a timeframe row. Returns false if the name is already taken.
    pub fn insert_timeframe(&mut self, name: &str, ordinal: usize) -> bool {
        if self.timeframes.contains_key(name) {
            return false;
        }
        self.timeframes
            .insert(name.to_string(), Timeframe::new(name, ordinal));
        true
    }

    /// Records that `person` marked themselves available for `timeframe`,
    /// creating the person on their first mark. The comment is only stored at
    /// creation; later marks for the same person ignore it.
    pub fn mark_available(&mut self, person: &str, comment: &str, timeframe: &str) {
        if !self.timeframes.contains_key(timeframe) {
            return;
        }
        self.persons
            .entry(person.to_string())
            .or_insert_with(|| Person::new(person, comment))
            .available
            .insert(timeframe.to_string());
        if let Some(frame) = self.timeframes.get_mut(timeframe) {
            frame.available.insert(person.to_string());
        }
    }

    /// Schedules `person` into `timeframe`, updating both sides of the
    /// relation. Silently does nothing unless the pair is marked available,
    /// so a scheduled set can never outgrow its availability set.
    pub fn assign(&mut self, person: &str, timeframe: &str) {
        let feasible = self
            .persons
            .get(person)
            .map_or(false, |p| p.available.contains(timeframe))
            && self
                .timeframes
                .get(timeframe)
                .map_or(false, |t| t.available.contains(person));
        if !feasible {
            return;
        }
        if let Some(p) = self.persons.get_mut(person) {
            p.scheduled.insert(timeframe.to_string());
        }
        if let Some(t) = self.timeframes.get_mut(timeframe) {
            t.scheduled.insert(person.to_string());
        }
    }

    /// Removes `person` from `timeframe` on both sides of the relation.
    pub fn unassign(&mut self, person: &str, timeframe: &str) {
        if let Some(p) = self.persons.get_mut(person) {
            p.scheduled.remove(timeframe);
        }
        if let Some(t) = self.timeframes.get_mut(timeframe) {
            t.scheduled.remove(person);
        }
    }

    pub fn person(&self, name: &str) -> Option<&Person> {
        self.persons.get(name)
    }

    pub fn timeframe(&self, name: &str) -> Option<&Timeframe> {
        self.timeframes.get(name)
    }

    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn timeframes(&self) -> impl Iterator<Item = &Timeframe> {
        self.timeframes.values()
    }

    pub fn person_names(&self) -> Vec<String> {
        self.persons.keys().cloned().collect()
    }

    pub fn timeframe_names(&self) -> Vec<String> {
        self.timeframes.keys().cloned().collect()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    pub fn timeframe_count(&self) -> usize {
        self.timeframes.len()
    }
}
