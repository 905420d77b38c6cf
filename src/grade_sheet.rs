use crate::catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeColumn {
    pub id: String,
    pub grade: String,
    #[serde(default)]
    pub grades: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub subject: String,
    pub cells: Vec<String>,
}

// Column ids come from a counter that only moves forward, so an id is never
// handed out twice between resets even when columns in the middle are
// removed. Deselecting a subject hides its row but keeps every score already
// stored under it; selecting it again shows those scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSheet {
    columns: Vec<GradeColumn>,
    selected: Vec<String>,
    next_id: u64,
}

impl Default for GradeSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeSheet {
    pub fn new() -> Self {
        let selected = catalog::toggleable_subjects()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut sheet = GradeSheet {
            columns: Vec::new(),
            selected,
            next_id: 1,
        };
        sheet.reset();
        sheet
    }

    pub fn columns(&self) -> &[GradeColumn] {
        &self.columns
    }

    pub fn selected_subjects(&self) -> &[String] {
        &self.selected
    }

    pub fn column(&self, id: &str) -> Option<&GradeColumn> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn add_column(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.columns.push(GradeColumn {
            id: id.clone(),
            grade: catalog::default_grade().to_string(),
            grades: self.seed_scores(),
        });
        id
    }

    /// Removes the column with `id`. Refused when it is the last column.
    pub fn remove_column(&mut self, id: &str) -> bool {
        if self.columns.len() <= 1 {
            return false;
        }
        let before = self.columns.len();
        self.columns.retain(|c| c.id != id);
        self.columns.len() != before
    }

    pub fn set_column_grade(&mut self, id: &str, grade: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(col) => {
                col.grade = grade.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_score(&mut self, id: &str, subject: &str, value: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(col) => {
                col.grades.insert(subject.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn score(&self, id: &str, subject: &str) -> Option<&str> {
        self.column(id)
            .and_then(|c| c.grades.get(subject))
            .map(|s| s.as_str())
    }

    pub fn toggle_subject(&mut self, subject: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == subject) {
            self.selected.remove(pos);
            return false;
        }
        let rank = catalog::subject_rank(subject);
        let at = self
            .selected
            .iter()
            .position(|s| catalog::subject_rank(s) > rank)
            .unwrap_or(self.selected.len());
        self.selected.insert(at, subject.to_string());
        true
    }

    pub fn rows(&self) -> Vec<SheetRow> {
        self.selected
            .iter()
            .map(|subject| SheetRow {
                subject: subject.clone(),
                cells: self
                    .columns
                    .iter()
                    .map(|c| c.grades.get(subject).cloned().unwrap_or_default())
                    .collect(),
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.columns.clear();
        self.next_id = 1;
        self.add_column();
    }

    fn seed_scores(&self) -> BTreeMap<String, String> {
        self.selected
            .iter()
            .map(|s| (s.clone(), String::new()))
            .collect()
    }
}
