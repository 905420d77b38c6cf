use crate::grade_sheet::GradeSheet;
use crate::notice::Notice;
use crate::record::{PersonalField, PersonalInfo, StudentDocument};
use crate::store::DocumentStore;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub record_id: Option<String>,
    pub notice: Notice,
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    personal: PersonalInfo,
    sheet: GradeSheet,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    pub fn sheet(&self) -> &GradeSheet {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut GradeSheet {
        &mut self.sheet
    }

    pub fn update_field(&mut self, field: PersonalField, value: impl Into<String>) {
        self.personal.set(field, value.into());
    }

    pub fn document(&self) -> StudentDocument {
        StudentDocument {
            personal_info: self.personal.clone(),
            grade_columns: self.sheet.columns().to_vec(),
            selected_subjects: self.sheet.selected_subjects().to_vec(),
        }
    }

    pub fn save(&mut self, store: &mut dyn DocumentStore) -> SaveOutcome {
        let doc = self.document();
        match store.create(&doc) {
            Ok(id) => {
                self.open_new();
                SaveOutcome {
                    record_id: Some(id),
                    notice: Notice::saved(),
                }
            }
            Err(e) => {
                error!(error = %e, "saving student record failed");
                SaveOutcome {
                    record_id: None,
                    notice: Notice::save_failed(),
                }
            }
        }
    }

    pub fn open_new(&mut self) {
        self.personal = PersonalInfo::default();
        self.sheet.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::MemoryStore;

    const MATH: &str = "الرياضيات";
    const ARABIC: &str = "اللغة العربية والخط";

    fn filled_form() -> FormController {
        let mut form = FormController::new();
        form.update_field(PersonalField::RegistrationNumber, "101");
        form.update_field(PersonalField::Name, "Ali Hassan");
        form.update_field(PersonalField::AcceptedClass, "الأول المتوسط");
        let col = form.sheet_mut().add_column();
        form.sheet_mut().set_score("1", MATH, "88");
        form.sheet_mut().set_score(&col, ARABIC, "");
        form.sheet_mut().set_column_grade(&col, "الثاني الابتدائي");
        form
    }

    #[test]
    fn successful_save_writes_one_document_and_resets() {
        let mut store = MemoryStore::default();
        let mut form = filled_form();
        form.sheet_mut().toggle_subject(MATH);
        let expected = form.document();

        let outcome = form.save(&mut store);
        assert!(!outcome.notice.is_error());
        let id = outcome.record_id.expect("record id");
        assert_eq!(store.create_calls, 1);
        assert_eq!(store.docs.get(&id), Some(&expected));

        // Deselected subjects still travel in the saved columns.
        assert_eq!(expected.grade_columns[0].grades.get(MATH).map(String::as_str), Some("88"));
        assert!(!expected.selected_subjects.iter().any(|s| s == MATH));

        assert_eq!(form.personal(), &PersonalInfo::default());
        let cols = form.sheet().columns();
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].grades.len(), 14);
        assert!(!cols[0].grades.contains_key(MATH));
    }

    #[test]
    fn failed_save_leaves_state_untouched() {
        let mut store = MemoryStore::failing();
        let mut form = filled_form();
        let personal_before = form.personal().clone();
        let sheet_before = form.sheet().clone();

        let outcome = form.save(&mut store);
        assert!(outcome.notice.is_error());
        assert_eq!(outcome.record_id, None);
        assert_eq!(store.create_calls, 1);
        assert_eq!(form.personal(), &personal_before);
        assert_eq!(form.sheet(), &sheet_before);

        // A retry after the store recovers goes through with the same data.
        store.fail_writes = false;
        let retry = form.save(&mut store);
        let id = retry.record_id.expect("retry saved");
        assert_eq!(store.docs[&id].personal_info, personal_before);
    }

    #[test]
    fn open_new_starts_from_empty_state() {
        let mut form = filled_form();
        form.open_new();
        assert_eq!(form.personal(), &PersonalInfo::default());
        assert_eq!(form.sheet().columns().len(), 1);
        assert_eq!(form.sheet().columns()[0].id, "1");
    }
}
