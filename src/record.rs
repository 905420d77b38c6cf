use crate::grade_sheet::GradeColumn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub registration_number: String,
    pub name: String,
    pub father_name: String,
    pub father_address: String,
    pub father_occupation: String,
    pub guardian: String,
    pub mother_name: String,
    pub id_number: String,
    pub birth_place: String,
    pub birth_date: String,
    pub nationality: String,
    pub school_entry_date: String,
    pub accepted_class: String,
    pub previous_school: String,
    pub leave_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    RegistrationNumber,
    Name,
    FatherName,
    FatherAddress,
    FatherOccupation,
    Guardian,
    MotherName,
    IdNumber,
    BirthPlace,
    BirthDate,
    Nationality,
    SchoolEntryDate,
    AcceptedClass,
    PreviousSchool,
    LeaveDate,
}

impl PersonalField {
    pub const ALL: [PersonalField; 15] = [
        PersonalField::RegistrationNumber,
        PersonalField::Name,
        PersonalField::FatherName,
        PersonalField::FatherAddress,
        PersonalField::FatherOccupation,
        PersonalField::Guardian,
        PersonalField::MotherName,
        PersonalField::IdNumber,
        PersonalField::BirthPlace,
        PersonalField::BirthDate,
        PersonalField::Nationality,
        PersonalField::SchoolEntryDate,
        PersonalField::AcceptedClass,
        PersonalField::PreviousSchool,
        PersonalField::LeaveDate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PersonalField::RegistrationNumber => "registrationNumber",
            PersonalField::Name => "name",
            PersonalField::FatherName => "fatherName",
            PersonalField::FatherAddress => "fatherAddress",
            PersonalField::FatherOccupation => "fatherOccupation",
            PersonalField::Guardian => "guardian",
            PersonalField::MotherName => "motherName",
            PersonalField::IdNumber => "idNumber",
            PersonalField::BirthPlace => "birthPlace",
            PersonalField::BirthDate => "birthDate",
            PersonalField::Nationality => "nationality",
            PersonalField::SchoolEntryDate => "schoolEntryDate",
            PersonalField::AcceptedClass => "acceptedClass",
            PersonalField::PreviousSchool => "previousSchool",
            PersonalField::LeaveDate => "leaveDate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl PersonalInfo {
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::RegistrationNumber => &self.registration_number,
            PersonalField::Name => &self.name,
            PersonalField::FatherName => &self.father_name,
            PersonalField::FatherAddress => &self.father_address,
            PersonalField::FatherOccupation => &self.father_occupation,
            PersonalField::Guardian => &self.guardian,
            PersonalField::MotherName => &self.mother_name,
            PersonalField::IdNumber => &self.id_number,
            PersonalField::BirthPlace => &self.birth_place,
            PersonalField::BirthDate => &self.birth_date,
            PersonalField::Nationality => &self.nationality,
            PersonalField::SchoolEntryDate => &self.school_entry_date,
            PersonalField::AcceptedClass => &self.accepted_class,
            PersonalField::PreviousSchool => &self.previous_school,
            PersonalField::LeaveDate => &self.leave_date,
        }
    }

    pub fn set(&mut self, field: PersonalField, value: String) {
        let slot = match field {
            PersonalField::RegistrationNumber => &mut self.registration_number,
            PersonalField::Name => &mut self.name,
            PersonalField::FatherName => &mut self.father_name,
            PersonalField::FatherAddress => &mut self.father_address,
            PersonalField::FatherOccupation => &mut self.father_occupation,
            PersonalField::Guardian => &mut self.guardian,
            PersonalField::MotherName => &mut self.mother_name,
            PersonalField::IdNumber => &mut self.id_number,
            PersonalField::BirthPlace => &mut self.birth_place,
            PersonalField::BirthDate => &mut self.birth_date,
            PersonalField::Nationality => &mut self.nationality,
            PersonalField::SchoolEntryDate => &mut self.school_entry_date,
            PersonalField::AcceptedClass => &mut self.accepted_class,
            PersonalField::PreviousSchool => &mut self.previous_school,
            PersonalField::LeaveDate => &mut self.leave_date,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentDocument {
    pub personal_info: PersonalInfo,
    pub grade_columns: Vec<GradeColumn>,
    pub selected_subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    #[serde(flatten)]
    pub doc: StudentDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCard {
    pub id: String,
    pub display_name: String,
    pub registration_number: String,
    pub id_number: String,
    pub accepted_class: String,
    pub birth_date: String,
}

impl StudentRecord {
    pub fn card(&self) -> RecordCard {
        let info = &self.doc.personal_info;
        let display_name = format!("{} {}", info.name, info.father_name)
            .trim()
            .to_string();
        RecordCard {
            id: self.id.clone(),
            display_name,
            registration_number: info.registration_number.clone(),
            id_number: info.id_number.clone(),
            accepted_class: info.accepted_class.clone(),
            birth_date: info.birth_date.clone(),
        }
    }
}
