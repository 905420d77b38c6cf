/// Master subject list in display order. The last `SUMMARY_ROW_COUNT`
/// entries are result rows and never take part in subject selection.
pub const SUBJECTS: [&str; 18] = [
    "القرآن الكريم وتلاوته",
    "التربية الإسلامية",
    "اللغة العربية والخط",
    "اللغة الإنجليزية",
    "الرياضيات",
    "التاريخ",
    "الجغرافية",
    "التربية الوطنية",
    "التربية الاجتماعية والاخلاقية",
    "العلوم",
    "التربية الفنية والاعمال اليدوية",
    "التربية الرياضية",
    "النشيد والموسيقى",
    "التربية الاسرية",
    "التربية الزراعية",
    "المجموع",
    "ملاحظات عن النتائج",
    "النتيجة النهائية",
];

pub const SUMMARY_ROW_COUNT: usize = 3;

pub const ELEMENTARY_GRADES: [&str; 6] = [
    "الأول الابتدائي",
    "الثاني الابتدائي",
    "الثالث الابتدائي",
    "الرابع الابتدائي",
    "الخامس الابتدائي",
    "السادس الابتدائي",
];

pub const ALL_GRADES: [&str; 15] = [
    "الأول الابتدائي",
    "الثاني الابتدائي",
    "الثالث الابتدائي",
    "الرابع الابتدائي",
    "الخامس الابتدائي",
    "السادس الابتدائي",
    "الأول المتوسط",
    "الثاني المتوسط",
    "الثالث المتوسط",
    "الرابع العلمي",
    "الخامس العلمي",
    "السادس العلمي",
    "الرابع الأدبي",
    "الخامس الأدبي",
    "السادس الأدبي",
];

pub const MSG_SAVE_OK: &str = "تم حفظ بيانات الطالب بنجاح!";
pub const MSG_SAVE_FAILED: &str = "حدث خطأ أثناء حفظ البيانات";
pub const MSG_DELETE_OK: &str = "تم حذف الطالب بنجاح";
pub const MSG_DELETE_FAILED: &str = "حدث خطأ أثناء حذف الطالب";
pub const MSG_LOADING: &str = "جاري تحميل البيانات...";
pub const MSG_EMPTY: &str = "لا يوجد طلاب مسجلين";

pub fn toggleable_subjects() -> &'static [&'static str] {
    &SUBJECTS[..SUBJECTS.len() - SUMMARY_ROW_COUNT]
}

pub fn summary_rows() -> &'static [&'static str] {
    &SUBJECTS[SUBJECTS.len() - SUMMARY_ROW_COUNT..]
}

pub fn default_grade() -> &'static str {
    ELEMENTARY_GRADES[0]
}

pub fn is_toggleable_subject(name: &str) -> bool {
    toggleable_subjects().contains(&name)
}

pub fn is_elementary_grade(label: &str) -> bool {
    ELEMENTARY_GRADES.contains(&label)
}

pub fn subject_rank(name: &str) -> usize {
    SUBJECTS
        .iter()
        .position(|s| *s == name)
        .unwrap_or(SUBJECTS.len())
}
