//! Class ID → career label lookup.
//!
//! The classifier emits integer class IDs 0–15; this table is the only place
//! they acquire a human-readable name.

/// Career labels indexed by class ID.
pub const CAREERS: [&str; 16] = [
    "Software Engineer",
    "Business Owner",
    "Banker",
    "Lawyer",
    "Accountant",
    "Doctor",
    "Real Estate Developer",
    "Stock Investor",
    "Construction Engineer",
    "Artist",
    "Game Developer",
    "Government Officer",
    "Teacher",
    "Designer",
    "Scientist",
    "Writer",
];

/// Label for a class ID, or `None` if the ID is not mapped.
pub fn career_label(class_id: i64) -> Option<&'static str> {
    usize::try_from(class_id).ok().and_then(|i| CAREERS.get(i).copied())
}
