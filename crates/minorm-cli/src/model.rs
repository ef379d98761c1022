//! Demo entity: a student row of the `students` table

use chrono::NaiveDate;
use minorm_core::{Entity, EntityDef, EntityEnum, FieldDef};
use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StudentStatus {
    #[default]
    Active,
    Graduated,
    Expelled,
    AcademicLeave,
}

impl StudentStatus {
    pub fn as_member(&self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Graduated => "GRADUATED",
            StudentStatus::Expelled => "EXPELLED",
            StudentStatus::AcademicLeave => "ACADEMIC_LEAVE",
        }
    }
}

impl EntityEnum for StudentStatus {
    const NAME: &'static str = "StudentStatus";
    const MEMBERS: &'static [&'static str] = &["ACTIVE", "GRADUATED", "EXPELLED", "ACADEMIC_LEAVE"];

    fn from_member(member: &str) -> Option<Self> {
        match member {
            "ACTIVE" => Some(StudentStatus::Active),
            "GRADUATED" => Some(StudentStatus::Graduated),
            "EXPELLED" => Some(StudentStatus::Expelled),
            "ACADEMIC_LEAVE" => Some(StudentStatus::AcademicLeave),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub scholarship: bool,
    pub status: StudentStatus,
}

impl Entity for Student {
    fn describe() -> EntityDef<Self> {
        EntityDef::new()
            .table("students")
            .field(FieldDef::int64("id", |s: &mut Student| &mut s.id).id())
            .field(FieldDef::text("email", |s: &mut Student| &mut s.email))
            .field(FieldDef::text("first_name", |s: &mut Student| &mut s.first_name))
            .field(FieldDef::text("last_name", |s: &mut Student| &mut s.last_name))
            .field(FieldDef::date("birthday", |s: &mut Student| &mut s.birthday))
            .field(FieldDef::boolean("scholarship", |s: &mut Student| &mut s.scholarship).column("has_scholarship"))
            .field(FieldDef::enumeration("status", |s: &mut Student| &mut s.status))
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} <{}>, born {}, scholarship: {}, status: {}",
            self.id,
            self.first_name,
            self.last_name,
            self.email,
            self.birthday.format("%Y-%m-%d"),
            if self.scholarship { "yes" } else { "no" },
            self.status.as_member()
        )
    }
}
