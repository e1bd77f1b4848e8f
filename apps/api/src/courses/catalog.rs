//! Hard-coded demo courses. There is no course database.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub id: u32,
    pub title: String,
    /// Percent complete.
    pub progress: u8,
    pub image: String,
    pub duration: String,
    pub last_accessed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCourse {
    pub id: u32,
    pub title: String,
    pub completed_date: NaiveDate,
    pub image: String,
    pub duration: String,
    pub certificate: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub enrolled: Vec<EnrolledCourse>,
    pub completed: Vec<CompletedCourse>,
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?w=800&auto=format&fit=crop&q=60")
}

fn enrolled(id: u32, title: &str, progress: u8, photo: &str, duration: &str, last_accessed: &str) -> EnrolledCourse {
    EnrolledCourse {
        id,
        title: title.to_string(),
        progress,
        image: unsplash(photo),
        duration: duration.to_string(),
        last_accessed: last_accessed.to_string(),
    }
}

pub fn demo_catalog() -> Catalog {
    Catalog {
        enrolled: vec![
            enrolled(1, "React Fundamentals", 65, "photo-1633356122102-3fe601e05bd2", "6 hours", "2 days ago"),
            enrolled(2, "Python for Data Science", 30, "photo-1526374965328-7f61d4dc18c5", "8 hours", "1 week ago"),
            enrolled(3, "JavaScript Advanced Concepts", 80, "photo-1627398242454-45a1465c2479", "5 hours", "3 days ago"),
        ],
        completed: vec![CompletedCourse {
            id: 4,
            title: "HTML & CSS Basics".to_string(),
            completed_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap_or_default(),
            image: unsplash("photo-1621839673705-6617adf9e890"),
            duration: "4 hours".to_string(),
            certificate: true,
        }],
    }
}

/// Finds an enrolled course by id.
pub fn enrolled_course(id: u32) -> Option<EnrolledCourse> {
    demo_catalog().enrolled.into_iter().find(|c| c.id == id)
}
