//! Demo data for an empty store.
//!
//! Enrolments go through the ledger like any other request, so a full
//! course or a duplicate simply skips that pairing.

use rand::{Rng, seq::IndexedRandom};
use registrar_core::{
  DomainError,
  course::NewCourse,
  records::Page,
  store::RegistrarStore,
  student::NewStudent,
};

/// `(student number, name, email, phone)`
const SAMPLE_STUDENTS: [(&str, &str, &str, &str); 5] = [
  ("S1001", "Ming Wang", "wang@example.com", "1234567890"),
  ("S1002", "Hua Lee", "lee@example.com", "1234567891"),
  ("S1003", "San Zhang", "zhang@example.com", "1234567892"),
  ("S1004", "Si Liu", "liu@example.com", "1234567893"),
  ("S1005", "Wu Chen", "chen@example.com", "1234567894"),
];

/// `(code, title, description, credits, max students)`
const SAMPLE_COURSES: [(&str, &str, &str, i64, i64); 5] = [
  ("CS101", "Introduction to Computing", "Foundations of computer science", 3, 30),
  ("CS201", "Data Structures", "Core data structures and algorithms", 4, 25),
  ("CS301", "Database Systems", "Relational database theory and practice", 4, 20),
  ("CS401", "Artificial Intelligence", "AI fundamentals and applications", 3, 15),
  ("CS501", "Software Engineering", "Software development methods and practice", 4, 20),
];

/// What [`seed`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
  /// The store already held students or courses; nothing was written.
  Skipped,
  Seeded { students: usize, courses: usize, enrollments: usize },
}

/// Populate an empty store with sample students and courses, enrolling each
/// student in two to four random courses.
pub async fn seed<S, R>(store: &S, rng: &mut R) -> Result<SeedOutcome, S::Error>
where
  S: RegistrarStore,
  R: Rng,
{
  let probe = Page { skip: 0, limit: 1 };
  let has_students = !store.list_students(probe).await?.is_empty();
  let has_courses = !store.list_courses(probe).await?.is_empty();
  if has_students || has_courses {
    tracing::info!(has_students, has_courses, "store already has data; skipping seed");
    return Ok(SeedOutcome::Skipped);
  }

  let mut students = Vec::with_capacity(SAMPLE_STUDENTS.len());
  for (number, name, email, phone) in SAMPLE_STUDENTS {
    let mut new = NewStudent::new(number, name, email);
    new.phone = Some(phone.to_owned());
    students.push(store.create_student(new).await?);
  }

  let mut courses = Vec::with_capacity(SAMPLE_COURSES.len());
  for (code, title, description, credits, max) in SAMPLE_COURSES {
    let mut new = NewCourse::new(code, title, credits, max);
    new.description = Some(description.to_owned());
    courses.push(store.create_course(new).await?);
  }

  let mut enrollments = 0;
  for student in &students {
    let count = rng.random_range(2..=4);
    for course in courses.choose_multiple(rng, count) {
      match store.create_enrollment(student.id, course.id).await {
        Ok(_) => {
          enrollments += 1;
          tracing::info!(student = %student.name, course = %course.title, "enrolled");
        }
        Err(e) if e.domain().is_some() => {
          tracing::warn!(student = %student.name, course = %course.title, error = %e, "skipped");
        }
        Err(e) => return Err(e),
      }
    }
  }

  for student in &students {
    let titles: Vec<String> = store
      .enrollments_for_student(student.id)
      .await?
      .into_iter()
      .filter_map(|e| courses.iter().find(|c| c.id == e.course_id))
      .map(|c| c.title.clone())
      .collect();
    tracing::info!(
      id = student.id,
      number = %student.student_number,
      courses = %titles.join(", "),
      "seeded student"
    );
  }

  Ok(SeedOutcome::Seeded {
    students: students.len(),
    courses: courses.len(),
    enrollments,
  })
}
