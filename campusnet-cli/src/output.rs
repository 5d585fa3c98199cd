//! Output formatting for profile and grades

use campusnet_client::{ExamResult, Profile};

const NO_DATA: &str = "No data available";

/// Output formatter for CampusNet records
pub struct OutputFormatter {
    quiet: bool,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print the profile, or a notice when the API returned none
    pub fn print_profile(&self, profile: Option<&Profile>) {
        match profile {
            Some(profile) => println!("{}", self.format_profile(profile)),
            None => eprintln!("Profile: {}", NO_DATA),
        }
    }

    /// Print the exam results, or a notice when the API returned none
    pub fn print_grades(&self, grades: Option<&[ExamResult]>) {
        match grades {
            Some(grades) => print!("{}", self.format_grades(grades)),
            None => eprintln!("Grades: {}", NO_DATA),
        }
    }

    fn format_profile(&self, profile: &Profile) -> String {
        if self.quiet {
            format!(
                "{}\t{}\t{}",
                profile.first_name, profile.last_name, profile.email
            )
        } else {
            format!(
                "{} {} <{}>",
                profile.first_name, profile.last_name, profile.email
            )
        }
    }

    fn format_grades(&self, grades: &[ExamResult]) -> String {
        if self.quiet {
            return grades
                .iter()
                .map(|r| {
                    format!(
                        "{}\t{}\t{}\t{}\t{}\t{}\n",
                        r.course.code, r.course.title, r.grade, r.credit_points, r.period, r.year
                    )
                })
                .collect();
        }

        if grades.is_empty() {
            return "No exam results\n".to_string();
        }

        let title_width = grades
            .iter()
            .map(|r| r.course.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("Course".len());

        let mut out = format!(
            "{:<7} {:<title_width$} {:>5} {:>5}  {}\n",
            "Code", "Course", "Grade", "ECTS", "Term"
        );
        for r in grades {
            out.push_str(&format!(
                "{:<7} {:<title_width$} {:>5} {:>5}  {} {}\n",
                r.course.code, r.course.title, r.grade, r.credit_points, r.period, r.year
            ));
        }
        out.push_str(&format!("\n{} exam result(s)\n", grades.len()));
        out
    }
}
