//! XML response extraction
//!
//! Every CampusNet read response goes through the same two steps: parse the
//! body, then check whether the root element is a fault. Only non-fault
//! documents reach an [`Extractor`]'s field mapping, so mappers can treat
//! the attributes they need as present.

use crate::error::CampusNetError;
use crate::model::{Course, ExamResult, Profile};
use crate::xml::XmlElement;

/// Tag-name suffix that marks an API-level error document
const FAULT_SUFFIX: &str = "Fault";

/// Path from the grades root to the individual results
const EXAM_RESULT_PATH: &str = "EducationProgramme/ExamResults/ExamResult";

/// Whether a parsed response is a fault rather than data
pub(crate) fn is_fault(root: &XmlElement) -> bool {
    root.name().ends_with(FAULT_SUFFIX)
}

/// Maps one response shape to a typed record
///
/// Implementors provide [`Extractor::extract_information`]; the shared
/// [`Extractor::extract`] parses and fault-checks before calling it.
pub trait Extractor {
    /// Record produced from a non-fault response
    type Output;

    /// Map the root element of a non-fault document
    fn extract_information(&self, root: &XmlElement) -> Result<Self::Output, CampusNetError>;

    /// Parse a raw response body
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - The response carried data
    /// * `Ok(None)` - The root element is a fault
    /// * `Err` - The body is not well-formed XML, or a non-fault response
    ///   lacks an expected attribute
    fn extract(&self, response_text: &str) -> Result<Option<Self::Output>, CampusNetError> {
        let root = XmlElement::parse(response_text)?;
        if is_fault(&root) {
            tracing::warn!(root = root.name(), "CampusNet returned a fault response");
            return Ok(None);
        }
        self.extract_information(&root).map(Some)
    }
}

/// Extracts the user profile from a `UserInfo` response
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileExtractor;

impl Extractor for ProfileExtractor {
    type Output = Profile;

    fn extract_information(&self, root: &XmlElement) -> Result<Profile, CampusNetError> {
        Ok(Profile {
            first_name: root.required_attribute("GivenName")?.to_string(),
            last_name: root.required_attribute("FamilyName")?.to_string(),
            email: root.required_attribute("Email")?.to_string(),
        })
    }
}

/// Extracts exam results from a `Grades` response
#[derive(Debug, Clone, Copy, Default)]
pub struct GradesExtractor;

impl GradesExtractor {
    fn map_exam_result(result: &XmlElement) -> Result<ExamResult, CampusNetError> {
        Ok(ExamResult {
            course: Course {
                title: result.required_attribute("Name")?.to_string(),
                code: result.required_attribute("CourseCode")?.to_string(),
            },
            credit_points: result.required_attribute("EctsPoints")?.to_string(),
            grade: result.required_attribute("Grade")?.to_string(),
            period: result.required_attribute("Period")?.to_string(),
            year: result.required_attribute("Year")?.to_string(),
        })
    }
}

impl Extractor for GradesExtractor {
    type Output = Vec<ExamResult>;

    fn extract_information(&self, root: &XmlElement) -> Result<Vec<ExamResult>, CampusNetError> {
        root.find_all(EXAM_RESULT_PATH)
            .into_iter()
            .map(Self::map_exam_result)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PROFILE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<User UserId="123" GivenName="A" FamilyName="B" Email="c@d.com" PreferredLanguage="da-DK"/>"#;

    fn exam_result_xml(n: usize) -> String {
        format!(
            r#"<ExamResult Name="Course {n}" CourseCode="0{n}" EctsPoints="5" Grade="{g}" Period="Summer" Year="20{n:02}"/>"#,
            g = n % 13
        )
    }

    fn grades_xml(count: usize) -> String {
        let results: String = (0..count).map(exam_result_xml).collect();
        format!(
            r#"<EducationProgrammes><EducationProgramme Name="MSc"><ExamResults>{}</ExamResults></EducationProgramme></EducationProgrammes>"#,
            results
        )
    }

    #[test]
    fn test_profile_extraction() {
        let profile = ProfileExtractor.extract(PROFILE_XML).unwrap();
        assert_eq!(
            profile,
            Some(Profile {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                email: "c@d.com".to_string(),
            })
        );
    }

    #[test]
    fn test_profile_missing_attribute_is_an_error() {
        let result = ProfileExtractor.extract(r#"<User GivenName="A" FamilyName="B"/>"#);
        assert!(matches!(
            result,
            Err(CampusNetError::MissingAttribute { ref attribute, .. }) if attribute == "Email"
        ));
    }

    #[test]
    fn test_grades_extraction_maps_every_field() {
        let xml = r#"<EducationProgrammes>
            <EducationProgramme>
                <ExamResults>
                    <ExamResult Name="Algorithms" CourseCode="02105" EctsPoints="7.5" Grade="12" Period="Winter" Year="2015"/>
                </ExamResults>
            </EducationProgramme>
        </EducationProgrammes>"#;

        let grades = GradesExtractor.extract(xml).unwrap().unwrap();
        assert_eq!(
            grades,
            vec![ExamResult {
                course: Course {
                    title: "Algorithms".to_string(),
                    code: "02105".to_string(),
                },
                credit_points: "7.5".to_string(),
                grade: "12".to_string(),
                period: "Winter".to_string(),
                year: "2015".to_string(),
            }]
        );
    }

    #[test]
    fn test_grades_without_results_is_empty_not_absent() {
        let grades = GradesExtractor.extract(&grades_xml(0)).unwrap();
        assert_eq!(grades, Some(Vec::new()));

        let grades = GradesExtractor.extract("<EducationProgrammes/>").unwrap();
        assert_eq!(grades, Some(Vec::new()));
    }

    #[test]
    fn test_grades_across_programmes_keep_document_order() {
        let xml = format!(
            "<EducationProgrammes><EducationProgramme><ExamResults>{}</ExamResults></EducationProgramme>\
             <EducationProgramme><ExamResults>{}</ExamResults></EducationProgramme></EducationProgrammes>",
            exam_result_xml(1),
            exam_result_xml(2)
        );
        let codes: Vec<_> = GradesExtractor
            .extract(&xml)
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|r| r.course.code)
            .collect();
        assert_eq!(codes, ["01", "02"]);
    }

    #[test]
    fn test_grades_result_missing_attribute_is_an_error() {
        let xml = r#"<R><EducationProgramme><ExamResults><ExamResult Name="X" CourseCode="1"/></ExamResults></EducationProgramme></R>"#;
        assert!(matches!(
            GradesExtractor.extract(xml),
            Err(CampusNetError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_fault_skips_field_mapping() {
        // Neither extractor would find its attributes here
        let xml = r#"<RestFault><ErrorCode>401</ErrorCode></RestFault>"#;
        assert_eq!(ProfileExtractor.extract(xml).unwrap(), None);
        assert_eq!(GradesExtractor.extract(xml).unwrap(), None);
    }

    #[test]
    fn test_fault_suffix_must_end_the_name() {
        let xml = r#"<FaultyUser GivenName="A" FamilyName="B" Email="c@d.com"/>"#;
        assert!(ProfileExtractor.extract(xml).unwrap().is_some());
    }

    #[test]
    fn test_malformed_xml_is_fatal_for_both_extractors() {
        let xml = "<User GivenName=\"A\"><Unclosed></User>";
        assert!(ProfileExtractor.extract(xml).unwrap_err().is_malformed_response());
        assert!(GradesExtractor.extract(xml).unwrap_err().is_malformed_response());
    }

    #[test]
    fn test_malformed_fault_is_an_error_not_absent() {
        let inputs = [
            "<RestFault>a & b</RestFault>",
            "<RestFault>&bogus;</RestFault>",
            "<x:RestFault/>",
            "<RestFault/><?xml version=\"1.0\"?>",
            "<1Fault/>",
        ];

        for xml in inputs {
            let result = ProfileExtractor.extract(xml);
            assert!(
                matches!(&result, Err(e) if e.is_malformed_response()),
                "Expected malformed error for {:?}, got {:?}",
                xml,
                result
            );
            assert!(GradesExtractor.extract(xml).is_err());
        }

        let profile = "<User GivenName=\"A\" FamilyName=\"B\" Email=\"c\">&nbsp;</User>";
        assert!(ProfileExtractor.extract(profile).unwrap_err().is_malformed_response());
    }

    // Any root tag ending in "Fault" yields None for every extractor
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_fault_root_is_absent(
            prefix in "[A-Za-z][A-Za-z0-9]{0,15}",
            child in "[A-Za-z][A-Za-z0-9]{0,10}",
            value in "[a-zA-Z0-9 .,!?]{0,40}",
        ) {
            let xml = format!(
                r#"<{prefix}Fault Message="{value}"><{child} GivenName="x"/></{prefix}Fault>"#
            );

            prop_assert_eq!(ProfileExtractor.extract(&xml).unwrap(), None);
            prop_assert_eq!(GradesExtractor.extract(&xml).unwrap(), None);
        }
    }

    // N results come back as N records in document order
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_grades_length_and_order(count in 1usize..40) {
            let grades = GradesExtractor.extract(&grades_xml(count)).unwrap().unwrap();

            prop_assert_eq!(grades.len(), count);
            for (i, result) in grades.iter().enumerate() {
                prop_assert_eq!(&result.course.title, &format!("Course {}", i));
            }
        }
    }

    // Extraction is a pure function of the input text
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_extract_is_idempotent(
            given in "[A-Za-z]{1,20}",
            family in "[A-Za-z]{1,20}",
            count in 0usize..10,
        ) {
            let profile_xml = format!(
                r#"<User GivenName="{given}" FamilyName="{family}" Email="{given}@example.com"/>"#
            );
            prop_assert_eq!(
                ProfileExtractor.extract(&profile_xml).unwrap(),
                ProfileExtractor.extract(&profile_xml).unwrap()
            );

            let grades = grades_xml(count);
            prop_assert_eq!(
                GradesExtractor.extract(&grades).unwrap(),
                GradesExtractor.extract(&grades).unwrap()
            );
        }
    }
}
