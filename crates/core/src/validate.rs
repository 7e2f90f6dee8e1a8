//! Structural checks applied to every record before it enters a store.
//!
//! Only shape is checked. The mathematics inside questions, steps and answers
//! is not.

use crate::error::{FieldPath, ValidationError, Violation};
use crate::notes::{Section, TopicNotes, WorkedExample};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks one topic record, returning the first violation found.
///
/// Fields are visited in declaration order so the reported violation is
/// deterministic for a given record.
pub fn validate_topic(key: &str, notes: &TopicNotes) -> Result<(), ValidationError> {
    let empty = |field| Err(ValidationError::new(key, FieldPath::Topic { field }, Violation::Empty));

    if is_blank(key) {
        return empty("key");
    }
    for (field, value) in [
        ("topic", &notes.topic),
        ("subject", &notes.subject),
        ("grade_level", &notes.grade_level),
        ("summary", &notes.summary),
    ] {
        if is_blank(value) {
            return empty(field);
        }
    }
    if notes.sections.is_empty() {
        return empty("sections");
    }

    for (index, section) in notes.sections.iter().enumerate() {
        validate_section(key, index, section)?;
    }
    Ok(())
}

fn validate_section(key: &str, index: usize, section: &Section) -> Result<(), ValidationError> {
    let Some(examples) = &section.worked_examples else {
        return Ok(());
    };
    for (example_index, example) in examples.iter().enumerate() {
        if let Some(field) = first_empty_field(example) {
            return Err(ValidationError::new(
                key,
                FieldPath::WorkedExample {
                    section_index: index,
                    section_title: section.title.clone(),
                    example_index,
                    field,
                },
                Violation::Empty,
            ));
        }
    }
    Ok(())
}

fn first_empty_field(example: &WorkedExample) -> Option<&'static str> {
    if is_blank(&example.question) {
        Some("question")
    } else if example.steps.is_empty() {
        Some("steps")
    } else if is_blank(&example.final_answer) {
        Some("final_answer")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_notes() -> TopicNotes {
        TopicNotes {
            topic: "F3 Bearings".to_string(),
            subject: "Mathematics".to_string(),
            grade_level: "O-Level Form 3".to_string(),
            summary: "Compass and three-figure bearings.".to_string(),
            sections: vec![Section::new("Introduction", "A bearing is an angle.")],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate_topic("F3 Bearings", &valid_notes()).is_ok());
    }

    #[test]
    fn test_each_required_string_is_checked() {
        for field in ["topic", "subject", "grade_level", "summary"] {
            let mut notes = valid_notes();
            match field {
                "topic" => notes.topic.clear(),
                "subject" => notes.subject.clear(),
                "grade_level" => notes.grade_level = "   ".to_string(),
                _ => notes.summary = "\n".to_string(),
            }
            let err = validate_topic("F3 Bearings", &notes).unwrap_err();
            assert_eq!(err.path, FieldPath::Topic { field });
            assert_eq!(err.topic, "F3 Bearings");
        }
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let err = validate_topic(" ", &valid_notes()).unwrap_err();
        assert_eq!(err.field(), "key");
    }

    #[test]
    fn test_empty_sections_rejected() {
        let mut notes = valid_notes();
        notes.sections.clear();
        let err = validate_topic("F3 Bearings", &notes).unwrap_err();
        assert_eq!(err.path, FieldPath::Topic { field: "sections" });
        assert_eq!(err.violation, Violation::Empty);
    }

    #[test]
    fn test_empty_worked_examples_list_is_allowed() {
        let mut notes = valid_notes();
        notes.sections[0].worked_examples = Some(vec![]);
        assert!(validate_topic("F3 Bearings", &notes).is_ok());
    }

    #[test]
    fn test_worked_example_fields_reported_with_position() {
        let cases = [
            (WorkedExample::new("", ["step"], "answer"), "question"),
            (WorkedExample::new("q", Vec::<String>::new(), "answer"), "steps"),
            (WorkedExample::new("q", ["step"], ""), "final_answer"),
        ];
        for (bad, field) in cases {
            let mut notes = valid_notes();
            notes.sections.push(
                Section::new("Back bearings", "Add or subtract 180°.")
                    .with_examples(vec![WorkedExample::new("q", ["s"], "a"), bad]),
            );
            let err = validate_topic("F3 Bearings", &notes).unwrap_err();
            assert_eq!(
                err.path,
                FieldPath::WorkedExample {
                    section_index: 1,
                    section_title: "Back bearings".to_string(),
                    example_index: 1,
                    field,
                }
            );
        }
    }

    #[test]
    fn test_empty_strings_inside_lists_are_not_checked() {
        let mut notes = valid_notes();
        notes.key_points = vec![String::new()];
        notes.sections[0].content.clear();
        assert!(validate_topic("F3 Bearings", &notes).is_ok());
    }
}
