//! Required-field checks run before any page is written.

use shared::domain::Page;

pub const FILENAME_REQUIRED: &str = "The filename is required.";
pub const TITLE_REQUIRED: &str = "The title is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Satisfied by either the page `name` or its `path`.
    Filename,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn required(field: Field, message: &'static str) -> Self {
        Self {
            field,
            rule: Rule::Required,
            message,
        }
    }
}

pub const PAGE_RULES: &[FieldRule] = &[FieldRule::required(Field::Filename, FILENAME_REQUIRED)];

pub fn validate_page(page: &Page) -> Vec<String> {
    validate_with(page, PAGE_RULES)
}

/// Evaluates `rules` in order and returns one message per violated rule.
pub fn validate_with(page: &Page, rules: &[FieldRule]) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| !satisfies(page, rule))
        .map(|rule| rule.message.to_string())
        .collect()
}

fn satisfies(page: &Page, rule: &FieldRule) -> bool {
    match rule.rule {
        Rule::Required => field_value(page, rule.field).is_some(),
    }
}

fn field_value(page: &Page, field: Field) -> Option<&str> {
    match field {
        Field::Filename => page.name().or_else(|| page.path()),
        Field::Title => page.title().filter(|title| !title.trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_metadata_requires_filename() {
        assert_eq!(
            validate_page(&Page::default()),
            vec![FILENAME_REQUIRED.to_string()]
        );
    }

    #[test]
    fn name_or_path_satisfies_filename() {
        assert!(validate_page(&Page::default().with_name("about.md")).is_empty());
        assert!(validate_page(&Page::new_draft("_pages/new.md")).is_empty());
    }

    #[test]
    fn whitespace_identifiers_do_not_count() {
        let page = Page::new_draft("  ").with_name("\t");
        assert_eq!(validate_page(&page), vec![FILENAME_REQUIRED.to_string()]);
    }

    #[test]
    fn rules_report_in_declaration_order() {
        let rules = [
            FieldRule::required(Field::Title, TITLE_REQUIRED),
            FieldRule::required(Field::Filename, FILENAME_REQUIRED),
        ];
        assert_eq!(
            validate_with(&Page::default(), &rules),
            vec![TITLE_REQUIRED.to_string(), FILENAME_REQUIRED.to_string()]
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let page = Page::default().with_field("title", "Untitled");
        assert_eq!(validate_page(&page), validate_page(&page));
    }
}
