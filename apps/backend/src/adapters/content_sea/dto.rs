//! DTOs for content_sea adapter.

use crate::entities::words::LexicalClass;

#[derive(Debug, Clone)]
pub struct WordCreate {
    pub lexeme_form: String,
    pub lexical_class: LexicalClass,
}

/// `definition` carries one `{}` per entry in `filler_lexical_classes`.
#[derive(Debug, Clone)]
pub struct TemplateCreate {
    pub word_id: i64,
    pub definition: String,
    pub filler_lexical_classes: Vec<LexicalClass>,
}

#[derive(Debug, Clone)]
pub struct FillerCreate {
    pub template_id: i64,
    pub values: Vec<String>,
    pub is_dictionary: bool,
}

impl FillerCreate {
    pub fn canonical(template_id: i64, values: Vec<String>) -> Self {
        Self {
            template_id,
            values,
            is_dictionary: true,
        }
    }

    pub fn bluff(template_id: i64, values: Vec<String>) -> Self {
        Self {
            template_id,
            values,
            is_dictionary: false,
        }
    }
}
