use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::core::filters::{CatalogPage, CatalogQuery, SortOrder};
use crate::models::{Question, QuestionCategory, QuestionGroup};

impl CatalogQuery {
    /// Questionnaire query: same paging as the breed catalog, sorted by `order` unless asked otherwise
    pub fn for_questions(params: &HashMap<String, String>) -> Self {
        let mut query = Self::from_params(params);
        let sort_given = params.get("sort").is_some_and(|s| !s.trim().is_empty());
        if !sort_given {
            query.sort = SortOrder { field: "order".to_string(), descending: false };
        }
        query
    }

    /// Sort and paginate questions
    ///
    /// Sortable fields are `order`, `text`, `trait` and `category`; any other
    /// field keeps file order. Questions without an `order` come last.
    pub fn apply_questions(&self, mut questions: Vec<Question>) -> CatalogPage<Question> {
        let sort = &self.sort;
        questions.sort_by(|a, b| compare_questions(a, b, sort));
        self.paginate(questions)
    }
}

fn compare_questions(a: &Question, b: &Question, sort: &SortOrder) -> Ordering {
    let ordering = match sort.field.as_str() {
        "order" => match (a.order, b.order) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        "text" => a.text.cmp(&b.text),
        "trait" => a.trait_key.cmp(&b.trait_key),
        "category" => a.category.cmp(&b.category),
        _ => Ordering::Equal,
    };

    if sort.descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Group questions by category, categories alphabetically, each group in `order`
pub fn group_by_category(questions: Vec<Question>) -> Vec<QuestionGroup> {
    let mut groups: BTreeMap<QuestionCategory, Vec<Question>> = BTreeMap::new();
    for question in questions {
        groups.entry(question.category).or_default().push(question);
    }

    let by_order = SortOrder { field: "order".to_string(), descending: false };
    groups
        .into_iter()
        .map(|(category, mut questions)| {
            questions.sort_by(|a, b| compare_questions(a, b, &by_order));
            QuestionGroup { category, questions }
        })
        .collect()
}
