// src/survey/labels.rs
//
// Year → on-page label resolution. Each topic carries an ordered table of
// breakpoints; a breakpoint takes effect in its year and holds until a later
// one overrides the same field.

use super::topics::Topic;

/// What a breakpoint changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// The question prompt text used to pick the question.
    Question,
    /// The answer label of the category with this key.
    Answer(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    pub year: u16,
    pub field: Field,
    /// Literal substring searched on the page. Empty means the category is
    /// not part of the form from `year` on.
    pub label: &'static str,
}

pub const fn question(year: u16, label: &'static str) -> Breakpoint {
    Breakpoint {
        year,
        field: Field::Question,
        label,
    }
}

pub const fn answer(year: u16, key: &'static str, label: &'static str) -> Breakpoint {
    Breakpoint {
        year,
        field: Field::Answer(key),
        label,
    }
}

/// Labels in force for one topic in one year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearLabelSet {
    pub year: u16,
    pub question: &'static str,
    /// `(category key, label)` in the topic's declared category order.
    pub answers: Vec<(&'static str, &'static str)>,
}

impl YearLabelSet {
    pub fn label(&self, key: &str) -> Option<&'static str> {
        self.answers
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, label)| *label)
    }

    /// Answer labels in category order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.answers.iter().map(|(_, label)| *label)
    }
}

/// Apply every breakpoint of `topic` dated `year` or earlier, in table order.
/// Categories no breakpoint has touched resolve to an empty label.
pub fn resolve_labels(topic: &Topic, year: u16) -> YearLabelSet {
    let mut question = "";
    let mut answers: Vec<(&'static str, &'static str)> =
        topic.categories.iter().map(|c| (c.key, "")).collect();

    for bp in topic.breakpoints.iter().filter(|bp| bp.year <= year) {
        match bp.field {
            Field::Question => question = bp.label,
            Field::Answer(key) => {
                if let Some(slot) = answers.iter_mut().find(|(k, _)| *k == key) {
                    slot.1 = bp.label;
                }
            }
        }
    }

    YearLabelSet {
        year,
        question,
        answers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::topics::{ALL, BOOKS, INCOME, RACE, SCHOOL};
    use std::collections::BTreeSet;

    #[test]
    fn school_split_evenly_appears_in_1989() {
        assert_eq!(resolve_labels(&SCHOOL, 1988).label("split_evenly"), Some(""));
        assert_eq!(
            resolve_labels(&SCHOOL, 1990).label("split_evenly"),
            Some("cursei parte em esc. particular e parte em esc. pública, ficando igual intervalo de tempo")
        );
        assert_eq!(
            resolve_labels(&SCHOOL, 2006).label("split_evenly"),
            Some("misto, em igual intervalo de tempo")
        );
    }

    #[test]
    fn school_question_prompt_history() {
        let prompt = |y| resolve_labels(&SCHOOL, y).question;
        assert_eq!(prompt(1987), "Em que tipo de estabelecimento de ensino você cursou o 2º grau");
        assert_eq!(prompt(1998), "Em que tipo de estabelecimento de ensino você cursou o 2º grau");
        assert_eq!(prompt(1999), "Em que tipo de estabelecimento você cursou o 2º grau");
        assert_eq!(prompt(2000), "Em que tipo de estabelecimento você cursou o ensino médio");
        assert_eq!(prompt(2004), "Em que tipo de estabelecimento você cursou o ensino médio");
        assert_eq!(prompt(2005), "Em que estabelecimento você cursou o ensino médio");
        assert_eq!(prompt(2016), "Onde você cursou o ensino médio?");
    }

    #[test]
    fn school_1999_changes_only_the_prompt() {
        let before = resolve_labels(&SCHOOL, 1998);
        let after = resolve_labels(&SCHOOL, 1999);
        assert_ne!(before.question, after.question);
        assert_eq!(before.answers, after.answers);
    }

    #[test]
    fn school_2013_relabels_and_swaps_categories() {
        let labels = resolve_labels(&SCHOOL, 2013);
        assert_eq!(labels.label("exclusive_private"), Some("todo em escola particular"));
        assert_eq!(labels.label("exclusive_public"), Some("todo em escola pública"));
        assert_eq!(labels.label("split_evenly"), Some(""));
        assert_eq!(labels.label("abroad"), Some("no exterior"));
        assert_eq!(labels.label("none_of_above"), Some("em outra situação"));
        assert_eq!(resolve_labels(&SCHOOL, 2012).label("abroad"), Some(""));
    }

    #[test]
    fn race_undeclared_from_2013() {
        assert_eq!(resolve_labels(&RACE, 2012).label("undeclared"), Some(""));
        assert_eq!(resolve_labels(&RACE, 2013).label("undeclared"), Some("não declarada"));
        assert_eq!(resolve_labels(&RACE, 2016).label("undeclared"), Some("não declarada"));
    }

    #[test]
    fn income_and_books_are_fixed_over_their_range() {
        for topic in [&INCOME, &BOOKS] {
            let first = resolve_labels(topic, topic.first_year);
            assert!(first.labels().all(|l| !l.is_empty()), "{}", topic.key);
            for year in topic.years() {
                assert_eq!(resolve_labels(topic, year).answers, first.answers);
            }
        }
    }

    #[test]
    fn labels_change_only_at_breakpoint_years() {
        for topic in ALL {
            let breaks: BTreeSet<u16> = topic.breakpoints.iter().map(|bp| bp.year).collect();
            let mut prev = resolve_labels(topic, topic.first_year);
            for year in topic.first_year + 1..=topic.last_year {
                let cur = resolve_labels(topic, year);
                let changed = cur.question != prev.question || cur.answers != prev.answers;
                if changed {
                    assert!(
                        breaks.contains(&year),
                        "{}: labels changed in {} which is not a breakpoint",
                        topic.key,
                        year
                    );
                }
                prev = cur;
            }
        }
    }

    #[test]
    fn breakpoint_tables_are_well_formed() {
        for topic in ALL {
            let years: Vec<u16> = topic.breakpoints.iter().map(|bp| bp.year).collect();
            assert!(years.windows(2).all(|w| w[0] <= w[1]), "{} unsorted", topic.key);
            assert_eq!(years.first(), Some(&topic.first_year), "{}", topic.key);

            for bp in topic.breakpoints {
                if let Field::Answer(key) = bp.field {
                    assert!(
                        topic.categories.iter().any(|c| c.key == key),
                        "{}: unknown category {}",
                        topic.key,
                        key
                    );
                }
            }

            let labels = resolve_labels(topic, topic.first_year);
            assert!(!labels.question.is_empty(), "{}", topic.key);
            assert_eq!(labels.answers.len(), topic.categories.len());
        }
    }

    #[test]
    fn years_before_any_breakpoint_resolve_empty() {
        let labels = resolve_labels(&BOOKS, 2003);
        assert_eq!(labels.question, "");
        assert!(labels.labels().all(str::is_empty));
    }
}
