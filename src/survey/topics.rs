// src/survey/topics.rs
//
// The four questionnaire topics scraped into the report, with their label
// history as printed on the Comvest forms.

use std::ops::RangeInclusive;

use super::labels::{answer, question, Breakpoint};

/// Report header of the leading year column.
pub const YEAR_HEADER: &str = "Ano";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub header: &'static str,
}

const fn cat(key: &'static str, header: &'static str) -> Category {
    Category { key, header }
}

/// One survey question family, scraped into one sheet.
#[derive(Clone, Copy, Debug)]
pub struct Topic {
    pub key: &'static str,
    /// Sheet title.
    pub title: &'static str,
    pub first_year: u16,
    pub last_year: u16,
    pub categories: &'static [Category],
    pub breakpoints: &'static [Breakpoint],
    /// Free text written under the data rows.
    pub note: Option<&'static str>,
}

impl Topic {
    pub fn years(&self) -> RangeInclusive<u16> {
        self.first_year..=self.last_year
    }

    /// `"Ano"` followed by the category headers.
    pub fn header(&self) -> Vec<&'static str> {
        std::iter::once(YEAR_HEADER)
            .chain(self.categories.iter().map(|c| c.header))
            .collect()
    }

    /// Same topic restricted to `years`.
    pub fn with_years(&self, years: RangeInclusive<u16>) -> Topic {
        Topic {
            first_year: *years.start(),
            last_year: *years.end(),
            ..*self
        }
    }
}

pub static RACE: Topic = Topic {
    key: "race",
    title: "Matriculados Unicamp - Raça ou Cor - 2003 à 2016",
    first_year: 2003,
    last_year: 2016,
    categories: &[
        cat("blank", "Em Branco"),
        cat("white", "Branca"),
        cat("black", "Preta"),
        cat("brown", "Parda"),
        cat("yellow", "Amarela"),
        cat("indigenous", "Indígena"),
        cat("undeclared", "Não Declarada"),
    ],
    breakpoints: &[
        question(2003, "cor ou raça"),
        answer(2003, "blank", "em branco"),
        answer(2003, "white", "branca"),
        answer(2003, "black", "preta"),
        answer(2003, "brown", "parda"),
        answer(2003, "yellow", "amarela"),
        answer(2003, "indigenous", "indígena"),
        answer(2013, "undeclared", "não declarada"),
    ],
    note: None,
};

pub static SCHOOL: Topic = Topic {
    key: "school",
    title: "Matriculados Unicamp - Ensino Médio - 1987 à 2016",
    first_year: 1987,
    last_year: 2016,
    categories: &[
        cat("blank", "Em Branco"),
        cat("exclusive_private", "Particular"),
        cat("exclusive_public", "Público"),
        cat("mostly_public", "Maioria Público"),
        cat("mostly_private", "Maioria Particular"),
        cat("split_evenly", "Dividido"),
        cat("abroad", "Exterior"),
        cat("none_of_above", "N.D.A"),
    ],
    breakpoints: &[
        question(1987, "Em que tipo de estabelecimento de ensino você cursou o 2º grau"),
        answer(1987, "blank", "em branco"),
        answer(1987, "exclusive_private", "cursei somente em estabelecimento particular"),
        answer(1987, "exclusive_public", "cursei somente em estabelecimento público"),
        answer(
            1987,
            "mostly_public",
            "cursei parte em esc. pública e parte em esc. particular, ficando mais em esc. pública",
        ),
        answer(
            1987,
            "mostly_private",
            "cursei parte em esc. particular e parte em esc. pública, ficando mais em esc. particular",
        ),
        answer(1987, "none_of_above", "nenhuma das alternativas anteriores"),
        answer(
            1989,
            "split_evenly",
            "cursei parte em esc. particular e parte em esc. pública, ficando igual intervalo de tempo",
        ),
        question(1999, "Em que tipo de estabelecimento você cursou o 2º grau"),
        question(2000, "Em que tipo de estabelecimento você cursou o ensino médio"),
        question(2005, "Em que estabelecimento você cursou o ensino médio"),
        answer(2005, "exclusive_private", "somente particular"),
        answer(2005, "exclusive_public", "somente público"),
        answer(2005, "mostly_public", "misto, mais tempo em estabelecimento público"),
        answer(2005, "mostly_private", "misto, mais tempo em estabelecimento particular"),
        answer(2005, "split_evenly", "misto, em igual intervalo de tempo"),
        question(2013, "Onde você cursou o ensino médio?"),
        answer(2013, "exclusive_private", "todo em escola particular"),
        answer(2013, "exclusive_public", "todo em escola pública"),
        answer(2013, "mostly_public", "maior parte em escola pública"),
        answer(2013, "mostly_private", "maior parte em escola particular"),
        answer(2013, "split_evenly", ""),
        answer(2013, "abroad", "no exterior"),
        answer(2013, "none_of_above", "em outra situação"),
    ],
    note: None,
};

// Earlier years used a different income scale, so only 2013 on is comparable.
pub static INCOME: Topic = Topic {
    key: "income",
    title: "Matriculados Unicamp - Renda Mensal Total em Salários Mínimos - 2013 à 2016",
    first_year: 2013,
    last_year: 2016,
    categories: &[
        cat("blank", "Em Branco"),
        cat("below_1", "Até um 1 S.M "),
        cat("from_1_to_2", "Entre 1 e 2 S.M"),
        cat("from_2_to_3", "Entre 2 e 3 S.M"),
        cat("from_3_to_5", "Entre 3 e 5 S.M"),
        cat("from_5_to_7", "Entre 5 e 7 S.M"),
        cat("from_7_to_10", "Entre 7 e 10 S.M"),
        cat("from_10_to_15", "Entre 10 e 15 S.M"),
        cat("from_15_to_20", "Entre 15 e 20 S.M"),
        cat("above_20", "Acima de 20 S.M"),
    ],
    breakpoints: &[
        question(2013, "renda mensal total"),
        answer(2013, "blank", "em branco"),
        answer(2013, "below_1", "inferior a 01 SM"),
        answer(2013, "from_1_to_2", "entre 01 e 02 SM"),
        answer(2013, "from_2_to_3", "entre 02 e 03 SM"),
        answer(2013, "from_3_to_5", "entre 03 e 05 SM"),
        answer(2013, "from_5_to_7", "entre 05 e 07 SM"),
        answer(2013, "from_7_to_10", "entre 07 e 10 SM"),
        answer(2013, "from_10_to_15", "entre 10 e 15 SM"),
        answer(2013, "from_15_to_20", "entre 15 e 20 SM"),
        answer(2013, "above_20", "acima de 20 SM"),
    ],
    note: Some(" Somente de 2013 para frente, pois anteriormente era utilizada outra escala."),
};

// The question first appears on the 2004 form.
pub static BOOKS: Topic = Topic {
    key: "books",
    title: "Matriculados Unicamp - Número de livros na casa além dos didáticos - 2004 à 2016",
    first_year: 2004,
    last_year: 2016,
    categories: &[
        cat("blank", "Em Branco"),
        cat("none", "Nenhum"),
        cat("up_to_20", "1 a 20 livros"),
        cat("from_21_to_100", "21 a 100 livros"),
        cat("above_100", "Mais de 100 livros"),
    ],
    breakpoints: &[
        question(2004, "dos livros escolares"),
        answer(2004, "blank", "em branco"),
        answer(2004, "none", "nenhum"),
        answer(2004, "up_to_20", "1 a 20 livros"),
        answer(2004, "from_21_to_100", "21 a 100 livros"),
        answer(2004, "above_100", "mais de 100 livros"),
    ],
    note: None,
};

/// Topics in the order their sheets appear in the report.
pub static ALL: [&Topic; 4] = [&RACE, &SCHOOL, &INCOME, &BOOKS];
