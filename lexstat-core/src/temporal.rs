//! # Extração Temporal
//!
//! Encontra datas, meses e dias da semana no texto (ou nas sentenças que contêm
//! um filtro de conteúdo).
//!
//! ## Datas
//!
//! Uma data é uma tripla de fragmentos ([`DateFragment`]) separados por
//! delimitadores. Para cada tripla é montada uma regex composta:
//!
//! ```text
//! (início | delim) f0 delim f1 delim f2 (delim | fim | não-dígito)
//! ```
//!
//! Cada casamento é normalizado (dígitos únicos ganham zero à esquerda, "sept"
//! vira "sep"), os fragmentos são unidos por `-` e o resultado é lido com
//! `NaiveDate::parse_from_str` usando as diretivas dos fragmentos unidas por `-`.
//! Datas vizinhas podem dividir o mesmo delimitador ("01/02/1990 03/04/1991").
//!
//! | Chave                 | Legado      | Grupo | Diretiva |
//! |-----------------------|-------------|-------|----------|
//! | `day`                 | `d`         | Day   | `%d`     |
//! | `day-padded`          | `dd`        | Day   | `%d`     |
//! | `month-numeric-short` | `m`         | Month | `%m`     |
//! | `month-numeric`       | `mm`        | Month | `%m`     |
//! | `month-name`          | `month`     | Month | `%B`     |
//! | `month-abbrev`        | `abb_month` | Month | `%b`     |
//! | `year-2digit`         | `yy`        | Year  | `%y`     |
//! | `year-4digit`         | `yyyy`      | Year  | `%Y`     |
//!
//! [`Corpus::extract_all_dates`] tenta todas as triplas com grupos distintos;
//! a mesma data pode ser contada por mais de uma tripla.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::corpus::Corpus;
use crate::error::{CorpusError, Result};
use crate::freq::FrequencyTable;

const DELIMITER: &str = r"( +|/|-|_|,| ,|, |\. )";
const LEADING: &str = r"( +|/|-|_|,| ,|, |\. |^)";
const TRAILING: &str = r"( +|/|-|_|,| ,|, |\.|$|\D)";

const FULL_MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";
const ABBREV_MONTHS: &str = "jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";
const FULL_WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const ABBREV_WEEKDAYS: &str = "mon|tues|tue|wed|thurs|thur|thu|fri|sat|sun";

/// Grupo de um fragmento: uma tripla válida tem um fragmento de cada grupo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentGroup {
    Day,
    Month,
    Year,
}

/// Um componente de data reconhecível.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFragment {
    Day,
    DayPadded,
    MonthNumericShort,
    MonthNumeric,
    MonthName,
    MonthAbbrev,
    Year2Digit,
    Year4Digit,
}

impl DateFragment {
    pub const ALL: [DateFragment; 8] = [
        DateFragment::Day,
        DateFragment::DayPadded,
        DateFragment::MonthNumericShort,
        DateFragment::MonthNumeric,
        DateFragment::MonthName,
        DateFragment::MonthAbbrev,
        DateFragment::Year2Digit,
        DateFragment::Year4Digit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateFragment::Day => "day",
            DateFragment::DayPadded => "day-padded",
            DateFragment::MonthNumericShort => "month-numeric-short",
            DateFragment::MonthNumeric => "month-numeric",
            DateFragment::MonthName => "month-name",
            DateFragment::MonthAbbrev => "month-abbrev",
            DateFragment::Year2Digit => "year-2digit",
            DateFragment::Year4Digit => "year-4digit",
        }
    }

    /// Chave curta aceita por compatibilidade ("dd", "mm", "yyyy"...).
    pub fn legacy_key(&self) -> &'static str {
        match self {
            DateFragment::Day => "d",
            DateFragment::DayPadded => "dd",
            DateFragment::MonthNumericShort => "m",
            DateFragment::MonthNumeric => "mm",
            DateFragment::MonthName => "month",
            DateFragment::MonthAbbrev => "abb_month",
            DateFragment::Year2Digit => "yy",
            DateFragment::Year4Digit => "yyyy",
        }
    }

    pub fn group(&self) -> FragmentGroup {
        match self {
            DateFragment::Day | DateFragment::DayPadded => FragmentGroup::Day,
            DateFragment::MonthNumericShort
            | DateFragment::MonthNumeric
            | DateFragment::MonthName
            | DateFragment::MonthAbbrev => FragmentGroup::Month,
            DateFragment::Year2Digit | DateFragment::Year4Digit => FragmentGroup::Year,
        }
    }

    /// Regex do fragmento (sem grupo de captura).
    pub fn pattern(&self) -> String {
        match self {
            DateFragment::Day | DateFragment::MonthNumericShort => "[1-9]".to_string(),
            DateFragment::DayPadded => r"0[1-9]|[12]\d|3[01]".to_string(),
            DateFragment::MonthNumeric => "0[1-9]|1[012]".to_string(),
            DateFragment::MonthName => FULL_MONTHS.to_string(),
            DateFragment::MonthAbbrev => format!(r"(?:{ABBREV_MONTHS})\."),
            DateFragment::Year2Digit => r"\d\d".to_string(),
            DateFragment::Year4Digit => r"\d{4}".to_string(),
        }
    }

    /// Diretiva de `chrono::format::strftime` usada para ler o fragmento.
    pub fn directive(&self) -> &'static str {
        match self {
            DateFragment::Day | DateFragment::DayPadded => "%d",
            DateFragment::MonthNumericShort | DateFragment::MonthNumeric => "%m",
            DateFragment::MonthName => "%B",
            DateFragment::MonthAbbrev => "%b",
            DateFragment::Year2Digit => "%y",
            DateFragment::Year4Digit => "%Y",
        }
    }

    /// Deixa o texto casado no formato esperado pela diretiva.
    fn normalize(&self, matched: &str) -> String {
        match self {
            DateFragment::Day | DateFragment::MonthNumericShort => format!("{matched:0>2}"),
            DateFragment::MonthAbbrev => {
                let abbrev = matched.trim_end_matches('.');
                if abbrev == "sept" { "sep".to_string() } else { abbrev.to_string() }
            }
            _ => matched.to_string(),
        }
    }
}

impl fmt::Display for DateFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DateFragment {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        DateFragment::ALL
            .iter()
            .find(|frag| frag.key() == key || frag.legacy_key() == key)
            .copied()
            .ok_or_else(|| CorpusError::InvalidFormat(s.to_string()))
    }
}

/// Regex composta de uma tripla de fragmentos.
struct DatePattern {
    fragments: [DateFragment; 3],
    regex: Regex,
}

impl DatePattern {
    fn new(fragments: [DateFragment; 3]) -> Result<Self> {
        let [f0, f1, f2] = fragments;
        let source = format!(
            "{LEADING}({}){DELIMITER}({}){DELIMITER}({}){TRAILING}",
            f0.pattern(),
            f1.pattern(),
            f2.pattern()
        );
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| CorpusError::InvalidFormat(e.to_string()))?;
        Ok(Self { fragments, regex })
    }

    fn format(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.directive())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Um resultado por casamento, na ordem do texto.
    ///
    /// Cada busca recomeça no fim do último fragmento, e não no fim do
    /// casamento: o delimitador final de uma data pode abrir a seguinte.
    fn scan(&self, text: &str) -> Vec<Result<NaiveDate>> {
        let format = self.format();
        let mut results = Vec::new();
        let mut start = 0;
        // grupos: 1 = início, 2/4/6 = fragmentos, 3/5 = delimitadores
        while start <= text.len() {
            let Some(caps) = self.regex.captures_at(text, start) else {
                break;
            };
            let parts: Vec<String> = [2, 4, 6]
                .iter()
                .zip(self.fragments.iter())
                .map(|(&group, frag)| {
                    let matched = caps.get(group).map(|m| m.as_str()).unwrap_or_default();
                    frag.normalize(&matched.to_lowercase())
                })
                .collect();
            let joined = parts.join("-");
            results.push(NaiveDate::parse_from_str(&joined, &format).map_err(|_| {
                CorpusError::UnparsableDate {
                    text: joined,
                    format: format.clone(),
                }
            }));
            let last_fragment_end = caps.get(6).map_or(text.len(), |m| m.end());
            start = if last_fragment_end > start {
                last_fragment_end
            } else {
                next_char_boundary(text, start)
            };
        }
        results
    }
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| from + c.len_utf8())
}

/// Todas as triplas ordenadas cujos fragmentos pertencem a grupos distintos.
fn distinct_group_triples() -> Vec<[DateFragment; 3]> {
    let mut triples = Vec::new();
    for a in DateFragment::ALL {
        for b in DateFragment::ALL {
            for c in DateFragment::ALL {
                if a.group() != b.group() && a.group() != c.group() && b.group() != c.group() {
                    triples.push([a, b, c]);
                }
            }
        }
    }
    triples
}

/// Conta os casamentos das regexes em ordem: todas as ocorrências da primeira,
/// depois da segunda.
fn count_matches(text: &str, patterns: &[String]) -> Result<Vec<(String, usize)>> {
    let mut table = FrequencyTable::new();
    for pattern in patterns {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CorpusError::InvalidFormat(e.to_string()))?;
        for m in regex.find_iter(text) {
            table.add(m.as_str().to_lowercase());
        }
    }
    Ok(table.into_ranked())
}

impl Corpus {
    /// Datas no formato `f0 delim f1 delim f2`.
    ///
    /// As chaves são validadas antes de qualquer varredura. Cada casamento gera um
    /// item: a data lida ou `UnparsableDate` (ex: "31/02/1990").
    pub fn extract_dates(
        &self,
        f0: &str,
        f1: &str,
        f2: &str,
        content: Option<&str>,
    ) -> Result<Vec<Result<NaiveDate>>> {
        let fragments = [f0.parse()?, f1.parse()?, f2.parse()?];
        let pattern = DatePattern::new(fragments)?;
        let text = self.filtered_text(content)?;
        Ok(pattern.scan(&text))
    }

    /// Datas de todos os formatos com um fragmento de cada grupo, contadas e ranqueadas.
    pub fn extract_all_dates(&self, content: Option<&str>) -> Result<Vec<(NaiveDate, usize)>> {
        let text = self.filtered_text(content)?;
        let mut table = FrequencyTable::new();

        for fragments in distinct_group_triples() {
            let pattern = DatePattern::new(fragments)?;
            let results = pattern.scan(&text);
            trace!(format = %pattern.format(), matches = results.len(), "padrão de data aplicado");
            for result in results {
                match result {
                    Ok(date) => {
                        table.add(date);
                    }
                    Err(err) => debug!(%err, "casamento de data descartado"),
                }
            }
        }
        Ok(table.into_ranked())
    }

    /// Nomes de meses (por extenso, depois abreviados com ponto), contados e ranqueados.
    pub fn extract_months(&self, content: Option<&str>) -> Result<Vec<(String, usize)>> {
        let text = self.filtered_text(content)?;
        count_matches(
            &text,
            &[format!(r"\b({FULL_MONTHS})\b"), format!(r"\b({ABBREV_MONTHS})\.")],
        )
    }

    /// Dias da semana (por extenso, depois abreviados com ponto), contados e ranqueados.
    pub fn extract_weekdays(&self, content: Option<&str>) -> Result<Vec<(String, usize)>> {
        let text = self.filtered_text(content)?;
        count_matches(
            &text,
            &[format!(r"\b({FULL_WEEKDAYS})\b"), format!(r"\b({ABBREV_WEEKDAYS})\.")],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ok_dates(results: Vec<Result<NaiveDate>>) -> Vec<NaiveDate> {
        results.into_iter().filter_map(|r| r.ok()).collect()
    }

    #[test]
    fn test_fragment_keys() {
        assert_eq!("dd".parse::<DateFragment>().unwrap(), DateFragment::DayPadded);
        assert_eq!("day-padded".parse::<DateFragment>().unwrap(), DateFragment::DayPadded);
        assert_eq!("ABB_MONTH".parse::<DateFragment>().unwrap(), DateFragment::MonthAbbrev);
        assert!(matches!("ddd".parse::<DateFragment>(), Err(CorpusError::InvalidFormat(_))));
    }

    #[test]
    fn test_extract_padded_numeric_date() {
        let c = Corpus::new("born on 05/12/1990 in town");
        let results = c.extract_dates("dd", "mm", "yyyy", None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(*results[0].as_ref().unwrap(), date(1990, 12, 5));

        let canonical = c
            .extract_dates("day-padded", "month-numeric", "year-4digit", None)
            .unwrap();
        assert_eq!(ok_dates(canonical), [date(1990, 12, 5)]);
    }

    #[test]
    fn test_invalid_format_before_scan() {
        let c = Corpus::new("05/12/1990");
        assert!(matches!(
            c.extract_dates("dd", "mm", "century", None),
            Err(CorpusError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_unparsable_match_keeps_its_slot() {
        let c = Corpus::new("on 31/02/1990 and 01/03/1990.");
        let results = c.extract_dates("dd", "mm", "yyyy", None).unwrap();
        assert_eq!(results.len(), 2);
        assert!(matches!(&results[0], Err(CorpusError::UnparsableDate { text, .. }) if text == "31-02-1990"));
        assert_eq!(*results[1].as_ref().unwrap(), date(1990, 3, 1));
    }

    #[test]
    fn test_month_names_and_abbreviations() {
        let c = Corpus::new("It was December 7, 1990. Later, on Dec. 9, 1990 and Sept. 1, 91.");
        let full = c.extract_dates("month", "d", "yyyy", None).unwrap();
        assert_eq!(ok_dates(full), [date(1990, 12, 7)]);

        let abbrev = c.extract_dates("abb_month", "d", "yyyy", None).unwrap();
        assert_eq!(ok_dates(abbrev), [date(1990, 12, 9)]);

        let short_year = c.extract_dates("abb_month", "d", "yy", None).unwrap();
        assert_eq!(ok_dates(short_year), [date(1991, 9, 1)]);
    }

    #[test]
    fn test_content_filter() {
        let c = Corpus::new("the war began on 01/09/1939. peace came on 02/09/1945.");
        let results = c.extract_dates("dd", "mm", "yyyy", Some("peace")).unwrap();
        assert_eq!(ok_dates(results), [date(1945, 9, 2)]);
    }

    #[test]
    fn test_adjacent_dates_share_a_delimiter() {
        let c = Corpus::new("01/02/1990 03/04/1991");
        let results = c.extract_dates("dd", "mm", "yyyy", None).unwrap();
        assert_eq!(ok_dates(results), [date(1990, 2, 1), date(1991, 4, 3)]);

        let dashed = Corpus::new("01-02-1990-03-04-1991");
        let results = dashed.extract_dates("dd", "mm", "yyyy", None).unwrap();
        assert_eq!(ok_dates(results), [date(1990, 2, 1), date(1991, 4, 3)]);
    }

    #[test]
    fn test_dates_at_text_boundaries() {
        let head = Corpus::new("05/12/1990 was the day");
        let results = head.extract_dates("dd", "mm", "yyyy", None).unwrap();
        assert_eq!(ok_dates(results), [date(1990, 12, 5)]);

        let tail = Corpus::new("it was filed on 05/12/1990");
        let results = tail.extract_dates("dd", "mm", "yyyy", None).unwrap();
        assert_eq!(ok_dates(results), [date(1990, 12, 5)]);

        let alone = Corpus::new("december 7, 1990");
        let results = alone.extract_dates("month", "d", "yyyy", None).unwrap();
        assert_eq!(ok_dates(results), [date(1990, 12, 7)]);
    }

    #[test]
    fn test_digits_glued_to_a_year_do_not_match() {
        let c = Corpus::new("code 05/12/19901 here");
        let results = c.extract_dates("dd", "mm", "yyyy", None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_extract_all_dates_with_content_filter() {
        let c = Corpus::new("the war began on 01/09/1939. peace came on 02/09/1945.");
        let dates = c.extract_all_dates(Some("peace")).unwrap();
        assert_eq!(dates, [(date(1945, 9, 2), 1), (date(1945, 2, 9), 1)]);
        assert!(dates.iter().all(|(d, _)| d.year() != 1939));

        let everything = c.extract_all_dates(None).unwrap();
        assert!(everything.contains(&(date(1939, 9, 1), 1)));
        assert!(everything.contains(&(date(1945, 9, 2), 1)));
    }

    #[test]
    fn test_distinct_group_triples() {
        let triples = distinct_group_triples();
        assert_eq!(triples.len(), 96);
        assert_eq!(
            triples[0],
            [DateFragment::Day, DateFragment::MonthNumericShort, DateFragment::Year2Digit]
        );
    }

    #[test]
    fn test_extract_all_dates_counts_permutations() {
        let c = Corpus::new("born on 05/12/1990 in town");
        let dates = c.extract_all_dates(None).unwrap();
        assert_eq!(dates, [(date(1990, 12, 5), 1), (date(1990, 5, 12), 1)]);
    }

    #[test]
    fn test_extract_months() {
        let c = Corpus::new("In March and May we met. By Dec. it was over; in march again.");
        assert_eq!(
            c.extract_months(None).unwrap(),
            [("march".to_string(), 2), ("may".to_string(), 1), ("dec.".to_string(), 1)]
        );
    }

    #[test]
    fn test_extract_weekdays() {
        let c = Corpus::new("On Monday and Thu. and again Monday; never on thursdays.");
        assert_eq!(
            c.extract_weekdays(None).unwrap(),
            [("monday".to_string(), 2), ("thu.".to_string(), 1)]
        );
    }
}
