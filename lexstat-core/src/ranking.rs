//! # Ranking de Sentenças
//!
//! - Menor e maior sentença (em caracteres).
//! - Probabilidade de cada sentença sob uma cadeia de Markov de ordem 0: o
//!   produto das frequências relativas globais dos seus tokens,
//!   $$ P(s) = \prod_{t \in s} \frac{f(t)}{N} $$

use std::collections::HashSet;

use crate::corpus::Corpus;
use crate::error::{CorpusError, Result};
use crate::freq::{rank_by_score, FrequencyTable};

impl Corpus {
    /// Menor e maior sentença por número de caracteres; em empate vence a primeira.
    pub fn min_max_sentence(&self, content: Option<&str>) -> Result<(String, String)> {
        let sentences = self.candidate_sentences(content)?;

        let mut iter = sentences.into_iter();
        let first = iter.next().ok_or(CorpusError::EmptyCorpus("nenhuma sentença"))?;
        let first_len = first.chars().count();
        let (mut min, mut min_len) = (first.clone(), first_len);
        let (mut max, mut max_len) = (first, first_len);

        for sentence in iter {
            let len = sentence.chars().count();
            if len < min_len {
                min = sentence.clone();
                min_len = len;
            }
            if len > max_len {
                max = sentence;
                max_len = len;
            }
        }
        Ok((min, max))
    }

    /// Sentenças ranqueadas pela probabilidade de ordem 0.
    ///
    /// Só entram sentenças cujo número de tokens está em `[min_length, max_length]`
    /// (limites opcionais). Sentenças repetidas são avaliadas uma vez.
    pub fn markov_order0_probability(
        &self,
        content: Option<&str>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Result<Vec<(String, f64)>> {
        let tokens = self.cache().tokens()?;
        if tokens.is_empty() {
            return Err(CorpusError::EmptyCorpus("nenhum token"));
        }
        let n = tokens.len() as f64;
        let unigrams: FrequencyTable<&str> = tokens.iter().map(String::as_str).collect();

        let sentences = self.cache().sentences()?;
        let per_sentence = self.cache().sentence_tokens()?;
        let needle = content.map(str::trim_end);

        let mut seen = HashSet::new();
        let mut scored = Vec::new();
        for (sentence, words) in sentences.iter().zip(per_sentence) {
            if needle.map(|n| !sentence.contains(n)).unwrap_or(false) {
                continue;
            }
            if !seen.insert(sentence.as_str()) {
                continue;
            }
            let len = words.len();
            if min_length.map(|min| len < min).unwrap_or(false)
                || max_length.map(|max| len > max).unwrap_or(false)
            {
                continue;
            }
            let probability: f64 = words
                .iter()
                .map(|w| unigrams.get(&w.as_str()) as f64 / n)
                .product();
            scored.push((sentence.clone(), probability));
        }
        Ok(rank_by_score(scored))
    }

    fn candidate_sentences(&self, content: Option<&str>) -> Result<Vec<String>> {
        match content {
            None => Ok(self.cache().sentences()?.clone()),
            Some(content) => self.find_sentences_containing(content),
        }
    }
}
