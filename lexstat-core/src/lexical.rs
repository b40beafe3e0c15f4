//! # Estatísticas Lexicais
//!
//! Curvas de crescimento do vocabulário e dos hapax legomena (palavras que
//! ocorrem uma única vez), além de médias de tamanho de sentença e de token.
//!
//! As curvas incrementais usam as chaves `0, passo, 2·passo, …` estritamente
//! menores que o número de tokens; o valor em `k` é a estatística sobre os
//! primeiros `k` tokens. Ambas são calculadas em uma única passada.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::corpus::Corpus;
use crate::error::{CorpusError, Result};

impl Corpus {
    /// Número de tokens distintos nos primeiros `prefix` tokens (todos se `None`).
    pub fn vocabulary_size(&self, prefix: Option<usize>) -> Result<usize> {
        let tokens = self.prefix_tokens(prefix)?;
        Ok(tokens.iter().collect::<HashSet<_>>().len())
    }

    /// Tamanho do vocabulário a cada `step` tokens. A curva é não-decrescente.
    pub fn incremental_vocabulary(&self, step: Option<usize>) -> Result<BTreeMap<usize, usize>> {
        let step = self.resolve_step(step)?;
        let tokens = self.cache().tokens()?;

        let mut seen: HashSet<&str> = HashSet::new();
        let mut curve = BTreeMap::new();
        for (i, token) in tokens.iter().enumerate() {
            if i % step == 0 {
                curve.insert(i, seen.len());
            }
            seen.insert(token.as_str());
        }
        Ok(curve)
    }

    /// Média de tokens por sentença, com cada sentença tokenizada isoladamente.
    pub fn mean_tokens_per_sentence(&self) -> Result<f64> {
        let per_sentence = self.cache().sentence_tokens()?;
        if per_sentence.is_empty() {
            return Err(CorpusError::EmptyCorpus("nenhuma sentença"));
        }
        let total: usize = per_sentence.iter().map(Vec::len).sum();
        Ok(total as f64 / per_sentence.len() as f64)
    }

    /// Média do número de caracteres por token.
    pub fn mean_token_length(&self) -> Result<f64> {
        let tokens = self.cache().tokens()?;
        if tokens.is_empty() {
            return Err(CorpusError::EmptyCorpus("nenhum token"));
        }
        let chars: usize = tokens.iter().map(|t| t.chars().count()).sum();
        Ok(chars as f64 / tokens.len() as f64)
    }

    /// Número de tokens que ocorrem exatamente uma vez no prefixo.
    pub fn hapax_count(&self, prefix: Option<usize>) -> Result<usize> {
        let tokens = self.prefix_tokens(prefix)?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        Ok(counts.values().filter(|&&c| c == 1).count())
    }

    /// Número de hapax a cada `step` tokens. Ao contrário do vocabulário, pode cair.
    pub fn incremental_hapax(&self, step: Option<usize>) -> Result<BTreeMap<usize, usize>> {
        let step = self.resolve_step(step)?;
        let tokens = self.cache().tokens()?;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut hapax = 0usize;
        let mut curve = BTreeMap::new();
        for (i, token) in tokens.iter().enumerate() {
            if i % step == 0 {
                curve.insert(i, hapax);
            }
            let count = counts.entry(token.as_str()).or_insert(0);
            *count += 1;
            match *count {
                1 => hapax += 1,
                2 => hapax -= 1,
                _ => {}
            }
        }
        Ok(curve)
    }

    /// Primeiros `prefix` tokens; prefixos maiores que o texto são truncados.
    pub(crate) fn prefix_tokens(&self, prefix: Option<usize>) -> Result<&[String]> {
        let tokens = self.cache().tokens()?;
        let end = prefix.map(|p| p.min(tokens.len())).unwrap_or(tokens.len());
        Ok(&tokens[..end])
    }

    fn resolve_step(&self, step: Option<usize>) -> Result<usize> {
        match step.unwrap_or(self.config().incremental_step) {
            0 => Err(CorpusError::InvalidArgument("o passo deve ser maior que zero".to_string())),
            step => Ok(step),
        }
    }
}
