//! # Estatísticas de Tags e Colocações
//!
//! Trabalha sobre a visão `pos_tags_universal` do corpus:
//!
//! - **Razão** entre as ocorrências de duas categorias gramaticais.
//! - **Ranking** das tags mais frequentes.
//! - **Probabilidade condicional de bigramas de tags**: para cada par adjacente
//!   observado $(u, v)$, $p = f(u,v) / f(v)$, onde $f(v)$ conta todas as ocorrências
//!   de $v$. O par é devolvido como `Bigram { first: v, second: u }`.
//! - **Colocações** por Local Mutual Information:
//!   $$ LMI(w_1, w_2) = f(w_1,w_2) \cdot \log_2 \frac{f(w_1,w_2) \cdot N}{f(w_1) \cdot f(w_2)} $$

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::{CorpusError, Result};
use crate::freq::{rank_by_score, FrequencyTable};
use crate::tagger::UniversalTag;

/// Par ordenado de strings (tags ou tokens), chave dos mapas de bigramas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bigram {
    pub first: String,
    pub second: String,
}

impl Bigram {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

impl Corpus {
    /// Ocorrências da categoria `a` divididas pelas da categoria `b`.
    pub fn ratio(&self, a: &str, b: &str) -> Result<f64> {
        let a: UniversalTag = a.parse()?;
        let b: UniversalTag = b.parse()?;
        let tags = self.cache().pos_tags_universal()?;

        let count = |tag: UniversalTag| tags.iter().filter(|tw| tw.tag == tag.name()).count();
        let numerator = count(a);
        let denominator = count(b);
        if denominator == 0 {
            return Err(CorpusError::DivisionByZero {
                denominator: b.name().to_string(),
            });
        }
        Ok(numerator as f64 / denominator as f64)
    }

    /// Tags universais do prefixo com suas contagens, da mais frequente para a menos.
    pub fn most_frequent_tags(&self, prefix: Option<usize>) -> Result<Vec<(String, usize)>> {
        let tags = self.cache().pos_tags_universal()?;
        let end = prefix.map(|p| p.min(tags.len())).unwrap_or(tags.len());
        let table: FrequencyTable<String> = tags[..end].iter().map(|tw| tw.tag.clone()).collect();
        Ok(table.into_ranked())
    }

    /// Probabilidade condicional de cada bigrama de tags observado.
    pub fn conditional_bigram_probability(&self) -> Result<Vec<(Bigram, f64)>> {
        let tags = self.cache().pos_tags_universal()?;
        if tags.is_empty() {
            return Err(CorpusError::EmptyCorpus("nenhuma tag"));
        }

        let totals: FrequencyTable<&str> = tags.iter().map(|tw| tw.tag.as_str()).collect();
        let pairs: FrequencyTable<(&str, &str)> = tags
            .windows(2)
            .map(|w| (w[0].tag.as_str(), w[1].tag.as_str()))
            .collect();

        let scored = pairs
            .iter()
            .map(|(&(u, v), f_uv)| {
                let p = f_uv as f64 / totals.get(&v) as f64;
                (Bigram::new(v, u), p)
            })
            .collect();
        Ok(rank_by_score(scored))
    }

    /// Bigramas de tokens adjacentes ranqueados por LMI.
    pub fn collocations(&self) -> Result<Vec<(Bigram, f64)>> {
        let tagged = self.cache().pos_tags_universal()?;
        let n = tagged.len() as f64;

        let unigrams: FrequencyTable<&str> = tagged.iter().map(|tw| tw.token.as_str()).collect();
        let pairs: FrequencyTable<(&str, &str)> = tagged
            .windows(2)
            .map(|w| (w[0].token.as_str(), w[1].token.as_str()))
            .collect();

        let scored = pairs
            .iter()
            .map(|(&(w1, w2), f)| {
                let f = f as f64;
                let expected = unigrams.get(&w1) as f64 * unigrams.get(&w2) as f64;
                let lmi = f * (f * n / expected).log2();
                (Bigram::new(w1, w2), lmi)
            })
            .collect();
        Ok(rank_by_score(scored))
    }
}
