//! Tabela de frequências que lembra a ordem da primeira ocorrência.
//!
//! Todas as saídas ranqueadas do corpus são ordenadas de forma decrescente e
//! estável: empates mantêm a ordem em que as chaves apareceram pela primeira vez.

use std::hash::Hash;

use indexmap::IndexMap;

/// Contagens por chave, em ordem de inserção.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K: Eq + Hash> {
    counts: IndexMap<K, usize>,
}

impl<K: Eq + Hash> FrequencyTable<K> {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    /// Soma uma ocorrência e devolve a nova contagem da chave.
    pub fn add(&mut self, key: K) -> usize {
        self.add_n(key, 1)
    }

    pub fn add_n(&mut self, key: K, n: usize) -> usize {
        let count = self.counts.entry(key).or_insert(0);
        *count += n;
        *count
    }

    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    /// Número de chaves distintas.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Pares (chave, contagem) na ordem da primeira ocorrência.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(key, &count)| (key, count))
    }

    /// Pares ordenados por contagem decrescente; empates na ordem da primeira ocorrência.
    pub fn into_ranked(self) -> Vec<(K, usize)> {
        let mut pairs: Vec<(K, usize)> = self.counts.into_iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

impl<K: Eq + Hash> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

/// Ordena pares por valor decrescente, de forma estável.
pub fn rank_by_score<K>(mut pairs: Vec<(K, f64)>) -> Vec<(K, f64)> {
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let table: FrequencyTable<&str> = ["b", "a", "b", "c", "a", "b"].into_iter().collect();
        assert_eq!(table.get(&"b"), 3);
        assert_eq!(table.get(&"z"), 0);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 6);
        let order: Vec<&str> = table.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn test_ranking_is_stable() {
        let table: FrequencyTable<&str> = ["x", "y", "z", "y", "x"].into_iter().collect();
        assert_eq!(table.into_ranked(), [("x", 2), ("y", 2), ("z", 1)]);
    }

    #[test]
    fn test_add_n_accumulates() {
        let mut table = FrequencyTable::new();
        assert_eq!(table.add_n("a", 0), 0);
        assert!(table.contains(&"a"));
        assert_eq!(table.add_n("b", 4), 4);
        assert_eq!(table.add("a"), 1);
        assert_eq!(table.into_ranked(), [("b", 4), ("a", 1)]);
    }

    #[test]
    fn test_rank_by_score() {
        let ranked = rank_by_score(vec![("a", 0.1), ("b", 0.5), ("c", 0.1)]);
        assert_eq!(ranked, [("b", 0.5), ("a", 0.1), ("c", 0.1)]);
    }
}
