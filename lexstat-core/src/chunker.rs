//! # Chunker de Entidades Nomeadas com Gazetteers e Padrões
//!
//! Agrupa tokens contíguos (já etiquetados com tags finas) em spans de entidade
//! rotulados com uma [`EntityCategory`]. O resultado é uma [`EntityTree`]: uma lista
//! plana de nós, cada um sendo uma palavra solta ou um chunk de entidade.
//!
//! ## Categorias de Entidades
//!
//! | Categoria      | Exemplos                                 |
//! |----------------|------------------------------------------|
//! | PERSON         | mr. darcy, elizabeth bennet              |
//! | GPE            | london, new york                         |
//! | ORGANIZATION   | united nations, bbc                      |
//! | DATE           | december 5 , 1990 / 05 / 12 / 1990       |
//! | TIME           | 10 : 30, 5 p.m.                          |
//! | MONEY          | $ 5, 20 pounds                           |
//! | PERCENT        | 3.5 %, 10 percent                        |
//! | FACILITY       | eiffel tower, british museum             |
//!
//! ## Ordem das regras em cada posição
//!
//! 1. N-gramas dos gazetteers (o maior casamento vence).
//! 2. Padrões numéricos: hora, dinheiro, porcentagem, data.
//! 3. Título seguido de nome ("mr. smith" -> PERSON "smith").
//! 4. Gazetteers de token único; nomes de pessoa absorvem sobrenomes seguintes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::lexicon::{is_month, is_weekday, Gazetteers, CURRENCY_WORDS, PERSON_TITLES};
use crate::tagger::TaggedWord;

/// Categorias de entidade reconhecidas pelo chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Person,
    /// Entidade geopolítica: países, cidades, estados.
    Gpe,
    Organization,
    Date,
    Time,
    Money,
    Percent,
    Facility,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 8] = [
        EntityCategory::Person,
        EntityCategory::Gpe,
        EntityCategory::Organization,
        EntityCategory::Date,
        EntityCategory::Time,
        EntityCategory::Money,
        EntityCategory::Percent,
        EntityCategory::Facility,
    ];

    /// Nome da categoria como string (ex: "PERSON")
    pub fn name(&self) -> &'static str {
        match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Gpe => "GPE",
            EntityCategory::Organization => "ORGANIZATION",
            EntityCategory::Date => "DATE",
            EntityCategory::Time => "TIME",
            EntityCategory::Money => "MONEY",
            EntityCategory::Percent => "PERCENT",
            EntityCategory::Facility => "FACILITY",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EntityCategory {
    type Err = CorpusError;

    /// Tenta parsear a partir de string, sem diferenciar caixa (ex: "person" → Person)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        EntityCategory::ALL
            .iter()
            .find(|cat| cat.name() == upper)
            .copied()
            .ok_or_else(|| CorpusError::InvalidCategory(s.to_string()))
    }
}

/// Um span contíguo de tokens rotulado com uma categoria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityChunk {
    pub category: EntityCategory,
    pub words: Vec<TaggedWord>,
}

impl EntityChunk {
    /// Texto de superfície da entidade: os tokens unidos por espaço.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.token.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Regex que reencontra a entidade no texto original, onde os tokens podem
    /// estar colados ("$5", "10:30") ou separados por qualquer espaço.
    pub fn surface_pattern(&self) -> String {
        self.words
            .iter()
            .map(|w| regex::escape(&w.token))
            .collect::<Vec<_>>()
            .join(r"\s*")
    }
}

/// Nó da árvore de chunks: palavra fora de entidade ou entidade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChunkNode {
    Word(TaggedWord),
    Entity(EntityChunk),
}

/// Estrutura hierárquica (de profundidade 1) devolvida pelo chunker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityTree {
    pub nodes: Vec<ChunkNode>,
}

impl EntityTree {
    /// Todos os chunks de entidade, na ordem do texto.
    pub fn entities(&self) -> impl Iterator<Item = &EntityChunk> {
        self.nodes.iter().filter_map(|node| match node {
            ChunkNode::Entity(chunk) => Some(chunk),
            ChunkNode::Word(_) => None,
        })
    }

    /// Chunks de uma categoria específica.
    pub fn entities_of(&self, category: EntityCategory) -> impl Iterator<Item = &EntityChunk> {
        self.entities().filter(move |chunk| chunk.category == category)
    }

    /// Número de palavras (folhas) da árvore.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match node {
                ChunkNode::Word(_) => 1,
                ChunkNode::Entity(chunk) => chunk.words.len(),
            })
            .sum()
    }
}

/// Meses que também são palavras comuns ("may", "march"): só viram DATE
/// quando vizinhos de um número.
const AMBIGUOUS_MONTHS: &[&str] = &["may", "march"];

/// Chunker baseado em gazetteers e padrões sobre as tags finas.
pub struct RuleChunker {
    gazetteers: Gazetteers,
}

impl RuleChunker {
    pub fn new(gazetteers: Gazetteers) -> Self {
        Self { gazetteers }
    }

    /// Agrupa a sequência etiquetada em uma árvore de entidades.
    pub fn chunk(&self, words: &[TaggedWord]) -> EntityTree {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < words.len() {
            if let Some((category, len)) = self.match_at(words, i) {
                nodes.push(ChunkNode::Entity(EntityChunk {
                    category,
                    words: words[i..i + len].to_vec(),
                }));
                i += len;
                continue;
            }

            // "mr. smith": o título fica de fora da entidade
            if PERSON_TITLES.contains(&words[i].token.as_str()) {
                let len = self.name_run(words, i + 1);
                if len > 0 {
                    nodes.push(ChunkNode::Word(words[i].clone()));
                    nodes.push(ChunkNode::Entity(EntityChunk {
                        category: EntityCategory::Person,
                        words: words[i + 1..i + 1 + len].to_vec(),
                    }));
                    i += 1 + len;
                    continue;
                }
            }

            nodes.push(ChunkNode::Word(words[i].clone()));
            i += 1;
        }

        EntityTree { nodes }
    }

    fn match_at(&self, words: &[TaggedWord], i: usize) -> Option<(EntityCategory, usize)> {
        self.match_ngram(words, i)
            .or_else(|| match_time(words, i))
            .or_else(|| match_money(words, i))
            .or_else(|| match_percent(words, i))
            .or_else(|| match_date(words, i))
            .or_else(|| self.match_single(words, i))
    }

    /// Gazetteers de n-gramas: testa todas as listas e fica com o maior casamento.
    fn match_ngram(&self, words: &[TaggedWord], i: usize) -> Option<(EntityCategory, usize)> {
        let lists = [
            (EntityCategory::Organization, &self.gazetteers.organization_ngrams),
            (EntityCategory::Facility, &self.gazetteers.facility_ngrams),
            (EntityCategory::Gpe, &self.gazetteers.location_ngrams),
            (EntityCategory::Person, &self.gazetteers.person_ngrams),
        ];

        let mut best: Option<(EntityCategory, usize)> = None;
        for (category, ngrams) in lists {
            for parts in ngrams.iter() {
                if i + parts.len() > words.len() {
                    continue;
                }
                let matches = parts
                    .iter()
                    .enumerate()
                    .all(|(j, part)| words[i + j].token == *part);
                if matches && best.map(|(_, len)| parts.len() > len).unwrap_or(true) {
                    best = Some((category, parts.len()));
                }
            }
        }
        best
    }

    fn match_single(&self, words: &[TaggedWord], i: usize) -> Option<(EntityCategory, usize)> {
        let token = words[i].token.as_str();
        let gaz = &self.gazetteers;

        if gaz.persons.contains(token) {
            // Absorve sobrenomes conhecidos: "elizabeth bennet"
            let mut len = 1;
            while len < 3 && words.get(i + len).map(|w| gaz.persons.contains(&w.token)).unwrap_or(false) {
                len += 1;
            }
            return Some((EntityCategory::Person, len));
        }
        if gaz.locations.contains(token) {
            return Some((EntityCategory::Gpe, 1));
        }
        if gaz.organizations.contains(token) {
            return Some((EntityCategory::Organization, 1));
        }
        if gaz.facilities.contains(token) {
            return Some((EntityCategory::Facility, 1));
        }
        None
    }

    /// Quantos tokens a partir de `start` formam um nome depois de um título (máx. 3).
    fn name_run(&self, words: &[TaggedWord], start: usize) -> usize {
        words
            .iter()
            .skip(start)
            .take(3)
            .take_while(|w| {
                matches!(w.tag.as_str(), "NN" | "NNP" | "NNS")
                    && w.token.chars().all(char::is_alphabetic)
                    && !is_month(&w.token)
                    && !is_weekday(&w.token)
            })
            .count()
    }
}

impl Default for RuleChunker {
    fn default() -> Self {
        Self::new(Gazetteers::english())
    }
}

fn is_cd(words: &[TaggedWord], i: usize) -> bool {
    words.get(i).map(|w| w.tag == "CD").unwrap_or(false)
}

fn token_is(words: &[TaggedWord], i: usize, candidates: &[&str]) -> bool {
    words
        .get(i)
        .map(|w| candidates.contains(&w.token.as_str()))
        .unwrap_or(false)
}

fn is_digits(words: &[TaggedWord], i: usize) -> bool {
    words
        .get(i)
        .map(|w| !w.token.is_empty() && w.token.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// "10 : 30", "10 : 30 p.m.", "5 p.m.", "6 o'clock"
fn match_time(words: &[TaggedWord], i: usize) -> Option<(EntityCategory, usize)> {
    const MERIDIEM: &[&str] = &["a.m.", "p.m.", "o'clock"];
    if !is_digits(words, i) {
        return None;
    }
    if token_is(words, i + 1, &[":"]) && is_digits(words, i + 2) {
        let len = if token_is(words, i + 3, MERIDIEM) { 4 } else { 3 };
        return Some((EntityCategory::Time, len));
    }
    if token_is(words, i + 1, MERIDIEM) {
        return Some((EntityCategory::Time, 2));
    }
    None
}

/// "$ 5", "$ 5 million", "20 pounds"
fn match_money(words: &[TaggedWord], i: usize) -> Option<(EntityCategory, usize)> {
    if words[i].tag == "$" && is_cd(words, i + 1) {
        let len = if is_cd(words, i + 2) { 3 } else { 2 };
        return Some((EntityCategory::Money, len));
    }
    if is_cd(words, i) && token_is(words, i + 1, CURRENCY_WORDS) {
        return Some((EntityCategory::Money, 2));
    }
    None
}

/// "3.5 %", "ten percent"
fn match_percent(words: &[TaggedWord], i: usize) -> Option<(EntityCategory, usize)> {
    if is_cd(words, i) && token_is(words, i + 1, &["%", "percent", "per-cent"]) {
        return Some((EntityCategory::Percent, 2));
    }
    None
}

/// "december 5 , 1990", "5 december 1990", "monday", "05 / 12 / 1990"
fn match_date(words: &[TaggedWord], i: usize) -> Option<(EntityCategory, usize)> {
    // dd / mm / yyyy
    if is_digits(words, i)
        && token_is(words, i + 1, &["/", "-"])
        && is_digits(words, i + 2)
        && token_is(words, i + 3, &["/", "-"])
        && is_digits(words, i + 4)
    {
        return Some((EntityCategory::Date, 5));
    }

    // dia antes do mês: "5 december 1990"
    if is_cd(words, i) && words.get(i + 1).map(|w| is_month(&w.token)).unwrap_or(false) {
        let len = if is_cd(words, i + 2) { 3 } else { 2 };
        return Some((EntityCategory::Date, len));
    }

    let token = words[i].token.as_str();
    if is_weekday(token) {
        return Some((EntityCategory::Date, 1));
    }
    if is_month(token) {
        let mut len = 1;
        if is_cd(words, i + 1) {
            len = 2;
            if token_is(words, i + 2, &[","]) && is_cd(words, i + 3) {
                len = 4;
            } else if is_cd(words, i + 2) {
                len = 3;
            }
        }
        if len == 1 && AMBIGUOUS_MONTHS.contains(&token) {
            return None;
        }
        return Some((EntityCategory::Date, len));
    }
    None
}
