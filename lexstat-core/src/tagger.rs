//! # Etiquetador Morfossintático (POS) e Conjuntos de Tags
//!
//! Define os dois vocabulários de tags usados pelo corpus:
//!
//! | Tagset      | Exemplo de tags                        | Uso                                   |
//! |-------------|----------------------------------------|---------------------------------------|
//! | `Fine`      | NN, NNS, NNP, VBD, JJ, IN, CD, PRP$... | entrada do chunker de entidades       |
//! | `Universal` | NOUN, VERB, ADJ, ADP, NUM, PRON, `.`   | razões, frequências, bigramas de tags |
//!
//! O etiquetador atribui primeiro a tag fina (estilo Penn Treebank) e depois a
//! projeta no tagset universal com o mapeamento padrão Penn -> universal.
//!
//! ## Regras (em ordem de prioridade)
//!
//! 1. Pontuação e símbolos.
//! 2. Números (dígitos ou numerais por extenso) -> `CD`.
//! 3. Clíticos ("'s" -> `POS`, "n't" -> `RB`, "'ll" -> `MD`...).
//! 4. Léxico de classe fechada.
//! 5. Gazetteers, meses e dias da semana -> `NNP`.
//! 6. Sufixos ("-ly" -> `RB`, "-ing" -> `VBG`, "-tion" -> `NN`...).
//! 7. Contexto: depois de `TO`/`MD` a palavra desconhecida é `VB`; "-ed" depois
//!    de uma forma de "have"/"be" é `VBN`.
//! 8. Padrão: `NN`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::lexicon::{closed_class, is_month, is_weekday, Gazetteers, NUMBER_WORDS};

/// Vocabulário de tags pedido ao etiquetador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tagset {
    /// Tags grossas, independentes de língua (NOUN, VERB...).
    Universal,
    /// Tags finas, específicas do inglês (NN, VBD...).
    Fine,
}

/// Tags grossas do tagset universal.
///
/// É o conjunto fechado de categorias gramaticais aceito pelas consultas
/// (`ratio`, `find_tokens_by_grammar_category`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniversalTag {
    Adj,
    Adp,
    Adv,
    Conj,
    Det,
    Noun,
    Num,
    Prt,
    Pron,
    Verb,
    /// Pontuação, representada como `.`
    Punct,
    /// Outros: palavras estrangeiras, símbolos, interjeições.
    X,
}

impl UniversalTag {
    pub const ALL: [UniversalTag; 12] = [
        UniversalTag::Adj,
        UniversalTag::Adp,
        UniversalTag::Adv,
        UniversalTag::Conj,
        UniversalTag::Det,
        UniversalTag::Noun,
        UniversalTag::Num,
        UniversalTag::Prt,
        UniversalTag::Pron,
        UniversalTag::Verb,
        UniversalTag::Punct,
        UniversalTag::X,
    ];

    /// Nome da tag como aparece nas visões do corpus (ex: "NOUN", ".")
    pub fn name(&self) -> &'static str {
        match self {
            UniversalTag::Adj => "ADJ",
            UniversalTag::Adp => "ADP",
            UniversalTag::Adv => "ADV",
            UniversalTag::Conj => "CONJ",
            UniversalTag::Det => "DET",
            UniversalTag::Noun => "NOUN",
            UniversalTag::Num => "NUM",
            UniversalTag::Prt => "PRT",
            UniversalTag::Pron => "PRON",
            UniversalTag::Verb => "VERB",
            UniversalTag::Punct => ".",
            UniversalTag::X => "X",
        }
    }

    /// Projeta uma tag fina (Penn Treebank) no tagset universal.
    pub fn from_fine(fine: &str) -> Self {
        match fine {
            "." | "," | ":" | "(" | ")" | "''" | "``" | "#" | "$" => UniversalTag::Punct,
            "CC" => UniversalTag::Conj,
            "CD" => UniversalTag::Num,
            "DT" | "PDT" | "WDT" | "EX" => UniversalTag::Det,
            "IN" => UniversalTag::Adp,
            "JJ" | "JJR" | "JJS" => UniversalTag::Adj,
            "MD" | "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => UniversalTag::Verb,
            "NN" | "NNS" | "NNP" | "NNPS" => UniversalTag::Noun,
            "POS" | "RP" | "TO" => UniversalTag::Prt,
            "PRP" | "PRP$" | "WP" | "WP$" => UniversalTag::Pron,
            "RB" | "RBR" | "RBS" | "WRB" => UniversalTag::Adv,
            _ => UniversalTag::X,
        }
    }
}

impl fmt::Display for UniversalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for UniversalTag {
    type Err = CorpusError;

    /// Aceita o nome em qualquer caixa ("noun", "Verb"); pontuação como "." ou "PUNCT".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        if upper == "PUNCT" {
            return Ok(UniversalTag::Punct);
        }
        UniversalTag::ALL
            .iter()
            .find(|tag| tag.name() == upper)
            .copied()
            .ok_or_else(|| CorpusError::InvalidCategory(s.to_string()))
    }
}

/// Um token com sua tag (fina ou universal, conforme o tagset pedido).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedWord {
    pub token: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }
}

/// Etiquetador POS baseado em léxico, sufixos e contexto imediato.
pub struct PosTagger {
    lexicon: HashMap<&'static str, &'static str>,
    gazetteers: Gazetteers,
}

/// Sufixos -> tag fina, testados em ordem (o primeiro que casar vence)
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ly", "RB"),
    ("ing", "VBG"),
    ("ed", "VBD"),
    ("tion", "NN"),
    ("sion", "NN"),
    ("ment", "NN"),
    ("ness", "NN"),
    ("ity", "NN"),
    ("ship", "NN"),
    ("ance", "NN"),
    ("ence", "NN"),
    ("ism", "NN"),
    ("ist", "NN"),
    ("ous", "JJ"),
    ("ful", "JJ"),
    ("ive", "JJ"),
    ("able", "JJ"),
    ("ible", "JJ"),
    ("less", "JJ"),
    ("ish", "JJ"),
    ("ical", "JJ"),
    ("ary", "JJ"),
    ("ize", "VB"),
    ("ise", "VB"),
    ("ify", "VB"),
];

impl PosTagger {
    pub fn new(gazetteers: Gazetteers) -> Self {
        Self {
            lexicon: closed_class(),
            gazetteers,
        }
    }

    /// Etiqueta a sequência de tokens no tagset pedido.
    ///
    /// O retorno é alinhado índice a índice com a entrada.
    pub fn tag(&self, tokens: &[String], tagset: Tagset) -> Vec<TaggedWord> {
        let fine = self.tag_fine(tokens);
        match tagset {
            Tagset::Fine => fine,
            Tagset::Universal => fine
                .into_iter()
                .map(|tw| TaggedWord {
                    tag: UniversalTag::from_fine(&tw.tag).name().to_string(),
                    token: tw.token,
                })
                .collect(),
        }
    }

    fn tag_fine(&self, tokens: &[String]) -> Vec<TaggedWord> {
        let mut tagged: Vec<TaggedWord> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let prev = tagged.last();
            let tag = self.tag_token(token, prev);
            tagged.push(TaggedWord::new(token.clone(), tag));
        }
        tagged
    }

    fn tag_token(&self, token: &str, prev: Option<&TaggedWord>) -> &'static str {
        if let Some(tag) = punctuation_tag(token) {
            return tag;
        }
        if is_number(token) {
            return "CD";
        }
        match token {
            "'s" => return "POS",
            "n't" => return "RB",
            "'re" | "'m" | "'ve" => return "VBP",
            "'ll" | "'d" => return "MD",
            _ => {}
        }
        if let Some(tag) = self.lexicon.get(token) {
            return *tag;
        }
        if self.gazetteers.contains(token)
            || self.gazetteers.in_ngram(token)
            || is_month(token)
            || is_weekday(token)
        {
            return "NNP";
        }

        let prev_tag = prev.map(|p| p.tag.as_str());
        if matches!(prev_tag, Some("TO") | Some("MD")) && !token.ends_with("ly") {
            return "VB";
        }

        if let Some((_, tag)) = SUFFIX_RULES
            .iter()
            .find(|(suffix, _)| token.len() > suffix.len() + 2 && token.ends_with(suffix))
        {
            if *tag == "VBD" && prev.map(|p| is_perfect_auxiliary(&p.token)).unwrap_or(false) {
                return "VBN";
            }
            return *tag;
        }

        if token.len() > 3 && token.ends_with('s') && !token.ends_with("ss") && !token.ends_with("us") {
            // "he walks" vs. "the walks"
            return if prev_tag == Some("PRP") { "VBZ" } else { "NNS" };
        }

        "NN"
    }
}

impl Default for PosTagger {
    fn default() -> Self {
        Self::new(Gazetteers::english())
    }
}

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" | "..." => ".",
        "," => ",",
        ":" | ";" | "-" | "--" => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "'" | "''" | "\u{201c}" | "\u{201d}" => "''",
        "`" | "``" => "``",
        "$" | "\u{a3}" | "\u{20ac}" => "$",
        "#" => "#",
        "%" => "NN",
        _ if !token.chars().any(char::is_alphanumeric) => "SYM",
        _ => return None,
    };
    Some(tag)
}

fn is_number(token: &str) -> bool {
    let starts_with_digit = token.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false);
    (starts_with_digit && token.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '/')))
        || NUMBER_WORDS.contains(&token)
}

fn is_perfect_auxiliary(word: &str) -> bool {
    matches!(
        word,
        "have" | "has" | "had" | "'ve" | "is" | "are" | "was" | "were" | "be" | "been" | "being"
    )
}
