//! # Tokenizador para Inglês
//!
//! Divide o texto em tokens (palavras e pontuações) preservando a posição original
//! de cada um no texto.
//!
//! ## Esquema de Tokenização
//!
//! 1. Fronteiras de palavra do UAX#29 (`unicode-segmentation`); espaços são descartados.
//!    Números como "3.5" e "1,000" já saem inteiros.
//! 2. Abreviações conhecidas recuperam o ponto ("mr" + "." -> "mr.").
//! 3. Palavras hifenizadas são reagrupadas ("well" + "-" + "known" -> "well-known").
//! 4. Clíticos ingleses são separados ("doesn't" -> "does", "n't"; "john's" -> "john", "'s").
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use lexstat_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("mr. smith doesn't like it.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["mr.", "smith", "does", "n't", "like", "it", "."]);
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::lexicon::{is_abbreviation, CLITICS};

/// Um token extraído do texto original.
///
/// Mantém a referência exata de sua posição no texto (`start` e `end`, em bytes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "london", ",", "n't").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
}

/// Tokeniza um texto.
pub fn tokenize(text: &str) -> Vec<Token> {
    let pieces: Vec<(usize, &str)> = text
        .split_word_bound_indices()
        .filter(|(_, piece)| !piece.trim().is_empty())
        .collect();

    let mut tokens: Vec<Token> = Vec::with_capacity(pieces.len());
    let mut i = 0;

    while i < pieces.len() {
        let (start, piece) = pieces[i];
        let end = start + piece.len();

        if let Some(last) = tokens.last_mut() {
            let adjacent = last.end == start;

            // "mr" + "." -> "mr."
            if adjacent && piece == "." && is_abbreviation(&format!("{}.", last.text)) {
                last.text.push('.');
                last.end = end;
                i += 1;
                continue;
            }

            // "well" + "-" + "known" -> "well-known"
            if adjacent && piece == "-" && is_word(&last.text) {
                if let Some(&(next_start, next)) = pieces.get(i + 1) {
                    if next_start == end && is_word(next) {
                        last.text.push('-');
                        last.text.push_str(next);
                        last.end = next_start + next.len();
                        i += 2;
                        continue;
                    }
                }
            }
        }

        split_clitic(&mut tokens, piece, start);
        i += 1;
    }

    tokens
}

/// Tokeniza e devolve apenas os textos dos tokens.
pub fn tokenize_words(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|t| t.text).collect()
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric())
}

/// Separa um clítico final, se houver, e adiciona o(s) token(s) à lista.
fn split_clitic(tokens: &mut Vec<Token>, piece: &str, start: usize) {
    let suffix_len = if piece.len() > 3 && piece.ends_with("n't") {
        3
    } else {
        CLITICS
            .iter()
            .find(|c| piece.len() > c.len() && piece.ends_with(*c))
            .map(|c| c.len())
            .unwrap_or(0)
    };

    if suffix_len == 0 {
        push_token(tokens, piece.to_string(), start, start + piece.len());
        return;
    }

    let split = piece.len() - suffix_len;
    let (base, clitic) = piece.split_at(split);
    push_token(tokens, base.to_string(), start, start + split);
    push_token(tokens, clitic.to_string(), start + split, start + piece.len());
}

fn push_token(tokens: &mut Vec<Token>, text: String, start: usize, end: usize) {
    tokens.push(Token { text, start, end });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize_words(input)
    }

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(texts("it was a dark night."), ["it", "was", "a", "dark", "night", "."]);
    }

    #[test]
    fn test_abbreviations_keep_period() {
        assert_eq!(
            texts("dr. watson met mr. holmes at 5 p.m. today."),
            ["dr.", "watson", "met", "mr.", "holmes", "at", "5", "p.m.", "today", "."]
        );
    }

    #[test]
    fn test_hyphenated_words() {
        assert_eq!(texts("a well-known fact"), ["a", "well-known", "fact"]);
        // hífen solto continua separado
        assert_eq!(texts("yes - no"), ["yes", "-", "no"]);
    }

    #[test]
    fn test_clitics() {
        assert_eq!(texts("john's dog doesn't bark"), ["john", "'s", "dog", "does", "n't", "bark"]);
        assert_eq!(texts("we're here"), ["we", "'re", "here"]);
    }

    #[test]
    fn test_numbers_and_symbols() {
        assert_eq!(texts("it costs $5, or 3.5%."), ["it", "costs", "$", "5", ",", "or", "3.5", "%", "."]);
    }

    #[test]
    fn test_offsets() {
        let text = "mr. smith";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 2);
        assert_eq!(&text[tokens[0].start..tokens[0].end], "mr.");
        assert_eq!(&text[tokens[1].start..tokens[1].end], "smith");
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n ").is_empty());
    }
}
