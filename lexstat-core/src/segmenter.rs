//! # Segmentador de Sentenças
//!
//! O texto do corpus está todo em minúsculas, então as regras do UAX#29 (que
//! dependem de maiúsculas após o ponto) não servem. A segmentação aqui é feita
//! por varredura de caracteres:
//!
//! - Uma sequência de `.`, `!` ou `?` (seguida de aspas/parênteses de fechamento)
//!   encerra a sentença quando vem antes de espaço ou do fim do texto.
//! - O ponto de uma abreviação conhecida ("mr.", "e.g.") ou de uma inicial ("j.")
//!   não encerra a sentença.
//! - Uma linha em branco sempre encerra a sentença.

use crate::lexicon::is_abbreviation;

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Divide o texto em sentenças, sem espaços nas bordas.
pub fn segment_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (byte_pos, ch) = chars[i];

        if ch == '\n' && chars.get(i + 1).map(|(_, c)| *c == '\n').unwrap_or(false) {
            flush_sentence(&mut sentences, &text[start..byte_pos]);
            start = byte_pos;
            i += 2;
            continue;
        }

        if TERMINATORS.contains(&ch) {
            let mut j = i;
            while j < chars.len() && TERMINATORS.contains(&chars[j].1) {
                j += 1;
            }
            while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                j += 1;
            }
            let at_boundary = j == chars.len() || chars[j].1.is_whitespace();
            let single_period = ch == '.' && j == i + 1;

            if at_boundary && !(single_period && ends_with_abbreviation(text, byte_pos)) {
                let end = chars.get(j).map(|(b, _)| *b).unwrap_or(text.len());
                flush_sentence(&mut sentences, &text[start..end]);
                start = end;
            }
            i = j.max(i + 1);
            continue;
        }

        i += 1;
    }

    flush_sentence(&mut sentences, &text[start..]);
    sentences
}

/// Verifica se a palavra que termina no ponto em `dot` é abreviação ou inicial.
fn ends_with_abbreviation(text: &str, dot: usize) -> bool {
    let before = &text[..dot];
    let word_start = before
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '.'))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let word = &text[word_start..=dot];

    // Inicial de nome: "j. r. r. tolkien"
    let is_initial = word.len() == 2 && word.chars().next().map(char::is_alphabetic).unwrap_or(false);
    is_initial || is_abbreviation(word)
}

/// Fecha a sentença acumulada e adiciona à lista (se não vazia)
fn flush_sentence(sentences: &mut Vec<String>, slice: &str) {
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
