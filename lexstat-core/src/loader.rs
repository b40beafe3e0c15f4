//! # Carregador de Texto
//!
//! Camada fina de E/S: lê os bytes da fonte, decodifica com a codificação pedida,
//! remove o BOM (byte-order mark) e converte para minúsculas. O resultado é a
//! string imutável entregue ao [`Corpus`](crate::corpus::Corpus).

use std::path::Path;

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{CorpusError, Result};

/// Decodifica bytes com o rótulo de codificação (ex: "utf-8", "windows-1252").
///
/// O BOM inicial é descartado e o texto sai em minúsculas.
pub fn decode_text(bytes: &[u8], encoding: &str) -> Result<String> {
    let encoding = Encoding::for_label(encoding.trim().as_bytes())
        .ok_or_else(|| CorpusError::Encoding(encoding.to_string()))?;

    // `decode` já detecta e remove BOMs de UTF-8/UTF-16
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!(encoding = used.name(), "bytes inválidos substituídos durante a decodificação");
    }
    let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded[..]);
    Ok(text.to_lowercase())
}

/// Lê um arquivo inteiro e normaliza seu conteúdo.
pub fn load_text(path: impl AsRef<Path>, encoding: &str) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "arquivo lido");
    decode_text(&bytes, encoding)
}
