//! # Configuração do Corpus
//!
//! Parâmetros padrão usados quando o chamador omite um argumento opcional.
//! Pode ser construída via `Default` ou lida de JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Passo padrão das curvas incrementais (vocabulário e hapax).
pub const DEFAULT_INCREMENTAL_STEP: usize = 1000;

/// Configuração de um [`Corpus`](crate::corpus::Corpus).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Rótulo de codificação usado pelo carregador (ex: "utf-8", "latin1").
    pub encoding: String,
    /// Passo das curvas incrementais quando o chamador passa `None`.
    pub incremental_step: usize,
    /// Quantos nomes de pessoa agrupar por padrão (`None` = todos).
    pub top_names: Option<usize>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            incremental_step: DEFAULT_INCREMENTAL_STEP,
            top_names: None,
        }
    }
}

impl CorpusConfig {
    /// Lê a configuração de um documento JSON. Campos ausentes usam o padrão.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
