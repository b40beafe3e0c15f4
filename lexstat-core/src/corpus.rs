//! # Corpus
//!
//! Um documento de texto e suas anotações. O texto é normalizado para minúsculas
//! na construção e nunca muda; as anotações vêm do [`AnnotationCache`] e são
//! calculadas sob demanda.
//!
//! As estatísticas ficam em módulos próprios, cada um com seu bloco `impl Corpus`:
//!
//! | Módulo                          | Estatísticas                                        |
//! |---------------------------------|-----------------------------------------------------|
//! | [`lexical`](crate::lexical)     | vocabulário, hapax, médias                          |
//! | [`tag_stats`](crate::tag_stats) | razões de tags, bigramas de tags, colocações (LMI)  |
//! | [`search`](crate::search)       | entidades, categorias gramaticais, sentenças        |
//! | [`temporal`](crate::temporal)   | datas, meses, dias da semana                        |
//! | [`ranking`](crate::ranking)     | menor/maior sentença, cadeia de Markov de ordem 0   |
//!
//! ## Exemplo
//!
//! ```rust
//! use lexstat_core::Corpus;
//!
//! let corpus = Corpus::new("The cat sat. The cat slept.");
//! assert_eq!(corpus.raw(), "the cat sat. the cat slept.");
//! assert_eq!(corpus.n_sentences().unwrap(), 2);
//! assert_eq!(corpus.vocabulary_size(None).unwrap(), 5);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::annotation::{AnnotationService, RuleBasedAnnotator};
use crate::cache::AnnotationCache;
use crate::config::CorpusConfig;
use crate::error::Result;
use crate::loader::load_text;

/// Um documento com visões de anotação memoizadas.
#[derive(Debug)]
pub struct Corpus {
    name: Option<String>,
    config: CorpusConfig,
    cache: AnnotationCache,
}

impl Corpus {
    /// Cria um corpus anotado pelo [`RuleBasedAnnotator`] padrão.
    pub fn new(text: &str) -> Self {
        Self::with_service(text, Arc::new(RuleBasedAnnotator::default()))
    }

    /// Cria um corpus com um serviço de anotação próprio.
    pub fn with_service(text: &str, service: Arc<dyn AnnotationService>) -> Self {
        Self::with_config(text, service, CorpusConfig::default())
    }

    pub fn with_config(text: &str, service: Arc<dyn AnnotationService>, config: CorpusConfig) -> Self {
        Self {
            name: None,
            config,
            cache: AnnotationCache::new(text.to_lowercase(), service),
        }
    }

    /// Carrega o texto de um arquivo, decodificado com `config.encoding`.
    pub fn from_file(path: impl AsRef<Path>, config: CorpusConfig) -> Result<Self> {
        let path = path.as_ref();
        let text = load_text(path, &config.encoding)?;
        let mut corpus = Self::with_config(&text, Arc::new(RuleBasedAnnotator::default()), config);
        corpus.name = Some(path.display().to_string());
        Ok(corpus)
    }

    /// Define um nome para o corpus (ex: título do documento).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Texto em minúsculas.
    pub fn raw(&self) -> &str {
        self.cache.raw()
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn n_tokens(&self) -> Result<usize> {
        Ok(self.cache.tokens()?.len())
    }

    pub fn n_sentences(&self) -> Result<usize> {
        Ok(self.cache.sentences()?.len())
    }

    pub(crate) fn cache(&self) -> &AnnotationCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::testing::ScriptedService;
    use crate::error::CorpusError;
    use std::io::Write;

    #[test]
    fn test_text_is_lowercased() {
        let corpus = Corpus::new("Hello World");
        assert_eq!(corpus.raw(), "hello world");
        assert_eq!(corpus.n_tokens().unwrap(), 2);
        assert!(corpus.name().is_none());
    }

    #[test]
    fn test_custom_service() {
        let corpus = Corpus::with_service("A B\nC", Arc::new(ScriptedService::new())).named("doc");
        assert_eq!(corpus.name(), Some("doc"));
        assert_eq!(corpus.n_tokens().unwrap(), 3);
        assert_eq!(corpus.n_sentences().unwrap(), 2);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "It was Monday. It rained.").unwrap();

        let corpus = Corpus::from_file(file.path(), CorpusConfig::default()).unwrap();
        assert_eq!(corpus.raw(), "it was monday. it rained.");
        assert_eq!(corpus.n_sentences().unwrap(), 2);
        assert!(corpus.name().is_some());
    }

    #[test]
    fn test_from_file_unknown_encoding() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = CorpusConfig {
            encoding: "klingon-8".to_string(),
            ..CorpusConfig::default()
        };
        assert!(matches!(
            Corpus::from_file(file.path(), config),
            Err(CorpusError::Encoding(_))
        ));
    }

    #[test]
    fn test_corpus_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Corpus>();
    }
}
