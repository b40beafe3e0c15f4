//! # Cache de Anotações
//!
//! Cada visão derivada do texto (tokens, sentenças, tokens por sentença, tags,
//! chunks) é calculada no primeiro acesso e reutilizada depois. O cálculo pode falhar: nesse caso a
//! visão continua vazia e o próximo acesso tenta de novo.
//!
//! Cada visão tem sua própria trava, então uma visão pode depender de outra
//! (as tags dependem dos tokens) sem risco de deadlock.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use crate::annotation::AnnotationService;
use crate::chunker::EntityTree;
use crate::error::{CorpusError, Result};
use crate::tagger::{TaggedWord, Tagset};

/// Uma visão calculada no máximo uma vez.
pub struct LazyView<T> {
    cell: OnceLock<T>,
    lock: Mutex<()>,
}

impl<T> LazyView<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            lock: Mutex::new(()),
        }
    }

    /// Devolve o valor, calculando-o com `init` se ainda não existir.
    ///
    /// Acessos concorrentes ao primeiro cálculo esperam na trava da visão; apenas
    /// um deles executa `init`.
    pub fn get_or_try_init<F>(&self, init: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }

        let _guard = self
            .lock
            .lock()
            .map_err(|_| CorpusError::DependencyFailure("trava do cache envenenada".to_string()))?;

        if let Some(value) = self.cell.get() {
            return Ok(value);
        }

        let value = init()?;
        Ok(self.cell.get_or_init(|| value))
    }

    pub fn is_computed(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for LazyView<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Texto bruto + visões de anotação memoizadas.
pub struct AnnotationCache {
    raw: String,
    service: Arc<dyn AnnotationService>,
    tokens: LazyView<Vec<String>>,
    sentences: LazyView<Vec<String>>,
    sentence_tokens: LazyView<Vec<Vec<String>>>,
    pos_tags_universal: LazyView<Vec<TaggedWord>>,
    pos_tags_fine: LazyView<Vec<TaggedWord>>,
    entity_chunks: LazyView<EntityTree>,
}

impl AnnotationCache {
    pub fn new(raw: String, service: Arc<dyn AnnotationService>) -> Self {
        Self {
            raw,
            service,
            tokens: LazyView::new(),
            sentences: LazyView::new(),
            sentence_tokens: LazyView::new(),
            pos_tags_universal: LazyView::new(),
            pos_tags_fine: LazyView::new(),
            entity_chunks: LazyView::new(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Serviço usado para re-anotar trechos filtrados.
    pub fn service(&self) -> &dyn AnnotationService {
        self.service.as_ref()
    }

    pub fn tokens(&self) -> Result<&Vec<String>> {
        self.tokens.get_or_try_init(|| {
            let tokens = self.service.tokenize(&self.raw)?;
            debug!(view = "tokens", size = tokens.len(), "visão calculada");
            Ok(tokens)
        })
    }

    pub fn sentences(&self) -> Result<&Vec<String>> {
        self.sentences.get_or_try_init(|| {
            let sentences = self.service.segment_sentences(&self.raw)?;
            debug!(view = "sentences", size = sentences.len(), "visão calculada");
            Ok(sentences)
        })
    }

    /// Tokens de cada sentença, na mesma ordem de [`AnnotationCache::sentences`].
    pub fn sentence_tokens(&self) -> Result<&Vec<Vec<String>>> {
        self.sentence_tokens.get_or_try_init(|| {
            let per_sentence = self
                .sentences()?
                .iter()
                .map(|sentence| self.service.tokenize(sentence))
                .collect::<Result<Vec<_>>>()?;
            debug!(view = "sentence_tokens", size = per_sentence.len(), "visão calculada");
            Ok(per_sentence)
        })
    }

    pub fn pos_tags_universal(&self) -> Result<&Vec<TaggedWord>> {
        self.pos_tags_universal
            .get_or_try_init(|| self.tag_tokens(Tagset::Universal, "pos_tags_universal"))
    }

    pub fn pos_tags_fine(&self) -> Result<&Vec<TaggedWord>> {
        self.pos_tags_fine
            .get_or_try_init(|| self.tag_tokens(Tagset::Fine, "pos_tags_fine"))
    }

    pub fn entity_chunks(&self) -> Result<&EntityTree> {
        self.entity_chunks.get_or_try_init(|| {
            let fine = self.pos_tags_fine()?;
            let tree = self.service.chunk_entities(fine)?;
            debug!(view = "entity_chunks", size = tree.nodes.len(), "visão calculada");
            Ok(tree)
        })
    }

    fn tag_tokens(&self, tagset: Tagset, view: &'static str) -> Result<Vec<TaggedWord>> {
        let tokens = self.tokens()?;
        let tagged = self.service.tag_part_of_speech(tokens, tagset)?;
        if tagged.len() != tokens.len() {
            return Err(CorpusError::DependencyFailure(format!(
                "{view}: {} tags para {} tokens",
                tagged.len(),
                tokens.len()
            )));
        }
        debug!(view, size = tagged.len(), "visão calculada");
        Ok(tagged)
    }
}

impl fmt::Debug for AnnotationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationCache")
            .field("raw_len", &self.raw.len())
            .field("tokens", &self.tokens.is_computed())
            .field("sentences", &self.sentences.is_computed())
            .field("sentence_tokens", &self.sentence_tokens.is_computed())
            .field("pos_tags_universal", &self.pos_tags_universal.is_computed())
            .field("pos_tags_fine", &self.pos_tags_fine.is_computed())
            .field("entity_chunks", &self.entity_chunks.is_computed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::testing::{CallCounts, CountingService, ScriptedService};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_lazy_view_computes_once() {
        let view: LazyView<usize> = LazyView::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let value = view
                .get_or_try_init(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .unwrap();
            assert_eq!(*value, 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lazy_view_failure_leaves_view_empty() {
        let view: LazyView<usize> = LazyView::new();
        let err = view.get_or_try_init(|| Err(CorpusError::DependencyFailure("x".to_string())));
        assert!(err.is_err());
        assert!(!view.is_computed());
        assert_eq!(*view.get_or_try_init(|| Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_views_are_aligned() {
        let service = ScriptedService::new().with_tag("cats", "NOUN", "NNS");
        let cache = AnnotationCache::new("the cats sleep".to_string(), Arc::new(service));
        let tokens = cache.tokens().unwrap().clone();
        let universal = cache.pos_tags_universal().unwrap();
        let fine = cache.pos_tags_fine().unwrap();
        assert_eq!(tokens.len(), 3);
        for i in 0..tokens.len() {
            assert_eq!(universal[i].token, tokens[i]);
            assert_eq!(fine[i].token, tokens[i]);
        }
        assert_eq!(universal[1].tag, "NOUN");
        assert_eq!(fine[1].tag, "NNS");
    }

    #[test]
    fn test_service_called_once_per_view() {
        let counting = CountingService::new(ScriptedService::new());
        let counts: Arc<CallCounts> = counting.counts.clone();
        let cache = AnnotationCache::new("a b\nc d".to_string(), Arc::new(counting));

        let first = cache.entity_chunks().unwrap().clone();
        let second = cache.entity_chunks().unwrap().clone();
        assert_eq!(first, second);
        cache.pos_tags_universal().unwrap();
        cache.sentences().unwrap();
        cache.sentences().unwrap();

        assert_eq!(CallCounts::get(&counts.tokenize), 1);
        assert_eq!(CallCounts::get(&counts.tag), 2);
        assert_eq!(CallCounts::get(&counts.chunk), 1);
        assert_eq!(CallCounts::get(&counts.segment), 1);

        // uma chamada de tokenize por sentença, só no primeiro acesso
        let per_sentence = cache.sentence_tokens().unwrap().clone();
        assert_eq!(per_sentence, [vec!["a", "b"], vec!["c", "d"]]);
        cache.sentence_tokens().unwrap();
        assert_eq!(CallCounts::get(&counts.tokenize), 3);
        assert_eq!(CallCounts::get(&counts.segment), 1);
    }

    #[test]
    fn test_concurrent_first_access() {
        let counting = CountingService::new(ScriptedService::new());
        let counts = counting.counts.clone();
        let cache = AnnotationCache::new("x y z".to_string(), Arc::new(counting));

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    assert_eq!(cache.pos_tags_fine().unwrap().len(), 3);
                });
            }
        });
        assert_eq!(CallCounts::get(&counts.tokenize), 1);
        assert_eq!(CallCounts::get(&counts.tag), 1);
    }

    #[test]
    fn test_dependency_failure_surfaces() {
        let service = ScriptedService::new().failing_tagger();
        let cache = AnnotationCache::new("a b".to_string(), Arc::new(service));
        assert!(cache.tokens().is_ok());
        assert!(matches!(
            cache.pos_tags_universal(),
            Err(CorpusError::DependencyFailure(_))
        ));
    }
}
