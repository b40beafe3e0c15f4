//! # Serviço de Anotação Linguística
//!
//! Toda a análise linguística (tokenização, segmentação, etiquetagem POS e
//! chunking de entidades) passa pelo trait [`AnnotationService`]. O corpus só
//! conhece o trait; qualquer implementação pode ser injetada.
//!
//! O crate traz o [`RuleBasedAnnotator`], que agrega os componentes de regras:
//!
//! ```text
//! texto ──► tokenizer ──► tagger (fino/universal) ──► chunker ──► EntityTree
//!   └─────► segmenter ──► sentenças
//! ```

use crate::chunker::{EntityTree, RuleChunker};
use crate::error::Result;
use crate::lexicon::Gazetteers;
use crate::segmenter;
use crate::tagger::{PosTagger, TaggedWord, Tagset};
use crate::tokenizer;

/// Contrato do serviço de anotação usado pelo corpus.
///
/// Falhas devem ser reportadas como
/// [`CorpusError::DependencyFailure`](crate::error::CorpusError::DependencyFailure).
/// A saída de `tag_part_of_speech` deve estar alinhada índice a índice com a entrada.
pub trait AnnotationService: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    fn segment_sentences(&self, text: &str) -> Result<Vec<String>>;

    fn tag_part_of_speech(&self, tokens: &[String], tagset: Tagset) -> Result<Vec<TaggedWord>>;

    /// Recebe tokens com tags finas e agrupa as entidades.
    fn chunk_entities(&self, tagged: &[TaggedWord]) -> Result<EntityTree>;
}

/// Anotador determinístico para inglês em minúsculas, baseado em regras e gazetteers.
pub struct RuleBasedAnnotator {
    tagger: PosTagger,
    chunker: RuleChunker,
}

impl RuleBasedAnnotator {
    /// Constrói o anotador com gazetteers próprios (usados pelo tagger e pelo chunker).
    pub fn new(gazetteers: Gazetteers) -> Self {
        Self {
            tagger: PosTagger::new(gazetteers.clone()),
            chunker: RuleChunker::new(gazetteers),
        }
    }
}

impl Default for RuleBasedAnnotator {
    fn default() -> Self {
        Self::new(Gazetteers::english())
    }
}

impl AnnotationService for RuleBasedAnnotator {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(tokenizer::tokenize_words(text))
    }

    fn segment_sentences(&self, text: &str) -> Result<Vec<String>> {
        Ok(segmenter::segment_sentences(text))
    }

    fn tag_part_of_speech(&self, tokens: &[String], tagset: Tagset) -> Result<Vec<TaggedWord>> {
        Ok(self.tagger.tag(tokens, tagset))
    }

    fn chunk_entities(&self, tagged: &[TaggedWord]) -> Result<EntityTree> {
        Ok(self.chunker.chunk(tagged))
    }
}

/// Dublês do serviço para os testes das estatísticas.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::error::CorpusError;

    /// Serviço roteirizado: tokens separados por espaço, uma sentença por linha
    /// e tags lidas de uma tabela fixa (padrão `X` / `NN`).
    #[derive(Default)]
    pub struct ScriptedService {
        tags: HashMap<String, (String, String)>,
        fail_tagging: bool,
    }

    impl ScriptedService {
        pub fn new() -> Self {
            Self::default()
        }

        /// Registra as tags universal e fina de um token.
        pub fn with_tag(mut self, token: &str, universal: &str, fine: &str) -> Self {
            self.tags
                .insert(token.to_string(), (universal.to_string(), fine.to_string()));
            self
        }

        /// Faz `tag_part_of_speech` falhar sempre.
        pub fn failing_tagger(mut self) -> Self {
            self.fail_tagging = true;
            self
        }
    }

    impl AnnotationService for ScriptedService {
        fn tokenize(&self, text: &str) -> Result<Vec<String>> {
            Ok(text.split_whitespace().map(String::from).collect())
        }

        fn segment_sentences(&self, text: &str) -> Result<Vec<String>> {
            Ok(text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect())
        }

        fn tag_part_of_speech(&self, tokens: &[String], tagset: Tagset) -> Result<Vec<TaggedWord>> {
            if self.fail_tagging {
                return Err(CorpusError::DependencyFailure("tagger indisponível".to_string()));
            }
            Ok(tokens
                .iter()
                .map(|token| {
                    let (universal, fine) = self
                        .tags
                        .get(token)
                        .map(|(u, f)| (u.as_str(), f.as_str()))
                        .unwrap_or(("X", "NN"));
                    let tag = match tagset {
                        Tagset::Universal => universal,
                        Tagset::Fine => fine,
                    };
                    TaggedWord::new(token.clone(), tag)
                })
                .collect())
        }

        fn chunk_entities(&self, tagged: &[TaggedWord]) -> Result<EntityTree> {
            Ok(RuleChunker::default().chunk(tagged))
        }
    }

    /// Contadores de chamadas por operação do serviço.
    #[derive(Default)]
    pub struct CallCounts {
        pub tokenize: AtomicUsize,
        pub segment: AtomicUsize,
        pub tag: AtomicUsize,
        pub chunk: AtomicUsize,
    }

    impl CallCounts {
        pub fn get(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    /// Envolve um serviço e conta quantas vezes cada operação foi chamada.
    pub struct CountingService<S> {
        inner: S,
        pub counts: Arc<CallCounts>,
    }

    impl<S: AnnotationService> CountingService<S> {
        pub fn new(inner: S) -> Self {
            Self {
                inner,
                counts: Arc::new(CallCounts::default()),
            }
        }
    }

    impl<S: AnnotationService> AnnotationService for CountingService<S> {
        fn tokenize(&self, text: &str) -> Result<Vec<String>> {
            self.counts.tokenize.fetch_add(1, Ordering::SeqCst);
            self.inner.tokenize(text)
        }

        fn segment_sentences(&self, text: &str) -> Result<Vec<String>> {
            self.counts.segment.fetch_add(1, Ordering::SeqCst);
            self.inner.segment_sentences(text)
        }

        fn tag_part_of_speech(&self, tokens: &[String], tagset: Tagset) -> Result<Vec<TaggedWord>> {
            self.counts.tag.fetch_add(1, Ordering::SeqCst);
            self.inner.tag_part_of_speech(tokens, tagset)
        }

        fn chunk_entities(&self, tagged: &[TaggedWord]) -> Result<EntityTree> {
            self.counts.chunk.fetch_add(1, Ordering::SeqCst);
            self.inner.chunk_entities(tagged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::EntityCategory;

    #[test]
    fn test_rule_based_pipeline() {
        let annotator = RuleBasedAnnotator::default();
        let text = "mr. darcy arrived in london. he stayed until monday.";

        let sentences = annotator.segment_sentences(text).unwrap();
        assert_eq!(sentences.len(), 2);

        let tokens = annotator.tokenize(text).unwrap();
        let fine = annotator.tag_part_of_speech(&tokens, Tagset::Fine).unwrap();
        let universal = annotator.tag_part_of_speech(&tokens, Tagset::Universal).unwrap();
        assert_eq!(fine.len(), tokens.len());
        assert_eq!(universal.len(), tokens.len());

        let tree = annotator.chunk_entities(&fine).unwrap();
        let people: Vec<String> = tree.entities_of(EntityCategory::Person).map(|e| e.text()).collect();
        assert_eq!(people, ["darcy"]);
        assert_eq!(tree.entities_of(EntityCategory::Gpe).count(), 1);
        assert_eq!(tree.entities_of(EntityCategory::Date).count(), 1);
    }

    #[test]
    fn test_custom_gazetteers() {
        let mut gaz = Gazetteers::new();
        gaz.add_location("gondor");
        let annotator = RuleBasedAnnotator::new(gaz);
        let tokens = annotator.tokenize("to gondor").unwrap();
        let fine = annotator.tag_part_of_speech(&tokens, Tagset::Fine).unwrap();
        assert_eq!(fine[1].tag, "NNP");
        let tree = annotator.chunk_entities(&fine).unwrap();
        assert_eq!(tree.entities_of(EntityCategory::Gpe).count(), 1);
    }
}
