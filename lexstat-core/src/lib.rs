//! # lexstat-core: Estatísticas Lexicais e Temporais de Corpus
//!
//! Este crate calcula perfis quantitativos de um documento de texto: curvas de
//! crescimento do vocabulário, distribuição de categorias gramaticais, força de
//! colocações, extração de expressões temporais e ranking de sentenças.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em um único sentido:
//!
//! 1.  **Entrada**: Texto bruto, normalizado para minúsculas ([`loader`] para arquivos).
//! 2.  **Anotação** ([`annotation`]): tokenização ([`tokenizer`]), segmentação em
//!     sentenças ([`segmenter`]), etiquetagem POS ([`tagger`]) e chunking de
//!     entidades ([`chunker`]), atrás do trait [`AnnotationService`].
//! 3.  **Cache** ([`cache`]): cada visão de anotação é calculada no máximo uma vez.
//! 4.  **Estatísticas** (blocos `impl Corpus`):
//!     *   [`lexical`]: vocabulário, hapax, médias.
//!     *   [`tag_stats`]: razões de tags, bigramas de tags, colocações (LMI).
//!     *   [`search`]: entidades, categorias gramaticais, sentenças por conteúdo.
//!     *   [`temporal`]: datas, meses e dias da semana.
//!     *   [`ranking`]: menor/maior sentença e cadeia de Markov de ordem 0.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use lexstat_core::Corpus;
//!
//! let corpus = Corpus::new("Mr. Darcy met Elizabeth in London on 05/12/1811. Darcy smiled.");
//!
//! let people = corpus.find_entities_by_category("PERSON", None).unwrap();
//! assert_eq!(people[0], ("darcy".to_string(), 2));
//!
//! let dates = corpus.extract_dates("dd", "mm", "yyyy", None).unwrap();
//! assert_eq!(dates.len(), 1);
//!
//! let (shortest, _longest) = corpus.min_max_sentence(None).unwrap();
//! assert_eq!(shortest, "darcy smiled.");
//! ```

pub mod annotation;
pub mod cache;
pub mod chunker;
pub mod config;
pub mod corpus;
pub mod demo;
pub mod error;
pub mod freq;
pub mod lexical;
pub mod lexicon;
pub mod loader;
pub mod ranking;
pub mod search;
pub mod segmenter;
pub mod tag_stats;
pub mod tagger;
pub mod temporal;
pub mod tokenizer;

pub use annotation::{AnnotationService, RuleBasedAnnotator};
pub use chunker::{ChunkNode, EntityCategory, EntityChunk, EntityTree};
pub use config::CorpusConfig;
pub use corpus::Corpus;
pub use error::{CorpusError, Result};
pub use tag_stats::Bigram;
pub use tagger::{TaggedWord, Tagset, UniversalTag};
pub use temporal::{DateFragment, FragmentGroup};
