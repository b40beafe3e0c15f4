//! # Busca de Entidades e Conteúdo
//!
//! Consultas que percorrem as visões de anotação procurando entidades de uma
//! categoria, tokens de uma categoria gramatical ou sentenças com um trecho.
//!
//! Quando há um filtro de conteúdo, as sentenças que o contêm são unidas por
//! espaço e esse texto reduzido é re-anotado pelo serviço (sem passar pelo cache).

use std::borrow::Cow;

use regex::Regex;
use tracing::debug;

use crate::chunker::{EntityCategory, EntityChunk};
use crate::corpus::Corpus;
use crate::error::{CorpusError, Result};
use crate::freq::FrequencyTable;
use crate::tagger::{TaggedWord, Tagset, UniversalTag};

impl Corpus {
    /// Sentenças que contêm `word` (sem espaços finais) como substring, em ordem.
    pub fn find_sentences_containing(&self, word: &str) -> Result<Vec<String>> {
        let needle = word.trim_end();
        Ok(self
            .cache()
            .sentences()?
            .iter()
            .filter(|sentence| sentence.contains(needle))
            .cloned()
            .collect())
    }

    /// Entidades da categoria pedida, com o número de ocorrências no texto bruto.
    ///
    /// A entidade é reportada como aparece no texto bruto ("$5", e não "$ 5").
    /// Uma entidade cujo texto é igual ao filtro de conteúdo é descartada.
    pub fn find_entities_by_category(
        &self,
        category: &str,
        content: Option<&str>,
    ) -> Result<Vec<(String, usize)>> {
        let category: EntityCategory = category.parse()?;

        let chunks: Vec<EntityChunk> = match content {
            None => self
                .cache()
                .entity_chunks()?
                .entities_of(category)
                .cloned()
                .collect(),
            Some(content) => {
                let fine = self.retag_filtered(content, Tagset::Fine)?;
                let tree = self.cache().service().chunk_entities(&fine)?;
                let chunks = tree.entities_of(category).cloned().collect();
                chunks
            }
        };

        let excluded = content.map(str::trim_end);
        let raw = self.raw();
        let mut table = FrequencyTable::new();
        for chunk in chunks {
            let joined = chunk.text();
            if Some(joined.as_str()) == excluded {
                continue;
            }
            let surface = Regex::new(&chunk.surface_pattern())
                .map_err(|e| CorpusError::InvalidFormat(e.to_string()))?;
            let mut matches = surface.find_iter(raw);
            let Some(first) = matches.next() else {
                debug!(entity = %joined, "entidade sem ocorrência no texto bruto");
                if !table.contains(&joined) {
                    table.add_n(joined, 0);
                }
                continue;
            };
            let text = first.as_str().to_string();
            if Some(text.as_str()) == excluded || table.contains(&text) {
                continue;
            }
            let count = 1 + matches.count();
            table.add_n(text, count);
        }
        Ok(table.into_ranked())
    }

    /// Tokens com a tag universal pedida, contados e ranqueados.
    pub fn find_tokens_by_grammar_category(
        &self,
        category: &str,
        content: Option<&str>,
    ) -> Result<Vec<(String, usize)>> {
        let category: UniversalTag = category.parse()?;

        let retagged;
        let tagged: &[TaggedWord] = match content {
            None => self.cache().pos_tags_universal()?.as_slice(),
            Some(content) => {
                retagged = self.retag_filtered(content, Tagset::Universal)?;
                retagged.as_slice()
            }
        };

        let table: FrequencyTable<String> = tagged
            .iter()
            .filter(|tw| tw.tag == category.name())
            .map(|tw| tw.token.clone())
            .collect();
        Ok(table.into_ranked())
    }

    /// Os `top_n` nomes de pessoa mais frequentes, cada um com as sentenças que o citam.
    ///
    /// Sem `top_n`, usa `config.top_names`; se também ausente, devolve todos.
    pub fn sentences_by_person_name(&self, top_n: Option<usize>) -> Result<Vec<(String, Vec<String>)>> {
        let limit = top_n.or(self.config().top_names).unwrap_or(usize::MAX);
        self.find_entities_by_category(EntityCategory::Person.name(), None)?
            .into_iter()
            .take(limit)
            .map(|(name, _)| {
                let sentences = self.find_sentences_containing(&name)?;
                Ok((name, sentences))
            })
            .collect()
    }

    /// Texto bruto ou, com filtro, as sentenças que contêm o filtro unidas por espaço.
    pub(crate) fn filtered_text(&self, content: Option<&str>) -> Result<Cow<'_, str>> {
        match content {
            None => Ok(Cow::Borrowed(self.raw())),
            Some(content) => Ok(Cow::Owned(self.find_sentences_containing(content)?.join(" "))),
        }
    }

    fn retag_filtered(&self, content: &str, tagset: Tagset) -> Result<Vec<TaggedWord>> {
        let text = self.filtered_text(Some(content))?;
        let service = self.cache().service();
        let tokens = service.tokenize(&text)?;
        debug!(content, tokens = tokens.len(), "re-anotando trecho filtrado");
        service.tag_part_of_speech(&tokens, tagset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::testing::ScriptedService;
    use std::sync::Arc;

    const TEXT: &str =
        "Mr. Darcy met Elizabeth in London. Darcy smiled. Elizabeth went to Paris with Jane.";

    #[test]
    fn test_find_sentences_containing() {
        let c = Corpus::new(TEXT);
        assert_eq!(
            c.find_sentences_containing("darcy  ").unwrap(),
            ["mr. darcy met elizabeth in london.", "darcy smiled."]
        );
        assert!(c.find_sentences_containing("zebra").unwrap().is_empty());
    }

    #[test]
    fn test_find_entities_by_category() {
        let c = Corpus::new(TEXT);
        assert_eq!(
            c.find_entities_by_category("PERSON", None).unwrap(),
            [("darcy".to_string(), 2), ("elizabeth".to_string(), 2), ("jane".to_string(), 1)]
        );
        assert_eq!(
            c.find_entities_by_category("gpe", None).unwrap(),
            [("london".to_string(), 1), ("paris".to_string(), 1)]
        );
    }

    #[test]
    fn test_find_entities_with_content_filter() {
        let c = Corpus::new(TEXT);
        assert_eq!(
            c.find_entities_by_category("PERSON", Some("paris")).unwrap(),
            [("elizabeth".to_string(), 2), ("jane".to_string(), 1)]
        );
        // a própria entidade usada como filtro não aparece
        assert!(c.find_entities_by_category("GPE", Some("paris")).unwrap().is_empty());
    }

    #[test]
    fn test_entities_counted_by_surface_text() {
        let c = Corpus::new("He paid $5 on December 5, 1990 at 10:30. At 10 : 30 he paid $5 again.");
        assert_eq!(
            c.find_entities_by_category("MONEY", None).unwrap(),
            [("$5".to_string(), 2)]
        );
        assert_eq!(
            c.find_entities_by_category("TIME", None).unwrap(),
            [("10:30".to_string(), 2)]
        );
        assert_eq!(
            c.find_entities_by_category("DATE", None).unwrap(),
            [("december 5, 1990".to_string(), 1)]
        );
    }

    #[test]
    fn test_invalid_category_checked_before_annotation() {
        let c = Corpus::with_service("a b", Arc::new(ScriptedService::new().failing_tagger()));
        assert!(matches!(
            c.find_entities_by_category("ALIEN", None),
            Err(CorpusError::InvalidCategory(_))
        ));
        assert!(matches!(
            c.find_tokens_by_grammar_category("ALIEN", None),
            Err(CorpusError::InvalidCategory(_))
        ));
        assert!(matches!(
            c.find_entities_by_category("PERSON", None),
            Err(CorpusError::DependencyFailure(_))
        ));
    }

    #[test]
    fn test_find_tokens_by_grammar_category() {
        let service = ScriptedService::new()
            .with_tag("x", "NOUN", "NN")
            .with_tag("fast", "ADV", "RB");
        let c = Corpus::with_service("x y x\ny fast x", Arc::new(service));
        assert_eq!(c.find_tokens_by_grammar_category("noun", None).unwrap(), [("x".to_string(), 3)]);
        assert_eq!(
            c.find_tokens_by_grammar_category("ADV", Some("fast")).unwrap(),
            [("fast".to_string(), 1)]
        );
        assert_eq!(
            c.find_tokens_by_grammar_category("NOUN", Some("fast")).unwrap(),
            [("x".to_string(), 1)]
        );
    }

    #[test]
    fn test_sentences_by_person_name() {
        let c = Corpus::new(TEXT);
        let grouped = c.sentences_by_person_name(Some(1)).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].0, "darcy");
        assert_eq!(grouped[0].1, ["mr. darcy met elizabeth in london.", "darcy smiled."]);

        assert_eq!(c.sentences_by_person_name(None).unwrap().len(), 3);
    }

    #[test]
    fn test_filtered_text() {
        let c = Corpus::new(TEXT);
        assert_eq!(c.filtered_text(None).unwrap(), c.raw());
        assert_eq!(
            c.filtered_text(Some("elizabeth")).unwrap(),
            "mr. darcy met elizabeth in london. elizabeth went to paris with jane."
        );
    }
}
