//! Textos de demonstração (inglês) usados pela interface web e pelos testes.

/// Pares (título, texto). O texto é normalizado para minúsculas ao virar um corpus.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Literature",
            "It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife. Mr. Darcy arrived at Netherfield on Monday, 12 October 1811, with Mr. Bingley. Elizabeth Bennet thought him proud. On Thursday the whole party travelled to London. Darcy wrote to Elizabeth on 05/12/1811. She read the letter twice.",
        ),
        (
            "History",
            "On 4 July 1776, the Continental Congress adopted the declaration in Philadelphia. George Washington led the army through the winter. Decades later, Abraham Lincoln delivered his address on November 19, 1863. The war ended in April 1865, and Lincoln was shot on 14/04/1865. Many in Washington mourned him for weeks.",
        ),
        (
            "News",
            "The Bank of England raised interest rates by 0.25% on Wednesday. Shares in London fell 3% before noon, while the pound lost 2 cents against the dollar. Dr. Watson, an economist at the British Museum, said the rise was expected. Markets in New York opened at 9:30 a.m. and recovered by Friday. The next meeting is on 03/11/2024.",
        ),
        (
            "Dates",
            "The report was filed on 05/12/1990 in town. A copy arrived on dec. 7, 1990 and another on 7 december 1990. The deadline moved from sept. 1, 91 to 1-9-91. Nobody worked on Saturday or Sunday, and the archive closed in March.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_texts_not_empty() {
        let texts = demo_texts();
        assert!(!texts.is_empty());
        for (title, text) in texts {
            assert!(!title.is_empty());
            assert!(text.len() > 100);
        }
    }
}
