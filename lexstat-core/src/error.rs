//! # Erros do Motor de Estatísticas
//!
//! Todos os erros são locais à operação invocada: nenhuma operação tenta de novo
//! automaticamente e nenhuma falha deixa uma visão do cache pela metade.

use thiserror::Error;

/// Erro de qualquer operação sobre um [`Corpus`](crate::corpus::Corpus).
#[derive(Debug, Error)]
pub enum CorpusError {
    /// O serviço de anotação linguística falhou ou rejeitou a entrada.
    /// É fatal: a anotação é pré-requisito, não uma chamada de rede transitória.
    #[error("falha no serviço de anotação: {0}")]
    DependencyFailure(String),

    /// A estatística exige pelo menos um token/sentença.
    #[error("corpus vazio: {0}")]
    EmptyCorpus(&'static str),

    /// `ratio` quando a tag do denominador nunca ocorre.
    #[error("divisão por zero: a tag '{denominator}' não ocorre no corpus")]
    DivisionByZero { denominator: String },

    /// Uma tripla de data casou com o padrão mas não forma uma data válida.
    #[error("data inválida '{text}' para o formato '{format}'")]
    UnparsableDate { text: String, format: String },

    /// Categoria POS ou de entidade desconhecida.
    #[error("categoria desconhecida: {0}")]
    InvalidCategory(String),

    /// Chave de fragmento de data desconhecida.
    #[error("formato de data desconhecido: {0}")]
    InvalidFormat(String),

    /// Argumento numérico fora do domínio (ex: passo zero).
    #[error("argumento inválido: {0}")]
    InvalidArgument(String),

    /// Codificação de caracteres desconhecida no carregador de texto.
    #[error("codificação desconhecida: {0}")]
    Encoding(String),

    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuração inválida: {0}")]
    Config(#[from] serde_json::Error),
}

/// Resultado padrão das operações do crate.
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CorpusError::DivisionByZero { denominator: "VERB".to_string() };
        assert!(err.to_string().contains("VERB"));

        let err = CorpusError::InvalidCategory("FOO".to_string());
        assert_eq!(err.to_string(), "categoria desconhecida: FOO");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "sumiu");
        let err: CorpusError = io.into();
        assert!(matches!(err, CorpusError::Io(_)));
    }
}
