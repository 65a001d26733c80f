//! Prompt construction and fallback handling.

use std::sync::Arc;

use tracing::warn;

use super::{MessageGenerator, UnavailableGenerator};

/// Returned when the generator fails on a group announcement.
pub const GROUP_ERROR_FALLBACK: &str =
    "Erro ao conectar com a IA. Verifique sua chave de API ou tente novamente.";

/// Returned when the generator answers a group announcement with no text.
pub const GROUP_EMPTY_FALLBACK: &str = "Não foi possível gerar a mensagem.";

/// Builds the prompt for a group announcement.
pub fn group_prompt(date_label: &str, time_label: &str, names: &[String]) -> String {
    format!(
        "Você escreve avisos para um grupo de voluntários de uma igreja.\n\
         Escreva uma mensagem curta e animadora para WhatsApp.\n\
         \n\
         Evento: Reunião de Domingo\n\
         Data: {date_label}\n\
         Horário: {time_label}\n\
         Voluntários escalados: {names}\n\
         \n\
         A mensagem deve lembrar o compromisso, trazer uma frase curta sobre servir \
         ao próximo, pedir confirmação, usar emojis e destacar o essencial com *negrito*.",
        names = names.join(", "),
    )
}

/// Builds the prompt for a reminder to one volunteer.
pub fn individual_prompt(name: &str, date_label: &str, time_label: &str) -> String {
    format!(
        "Escreva uma mensagem curta e direta para WhatsApp.\n\
         \n\
         Destinatário: {name}\n\
         Data do plantão: {date_label}\n\
         Horário: {time_label}\n\
         \n\
         Tom amigável e respeitoso. Lembre do plantão e peça para chegar 15 minutos antes."
    )
}

/// Text used when a reminder cannot be generated.
///
/// ```
/// use sunday_roster::messaging::individual_fallback;
///
/// assert_eq!(
///     individual_fallback("Ana", "02/06/2024", "09:00"),
///     "Olá Ana, lembrete do seu plantão dia 02/06/2024 às 09:00. \
///      Por favor, chegue 15 minutos antes."
/// );
/// ```
pub fn individual_fallback(name: &str, date_label: &str, time_label: &str) -> String {
    format!(
        "Olá {name}, lembrete do seu plantão dia {date_label} às {time_label}. \
         Por favor, chegue 15 minutos antes."
    )
}

/// Generates announcements and reminders, never failing.
#[derive(Clone)]
pub struct Announcer {
    generator: Arc<dyn MessageGenerator>,
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(Arc::new(UnavailableGenerator))
    }
}

impl Announcer {
    /// Creates an announcer backed by `generator`.
    pub fn new(generator: Arc<dyn MessageGenerator>) -> Self {
        Self { generator }
    }

    /// Announcement for everyone serving a shift.
    pub async fn group_message(
        &self,
        date_label: &str,
        time_label: &str,
        names: &[String],
    ) -> String {
        let prompt = group_prompt(date_label, time_label, names);
        match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => GROUP_EMPTY_FALLBACK.to_string(),
            Err(error) => {
                warn!(
                    error = %error,
                    date = date_label,
                    time = time_label,
                    "Group message fell back"
                );
                GROUP_ERROR_FALLBACK.to_string()
            }
        }
    }

    /// Reminder for one volunteer.
    pub async fn individual_message(
        &self,
        name: &str,
        date_label: &str,
        time_label: &str,
    ) -> String {
        let prompt = individual_prompt(name, date_label, time_label);
        match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => individual_fallback(name, date_label, time_label),
            Err(error) => {
                warn!(error = %error, date = date_label, time = time_label, "Reminder fell back");
                individual_fallback(name, date_label, time_label)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::MessageError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Echo {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageGenerator for Echo {
        async fn generate(&self, prompt: &str) -> Result<String, MessageError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("Bom dia, equipe!".to_string())
        }
    }

    struct Blank;

    #[async_trait]
    impl MessageGenerator for Blank {
        async fn generate(&self, _prompt: &str) -> Result<String, MessageError> {
            Ok("   ".to_string())
        }
    }

    fn names() -> Vec<String> {
        vec!["Ana".to_string(), "Bruno".to_string()]
    }

    #[tokio::test]
    async fn test_group_message_passes_context_in_prompt() {
        let echo = Arc::new(Echo {
            prompts: Mutex::new(Vec::new()),
        });
        let announcer = Announcer::new(echo.clone());

        let text = announcer.group_message("02/06/2024", "09:00", &names()).await;
        assert_eq!(text, "Bom dia, equipe!");

        let prompts = echo.prompts.lock().unwrap();
        assert!(prompts[0].contains("02/06/2024"));
        assert!(prompts[0].contains("09:00"));
        assert!(prompts[0].contains("Ana, Bruno"));
    }

    #[tokio::test]
    async fn test_group_message_failure_falls_back() {
        let announcer = Announcer::default();
        let text = announcer.group_message("02/06/2024", "18:00", &names()).await;
        assert_eq!(text, GROUP_ERROR_FALLBACK);
    }

    #[tokio::test]
    async fn test_group_message_blank_response_falls_back() {
        let announcer = Announcer::new(Arc::new(Blank));
        let text = announcer.group_message("02/06/2024", "18:00", &names()).await;
        assert_eq!(text, GROUP_EMPTY_FALLBACK);
    }

    #[tokio::test]
    async fn test_individual_message_failure_is_deterministic() {
        let announcer = Announcer::default();
        let first = announcer.individual_message("Ana", "02/06/2024", "09:00").await;
        let second = announcer.individual_message("Ana", "02/06/2024", "09:00").await;

        assert_eq!(first, second);
        assert_eq!(first, individual_fallback("Ana", "02/06/2024", "09:00"));
    }

    #[tokio::test]
    async fn test_individual_message_blank_response_falls_back() {
        let announcer = Announcer::new(Arc::new(Blank));
        let text = announcer.individual_message("Bruno", "09/06/2024", "18:00").await;
        assert!(text.starts_with("Olá Bruno"));
    }

    #[test]
    fn test_individual_prompt_mentions_recipient() {
        let prompt = individual_prompt("Ana", "02/06/2024", "09:00");
        assert!(prompt.contains("Destinatário: Ana"));
        assert!(prompt.contains("15 minutos"));
    }
}
