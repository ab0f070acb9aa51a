//! The agent loop — wires a channel, the dialogue engine, and the
//! export collaborator into a one-utterance-at-a-time conversation.

use std::sync::Arc;

use futures::StreamExt;

use crate::channels::{Channel, IncomingMessage, OutgoingResponse};
use crate::config::AgentConfig;
use crate::dialogue::{self, prompts, ChatMessage, Session, SideEffect};
use crate::error::Result;
use crate::export::{ExportReport, Exporter};
use crate::llm::LlmProvider;

/// Single-session conversational agent.
///
/// Strictly sequential: each utterance is fully processed (guard →
/// engine → response → side effects) before the next is read.
pub struct Agent {
    config: AgentConfig,
    exporter: Arc<dyn Exporter>,
    /// Generation hook. Never invoked by the scripted flow; present so
    /// hosts can add free-form replies later.
    #[allow(dead_code)]
    llm: Option<Arc<dyn LlmProvider>>,
    session: Session,
}

impl Agent {
    pub fn new(
        config: AgentConfig,
        exporter: Arc<dyn Exporter>,
        llm: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        Self {
            config,
            exporter,
            llm,
            session: Session::default(),
        }
    }

    /// Read-only view of the session, for progress display and tests.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process one utterance and produce the response to display.
    pub async fn handle_utterance(&mut self, utterance: &str) -> OutgoingResponse {
        self.session
            .chat_history
            .push(ChatMessage::user(utterance));

        let session = std::mem::take(&mut self.session);
        let outcome = dialogue::step(session, utterance);
        self.session = outcome.session;

        let mut text = outcome.response;
        match outcome.effect {
            Some(SideEffect::Export) => {
                text = self.run_export(text).await;
            }
            Some(SideEffect::Restart) => {
                tracing::info!(agent = %self.config.name, "session restarted");
            }
            None => {}
        }

        self.session.chat_history.push(ChatMessage::assistant(&text));

        let mut response = OutgoingResponse::new(text);
        if self.session.classified_count() > 0 || self.session.pending_count() > 0 {
            response = response.with_progress(format!(
                "Classified: {} | Pending: {}",
                self.session.classified_count(),
                self.session.pending_count()
            ));
        }
        response
    }

    /// Run the export side effect and fold the outcome into the reply.
    /// The session is never mutated by export, so failures are
    /// retryable with another "download".
    async fn run_export(&self, base_text: String) -> String {
        let report = ExportReport::new(&self.session.department, &self.session.classified_words);
        match self.exporter.export(&report).await {
            Ok(artifacts) => format!(
                "{base_text}\n\n✅ Files generated successfully!\n📊 CSV: {}\n📄 JSON: {}",
                artifacts.csv_path.display(),
                artifacts.json_path.display()
            ),
            Err(e) => {
                tracing::error!("export failed: {}", e);
                format!(
                    "{base_text}\n\n❌ Error generating files: {e}\nYour classified words are \
                     unchanged — type 'download' to try again."
                )
            }
        }
    }

    /// Drive the conversation over a channel until EOF or `/quit`.
    pub async fn run(mut self, channel: Box<dyn Channel>) -> Result<()> {
        let mut stream = channel.start().await?;

        // Initial greeting, shown before the first user turn.
        let greeting_target = IncomingMessage::new(channel.name(), "", "");
        channel
            .respond(&greeting_target, OutgoingResponse::new(prompts::GREETING))
            .await?;
        self.session
            .chat_history
            .push(ChatMessage::assistant(prompts::GREETING));

        while let Some(msg) = stream.next().await {
            if msg.content == "/quit" {
                break;
            }
            tracing::debug!(channel = %msg.channel, stage = %self.session.stage, "turn");
            let response = self.handle_utterance(&msg.content).await;
            channel.respond(&msg, response).await?;
        }

        channel.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::Stage;
    use crate::error::ExportError;
    use crate::export::ExportArtifacts;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every report it is asked to export; can be set to fail.
    struct FakeExporter {
        reports: Mutex<Vec<ExportReport>>,
        fail: bool,
    }

    impl FakeExporter {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                reports: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl Exporter for FakeExporter {
        async fn export(
            &self,
            report: &ExportReport,
        ) -> std::result::Result<ExportArtifacts, ExportError> {
            self.reports.lock().unwrap().push(report.clone());
            if self.fail {
                return Err(ExportError::Io(std::io::Error::other("disk full")));
            }
            Ok(ExportArtifacts {
                csv_path: "out.csv".into(),
                json_path: "out.json".into(),
            })
        }
    }

    fn agent_with(exporter: Arc<FakeExporter>) -> Agent {
        Agent::new(AgentConfig::default(), exporter, None)
    }

    #[tokio::test]
    async fn full_scenario_classifies_and_exports_once() {
        let exporter = FakeExporter::new(false);
        let mut agent = agent_with(exporter.clone());

        for utterance in ["Finance", "invoice, ledger", "Internal", "Confidential"] {
            agent.handle_utterance(utterance).await;
        }
        let response = agent.handle_utterance("download").await;

        assert!(response.content.contains("Files generated successfully"));
        let reports = exporter.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].department, "Finance");
        assert_eq!(reports[0].classified_words.len(), 2);
        assert_eq!(reports[0].classified_words[0].word, "invoice");
        assert_eq!(reports[0].classified_words[1].word, "ledger");
    }

    #[tokio::test]
    async fn export_failure_is_surfaced_and_session_kept() {
        let exporter = FakeExporter::new(true);
        let mut agent = agent_with(exporter);

        for utterance in ["Finance", "invoice", "Internal"] {
            agent.handle_utterance(utterance).await;
        }
        let response = agent.handle_utterance("download").await;

        assert!(response.content.contains("Error generating files"));
        // Data untouched, still in the menu, retryable
        assert_eq!(agent.session().classified_words.len(), 1);
        assert_eq!(agent.session().stage, Stage::FinalOptions);
    }

    #[tokio::test]
    async fn chat_history_records_both_roles() {
        let mut agent = agent_with(FakeExporter::new(false));
        agent.handle_utterance("Finance").await;

        let history = &agent.session().chat_history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "Finance");
        assert!(history[1].content.contains("Finance"));
    }

    #[tokio::test]
    async fn restart_empties_history_and_progress() {
        let mut agent = agent_with(FakeExporter::new(false));
        for utterance in ["Finance", "invoice", "Internal"] {
            agent.handle_utterance(utterance).await;
        }
        let response = agent.handle_utterance("restart").await;

        assert_eq!(agent.session().stage, Stage::Initial);
        // Only the fresh greeting remains in history
        assert_eq!(agent.session().chat_history.len(), 1);
        assert!(response.progress.is_none());
    }

    #[tokio::test]
    async fn progress_line_tracks_counts() {
        let mut agent = agent_with(FakeExporter::new(false));
        agent.handle_utterance("Finance").await;
        let response = agent.handle_utterance("invoice, ledger, audit").await;
        assert_eq!(response.progress.as_deref(), Some("Classified: 0 | Pending: 3"));

        let response = agent.handle_utterance("internal").await;
        assert_eq!(response.progress.as_deref(), Some("Classified: 1 | Pending: 2"));
    }
}
