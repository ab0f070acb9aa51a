//! End-to-end conversation tests: full scenario through the agent with a
//! real file exporter, plus the export round-trip.

use std::sync::Arc;

use dmo_assist::agent::Agent;
use dmo_assist::config::AgentConfig;
use dmo_assist::dialogue::{Classification, Stage};
use dmo_assist::export::{read_json_report, FileExporter};

fn agent_exporting_to(dir: &std::path::Path) -> Agent {
    Agent::new(
        AgentConfig::default(),
        Arc::new(FileExporter::new(dir)),
        None,
    )
}

#[tokio::test]
async fn finance_scenario_produces_two_records_and_an_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = agent_exporting_to(dir.path());

    let utterances = ["Finance", "invoice, ledger", "Internal", "Confidential", "download"];
    let mut last = None;
    for utterance in utterances {
        last = Some(agent.handle_utterance(utterance).await);
    }

    let session = agent.session();
    assert_eq!(session.stage, Stage::FinalOptions);
    assert_eq!(session.classified_words.len(), 2);
    assert_eq!(session.classified_words[0].word, "invoice");
    assert_eq!(
        session.classified_words[0].classification,
        Classification::Internal
    );
    assert_eq!(session.classified_words[0].department, "Finance");
    assert_eq!(session.classified_words[1].word, "ledger");
    assert_eq!(
        session.classified_words[1].classification,
        Classification::Confidential
    );
    assert_eq!(session.classified_words[1].department, "Finance");

    assert!(last.unwrap().content.contains("Files generated successfully"));

    // Exactly one export: one CSV and one JSON artifact on disk
    let mut csvs = 0;
    let mut jsons = 0;
    for entry in std::fs::read_dir(dir.path()).unwrap() {
        let name = entry.unwrap().file_name().into_string().unwrap();
        assert!(name.starts_with("dmo_keywords_"));
        if name.ends_with(".csv") {
            csvs += 1;
        } else if name.ends_with(".json") {
            jsons += 1;
        }
    }
    assert_eq!((csvs, jsons), (1, 1));
}

#[tokio::test]
async fn exported_json_round_trips_the_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = agent_exporting_to(dir.path());

    for utterance in ["HR", "memo, policy, review", "internal", "public", "confidential", "download"] {
        agent.handle_utterance(utterance).await;
    }

    let json_path = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.extension().is_some_and(|ext| ext == "json"))
        .expect("a JSON artifact");

    let report = read_json_report(&json_path).await.unwrap();
    assert_eq!(report.department, "HR");
    assert_eq!(report.classified_words, agent.session().classified_words);
}

#[tokio::test]
async fn off_topic_and_bad_input_recover_within_the_conversation() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = agent_exporting_to(dir.path());

    // Off-topic at the start nudges back to the department question
    let response = agent.handle_utterance("tell me a joke").await;
    assert!(response.content.contains("What department do you work in"));
    assert_eq!(agent.session().stage, Stage::Initial);

    agent.handle_utterance("IT").await;

    // Empty batch re-prompts
    let response = agent.handle_utterance("a, b").await;
    assert!(response.content.contains("separated by commas"));
    assert_eq!(agent.session().stage, Stage::CollectWords);

    agent.handle_utterance("server, backup").await;

    // Off-topic mid-classification is refused without losing the queue
    let response = agent.handle_utterance("what is the weather").await;
    assert!(response.content.starts_with("I'm sorry"));
    assert_eq!(agent.session().pending_count(), 2);

    // Invalid labels leave the queue alone, then valid ones drain it
    agent.handle_utterance("secret").await;
    assert_eq!(agent.session().pending_count(), 2);
    agent.handle_utterance("internal").await;
    agent.handle_utterance("confidential").await;
    assert_eq!(agent.session().stage, Stage::FinalOptions);
    assert_eq!(agent.session().classified_words.len(), 2);
}

#[tokio::test]
async fn more_collects_additional_rounds_into_one_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut agent = agent_exporting_to(dir.path());

    for utterance in ["Marketing", "campaign", "public", "more", "budget", "confidential", "download"] {
        agent.handle_utterance(utterance).await;
    }

    let session = agent.session();
    assert_eq!(session.collected_words, vec!["campaign", "budget"]);
    assert_eq!(session.classified_words.len(), 2);

    let json_path = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| p.extension().is_some_and(|ext| ext == "json"))
        .unwrap();
    let report = read_json_report(&json_path).await.unwrap();
    assert_eq!(report.classified_words.len(), 2);
}
