//! DMO Assist — keyword collection and classification chatbot core.

pub mod agent;
pub mod channels;
pub mod config;
pub mod credentials;
pub mod dialogue;
pub mod error;
pub mod export;
pub mod guard;
pub mod llm;
