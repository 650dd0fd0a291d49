//! End-to-end session flow with in-process fakes: no network, no SMTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use frontdesk_agent::{AgentRuntime, OrderNotifier};
use frontdesk_core::{Persona, Role, SlotValues, Turn};
use frontdesk_llm::{CompletionClient, LlmError};

struct EchoClient {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CompletionClient for EchoClient {
    async fn complete(&self, turns: &[Turn]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let last_user = turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .map(|turn| turn.content.clone())
            .unwrap_or_default();
        Ok(format!("echo: {last_user}"))
    }
}

struct RecordingNotifier {
    sends: Arc<Mutex<Vec<SlotValues>>>,
}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
    async fn notify_order(&self, slots: &SlotValues) -> anyhow::Result<()> {
        self.sends
            .lock()
            .map_err(|_| anyhow::anyhow!("lock poisoned"))?
            .push(slots.clone());
        Ok(())
    }
}

#[tokio::test]
async fn ceramics_ordering_flow_reaches_confirmation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let sends = Arc::new(Mutex::new(Vec::new()));

    let agent = AgentRuntime::new(
        Persona::Ceramics,
        Box::new(EchoClient { calls: calls.clone() }),
        Some(Box::new(RecordingNotifier { sends: sends.clone() })),
    )
    .expect("agent should build");
    let mut session = agent.open_session(5);

    assert!(!Persona::Ceramics.greeting().is_empty());

    // Whitespace guard: fixed reply, no completion call.
    let reply = agent.handle_message(&mut session, "   ").await;
    assert_eq!(reply, "Please provide a valid question.");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    agent.handle_message(&mut session, "I would love to order some tiles").await;
    agent.handle_message(&mut session, "order Legna Castano tile").await;
    agent.handle_message(&mut session, "I need 5 units").await;

    assert_eq!(session.slots.item_name, "Legna Castano");
    assert_eq!(session.slots.quantity, 5);

    // Confirmation triggers exactly one notification with current slots.
    agent.handle_message(&mut session, "Yes").await;
    let recorded = sends.lock().expect("lock should not be poisoned");
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].item_name, "Legna Castano");
    assert_eq!(recorded[0].quantity, 5);
}

#[tokio::test]
async fn long_sessions_keep_the_system_prompt_and_history_bound() {
    let agent = AgentRuntime::new(
        Persona::Ceramics,
        Box::new(EchoClient { calls: Arc::new(AtomicUsize::new(0)) }),
        None,
    )
    .expect("agent should build");
    let mut session = agent.open_session(5);

    for i in 0..25 {
        agent.handle_message(&mut session, &format!("question {i}")).await;
    }

    assert!(session.conversation.has_system_turn());
    assert_eq!(session.conversation.turns()[0].role, Role::System);
    assert!(session.conversation.non_system_len() <= 5);
}

#[tokio::test]
async fn insurance_sessions_route_sinhala_to_the_sinhala_template() {
    let agent = AgentRuntime::new(
        Persona::Insurance,
        Box::new(EchoClient { calls: Arc::new(AtomicUsize::new(0)) }),
        None,
    )
    .expect("agent should build");
    let mut session = agent.open_session(5);

    agent.handle_message(&mut session, "රක්ෂණ ආවරණ මොනවාද?").await;

    let system = &session.conversation.turns()[0];
    assert_eq!(system.role, Role::System);
    assert!(system.content.contains("Ceylinco"), "insurance template should be active");
    assert!(system.content.contains("රක්ෂණ"), "sinhala variant should be selected");
}
