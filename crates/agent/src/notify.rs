use anyhow::Result;
use async_trait::async_trait;

use frontdesk_core::SlotValues;

/// Inputs that finalize an order. Matching is exact after trimming and
/// ASCII-lowercasing; "yes please" is a question for the model, not a
/// confirmation.
const AFFIRMATIVE_KEYWORDS: [&str; 5] = ["yes", "yeah", "confirm", "proceed", "ok"];

pub fn is_order_confirmation(text: &str) -> bool {
    let normalized = text.trim().to_ascii_lowercase();
    AFFIRMATIVE_KEYWORDS.contains(&normalized.as_str())
}

/// Side-channel notification on order confirmation. The SMTP mailer is the
/// production implementation; tests plug in counters.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn notify_order(&self, slots: &SlotValues) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::is_order_confirmation;

    #[test]
    fn exact_keywords_match_case_insensitively() {
        assert!(is_order_confirmation("Yes"));
        assert!(is_order_confirmation("  CONFIRM  "));
        assert!(is_order_confirmation("proceed"));
        assert!(is_order_confirmation("ok"));
        assert!(is_order_confirmation("Yeah"));
    }

    #[test]
    fn embedded_keywords_do_not_match() {
        assert!(!is_order_confirmation("yes please"));
        assert!(!is_order_confirmation("can you confirm the size?"));
        assert!(!is_order_confirmation(""));
    }
}
