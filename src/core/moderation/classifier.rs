// Message classification - maps one message to at most one violation.
//
// Rules run in a fixed order and the first match wins:
// spam burst, scam link, mass mention, excessive caps.

use super::blocklist::{BlocklistStore, DomainBlocklist};
use super::moderation_models::{InboundMessage, ModerationConfig, ViolationKind};
use super::rate_tracker::RateTracker;

/// Classify a message.
///
/// Always records the message in the rate tracker, even when a later rule
/// would match, because the burst check runs first.
pub async fn classify<S: BlocklistStore>(
    message: &InboundMessage,
    tracker: &RateTracker,
    blocklist: &DomainBlocklist<S>,
    config: &ModerationConfig,
) -> Option<ViolationKind> {
    if tracker.record_and_check(message.author_id, message.received_at) {
        return Some(ViolationKind::Spam);
    }

    if blocklist.contains_scam_link(&message.content).await {
        return Some(ViolationKind::Scam);
    }

    if message.distinct_mentions() > config.max_mentions {
        return Some(ViolationKind::MassMention);
    }

    if let Some(ratio) = caps_ratio(&message.content) {
        if ratio > config.max_caps_ratio {
            return Some(ViolationKind::ExcessiveCaps);
        }
    }

    None
}

/// Uppercase characters over total characters, or `None` for empty text.
pub fn caps_ratio(content: &str) -> Option<f64> {
    let total = content.chars().count();
    if total == 0 {
        return None;
    }

    let upper = content.chars().filter(|c| c.is_uppercase()).count();
    Some(upper as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::moderation::blocklist::BlocklistError;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    struct StaticStore(Vec<String>);

    #[async_trait]
    impl BlocklistStore for StaticStore {
        async fn load(&self) -> Result<Vec<String>, BlocklistError> {
            Ok(self.0.clone())
        }

        async fn save(&self, _domains: &[String]) -> Result<(), BlocklistError> {
            Ok(())
        }
    }

    struct Fixture {
        tracker: RateTracker,
        blocklist: DomainBlocklist<StaticStore>,
        config: ModerationConfig,
    }

    impl Fixture {
        async fn new() -> Self {
            let config = ModerationConfig::default();
            Self {
                tracker: RateTracker::new(config.spam_interval_secs, config.max_messages),
                blocklist: DomainBlocklist::load(StaticStore(vec!["evil.com".into()]))
                    .await
                    .unwrap(),
                config,
            }
        }

        async fn classify(&self, message: &InboundMessage) -> Option<ViolationKind> {
            classify(message, &self.tracker, &self.blocklist, &self.config).await
        }
    }

    fn message(author_id: u64, content: &str, at: DateTime<Utc>) -> InboundMessage {
        InboundMessage {
            message_id: 1,
            channel_id: 2,
            guild_id: 3,
            author_id,
            author_is_bot: false,
            content: content.to_string(),
            mentioned_user_ids: Vec::new(),
            received_at: at,
        }
    }

    #[tokio::test]
    async fn test_normal_message_passes() {
        let fixture = Fixture::new().await;
        let msg = message(1, "Hello world!", Utc::now());
        assert_eq!(fixture.classify(&msg).await, None);
    }

    #[tokio::test]
    async fn test_spam_burst() {
        let fixture = Fixture::new().await;
        let start = Utc::now();

        for i in 0..5 {
            let msg = message(1, "hi", start + Duration::seconds(i));
            assert_eq!(fixture.classify(&msg).await, None);
        }
        let msg = message(1, "hi", start + Duration::seconds(5));
        assert_eq!(fixture.classify(&msg).await, Some(ViolationKind::Spam));
    }

    #[tokio::test]
    async fn test_spam_outranks_scam() {
        let fixture = Fixture::new().await;
        let start = Utc::now();

        for i in 0..5 {
            fixture
                .classify(&message(1, "hi", start + Duration::seconds(i)))
                .await;
        }
        let msg = message(1, "https://evil.com/nitro", start + Duration::seconds(5));
        assert_eq!(fixture.classify(&msg).await, Some(ViolationKind::Spam));
    }

    #[tokio::test]
    async fn test_scam_link() {
        let fixture = Fixture::new().await;
        let msg = message(1, "free nitro at https://www.evil.com/gift", Utc::now());
        assert_eq!(fixture.classify(&msg).await, Some(ViolationKind::Scam));
    }

    #[tokio::test]
    async fn test_scam_outranks_shouting() {
        let fixture = Fixture::new().await;
        let msg = message(1, "CLAIM NOW HTTPS://EVIL.COM", Utc::now());
        assert_eq!(fixture.classify(&msg).await, Some(ViolationKind::Scam));
    }

    #[tokio::test]
    async fn test_mention_boundary() {
        let fixture = Fixture::new().await;

        let mut five = message(1, "hey all", Utc::now());
        five.mentioned_user_ids = vec![10, 11, 12, 13, 14];
        assert_eq!(fixture.classify(&five).await, None);

        let mut six = message(2, "hey all", Utc::now());
        six.mentioned_user_ids = vec![10, 11, 12, 13, 14, 15];
        assert_eq!(fixture.classify(&six).await, Some(ViolationKind::MassMention));
    }

    #[tokio::test]
    async fn test_scam_outranks_mass_mention() {
        let fixture = Fixture::new().await;

        let mut msg = message(1, "look https://evil.com", Utc::now());
        msg.mentioned_user_ids = vec![10, 11, 12, 13, 14, 15];
        assert_eq!(fixture.classify(&msg).await, Some(ViolationKind::Scam));
    }

    #[tokio::test]
    async fn test_mass_mention_outranks_caps() {
        let fixture = Fixture::new().await;

        let mut msg = message(1, "HEY ALL", Utc::now());
        msg.mentioned_user_ids = vec![10, 11, 12, 13, 14, 15];
        assert_eq!(fixture.classify(&msg).await, Some(ViolationKind::MassMention));
    }

    #[tokio::test]
    async fn test_repeated_mentions_count_once() {
        let fixture = Fixture::new().await;

        let mut msg = message(1, "hey", Utc::now());
        msg.mentioned_user_ids = vec![10, 10, 10, 11, 11, 12, 12];
        assert_eq!(fixture.classify(&msg).await, None);
    }

    #[tokio::test]
    async fn test_caps_boundary() {
        let fixture = Fixture::new().await;

        assert_eq!(
            fixture.classify(&message(1, "AAAAa", Utc::now())).await,
            Some(ViolationKind::ExcessiveCaps)
        );
        assert_eq!(fixture.classify(&message(2, "Aaaaa", Utc::now())).await, None);
        assert_eq!(fixture.classify(&message(3, "", Utc::now())).await, None);
    }

    #[test]
    fn test_caps_ratio() {
        assert_eq!(caps_ratio(""), None);
        assert_eq!(caps_ratio("AAAAa"), Some(0.8));
        assert_eq!(caps_ratio("Aaaaa"), Some(0.2));
        // Digits and spaces count toward the total but are not uppercase
        assert_eq!(caps_ratio("OK 12"), Some(0.4));
        // Counted in characters, not bytes
        assert_eq!(caps_ratio("ÉÉé"), Some(2.0 / 3.0));
    }
}
