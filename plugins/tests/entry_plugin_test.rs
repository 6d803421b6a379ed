//! Integration tests for [`plugins::EntryPlugin`]: the get/set/unset/get_list commands through the
//! dispatcher, with an in-memory store.

mod common;

use std::sync::Arc;

use chanbot_core::style::cyan;
use common::mock_bot::MockBot;
use common::{Harness, ADMIN};
use handler_chain::Plugin;
use plugins::EntryPlugin;
use storage::EntryStore;

async fn harness(try_autocorrect: bool) -> Harness {
    let bot = Arc::new(MockBot::new("chanbot"));
    let ctx = Harness::context(&bot);
    let store = EntryStore::in_memory(false).await.unwrap();
    let plugin: Arc<dyn Plugin> = Arc::new(EntryPlugin::new(ctx.clone(), store, try_autocorrect));
    Harness::new(bot, ctx, vec![plugin])
}

/// **Test: set then get returns the colored entry.**
#[tokio::test]
async fn test_set_then_get() {
    let h = harness(true).await;

    h.send(ADMIN, "!set faq read the docs").await;
    h.send("alice", "!get FAQ").await;

    assert_eq!(
        h.bot.said(),
        vec!["ok".to_string(), format!("{}read the docs", cyan("[FAQ] "))]
    );
}

/// **Test: set of an existing entry reports the duplicate and keeps the old value.**
#[tokio::test]
async fn test_set_duplicate() {
    let h = harness(true).await;

    h.send(ADMIN, "!set faq one").await;
    h.send(ADMIN, "!set faq two").await;
    h.send("alice", "!get faq").await;

    let said = h.bot.said();
    assert_eq!(said[1], "\"faq\" entry already exists");
    assert!(said[2].ends_with("one"));
}

/// **Test: set and unset are admin only.**
#[tokio::test]
async fn test_set_requires_admin() {
    let h = harness(true).await;

    h.send("mallory", "!set faq spam").await;
    h.send("alice", "!get_list").await;

    assert_eq!(h.bot.said(), vec!["no saved entries"]);
}

/// **Test: set without a message is ignored.**
#[tokio::test]
async fn test_set_without_value_is_noop() {
    let h = harness(true).await;

    h.send(ADMIN, "!set faq   ").await;
    h.send(ADMIN, "!get").await;

    assert!(h.bot.said().is_empty());
}

/// **Test: get_list and get_all list sorted entries.**
#[tokio::test]
async fn test_get_list_sorted() {
    let h = harness(true).await;

    h.send(ADMIN, "!set rules be nice").await;
    h.send(ADMIN, "!set faq read the docs").await;
    h.send("alice", "!get_list").await;
    h.send("alice", "!get_all").await;

    let said = h.bot.said();
    assert_eq!(said[2], "saved entries: faq, rules");
    assert_eq!(said[3], "saved entries: faq, rules");
}

/// **Test: Missing entry suggests a close one; fix then fetches it.**
///
/// **Setup:** Entry "rules" saved.
/// **Action:** `!get rulez`, then `!fix`.
/// **Expected:** did-you-mean reply, then the "rules" entry.
#[tokio::test]
async fn test_miss_suggests_and_fix_fetches() {
    let h = harness(true).await;

    h.send(ADMIN, "!set rules be nice").await;
    h.send("alice", "!get rulez").await;
    h.send("alice", "!fix").await;

    let said = h.bot.said();
    assert_eq!(said[1], "no such entry, did you mean rules?");
    assert_eq!(said[2], format!("{}be nice", cyan("[rules] ")));
}

/// **Test: Without autocorrect a miss is a plain "no such entry".**
#[tokio::test]
async fn test_miss_without_autocorrect() {
    let h = harness(false).await;

    h.send(ADMIN, "!set rules be nice").await;
    h.send("alice", "!get rulez").await;
    h.send("alice", "!fix").await;

    assert_eq!(h.bot.said(), vec!["ok", "no such entry"]);
}

/// **Test: unset removes the entry and always answers ok.**
#[tokio::test]
async fn test_unset() {
    let h = harness(true).await;

    h.send(ADMIN, "!set faq x").await;
    h.send(ADMIN, "!unset faq").await;
    h.send(ADMIN, "!unset faq").await;
    h.send("alice", "!get_list").await;

    assert_eq!(h.bot.said(), vec!["ok", "ok", "ok", "no saved entries"]);
}
