//! Integration tests for [`plugins::WordsBlacklistPlugin`]: ban/unban commands and the kick filter.

mod common;

use std::sync::Arc;

use common::mock_bot::{MockBot, Sent};
use common::{Harness, ADMIN, CHANNEL};
use handler_chain::Plugin;
use plugins::{WordsBlacklistPlugin, KICK_REASON};

fn harness(bot_is_op: bool) -> (Harness, Arc<WordsBlacklistPlugin>) {
    let bot = Arc::new(MockBot::new("chanbot"));
    if bot_is_op {
        bot.set_op("chanbot");
    }
    let ctx = Harness::context(&bot);
    let plugin = Arc::new(WordsBlacklistPlugin::new(ctx.clone()));
    let as_plugin: Arc<dyn Plugin> = plugin.clone();
    (Harness::new(bot, ctx, vec![as_plugin]), plugin)
}

fn kicks(bot: &MockBot) -> Vec<Sent> {
    bot.sent()
        .into_iter()
        .filter(|s| matches!(s, Sent::Kick { .. }))
        .collect()
}

/// **Test: A banned word gets its sender kicked once.**
///
/// **Setup:** Bot is op; `darn` and `d[a4]rn` banned.
/// **Action:** alice says a message matching both patterns.
/// **Expected:** Exactly one kick of alice with the fixed reason.
#[tokio::test]
async fn test_banned_word_kicks_once() {
    let (h, _plugin) = harness(true);

    h.send(ADMIN, "!ban_word darn d[a4]rn").await;
    h.send("alice", "oh darn").await;

    assert_eq!(h.bot.said(), vec!["[darn, d[a4]rn] banned"]);
    assert_eq!(
        kicks(&h.bot),
        vec![Sent::Kick {
            channel: CHANNEL.to_string(),
            nick: "alice".to_string(),
            reason: KICK_REASON.to_string(),
        }]
    );
}

/// **Test: Without operator privileges the bot warns at ban time and never kicks.**
#[tokio::test]
async fn test_not_op_cannot_kick() {
    let (h, _plugin) = harness(false);

    h.send(ADMIN, "!ban_word darn").await;
    h.send("alice", "darn").await;

    assert_eq!(
        h.bot.said(),
        vec!["[darn] banned, but I need operator privileges to kick ;("]
    );
    assert!(kicks(&h.bot).is_empty());
}

/// **Test: Channel operators are exempt.**
#[tokio::test]
async fn test_op_sender_exempt() {
    let (h, _plugin) = harness(true);
    h.bot.set_op("bob");

    h.send(ADMIN, "!ban_word darn").await;
    h.send("bob", "darn").await;

    assert!(kicks(&h.bot).is_empty());
}

/// **Test: unban_word removes only banned words; nothing to unban is silent.**
#[tokio::test]
async fn test_unban_word() {
    let (h, plugin) = harness(true);
    // the unban command itself contains a banned word
    h.bot.set_op(ADMIN);

    h.send(ADMIN, "!ban_word darn heck").await;
    h.send(ADMIN, "!unban_word darn gosh").await;
    h.send(ADMIN, "!unban_word gosh").await;
    h.send("alice", "darn").await;

    assert_eq!(plugin.banned(), vec!["heck"]);
    assert_eq!(h.bot.said(), vec!["[darn, heck] banned", "[darn] unbanned"]);
    assert!(kicks(&h.bot).is_empty());
}

/// **Test: An invalid pattern is reported and skipped; valid ones are still banned.**
#[tokio::test]
async fn test_invalid_pattern_skipped() {
    let (h, plugin) = harness(true);

    h.send(ADMIN, "!ban_word ( heck").await;

    assert_eq!(plugin.banned(), vec!["heck"]);
    assert_eq!(h.bot.said(), vec!["invalid pattern: (", "[heck] banned"]);
}

/// **Test: Non-admins cannot ban words.**
#[tokio::test]
async fn test_ban_requires_admin() {
    let (h, plugin) = harness(true);

    h.send("mallory", "!ban_word hello").await;

    assert!(plugin.banned().is_empty());
    assert!(h.bot.said().is_empty());
}

/// **Test: unload clears the blacklist.**
#[tokio::test]
async fn test_unload_clears_blacklist() {
    let (mut h, plugin) = harness(true);

    h.send(ADMIN, "!ban_word darn").await;
    h.host.unload_all().await;

    assert!(plugin.banned().is_empty());
}
