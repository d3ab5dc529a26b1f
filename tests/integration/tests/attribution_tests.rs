//! Invite attribution tests
//!
//! Run with: cargo test -p integration-tests --test attribution_tests

use herald_core::{Role, Snowflake};
use herald_service::{Attribution, AttributionEngine, InviteSyncService};
use integration_tests::*;

/// Bot that has already cached `invites` for [`GUILD`], with `B` bound to [`ROLE`]
async fn primed(invites: Vec<herald_core::Invite>) -> TestBot {
    let bot = TestBot::new();
    bot.platform.add_role(GUILD, Role::new(ROLE, "Verified"));
    bot.platform.set_invites(GUILD, invites);
    InviteSyncService::new(&bot.ctx)
        .refresh_guild(GUILD)
        .await
        .unwrap();
    bot.ctx.registry().bind("B", ROLE);
    bot
}

// ============================================================================
// Detection
// ============================================================================

#[tokio::test]
async fn test_grants_bound_role_for_used_invite() {
    let bot = primed(vec![invite("A", 5), invite("B", 2)]).await;
    bot.platform.set_invites(GUILD, vec![invite("A", 5), invite("B", 3)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Attribution::Granted {
            code: "B".to_string(),
            role_id: ROLE,
            role_name: "Verified".to_string(),
        }
    );
    assert_eq!(bot.platform.grants(), vec![(GUILD, MEMBER, ROLE)]);

    let snapshot = bot.ctx.registry().snapshot(GUILD).unwrap();
    assert_eq!(snapshot.find("B").unwrap().uses, 3);

    assert_eq!(
        bot.platform.texts_to(LOG_CHANNEL),
        vec!["Assigned role 'Verified' to <@20> via invite https://discord.gg/B".to_string()]
    );
}

#[tokio::test]
async fn test_unchanged_counts_match_nothing_but_refresh_cache() {
    let bot = primed(vec![invite("A", 5)]).await;
    bot.platform
        .set_invites(GUILD, vec![invite("A", 5), invite("C", 1)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();

    assert_eq!(outcome, Attribution::NoMatch);
    assert!(bot.platform.grants().is_empty());
    assert!(bot.ctx.registry().snapshot(GUILD).unwrap().find("C").is_some());
}

#[tokio::test]
async fn test_repeated_join_is_not_double_counted() {
    let bot = primed(vec![invite("A", 5), invite("B", 2)]).await;
    bot.platform.set_invites(GUILD, vec![invite("A", 5), invite("B", 3)]);

    let engine = AttributionEngine::new(&bot.ctx);
    assert!(engine.on_member_join(GUILD, MEMBER).await.unwrap().is_granted());

    let second = engine
        .on_member_join(GUILD, Snowflake::new(21))
        .await
        .unwrap();
    assert_eq!(second, Attribution::NoMatch);
    assert_eq!(bot.platform.grants().len(), 1);
}

#[tokio::test]
async fn test_first_invite_in_cached_order_wins() {
    let bot = primed(vec![invite("B", 2), invite("A", 5)]).await;
    bot.ctx.registry().bind("A", Snowflake::new(701));
    bot.platform.set_invites(GUILD, vec![invite("A", 6), invite("B", 3)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();

    assert_eq!(outcome.code(), Some("B"));
}

#[tokio::test]
async fn test_fetch_failure_keeps_cached_snapshot() {
    let bot = primed(vec![invite("A", 5), invite("B", 2)]).await;
    bot.platform.fail_fetches(GUILD, true);

    let result = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await;

    assert!(result.is_err());
    let snapshot = bot.ctx.registry().snapshot(GUILD).unwrap();
    assert_eq!(snapshot.find("B").unwrap().uses, 2);

    // The next join still sees the increment against the kept snapshot
    bot.platform.fail_fetches(GUILD, false);
    bot.platform.set_invites(GUILD, vec![invite("A", 5), invite("B", 3)]);
    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();
    assert!(outcome.is_granted());
}

#[tokio::test]
async fn test_unknown_guild_is_tracked_without_match() {
    let bot = TestBot::new();
    bot.platform.set_invites(OTHER_GUILD, vec![invite("A", 1)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(OTHER_GUILD, MEMBER)
        .await
        .unwrap();

    assert_eq!(outcome, Attribution::NoMatch);
    assert!(bot.ctx.registry().is_known(OTHER_GUILD));
    assert_eq!(bot.ctx.registry().snapshot(OTHER_GUILD).unwrap().len(), 1);
}

// ============================================================================
// Binding outcomes
// ============================================================================

#[tokio::test]
async fn test_unbound_invite_grants_nothing() {
    let bot = primed(vec![invite("A", 5), invite("B", 2)]).await;
    bot.platform.set_invites(GUILD, vec![invite("A", 6), invite("B", 2)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Attribution::Unbound {
            code: "A".to_string()
        }
    );
    assert!(bot.platform.grants().is_empty());
    assert!(bot.platform.texts_to(LOG_CHANNEL).is_empty());
}

#[tokio::test]
async fn test_deleted_role_is_reported() {
    let bot = primed(vec![invite("A", 5), invite("B", 2)]).await;
    let gone = Snowflake::new(799);
    bot.ctx.registry().bind("A", gone);
    bot.platform.set_invites(GUILD, vec![invite("A", 6), invite("B", 2)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Attribution::RoleMissing {
            code: "A".to_string(),
            role_id: gone
        }
    );
    assert!(bot.platform.grants().is_empty());
}

#[tokio::test]
async fn test_grant_failure_is_reported_and_not_logged() {
    let bot = primed(vec![invite("B", 2)]).await;
    bot.platform.fail_grants(true);
    bot.platform.set_invites(GUILD, vec![invite("B", 3)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Attribution::GrantFailed {
            code: "B".to_string(),
            role_id: ROLE
        }
    );
    assert!(bot.platform.texts_to(LOG_CHANNEL).is_empty());
    // The snapshot still moved forward
    assert_eq!(bot.ctx.registry().snapshot(GUILD).unwrap().find("B").unwrap().uses, 3);
}

#[tokio::test]
async fn test_log_channel_failure_does_not_undo_grant() {
    let bot = primed(vec![invite("B", 2)]).await;
    bot.platform.fail_channel(LOG_CHANNEL);
    bot.platform.set_invites(GUILD, vec![invite("B", 3)]);

    let outcome = AttributionEngine::new(&bot.ctx)
        .on_member_join(GUILD, MEMBER)
        .await
        .unwrap();

    assert!(outcome.is_granted());
    assert_eq!(bot.platform.grants().len(), 1);
}
