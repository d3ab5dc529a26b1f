//! Announcement scheduling tests
//!
//! Run with: cargo test -p integration-tests --test announcement_tests

use chrono::Duration;
use herald_core::{Clock, DomainError, Embed, ScheduleTime};
use herald_service::{AnnouncementService, BotSettings, ServiceError, SweepReport};
use integration_tests::*;

// ============================================================================
// Immediate
// ============================================================================

#[tokio::test]
async fn test_announce_now_sends_rendered_embed() {
    let bot = TestBot::new();

    let announcement = AnnouncementService::new(&bot.ctx)
        .announce_now(announcement_request(CHANNEL, "Big Event"))
        .await
        .unwrap();
    assert_eq!(announcement.title, "Big Event");

    let sent = bot.platform.sent_to(CHANNEL);
    assert_eq!(sent.len(), 1);
    let embed = &sent[0].embeds[0];
    assert_eq!(embed.title.as_deref(), Some("Big Event"));
    assert_eq!(embed.color, Some(Embed::COLOR_BLUE));
    assert_eq!(embed.image_url.as_deref(), Some("https://example.com/image.jpg"));
    assert_eq!(sent[0].buttons[0].label, "Register");
}

#[tokio::test]
async fn test_announce_outside_announcement_channel_is_rejected() {
    let bot = TestBot::with_settings(BotSettings {
        announcement_channel_id: Some(ANNOUNCE_CHANNEL),
        ..BotSettings::default()
    });

    let err = AnnouncementService::new(&bot.ctx)
        .announce_now(announcement_request(CHANNEL, "Big Event"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ChannelNotAllowed { allowed }) if allowed == ANNOUNCE_CHANNEL
    ));
    assert!(bot.platform.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_button_url_is_rejected() {
    let bot = TestBot::new();
    let mut request = announcement_request(CHANNEL, "Big Event");
    request.button_url = "not a url".to_string();

    let err = AnnouncementService::new(&bot.ctx)
        .announce_now(request)
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Button URL must be a valid URL");
    assert!(bot.platform.sent().is_empty());
}

// ============================================================================
// Scheduling
// ============================================================================

#[tokio::test]
async fn test_schedule_rejects_past_and_present() {
    let bot = TestBot::new();
    let service = AnnouncementService::new(&bot.ctx);

    for time in ["2029-12-31 23:59", "2030-01-01 12:00"] {
        let err = service
            .schedule_announcement(announcement_request(CHANNEL, "Late"), time)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "The scheduled time must be in the future.");
    }
    assert!(bot.ctx.scheduler().is_empty());
}

#[tokio::test]
async fn test_schedule_rejects_bad_format() {
    let bot = TestBot::new();

    let err = AnnouncementService::new(&bot.ctx)
        .schedule_announcement(announcement_request(CHANNEL, "Oops"), "tomorrow at noon")
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Invalid time format. Use 'YYYY-MM-DD HH:MM'.");
}

#[tokio::test]
async fn test_sweep_delivers_exactly_once() {
    let bot = TestBot::new();
    let service = AnnouncementService::new(&bot.ctx);

    let ack = service
        .schedule_announcement(announcement_request(CHANNEL, "Launch"), "2030-01-01 12:05")
        .await
        .unwrap();
    assert!(!ack.replaced);
    assert_eq!(ack.time.to_string(), "2030-01-01 12:05");

    // Not yet due
    bot.clock.advance(Duration::minutes(4));
    let report = service.sweep(bot.clock.now()).await;
    assert_eq!(report, SweepReport::default());
    assert!(bot.platform.sent().is_empty());

    // Due; a sweep a few seconds late still fires
    bot.clock.set(at(2030, 1, 1, 12, 5) + Duration::seconds(30));
    let report = service.sweep(bot.clock.now()).await;
    assert_eq!(report.delivered, 1);
    assert_eq!(bot.platform.sent_to(CHANNEL).len(), 1);

    // Gone afterwards
    let report = service.sweep(bot.clock.now()).await;
    assert_eq!(report.total(), 0);
    assert!(bot.ctx.scheduler().is_empty());
    assert_eq!(bot.platform.sent_to(CHANNEL).len(), 1);
}

#[tokio::test]
async fn test_sweep_catches_up_on_missed_entries() {
    let bot = TestBot::new();
    let service = AnnouncementService::new(&bot.ctx);

    for (time, title) in [("2030-01-01 12:01", "First"), ("2030-01-01 12:02", "Second")] {
        service
            .schedule_announcement(announcement_request(CHANNEL, title), time)
            .await
            .unwrap();
    }

    bot.clock.set(at(2030, 1, 1, 13, 0));
    let report = service.sweep(bot.clock.now()).await;

    assert_eq!(report.delivered, 2);
    let titles: Vec<_> = bot
        .platform
        .sent_to(CHANNEL)
        .into_iter()
        .map(|payload| payload.embeds[0].title.clone().unwrap())
        .collect();
    assert_eq!(titles, vec!["First".to_string(), "Second".to_string()]);
}

#[tokio::test]
async fn test_same_minute_overwrites_previous() {
    let bot = TestBot::new();
    let service = AnnouncementService::new(&bot.ctx);

    service
        .schedule_announcement(announcement_request(CHANNEL, "Old"), "2030-01-02 09:00")
        .await
        .unwrap();
    let ack = service
        .schedule_announcement(announcement_request(CHANNEL, "New"), "2030-01-02 09:00")
        .await
        .unwrap();

    assert!(ack.replaced);
    assert_eq!(bot.ctx.scheduler().len(), 1);
    assert_eq!(bot.ctx.scheduler().get(ack.time).unwrap().title, "New");

    // Only the replacement is ever posted
    bot.clock.set(at(2030, 1, 2, 9, 0));
    let report = service.sweep(bot.clock.now()).await;
    assert_eq!(report.delivered, 1);

    let titles: Vec<_> = bot
        .platform
        .sent_to(CHANNEL)
        .into_iter()
        .map(|payload| payload.embeds[0].title.clone().unwrap())
        .collect();
    assert_eq!(titles, vec!["New".to_string()]);
}

#[tokio::test]
async fn test_cancel_removes_entry() {
    let bot = TestBot::new();
    let service = AnnouncementService::new(&bot.ctx);

    service
        .schedule_announcement(announcement_request(CHANNEL, "Launch"), "2030-01-02 09:00")
        .await
        .unwrap();

    let canceled = service.cancel_announcement(" 2030-01-02 09:00 ").await.unwrap();
    assert_eq!(canceled, ScheduleTime::parse("2030-01-02 09:00").unwrap());
    assert!(bot.ctx.scheduler().is_empty());

    let err = service.cancel_announcement("2030-01-02 09:00").await.unwrap_err();
    assert_eq!(err.user_message(), "No announcement found for the specified time.");

    bot.clock.set(at(2030, 1, 3, 0, 0));
    assert_eq!(service.sweep(bot.clock.now()).await.total(), 0);
    assert!(bot.platform.sent().is_empty());
}

#[tokio::test]
async fn test_failed_delivery_is_dropped() {
    let bot = TestBot::new();
    let service = AnnouncementService::new(&bot.ctx);
    bot.platform.fail_channel(CHANNEL);

    service
        .schedule_announcement(announcement_request(CHANNEL, "Doomed"), "2030-01-01 12:01")
        .await
        .unwrap();
    service
        .schedule_announcement(announcement_request(ANNOUNCE_CHANNEL, "Fine"), "2030-01-01 12:02")
        .await
        .unwrap();

    bot.clock.set(at(2030, 1, 1, 12, 10));
    let report = service.sweep(bot.clock.now()).await;

    assert_eq!(report, SweepReport { delivered: 1, failed: 1 });
    assert!(bot.ctx.scheduler().is_empty());
    assert_eq!(bot.platform.sent_to(ANNOUNCE_CHANNEL).len(), 1);
}
