use skinshop_backend::entities::order::OrderSubmission;
use skinshop_backend::entities::upload::StoredUpload;
use skinshop_backend::errors::OrderError;
use skinshop_backend::gateways::chat::{
    CreatedChannel, Mention, MockChatPlatform, PlatformError, PlatformGuild, PlatformUser,
};
use skinshop_backend::settings::AppConfig;
use skinshop_backend::use_cases::order::{ticket_channel_name, OrderHandler};
use uuid::Uuid;

const GUILD_ID: &str = "999000";
const CATEGORY_ID: &str = "555";
const CUSTOMER_ID: &str = "123456789012345678";

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.discord_bot_token = "test-token".to_string();
    config.discord_guild_id = GUILD_ID.to_string();
    config.discord_category_id = CATEGORY_ID.to_string();
    config
}

fn bot() -> PlatformUser {
    PlatformUser {
        id: "42".to_string(),
        username: "skinshop-bot".to_string(),
    }
}

fn guild() -> PlatformGuild {
    PlatformGuild {
        id: GUILD_ID.to_string(),
        name: "Skinshop".to_string(),
    }
}

fn customer() -> PlatformUser {
    PlatformUser {
        id: CUSTOMER_ID.to_string(),
        username: "somchai_mc".to_string(),
    }
}

fn submission(name: &str, discord_id: &str) -> OrderSubmission {
    OrderSubmission {
        name: name.to_string(),
        discord_id: discord_id.to_string(),
        scale: "512".to_string(),
        part: "body".to_string(),
        price: "70".to_string(),
        payment_method: "bank".to_string(),
    }
}

/// Real files on disk, so the cleanup step has something to delete.
fn stored_uploads(count: usize) -> Vec<StoredUpload> {
    let dir = std::env::temp_dir().join(format!("skinshop-test-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");

    (0..count)
        .map(|i| {
            let path = dir.join(format!("upload-{i}"));
            std::fs::write(&path, b"image bytes").expect("write temp file");
            StoredUpload {
                path,
                file_name: format!("ref-{i}.png"),
                mime_type: Some("image/png".to_string()),
            }
        })
        .collect()
}

fn ready_platform() -> MockChatPlatform {
    let mut platform = MockChatPlatform::new();
    platform.expect_identity().return_const(Some(bot()));
    platform
}

#[actix_rt::test]
async fn resolved_handle_gets_mention_and_permission_grant() {
    let mut platform = ready_platform();
    platform
        .expect_fetch_guild()
        .withf(|id| id == GUILD_ID)
        .returning(|_| Ok(guild()));
    platform
        .expect_fetch_user()
        .withf(|id| id == CUSTOMER_ID)
        .returning(|_| Ok(Some(customer())));
    platform
        .expect_create_ticket_channel()
        .withf(|_, spec| {
            spec.name == "ticket-somchai-website"
                && spec.parent_id == CATEGORY_ID
                && spec.customer_id.as_deref() == Some(CUSTOMER_ID)
        })
        .returning(|_, _| {
            Ok(CreatedChannel {
                id: "888".to_string(),
                name: "ticket-somchai-website".to_string(),
            })
        });
    platform
        .expect_send_order_summary()
        .withf(|channel, mention, summary, attachments| {
            channel.id == "888"
                && *mention == Mention::User(CUSTOMER_ID.to_string())
                && summary.customer_name == "Somchai"
                && summary.customer_display == "somchai_mc"
                && summary.price == "70"
                && summary.payment_method == "bank"
                && summary.service == "512"
                && summary.part == "body"
                && attachments.len() == 3
        })
        .returning(|_, _, _, _| Ok(()));

    let handler = OrderHandler::new(platform, &test_config());
    let uploads = stored_uploads(3);
    let paths: Vec<_> = uploads.iter().map(|u| u.path.clone()).collect();

    let ticket = handler
        .place_order(submission("Somchai", CUSTOMER_ID), uploads)
        .await
        .expect("order should succeed");

    assert_eq!(ticket.channel_id, "888");
    for path in paths {
        assert!(!path.exists(), "temp upload should have been deleted");
    }
}

#[actix_rt::test]
async fn opaque_tag_degrades_to_generic_mention() {
    let mut platform = ready_platform();
    platform.expect_fetch_guild().returning(|_| Ok(guild()));
    // Non-numeric handles never hit the user lookup.
    platform.expect_fetch_user().never();
    platform
        .expect_create_ticket_channel()
        .withf(|_, spec| spec.customer_id.is_none())
        .returning(|_, _| {
            Ok(CreatedChannel {
                id: "888".to_string(),
                name: "ticket-somchai-website".to_string(),
            })
        });
    platform
        .expect_send_order_summary()
        .withf(|_, mention, summary, _| {
            *mention == Mention::Here && summary.customer_display == "friendtag#0001"
        })
        .returning(|_, _, _, _| Ok(()));

    let handler = OrderHandler::new(platform, &test_config());
    let ticket = handler
        .place_order(submission("Somchai", "friendtag#0001"), stored_uploads(1))
        .await
        .expect("opaque tags must not fail the request");

    assert_eq!(ticket.channel_id, "888");
}

#[actix_rt::test]
async fn unresolvable_numeric_handle_still_succeeds() {
    let mut platform = ready_platform();
    platform.expect_fetch_guild().returning(|_| Ok(guild()));
    platform.expect_fetch_user().returning(|_| Ok(None));
    platform
        .expect_create_ticket_channel()
        .withf(|_, spec| spec.customer_id.is_none())
        .returning(|_, _| {
            Ok(CreatedChannel {
                id: "888".to_string(),
                name: "ticket-somchai-website".to_string(),
            })
        });
    platform
        .expect_send_order_summary()
        .withf(|_, mention, summary, _| {
            *mention == Mention::Here && summary.customer_display == CUSTOMER_ID
        })
        .returning(|_, _, _, _| Ok(()));

    let handler = OrderHandler::new(platform, &test_config());
    handler
        .place_order(submission("Somchai", CUSTOMER_ID), stored_uploads(1))
        .await
        .expect("a lookup miss must not fail the request");
}

#[actix_rt::test]
async fn user_lookup_error_is_swallowed() {
    let mut platform = ready_platform();
    platform.expect_fetch_guild().returning(|_| Ok(guild()));
    platform.expect_fetch_user().returning(|_| {
        Err(PlatformError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        })
    });
    platform
        .expect_create_ticket_channel()
        .withf(|_, spec| spec.customer_id.is_none())
        .returning(|_, _| {
            Ok(CreatedChannel {
                id: "888".to_string(),
                name: "ticket-somchai-website".to_string(),
            })
        });
    platform
        .expect_send_order_summary()
        .withf(|_, mention, _, _| *mention == Mention::Here)
        .returning(|_, _, _, _| Ok(()));

    let handler = OrderHandler::new(platform, &test_config());
    handler
        .place_order(submission("Somchai", CUSTOMER_ID), stored_uploads(1))
        .await
        .expect("a lookup failure must not fail the request");
}

#[actix_rt::test]
async fn channel_creation_failure_is_fatal_but_still_cleans_up() {
    let mut platform = ready_platform();
    platform.expect_fetch_guild().returning(|_| Ok(guild()));
    platform.expect_fetch_user().returning(|_| Ok(Some(customer())));
    platform.expect_create_ticket_channel().returning(|_, _| {
        Err(PlatformError::Api {
            status: 403,
            message: "Missing Permissions".to_string(),
        })
    });
    platform.expect_send_order_summary().never();

    let handler = OrderHandler::new(platform, &test_config());
    let uploads = stored_uploads(2);
    let paths: Vec<_> = uploads.iter().map(|u| u.path.clone()).collect();

    let err = handler
        .place_order(submission("Somchai", CUSTOMER_ID), uploads)
        .await
        .expect_err("channel creation failure is fatal");

    assert!(matches!(err, OrderError::PlatformOperation(_)));
    for path in paths {
        assert!(!path.exists(), "temp uploads must be deleted on failure too");
    }
}

#[actix_rt::test]
async fn send_failure_is_fatal_and_channel_is_not_rolled_back() {
    let mut platform = ready_platform();
    platform.expect_fetch_guild().returning(|_| Ok(guild()));
    platform.expect_fetch_user().returning(|_| Ok(Some(customer())));
    platform
        .expect_create_ticket_channel()
        .times(1)
        .returning(|_, _| {
            Ok(CreatedChannel {
                id: "888".to_string(),
                name: "ticket-somchai-website".to_string(),
            })
        });
    platform.expect_send_order_summary().returning(|_, _, _, _| {
        Err(PlatformError::Network("connection reset".to_string()))
    });

    let handler = OrderHandler::new(platform, &test_config());
    let uploads = stored_uploads(1);
    let paths: Vec<_> = uploads.iter().map(|u| u.path.clone()).collect();

    let err = handler
        .place_order(submission("Somchai", CUSTOMER_ID), uploads)
        .await
        .expect_err("send failure is fatal");

    assert!(matches!(err, OrderError::PlatformOperation(_)));
    for path in paths {
        assert!(!path.exists());
    }
}

#[actix_rt::test]
async fn missing_configuration_rejects_before_any_platform_call() {
    let mut platform = MockChatPlatform::new();
    platform.expect_identity().never();
    platform.expect_fetch_guild().never();
    platform.expect_create_ticket_channel().never();

    let mut config = test_config();
    config.discord_bot_token = String::new();

    let handler = OrderHandler::new(platform, &config);
    let uploads = stored_uploads(1);
    let paths: Vec<_> = uploads.iter().map(|u| u.path.clone()).collect();

    let err = handler
        .place_order(submission("Somchai", CUSTOMER_ID), uploads)
        .await
        .expect_err("missing credentials must reject");

    assert!(matches!(err, OrderError::MissingConfiguration));
    assert_eq!(err.to_string(), "Missing Discord Configuration");
    for path in paths {
        assert!(!path.exists());
    }
}

#[actix_rt::test]
async fn orders_fail_fast_until_the_platform_is_ready() {
    let mut platform = MockChatPlatform::new();
    platform.expect_identity().return_const(None::<PlatformUser>);
    platform.expect_fetch_guild().never();

    let handler = OrderHandler::new(platform, &test_config());
    let err = handler
        .place_order(submission("Somchai", CUSTOMER_ID), stored_uploads(1))
        .await
        .expect_err("not-ready platform must reject");

    assert!(matches!(err, OrderError::PlatformNotReady));
}

#[test]
fn channel_names_are_sanitized_and_prefixed() {
    assert_eq!(ticket_channel_name("Somchai"), "ticket-somchai-website");
    assert_eq!(ticket_channel_name(""), "ticket-unknown-website");
    assert_eq!(ticket_channel_name("A B!c"), "ticket-a-b-c-website");
    // Thai script is allow-listed and survives untouched.
    assert_eq!(
        ticket_channel_name("สมชาย ใจดี"),
        "ticket-สมชาย-ใจดี-website"
    );
}
