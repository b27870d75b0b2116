//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

const SOCKET_WAIT: Duration = Duration::from_secs(5);

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_request_without_session_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/chats").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTH");
}

#[tokio::test]
async fn test_unknown_session_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/api/v1/chats", "no-such-session").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let user = server.seed_user(true).await.unwrap();

    let response = server.get_cookie("/api/v1/chats/unread", &user.token).await.unwrap();
    let unread: Vec<i64> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unread.is_empty());
}

// ============================================================================
// Follow Tests
// ============================================================================

#[tokio::test]
async fn test_follow_public_profile_opens_direct_chat() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let alice = server.seed_user(true).await.unwrap();
    let bob = server.seed_user(true).await.unwrap();

    let response = server
        .post_auth("/api/v1/follows", &alice.token, &FollowUserRequest { user_id: bob.id })
        .await
        .unwrap();
    let follow: StatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(follow.status, "accepted");

    let response = server.get_auth("/api/v1/chats", &bob.token).await.unwrap();
    let chats: Vec<ChatSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(chats.len(), 1);
    assert!(chats[0].full_name.ends_with("User"));

    let response = server
        .get_auth(&format!("/api/v1/users/{}/followers", bob.id), &bob.token)
        .await
        .unwrap();
    let followers: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].user_id, alice.id);
}

#[tokio::test]
async fn test_follow_self_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let alice = server.seed_user(true).await.unwrap();

    let response = server
        .post_auth("/api/v1/follows", &alice.token, &FollowUserRequest { user_id: alice.id })
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_follow_private_profile_then_accept() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let alice = server.seed_user(true).await.unwrap();
    let bob = server.seed_user(false).await.unwrap();

    let response = server
        .post_auth("/api/v1/follows", &alice.token, &FollowUserRequest { user_id: bob.id })
        .await
        .unwrap();
    let follow: StatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(follow.status, "pending");

    let notification_id = server.latest_notification_id(bob.id).await.unwrap();

    // Only the addressee may answer
    let response = server
        .post_auth(
            &format!("/api/v1/notifications/{notification_id}/response"),
            &alice.token,
            &NotificationResponseRequest { accepted: true },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/notifications/{notification_id}/response"),
            &bob.token,
            &NotificationResponseRequest { accepted: true },
        )
        .await
        .unwrap();
    let resolved: NotificationResolved = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(resolved.notification_id, notification_id);
    assert_eq!(resolved.status, "accepted");
    assert!(resolved.chat_id.is_some());

    let response = server
        .get_auth(&format!("/api/v1/follows/{}", bob.id), &alice.token)
        .await
        .unwrap();
    let status: StatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.status, "accepted");
}

#[tokio::test]
async fn test_unfollow_removes_direct_chat() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let alice = server.seed_user(true).await.unwrap();
    let bob = server.seed_user(true).await.unwrap();

    server
        .post_auth("/api/v1/follows", &alice.token, &FollowUserRequest { user_id: bob.id })
        .await
        .unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/follows/{}", bob.id), &alice.token)
        .await
        .unwrap();
    let unfollow: UnfollowResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unfollow.status, "rejected");
    assert!(unfollow.chat_removed);

    let response = server.get_auth("/api/v1/chats", &alice.token).await.unwrap();
    let chats: Vec<ChatSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(chats.is_empty());
}

// ============================================================================
// Group Tests
// ============================================================================

#[tokio::test]
async fn test_create_group_and_accept_invitation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(true).await.unwrap();
    let guest = server.seed_user(true).await.unwrap();

    let request = CreateGroupRequest::inviting(vec![guest.id]);
    let response = server.post_auth("/api/v1/groups", &owner.token, &request).await.unwrap();
    let group: GroupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(group.owner_id, owner.id);
    assert_eq!(group.title, request.title);

    let membership_path = format!("/api/v1/groups/{}/membership", group.group_id);
    let response = server.get_auth(&membership_path, &guest.token).await.unwrap();
    let membership: StatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(membership.status, "invited");

    let notification_id = server.latest_notification_id(guest.id).await.unwrap();
    let response = server
        .post_auth(
            &format!("/api/v1/notifications/{notification_id}/response"),
            &guest.token,
            &NotificationResponseRequest { accepted: true },
        )
        .await
        .unwrap();
    let resolved: NotificationResolved = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(resolved.chat_id.is_some());

    let response = server.get_auth(&membership_path, &guest.token).await.unwrap();
    let membership: StatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(membership.status, "accepted");

    let response = server.get_auth("/api/v1/chats", &guest.token).await.unwrap();
    let chats: Vec<ChatSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(chats.iter().any(|chat| chat.full_name == request.title));
}

#[tokio::test]
async fn test_join_request_reaches_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(true).await.unwrap();
    let visitor = server.seed_user(true).await.unwrap();

    let response = server
        .post_auth("/api/v1/groups", &owner.token, &CreateGroupRequest::unique())
        .await
        .unwrap();
    let group: GroupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(&format!("/api/v1/groups/{}/join", group.group_id), &visitor.token, &())
        .await
        .unwrap();
    let membership: StatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(membership.status, "request");

    let mut socket = server
        .connect_socket("/api/notifications/ws", &owner.token)
        .await
        .unwrap();
    let batch: Vec<NotificationPayload> = socket.recv_json(SOCKET_WAIT).await.unwrap();
    let request = batch
        .iter()
        .find(|n| n.notification_type == "join_group_request")
        .expect("join request notification");
    assert_eq!(request.user_id, owner.id);
    assert_eq!(request.status, "unread");
    socket.close().await.unwrap();
}

#[tokio::test]
async fn test_non_member_cannot_read_group_chat() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(true).await.unwrap();
    let stranger = server.seed_user(true).await.unwrap();

    server
        .post_auth("/api/v1/groups", &owner.token, &CreateGroupRequest::unique())
        .await
        .unwrap();
    let response = server.get_auth("/api/v1/chats", &owner.token).await.unwrap();
    let chats: Vec<ChatSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    let chat_id = chats[0].chat_id;

    let response = server
        .get_auth(&format!("/api/v1/chats/{chat_id}/messages"), &stranger.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Realtime Tests
// ============================================================================

#[tokio::test]
async fn test_socket_without_session_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/chat/ws").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_chat_message_is_broadcast_and_stored() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let alice = server.seed_user(true).await.unwrap();
    let bob = server.seed_user(true).await.unwrap();

    server
        .post_auth("/api/v1/follows", &alice.token, &FollowUserRequest { user_id: bob.id })
        .await
        .unwrap();
    let response = server.get_auth("/api/v1/chats", &alice.token).await.unwrap();
    let chats: Vec<ChatSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    let chat_id = chats[0].chat_id;

    // The first frame for a chat registers the connection as a listener
    let mut bob_socket = server.connect_socket("/api/chat/ws", &bob.token).await.unwrap();
    bob_socket
        .send_json(&ChatFrame {
            chat_id,
            sender_id: bob.id,
            content: "hello".to_string(),
        })
        .await
        .unwrap();
    let echo: serde_json::Value = bob_socket.recv_json(SOCKET_WAIT).await.unwrap();
    assert_eq!(echo["content"], "hello");

    let mut alice_socket = server.connect_socket("/api/chat/ws", &alice.token).await.unwrap();
    alice_socket
        .send_json(&ChatFrame {
            chat_id,
            sender_id: alice.id,
            content: "hi bob".to_string(),
        })
        .await
        .unwrap();
    let received: serde_json::Value = bob_socket.recv_json(SOCKET_WAIT).await.unwrap();
    assert_eq!(received["content"], "hi bob");
    assert_eq!(received["sender_id"], alice.id);

    let response = server
        .get_auth(&format!("/api/v1/chats/{chat_id}/messages"), &alice.token)
        .await
        .unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender_id, alice.id);
    assert_eq!(messages[1].chat_id, chat_id);

    alice_socket.close().await.unwrap();
    bob_socket.close().await.unwrap();
}

#[tokio::test]
async fn test_member_who_left_stops_receiving_group_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let owner = server.seed_user(true).await.unwrap();
    let guest = server.seed_user(true).await.unwrap();

    let request = CreateGroupRequest::inviting(vec![guest.id]);
    let response = server.post_auth("/api/v1/groups", &owner.token, &request).await.unwrap();
    let group: GroupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let notification_id = server.latest_notification_id(guest.id).await.unwrap();
    let response = server
        .post_auth(
            &format!("/api/v1/notifications/{notification_id}/response"),
            &guest.token,
            &NotificationResponseRequest { accepted: true },
        )
        .await
        .unwrap();
    let resolved: NotificationResolved = assert_json(response, StatusCode::OK).await.unwrap();
    let chat_id = resolved.chat_id.expect("group chat");

    let mut guest_socket = server.connect_socket("/api/chat/ws", &guest.token).await.unwrap();
    guest_socket
        .send_json(&ChatFrame {
            chat_id,
            sender_id: guest.id,
            content: "joined".to_string(),
        })
        .await
        .unwrap();
    let _: serde_json::Value = guest_socket.recv_json(SOCKET_WAIT).await.unwrap();

    let mut owner_socket = server.connect_socket("/api/chat/ws", &owner.token).await.unwrap();
    owner_socket
        .send_json(&ChatFrame {
            chat_id,
            sender_id: owner.id,
            content: "welcome".to_string(),
        })
        .await
        .unwrap();
    let _: serde_json::Value = owner_socket.recv_json(SOCKET_WAIT).await.unwrap();
    let received: serde_json::Value = guest_socket.recv_json(SOCKET_WAIT).await.unwrap();
    assert_eq!(received["content"], "welcome");

    let response = server
        .post_auth(
            &format!("/api/v1/groups/{}/leave", group.group_id),
            &guest.token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    owner_socket
        .send_json(&ChatFrame {
            chat_id,
            sender_id: owner.id,
            content: "after you left".to_string(),
        })
        .await
        .unwrap();
    let echo: serde_json::Value = owner_socket.recv_json(SOCKET_WAIT).await.unwrap();
    assert_eq!(echo["content"], "after you left");
    assert!(guest_socket
        .recv_json::<serde_json::Value>(Duration::from_millis(500))
        .await
        .is_err());

    owner_socket.close().await.unwrap();
    guest_socket.close().await.unwrap();
}

#[tokio::test]
async fn test_unread_socket_reports_new_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let alice = server.seed_user(true).await.unwrap();
    let bob = server.seed_user(true).await.unwrap();

    server
        .post_auth("/api/v1/follows", &alice.token, &FollowUserRequest { user_id: bob.id })
        .await
        .unwrap();
    let response = server.get_auth("/api/v1/chats", &alice.token).await.unwrap();
    let chats: Vec<ChatSummary> = assert_json(response, StatusCode::OK).await.unwrap();
    let chat_id = chats[0].chat_id;

    let mut chat_socket = server.connect_socket("/api/chat/ws", &alice.token).await.unwrap();
    chat_socket
        .send_json(&ChatFrame {
            chat_id,
            sender_id: alice.id,
            content: "are you there?".to_string(),
        })
        .await
        .unwrap();
    let _echo: serde_json::Value = chat_socket.recv_json(SOCKET_WAIT).await.unwrap();

    let mut unread_socket = server
        .connect_socket("/api/chat-notifications/ws", &bob.token)
        .await
        .unwrap();
    let unread: Vec<i64> = unread_socket.recv_json(SOCKET_WAIT).await.unwrap();
    assert_eq!(unread, vec![chat_id]);

    // Reading the messages clears the marker
    server
        .get_auth(&format!("/api/v1/chats/{chat_id}/messages"), &bob.token)
        .await
        .unwrap();
    let response = server.get_auth("/api/v1/chats/unread", &bob.token).await.unwrap();
    let unread: Vec<i64> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unread.is_empty());

    chat_socket.close().await.unwrap();
    unread_socket.close().await.unwrap();
}

#[tokio::test]
async fn test_follow_request_answered_over_socket() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let alice = server.seed_user(true).await.unwrap();
    let bob = server.seed_user(false).await.unwrap();

    let mut socket = server
        .connect_socket("/api/notifications/ws", &bob.token)
        .await
        .unwrap();

    server
        .post_auth("/api/v1/follows", &alice.token, &FollowUserRequest { user_id: bob.id })
        .await
        .unwrap();

    let batch: Vec<NotificationPayload> = socket.recv_json(SOCKET_WAIT).await.unwrap();
    let request = batch
        .iter()
        .find(|n| n.notification_type == "follow_request")
        .expect("follow request notification");
    assert_eq!(request.reference_id, alice.id);

    socket
        .send_json(&NotificationFrame::respond(request.notification_id, false))
        .await
        .unwrap();

    let mut status = String::new();
    for _ in 0..20 {
        let response = server
            .get_auth(&format!("/api/v1/follows/{}", bob.id), &alice.token)
            .await
            .unwrap();
        let current: StatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
        status = current.status;
        if status == "rejected" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(status, "rejected");

    socket.close().await.unwrap();
}
