use anyhow::Result;
use dev_directory::app::shell::run_shell;
use dev_directory::domain::model::FormField;
use dev_directory::{
    AddOutcome, DeveloperDraft, DirectoryController, FetchState, HttpDirectoryStore, Role,
    RoleFilter,
};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn listing() -> serde_json::Value {
    json!({
        "success": true,
        "data": [
            {"_id": "1", "name": "Ada", "role": "Backend", "techStack": ["Go"], "experience": 3},
            {"_id": "2", "name": "Bo", "role": "Frontend", "techStack": ["React"], "experience": 1},
            {"_id": "3", "name": "Cyd", "role": "Full-Stack", "techStack": ["React", "Node.js"], "experience": 4.5}
        ]
    })
}

fn store_for(server: &MockServer) -> HttpDirectoryStore {
    HttpDirectoryStore::with_timeout(&server.base_url(), Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_mount_and_filter_against_http_store() -> Result<()> {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/developers");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(listing());
        })
        .await;

    let mut controller = DirectoryController::new(store_for(&server));
    controller.mount().await;
    list_mock.assert_async().await;

    assert_eq!(controller.fetch_state(), &FetchState::Idle);
    assert_eq!(controller.visible().len(), 3);

    controller.set_role_filter(RoleFilter::Only(Role::Backend));
    let names: Vec<&str> = controller.visible().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Ada"]);

    controller.set_role_filter(RoleFilter::All);
    controller.set_search_term("REACT");
    let names: Vec<&str> = controller.visible().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Bo", "Cyd"]);

    // 篩選只在本地計算，不會再次呼叫 API
    list_mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_add_developer_refetches_collection() -> Result<()> {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/developers");
            then.status(200).json_body(listing());
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/developers").json_body(json!({
                "name": "Dee",
                "role": "Backend",
                "techStack": "Rust, Postgres",
                "experience": 2.5
            }));
            then.status(201).json_body(json!({
                "success": true,
                "data": {"_id": "4", "name": "Dee", "role": "Backend", "techStack": ["Rust", "Postgres"], "experience": 2.5}
            }));
        })
        .await;

    let mut controller = DirectoryController::new(store_for(&server));
    controller.mount().await;

    let draft = DeveloperDraft {
        name: "  Dee ".to_string(),
        role: Role::Backend,
        tech_stack: "Rust,  Postgres".to_string(),
        experience: "2.5".to_string(),
    };
    let outcome = controller.add_developer(&draft).await;

    create_mock.assert_async().await;
    list_mock.assert_hits_async(2).await;
    match outcome {
        AddOutcome::Added(Some(created)) => assert_eq!(created.id.as_str(), "4"),
        other => panic!("expected Added, got {:?}", other),
    }
    let notes = controller.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Developer added successfully!");
    Ok(())
}

#[tokio::test]
async fn test_rejected_add_keeps_form_and_list() -> Result<()> {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/developers");
            then.status(200).json_body(listing());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/developers");
            then.status(400)
                .json_body(json!({"success": false, "message": "Developer already exists"}));
        })
        .await;

    let mut controller = DirectoryController::new(store_for(&server));
    controller.mount().await;
    tokio_test::assert_ok!(controller.set_form_field(FormField::Name, "Ada"));
    tokio_test::assert_ok!(controller.set_form_field(FormField::Role, "Backend"));
    tokio_test::assert_ok!(controller.set_form_field(FormField::TechStack, "Go"));
    tokio_test::assert_ok!(controller.set_form_field(FormField::Experience, "3"));
    let form_before = controller.form().clone();

    let outcome = controller.submit_form().await;

    assert_eq!(
        outcome,
        AddOutcome::Rejected("Developer already exists".to_string())
    );
    assert_eq!(controller.form(), &form_before);
    assert_eq!(controller.developers().len(), 3);
    list_mock.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test]
async fn test_confirmed_add_with_unreadable_record_refetches() -> Result<()> {
    let server = MockServer::start_async().await;
    let list_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/developers");
            then.status(200).json_body(listing());
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/developers");
            then.status(201).json_body(json!({
                "success": true,
                "data": {"_id": "4", "name": "Dee", "role": "Backend", "techStack": "Rust", "experience": "3"}
            }));
        })
        .await;

    let mut controller = DirectoryController::new(store_for(&server));
    tokio_test::assert_ok!(controller.set_form_field(FormField::Name, "Dee"));
    tokio_test::assert_ok!(controller.set_form_field(FormField::Role, "Backend"));
    tokio_test::assert_ok!(controller.set_form_field(FormField::TechStack, "Rust"));
    tokio_test::assert_ok!(controller.set_form_field(FormField::Experience, "3"));

    let outcome = controller.submit_form().await;

    assert_eq!(outcome, AddOutcome::Added(None));
    create_mock.assert_hits_async(1).await;
    list_mock.assert_hits_async(1).await;
    assert_eq!(controller.developers().len(), 3);
    assert_eq!(controller.form(), &DeveloperDraft::default());
    let notes = controller.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Developer added successfully!");
    Ok(())
}

#[tokio::test]
async fn test_invalid_form_never_reaches_server() -> Result<()> {
    let server = MockServer::start_async().await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/developers");
            then.status(201);
        })
        .await;

    let mut controller = DirectoryController::new(store_for(&server));
    let draft = DeveloperDraft {
        name: "A".to_string(),
        role: Role::Frontend,
        tech_stack: "React".to_string(),
        experience: "-1".to_string(),
    };
    let outcome = controller.add_developer(&draft).await;

    match outcome {
        AddOutcome::Invalid(errors) => {
            assert_eq!(
                errors.get(FormField::Name),
                Some("Name must be at least 2 characters")
            );
            assert_eq!(
                errors.get(FormField::Experience),
                Some("Experience must be a non-negative number")
            );
        }
        other => panic!("expected Invalid, got {:?}", other),
    }
    create_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_collection() -> Result<()> {
    let server = MockServer::start_async().await;
    let ok_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/developers");
            then.status(200).json_body(listing());
        })
        .await;

    let mut controller = DirectoryController::new(store_for(&server));
    controller.mount().await;
    assert_eq!(controller.developers().len(), 3);

    ok_mock.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/developers");
            then.status(500).json_body(json!({"message": "database offline"}));
        })
        .await;

    controller.refresh().await;

    assert!(matches!(controller.fetch_state(), FetchState::Error(_)));
    assert_eq!(controller.developers().len(), 3);
    assert_eq!(controller.visible().len(), 3);
    assert_eq!(
        controller.take_notifications()[0].message,
        "Failed to fetch developers"
    );
    Ok(())
}

#[tokio::test]
async fn test_shell_session() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/developers");
            then.status(200).json_body(listing());
        })
        .await;
    let create_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/developers");
            then.status(201).json_body(json!({
                "success": true,
                "data": {"_id": "9", "name": "Eve", "role": "Frontend", "techStack": ["Vue"], "experience": 0}
            }));
        })
        .await;

    let script = b"search react\n\
role frontend\n\
set name E\n\
submit\n\
set name Eve\n\
set tech Vue\n\
set experience 0\n\
submit\n\
quit\n";
    let mut output: Vec<u8> = Vec::new();
    let mut controller = DirectoryController::new(store_for(&server));

    run_shell(&mut controller, &script[..], &mut output).await?;
    let text = String::from_utf8(output)?;

    assert!(text.contains("Developers (3)"));
    assert!(text.contains("Developers (2)"));
    assert!(text.contains("Filter: role=Frontend search=\"react\""));
    assert!(text.contains("! Name must be at least 2 characters"));
    assert!(text.contains("✅ Developer added successfully!"));
    create_mock.assert_hits_async(1).await;
    // 成功送出後表單重設
    assert_eq!(controller.form(), &DeveloperDraft::default());
    Ok(())
}
