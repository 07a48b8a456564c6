//! Session gate behavior through the `Library` facade.

mod common;

use doclib::config::BackendKind;
use doclib::{Credentials, Library, LibraryError, SessionState};

use common::{pdf_upload, ConfigBuilder, TestHarness};

#[test]
fn test_default_admin_logs_in() {
    let harness = TestHarness::new();
    let library = harness.library(BackendKind::Local);

    assert!(!library.is_authenticated());
    assert!(library.login(&Credentials::new("admin", "pass")).unwrap());
    assert!(library.is_authenticated());
    assert_eq!(library.session().state(), SessionState::Authenticated);
}

#[test]
fn test_rejected_pairs_leave_state_untouched() {
    let rejected = [
        ("admin", "Pass"),
        ("admin", "pass "),
        ("administrator", "pass"),
        ("", "pass"),
        ("admin", ""),
        ("", ""),
    ];

    let harness = TestHarness::new();
    let library = harness.library(BackendKind::Local);
    for (username, password) in rejected {
        assert!(
            !library
                .login(&Credentials::new(username, password))
                .unwrap(),
            "accepted {:?}/{:?}",
            username,
            password
        );
        assert!(!library.is_authenticated());
    }
    let raw = std::fs::read_to_string(&harness.state_path).unwrap_or_default();
    assert!(!raw.contains("dbms-admin-auth"));
}

#[test]
fn test_logout_returns_to_anonymous() {
    let harness = TestHarness::new();
    let library = harness.admin_library(BackendKind::Local);

    library.logout().unwrap();
    assert!(!library.is_authenticated());
    assert_eq!(library.session().state(), SessionState::Anonymous);
}

#[test]
fn test_session_persists_in_state_file() {
    let harness = TestHarness::new();
    {
        let _library = harness.admin_library(BackendKind::Sqlite);
    }

    let reopened = harness.library(BackendKind::Sqlite);
    assert!(reopened.is_authenticated());

    reopened.logout().unwrap();
    assert!(!harness.library(BackendKind::Sqlite).is_authenticated());
}

#[test]
fn test_in_memory_session_does_not_survive() {
    let config = ConfigBuilder::new().build();
    {
        let library = Library::from_config(&config).unwrap();
        assert!(library.login(&Credentials::new("admin", "pass")).unwrap());
    }
    assert!(!Library::from_config(&config).unwrap().is_authenticated());
}

#[test]
fn test_configured_admin_replaces_default() {
    let harness = TestHarness::new();
    let mut config = harness.config(BackendKind::Local);
    config.session.username = Some("curator".to_string());
    config.session.password = Some("vellum".to_string());

    let library = Library::from_config(&config).unwrap();
    assert!(!library.login(&Credentials::new("admin", "pass")).unwrap());
    assert!(library.login(&Credentials::new("curator", "vellum")).unwrap());
}

#[test]
fn test_password_from_file() {
    let harness = TestHarness::new();
    let secret_path = harness.base_path().join("admin_password");
    std::fs::write(&secret_path, "from-a-file\n").unwrap();

    let mut config = harness.config(BackendKind::Local);
    config.session.password_file = Some(secret_path.to_string_lossy().into_owned());

    let library = Library::from_config(&config).unwrap();
    assert!(library
        .login(&Credentials::new("admin", "from-a-file"))
        .unwrap());
}

#[tokio::test]
async fn test_anonymous_reads_allowed_writes_refused() {
    let harness = TestHarness::new();
    let admin = harness.admin_library(BackendKind::Sqlite);
    let record = admin.add(pdf_upload("public.pdf"), "Public").await.unwrap();
    admin.logout().unwrap();

    let visitor = harness.library(BackendKind::Sqlite);
    assert_eq!(visitor.list().await.unwrap().len(), 1);
    assert!(visitor.get_by_id(&record.id).await.unwrap().is_some());
    assert!(visitor.download(&record.id).await.unwrap().is_some());

    assert!(matches!(
        visitor.add(pdf_upload("sneaky.pdf"), "Sneaky").await,
        Err(LibraryError::Unauthorized)
    ));
    assert!(matches!(
        visitor.delete(&record.id).await,
        Err(LibraryError::Unauthorized)
    ));
    assert_eq!(visitor.list().await.unwrap().len(), 1);
}
