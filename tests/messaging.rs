//! End-to-end messaging through the public API, with a registry on disk
//! and an in-process platform.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use moltmsg::platform::Result as PlatformResult;
use moltmsg::{
    DispatchError, FeedPost, FileRegistry, Identity, Messenger, Platform, PlatformError,
};

const REGISTRY: &str =
    r#"{"agents":[{"id":"abc123","name":"Nova","postId":"p9","capabilities":["research"]}]}"#;

struct RecordingPlatform {
    success: bool,
    comments: Mutex<Vec<(String, String)>>,
}

impl RecordingPlatform {
    fn new(success: bool) -> Self {
        Self {
            success,
            comments: Mutex::new(Vec::new()),
        }
    }

    fn comments(&self) -> Vec<(String, String)> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn status(&self) -> PlatformResult<Identity> {
        Ok(Identity::new("Rex"))
    }

    async fn feed(&self) -> PlatformResult<Vec<FeedPost>> {
        Ok(Vec::new())
    }

    async fn comment(&self, post_id: &str, text: &str) -> PlatformResult<()> {
        self.comments
            .lock()
            .unwrap()
            .push((post_id.to_string(), text.to_string()));
        if self.success {
            Ok(())
        } else {
            Err(PlatformError::Rejected(r#"{"success": false}"#.to_string()))
        }
    }
}

fn messenger(platform: Arc<RecordingPlatform>) -> (Messenger, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.json");
    std::fs::write(&path, REGISTRY).unwrap();
    (Messenger::new(Arc::new(FileRegistry::new(path)), platform), dir)
}

#[tokio::test]
async fn send_comments_on_mailbox_post() {
    let platform = Arc::new(RecordingPlatform::new(true));
    let (messenger, _dir) = messenger(platform.clone());

    let sent = messenger.send("nova", "status?").await.unwrap();

    assert_eq!(sent.post_id, "p9");
    assert_eq!(
        platform.comments(),
        vec![("p9".to_string(), "@Nova status?".to_string())]
    );
}

#[tokio::test]
async fn send_fails_when_platform_reports_failure() {
    let platform = Arc::new(RecordingPlatform::new(false));
    let (messenger, _dir) = messenger(platform.clone());

    let result = messenger.send("nova", "status?").await;

    assert!(matches!(result, Err(DispatchError::Platform(_))));
    assert_eq!(platform.comments().len(), 1);
}

#[tokio::test]
async fn send_to_unknown_agent_never_comments() {
    let platform = Arc::new(RecordingPlatform::new(true));
    let (messenger, _dir) = messenger(platform.clone());

    let result = messenger.send("missing-agent", "hi").await;

    match result {
        Err(DispatchError::AgentNotFound { known, .. }) => assert_eq!(known, vec!["Nova"]),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(platform.comments().is_empty());
}

#[tokio::test]
async fn malformed_registry_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.json");
    std::fs::write(&path, "{\"agents\": [").unwrap();
    let platform = Arc::new(RecordingPlatform::new(true));
    let messenger = Messenger::new(Arc::new(FileRegistry::new(path)), platform.clone());

    assert!(matches!(
        messenger.send("nova", "hi").await,
        Err(DispatchError::Registry(_))
    ));
    assert!(messenger.list_agents(None).is_err());
    assert!(platform.comments().is_empty());
}

#[tokio::test]
async fn list_filters_by_capability() {
    let (messenger, _dir) = messenger(Arc::new(RecordingPlatform::new(true)));

    assert_eq!(messenger.list_agents(Some("research")).unwrap().len(), 1);
    assert!(messenger.list_agents(Some("coding")).unwrap().is_empty());
    assert_eq!(messenger.list_agents(None).unwrap()[0].name, "Nova");
}
