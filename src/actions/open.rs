//! The `open` action.

use super::Dispatcher;
use crate::http::types::OutboundResponse;

const NOTIFY_ICON: &str = "gnome-user-share";

/// Open `content` with the default handler, then notify the user.
pub(super) async fn handle(dispatcher: &Dispatcher, content: &str) -> OutboundResponse {
    let args = dispatcher.platform.open_command(content);

    if let Err(e) = dispatcher.executor.execute(&args).await {
        tracing::error!(error = %e, content = %content, "Failed to open content");
        return OutboundResponse::failed(format!("Error opening text: {content}"));
    }

    if dispatcher.notify {
        notify(dispatcher, &format!("Opening URL: {content}")).await;
    }

    OutboundResponse::ok(format!("Opened text: {content}"))
}

/// Best-effort desktop notification; failures are only logged.
async fn notify(dispatcher: &Dispatcher, body: &str) {
    let args = notification_command(&dispatcher.app_name, body);
    if let Err(e) = dispatcher.executor.execute(&args).await {
        tracing::warn!(error = %e, "Desktop notification failed");
    }
}

fn notification_command(app_name: &str, body: &str) -> Vec<String> {
    vec![
        "notify-send".to_string(),
        format!("--app-name={app_name}"),
        format!("--icon={NOTIFY_ICON}"),
        app_name.to_string(),
        body.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::actions::tests::RecordingExecutor;
    use crate::actions::Platform;

    fn dispatcher(exec: Arc<RecordingExecutor>) -> Dispatcher {
        Dispatcher::new(exec, "airdrop").with_platform(Platform::Other)
    }

    #[tokio::test]
    async fn success_opens_then_notifies() {
        let exec = Arc::new(RecordingExecutor::default());

        let resp = handle(&dispatcher(exec.clone()), "https://example.com").await;

        assert_eq!(resp, OutboundResponse::ok("Opened text: https://example.com"));
        assert_eq!(
            exec.calls(),
            vec![
                vec!["xdg-open", "https://example.com"],
                vec![
                    "notify-send",
                    "--app-name=airdrop",
                    "--icon=gnome-user-share",
                    "airdrop",
                    "Opening URL: https://example.com",
                ],
            ]
        );
    }

    #[tokio::test]
    async fn open_failure_is_reported_in_band() {
        let exec = Arc::new(RecordingExecutor::failing(&["xdg-open"]));

        let resp = handle(&dispatcher(exec.clone()), "https://example.com").await;

        assert_eq!(
            resp,
            OutboundResponse::failed("Error opening text: https://example.com")
        );
        // No notification after a failed open.
        assert_eq!(exec.calls().len(), 1);
    }

    #[tokio::test]
    async fn notification_failure_keeps_success() {
        let exec = Arc::new(RecordingExecutor::failing(&["notify-send"]));

        let resp = handle(&dispatcher(exec.clone()), "https://example.com").await;

        assert!(resp.success);
        assert_eq!(exec.calls().len(), 2);
    }

    #[tokio::test]
    async fn notifications_can_be_disabled() {
        let exec = Arc::new(RecordingExecutor::default());
        let dispatcher = dispatcher(exec.clone()).with_notifications(false);

        let resp = handle(&dispatcher, "notes.txt").await;

        assert!(resp.success);
        assert_eq!(exec.calls(), vec![vec!["xdg-open", "notes.txt"]]);
    }
}
