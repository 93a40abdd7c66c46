//! Comparison set commands: add, remove, clear, show.

use anyhow::anyhow;
use juxta_core::{CompareAction, CompareDeltaRequest, CompareSnapshot, SyncResult, codec};
use tracing::debug;

use crate::client::{AppContext, CliError, CliResult, Reply, classify_problem, issued_session};

/// Id lists supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DeltaIds {
    pub(crate) contexts: Option<String>,
    pub(crate) models: Option<String>,
}

impl DeltaIds {
    /// Decode the comma-joined lists into a request body.
    pub(crate) fn into_request(self) -> CliResult<CompareDeltaRequest> {
        let request = CompareDeltaRequest {
            contexts: self.contexts.as_deref().map(codec::split).unwrap_or_default(),
            models: self.models.as_deref().map(codec::split).unwrap_or_default(),
        };
        if request.contexts.is_empty() && request.models.is_empty() {
            return Err(CliError::validation(
                "at least one id is required (pass --contexts and/or --models)",
            ));
        }
        Ok(request)
    }
}

pub(crate) async fn handle_delta(
    ctx: &AppContext,
    action: CompareAction,
    ids: DeltaIds,
) -> CliResult<Reply<SyncResult>> {
    let request = ids.into_request()?;
    let path = action.update_path();
    let url = ctx.endpoint(&path)?;
    debug!(%action, contexts = request.contexts.len(), models = request.models.len(), "sending delta");

    let response = ctx
        .with_session(ctx.client.post(url))
        .json(&request)
        .send()
        .await
        .map_err(|err| CliError::failure(anyhow!("request to {path} failed: {err}")))?;
    if !response.status().is_success() {
        return Err(classify_problem(response).await);
    }

    let issued = issued_session(&response);
    let body = response
        .text()
        .await
        .map_err(|err| CliError::failure(anyhow!("failed to read {path} response: {err}")))?;
    let counts = SyncResult::from_body(&body)
        .map_err(|err| CliError::failure(anyhow!("malformed {path} response: {err}")))?;
    Ok(Reply {
        value: counts,
        issued_session: issued,
    })
}

pub(crate) async fn handle_clear(ctx: &AppContext) -> CliResult<Reply<()>> {
    let url = ctx.endpoint("/comparison/clear")?;
    let response = ctx
        .with_session(ctx.client.post(url))
        .send()
        .await
        .map_err(|err| CliError::failure(anyhow!("request to /comparison/clear failed: {err}")))?;
    let status = response.status();
    if !(status.is_success() || status.is_redirection()) {
        return Err(classify_problem(response).await);
    }
    Ok(Reply {
        value: (),
        issued_session: issued_session(&response),
    })
}

pub(crate) async fn handle_show(ctx: &AppContext) -> CliResult<Reply<CompareSnapshot>> {
    let url = ctx.endpoint("/comparison/snapshot.json")?;
    let response = ctx
        .with_session(ctx.client.get(url))
        .send()
        .await
        .map_err(|err| {
            CliError::failure(anyhow!("request to /comparison/snapshot.json failed: {err}"))
        })?;
    if !response.status().is_success() {
        return Err(classify_problem(response).await);
    }
    let issued = issued_session(&response);
    let snapshot = response
        .json::<CompareSnapshot>()
        .await
        .map_err(|err| CliError::failure(anyhow!("malformed snapshot response: {err}")))?;
    Ok(Reply {
        value: snapshot,
        issued_session: issued,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{SESSION_COOKIE, build_client};
    use httpmock::prelude::*;
    use serde_json::json;
    use uuid::Uuid;

    fn context(server: &MockServer, session: Option<Uuid>) -> AppContext {
        AppContext {
            client: build_client(5, "trace").expect("client"),
            base_url: server.base_url().parse().expect("valid URL"),
            session,
        }
    }

    fn ids(contexts: Option<&str>, models: Option<&str>) -> DeltaIds {
        DeltaIds {
            contexts: contexts.map(str::to_string),
            models: models.map(str::to_string),
        }
    }

    #[test]
    fn empty_delta_is_a_validation_error() {
        let err = ids(None, Some(",,")).into_request().expect_err("empty");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn add_posts_delta_with_session_cookie() {
        let server = MockServer::start_async().await;
        let session = Uuid::new_v4();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/comparison/update/add.json")
                .header("cookie", format!("{SESSION_COOKIE}={session}"))
                .json_body(json!({"contexts": ["c1", "c2"], "models": ["m1"]}));
            then.status(200)
                .json_body(json!({"contextCount": 2, "modelCount": 1}));
        });

        let reply = handle_delta(
            &context(&server, Some(session)),
            CompareAction::Add,
            ids(Some("c1,c2"), Some("m1")),
        )
        .await
        .expect("add should succeed");
        mock.assert();
        assert_eq!(reply.value.total(), 3);
        assert_eq!(reply.issued_session, None);
    }

    #[tokio::test]
    async fn first_call_reports_issued_session() {
        let server = MockServer::start_async().await;
        let issued = Uuid::new_v4();
        server.mock(|when, then| {
            when.method(POST).path("/comparison/update/remove.json");
            then.status(200)
                .header("set-cookie", format!("{SESSION_COOKIE}={issued}; Path=/"))
                .json_body(json!({"contextCount": 0, "modelCount": 0}));
        });

        let reply = handle_delta(&context(&server, None), CompareAction::Remove, ids(Some("c1"), None))
            .await
            .expect("remove should succeed");
        assert_eq!(reply.issued_session, Some(issued));
        assert_eq!(reply.value.badge_text(), "");
    }

    #[tokio::test]
    async fn string_encoded_counts_are_unwrapped() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/comparison/update/add.json");
            then.status(200)
                .body(r#""{\"contextCount\":4,\"modelCount\":2}""#);
        });

        let reply = handle_delta(&context(&server, None), CompareAction::Add, ids(Some("c1"), None))
            .await
            .expect("wrapped counts should decode");
        assert_eq!(reply.value.badge_text(), "(6)");
    }

    #[tokio::test]
    async fn malformed_counts_are_a_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/comparison/update/add.json");
            then.status(200).body("<html>");
        });

        let err = handle_delta(&context(&server, None), CompareAction::Add, ids(Some("c1"), None))
            .await
            .expect_err("malformed");
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn mounted_service_keeps_its_prefix() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/juxta/comparison/snapshot.json");
            then.status(200).json_body(json!({"contexts": [], "models": ["m1"]}));
        });

        let ctx = AppContext {
            base_url: server.url("/juxta/").parse().expect("valid URL"),
            ..context(&server, None)
        };
        let reply = handle_show(&ctx).await.expect("show should succeed");
        mock.assert();
        assert_eq!(reply.value.models, vec!["m1"]);
    }

    #[tokio::test]
    async fn clear_accepts_the_redirect() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/comparison/clear");
            then.status(303).header("location", "/");
        });

        handle_clear(&context(&server, Some(Uuid::new_v4())))
            .await
            .expect("clear should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn show_decodes_snapshot() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/comparison/snapshot.json");
            then.status(200)
                .json_body(json!({"contexts": ["c1"], "models": []}));
        });

        let reply = handle_show(&context(&server, None))
            .await
            .expect("show should succeed");
        assert_eq!(reply.value.contexts, vec!["c1"]);
        assert!(reply.value.models.is_empty());
    }
}
