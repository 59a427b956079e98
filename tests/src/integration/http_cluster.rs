//! # HTTP End-to-End
//!
//! Nodes served over real sockets and driven through their HTTP routes with
//! `reqwest`, exactly as an external test harness would. Each test owns a
//! distinct port range.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use clap::Parser;
    use futures::future::join_all;
    use reqwest::{Client, StatusCode};
    use serde_json::{json, Value as Json};

    use cf_consensus::{
        ClusterReadiness, ConsensusConfig, NodeActor, NodeApi, NodeId, NodeIdentity,
        ReadinessSignal, Value,
    };
    use cf_node_api::{HttpBroadcaster, NodeApiConfig, NodeServer, NodeServerHandle};
    use node_runtime::{Cli, Cluster, RuntimeConfig};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    async fn launch(args: &[&str]) -> Cluster {
        let cli = Cli::try_parse_from(std::iter::once("node-runtime").chain(args.iter().copied()))
            .unwrap();
        let config = RuntimeConfig::try_from(cli).unwrap();
        let cluster = Cluster::launch(&config).await.unwrap();
        cluster.wait_ready(Duration::from_secs(5)).await.unwrap();
        cluster
    }

    /// Serve a subset of an N-node cluster, sharing one readiness coordinator
    async fn serve_nodes(
        base_port: u16,
        values: &[Value],
        ids: &[NodeId],
        readiness: Arc<ClusterReadiness>,
    ) -> Vec<NodeServerHandle> {
        let config = NodeApiConfig::default().with_base_port(base_port);
        let broadcaster = Arc::new(HttpBroadcaster::new(config.clone()).unwrap());
        let mut handles = Vec::new();

        for &id in ids {
            let identity = NodeIdentity::new(id, values.len(), 0, false).unwrap();
            let node: Arc<dyn NodeApi> = Arc::new(NodeActor::new(
                identity,
                values[id],
                ConsensusConfig::with_collect_window(Duration::from_millis(100)),
                Arc::clone(&broadcaster),
                Arc::clone(&readiness),
            ));
            let server = NodeServer::bind(&config, node).await.unwrap();
            handles.push(server.spawn(Arc::clone(&readiness) as Arc<dyn ReadinessSignal>));
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        handles
    }

    fn url(base_port: u16, id: NodeId, route: &str) -> String {
        format!("http://127.0.0.1:{}/{}", base_port + id as u16, route)
    }

    async fn get(client: &Client, url: String) -> (StatusCode, String) {
        let response = client.get(url).send().await.unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }

    async fn get_json(client: &Client, url: String) -> (StatusCode, Json) {
        let (status, body) = get(client, url).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    async fn shutdown(handles: Vec<NodeServerHandle>) {
        for handle in handles {
            handle.shutdown().await.unwrap();
        }
    }

    // =========================================================================
    // ROUTES
    // =========================================================================

    #[tokio::test]
    async fn test_status_and_idle_state_over_http() {
        let cluster = launch(&["--nodes", "2", "--base-port", "38400"]).await;
        let client = Client::new();

        for id in 0..2 {
            let (status, body) = get(&client, url(38400, id, "status")).await;
            assert_eq!((status, body.as_str()), (StatusCode::OK, "live"));

            let (status, state) = get_json(&client, url(38400, id, "getState")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(state, json!({"decided": false, "x": null, "k": 0}));
        }

        let (status, body) = get(&client, url(38400, 0, "stop")).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "Consensus stopped."));

        cluster.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_faulty_node_over_http() {
        let cluster = launch(&[
            "--nodes", "4", "--faulty-count", "1", "--faulty", "3", "--base-port", "38410",
        ])
        .await;
        let client = Client::new();
        let undefined = json!({"decided": null, "x": null, "k": null});

        let (status, body) = get(&client, url(38410, 3, "status")).await;
        assert_eq!((status, body.as_str()), (StatusCode::INTERNAL_SERVER_ERROR, "faulty"));

        let response = client
            .post(url(38410, 3, "message"))
            .json(&json!({"sender": 0, "message": 1}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "message received");

        let (status, state) = get_json(&client, url(38410, 3, "start")).await;
        assert_eq!((status, state), (StatusCode::OK, undefined.clone()));

        let (status, state) = get_json(&client, url(38410, 3, "getState")).await;
        assert_eq!((status, state), (StatusCode::OK, undefined));

        cluster.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_message_value_is_rejected() {
        let cluster = launch(&["--nodes", "1", "--base-port", "38420"]).await;

        let response = Client::new()
            .post(url(38420, 0, "message"))
            .json(&json!({"sender": 0, "message": 2}))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_client_error());

        cluster.shutdown().await.unwrap();
    }

    // =========================================================================
    // CONSENSUS RUNS
    // =========================================================================

    #[tokio::test]
    async fn test_unanimous_cluster_over_http() {
        let cluster = launch(&[
            "--nodes", "3", "--values", "0", "--base-port", "38430", "--collect-window-ms", "100",
        ])
        .await;
        let client = Client::new();

        let starts = (0..3).map(|id| get_json(&client, url(38430, id, "start")));
        for (status, state) in join_all(starts).await {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(state["x"], json!(0));
            assert!(state["k"].as_u64().unwrap() <= 1);
        }

        cluster.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_split_cluster_terminates_within_round_budget() {
        let cluster = launch(&[
            "--nodes", "4", "--faulty-count", "1", "--faulty", "3", "--values", "0,1,1,1",
            "--base-port", "38440", "--collect-window-ms", "100",
        ])
        .await;
        let client = Client::new();

        let starts = (0..3).map(|id| get_json(&client, url(38440, id, "start")));
        for (status, state) in join_all(starts).await {
            assert_eq!(status, StatusCode::OK);
            let k = state["k"].as_u64().unwrap();
            assert!(k <= 2);
            if state["decided"] == json!(false) {
                assert_eq!(k, 2);
            }
        }

        cluster.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_start_before_cluster_ready_over_http() {
        let readiness = Arc::new(ClusterReadiness::new(2));
        let handles = serve_nodes(38450, &[Value::One, Value::One], &[0], readiness).await;
        let client = Client::new();

        let (status, body) = get(&client, url(38450, 0, "start")).await;
        assert_eq!(
            (status, body.as_str()),
            (StatusCode::BAD_REQUEST, "Nodes are not ready yet.")
        );

        let (_, state) = get_json(&client, url(38450, 0, "getState")).await;
        assert_eq!(state, json!({"decided": false, "x": null, "k": 0}));

        shutdown(handles).await;
    }

    #[tokio::test]
    async fn test_unreachable_peer_over_http() {
        let readiness = Arc::new(ClusterReadiness::new(3));
        let values = [Value::One, Value::One, Value::One];
        let handles = serve_nodes(38460, &values, &[0, 1], Arc::clone(&readiness)).await;
        readiness.set_node_ready(2);
        let client = Client::new();

        let starts = (0..2).map(|id| get_json(&client, url(38460, id, "start")));
        for (status, state) in join_all(starts).await {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(state["x"], json!(1));
            assert!(state["k"].as_u64().unwrap() <= 1);
        }

        shutdown(handles).await;
    }

    #[tokio::test]
    async fn test_concurrent_start_is_rejected() {
        let cluster = launch(&[
            "--nodes", "1", "--base-port", "38470", "--collect-window-ms", "500",
        ])
        .await;
        let client = Client::new();

        let first = tokio::spawn({
            let client = client.clone();
            async move { get_json(&client, url(38470, 0, "start")).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        let (status, _) = get(&client, url(38470, 0, "start")).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, state) = first.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state, json!({"decided": true, "x": 0, "k": 0}));

        cluster.shutdown().await.unwrap();
    }
}
